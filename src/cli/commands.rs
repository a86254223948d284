//! CLI subcommand definitions

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Sign in to GitHub (OAuth with PKCE)
    Login {
        /// Read a personal access token from stdin instead of the browser flow
        #[arg(long)]
        with_token: bool,

        /// Print the authorize URL and paste the redirect back by hand
        #[arg(long)]
        no_browser: bool,
    },
    /// Remove stored credentials
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show your contribution calendar for the past year (default)
    Calendar,
    /// List repositories you own
    Repos,
    /// List the built-in patterns
    Patterns,
    /// Show a pattern and the commit dates it would produce
    Preview {
        /// Preset pattern name
        #[arg(short, long, conflicts_with = "file")]
        pattern: Option<String>,

        /// Load a pattern from a text file (#/1 = on, ./0 = off)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// First calendar day of the pattern (YYYYMMDD or YYYY-MM-DD, default today)
        #[arg(short, long)]
        start: Option<String>,

        /// Print every planned commit date
        #[arg(long)]
        dates: bool,
    },
    /// Create one backdated commit per "on" cell of a pattern
    Draw {
        /// Target repository (NAME or OWNER/NAME)
        #[arg(short, long)]
        repo: Option<String>,

        /// Preset pattern name
        #[arg(short, long, conflicts_with = "file")]
        pattern: Option<String>,

        /// Load a pattern from a text file (#/1 = on, ./0 = off)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// First calendar day of the pattern (YYYYMMDD or YYYY-MM-DD, default today)
        #[arg(short, long)]
        start: Option<String>,

        /// Branch to commit to (defaults to the repository's default branch)
        #[arg(short, long)]
        branch: Option<String>,

        /// Commit message template; {date} is substituted
        #[arg(short, long)]
        message: Option<String>,

        /// Milliseconds to sleep between commits
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,

        /// Print the plan without creating commits
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}
