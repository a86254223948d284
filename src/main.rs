mod app;
mod auth;
mod cli;
mod commit;
mod config;
mod consts;
mod error;
mod github;
mod output;
mod pattern;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();

    // JSON output must stay machine-readable; keep config chatter quiet
    let config = if cli.json {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);

    if let Err(e) = app::run(&cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
