/// REST API root
pub(crate) const GITHUB_API: &str = "https://api.github.com";

/// GraphQL endpoint (contribution calendar)
pub(crate) const GITHUB_GRAPHQL: &str = "https://api.github.com/graphql";

pub(crate) const OAUTH_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub(crate) const OAUTH_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

/// Default OAuth app client id; override with GHPAINT_CLIENT_ID or the
/// `client_id` config key.
pub(crate) const DEFAULT_CLIENT_ID: &str = "Iv1.8e55d7dd8f6a9fff";

/// Scopes needed to list repos and push commits
pub(crate) const OAUTH_SCOPES: &str = "repo user";

/// Loopback callback port. Must match the redirect URI registered on the
/// OAuth app, so it is fixed rather than ephemeral.
pub(crate) const DEFAULT_CALLBACK_PORT: u16 = 8976;

/// Env vars checked (in order) before the credential store
pub(crate) const TOKEN_ENV_VARS: [&str; 2] = ["GHPAINT_TOKEN", "GITHUB_TOKEN"];

pub(crate) const USER_AGENT: &str = concat!("ghpaint/", env!("CARGO_PKG_VERSION"));

/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// The contribution calendar shows at most this many days; pattern cells
/// mapping past the window are dropped.
pub(crate) const CALENDAR_WINDOW_DAYS: i64 = 365;

/// Pause between commit-creation requests to stay under rate limits
pub(crate) const DEFAULT_DELAY_MS: u64 = 500;

pub(crate) const DEFAULT_MESSAGE_TEMPLATE: &str = "Contributions: {date}";
pub(crate) const DEFAULT_AUTHOR_NAME: &str = "GitHub Contribution Generator";
pub(crate) const DEFAULT_AUTHOR_EMAIL: &str = "noreply@github.com";
