use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Unknown preset \"{name}\" (run `ghpaint patterns` to see what's available)")]
    UnknownPreset { name: String },

    #[error("Invalid pattern: {reason}")]
    InvalidPattern { reason: String },

    #[error("Invalid repository \"{input}\" (expected NAME or OWNER/NAME)")]
    InvalidRepo { input: String },

    #[error("No repository specified (pass --repo or set `repo` in the config file)")]
    MissingRepo,

    #[error("Not logged in. Run `ghpaint login` first.")]
    NotLoggedIn,

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("Failed to listen on 127.0.0.1:{port}: {source}")]
    Listener { port: u16, source: std::io::Error },

    #[error("Authorization denied: {0}")]
    Denied(String),

    #[error("OAuth state mismatch in callback; run `ghpaint login` again")]
    StateMismatch,

    #[error("Callback did not include an authorization code")]
    MissingCode,

    #[error("Token exchange failed: {0}")]
    Exchange(String),

    #[error("No token provided")]
    MissingToken,

    #[error("Failed to read input: {0}")]
    Input(std::io::Error),

    #[error("Failed to save credentials: {0}")]
    Store(std::io::Error),
}

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("GitHub API error: {status} {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("GraphQL error: {0}")]
    Graphql(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_preset() {
        let e = AppError::UnknownPreset {
            name: "diamond".to_string(),
        };
        assert!(e.to_string().contains("diamond"));
        assert!(e.to_string().contains("ghpaint patterns"));
    }

    #[test]
    fn app_error_display_not_logged_in() {
        assert_eq!(
            AppError::NotLoggedIn.to_string(),
            "Not logged in. Run `ghpaint login` first."
        );
    }

    #[test]
    fn api_error_display_status() {
        let e = ApiError::Status {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(e.to_string(), "GitHub API error: 404 Not Found");
    }

    #[test]
    fn app_error_from_auth_error() {
        let auth = AuthError::MissingCode;
        let app: AppError = auth.into();
        assert_eq!(
            app.to_string(),
            "Callback did not include an authorization code"
        );
    }

    #[test]
    fn app_error_from_api_error() {
        let api = ApiError::Graphql("user not resolved".to_string());
        let app: AppError = api.into();
        assert_eq!(app.to_string(), "GraphQL error: user not resolved");
    }
}
