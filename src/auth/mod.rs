//! Authentication: PKCE flow, token exchange, credential persistence

mod flow;
mod pkce;
pub(crate) mod store;

pub(crate) use flow::{LoginOptions, login};
pub(crate) use store::StoredAuth;

use crate::consts::TOKEN_ENV_VARS;
use crate::error::AppError;

/// Resolve the bearer token: env vars win over the credential store.
pub(crate) fn resolve_token() -> Result<String, AppError> {
    for var in TOKEN_ENV_VARS {
        if let Ok(token) = std::env::var(var)
            && !token.trim().is_empty()
        {
            return Ok(token.trim().to_string());
        }
    }
    store::load()
        .map(|auth| auth.token)
        .ok_or(AppError::NotLoggedIn)
}
