//! OAuth authorization-code flow with PKCE
//!
//! Binds a loopback listener, sends the user to the authorize URL, catches
//! the redirect, and exchanges the code for a bearer token. No client secret
//! is involved anywhere in this flow.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};

use serde::Deserialize;

use crate::consts::{OAUTH_AUTHORIZE_URL, OAUTH_SCOPES, OAUTH_TOKEN_URL};
use crate::error::AuthError;
use crate::utils::{browser, debug, prompt};

use super::pkce;

pub(crate) struct LoginOptions {
    pub(crate) client_id: String,
    pub(crate) port: u16,
    pub(crate) open_browser: bool,
}

/// Run the full login flow and return the access token.
pub(crate) fn login(agent: &ureq::Agent, opts: &LoginOptions) -> Result<String, AuthError> {
    let pair = pkce::generate();
    let state = pkce::random_state();
    let redirect_uri = format!("http://127.0.0.1:{}/callback", opts.port);
    let url = authorize_url(&opts.client_id, &redirect_uri, &pair.challenge, &state);

    let code = if opts.open_browser {
        // Bind before opening the browser so the redirect cannot race us
        let listener =
            TcpListener::bind(("127.0.0.1", opts.port)).map_err(|source| AuthError::Listener {
                port: opts.port,
                source,
            })?;

        eprintln!("Opening GitHub in your browser...");
        eprintln!("If nothing happens, visit:\n\n  {url}\n");
        browser::open(&url);
        eprintln!("Waiting for authorization...");
        wait_for_callback(&listener, &state)?
    } else {
        eprintln!("Visit this URL to authorize ghpaint:\n\n  {url}\n");
        let pasted = prompt::read_line("Paste the redirect URL (or just the code): ")
            .map_err(AuthError::Input)?;
        code_from_pasted(&pasted, &state)?
    };

    exchange(agent, &opts.client_id, &code, &pair.verifier, &redirect_uri)
}

fn authorize_url(client_id: &str, redirect_uri: &str, challenge: &str, state: &str) -> String {
    let params = [
        ("client_id", client_id),
        ("redirect_uri", redirect_uri),
        ("scope", OAUTH_SCOPES),
        ("response_type", "code"),
        ("code_challenge", challenge),
        ("code_challenge_method", "S256"),
        ("state", state),
    ];
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{OAUTH_AUTHORIZE_URL}?{query}")
}

/// Accept connections until the OAuth callback arrives; unrelated requests
/// (favicon and friends) get a 404 and the loop continues.
fn wait_for_callback(listener: &TcpListener, expected_state: &str) -> Result<String, AuthError> {
    for stream in listener.incoming() {
        let Ok(stream) = stream else { continue };
        match handle_connection(stream, expected_state) {
            Some(result) => return result,
            None => continue,
        }
    }
    Err(AuthError::MissingCode)
}

fn handle_connection(
    mut stream: TcpStream,
    expected_state: &str,
) -> Option<Result<String, AuthError>> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    debug::log(&format!("callback request: {}", request_line.trim_end()));

    // "GET /callback?code=...&state=... HTTP/1.1"
    let path = request_line.split_whitespace().nth(1)?;
    let Some(query) = path
        .strip_prefix("/callback")
        .and_then(|rest| rest.strip_prefix('?'))
    else {
        respond(&mut stream, 404, "Not Found", "");
        return None;
    };

    let params = CallbackParams::parse(query);
    let result = params.into_code(expected_state);
    match &result {
        Ok(_) => respond(
            &mut stream,
            200,
            "OK",
            "<html><body><h2>ghpaint is authorized.</h2>\
             <p>You can close this tab and return to the terminal.</p></body></html>",
        ),
        Err(_) => respond(
            &mut stream,
            400,
            "Bad Request",
            "<html><body><h2>Authorization failed.</h2>\
             <p>Return to the terminal for details.</p></body></html>",
        ),
    }
    Some(result)
}

fn respond(stream: &mut TcpStream, status: u16, reason: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: text/html; charset=utf-8\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[derive(Debug, Default, PartialEq)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl CallbackParams {
    fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k, percent_decode(v)),
                None => (pair, String::new()),
            };
            match key {
                "code" => params.code = Some(value),
                "state" => params.state = Some(value),
                "error" => params.error = Some(value),
                "error_description" => params.error_description = Some(value),
                _ => {}
            }
        }
        params
    }

    fn into_code(self, expected_state: &str) -> Result<String, AuthError> {
        if let Some(error) = self.error {
            let detail = self.error_description.unwrap_or_else(|| error.clone());
            return Err(AuthError::Denied(detail));
        }
        if self.state.as_deref() != Some(expected_state) {
            return Err(AuthError::StateMismatch);
        }
        self.code.ok_or(AuthError::MissingCode)
    }
}

/// Accept either the full redirect URL or a bare code pasted back by the user
fn code_from_pasted(pasted: &str, expected_state: &str) -> Result<String, AuthError> {
    let trimmed = pasted.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingCode);
    }
    match trimmed.split_once('?') {
        Some((_, query)) => CallbackParams::parse(query).into_code(expected_state),
        None => Ok(trimmed.to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

fn exchange(
    agent: &ureq::Agent,
    client_id: &str,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> Result<String, AuthError> {
    let body = serde_json::json!({
        "client_id": client_id,
        "code": code,
        "code_verifier": verifier,
        "redirect_uri": redirect_uri,
        "grant_type": "authorization_code",
    });

    let response = agent
        .post(OAUTH_TOKEN_URL)
        .header("Accept", "application/json")
        .header("Content-Type", "application/json")
        .send_json(&body)
        .map_err(|e| AuthError::Exchange(e.to_string()))?;

    let status = response.status().as_u16();
    if status >= 400 {
        let text = response.into_body().read_to_string().unwrap_or_default();
        return Err(AuthError::Exchange(format!("{status} {}", text.trim())));
    }

    let token: TokenResponse = response
        .into_body()
        .read_json()
        .map_err(|e| AuthError::Exchange(format!("unexpected response: {e}")))?;

    if let Some(error) = token.error {
        let detail = token.error_description.unwrap_or_default();
        return Err(AuthError::Exchange(if detail.is_empty() {
            error
        } else {
            format!("{error}: {detail}")
        }));
    }

    token
        .access_token
        .ok_or_else(|| AuthError::Exchange("response contained no access token".to_string()))
}

/// Encode a query value per RFC 3986 (unreserved characters pass through)
fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn percent_decode(value: &str) -> String {
    fn hex_val(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_encodes_params() {
        let url = authorize_url(
            "Iv1.abc",
            "http://127.0.0.1:8976/callback",
            "chal",
            "state123",
        );
        assert!(url.starts_with(OAUTH_AUTHORIZE_URL));
        assert!(url.contains("client_id=Iv1.abc"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8976%2Fcallback"));
        assert!(url.contains("scope=repo%20user"));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains("state=state123"));
    }

    #[test]
    fn callback_params_extract_code_and_state() {
        let params = CallbackParams::parse("code=abc123&state=xyz");
        assert_eq!(params.code.as_deref(), Some("abc123"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
    }

    #[test]
    fn callback_state_mismatch_is_rejected() {
        let params = CallbackParams::parse("code=abc&state=wrong");
        assert!(matches!(
            params.into_code("expected"),
            Err(AuthError::StateMismatch)
        ));
    }

    #[test]
    fn callback_error_is_surfaced_decoded() {
        let params =
            CallbackParams::parse("error=access_denied&error_description=The+user+denied%20access");
        match params.into_code("s") {
            Err(AuthError::Denied(detail)) => assert_eq!(detail, "The user denied access"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn callback_without_code_is_rejected() {
        let params = CallbackParams::parse("state=s");
        assert!(matches!(params.into_code("s"), Err(AuthError::MissingCode)));
    }

    #[test]
    fn pasted_redirect_url_yields_code() {
        let code =
            code_from_pasted("http://127.0.0.1:8976/callback?code=zzz&state=s", "s").unwrap();
        assert_eq!(code, "zzz");
    }

    #[test]
    fn pasted_bare_code_passes_through() {
        assert_eq!(code_from_pasted("  rawcode  ", "s").unwrap(), "rawcode");
    }

    #[test]
    fn percent_roundtrip() {
        let original = "repo user:/?#";
        assert_eq!(percent_decode(&percent_encode(original)), original);
    }

    #[test]
    fn decode_handles_truncated_escape() {
        assert_eq!(percent_decode("abc%2"), "abc%2");
        assert_eq!(percent_decode("abc%"), "abc%");
    }
}
