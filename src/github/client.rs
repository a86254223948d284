//! Synchronous GitHub REST/GraphQL client
//!
//! One configured agent per client; status codes are handled here rather
//! than surfaced as transport errors.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::consts::{DATE_FORMAT, GITHUB_API, GITHUB_GRAPHQL, USER_AGENT};
use crate::error::ApiError;
use crate::utils::debug;

use super::types::{RepoRef, Repository, User};

const REPOS_PER_PAGE: usize = 100;

/// Commit author identity stamped onto generated commits
#[derive(Debug, Clone)]
pub(crate) struct CommitAuthor {
    pub(crate) name: String,
    pub(crate) email: String,
}

pub(crate) struct GithubClient {
    agent: ureq::Agent,
    token: String,
}

pub(crate) fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are handled by the caller
        .timeout_global(Some(Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl GithubClient {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self {
            agent: make_agent(),
            token: token.into(),
        }
    }

    /// GET /user
    pub(crate) fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/user")
    }

    /// GET /user/repos — repositories the user owns, most recently updated
    /// first, following pagination until a short page.
    pub(crate) fn repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let mut repos: Vec<Repository> = Vec::new();
        let mut page = 1usize;
        loop {
            let url = format!("{GITHUB_API}/user/repos");
            debug::log(&format!("GET /user/repos?page={page}"));
            let response = self
                .agent
                .get(&url)
                .header("Authorization", &format!("Bearer {}", self.token))
                .header("Accept", "application/vnd.github.v3+json")
                .header("User-Agent", USER_AGENT)
                .query("sort", "updated")
                .query("affiliation", "owner")
                .query("per_page", &REPOS_PER_PAGE.to_string())
                .query("page", &page.to_string())
                .call()
                .map_err(|e| ApiError::Request(e.to_string()))?;

            let batch: Vec<Repository> = parse_json(response)?;
            let short_page = batch.len() < REPOS_PER_PAGE;
            repos.extend(batch);
            if short_page {
                return Ok(repos);
            }
            page += 1;
        }
    }

    /// GET /repos/{owner}/{repo} — used to resolve the default branch
    pub(crate) fn repository(&self, repo: &RepoRef) -> Result<Repository, ApiError> {
        self.get_json(&format!("/repos/{}/{}", repo.owner, repo.name))
    }

    /// Create one backdated commit on `branch`: read the branch head, upload
    /// a blob, graft it into a tree, commit with a backdated author, and
    /// advance the ref. Mirrors what a `git commit --date` push would do,
    /// entirely through the hosted API.
    pub(crate) fn create_backdated_commit(
        &self,
        repo: &RepoRef,
        branch: &str,
        message: &str,
        date: NaiveDate,
        author: &CommitAuthor,
    ) -> Result<String, ApiError> {
        let date_str = date.format(DATE_FORMAT).to_string();
        let repo_path = format!("/repos/{}/{}", repo.owner, repo.name);

        let head: GitRef = self.get_json(&format!("{repo_path}/git/ref/heads/{branch}"))?;
        let parent_sha = head.object.sha;

        let content = format!("# Contribution: {date_str}\n");
        let blob: ShaOnly = self.post_json(
            &format!("{repo_path}/git/blobs"),
            &serde_json::json!({
                "content": STANDARD.encode(content),
                "encoding": "base64",
            }),
        )?;

        let tree: ShaOnly = self.post_json(
            &format!("{repo_path}/git/trees"),
            &serde_json::json!({
                "base_tree": parent_sha,
                "tree": [{
                    "path": format!("contributions/{date_str}.md"),
                    "mode": "100644",
                    "type": "blob",
                    "sha": blob.sha,
                }],
            }),
        )?;

        let commit: ShaOnly = self.post_json(
            &format!("{repo_path}/git/commits"),
            &serde_json::json!({
                "message": message,
                "tree": tree.sha,
                "parents": [parent_sha],
                "author": {
                    "name": author.name,
                    "email": author.email,
                    "date": format!("{date_str}T12:00:00Z"),
                },
            }),
        )?;

        let updated: GitRef = self.patch_json(
            &format!("{repo_path}/git/refs/heads/{branch}"),
            &serde_json::json!({ "sha": commit.sha }),
        )?;

        Ok(updated.object.sha)
    }

    /// POST a GraphQL query and unwrap the data/errors envelope
    pub(crate) fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        debug::log("POST /graphql");
        let response = self
            .agent
            .post(GITHUB_GRAPHQL)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .send_json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let envelope: GraphqlEnvelope<T> = parse_json(response)?;
        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::Graphql(joined));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Parse("GraphQL response had no data".to_string()))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug::log(&format!("GET {path}"));
        let response = self
            .agent
            .get(&format!("{GITHUB_API}{path}"))
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        parse_json(response)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        debug::log(&format!("POST {path}"));
        let response = self
            .agent
            .post(&format!("{GITHUB_API}{path}"))
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .send_json(body)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        parse_json(response)
    }

    fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        debug::log(&format!("PATCH {path}"));
        let response = self
            .agent
            .patch(&format!("{GITHUB_API}{path}"))
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .send_json(body)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        parse_json(response)
    }
}

fn parse_json<T: DeserializeOwned>(
    response: ureq::http::Response<ureq::Body>,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    if status >= 400 {
        let body = response.into_body().read_to_string().unwrap_or_default();
        return Err(ApiError::Status {
            status,
            message: api_error_message(&body),
        });
    }
    response
        .into_body()
        .read_json()
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// GitHub error bodies carry a "message" field; fall back to the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct GitRef {
    object: GitObject,
}

#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ShaOnly {
    sha: String,
}

#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct GraphqlEnvelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorItem>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorItem {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_message_field() {
        let body = r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com"}"#;
        assert_eq!(api_error_message(body), "Bad credentials");
    }

    #[test]
    fn error_message_falls_back_to_body() {
        assert_eq!(api_error_message("  plain text  "), "plain text");
    }

    #[test]
    fn git_ref_deserializes() {
        let json = r#"{"ref":"refs/heads/main","object":{"sha":"abc123","type":"commit"}}"#;
        let git_ref: GitRef = serde_json::from_str(json).unwrap();
        assert_eq!(git_ref.object.sha, "abc123");
    }

    #[test]
    fn graphql_envelope_surfaces_errors() {
        let json = r#"{"data":null,"errors":[{"message":"boom"},{"message":"again"}]}"#;
        let envelope: GraphqlEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        let errors = envelope.errors.unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "boom");
    }
}
