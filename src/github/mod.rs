//! GitHub API surface: REST client, GraphQL contributions, shared types

mod client;
mod graphql;
mod types;

pub(crate) use client::{CommitAuthor, GithubClient, make_agent};
pub(crate) use graphql::{ContributionCalendar, fetch_contributions};
pub(crate) use types::{RepoRef, Repository, User};
