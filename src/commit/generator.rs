//! Sequential backdated-commit creation
//!
//! One commit per planned date, oldest first, with a fixed pause between
//! requests to stay under abuse-detection limits. The loop stops at the
//! first failure; the partial count is reported, nothing is retried.

use std::thread;
use std::time::Duration;

use chrono::NaiveDate;

use crate::consts::DATE_FORMAT;
use crate::error::ApiError;
use crate::github::{CommitAuthor, GithubClient, RepoRef};

pub(crate) struct GeneratePlan {
    pub(crate) repo: RepoRef,
    pub(crate) branch: String,
    pub(crate) dates: Vec<NaiveDate>,
    pub(crate) message_template: String,
    pub(crate) author: CommitAuthor,
    pub(crate) delay: Duration,
}

pub(crate) struct GenerateOutcome {
    pub(crate) created: usize,
    pub(crate) total: usize,
    pub(crate) failed: Option<(NaiveDate, ApiError)>,
}

impl GenerateOutcome {
    pub(crate) fn is_complete(&self) -> bool {
        self.failed.is_none() && self.created == self.total
    }
}

/// Substitute `{date}` in the commit message template
pub(crate) fn render_message(template: &str, date: NaiveDate) -> String {
    template.replace("{date}", &date.format(DATE_FORMAT).to_string())
}

pub(crate) fn run(
    client: &GithubClient,
    plan: &GeneratePlan,
    progress: &mut dyn FnMut(usize, usize),
) -> GenerateOutcome {
    let total = plan.dates.len();

    for (i, &date) in plan.dates.iter().enumerate() {
        let message = render_message(&plan.message_template, date);
        if let Err(e) =
            client.create_backdated_commit(&plan.repo, &plan.branch, &message, date, &plan.author)
        {
            return GenerateOutcome {
                created: i,
                total,
                failed: Some((date, e)),
            };
        }
        progress(i + 1, total);

        if i + 1 < total && !plan.delay.is_zero() {
            thread::sleep(plan.delay);
        }
    }

    GenerateOutcome {
        created: total,
        total,
        failed: None,
    }
}
