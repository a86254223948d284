//! Contribution calendar via the GraphQL API

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::consts::DATE_FORMAT;
use crate::error::ApiError;

use super::client::GithubClient;

const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// Flattened contribution calendar: date -> count, plus the server total
#[derive(Debug, Default)]
pub(crate) struct ContributionCalendar {
    pub(crate) total: i64,
    pub(crate) days: BTreeMap<NaiveDate, i64>,
}

impl ContributionCalendar {
    pub(crate) fn count(&self, date: NaiveDate) -> i64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    pub(crate) fn active_days(&self) -> usize {
        self.days.values().filter(|c| **c > 0).count()
    }

    pub(crate) fn best_day(&self) -> i64 {
        self.days.values().copied().max().unwrap_or(0)
    }
}

pub(crate) fn fetch_contributions(
    client: &GithubClient,
    login: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<ContributionCalendar, ApiError> {
    let data: ContributionsData = client.graphql(
        CONTRIBUTIONS_QUERY,
        serde_json::json!({
            "username": login,
            "from": from.to_rfc3339(),
            "to": to.to_rfc3339(),
        }),
    )?;

    let calendar = data
        .user
        .ok_or_else(|| ApiError::Graphql(format!("user \"{login}\" not found")))?
        .contributions_collection
        .contribution_calendar;

    flatten(calendar)
}

fn flatten(calendar: RawCalendar) -> Result<ContributionCalendar, ApiError> {
    let mut days = BTreeMap::new();
    for week in calendar.weeks {
        for day in week.contribution_days {
            let date = NaiveDate::parse_from_str(&day.date, DATE_FORMAT)
                .map_err(|e| ApiError::Parse(format!("bad date \"{}\": {e}", day.date)))?;
            days.insert(date, day.contribution_count);
        }
    }
    Ok(ContributionCalendar {
        total: calendar.total_contributions,
        days,
    })
}

#[derive(Debug, Deserialize)]
struct ContributionsData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: RawCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCalendar {
    total_contributions: i64,
    weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Week {
    contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionDay {
    date: String,
    contribution_count: i64,
}
