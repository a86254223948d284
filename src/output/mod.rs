mod calendar;
mod format;
mod preview;
mod repos;

pub(crate) use calendar::{output_calendar_json, print_calendar};
pub(crate) use preview::{output_preview_json, print_pattern_grid, print_preview};
pub(crate) use repos::{output_repos_json, print_repo_table};
