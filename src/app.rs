//! Command dispatch: wires CLI arguments, config, auth, and the API client
//! into the individual subcommand handlers.

use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};

use crate::auth::{self, LoginOptions, StoredAuth};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::commit::{self, GeneratePlan};
use crate::consts::{
    CALENDAR_WINDOW_DAYS, DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME, DEFAULT_CALLBACK_PORT,
    DEFAULT_CLIENT_ID, DEFAULT_DELAY_MS, DEFAULT_MESSAGE_TEMPLATE, DATE_FORMAT,
};
use crate::error::{AppError, AuthError};
use crate::github::{CommitAuthor, GithubClient, RepoRef, fetch_contributions, make_agent};
use crate::output;
use crate::pattern::{self, Pattern};
use crate::utils::{self, parse_date, prompt};

struct CommandContext<'a> {
    cli: &'a Cli,
    config: &'a Config,
}

pub(crate) fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    utils::set_debug(cli.debug);
    let ctx = CommandContext { cli, config };

    match &cli.command {
        Some(Commands::Login {
            with_token,
            no_browser,
        }) => handle_login(&ctx, *with_token, *no_browser),
        Some(Commands::Logout) => handle_logout(),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Repos) => handle_repos(&ctx),
        Some(Commands::Patterns) => handle_patterns(&ctx),
        Some(Commands::Preview {
            pattern,
            file,
            start,
            dates,
        }) => handle_preview(&ctx, pattern.as_deref(), file.as_deref(), start.as_deref(), *dates),
        Some(Commands::Draw {
            repo,
            pattern,
            file,
            start,
            branch,
            message,
            delay_ms,
            dry_run,
            yes,
        }) => handle_draw(
            &ctx,
            DrawArgs {
                repo: repo.as_deref(),
                pattern: pattern.as_deref(),
                file: file.as_deref(),
                start: start.as_deref(),
                branch: branch.as_deref(),
                message: message.as_deref(),
                delay_ms: *delay_ms,
                dry_run: *dry_run,
                yes: *yes,
            },
        ),
        Some(Commands::Calendar) | None => handle_calendar(&ctx),
    }
}

fn handle_login(ctx: &CommandContext<'_>, with_token: bool, no_browser: bool) -> Result<(), AppError> {
    let token = if with_token {
        let token = prompt::read_line("Paste your personal access token: ")?;
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }
        token
    } else {
        let client_id = std::env::var("GHPAINT_CLIENT_ID")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| ctx.config.client_id.clone())
            .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
        let opts = LoginOptions {
            client_id,
            port: ctx.config.port.unwrap_or(DEFAULT_CALLBACK_PORT),
            open_browser: !no_browser,
        };
        auth::login(&make_agent(), &opts)?
    };

    // Validate the token before persisting it
    let client = GithubClient::new(token.clone());
    let user = client.current_user()?;
    auth::store::save(&StoredAuth {
        token,
        user: Some(user.clone()),
    })?;

    println!("Logged in as {}", user.login);
    Ok(())
}

fn handle_logout() -> Result<(), AppError> {
    if auth::store::clear() {
        println!("Logged out.");
    } else {
        println!("No stored credentials.");
    }
    Ok(())
}

fn handle_whoami(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let client = GithubClient::new(auth::resolve_token()?);
    let user = client.current_user()?;

    if ctx.cli.json {
        println!(
            "{}",
            serde_json::json!({
                "login": user.login,
                "name": user.name,
                "avatar_url": user.avatar_url,
            })
        );
    } else {
        match &user.name {
            Some(name) => println!("{} ({})", user.login, name),
            None => println!("{}", user.login),
        }
    }
    Ok(())
}

fn handle_calendar(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let client = GithubClient::new(auth::resolve_token()?);
    let user = client.current_user()?;

    let to = Utc::now();
    let from = to - chrono::Duration::days(CALENDAR_WINDOW_DAYS - 1);
    let calendar = fetch_contributions(&client, &user.login, from, to)?;

    if ctx.cli.json {
        println!("{}", output::output_calendar_json(&calendar));
    } else {
        let today = Local::now().date_naive();
        let window_start = today - chrono::Duration::days(CALENDAR_WINDOW_DAYS - 1);
        println!("\n  @{}\n", user.login);
        output::print_calendar(&calendar, window_start, today, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_repos(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let client = GithubClient::new(auth::resolve_token()?);
    let repos = client.repositories()?;

    if repos.is_empty() {
        println!("No repositories found.");
        return Ok(());
    }

    if ctx.cli.json {
        println!("{}", output::output_repos_json(&repos));
    } else {
        output::print_repo_table(&repos, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_patterns(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    if ctx.cli.json {
        let list: Vec<serde_json::Value> = pattern::preset_names()
            .iter()
            .filter_map(|name| pattern::preset(name))
            .map(|p| {
                serde_json::json!({
                    "name": p.name(),
                    "rows": p.rows(),
                    "cols": p.cols(),
                    "on_cells": p.on_cells(),
                    "cells": p.cells(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list).unwrap_or_default());
        return Ok(());
    }

    for name in pattern::preset_names() {
        let Some(p) = pattern::preset(name) else {
            continue;
        };
        println!("{} ({} commits)", name, p.on_cells());
        output::print_pattern_grid(&p, ctx.cli.use_color());
        println!();
    }
    Ok(())
}

fn handle_preview(
    ctx: &CommandContext<'_>,
    preset_name: Option<&str>,
    file: Option<&Path>,
    start: Option<&str>,
    show_dates: bool,
) -> Result<(), AppError> {
    let pattern = resolve_pattern(preset_name, file)?;
    let start = resolve_start(start)?;
    let dates = pattern::commit_dates(&pattern, start);

    if ctx.cli.json {
        println!("{}", output::output_preview_json(&pattern, start, &dates));
    } else {
        output::print_preview(&pattern, start, &dates, show_dates, ctx.cli.use_color());
    }
    Ok(())
}

struct DrawArgs<'a> {
    repo: Option<&'a str>,
    pattern: Option<&'a str>,
    file: Option<&'a Path>,
    start: Option<&'a str>,
    branch: Option<&'a str>,
    message: Option<&'a str>,
    delay_ms: Option<u64>,
    dry_run: bool,
    yes: bool,
}

fn handle_draw(ctx: &CommandContext<'_>, args: DrawArgs<'_>) -> Result<(), AppError> {
    let pattern = resolve_pattern(args.pattern, args.file)?;
    let start = resolve_start(args.start)?;
    let dates = pattern::commit_dates(&pattern, start);

    if dates.is_empty() {
        println!("Nothing to paint: every cell in \"{}\" is off.", pattern.name());
        return Ok(());
    }

    let client = GithubClient::new(auth::resolve_token()?);
    let user = client.current_user()?;

    let repo_input = args
        .repo
        .map(str::to_string)
        .or_else(|| ctx.config.repo.clone())
        .ok_or(AppError::MissingRepo)?;
    let repo = RepoRef::parse(&repo_input, &user.login)?;

    let branch = match args
        .branch
        .map(str::to_string)
        .or_else(|| ctx.config.branch.clone())
    {
        Some(branch) => branch,
        None => client
            .repository(&repo)?
            .default_branch
            .unwrap_or_else(|| "main".to_string()),
    };

    let plan = GeneratePlan {
        repo,
        branch,
        dates,
        message_template: args
            .message
            .map(str::to_string)
            .or_else(|| ctx.config.message.clone())
            .unwrap_or_else(|| DEFAULT_MESSAGE_TEMPLATE.to_string()),
        author: CommitAuthor {
            name: ctx
                .config
                .author_name
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
            email: ctx
                .config
                .author_email
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_string()),
        },
        delay: Duration::from_millis(args.delay_ms.or(ctx.config.delay_ms).unwrap_or(DEFAULT_DELAY_MS)),
    };

    if !ctx.cli.json {
        println!(
            "Painting \"{}\" onto {} ({}): {} commits, {} through {}",
            pattern.name(),
            plan.repo.full_name(),
            plan.branch,
            plan.dates.len(),
            plan.dates[0].format(DATE_FORMAT),
            plan.dates[plan.dates.len() - 1].format(DATE_FORMAT),
        );
    }

    if args.dry_run {
        if ctx.cli.json {
            println!("{}", output::output_preview_json(&pattern, start, &plan.dates));
        } else {
            for date in &plan.dates {
                println!("  {}", date.format(DATE_FORMAT));
            }
            println!("\nDry run: no commits created.");
        }
        return Ok(());
    }

    if !args.yes {
        let question = format!(
            "Create {} backdated commits in {}?",
            plan.dates.len(),
            plan.repo.full_name()
        );
        if !prompt::confirm(&question)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let mut progress = |current: usize, total: usize| {
        eprint!("\r  {current}/{total} commits created");
        let _ = std::io::stderr().flush();
    };
    let outcome = commit::run(&client, &plan, &mut progress);
    eprintln!();

    match outcome.failed {
        None => {
            if ctx.cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "repo": plan.repo.full_name(),
                        "branch": plan.branch,
                        "created": outcome.created,
                        "total": outcome.total,
                    })
                );
            } else {
                println!(
                    "Created {} commits in {}. The contribution calendar can take a few minutes to refresh.",
                    outcome.created,
                    plan.repo.full_name()
                );
            }
            Ok(())
        }
        Some((date, error)) => {
            eprintln!(
                "Created {}/{} commits before failing on {}",
                outcome.created,
                outcome.total,
                date.format(DATE_FORMAT)
            );
            Err(error.into())
        }
    }
}

fn resolve_pattern(preset_name: Option<&str>, file: Option<&Path>) -> Result<Pattern, AppError> {
    match (preset_name, file) {
        (Some(name), _) => pattern::preset(name).ok_or_else(|| AppError::UnknownPreset {
            name: name.to_string(),
        }),
        (None, Some(path)) => {
            let text = fs::read_to_string(path)?;
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("custom");
            Pattern::from_text(name, &text)
        }
        (None, None) => pattern::preset("heart").ok_or_else(|| AppError::UnknownPreset {
            name: "heart".to_string(),
        }),
    }
}

fn resolve_start(start: Option<&str>) -> Result<NaiveDate, AppError> {
    match start {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}
