//! Terminal rendering of the contribution calendar
//!
//! Weeks run left to right as columns, days top to bottom within a column,
//! matching the layout GitHub renders on profile pages.

use chrono::{Datelike, Duration, NaiveDate};

use crate::consts::DATE_FORMAT;
use crate::github::ContributionCalendar;

/// Level palette lifted from the public calendar (no contribution -> max)
const LEVEL_COLORS: [(u8, u8, u8); 5] = [
    (22, 27, 34),
    (14, 68, 41),
    (0, 109, 50),
    (38, 166, 65),
    (57, 211, 83),
];

/// Monochrome ramp used when color is off
const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

const DAY_LABELS: [&str; 7] = ["    ", "Mon ", "    ", "Wed ", "    ", "Fri ", "    "];

/// Bucket a daily count into a display level 0-4
pub(crate) fn level_for(count: i64) -> usize {
    if count == 0 {
        0
    } else if count <= 2 {
        1
    } else if count <= 5 {
        2
    } else if count <= 10 {
        3
    } else {
        4
    }
}

fn cell(level: usize, use_color: bool) -> String {
    if use_color {
        let (r, g, b) = LEVEL_COLORS[level];
        format!("\x1b[38;2;{r};{g};{b}m\u{25a0}\x1b[0m ")
    } else {
        format!("{} ", LEVEL_GLYPHS[level])
    }
}

/// Group the window into week columns, aligned to the Sunday on or before
/// `from`. Days outside [from, to] stay as padding.
fn build_weeks(from: NaiveDate, to: NaiveDate) -> Vec<Vec<NaiveDate>> {
    let aligned_start = from - Duration::days(from.weekday().num_days_from_sunday() as i64);
    let mut weeks = Vec::new();
    let mut current = Vec::with_capacity(7);
    let mut day = aligned_start;
    while day <= to {
        current.push(day);
        if current.len() == 7 {
            weeks.push(std::mem::take(&mut current));
        }
        day += Duration::days(1);
    }
    if !current.is_empty() {
        weeks.push(current);
    }
    weeks
}

/// Month labels positioned over the week where the month changes
fn month_label_row(weeks: &[Vec<NaiveDate>]) -> String {
    let mut row = vec![' '; weeks.len() * 2];
    let mut last_month = 0;
    let mut last_end = 0;
    for (i, week) in weeks.iter().enumerate() {
        let first = week[0];
        if first.month() != last_month {
            last_month = first.month();
            let label = first.format("%b").to_string();
            let start = i * 2;
            if start >= last_end && start + label.len() <= row.len() {
                for (j, ch) in label.chars().enumerate() {
                    row[start + j] = ch;
                }
                last_end = start + label.len() + 1;
            }
        }
    }
    row.into_iter().collect::<String>().trim_end().to_string()
}

pub(crate) fn print_calendar(
    cal: &ContributionCalendar,
    from: NaiveDate,
    to: NaiveDate,
    use_color: bool,
) {
    let weeks = build_weeks(from, to);

    println!("  {} contributions in the last year\n", cal.total);

    println!("    {}", month_label_row(&weeks));
    for dow in 0..7 {
        let mut line = String::from(DAY_LABELS[dow]);
        for week in &weeks {
            match week.get(dow) {
                Some(&day) if day >= from && day <= to => {
                    line.push_str(&cell(level_for(cal.count(day)), use_color));
                }
                _ => line.push_str("  "),
            }
        }
        println!("{}", line.trim_end());
    }

    let legend: String = (0..5).map(|level| cell(level, use_color)).collect();
    println!("\n    Less {}More", legend);
    println!(
        "\n  Total {}   Active days {}   Best day {}",
        cal.total,
        cal.active_days(),
        cal.best_day()
    );
}

pub(crate) fn output_calendar_json(cal: &ContributionCalendar) -> String {
    let days: Vec<serde_json::Value> = cal
        .days
        .iter()
        .map(|(date, count)| {
            serde_json::json!({
                "date": date.format(DATE_FORMAT).to_string(),
                "count": count,
                "level": level_for(*count),
            })
        })
        .collect();

    let output = serde_json::json!({
        "total_contributions": cal.total,
        "active_days": cal.active_days(),
        "best_day": cal.best_day(),
        "days": days,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
