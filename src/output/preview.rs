//! Pattern previews and commit plans, printed before anything touches the API

use chrono::NaiveDate;

use crate::consts::DATE_FORMAT;
use crate::pattern::Pattern;

const ON_CELL: &str = "\x1b[38;2;57;211;83m\u{25a0}\x1b[0m ";
const OFF_CELL: &str = "\x1b[38;2;22;27;34m\u{25a0}\x1b[0m ";

pub(crate) fn print_pattern_grid(pattern: &Pattern, use_color: bool) {
    for row in pattern.cells() {
        let mut line = String::from("  ");
        for &cell in row {
            if use_color {
                line.push_str(if cell == 1 { ON_CELL } else { OFF_CELL });
            } else {
                line.push_str(if cell == 1 { "# " } else { ". " });
            }
        }
        println!("{}", line.trim_end());
    }
}

pub(crate) fn print_preview(
    pattern: &Pattern,
    start: NaiveDate,
    dates: &[NaiveDate],
    show_dates: bool,
    use_color: bool,
) {
    println!(
        "Pattern \"{}\" ({}x{}, {} cells on)\n",
        pattern.name(),
        pattern.rows(),
        pattern.cols(),
        pattern.on_cells()
    );
    print_pattern_grid(pattern, use_color);

    if dates.is_empty() {
        println!("\nNo commits to create: every cell is off.");
        return;
    }

    println!(
        "\nStarting {}: {} commits, {} through {}",
        start.format(DATE_FORMAT),
        dates.len(),
        dates[0].format(DATE_FORMAT),
        dates[dates.len() - 1].format(DATE_FORMAT),
    );

    if show_dates {
        println!();
        for date in dates {
            println!("  {}", date.format(DATE_FORMAT));
        }
    }
}

pub(crate) fn output_preview_json(
    pattern: &Pattern,
    start: NaiveDate,
    dates: &[NaiveDate],
) -> String {
    let output = serde_json::json!({
        "pattern": pattern.name(),
        "rows": pattern.rows(),
        "cols": pattern.cols(),
        "on_cells": pattern.on_cells(),
        "start": start.format(DATE_FORMAT).to_string(),
        "commit_count": dates.len(),
        "dates": dates
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect::<Vec<_>>(),
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern;

    #[test]
    fn preview_json_has_sorted_dates() {
        let p = pattern::preset("heart").unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = pattern::commit_dates(&p, start);
        let json: serde_json::Value =
            serde_json::from_str(&output_preview_json(&p, start, &dates)).unwrap();

        assert_eq!(json["pattern"], "heart");
        assert_eq!(json["on_cells"], 39);
        assert_eq!(json["commit_count"], 39);
        let date_strs: Vec<&str> = json["dates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let mut sorted = date_strs.clone();
        sorted.sort_unstable();
        assert_eq!(date_strs, sorted);
    }
}
