use comfy_table::{
    ContentArrangement, Table, modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::github::Repository;
use crate::output::format::{header_cell, styled_cell, truncate};

pub(crate) fn print_repo_table(repos: &[Repository], use_color: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            header_cell("Repository", use_color),
            header_cell("Visibility", use_color),
            header_cell("Updated", use_color),
            header_cell("Description", use_color),
        ]);

    for repo in repos {
        let visibility = if repo.private { "private" } else { "public" };
        let color = if use_color && repo.private {
            Some(comfy_table::Color::Yellow)
        } else {
            None
        };
        // Trim the timestamp down to its date half
        let updated = repo
            .updated_at
            .as_deref()
            .map(|ts| ts.split('T').next().unwrap_or(ts).to_string())
            .unwrap_or_default();
        table.add_row(vec![
            styled_cell(&repo.full_name, None, false),
            styled_cell(visibility, color, false),
            styled_cell(&updated, None, false),
            styled_cell(&truncate(repo.description.as_deref().unwrap_or(""), 48), None, false),
        ]);
    }

    println!("{table}");
    println!("\n  {} repositories\n", repos.len());
}

pub(crate) fn output_repos_json(repos: &[Repository]) -> String {
    let output: Vec<serde_json::Value> = repos
        .iter()
        .map(|repo| {
            serde_json::json!({
                "id": repo.id,
                "name": repo.name,
                "full_name": repo.full_name,
                "private": repo.private,
                "html_url": repo.html_url,
                "description": repo.description,
                "updated_at": repo.updated_at,
                "default_branch": repo.default_branch,
            })
        })
        .collect();
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}
