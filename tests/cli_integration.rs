use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn run_ghpaint(args: &[&str], home: &Path) -> (bool, Vec<u8>, Vec<u8>) {
    let bin = std::env::var("CARGO_BIN_EXE_ghpaint").unwrap_or_else(|_| {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("target");
        path.push("debug");
        if cfg!(windows) {
            path.push("ghpaint.exe");
        } else {
            path.push("ghpaint");
        }
        path.to_string_lossy().into_owned()
    });
    let mut cmd = Command::new(bin);
    cmd.args(args);
    // Isolate from the developer's real credentials and config
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join(".config"));
    cmd.env_remove("GHPAINT_TOKEN");
    cmd.env_remove("GITHUB_TOKEN");
    cmd.env_remove("GHPAINT_CLIENT_ID");
    let output = cmd.output().expect("run ghpaint");
    (output.status.success(), output.stdout, output.stderr)
}

#[test]
fn patterns_json_lists_presets() {
    let home = TempDir::new().expect("temp home");
    let (ok, stdout, stderr) = run_ghpaint(&["patterns", "-j"], home.path());
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    let patterns = json.as_array().expect("array output");
    assert_eq!(patterns.len(), 5);

    let heart = patterns
        .iter()
        .find(|p| p["name"] == "heart")
        .expect("heart preset");
    assert_eq!(heart["rows"].as_u64(), Some(8));
    assert_eq!(heart["cols"].as_u64(), Some(8));
    assert_eq!(heart["on_cells"].as_u64(), Some(39));
    assert_eq!(heart["cells"].as_array().unwrap().len(), 8);
}

#[test]
fn preview_json_is_deterministic_sorted_unique() {
    let home = TempDir::new().expect("temp home");
    let args = ["preview", "--pattern", "heart", "--start", "2024-01-01", "-j"];

    let (ok, first, stderr) = run_ghpaint(&args, home.path());
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));
    let (ok, second, _) = run_ghpaint(&args, home.path());
    assert!(ok);
    assert_eq!(first, second, "same pattern and start must give same plan");

    let json: Value = serde_json::from_slice(&first).expect("json");
    assert_eq!(json["commit_count"].as_u64(), Some(39));

    let dates: Vec<&str> = json["dates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(dates.len(), 39);
    let mut sorted = dates.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(dates, sorted, "dates must be unique and ascending");
    assert_eq!(dates[0], "2024-01-03");
    assert_eq!(dates[dates.len() - 1], "2024-02-29");
}

#[test]
fn preview_reads_pattern_files() {
    let home = TempDir::new().expect("temp home");
    let pattern_path = home.path().join("corners.txt");
    std::fs::write(&pattern_path, "#.#\n...\n#.#\n").expect("write pattern");

    let (ok, stdout, stderr) = run_ghpaint(
        &[
            "preview",
            "--file",
            pattern_path.to_str().unwrap(),
            "--start",
            "20240101",
            "-j",
        ],
        home.path(),
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["pattern"], "corners");
    assert_eq!(json["rows"].as_u64(), Some(3));
    assert_eq!(json["on_cells"].as_u64(), Some(4));
    // column-major offsets: 0, 2, 6, 8
    let dates: Vec<&str> = json["dates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2024-01-01", "2024-01-03", "2024-01-07", "2024-01-09"]
    );
}

#[test]
fn preview_defaults_to_heart() {
    let home = TempDir::new().expect("temp home");
    let (ok, stdout, _) = run_ghpaint(&["preview", "--start", "2024-01-01", "-j"], home.path());
    assert!(ok);
    let json: Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["pattern"], "heart");
}

#[test]
fn preview_rejects_bad_date() {
    let home = TempDir::new().expect("temp home");
    let (ok, _, stderr) = run_ghpaint(
        &["preview", "--pattern", "star", "--start", "not-a-date"],
        home.path(),
    );
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid date"));
}

#[test]
fn preview_rejects_unknown_preset() {
    let home = TempDir::new().expect("temp home");
    let (ok, _, stderr) = run_ghpaint(&["preview", "--pattern", "diamond"], home.path());
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Unknown preset"));
}

#[test]
fn preview_rejects_malformed_pattern_file() {
    let home = TempDir::new().expect("temp home");
    let pattern_path = home.path().join("bad.txt");
    std::fs::write(&pattern_path, "##\n#?\n").expect("write pattern");

    let (ok, _, stderr) = run_ghpaint(
        &["preview", "--file", pattern_path.to_str().unwrap()],
        home.path(),
    );
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Invalid pattern"));
}

#[test]
fn draw_requires_login() {
    let home = TempDir::new().expect("temp home");
    let (ok, _, stderr) = run_ghpaint(
        &[
            "draw",
            "--repo",
            "scratch",
            "--pattern",
            "star",
            "--start",
            "2024-01-01",
            "--yes",
        ],
        home.path(),
    );
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("Not logged in"));
}

#[test]
fn logout_without_credentials_reports_nothing_to_do() {
    let home = TempDir::new().expect("temp home");
    let (ok, stdout, _) = run_ghpaint(&["logout"], home.path());
    assert!(ok);
    assert!(String::from_utf8_lossy(&stdout).contains("No stored credentials"));
}
