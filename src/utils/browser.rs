use std::process::{Command, Stdio};

/// Try to open `url` in the user's browser. Best effort: the caller always
/// prints the URL as well, so a failure here just means the user clicks it
/// themselves.
pub(crate) fn open(url: &str) -> bool {
    let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(windows) {
        // `start` treats the first quoted arg as a window title
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    };

    Command::new(program)
        .args(args)
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .is_ok()
}
