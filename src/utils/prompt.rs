use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stderr; defaults to "no" on empty input
pub(crate) fn confirm(question: &str) -> io::Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;
    let answer = read_trimmed_line()?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Print a prompt on stderr and read one line from stdin
pub(crate) fn read_line(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    read_trimmed_line()
}

fn read_trimmed_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
