//! Terminal output utilities: ANSI formatting, labelled fields, and prompts.

use std::io::{self, BufRead, IsTerminal, Write};

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";

/// Check if stdout is a terminal that supports color output.
pub fn supports_color() -> bool {
    color_allowed(io::stdout().is_terminal(), |name| std::env::var(name).ok())
}

/// Color needs a terminal, no `NO_COLOR`, and a `COLORTERM` or non-dumb `TERM`.
fn color_allowed(is_terminal: bool, env: impl Fn(&str) -> Option<String>) -> bool {
    is_terminal
        && env("NO_COLOR").is_none()
        && (env("COLORTERM").is_some()
            || env("TERM").map(|t| t != "dumb").unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm'
            for next in chars.by_ref() {
                if next == 'm' { break; }
            }
        } else {
            result.push(c);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Formatted output
// ---------------------------------------------------------------------------

/// Write a formatted SUCCESS note.
pub fn note_success(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    if supports_color() {
        writeln!(out, "{GREEN}{BOLD}✓{RESET} {msg}")
    } else {
        writeln!(out, "{msg}")
    }
}

/// Write a `Label: value` line.
pub fn field(out: &mut dyn Write, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    if supports_color() {
        writeln!(out, "{BOLD}{label}:{RESET} {value}")
    } else {
        writeln!(out, "{label}: {value}")
    }
}

/// Ask for one line of input. Returns it without the line ending.
///
/// End of input yields an empty answer.
pub fn prompt(input: &mut dyn BufRead, out: &mut dyn Write, question: &str) -> io::Result<String> {
    write!(out, "{question}: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn color_requires_a_terminal() {
        let env = |name: &str| (name == "COLORTERM").then(|| "truecolor".to_string());
        assert!(color_allowed(true, env));
        assert!(!color_allowed(false, env));

        let no_color = |name: &str| match name {
            "NO_COLOR" => Some("1".to_string()),
            "TERM" => Some("xterm-256color".to_string()),
            _ => None,
        };
        assert!(!color_allowed(true, no_color));

        let dumb = |name: &str| (name == "TERM").then(|| "dumb".to_string());
        assert!(!color_allowed(true, dumb));
    }

    #[test]
    fn writes_field() {
        let mut out = Vec::new();
        field(&mut out, "Views", 12).unwrap();
        assert_eq!(strip_ansi(&String::from_utf8(out).unwrap()), "Views: 12\n");
    }

    #[test]
    fn prompt_reads_one_line() {
        let mut input: &[u8] = b"Anna Author\r\nnext\n";
        let mut out = Vec::new();
        let answer = prompt(&mut input, &mut out, "Enter author name").unwrap();
        assert_eq!(answer, "Anna Author");
        assert_eq!(String::from_utf8(out).unwrap(), "Enter author name: ");

        let answer = prompt(&mut input, &mut io::sink(), "again").unwrap();
        assert_eq!(answer, "next");
        let answer = prompt(&mut input, &mut io::sink(), "eof").unwrap();
        assert_eq!(answer, "");
    }
}
