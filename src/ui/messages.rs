//! Coloured one-line messages for the terminal.
//!
//! Confirmations go to stdout next to reports and summaries; warnings and
//! errors go to stderr.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

fn line(color: &str, icon: &str, msg: impl fmt::Display) -> String {
    format!("{color}{BOLD}{icon} {RESET}{msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_BLUE, "ℹ️", msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_GREEN, "✅", msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(FG_YELLOW, "⚠️", msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(FG_RED, "❌", msg));
}

/// Deliver a summary to `recipient`: a header line, the plain summary text
/// and a blank separator line.
pub fn relay<T: fmt::Display>(recipient: &str, summary: T) {
    println!("{FG_BLUE}{BOLD}📨 → {recipient}{RESET}");
    println!("{}\n", summary);
}
