// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color utilities for help output.
//!
//! Respects environment variables:
//! - `NO_COLOR=1`: Disables colors
//! - `COLOR=1`: Forces colors even without TTY

use std::io::IsTerminal;

use crate::env;

/// ANSI 256-color codes used in help output.
pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and flags: light grey
    pub const LITERAL: u8 = 250;
    /// Placeholders and flag values: medium grey
    pub const CONTEXT: u8 = 245;
}

/// ANSI reset sequence.
const RESET: &str = "\x1b[0m";

/// Check if colors should be enabled based on TTY and environment variables.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn paint(code: u8, text: &str) -> String {
    format!("\x1b[38;5;{code}m{text}{RESET}")
}

/// Apply header color (section titles) to text.
pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

/// Apply literal color (commands, options) to text.
pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

/// Apply context color (placeholders, values) to text.
pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Colorize an examples help block.
///
/// Expects lines like:
/// ```text
/// Examples:
///   ankisync import -p cards.tsv    Description here
///
/// Columns:
///   tags: space-separated tags
/// ```
///
/// Section headers get the header color, the command part of an example
/// line is colorized with [`colorize_command`], and the value of a
/// `label: value` line is shown as a literal.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];

            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{indent}{}", header(trimmed));
            }
            if let Some(end) = find_description_start(trimmed) {
                let (cmd, desc) = trimmed.split_at(end);
                return format!("{indent}{}{desc}", colorize_command(cmd));
            }
            if let Some((label, value)) = trimmed.split_once(": ") {
                return format!("{indent}{label}: {}", literal(value));
            }
            line.to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Colorize a command line.
///
/// Flags and words are literals; placeholders (`<url>`), quoted strings and
/// the value following a flag are context.
pub fn colorize_command(cmd: &str) -> String {
    let mut after_flag = false;
    let mut in_quote = false;

    cmd.split(' ')
        .map(|word| {
            if word.is_empty() {
                return String::new();
            }
            let is_flag = !in_quote && word.starts_with('-');
            let opens_quote = !in_quote && word.starts_with('"');
            let styled = if in_quote || opens_quote || word.starts_with('<') || (after_flag && !is_flag) {
                context(word)
            } else {
                literal(word)
            };

            if opens_quote {
                in_quote = !(word.len() > 1 && word.ends_with('"'));
            } else if in_quote && word.ends_with('"') {
                in_quote = false;
            }
            after_flag = is_flag && !word.contains('=');
            styled
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find where the description starts: the first run of two or more spaces
/// that is followed by more text.
pub fn find_description_start(line: &str) -> Option<usize> {
    let start = line.find("  ")?;
    if line[start..].trim().is_empty() {
        None
    } else {
        Some(start)
    }
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
