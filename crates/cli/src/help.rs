// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles for help output.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let paint = |code: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = paint(colors::codes::HEADER);
    let context = paint(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(paint(colors::codes::LITERAL))
        .placeholder(context)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header}
  {import}      Import notes from a CSV/TSV table
  {check}       Check that AnkiConnect is reachable
  {completion}  Generate shell completions
",
        header = colors::header("Commands:"),
        import = colors::literal("import"),
        check = colors::literal("check"),
        completion = colors::literal("completion"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  ankisync check                                  Make sure Anki is running
  ankisync import -p cards.tsv -d Deck -n Basic   Import a table
  ankisync import -p cards.tsv -d Deck -n Basic --sync  Import, then sync to AnkiWeb",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
