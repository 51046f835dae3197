// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delimited input tables.
//!
//! The first row names the columns. A `tags` column holds space-separated
//! tags and a `deck` column overrides the deck per row; every other column
//! is a note field.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ankisync_core::{parse_tags, Record, TagSet};
use tracing::warn;

use crate::error::{Error, Result};

const TAGS_COLUMN: &str = "tags";
const DECK_COLUMN: &str = "deck";

/// How rows become records.
#[derive(Debug, Clone, Copy)]
pub struct TableOptions<'a> {
    /// Deck for rows without a deck cell.
    pub deck: Option<&'a str>,
    pub note_type: &'a str,
    pub delimiter: char,
}

/// Pick a delimiter from a file name or URL: comma for CSV, tab otherwise.
pub fn delimiter_for(source: &str) -> char {
    let lower = source.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    if path.ends_with(".csv") || lower.contains("format=csv") {
        ','
    } else {
        '\t'
    }
}

/// Parse a `--delimiter` value. Accepts one character or the escapes `\t` and `tab`.
pub fn parse_delimiter(value: &str) -> Result<char> {
    match value {
        "\\t" | "tab" => return Ok('\t'),
        _ => {}
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '"' && c != '\n' => Ok(c),
        _ => Err(Error::InvalidDelimiter(value.to_string())),
    }
}

/// Read a table file into records.
pub fn read_table(path: &Path, options: &TableOptions<'_>) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.display().to_string(),
        source,
    })?;
    parse_table(&text, options)
}

/// Parse table text into records, one per data row.
pub fn parse_table(text: &str, options: &TableOptions<'_>) -> Result<Vec<Record>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = split_rows(text, options.delimiter)?.into_iter();

    let Some((_, header)) = rows.next() else {
        return Ok(Vec::new());
    };
    let columns = Columns::new(header);

    rows.map(|(line, cells)| columns.record(line, cells, options))
        .collect()
}

/// Header layout.
struct Columns {
    names: Vec<String>,
    tags: Option<usize>,
    deck: Option<usize>,
}

impl Columns {
    fn new(names: Vec<String>) -> Self {
        let find = |wanted: &str| {
            names
                .iter()
                .position(|n| n.trim().eq_ignore_ascii_case(wanted))
        };
        let tags = find(TAGS_COLUMN);
        let deck = find(DECK_COLUMN);
        Columns { names, tags, deck }
    }

    fn record(&self, line: usize, cells: Vec<String>, options: &TableOptions<'_>) -> Result<Record> {
        let mut fields = BTreeMap::new();
        let mut tags = TagSet::new();
        let mut deck = None;

        for (j, cell) in cells.into_iter().enumerate() {
            let Some(name) = self.names.get(j) else {
                warn!("line {}: skipping column {} as it is not in the header", line, j + 1);
                continue;
            };
            if Some(j) == self.tags {
                tags = parse_tags(&cell);
            } else if Some(j) == self.deck {
                if !cell.trim().is_empty() {
                    deck = Some(cell.trim().to_string());
                }
            } else {
                fields.insert(name.clone(), cell);
            }
        }

        let deck = match deck.as_deref().or(options.deck) {
            Some(deck) if !deck.trim().is_empty() => deck.to_string(),
            _ => return Err(Error::MissingDeck { line }),
        };
        Ok(Record::new(deck, options.note_type, fields, tags)?)
    }
}

/// Split text into rows of cells, each tagged with its 1-based starting line.
///
/// Quoted cells may contain the delimiter and line breaks; `""` inside quotes
/// is a literal quote. Blank lines are dropped.
fn split_rows(text: &str, delimiter: char) -> Result<Vec<(usize, Vec<String>)>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    cell.push(c);
                }
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' if cell.is_empty() => in_quotes = true,
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut cell));
                push_row(&mut rows, row_line, std::mem::take(&mut row));
                line += 1;
                row_line = line;
            }
            c if c == delimiter => row.push(std::mem::take(&mut cell)),
            _ => cell.push(c),
        }
    }

    if in_quotes {
        return Err(Error::ParseLine {
            line: row_line,
            reason: "unterminated quoted field".to_string(),
        });
    }
    if !row.is_empty() || !cell.is_empty() {
        row.push(cell);
        push_row(&mut rows, row_line, row);
    }
    Ok(rows)
}

fn push_row(rows: &mut Vec<(usize, Vec<String>)>, line: usize, row: Vec<String>) {
    let blank = row.len() == 1 && row[0].trim().is_empty();
    if !blank {
        rows.push((line, row));
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
