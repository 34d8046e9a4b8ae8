// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use serde::Deserialize;

use crate::table::StructuredRecord;

/// Output flavour: separator plus file extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Delim {
    #[default]
    Csv,
    Tsv,
}

impl Delim {
    pub fn sep(self) -> char {
        match self {
            Delim::Csv => ',',
            Delim::Tsv => '\t',
        }
    }

    pub fn ext(self) -> &'static str {
        match self {
            Delim::Csv => "csv",
            Delim::Tsv => "tsv",
        }
    }
}

/* ---------------- Parsing ---------------- */

/// Small CSV/TSV reader (quotes + CRLF tolerant), used to read output back.
pub fn parse_rows(text: &str, delim: Delim) -> Vec<Vec<String>> {
    let sep = delim.sep();
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // doubled quote
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // trailing row without newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

/// First row as headers, the rest as rows.
pub fn parse_record(text: &str, delim: Delim) -> StructuredRecord {
    let mut rows = parse_rows(text, delim);
    if rows.is_empty() {
        return StructuredRecord::default();
    }
    let headers = rows.remove(0);
    StructuredRecord { headers, rows }
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], delim: Delim) -> io::Result<()> {
    let sep = delim.sep();
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header line, then every row.
pub fn write_record<W: Write>(mut w: W, rec: &StructuredRecord, delim: Delim) -> io::Result<()> {
    write_row(&mut w, &rec.headers, delim)?;
    for r in &rec.rows {
        write_row(&mut w, r, delim)?;
    }
    Ok(())
}

pub fn record_to_string(rec: &StructuredRecord, delim: Delim) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_record(&mut buf, rec, delim);
    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_survives_a_read_back() {
        let rec = StructuredRecord {
            headers: cells!["Tm", "Note"],
            rows: vec![cells!["Athletics", "moved, \"again\""], cells!["Boston Red Sox", ""]],
        };
        let text = record_to_string(&rec, Delim::Csv);
        assert_eq!(text.lines().next(), Some("Tm,Note"));
        assert!(text.contains("\"moved, \"\"again\"\"\""));
        assert_eq!(parse_record(&text, Delim::Csv), rec);
    }

    #[test]
    fn tsv_and_crlf() {
        let rows = parse_rows("a\tb\r\nc\td", Delim::Tsv);
        assert_eq!(rows, vec![cells!["a", "b"], cells!["c", "d"]]);
        assert_eq!(Delim::Tsv.ext(), "tsv");
    }
}
