// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delimiter-separated-value parsing into a [`Dataset`].
//!
//! The first row is a header naming the fields. Parse rules come from the
//! supplied [`FieldSpec`]s, matched by header name; columns without a rule
//! default to text. Unparseable numbers and dates become `NaN` so a bad cell
//! never silently drops a record.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::dataset::Dataset;
use crate::field::{FieldKind, FieldSpec};
use crate::value::Value;

/// Errors returned by [`parse_dsv`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DsvError {
    /// The input contains no header row.
    Empty,
    /// A data row's cell count does not match the header.
    RaggedRow {
        /// 1-based line number of the offending row.
        line: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells found.
        found: usize,
    },
}

/// Options for [`parse_dsv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsvOptions {
    /// Cell delimiter. `','` for CSV, `'\t'` for TSV.
    pub delimiter: char,
}

impl Default for DsvOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Parses DSV text into a [`Dataset`].
///
/// Double quotes delimit cells containing the delimiter or newlines; a
/// doubled quote inside a quoted cell is an escaped quote.
pub fn parse_dsv(
    text: &str,
    fields: &[FieldSpec],
    options: DsvOptions,
) -> Result<Dataset, DsvError> {
    let mut rows = split_rows(text, options.delimiter);
    if rows.is_empty() {
        return Err(DsvError::Empty);
    }
    let header = rows.remove(0);

    let specs: Vec<FieldSpec> = header
        .iter()
        .map(|name| {
            fields
                .iter()
                .find(|f| f.name == *name)
                .cloned()
                .unwrap_or_else(|| FieldSpec::text(name))
        })
        .collect();

    let mut dataset = Dataset::new(specs.clone());
    for (i, cells) in rows.into_iter().enumerate() {
        if cells.len() != header.len() {
            return Err(DsvError::RaggedRow {
                line: i + 2,
                expected: header.len(),
                found: cells.len(),
            });
        }
        let row: Vec<Value> = cells
            .into_iter()
            .zip(&specs)
            .map(|(cell, spec)| parse_cell(cell, spec.kind))
            .collect();
        // Width is header.len() by construction.
        let _ = dataset.push_row(row);
    }
    Ok(dataset)
}

fn parse_cell(cell: String, kind: FieldKind) -> Value {
    match kind {
        FieldKind::Text => Value::Text(cell),
        FieldKind::Number => Value::Number(cell.trim().parse::<f64>().unwrap_or(f64::NAN)),
        FieldKind::Date => Value::Time(parse_date_seconds(cell.trim()).unwrap_or(f64::NAN)),
    }
}

/// Parses a `YYYY-MM-DD` date into seconds since the Unix epoch (UTC
/// midnight).
pub fn parse_date_seconds(s: &str) -> Option<f64> {
    let mut parts = s.splitn(3, '-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: i64 = parts.next()?.parse().ok()?;
    let day: i64 = parts.next()?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(days_from_civil(year, month, day) as f64 * 86_400.0)
}

// Proleptic Gregorian day count relative to 1970-01-01.
fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn split_rows(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();
    let mut saw_any = false;

    while let Some(c) = chars.next() {
        saw_any = true;
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
        } else if c == '"' && cell.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            row.push(core::mem::take(&mut cell));
        } else if c == '\n' || c == '\r' {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            row.push(core::mem::take(&mut cell));
            if !(row.len() == 1 && row[0].is_empty()) {
                rows.push(core::mem::take(&mut row));
            } else {
                row.clear();
            }
        } else {
            cell.push(c);
        }
    }
    if saw_any && (!cell.is_empty() || !row.is_empty()) {
        row.push(cell);
        if !(row.len() == 1 && row[0].is_empty()) {
            rows.push(row);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn parses_header_and_typed_cells() {
        let text = "industry,tax,founded\nMining,4.5,1901-02-03\nRetail,n/a,bad\n";
        let d = parse_dsv(
            text,
            &[FieldSpec::number("tax"), FieldSpec::date("founded")],
            DsvOptions::default(),
        )
        .unwrap();

        assert_eq!(d.row_count(), 2);
        let tax = d.field_id("tax").unwrap();
        let founded = d.field_id("founded").unwrap();
        let industry = d.field_id("industry").unwrap();

        assert_eq!(d.text(0, industry), Some("Mining"));
        assert!((d.f64(0, tax).unwrap() - 4.5).abs() < 1e-12);
        // Bad cells become NaN, the record survives.
        assert!(d.f64(1, tax).unwrap().is_nan());
        assert!(d.f64(1, founded).unwrap().is_nan());
    }

    #[test]
    fn quoted_cells_keep_delimiters_and_escaped_quotes() {
        let text = "name,v\n\"Mining, coal\",1\n\"say \"\"hi\"\"\",2\n";
        let d = parse_dsv(text, &[FieldSpec::number("v")], DsvOptions::default()).unwrap();
        let name = d.field_id("name").unwrap();
        assert_eq!(d.text(0, name), Some("Mining, coal"));
        assert_eq!(d.text(1, name), Some("say \"hi\""));
    }

    #[test]
    fn ragged_rows_fail_with_line_numbers() {
        let text = "a,b\n1,2\n3\n";
        let err = parse_dsv(text, &[], DsvOptions::default()).unwrap_err();
        assert_eq!(
            err,
            DsvError::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            parse_dsv("", &[], DsvOptions::default()),
            Err(DsvError::Empty)
        );
    }

    #[test]
    fn tsv_delimiter_is_honored() {
        let text = "a\tb\n1\t2\n";
        let d = parse_dsv(
            text,
            &[FieldSpec::number("a"), FieldSpec::number("b")],
            DsvOptions { delimiter: '\t' },
        )
        .unwrap();
        assert_eq!(d.f64(0, d.field_id("b").unwrap()), Some(2.0));
    }

    #[test]
    fn date_parsing_matches_epoch_arithmetic() {
        // 1970-01-02 is exactly one day after the epoch.
        assert_eq!(parse_date_seconds("1970-01-02"), Some(86_400.0));
        assert_eq!(parse_date_seconds("1969-12-31"), Some(-86_400.0));
        assert_eq!(parse_date_seconds("2000-03-01"), Some(951_868_800.0));
        assert_eq!(parse_date_seconds("not-a-date"), None);
    }

    #[test]
    fn blank_trailing_lines_are_ignored() {
        let text = "a\n1\n\n";
        let d = parse_dsv(text, &[FieldSpec::number("a")], DsvOptions::default()).unwrap();
        assert_eq!(d.row_count(), 1);
    }
}
