// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned columnar dataset, one row per input record.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::field::FieldSpec;
use crate::value::Value;

/// Identifies a field (column) within a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub usize);

/// Errors returned when mutating a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// A pushed row's cell count does not match the field count.
    RowWidth {
        /// Number of fields in the dataset.
        expected: usize,
        /// Number of cells in the pushed row.
        found: usize,
    },
}

/// An owned tabular dataset.
///
/// Records are immutable after parse, except for derived columns appended by
/// preprocessing (see [`Dataset::push_derived`]). Storage is columnar so
/// scale/stack passes can walk one field without touching the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    fields: Vec<FieldSpec>,
    columns: Vec<Vec<Value>>,
    rows: usize,
}

impl Dataset {
    /// Creates an empty dataset with the given fields.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let columns = fields.iter().map(|_| Vec::new()).collect();
        Self {
            fields,
            columns,
            rows: 0,
        }
    }

    /// Returns the number of rows (records).
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns the number of fields (columns).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the fields in column order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field id by name.
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.fields.iter().position(|f| f.name == name).map(FieldId)
    }

    /// Appends one record.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), DatasetError> {
        if row.len() != self.fields.len() {
            return Err(DatasetError::RowWidth {
                expected: self.fields.len(),
                found: row.len(),
            });
        }
        for (col, value) in self.columns.iter_mut().zip(row) {
            col.push(value);
        }
        self.rows += 1;
        Ok(())
    }

    /// Gets a cell value if the row and field both exist.
    pub fn value(&self, row: usize, field: FieldId) -> Option<&Value> {
        self.columns.get(field.0)?.get(row)
    }

    /// Gets a cell as `f64` (numbers and times only).
    pub fn f64(&self, row: usize, field: FieldId) -> Option<f64> {
        self.value(row, field)?.as_f64()
    }

    /// Gets a cell as text.
    pub fn text(&self, row: usize, field: FieldId) -> Option<&str> {
        self.value(row, field)?.as_text()
    }

    /// Renders a cell as a grouping key (see [`Value::key`]).
    ///
    /// Missing cells key as the empty string.
    pub fn key(&self, row: usize, field: FieldId) -> String {
        self.value(row, field).map(Value::key).unwrap_or_default()
    }

    /// Iterates a field's `f64` content in row order, `NaN` for non-numeric
    /// cells.
    pub fn column_f64(&self, field: FieldId) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |row| self.f64(row, field).unwrap_or(f64::NAN))
    }

    /// Appends a derived column computed from the existing records.
    ///
    /// This is the one post-parse mutation the model allows (computed
    /// ratios and the like). The new field is addressable by name like any
    /// parsed field.
    pub fn push_derived(&mut self, spec: FieldSpec, f: impl Fn(&Self, usize) -> Value) -> FieldId {
        let column: Vec<Value> = (0..self.rows).map(|row| f(self, row)).collect();
        self.fields.push(spec);
        self.columns.push(column);
        FieldId(self.fields.len() - 1)
    }
}
