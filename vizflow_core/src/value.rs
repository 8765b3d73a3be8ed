// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cell value type used by datasets.

extern crate alloc;

use alloc::string::{String, ToString};

/// A single cell value in a dataset.
///
/// Dates are modeled as numeric **seconds since the Unix epoch**, so time
/// scales can treat them like any other continuous quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value. Unparseable input is kept as `NaN`, never dropped.
    Number(f64),
    /// A textual value.
    Text(String),
    /// A point in time, in seconds since the Unix epoch.
    Time(f64),
}

impl Value {
    /// Returns the numeric content for `Number` and `Time` values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::Time(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Returns the textual content for `Text` values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Renders the value as a grouping key.
    ///
    /// Text values are returned as-is; numeric values use their `Display`
    /// form. `NaN` keys collapse to a single `"NaN"` bucket.
    pub fn key(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(v) | Self::Time(v) => v.to_string(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn numeric_and_time_values_expose_f64() {
        assert_eq!(Value::Number(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Time(60.0).as_f64(), Some(60.0));
        assert_eq!(Value::Text("x".into()).as_f64(), None);
    }

    #[test]
    fn keys_are_stable_for_text_and_numbers() {
        assert_eq!(Value::Text("Mining".into()).key(), "Mining");
        assert_eq!(Value::Number(3.0).key(), "3");
    }
}
