// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zero-baseline series stacking.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use vizflow_core::{Dataset, FieldId};

/// Errors returned by [`stack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// No value columns were given.
    NoSeries,
    /// A field id does not name a column of the dataset.
    UnknownField(FieldId),
}

/// One stacked layer within a group: the spans of a single value column.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayer {
    /// The value column this layer accumulates.
    pub field: FieldId,
    /// Column name, for legends.
    pub label: String,
    /// One `(baseline, top)` span per row of the group, in row order.
    pub spans: Vec<(f64, f64)>,
}

/// All stacked layers for one group key.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedGroup {
    /// The group key (text form of the key column).
    pub key: String,
    /// Source row indices of this group, in input order.
    pub rows: Vec<usize>,
    /// Layers in `series_fields` order, aligned to `rows`.
    pub layers: Vec<StackLayer>,
}

/// Output of [`stack`].
#[derive(Debug, Clone, PartialEq)]
pub struct StackResult {
    /// Groups in first-seen key order.
    pub groups: Vec<StackedGroup>,
    /// The largest final top across all groups and rows.
    ///
    /// Charts size their y domain from this.
    pub max_stack_total: f64,
}

/// Stacks `series_fields` per row, grouped by the text key in `group_key`.
///
/// Layer `i` of a row spans from the sum of fields `0..i` to the sum of
/// fields `0..=i`, so baselines within a row never decrease. Non-numeric and
/// `NaN` cells contribute zero; rows are never dropped.
pub fn stack(
    dataset: &Dataset,
    group_key: FieldId,
    series_fields: &[FieldId],
) -> Result<StackResult, StackError> {
    if series_fields.is_empty() {
        return Err(StackError::NoSeries);
    }
    for &field in core::iter::once(&group_key).chain(series_fields) {
        if field.0 >= dataset.field_count() {
            return Err(StackError::UnknownField(field));
        }
    }

    // First-seen group order, keyed by the text form of the key cell.
    let mut order: Vec<StackedGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in 0..dataset.row_count() {
        let key = dataset.key(row, group_key);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push(StackedGroup {
                key,
                rows: Vec::new(),
                layers: series_fields
                    .iter()
                    .map(|&field| StackLayer {
                        field,
                        label: dataset.fields()[field.0].name.clone(),
                        spans: Vec::new(),
                    })
                    .collect(),
            });
            order.len() - 1
        });
        let group = &mut order[slot];
        group.rows.push(row);
        let mut baseline = 0.0;
        for (li, &field) in series_fields.iter().enumerate() {
            let v = dataset.f64(row, field).filter(|v| v.is_finite()).unwrap_or(0.0);
            let top = baseline + v;
            group.layers[li].spans.push((baseline, top));
            baseline = top;
        }
    }

    let max_stack_total = order
        .iter()
        .filter_map(|g| g.layers.last())
        .flat_map(|layer| layer.spans.iter().map(|&(_, top)| top))
        .fold(0.0_f64, f64::max);

    Ok(StackResult {
        groups: order,
        max_stack_total,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use vizflow_core::{FieldSpec, Value};

    use super::*;

    fn sample() -> Dataset {
        let mut d = Dataset::new(vec![
            FieldSpec::text("cat"),
            FieldSpec::number("y0"),
            FieldSpec::number("y1"),
        ]);
        d.push_row(vec![Value::from("A"), Value::from(10.0), Value::from(20.0)])
            .unwrap();
        d.push_row(vec![Value::from("B"), Value::from(1.0), Value::from(2.0)])
            .unwrap();
        d.push_row(vec![Value::from("A"), Value::from(5.0), Value::from(5.0)])
            .unwrap();
        d
    }

    fn ids(d: &Dataset) -> (FieldId, Vec<FieldId>) {
        let cat = d.field_id("cat").unwrap();
        let series = vec![d.field_id("y0").unwrap(), d.field_id("y1").unwrap()];
        (cat, series)
    }

    #[test]
    fn stacks_cumulative_spans_per_row() {
        let d = sample();
        let (cat, series) = ids(&d);
        let result = stack(&d, cat, &series).unwrap();
        let a = &result.groups[0];
        assert_eq!(a.key, "A");
        assert_eq!(a.layers[0].spans[0], (0.0, 10.0));
        assert_eq!(a.layers[1].spans[0], (10.0, 30.0));
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let d = sample();
        let (cat, series) = ids(&d);
        let result = stack(&d, cat, &series).unwrap();
        assert_eq!(result.groups.len(), 2);
        assert_eq!(result.groups[0].key, "A");
        assert_eq!(result.groups[0].rows, vec![0, 2]);
        assert_eq!(result.groups[1].key, "B");
        assert_eq!(result.groups[1].rows, vec![1]);
    }

    #[test]
    fn baselines_chain_and_top_equals_field_sum() {
        let d = sample();
        let (cat, series) = ids(&d);
        let result = stack(&d, cat, &series).unwrap();
        for group in &result.groups {
            for ri in 0..group.rows.len() {
                let mut prev_top = 0.0;
                for layer in &group.layers {
                    let (lo, hi) = layer.spans[ri];
                    assert!((lo - prev_top).abs() < 1e-9);
                    assert!(hi >= lo - 1e-9);
                    prev_top = hi;
                }
                let row = group.rows[ri];
                let sum: f64 = series.iter().filter_map(|&f| d.f64(row, f)).sum();
                assert!((prev_top - sum).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn max_stack_total_spans_all_groups() {
        let d = sample();
        let (cat, series) = ids(&d);
        let result = stack(&d, cat, &series).unwrap();
        assert!((result.max_stack_total - 30.0).abs() < 1e-9);
    }

    #[test]
    fn nan_values_contribute_zero_without_dropping_rows() {
        let mut d = Dataset::new(vec![FieldSpec::text("cat"), FieldSpec::number("v")]);
        d.push_row(vec![Value::from("A"), Value::Number(f64::NAN)])
            .unwrap();
        d.push_row(vec![Value::from("A"), Value::from(3.0)]).unwrap();
        let cat = d.field_id("cat").unwrap();
        let v = d.field_id("v").unwrap();
        let result = stack(&d, cat, &[v]).unwrap();
        assert_eq!(result.groups[0].layers[0].spans, vec![(0.0, 0.0), (0.0, 3.0)]);
    }

    #[test]
    fn empty_series_and_bad_fields_are_rejected() {
        let d = sample();
        let cat = d.field_id("cat").unwrap();
        assert_eq!(stack(&d, cat, &[]).unwrap_err(), StackError::NoSeries);
        assert_eq!(
            stack(&d, cat, &[FieldId(9)]).unwrap_err(),
            StackError::UnknownField(FieldId(9))
        );
    }
}
