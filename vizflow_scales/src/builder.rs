// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building scales from raw data.
//!
//! Charts rarely state domains explicitly; they derive them from a dataset
//! column. The builders here collect finite values, infer the `[min, max]`
//! extent (or the category set), optionally round it outward to nice bounds,
//! and hand the result to the checked scale constructors.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use vizflow_core::{Dataset, FieldId};

use crate::ScaleError;
use crate::continuous::{
    ContinuousKind, ContinuousScale, LinearScale, LogScale, SqrtScale, TimeScale,
};
use crate::ticks::linear_ticks;

/// Options for [`build_continuous`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousOptions {
    /// Round the inferred domain outward to human-friendly bounds.
    pub nice: bool,
    /// Log base (log kind only). Default 10.
    pub base: f64,
    /// Tick count hint used when nicing. Default 10.
    pub tick_count: usize,
}

impl Default for ContinuousOptions {
    fn default() -> Self {
        Self {
            nice: false,
            base: 10.0,
            tick_count: 10,
        }
    }
}

/// Infers the `[min, max]` extent of the finite entries of `values`.
///
/// Fails with [`ScaleError::EmptyDomain`] if no finite value exists, and
/// with [`ScaleError::DegenerateDomain`] if all finite values are equal.
pub fn infer_extent(values: impl IntoIterator<Item = f64>) -> Result<(f64, f64), ScaleError> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(ScaleError::EmptyDomain);
    }
    if min == max {
        return Err(ScaleError::DegenerateDomain);
    }
    Ok((min, max))
}

/// Infers the extent of a dataset column (non-numeric cells are ignored).
pub fn infer_domain(dataset: &Dataset, field: FieldId) -> Result<(f64, f64), ScaleError> {
    infer_extent(dataset.column_f64(field))
}

/// Builds a continuous scale of the given kind over the extent of `values`.
///
/// For the log kind, any finite zero or negative value fails with
/// [`ScaleError::NonPositiveLogDomain`] before the extent is taken.
pub fn build_continuous(
    kind: ContinuousKind,
    values: impl IntoIterator<Item = f64>,
    range: (f64, f64),
    options: ContinuousOptions,
) -> Result<ContinuousScale, ScaleError> {
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if kind == ContinuousKind::Log && values.iter().any(|&v| v <= 0.0) {
        return Err(ScaleError::NonPositiveLogDomain);
    }
    let mut domain = infer_extent(values.iter().copied())?;
    if options.nice {
        domain = nice_domain(kind, domain, options);
    }
    match kind {
        ContinuousKind::Linear => LinearScale::new(domain, range).map(ContinuousScale::Linear),
        ContinuousKind::Sqrt => SqrtScale::new(domain, range).map(ContinuousScale::Sqrt),
        ContinuousKind::Time => TimeScale::new(domain, range).map(ContinuousScale::Time),
        ContinuousKind::Log => LogScale::new(domain, range)
            .map(|s| s.with_base(options.base))
            .map(ContinuousScale::Log),
    }
}

fn nice_domain(kind: ContinuousKind, domain: (f64, f64), options: ContinuousOptions) -> (f64, f64) {
    match kind {
        ContinuousKind::Log => {
            // Expand to surrounding powers of the base.
            let base = if options.base.is_finite() && options.base > 1.0 {
                options.base
            } else {
                10.0
            };
            let log = |x: f64| x.ln() / base.ln();
            let lo = base.powf(log(domain.0).floor());
            let hi = base.powf(log(domain.1).ceil());
            if lo < hi { (lo, hi) } else { domain }
        }
        _ => {
            let ticks = linear_ticks(domain.0, domain.1, options.tick_count);
            match (ticks.first(), ticks.last()) {
                (Some(&lo), Some(&hi)) if lo < hi => (lo, hi),
                _ => domain,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use vizflow_core::{Dataset, FieldSpec, Value};

    use super::*;

    #[test]
    fn extent_ignores_non_finite_values() {
        let (lo, hi) = infer_extent(vec![f64::NAN, 3.0, f64::INFINITY, -2.0, 7.0]).unwrap();
        assert_eq!((lo, hi), (-2.0, 7.0));
    }

    #[test]
    fn extent_fails_on_empty_or_constant_input() {
        assert_eq!(
            infer_extent(Vec::new()).unwrap_err(),
            ScaleError::EmptyDomain
        );
        assert_eq!(
            infer_extent(vec![f64::NAN]).unwrap_err(),
            ScaleError::EmptyDomain
        );
        assert_eq!(
            infer_extent(vec![5.0, 5.0]).unwrap_err(),
            ScaleError::DegenerateDomain
        );
    }

    #[test]
    fn builds_a_log_scale_and_rejects_non_positive_values() {
        let s = build_continuous(
            ContinuousKind::Log,
            vec![1.0, 10.0, 100.0],
            (0.0, 200.0),
            ContinuousOptions::default(),
        )
        .unwrap();
        assert!((s.map(10.0) - 100.0).abs() < 1e-9);

        assert_eq!(
            build_continuous(
                ContinuousKind::Log,
                vec![-1.0, 10.0],
                (0.0, 200.0),
                ContinuousOptions::default(),
            )
            .unwrap_err(),
            ScaleError::NonPositiveLogDomain
        );
    }

    #[test]
    fn nice_rounds_linear_domains_outward() {
        let s = build_continuous(
            ContinuousKind::Linear,
            vec![0.13, 9.7],
            (0.0, 100.0),
            ContinuousOptions {
                nice: true,
                ..Default::default()
            },
        )
        .unwrap();
        let (d0, d1) = s.domain();
        assert!(d0 <= 0.13 && d1 >= 9.7);
        assert!((d0 - 0.0).abs() < 1e-9);
        assert!((d1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn nice_log_domains_snap_to_powers() {
        let s = build_continuous(
            ContinuousKind::Log,
            vec![3.0, 800.0],
            (0.0, 1.0),
            ContinuousOptions {
                nice: true,
                ..Default::default()
            },
        )
        .unwrap();
        let (d0, d1) = s.domain();
        assert!((d0 - 1.0).abs() < 1e-9);
        assert!((d1 - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn infers_domains_from_dataset_columns() {
        let mut d = Dataset::new(vec![FieldSpec::text("name"), FieldSpec::number("tax")]);
        d.push_row(vec![Value::from("a"), Value::from(4.0)]).unwrap();
        d.push_row(vec![Value::from("b"), Value::Number(f64::NAN)])
            .unwrap();
        d.push_row(vec![Value::from("c"), Value::from(9.0)]).unwrap();
        let tax = d.field_id("tax").unwrap();
        assert_eq!(infer_domain(&d, tax).unwrap(), (4.0, 9.0));
    }

    #[test]
    fn round_trip_property_holds_for_inferred_scales() {
        let values = vec![3.2, 8.9, 1.4, 12.7, 5.5];
        let s = build_continuous(
            ContinuousKind::Linear,
            values.iter().copied(),
            (0.0, 700.0),
            ContinuousOptions::default(),
        )
        .unwrap();
        for &v in &values {
            assert!((s.invert(s.map(v)) - v).abs() < 1e-9);
        }
    }
}
