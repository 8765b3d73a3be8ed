// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete scales: band and point.
//!
//! The domain is an ordered category set, de-duplicated in first-seen order.
//! A descending range (`r0 > r1`) lays categories out in reverse, which is
//! how a chart's `descending` option is expressed.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::ScaleError;

fn dedupe_categories(categories: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for c in categories {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// A band scale: each category owns an equal-width slot of the range.
///
/// `padding_inner` (0–1) reserves that fraction of each step as a gap
/// between bands; `padding_outer` (in steps) pads the range ends.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    /// Creates a band scale over the de-duplicated categories.
    ///
    /// Fails with [`ScaleError::EmptyDomain`] if no categories remain.
    pub fn new(
        categories: impl IntoIterator<Item = String>,
        range: (f64, f64),
    ) -> Result<Self, ScaleError> {
        let domain = dedupe_categories(categories);
        if domain.is_empty() {
            return Err(ScaleError::EmptyDomain);
        }
        Ok(Self {
            domain,
            range,
            padding_inner: 0.1,
            padding_outer: 0.1,
        })
    }

    /// Sets inner (clamped to 0–1) and outer (≥ 0) padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// The ordered category domain.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Whether the domain is empty (never true for a constructed scale).
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let span = (self.range.1 - self.range.0).abs();
        let denom = n - self.padding_inner + 2.0 * self.padding_outer;
        if denom <= 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the computed band width.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the index of a category, if present.
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.domain.iter().position(|c| c == category)
    }

    /// Returns the starting position of a category's band.
    ///
    /// A descending range reverses the layout order.
    pub fn position(&self, category: &str) -> Option<f64> {
        let mut i = self.index_of(category)?;
        let (r0, r1) = self.range;
        if r0 > r1 {
            i = self.domain.len() - 1 - i;
        }
        let start = r0.min(r1);
        let step = self.step();
        Some(start + step * (self.padding_outer + i as f64))
    }

    /// Returns the center position of a category's band.
    pub fn center(&self, category: &str) -> Option<f64> {
        Some(self.position(category)? + self.bandwidth() / 2.0)
    }

    /// Discrete scales have no inverse; this always fails.
    pub fn invert(&self) -> Result<f64, ScaleError> {
        Err(ScaleError::InvertUnsupported)
    }
}

/// A point scale: categories map to positions with no width (a band scale
/// collapsed to its centers).
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
}

impl PointScale {
    /// Creates a point scale over the de-duplicated categories.
    pub fn new(
        categories: impl IntoIterator<Item = String>,
        range: (f64, f64),
    ) -> Result<Self, ScaleError> {
        let domain = dedupe_categories(categories);
        if domain.is_empty() {
            return Err(ScaleError::EmptyDomain);
        }
        Ok(Self {
            domain,
            range,
            padding: 0.5,
        })
    }

    /// Sets the outer padding in steps.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// The ordered category domain.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let span = (self.range.1 - self.range.0).abs();
        let denom = (n - 1.0) + 2.0 * self.padding;
        if denom <= 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the position of a category.
    pub fn position(&self, category: &str) -> Option<f64> {
        let mut i = self.domain.iter().position(|c| c == category)?;
        let (r0, r1) = self.range;
        if r0 > r1 {
            i = self.domain.len() - 1 - i;
        }
        let start = r0.min(r1);
        let step = self.step();
        Some(start + step * (self.padding + i as f64))
    }

    /// Discrete scales have no inverse; this always fails.
    pub fn invert(&self) -> Result<f64, ScaleError> {
        Err(ScaleError::InvertUnsupported)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn duplicate_categories_collapse_in_first_seen_order() {
        let s = BandScale::new(cats(&["b", "a", "b", "c", "a"]), (0.0, 90.0)).unwrap();
        assert_eq!(s.domain(), &["b".to_string(), "a".into(), "c".into()]);
    }

    #[test]
    fn empty_domains_are_rejected() {
        assert_eq!(
            BandScale::new(Vec::new(), (0.0, 1.0)).unwrap_err(),
            ScaleError::EmptyDomain
        );
        assert_eq!(
            PointScale::new(Vec::new(), (0.0, 1.0)).unwrap_err(),
            ScaleError::EmptyDomain
        );
    }

    #[test]
    fn zero_padding_bands_tile_the_range() {
        let s = BandScale::new(cats(&["a", "b"]), (10.0, 30.0))
            .unwrap()
            .with_padding(0.0, 0.0);
        assert!((s.bandwidth() - 10.0).abs() < 1e-9);
        assert!((s.position("a").unwrap() - 10.0).abs() < 1e-9);
        assert!((s.position("b").unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn inner_padding_reserves_a_gap_fraction() {
        let s = BandScale::new(cats(&["a", "b"]), (0.0, 100.0))
            .unwrap()
            .with_padding(0.5, 0.0);
        // step = 100 / (2 - 0.5), bandwidth = step / 2.
        let step = 100.0 / 1.5;
        assert!((s.bandwidth() - step * 0.5).abs() < 1e-9);
        assert!((s.position("b").unwrap() - step).abs() < 1e-9);
    }

    #[test]
    fn descending_ranges_reverse_the_layout() {
        let asc = BandScale::new(cats(&["a", "b"]), (0.0, 20.0))
            .unwrap()
            .with_padding(0.0, 0.0);
        let desc = BandScale::new(cats(&["a", "b"]), (20.0, 0.0))
            .unwrap()
            .with_padding(0.0, 0.0);
        assert!((asc.position("a").unwrap() - desc.position("b").unwrap()).abs() < 1e-9);
        assert!((asc.position("b").unwrap() - desc.position("a").unwrap()).abs() < 1e-9);
    }

    #[test]
    fn point_positions_are_evenly_spaced_and_monotonic() {
        let s = PointScale::new(cats(&["a", "b", "c"]), (0.0, 100.0)).unwrap();
        let a = s.position("a").unwrap();
        let b = s.position("b").unwrap();
        let c = s.position("c").unwrap();
        assert!(a < b && b < c);
        assert!(((b - a) - (c - b)).abs() < 1e-9);
    }

    #[test]
    fn discrete_scales_cannot_invert() {
        let s = BandScale::new(cats(&["a"]), (0.0, 1.0)).unwrap();
        assert_eq!(s.invert(), Err(ScaleError::InvertUnsupported));
        let p = PointScale::new(cats(&["a"]), (0.0, 1.0)).unwrap();
        assert_eq!(p.invert(), Err(ScaleError::InvertUnsupported));
    }
}
