// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color scales: quantize a continuous domain onto an ordered palette, or
//! assign palette entries to categories.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::ScaleError;
use crate::ticks::linear_ticks;

/// Maps a continuous `[min, max]` domain onto an ordered palette by equal
/// domain slices.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeColorScale {
    domain: (f64, f64),
    palette: Vec<Color>,
}

impl QuantizeColorScale {
    /// Creates a quantize scale.
    pub fn new(domain: (f64, f64), palette: Vec<Color>) -> Result<Self, ScaleError> {
        if palette.is_empty() {
            return Err(ScaleError::EmptyPalette);
        }
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ScaleError::EmptyDomain);
        }
        if domain.0 >= domain.1 {
            return Err(ScaleError::DegenerateDomain);
        }
        Ok(Self { domain, palette })
    }

    /// Rounds the domain outward to nice bounds, like d3's `nice()`.
    pub fn nice(mut self) -> Self {
        let ticks = linear_ticks(self.domain.0, self.domain.1, 10);
        if ticks.len() >= 2 {
            // First/last tick always bracket the domain.
            self.domain = (ticks[0], ticks[ticks.len() - 1]);
        }
        self
    }

    /// The effective domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The palette, one entry per quantize slice.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Maps a value to its palette entry. `NaN` maps to `None`; values
    /// outside the domain clamp to the extreme entries.
    pub fn map(&self, x: f64) -> Option<Color> {
        if x.is_nan() {
            return None;
        }
        let (d0, d1) = self.domain;
        let t = ((x - d0) / (d1 - d0)).clamp(0.0, 1.0);
        let n = self.palette.len();
        #[allow(clippy::cast_possible_truncation, reason = "clamped before cast")]
        let i = ((t * n as f64).floor() as usize).min(n - 1);
        Some(self.palette[i])
    }

    /// Returns the domain slice boundaries between consecutive palette
    /// entries (n − 1 thresholds for n colors), for legend rendering.
    pub fn thresholds(&self) -> Vec<f64> {
        let (d0, d1) = self.domain;
        let n = self.palette.len();
        (1..n)
            .map(|i| d0 + (d1 - d0) * i as f64 / n as f64)
            .collect()
    }
}

/// Assigns palette entries to categories in first-seen order, cycling when
/// the palette runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColorScale {
    domain: Vec<String>,
    palette: Vec<Color>,
}

impl OrdinalColorScale {
    /// Creates an ordinal color scale over the de-duplicated categories.
    pub fn new(
        categories: impl IntoIterator<Item = String>,
        palette: Vec<Color>,
    ) -> Result<Self, ScaleError> {
        if palette.is_empty() {
            return Err(ScaleError::EmptyPalette);
        }
        let mut domain: Vec<String> = Vec::new();
        for c in categories {
            if !domain.contains(&c) {
                domain.push(c);
            }
        }
        if domain.is_empty() {
            return Err(ScaleError::EmptyDomain);
        }
        Ok(Self { domain, palette })
    }

    /// The ordered category domain.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Maps a category to its color.
    pub fn map(&self, category: &str) -> Option<Color> {
        let i = self.domain.iter().position(|c| c == category)?;
        Some(self.palette[i % self.palette.len()])
    }
}
