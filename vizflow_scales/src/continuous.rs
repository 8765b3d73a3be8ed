// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales: linear, logarithmic, square-root and time.
//!
//! All constructors validate the domain up front: a scale either exists and
//! maps the whole of its stated domain, or construction fails with a
//! [`ScaleError`]. Ranges are taken as given and may run descending (the
//! usual y-flip).

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::ScaleError;
use crate::ticks::{linear_ticks, log_ticks, time_ticks_seconds};

/// Continuous scale kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuousKind {
    /// Linear mapping.
    Linear,
    /// Logarithmic mapping (positive domains only).
    Log,
    /// Square-root mapping (the usual circle-size encoding).
    Sqrt,
    /// Linear mapping over seconds since the Unix epoch, with
    /// calendar-aware ticks.
    Time,
}

impl From<vizflow_core::ScaleType> for ContinuousKind {
    fn from(value: vizflow_core::ScaleType) -> Self {
        match value {
            vizflow_core::ScaleType::Linear => Self::Linear,
            vizflow_core::ScaleType::Log => Self::Log,
        }
    }
}

/// Requires a finite, ascending, non-degenerate domain.
fn check_domain(domain: (f64, f64)) -> Result<(), ScaleError> {
    if !domain.0.is_finite() || !domain.1.is_finite() {
        return Err(ScaleError::EmptyDomain);
    }
    if domain.0 >= domain.1 {
        return Err(ScaleError::DegenerateDomain);
    }
    Ok(())
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Creates a scale mapping `domain` onto `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        check_domain(domain)?;
        Ok(Self { domain, range })
    }

    /// Maps a domain value into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (x - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, r: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        d0 + (r - r0) / denom * (d1 - d0)
    }

    /// Returns nice tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A logarithmic mapping from a strictly positive domain to a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl LogScale {
    /// Creates a log scale with base 10.
    ///
    /// Fails with [`ScaleError::NonPositiveLogDomain`] if either domain
    /// endpoint is zero or negative.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(ScaleError::NonPositiveLogDomain);
        }
        check_domain(domain)?;
        Ok(Self {
            domain,
            range,
            base: 10.0,
        })
    }

    /// Sets the log base. Invalid bases (non-finite, ≤ 0, or 1) fall back
    /// to 10.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    fn log_base(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    /// Maps a domain value into range space. Non-positive inputs clamp to
    /// the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        if x <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(self.domain.0);
        let ld1 = self.log_base(self.domain.1);
        let t = (self.log_base(x) - ld0) / (ld1 - ld0);
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, r: f64) -> f64 {
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return self.domain.0;
        }
        let ld0 = self.log_base(self.domain.0);
        let ld1 = self.log_base(self.domain.1);
        let t = (r - r0) / denom;
        self.base.powf(ld0 + t * (ld1 - ld0))
    }

    /// Returns powers-of-base tick values within the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        log_ticks(self.domain.0, self.domain.1, self.base, count)
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The configured base.
    pub fn base(&self) -> f64 {
        self.base
    }
}

/// A square-root mapping, sign-mirrored for negative inputs like d3's pow
/// scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

fn signed_sqrt(x: f64) -> f64 {
    if x < 0.0 { -(-x).sqrt() } else { x.sqrt() }
}

impl SqrtScale {
    /// Creates a sqrt scale mapping `domain` onto `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        check_domain(domain)?;
        Ok(Self { domain, range })
    }

    /// Maps a domain value into range space.
    pub fn map(&self, x: f64) -> f64 {
        let s0 = signed_sqrt(self.domain.0);
        let s1 = signed_sqrt(self.domain.1);
        let (r0, r1) = self.range;
        r0 + (signed_sqrt(x) - s0) / (s1 - s0) * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, r: f64) -> f64 {
        let s0 = signed_sqrt(self.domain.0);
        let s1 = signed_sqrt(self.domain.1);
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return self.domain.0;
        }
        let s = s0 + (r - r0) / denom * (s1 - s0);
        if s < 0.0 { -(s * s) } else { s * s }
    }

    /// Returns nice tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

/// A time scale: linear over seconds since the Unix epoch, with
/// calendar-aware ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    /// Creates a time scale over a `(seconds, seconds)` domain.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, ScaleError> {
        Ok(Self {
            inner: LinearScale::new(domain, range)?,
        })
    }

    /// Maps a timestamp into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a range value back to a timestamp.
    pub fn invert(&self, r: f64) -> f64 {
        self.inner.invert(r)
    }

    /// Returns calendar-friendly tick timestamps.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        time_ticks_seconds(self.inner.domain().0, self.inner.domain().1, count)
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }
}

/// Any continuous scale instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContinuousScale {
    /// Linear scale.
    Linear(LinearScale),
    /// Log scale.
    Log(LogScale),
    /// Sqrt scale.
    Sqrt(SqrtScale),
    /// Time scale.
    Time(TimeScale),
}

impl ContinuousScale {
    /// Maps a domain value into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
            Self::Sqrt(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, r: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(r),
            Self::Log(s) => s.invert(r),
            Self::Sqrt(s) => s.invert(r),
            Self::Time(s) => s.invert(r),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Sqrt(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// The configured domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
            Self::Sqrt(s) => s.domain(),
            Self::Time(s) => s.domain(),
        }
    }

    /// The scale's kind.
    pub fn kind(&self) -> ContinuousKind {
        match self {
            Self::Linear(_) => ContinuousKind::Linear,
            Self::Log(_) => ContinuousKind::Log,
            Self::Sqrt(_) => ContinuousKind::Sqrt,
            Self::Time(_) => ContinuousKind::Time,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_round_trips_within_tolerance() {
        let s = LinearScale::new((3.0, 13.0), (0.0, 700.0)).unwrap();
        for v in [3.0, 5.5, 9.1, 13.0] {
            assert!((s.invert(s.map(v)) - v).abs() < 1e-9);
        }
    }

    #[test]
    fn linear_handles_descending_ranges() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0)).unwrap();
        assert!((s.map(0.0) - 100.0).abs() < 1e-9);
        assert!((s.map(10.0) - 0.0).abs() < 1e-9);
        assert!((s.invert(50.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domains_fail_explicitly() {
        assert_eq!(
            LinearScale::new((4.0, 4.0), (0.0, 1.0)),
            Err(ScaleError::DegenerateDomain)
        );
        assert_eq!(
            LinearScale::new((f64::NAN, 4.0), (0.0, 1.0)),
            Err(ScaleError::EmptyDomain)
        );
    }

    #[test]
    fn log_maps_midpoint_in_log_space() {
        let s = LogScale::new((1.0, 100.0), (0.0, 200.0)).unwrap();
        assert!((s.map(10.0) - 100.0).abs() < 1e-9);
        assert!((s.map(1.0) - 0.0).abs() < 1e-9);
        assert!((s.map(100.0) - 200.0).abs() < 1e-9);
        assert!((s.invert(100.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn log_rejects_non_positive_domains() {
        assert_eq!(
            LogScale::new((-1.0, 10.0), (0.0, 1.0)),
            Err(ScaleError::NonPositiveLogDomain)
        );
        assert_eq!(
            LogScale::new((0.0, 10.0), (0.0, 1.0)),
            Err(ScaleError::NonPositiveLogDomain)
        );
    }

    #[test]
    fn sqrt_scale_matches_area_encoding() {
        let s = SqrtScale::new((0.0, 100.0), (0.0, 20.0)).unwrap();
        assert!((s.map(25.0) - 10.0).abs() < 1e-9);
        assert!((s.invert(10.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn time_scale_is_linear_over_seconds() {
        let s = TimeScale::new((0.0, 86_400.0), (0.0, 700.0)).unwrap();
        assert!((s.map(43_200.0) - 350.0).abs() < 1e-9);
    }
}
