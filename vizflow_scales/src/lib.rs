// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale derivation for the vizflow chart pipeline.
//!
//! A scale is a pure mapping from a data domain to a visual range, with an
//! explicit domain (numeric extent or category set) and range. This crate
//! provides:
//! - **Continuous scales**: linear, logarithmic, square-root and time, with
//!   `map`, `invert` and tick generation.
//! - **Discrete scales**: band (slot-per-category with inner/outer padding)
//!   and point.
//! - **Color scales**: quantize a continuous domain onto an ordered palette,
//!   or assign palette entries to categories.
//! - **Builders** that infer domains from raw values or a
//!   [`vizflow_core::Dataset`] column, with optional "nice" rounding.
//!
//! Degenerate domains fail at construction with [`ScaleError`]; nothing in
//! this crate panics on bad data.

#![no_std]

extern crate alloc;

mod builder;
mod color;
mod continuous;
mod discrete;
mod float;
mod ticks;

pub use builder::{ContinuousOptions, build_continuous, infer_domain, infer_extent};
pub use color::{OrdinalColorScale, QuantizeColorScale};
pub use continuous::{
    ContinuousKind, ContinuousScale, LinearScale, LogScale, SqrtScale, TimeScale,
};
pub use discrete::{BandScale, PointScale};
pub use ticks::{linear_ticks, log_ticks, time_ticks_seconds};

/// Errors returned when constructing or using a scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// No finite domain values were supplied.
    EmptyDomain,
    /// The continuous domain collapsed to a single value (min == max).
    DegenerateDomain,
    /// A log scale was given a zero or negative domain value.
    NonPositiveLogDomain,
    /// `invert` was requested on a discrete scale.
    InvertUnsupported,
    /// A color scale was given an empty palette.
    EmptyPalette,
}
