// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series stacking for Vizflow.
//!
//! This crate turns a flat dataset into stacked series: rows are grouped by a
//! key column, and within each group a fixed set of value columns is
//! accumulated bottom-up into `[baseline, top]` spans. The output feeds area
//! and ridgeline rendering directly.
//!
//! The stacker is a pure function of its inputs: it never mutates the
//! dataset, and grouping preserves first-seen order so chart layout stays
//! stable across recomputes.

#![no_std]

extern crate alloc;

mod stack;

pub use stack::{StackError, StackLayer, StackResult, StackedGroup, stack};
