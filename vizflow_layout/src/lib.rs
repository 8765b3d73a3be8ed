// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout engines for Vizflow.
//!
//! This crate provides the two layouts in the pipeline that are not plain
//! scales:
//!
//! - [`force`]: an iterative force simulation relaxing circle positions
//!   toward per-node targets while resolving collisions, for bubble and
//!   beeswarm charts. The engine mutates caller-supplied nodes in place and
//!   yields per tick, so a renderer can animate intermediate frames.
//! - [`flow`]: a single-pass flow-graph (Sankey) layout assigning nodes to
//!   depth columns, sizing them by throughput and routing weight-thick
//!   bezier links between them, plus a BFS connectivity search used for
//!   hover and search highlighting.

#![no_std]

extern crate alloc;

pub mod flow;
pub mod force;

mod float;
mod search;

pub use search::{FlowDirection, FlowSeed, FlowSelection, connected};
