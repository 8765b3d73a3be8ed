// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data model for the vizflow chart pipeline.
//!
//! This crate provides the pieces every chart kind shares:
//! - **Values and datasets**: a small owned tabular model, one row per input
//!   record, with columns parsed per a field specification.
//! - **DSV parsing**: delimiter-separated text into a [`Dataset`], with
//!   unparseable numerics kept as `NaN` rather than dropped.
//! - **Configuration**: a per-chart options struct with documented defaults,
//!   validated at construction.
//! - **Interaction state**: active/matched/hovered flags per entity, kept
//!   independent of any renderer.
//!
//! Rendering (SVG/DOM, tooltips, widgets) is out of scope; downstream crates
//! produce geometry that an external renderer consumes.

#![no_std]

extern crate alloc;

mod config;
mod dataset;
mod dsv;
mod field;
mod state;
mod value;

pub use config::{ChartConfig, ConfigError, Frame, ScaleType, default_color_scheme};
pub use dataset::{Dataset, DatasetError, FieldId};
pub use dsv::{DsvError, DsvOptions, parse_date_seconds, parse_dsv};
pub use field::{FieldKind, FieldRoles, FieldSpec, RoleError, RoleIds};
pub use state::{Flag, FlagSet, InteractionState};
pub use value::Value;
