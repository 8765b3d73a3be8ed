// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-chart configuration with documented defaults.
//!
//! Each chart invocation takes one [`ChartConfig`]. Options are explicit
//! struct fields (not a dynamic options bag); unrecognized or contradictory
//! settings fail with [`ConfigError`] at validation time.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;
use peniko::color::palette::css;

/// Errors returned by [`ChartConfig::validate`] and [`ScaleType::parse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The continuous scale type string is not recognized.
    UnknownScaleType(String),
    /// The aspect ratio is zero, negative or non-finite.
    InvalidAspectRatio,
    /// A margin is negative or non-finite.
    InvalidMargin,
    /// The color scheme has no entries.
    EmptyColorScheme,
}

/// Continuous scale kind selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScaleType {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping.
    Log,
}

impl ScaleType {
    /// Parses the configuration strings `"linear"` and `"log"`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            other => Err(ConfigError::UnknownScaleType(other.to_string())),
        }
    }
}

/// The chart frame derived from a configuration: margins around a core
/// drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Outer bounds including margins (the view box).
    pub view: Rect,
    /// The core drawing area, translated inside the margins.
    pub core: Rect,
}

/// Default 10-color categorical palette.
pub fn default_color_scheme() -> Vec<Color> {
    alloc::vec![
        css::STEEL_BLUE,
        css::ORANGE,
        css::FOREST_GREEN,
        css::CRIMSON,
        css::MEDIUM_PURPLE,
        css::SADDLE_BROWN,
        css::ORCHID,
        css::GRAY,
        css::OLIVE,
        css::LIGHT_SEA_GREEN,
    ]
}

/// Configuration for one chart invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Width-to-height ratio of the core drawing area. Default `2.0`.
    pub aspect_ratio: f64,
    /// Top layout inset. Default `0.0`.
    pub margin_top: f64,
    /// Right layout inset. Default `0.0`.
    pub margin_right: f64,
    /// Bottom layout inset. Default `0.0`.
    pub margin_bottom: f64,
    /// Left layout inset. Default `0.0`.
    pub margin_left: f64,
    /// Ordered palette for categorical/quantized color encoding.
    pub color_scheme: Vec<Color>,
    /// Reverses a band scale's range. Default `false`.
    pub descending: bool,
    /// Continuous x-scale kind. Default [`ScaleType::Linear`].
    pub x_scale_type: ScaleType,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 2.0,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            color_scheme: default_color_scheme(),
            descending: false,
            x_scale_type: ScaleType::Linear,
        }
    }
}

impl ChartConfig {
    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Sets all four margins at once (top, right, bottom, left).
    pub fn with_margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    /// Sets the color scheme.
    pub fn with_color_scheme(mut self, scheme: Vec<Color>) -> Self {
        self.color_scheme = scheme;
        self
    }

    /// Sets whether band ranges run descending.
    pub fn with_descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    /// Sets the continuous x-scale kind.
    pub fn with_x_scale_type(mut self, kind: ScaleType) -> Self {
        self.x_scale_type = kind;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio);
        }
        for m in [
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
        ] {
            if !m.is_finite() || m < 0.0 {
                return Err(ConfigError::InvalidMargin);
            }
        }
        if self.color_scheme.is_empty() {
            return Err(ConfigError::EmptyColorScheme);
        }
        Ok(())
    }

    /// Derives the chart frame for a given core width.
    ///
    /// Core height is `core_width / aspect_ratio`; the view box adds the
    /// margins on every side.
    pub fn frame(&self, core_width: f64) -> Result<Frame, ConfigError> {
        self.validate()?;
        let core_height = core_width / self.aspect_ratio;
        let view = Rect::new(
            0.0,
            0.0,
            core_width + self.margin_left + self.margin_right,
            core_height + self.margin_top + self.margin_bottom,
        );
        let core = Rect::new(
            self.margin_left,
            self.margin_top,
            self.margin_left + core_width,
            self.margin_top + core_height,
        );
        Ok(Frame { view, core })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn scale_type_parse_rejects_unknown_kinds() {
        assert_eq!(ScaleType::parse("linear"), Ok(ScaleType::Linear));
        assert_eq!(ScaleType::parse("log"), Ok(ScaleType::Log));
        assert_eq!(
            ScaleType::parse("sqrt"),
            Err(ConfigError::UnknownScaleType("sqrt".into()))
        );
    }

    #[test]
    fn frame_places_core_inside_margins() {
        let config = ChartConfig::default()
            .with_aspect_ratio(5.0)
            .with_margins(60.0, 90.0, 20.0, 50.0);
        let frame = config.frame(700.0).unwrap();

        assert!((frame.core.x0 - 50.0).abs() < 1e-9);
        assert!((frame.core.y0 - 60.0).abs() < 1e-9);
        assert!((frame.core.height() - 140.0).abs() < 1e-9);
        assert!((frame.view.width() - (700.0 + 50.0 + 90.0)).abs() < 1e-9);
        assert!((frame.view.height() - (140.0 + 60.0 + 20.0)).abs() < 1e-9);
    }

    #[test]
    fn validate_flags_bad_options() {
        let bad = ChartConfig::default().with_aspect_ratio(0.0);
        assert_eq!(bad.validate(), Err(ConfigError::InvalidAspectRatio));

        let bad = ChartConfig::default().with_margins(0.0, -1.0, 0.0, 0.0);
        assert_eq!(bad.validate(), Err(ConfigError::InvalidMargin));

        let bad = ChartConfig::default().with_color_scheme(Vec::new());
        assert_eq!(bad.validate(), Err(ConfigError::EmptyColorScheme));
    }
}
