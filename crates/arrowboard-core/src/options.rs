//! Arrow style options.

use crate::arrow::ArrowColor;
use serde::{Deserialize, Serialize};

/// Style configuration for rendered arrows.
///
/// All lengths are expressed as divisors of the square width, so the same
/// options work for any board size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowOptions {
    /// Color used for arrows that carry none.
    pub default_color: ArrowColor,
    /// How far arrows stop short of the target center (`square / n`).
    pub arrow_length_reducer_denominator: f64,
    /// Like `arrow_length_reducer_denominator`, applied when arrows from
    /// different squares converge on one target.
    pub same_target_arrow_length_reducer_denominator: f64,
    /// Stroke width as `square / n`.
    pub arrow_width_denominator: f64,
    /// Stroke width multiplier for the arrow being drawn.
    pub active_arrow_width_multiplier: f64,
    /// Opacity of committed arrows.
    pub opacity: f64,
    /// Opacity of the arrow being drawn.
    pub active_opacity: f64,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        Self {
            default_color: ArrowColor::new("green"),
            arrow_length_reducer_denominator: 8.0,
            same_target_arrow_length_reducer_denominator: 4.0,
            arrow_width_denominator: 5.0,
            active_arrow_width_multiplier: 0.9,
            opacity: 0.65,
            active_opacity: 0.5,
        }
    }
}

impl ArrowOptions {
    /// Replace unusable values with their defaults.
    ///
    /// Denominators must be finite and positive; opacities are clamped to
    /// `0.0..=1.0`.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let denominator = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!("Ignoring invalid arrow denominator {}, using {}", value, fallback);
                fallback
            }
        };
        let unit = |value: f64, fallback: f64| {
            if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };

        Self {
            default_color: self.default_color.clone(),
            arrow_length_reducer_denominator: denominator(
                self.arrow_length_reducer_denominator,
                defaults.arrow_length_reducer_denominator,
            ),
            same_target_arrow_length_reducer_denominator: denominator(
                self.same_target_arrow_length_reducer_denominator,
                defaults.same_target_arrow_length_reducer_denominator,
            ),
            arrow_width_denominator: denominator(
                self.arrow_width_denominator,
                defaults.arrow_width_denominator,
            ),
            active_arrow_width_multiplier: if self.active_arrow_width_multiplier.is_finite()
                && self.active_arrow_width_multiplier >= 0.0
            {
                self.active_arrow_width_multiplier
            } else {
                defaults.active_arrow_width_multiplier
            },
            opacity: unit(self.opacity, defaults.opacity),
            active_opacity: unit(self.active_opacity, defaults.active_opacity),
        }
    }
}
