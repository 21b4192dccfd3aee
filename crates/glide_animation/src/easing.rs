//! Interpolation curves
//!
//! A timer's linear progress is passed through an [`Easing`] before it is
//! reported to listeners, so animators always see the curved fraction.

use serde::{Deserialize, Serialize};

/// Easing functions for timer progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic acceleration from rest
    EaseIn,
    /// Quadratic deceleration to rest
    EaseOut,
    /// Cosine acceleration then deceleration (the timer default)
    #[default]
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
}

impl Easing {
    /// Map linear progress `t` onto the curve; `t` is clamped to `0.0..=1.0`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let rest = 1.0 - t;
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t.powi(2),
            Easing::EaseOut => 1.0 - rest.powi(2),
            Easing::EaseInOut => 0.5 - 0.5 * (t * std::f32::consts::PI).cos(),
            Easing::EaseInCubic => t.powi(3),
            Easing::EaseOutCubic => 1.0 - rest.powi(3),
        }
    }
}
