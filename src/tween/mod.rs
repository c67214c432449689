mod types;
pub use types::*;

use serde::Serialize;

/// Easing curves a renderer applies inside a tween interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    EaseInQuad,
    EaseOutQuad,
    EaseInOutCubic,
}

impl Easing {
    /// Maps normalized progress `t` in [0, 1] through the curve.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
                }
            }
        }
    }
}

/// How a single coordinate of a line moves over the transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TweenParams {
    Fixed {
        value: f64,
    },
    Interpolated {
        extremes: [f64; 2],
        interval: [f64; 2],
        ease: Easing,
    },
}

impl TweenParams {
    pub fn fixed(value: f64) -> Self {
        TweenParams::Fixed { value }
    }

    /// Value of the coordinate at `progress` in [0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// use codeshift::tween::{Easing, TweenParams};
    ///
    /// let slide = TweenParams::Interpolated {
    ///     extremes: [1.0, 0.0],
    ///     interval: [0.5, 1.0],
    ///     ease: Easing::EaseOutQuad,
    /// };
    /// assert_eq!(slide.sample(0.25), 1.0);
    /// assert_eq!(slide.sample(0.75), 0.25);
    /// assert_eq!(slide.sample(1.0), 0.0);
    /// ```
    pub fn sample(&self, progress: f64) -> f64 {
        match *self {
            TweenParams::Fixed { value } => value,
            TweenParams::Interpolated {
                extremes: [from, to],
                interval: [start, end],
                ease,
            } => {
                if progress <= start {
                    return if progress < start || end > start { from } else { to };
                }
                if progress >= end {
                    return to;
                }
                let x = (progress - start) / (end - start);
                from + ease.apply(x) * (to - from)
            }
        }
    }
}

/// Carves the `index`-th of `count` equal, disjoint slices out of `interval`.
pub fn stagger(interval: [f64; 2], index: usize, count: usize) -> [f64; 2] {
    let [start, end] = interval;
    if count == 0 {
        return interval;
    }
    let width = (end - start) / count as f64;
    [
        start + index as f64 * width,
        start + (index + 1) as f64 * width,
    ]
}

/// Progress sub-interval reserved for vertical repositioning.
///
/// Only the presence of entering and exiting lines matters, not their number.
pub fn vertical_interval(enter_count: usize, exit_count: usize) -> [f64; 2] {
    match (enter_count > 0, exit_count > 0) {
        (false, false) => [0.0, 1.0],
        (false, true) => [0.33, 1.0],
        (true, false) => [0.0, 0.67],
        (true, true) => [0.25, 0.75],
    }
}
