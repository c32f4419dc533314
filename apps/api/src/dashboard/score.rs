//! Score ring: count-up animation and SVG geometry.

use std::time::Duration;

pub const ANIMATION_DURATION: Duration = Duration::from_millis(1000);
pub const RING_RADIUS: f64 = 40.0;

/// Counts a displayed score up from 0 to `target`.
///
/// The shown value is `min(target, floor(progress * target))` while the
/// animation runs and exactly `target` once it is over, so it never
/// overshoots and always lands on the returned value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAnimation {
    target: f64,
    duration: Duration,
}

impl ScoreAnimation {
    pub fn new(target: f64) -> Self {
        Self::with_duration(target, ANIMATION_DURATION)
    }

    pub fn with_duration(target: f64, duration: Duration) -> Self {
        Self { target, duration }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.duration {
            return self.target;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (progress * self.target).floor().min(self.target).max(0.0)
    }

    /// Samples the animation at `steps + 1` evenly spaced points, end included.
    pub fn frames(&self, steps: u32) -> Vec<(f64, f64)> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let fraction = f64::from(i) / f64::from(steps);
                let elapsed = self.duration.mul_f64(fraction);
                (fraction, self.value_at(elapsed))
            })
            .collect()
    }
}

pub fn circumference() -> f64 {
    2.0 * std::f64::consts::PI * RING_RADIUS
}

/// Stroke offset for a ring filled to `value` percent. The ring itself
/// cannot be more than full or less than empty.
pub fn dash_offset(value: f64) -> f64 {
    let fill = value.clamp(0.0, 100.0) / 100.0;
    circumference() - fill * circumference()
}

/// Score text as shown in the ring. Whole numbers print without a decimal
/// point, anything else prints exactly as returned.
pub fn format_score(value: f64) -> String {
    format!("{value}")
}
