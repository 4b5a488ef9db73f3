//! Per-question countdown state and its presentation color ramp.
//!
//! This is pure state: the once-per-second drive lives with whoever owns the
//! event loop. `tick()` saturates at zero, so a late tick after expiry can
//! never push the remaining time negative.

use std::fmt;

const GREEN: Rgb = Rgb {
    r: 40,
    g: 167,
    b: 69,
};
const ORANGE: Rgb = Rgb {
    r: 255,
    g: 165,
    b: 0,
};
const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

/// An sRGB color for the timer display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting; carries the remaining whole seconds.
    Running(u32),
    /// The budget is exhausted. The driver must stop ticking and advance.
    Expired,
}

/// Remaining-time state for the active question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    budget_secs: u32,
    remaining_secs: u32,
}

impl Countdown {
    /// Start a fresh countdown at the full budget.
    #[must_use]
    pub fn new(budget_secs: u32) -> Self {
        Self {
            budget_secs,
            remaining_secs: budget_secs,
        }
    }

    #[must_use]
    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Consume one second of budget.
    ///
    /// Reports `Expired` on the tick that reaches zero and on any tick after;
    /// the remaining time never goes negative.
    pub fn tick(&mut self) -> TickOutcome {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.remaining_secs)
        }
    }

    /// Elapsed fraction of the budget: 0.0 at full time, 1.0 at timeout.
    #[must_use]
    pub fn elapsed_fraction(&self) -> f64 {
        if self.budget_secs == 0 {
            return 1.0;
        }
        let t = 1.0 - f64::from(self.remaining_secs) / f64::from(self.budget_secs);
        t.clamp(0.0, 1.0)
    }

    /// Current display color along the green → orange → red ramp.
    #[must_use]
    pub fn color(&self) -> Rgb {
        interpolate(self.elapsed_fraction())
    }
}

/// Color at elapsed fraction `t` in `[0, 1]`.
///
/// The first half of the budget fades green to orange, the second half orange
/// to red. Each channel rounds to the nearest integer independently.
#[must_use]
pub fn interpolate(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        blend(GREEN, ORANGE, t / 0.5)
    } else {
        blend(ORANGE, RED, (t - 0.5) / 0.5)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(from: Rgb, to: Rgb, tt: f64) -> Rgb {
    let channel = |a: u8, b: u8| -> u8 {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * tt).round() as u8
    };
    Rgb {
        r: channel(from.r, to.r),
        g: channel(from.g, to.g),
        b: channel(from.b, to.b),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints_and_midpoint() {
        assert_eq!(interpolate(0.0), GREEN);
        assert_eq!(interpolate(0.5), ORANGE);
        assert_eq!(interpolate(1.0), RED);
    }

    #[test]
    fn ramp_clamps_out_of_range_input() {
        assert_eq!(interpolate(-0.5), GREEN);
        assert_eq!(interpolate(1.5), RED);
    }

    #[test]
    fn channels_round_independently() {
        // Quarter through: halfway between green and orange per channel.
        let quarter = interpolate(0.25);
        assert_eq!(quarter, Rgb { r: 148, g: 166, b: 35 });
    }

    #[test]
    fn tick_expires_at_zero_and_saturates() {
        let mut countdown = Countdown::new(2);
        assert_eq!(countdown.tick(), TickOutcome::Running(1));
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert!(countdown.is_expired());
        // A stray late tick stays expired, never negative.
        assert_eq!(countdown.tick(), TickOutcome::Expired);
        assert_eq!(countdown.remaining_secs(), 0);
    }

    #[test]
    fn elapsed_fraction_tracks_ticks() {
        let mut countdown = Countdown::new(4);
        assert!((countdown.elapsed_fraction() - 0.0).abs() < f64::EPSILON);
        countdown.tick();
        assert!((countdown.elapsed_fraction() - 0.25).abs() < f64::EPSILON);
        countdown.tick();
        assert_eq!(countdown.color(), ORANGE);
    }

    #[test]
    fn color_starts_green_and_ends_red() {
        let mut countdown = Countdown::new(2);
        assert_eq!(countdown.color(), GREEN);
        countdown.tick();
        countdown.tick();
        assert_eq!(countdown.color(), RED);
    }

    #[test]
    fn display_renders_css_rgb() {
        assert_eq!(GREEN.to_string(), "rgb(40, 167, 69)");
    }
}
