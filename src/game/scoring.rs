use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a variant turns eaten food and survival time into points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ScoringRule {
    /// `base * factor * (speed% / 10 + 1)` per food, so faster play pays more
    SpeedWeighted { base: u32, factor: f64 },
    /// A timer counts down every tick. Food is worth the whole seconds left
    /// on it, and then tops it up by `bonus_secs`.
    Countdown { start_secs: f64, bonus_secs: f64 },
    /// Fixed points per food plus a trickle per survived second
    Flat { per_food: u32, per_second: u32 },
    None,
}

impl ScoringRule {
    /// Points for eating one food.
    ///
    /// `countdown` is the timer value in seconds; only `Countdown` reads it.
    pub fn food_points(&self, speed_percent: u32, countdown: f64) -> u32 {
        match *self {
            ScoringRule::SpeedWeighted { base, factor } => {
                (base as f64 * factor * (speed_percent as f64 / 10.0 + 1.0)) as u32
            }
            // a timer that already ran out is worth nothing
            ScoringRule::Countdown { .. } => countdown.max(0.0) as u32,
            ScoringRule::Flat { per_food, .. } => per_food,
            ScoringRule::None => 0,
        }
    }

    /// Points for crossing into a new whole second of play
    pub fn second_points(&self) -> u32 {
        match *self {
            ScoringRule::Flat { per_second, .. } => per_second,
            _ => 0,
        }
    }

    pub fn countdown_start(&self) -> f64 {
        match *self {
            ScoringRule::Countdown { start_secs, .. } => start_secs,
            _ => 0.0,
        }
    }

    pub fn countdown_bonus(&self) -> f64 {
        match *self {
            ScoringRule::Countdown { bonus_secs, .. } => bonus_secs,
            _ => 0.0,
        }
    }

    pub fn is_countdown(&self) -> bool {
        matches!(self, ScoringRule::Countdown { .. })
    }
}

/// Periodic speed increase: every `interval_secs` of play the tick period
/// shrinks by `step_ms`, never below `min_period_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedUp {
    pub interval_secs: u64,
    pub step_ms: u64,
    pub min_period_ms: u64,
}

impl SpeedUp {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// The period after one speed-up step
    pub fn next_period(&self, period: Duration) -> Duration {
        let min = Duration::from_millis(self.min_period_ms);
        if period <= min {
            return period;
        }
        period
            .saturating_sub(Duration::from_millis(self.step_ms))
            .max(min)
    }

    /// Progress from the start period (0%) to the fastest period (100%)
    pub fn speed_percent(&self, start: Duration, period: Duration) -> u32 {
        let start_ms = start.as_millis() as u64;
        if start_ms <= self.min_period_ms {
            return 100;
        }
        let gained = start_ms.saturating_sub(period.as_millis() as u64);
        (gained * 100 / (start_ms - self.min_period_ms)).min(100) as u32
    }
}
