//! Scheduled trigger evaluation
//!
//! Decides, once per coarse host tick, whether a scheduled capture fires.
//! The evaluation cadence itself belongs to the host loop; this is a pure
//! decision function over the in-world hour.

use serde::{Deserialize, Serialize};

use crate::clock::hours_passed;
use crate::config::CaptureConfig;

/// `last_fired_hour` value of a schedule that has never fired
pub const UNFIRED_HOUR: i64 = -999;

fn default_last_fired_hour() -> i64 {
    UNFIRED_HOUR
}

/// Per-surface trigger timing state, persisted across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleState {
    /// Last in-world hour a scheduled evaluation passed the gate
    #[serde(default = "default_last_fired_hour")]
    pub last_fired_hour: i64,
    /// Number of scheduled captures so far, used for numbered filenames
    #[serde(default)]
    pub fired_count: u64,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            last_fired_hour: UNFIRED_HOUR,
            fired_count: 0,
        }
    }
}

/// A positive scheduling decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireDecision {
    /// The in-world hour the decision fired for
    pub hour: i64,
    /// Capture counter after this decision
    pub counter: u64,
    /// Always false on the scheduled path; manual triggers bypass evaluate
    pub manually_triggered: bool,
}

impl ScheduleState {
    /// Evaluate whether a scheduled capture should fire now
    ///
    /// Fires when the local in-world hour strictly exceeds the last fired
    /// hour and lands on the configured time-of-day phase. Timing state
    /// advances even while captures are disabled, so re-enabling does not
    /// back-fire a capture for an hour that already passed.
    pub fn evaluate(
        &mut self,
        ticks: i64,
        longitude: f32,
        config: &CaptureConfig,
    ) -> Option<FireDecision> {
        let hour = hours_passed(ticks, longitude);
        if hour <= self.last_fired_hour {
            return None;
        }
        if hour % config.interval != config.time_of_day % config.interval {
            return None;
        }

        self.last_fired_hour = hour;
        self.fired_count += 1;

        if !config.enabled {
            return None;
        }

        Some(FireDecision {
            hour,
            counter: self.fired_count,
            manually_triggered: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TICKS_PER_HOUR;

    fn config(interval: i64, time_of_day: i64) -> CaptureConfig {
        CaptureConfig::default()
            .with_interval(interval)
            .with_time_of_day(time_of_day)
    }

    fn ticks_at_hour(hour: i64) -> i64 {
        hour * TICKS_PER_HOUR
    }

    #[test]
    fn test_fires_only_on_phase_aligned_hours() {
        let config = config(24, 8);
        let mut state = ScheduleState::default();

        let mut fired = Vec::new();
        for hour in [7, 8, 9, 32] {
            if let Some(decision) = state.evaluate(ticks_at_hour(hour), 0.0, &config) {
                fired.push((decision.hour, decision.counter));
            }
        }

        assert_eq!(fired, vec![(8, 1), (32, 2)]);
        assert_eq!(state.last_fired_hour, 32);
        assert_eq!(state.fired_count, 2);
    }

    #[test]
    fn test_never_fires_twice_for_same_hour() {
        let config = config(1, 0);
        let mut state = ScheduleState::default();

        assert!(state.evaluate(ticks_at_hour(5), 0.0, &config).is_some());
        // Several host ticks within the same in-world hour
        assert!(state.evaluate(ticks_at_hour(5) + 100, 0.0, &config).is_none());
        assert!(state.evaluate(ticks_at_hour(5) + 2000, 0.0, &config).is_none());
        assert!(state.evaluate(ticks_at_hour(6), 0.0, &config).is_some());
    }

    #[test]
    fn test_phase_alignment_across_intervals() {
        let config = config(6, 2);
        let mut state = ScheduleState::default();

        let mut fired = Vec::new();
        for hour in 0..26 {
            if state.evaluate(ticks_at_hour(hour), 0.0, &config).is_some() {
                fired.push(hour);
            }
        }

        // h mod 6 == 2 mod 6
        assert_eq!(fired, vec![2, 8, 14, 20]);
    }

    #[test]
    fn test_timing_advances_while_disabled() {
        let config = config(24, 8).with_enabled(false);
        let mut state = ScheduleState::default();

        assert!(state.evaluate(ticks_at_hour(8), 0.0, &config).is_none());
        // The gate passed, so timing state moved even without a fire
        assert_eq!(state.last_fired_hour, 8);
        assert_eq!(state.fired_count, 1);

        // Re-enabling must not back-fire hour 8
        let enabled = config.with_enabled(true);
        let mut enabled_state = state;
        assert!(enabled_state
            .evaluate(ticks_at_hour(8) + 1, 0.0, &enabled)
            .is_none());
        assert!(enabled_state
            .evaluate(ticks_at_hour(32), 0.0, &enabled)
            .is_some());
    }

    #[test]
    fn test_longitude_shifts_fire_time() {
        let config = config(24, 8);
        let mut state = ScheduleState::default();

        // Half way around the world, local time is 12 hours ahead: absolute
        // hour 8 is local hour 20, which misses the phase.
        assert!(state.evaluate(ticks_at_hour(8), 180.0, &config).is_none());
        // Absolute hour 20 is local hour 32, which hits it.
        assert!(state.evaluate(ticks_at_hour(20), 180.0, &config).is_some());
    }

    #[test]
    fn test_decision_is_never_manual() {
        let config = config(1, 0);
        let mut state = ScheduleState::default();
        let decision = state.evaluate(ticks_at_hour(1), 0.0, &config).unwrap();
        assert!(!decision.manually_triggered);
    }
}
