//! In-world calendar arithmetic
//!
//! The simulation advances in ticks; captures are scheduled against the
//! coarser in-world hour. Local time shifts with longitude, so two surfaces
//! on opposite sides of the world hit the same time-of-day at different
//! absolute ticks.

use serde::{Deserialize, Serialize};

/// Simulation ticks per in-world hour
pub const TICKS_PER_HOUR: i64 = 2500;
/// Hours per in-world day
pub const HOURS_PER_DAY: i64 = 24;
/// Simulation ticks per in-world day
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * HOURS_PER_DAY;
/// Days per season (quarter of the year)
pub const DAYS_PER_SEASON: i64 = 15;
/// Seasons per in-world year
pub const SEASONS_PER_YEAR: i64 = 4;
/// Days per in-world year
pub const DAYS_PER_YEAR: i64 = DAYS_PER_SEASON * SEASONS_PER_YEAR;

fn longitude_tick_offset(longitude: f32) -> i64 {
    (longitude / 360.0 * TICKS_PER_DAY as f32) as i64
}

/// Absolute ticks shifted into local time for the given longitude
pub fn local_ticks(ticks: i64, longitude: f32) -> i64 {
    ticks + longitude_tick_offset(longitude)
}

/// Whole in-world hours elapsed at the given longitude
///
/// This is the coarse time unit the trigger scheduler fires on.
pub fn hours_passed(ticks: i64, longitude: f32) -> i64 {
    local_ticks(ticks, longitude) / TICKS_PER_HOUR
}

/// A point on the in-world calendar, local to one longitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDate {
    /// Year, counted from the start of the simulation
    pub year: i64,
    /// Season within the year, 0-based
    pub season: i64,
    /// Day within the season, 1-based
    pub day: i64,
    /// Hour of the day, 0-23
    pub hour: i64,
}

impl WorldDate {
    /// Resolve the local date for an absolute tick count and longitude
    pub fn at(ticks: i64, longitude: f32) -> Self {
        let local = local_ticks(ticks, longitude);
        let days = local / TICKS_PER_DAY;
        Self {
            year: days / DAYS_PER_YEAR,
            season: (days % DAYS_PER_YEAR) / DAYS_PER_SEASON,
            day: days % DAYS_PER_SEASON + 1,
            hour: (local % TICKS_PER_DAY) / TICKS_PER_HOUR,
        }
    }
}

impl std::fmt::Display for WorldDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{:02}-{:02}",
            self.year, self.season, self.day, self.hour
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_passed_at_zero_longitude() {
        assert_eq!(hours_passed(0, 0.0), 0);
        assert_eq!(hours_passed(TICKS_PER_HOUR - 1, 0.0), 0);
        assert_eq!(hours_passed(TICKS_PER_HOUR, 0.0), 1);
        assert_eq!(hours_passed(TICKS_PER_DAY, 0.0), 24);
    }

    #[test]
    fn test_longitude_shifts_local_time() {
        // Half way around the world is half a day ahead
        assert_eq!(hours_passed(0, 180.0), 12);
        assert_eq!(hours_passed(TICKS_PER_HOUR * 6, 180.0), 18);
    }

    #[test]
    fn test_date_components() {
        // Day 0, hour 8
        let date = WorldDate::at(TICKS_PER_HOUR * 8, 0.0);
        assert_eq!(date.year, 0);
        assert_eq!(date.season, 0);
        assert_eq!(date.day, 1);
        assert_eq!(date.hour, 8);

        // First day of the second season
        let date = WorldDate::at(TICKS_PER_DAY * DAYS_PER_SEASON, 0.0);
        assert_eq!(date.season, 1);
        assert_eq!(date.day, 1);

        // Last day of the year, hour 23
        let ticks = TICKS_PER_DAY * (DAYS_PER_YEAR - 1) + TICKS_PER_HOUR * 23;
        let date = WorldDate::at(ticks, 0.0);
        assert_eq!(date.year, 0);
        assert_eq!(date.season, 3);
        assert_eq!(date.day, 15);
        assert_eq!(date.hour, 23);

        // Rollover into the next year
        let date = WorldDate::at(TICKS_PER_DAY * DAYS_PER_YEAR, 0.0);
        assert_eq!(date.year, 1);
        assert_eq!(date.season, 0);
        assert_eq!(date.day, 1);
    }

    #[test]
    fn test_display_zero_pads_day_and_hour() {
        let date = WorldDate {
            year: 2,
            season: 1,
            day: 3,
            hour: 7,
        };
        assert_eq!(date.to_string(), "2-1-03-07");
    }
}
