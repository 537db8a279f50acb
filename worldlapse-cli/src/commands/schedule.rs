//! Schedule command - preview upcoming scheduled capture hours

use anyhow::Result;
use clap::Args;

use worldlapse_core::clock::{HOURS_PER_DAY, TICKS_PER_HOUR};
use worldlapse_core::config::ConfigFile;
use worldlapse_core::ScheduleState;

/// Arguments for the schedule command
#[derive(Args)]
pub struct ScheduleArgs {
    /// How many in-world hours to look ahead
    #[arg(long, default_value_t = 72)]
    pub hours: i64,
}

/// Show which in-world hours the configured schedule would fire on
pub async fn schedule(args: ScheduleArgs) -> Result<()> {
    let config = ConfigFile::load_or_default().to_capture_config();

    println!(
        "Schedule: every {} hour(s), aligned to {:02}:00{}",
        config.interval,
        config.time_of_day % HOURS_PER_DAY,
        if config.enabled { "" } else { " (disabled)" }
    );
    println!();

    let mut state = ScheduleState::default();
    let mut fired = Vec::new();
    for hour in 0..args.hours {
        if state
            .evaluate(hour * TICKS_PER_HOUR, 0.0, &config)
            .is_some()
        {
            fired.push(hour);
        }
    }

    if fired.is_empty() {
        println!("No captures within the next {} hour(s).", args.hours);
        return Ok(());
    }

    println!("Capture hours within the next {} hour(s):", args.hours);
    for hour in fired {
        println!(
            "  day {:>3}, {:02}:00",
            hour / HOURS_PER_DAY + 1,
            hour % HOURS_PER_DAY
        );
    }

    Ok(())
}
