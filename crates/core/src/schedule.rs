//! The schedule table shipped with the crate.

use shuttle_transit::provider::StaticScheduleProvider;
use shuttle_transit::ScheduleProvider;
use tracing::debug;

const BUNDLED_TABLE: &str = include_str!("../data/schedule.json");

/// Load and validate the bundled weekday/holiday tables
pub fn bundled_schedule() -> shuttle_transit::Result<StaticScheduleProvider> {
    let provider = StaticScheduleProvider::from_json(BUNDLED_TABLE)?;
    debug!(version = provider.version(), "loaded bundled schedule");
    Ok(provider)
}
