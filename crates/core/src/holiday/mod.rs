//! Holiday override configuration: baseline table, codec and manager.

pub mod codec;
pub mod defaults;
pub mod manager;

pub use defaults::{default_override_set, DEFAULT_YEAR};
pub use manager::{HolidayManager, DEFAULT_STORAGE_KEY};
