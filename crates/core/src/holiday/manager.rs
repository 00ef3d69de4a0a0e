//! Owner of the holiday override configuration.
//!
//! Constructed once by the host with a storage backend and handed by
//! reference to whatever needs schedule-type resolution.

use chrono::NaiveDate;
use shuttle_transit::models::{resolve_schedule_type, Override, OverrideSet, ScheduleType};
use tracing::{debug, error, warn};

use super::codec;
use super::defaults::default_override_set;
use crate::error::{ConfigError, Result};
use crate::storage::ConfigStore;

pub const DEFAULT_STORAGE_KEY: &str = "shuttle_holiday_config";

pub struct HolidayManager<S: ConfigStore> {
    store: S,
    storage_key: String,
    overrides: OverrideSet,
    storage_ok: bool,
}

impl<S: ConfigStore> HolidayManager<S> {
    /// Load the persisted configuration from `storage_key`, falling back to the built-in baseline
    pub fn new(store: S, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let (overrides, storage_ok) = match store.load(&storage_key) {
            Ok(Some(json)) => match codec::decode(&json) {
                Ok(overrides) => {
                    debug!(
                        key = %storage_key,
                        year = overrides.year(),
                        adjustments = overrides.len(),
                        "loaded holiday configuration"
                    );
                    (overrides, true)
                }
                Err(e) => {
                    warn!(key = %storage_key, error = %e, "stored holiday configuration is invalid, using defaults");
                    (default_override_set(), true)
                }
            },
            Ok(None) => {
                debug!(key = %storage_key, "no stored holiday configuration, using defaults");
                (default_override_set(), true)
            }
            Err(e) => {
                warn!(key = %storage_key, error = %e, "holiday configuration storage unavailable, using defaults");
                (default_override_set(), false)
            }
        };

        Self {
            store,
            storage_key,
            overrides,
            storage_ok,
        }
    }

    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    /// Read-only view for resolver calls
    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    /// Owned snapshot of the current configuration
    pub fn config(&self) -> OverrideSet {
        self.overrides.clone()
    }

    /// False once a storage read or write has failed; changes then live in memory only
    pub fn storage_available(&self) -> bool {
        self.storage_ok
    }

    pub fn schedule_type(&self, date: NaiveDate) -> ScheduleType {
        resolve_schedule_type(date, &self.overrides)
    }

    /// The override registered for `date`, if any
    pub fn holiday_info(&self, date: NaiveDate) -> Option<&Override> {
        self.overrides.get(date)
    }

    pub fn upsert(&mut self, adjustment: Override) -> Option<Override> {
        let replaced = self.overrides.upsert(adjustment);
        self.persist();
        replaced
    }

    pub fn remove(&mut self, date: NaiveDate) -> Option<Override> {
        let removed = self.overrides.remove(date);
        self.persist();
        removed
    }

    /// Swap in a whole new configuration
    pub fn replace(&mut self, mut overrides: OverrideSet) {
        overrides.touch();
        self.overrides = overrides;
        self.persist();
    }

    /// Replace the configuration with an imported document.
    ///
    /// On error the current configuration is left untouched.
    pub fn import_from(&mut self, json: &str) -> Result<()> {
        let imported = codec::decode(json).inspect_err(|e| {
            warn!(error = %e, "rejected holiday configuration import");
        })?;
        self.replace(imported);
        Ok(())
    }

    pub fn export_to(&self) -> Result<String> {
        codec::encode(&self.overrides)
    }

    pub fn reset_to_default(&mut self) {
        self.overrides = default_override_set();
        self.persist();
    }

    fn persist(&mut self) {
        let result = codec::encode(&self.overrides).and_then(|json| {
            self.store
                .save(&self.storage_key, &json)
                .map_err(ConfigError::from)
        });

        match result {
            Ok(()) => self.storage_ok = true,
            Err(e) => {
                error!(key = %self.storage_key, error = %e, "failed to save holiday configuration");
                self.storage_ok = false;
            }
        }
    }
}
