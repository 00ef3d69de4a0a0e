//! JSON form of the override configuration.
//!
//! The same document is used for the persisted slot and for user
//! import/export, so an exported file can be imported unchanged.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shuttle_transit::models::{Override, OverrideSet};

use crate::error::{ConfigError, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HolidayConfigRecord {
    year: i32,
    adjustments: Vec<Override>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<DateTime<Utc>>,
}

/// Parse and validate a configuration document.
///
/// Keeps the document's `lastUpdated` when present. Any structural problem
/// rejects the whole document.
pub fn decode(json: &str) -> Result<OverrideSet> {
    let record: HolidayConfigRecord =
        serde_json::from_str(json).map_err(|e| ConfigError::Validation(e.to_string()))?;

    if record.year == 0 {
        return Err(ConfigError::Validation("year must be set".into()));
    }

    let mut seen = HashSet::new();
    for adjustment in &record.adjustments {
        if adjustment.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "adjustment on {} has an empty name",
                adjustment.date
            )));
        }
        if !seen.insert(adjustment.date) {
            return Err(ConfigError::Validation(format!(
                "more than one adjustment on {}",
                adjustment.date
            )));
        }
    }

    Ok(OverrideSet::from_adjustments(
        record.year,
        record.adjustments,
        record.last_updated.unwrap_or_else(Utc::now),
    ))
}

/// Serialize to the pretty-printed document accepted by [`decode`]
pub fn encode(overrides: &OverrideSet) -> Result<String> {
    let record = HolidayConfigRecord {
        year: overrides.year(),
        adjustments: overrides.adjustments().to_vec(),
        last_updated: Some(overrides.last_modified()),
    };
    Ok(serde_json::to_string_pretty(&record)?)
}
