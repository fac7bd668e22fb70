//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calendars::Market;
use crate::error::{CoreError, CoreResult};
use crate::types::{MAX_OFFSET_MINUTES, MAX_YEAR, MIN_YEAR};

/// Settings shared by library consumers and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlmanacConfig {
    /// Market whose holiday set is used for business-day queries.
    pub market: Market,

    /// UTC offset, in minutes, for datetimes created from the clock.
    pub display_offset_minutes: i32,

    /// First year holiday listings may be requested for.
    pub first_year: i32,

    /// Last year holiday listings may be requested for.
    pub last_year: i32,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            market: Market::default(),
            display_offset_minutes: 0,
            first_year: 1970,
            last_year: 2100,
        }
    }
}

impl AlmanacConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(content: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CoreError::config(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string.
    pub fn from_json(content: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| CoreError::config(format!("Failed to parse JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, choosing the format by extension.
    ///
    /// Files ending in `.json` are read as JSON; everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> CoreResult<String> {
        toml::to_string(self).map_err(|e| CoreError::config(e.to_string()))
    }

    /// Checks the offset and the year window.
    pub fn validate(&self) -> CoreResult<()> {
        if self.display_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(CoreError::InvalidOffset {
                minutes: self.display_offset_minutes as i64,
            });
        }
        for year in [self.first_year, self.last_year] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(CoreError::config(format!(
                    "year {year} outside {MIN_YEAR}..={MAX_YEAR}"
                )));
            }
        }
        if self.first_year > self.last_year {
            return Err(CoreError::config(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }
        Ok(())
    }

    /// Returns an error unless `year` lies in the configured window.
    pub fn check_year(&self, year: i32) -> CoreResult<()> {
        if (self.first_year..=self.last_year).contains(&year) {
            Ok(())
        } else {
            Err(CoreError::out_of_range(format!(
                "year {year} outside configured window {}..={}",
                self.first_year, self.last_year
            )))
        }
    }
}
