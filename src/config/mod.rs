use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::{
    currency::{ConversionMode, CurrencyCode},
    errors::{BudgetError, Result},
    time::{calendar::start_of_day, Calendar},
    utils::paths::{self, ensure_dir, write_atomic},
};

/// User preferences persisted next to the budget data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub home_currency: CurrencyCode,
    #[serde(default = "Config::default_first_weekday")]
    pub first_weekday: Weekday,
    #[serde(default)]
    pub conversion_mode: ConversionMode,
    #[serde(default)]
    pub trip_goal: GoalDefaults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory CSV exports are written to. Defaults to `<data dir>/exports`.
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_currency: CurrencyCode::default(),
            first_weekday: Self::default_first_weekday(),
            conversion_mode: ConversionMode::default(),
            trip_goal: GoalDefaults::default(),
            export_dir: None,
        }
    }
}

impl Config {
    fn default_first_weekday() -> Weekday {
        Weekday::Mon
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::with_first_weekday(self.first_weekday)
    }
}

/// Values used to seed the trip goal on first launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalDefaults {
    pub target: f64,
    pub current_saved: f64,
    pub deadline: NaiveDate,
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            target: 10_000.0,
            current_saved: 0.0,
            deadline: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl GoalDefaults {
    pub fn deadline_at(&self) -> DateTime<Utc> {
        start_of_day(self.deadline)
    }
}

/// Loads and saves [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            BudgetError::Config(format!("{}: {}", self.path.display(), err))
        })?;
        if config.home_currency.as_str().is_empty() {
            return Err(BudgetError::Config(format!(
                "{}: home currency must not be empty",
                self.path.display()
            )));
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if config.home_currency.as_str().is_empty() {
            return Err(BudgetError::Config("home currency must not be empty".into()));
        }
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
