use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ForecastError, Result};
use crate::ledger::DUE_SOON_WINDOW_DAYS;

const HOME_ENV: &str = "CASHFLOW_HOME";
const APP_DIR_NAME: &str = "cashflow_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Largest accepted due-soon window, in days.
pub const MAX_DUE_SOON_DAYS: i64 = 3650;

/// User-tunable defaults for forecast requests and CLI output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastConfig {
    #[serde(default = "ForecastConfig::default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "ForecastConfig::default_lookback_months")]
    pub lookback_months: u32,
    #[serde(default = "ForecastConfig::default_due_soon_days")]
    pub due_soon_days: i64,
    #[serde(default = "ForecastConfig::default_color_output")]
    pub color_output: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon_days: Self::default_horizon_days(),
            lookback_months: Self::default_lookback_months(),
            due_soon_days: Self::default_due_soon_days(),
            color_output: Self::default_color_output(),
        }
    }
}

impl ForecastConfig {
    pub fn default_horizon_days() -> u32 {
        30
    }

    pub fn default_lookback_months() -> u32 {
        6
    }

    pub fn default_due_soon_days() -> i64 {
        DUE_SOON_WINDOW_DAYS
    }

    pub fn default_color_output() -> bool {
        true
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_DUE_SOON_DAYS).contains(&self.due_soon_days) {
            return Err(ForecastError::Config(format!(
                "dueSoonDays must be between 0 and {MAX_DUE_SOON_DAYS}, got {}",
                self.due_soon_days
            )));
        }
        Ok(())
    }
}

/// Returns the application data directory: `$CASHFLOW_HOME` when set, otherwise
/// `<platform config dir>/cashflow_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Loads and saves [`ForecastConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<ForecastConfig> {
        if !self.path.exists() {
            return Ok(ForecastConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ForecastConfig = serde_json::from_str(&data)
            .map_err(|err| ForecastError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        info!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save(&self, config: &ForecastConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "saved configuration");
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
