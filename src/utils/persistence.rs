use std::{fs, path::Path};

use serde::Serialize;

use crate::config::{tmp_path, write_atomic};
use crate::errors::Result;
use crate::ledger::ForecastInput;

/// Loads a forecast dataset from a JSON file.
pub fn load_input_from_file(path: &Path) -> Result<ForecastInput> {
    let data = fs::read_to_string(path)?;
    ForecastInput::from_json(&data)
}

/// Writes any serializable report to disk atomically by staging to a temporary file.
pub fn save_report_to_file<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
