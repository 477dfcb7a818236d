//! Keep an existing YAML config in step with the current `Config` fields.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys present in `defaults` but missing from `current`, in declaration order.
fn missing_keys(current: &Mapping, defaults: &Mapping) -> Vec<Value> {
    defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .cloned()
        .collect()
}

/// Add every missing field, with its default value, to the config file at
/// `path`. Existing values are never touched.
///
/// Returns the names of the keys that were added (empty when the file was
/// already complete or does not exist).
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let mut yaml: Value = serde_yaml::from_str(&content)?;
    let map = yaml
        .as_mapping_mut()
        .ok_or_else(|| AppError::Config(format!("{:?} is not a YAML mapping", path)))?;

    let defaults = serde_yaml::to_value(Config::default())?;
    let defaults = defaults
        .as_mapping()
        .ok_or_else(|| AppError::Other("default config is not a mapping".into()))?;

    let missing = missing_keys(map, defaults);
    if missing.is_empty() {
        return Ok(Vec::new());
    }

    let mut added = Vec::new();
    for key in missing {
        if let Some(value) = defaults.get(&key) {
            map.insert(key.clone(), value.clone());
        }
        if let Some(name) = key.as_str() {
            added.push(name.to_string());
        }
    }

    fs::write(path, serde_yaml::to_string(&yaml)?)?;
    Ok(added)
}
