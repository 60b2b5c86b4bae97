use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Read and parse a JSON file into the requested input type.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Err(format!("input file '{}' not found", path).into());
    }

    let contents =
        fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {}", path, e))?;
    let parsed =
        serde_json::from_str(&contents).map_err(|e| format!("invalid JSON in '{}': {}", path, e))?;
    Ok(parsed)
}
