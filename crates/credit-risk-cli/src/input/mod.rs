pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve the standard input sources in priority order: an explicit
/// `--input` file first, then piped stdin. Returns `None` when neither is
/// present so the caller can fall back to individual flags.
pub fn from_file_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    if let Some(data) = stdin::read_piped()? {
        let parsed = serde_json::from_value(data).map_err(|e| format!("invalid input: {}", e))?;
        return Ok(Some(parsed));
    }
    Ok(None)
}
