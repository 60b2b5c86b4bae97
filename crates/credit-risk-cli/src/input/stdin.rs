use std::io::Read;

use serde_json::Value;

/// Read JSON from stdin when data is piped in.
///
/// Returns `None` on an interactive terminal so commands never hang waiting
/// for input that is not coming.
pub fn read_piped() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(trimmed).map_err(|e| format!("invalid JSON on stdin: {}", e))?;
    Ok(Some(value))
}
