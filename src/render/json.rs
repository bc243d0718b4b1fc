//! JSON output of page models.

use anyhow::Result;
use serde::Serialize;

/// Pretty-printed JSON of any page model, with a trailing newline.
pub fn render<T: Serialize + ?Sized>(model: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(model)?;
    json.push('\n');
    Ok(json)
}
