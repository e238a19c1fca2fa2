use serde_json::{Map, Value};

use mockline_core::ToolError;

/// Pull a required string argument, failing with `invalid_arguments`.
pub(crate) fn require_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::invalid_arguments(format!("{key} is required")))
}
