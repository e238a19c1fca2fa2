use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ToolError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

/// Uniform envelope returned by every tool call.
///
/// A well-formed envelope carries `error` exactly when `ok` is false; the
/// registry rejects anything else as `invalid_return`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub ok: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorInfo>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl ToolResult {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            meta: Map::new(),
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorInfo {
                code: code.into(),
                message: message.into(),
                details: None,
            }),
            meta: Map::new(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        if self.ok {
            self.error.is_none()
        } else {
            self.error.is_some()
        }
    }

    /// Canonical serializable shape for logging or transport. Absent fields
    /// are explicit nulls.
    pub fn to_value(&self) -> Value {
        json!({
            "ok": self.ok,
            "data": &self.data,
            "error": &self.error,
            "meta": &self.meta,
        })
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorInfo {
                code: err.code,
                message: err.message,
                details: err.details,
            }),
            meta: Map::new(),
        }
    }
}
