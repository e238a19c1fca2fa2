use serde_json::Value;
use thiserror::Error;

/// Machine-readable error codes surfaced through the result envelope.
pub mod codes {
    pub const TOOL_NOT_FOUND: &str = "tool_not_found";
    pub const INVALID_ARGUMENTS: &str = "invalid_arguments";
    pub const INVALID_RETURN: &str = "invalid_return";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const NOT_FOUND: &str = "not_found";
}

/// Expected business failure raised by a tool handler.
///
/// The registry converts this into a failed `ToolResult` with the code,
/// message, and details propagated verbatim.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ToolError {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_ARGUMENTS, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(codes::NOT_FOUND, message)
    }
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}
