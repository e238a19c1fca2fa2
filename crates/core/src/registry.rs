use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::context::ToolContext;
use crate::envelope::ToolResult;
use crate::error::{codes, RegistryError, ToolError};

/// Tool handler: validates its arguments, reads/mutates session state, and
/// either returns an envelope or fails with a tagged `ToolError`.
pub type ToolFn =
    Arc<dyn Fn(&Map<String, Value>, &ToolContext) -> Result<ToolResult, ToolError> + Send + Sync>;

/// Name → handler mapping with a single `call` entry point.
///
/// `call` normalizes every outcome into a `ToolResult`: it never panics and
/// never lets a handler failure escape, regardless of what the handler does.
pub struct ToolRegistry {
    tools: HashMap<String, ToolFn>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a handler under a fully qualified name (e.g.
    /// `contacts.search`). Names are single-registration.
    pub fn register_tool(
        &mut self,
        name: &str,
        handler: impl Fn(&Map<String, Value>, &ToolContext) -> Result<ToolResult, ToolError>
            + Send
            + Sync
            + 'static,
    ) -> Result<(), RegistryError> {
        if self.tools.contains_key(name) {
            return Err(RegistryError::DuplicateTool(name.to_string()));
        }
        self.tools.insert(name.to_string(), Arc::new(handler));
        Ok(())
    }

    /// Registered tool names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Invoke a tool by name with uniform failure handling.
    ///
    /// Failure conditions, each short-circuiting before the handler runs:
    /// unknown name → `tool_not_found`; `args` not a JSON object →
    /// `invalid_arguments`. Handler outcomes: a `ToolError` is propagated
    /// verbatim as `{code, message, details}`; a panic becomes
    /// `internal_error`; a malformed envelope becomes `invalid_return`.
    pub fn call(&self, tool_name: &str, args: &Value, ctx: &ToolContext) -> ToolResult {
        let Some(handler) = self.tools.get(tool_name) else {
            warn!(tool = tool_name, "tool not found");
            return ToolResult::failure(
                codes::TOOL_NOT_FOUND,
                format!("Tool '{tool_name}' not found"),
            );
        };

        let Some(args) = args.as_object() else {
            return ToolResult::failure(codes::INVALID_ARGUMENTS, "args must be an object");
        };

        debug!(
            tool = tool_name,
            session = ctx.session(),
            trace_id = %ctx.trace_id,
            "dispatching tool"
        );

        let handler = Arc::clone(handler);
        match catch_unwind(AssertUnwindSafe(|| handler(args, ctx))) {
            Ok(Ok(result)) => {
                if result.is_well_formed() {
                    result
                } else {
                    warn!(tool = tool_name, "tool returned a malformed envelope");
                    ToolResult::failure(codes::INVALID_RETURN, "Tool did not return a well-formed result")
                }
            }
            Ok(Err(err)) => {
                debug!(tool = tool_name, code = %err.code, "tool failed: {err}");
                ToolResult::from(err)
            }
            Err(panic) => {
                let message = panic_message(panic);
                warn!(tool = tool_name, "tool handler panicked: {message}");
                ToolResult::failure(codes::INTERNAL_ERROR, message)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool handler panicked".to_string()
    }
}
