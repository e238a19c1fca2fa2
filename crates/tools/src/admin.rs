use serde_json::{json, Map, Value};

use mockline_core::{
    MessageStatus, RegistryError, ToolContext, ToolError, ToolRegistry, ToolResult,
};
use tracing::info;

use crate::args::require_str;

pub fn register_admin_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register_tool("admin.reset", reset_state)?;
    registry.register_tool("admin.set_delivery", set_delivery)?;
    registry.register_tool("admin.set_rule", set_rule)?;
    Ok(())
}

/// Clear the session and restore seed data.
fn reset_state(_args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    ctx.state_store.reset(ctx.session());
    info!(session = ctx.session(), "session state reset");
    Ok(ToolResult::success(json!({})))
}

/// Force a message's delivery status, superseding any pending queue entry.
fn set_delivery(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let message_id = require_str(args, "message_id")?;
    let status = args
        .get("status")
        .and_then(Value::as_str)
        .and_then(MessageStatus::parse)
        .ok_or_else(|| ToolError::invalid_arguments("message_id and status are required"))?;

    let now_ms = ctx.now_ms();
    ctx.state_store.with_session(ctx.session(), |state| {
        let message = state
            .messages
            .get_mut(message_id)
            .ok_or_else(|| ToolError::not_found("Message not found"))?;
        message.status = status;
        message.updated_ms = now_ms;
        let message = message.clone();

        state
            .delivery_queue
            .retain(|item| item.message_id != message_id);

        Ok(ToolResult::success(json!({ "message": message })))
    })
}

/// Extension point for future fault injection.
fn set_rule(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let name = require_str(args, "name")?;
    let value = args.get("value").cloned().unwrap_or(Value::Null);

    ctx.state_store.with_session(ctx.session(), |state| {
        state.rules.insert(name.to_string(), value.clone());
        Ok(ToolResult::success(json!({ "name": name, "value": value })))
    })
}
