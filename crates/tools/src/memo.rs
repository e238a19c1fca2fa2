use serde_json::{json, Map, Value};

use mockline_core::{Memo, RegistryError, ToolContext, ToolError, ToolRegistry, ToolResult};

use crate::args::require_str;

pub fn register_memo_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register_tool("memo.list_memos", list_memos)?;
    registry.register_tool("memo.search", search_memos)?;
    registry.register_tool("memo.get_memo", get_memo)?;
    Ok(())
}

fn list_memos(_args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    ctx.state_store.with_session(ctx.session(), |state| {
        let summaries: Vec<Value> = state.memos.values().map(summary).collect();
        Ok(ToolResult::success(json!({ "memos": summaries })))
    })
}

/// Search memos by title substring, case-insensitive.
fn search_memos(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let needle = require_str(args, "title")?.to_lowercase();
    ctx.state_store.with_session(ctx.session(), |state| {
        let matches: Vec<Value> = state
            .memos
            .values()
            .filter(|memo| memo.title.to_lowercase().contains(&needle))
            .map(summary)
            .collect();
        Ok(ToolResult::success(json!({ "memos": matches })))
    })
}

fn get_memo(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let memo_id = require_str(args, "memo_id")?;
    ctx.state_store.with_session(ctx.session(), |state| {
        let memo = state
            .memos
            .get(memo_id)
            .ok_or_else(|| ToolError::not_found("Memo not found"))?;
        Ok(ToolResult::success(json!({ "memo": memo })))
    })
}

fn summary(memo: &Memo) -> Value {
    json!({
        "memo_id": memo.memo_id,
        "title": memo.title,
        "updated_at": memo.updated_at,
    })
}
