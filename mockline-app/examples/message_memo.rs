//! Demo driver: look up a memo, read its content, and send it as a message.

use std::sync::Arc;

use serde_json::json;

use mockline_core::{SessionStateStore, ToolContext, ToolRegistry};
use mockline_state::Clock;
use mockline_tools::{default_state_factory, register_default_tools};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut registry = ToolRegistry::new();
    register_default_tools(&mut registry)?;

    let clock = Arc::new(Clock::new());
    let state_store = Arc::new(SessionStateStore::new(default_state_factory));
    let ctx = ToolContext::new("demo_user", "memo-trace", Arc::clone(&clock), state_store);

    let search = registry.call("memo.search", &json!({ "title": "Decision" }), &ctx);
    println!("memo.search -> {}", search.to_value());

    let memo_id = search
        .data
        .as_ref()
        .and_then(|data| data["memos"][0]["memo_id"].as_str())
        .unwrap_or_default();
    let memo = registry.call("memo.get_memo", &json!({ "memo_id": memo_id }), &ctx);
    println!("memo.get_memo -> {}", memo.to_value());

    let content = memo
        .data
        .as_ref()
        .and_then(|data| data["memo"]["content"].as_str())
        .unwrap_or_default()
        .to_string();
    let send = registry.call(
        "messaging.send_text",
        &json!({
            "to": { "type": "contact_id", "value": "anders" },
            "text": content,
            "client_msg_id": "memo-1",
        }),
        &ctx,
    );
    println!("messaging.send_text -> {}", send.to_value());

    clock.advance(600)?;

    let message_id = send
        .data
        .as_ref()
        .and_then(|data| data["message_id"].as_str())
        .unwrap_or_default();
    let delivered = registry.call(
        "messaging.get_message",
        &json!({ "message_id": message_id }),
        &ctx,
    );
    println!("messaging.get_message -> {}", delivered.to_value());

    Ok(())
}
