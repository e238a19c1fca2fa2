//! Demo driver: send a text to the seeded contact and watch the logical
//! clock deliver it.

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
    let ctx = ToolContext::new("demo_user", "demo-trace", Arc::clone(&clock), state_store);

    let search = registry.call("contacts.search", &json!({ "q": "anders" }), &ctx);
    println!("contacts.search -> {}", search.to_value());

    let send = registry.call(
        "messaging.send_text",
        &json!({
            "to": { "type": "contact_id", "value": "anders" },
            "text": "Let us meet up at 3 pm today",
            "client_msg_id": "msg-1",
        }),
        &ctx,
    );
    println!("messaging.send_text -> {}", send.to_value());

    // Trigger delivery.
    clock.advance(500)?;

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
