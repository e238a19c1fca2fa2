use std::sync::Arc;

use serde_json::json;

use mockline_core::{MessageStatus, SessionStateStore, ToolContext, ToolRegistry};
use mockline_state::Clock;
use mockline_tools::{register_default_tools, state_factory_with_delay};

fn build_harness(delay_ms: i64) -> (ToolRegistry, ToolContext) {
    let mut registry = ToolRegistry::new();
    register_default_tools(&mut registry).unwrap();
    let clock = Arc::new(Clock::new());
    let state_store = Arc::new(SessionStateStore::new(move || {
        state_factory_with_delay(delay_ms)
    }));
    let ctx = ToolContext::new("d1", "trace-d1", clock, state_store);
    (registry, ctx)
}

fn send(registry: &ToolRegistry, ctx: &ToolContext, client_msg_id: &str) -> String {
    let send = registry.call(
        "messaging.send_text",
        &json!({
            "to": { "type": "contact_id", "value": "anders" },
            "text": "ping",
            "client_msg_id": client_msg_id,
        }),
        ctx,
    );
    assert!(send.ok);
    send.data.unwrap()["message_id"].as_str().unwrap().to_string()
}

#[test]
fn test_partial_queue_processing_preserves_order() {
    let (registry, ctx) = build_harness(100);

    let first = send(&registry, &ctx, "c1");
    ctx.clock.advance(60).unwrap();
    let second = send(&registry, &ctx, "c2");

    // first is due at 100, second at 160.
    ctx.clock.advance(40).unwrap();
    let state = ctx.state_store.snapshot(ctx.session());
    assert_eq!(state.messages[&first].status, MessageStatus::Delivered);
    assert_eq!(state.messages[&second].status, MessageStatus::Sent);
    assert_eq!(state.delivery_queue.len(), 1);
    assert_eq!(state.delivery_queue[0].message_id, second);

    ctx.clock.advance(60).unwrap();
    let state = ctx.state_store.snapshot(ctx.session());
    assert_eq!(state.messages[&second].status, MessageStatus::Delivered);
    assert!(state.delivery_queue.is_empty());
}

#[test]
fn test_custom_delay_from_seed_config() {
    let (registry, ctx) = build_harness(1_000);
    let message_id = send(&registry, &ctx, "c1");

    ctx.clock.advance(999).unwrap();
    let state = ctx.state_store.snapshot(ctx.session());
    assert_eq!(state.messages[&message_id].status, MessageStatus::Sent);

    ctx.clock.advance(1).unwrap();
    let state = ctx.state_store.snapshot(ctx.session());
    assert_eq!(state.messages[&message_id].status, MessageStatus::Delivered);
}

#[test]
fn test_queue_entry_consumed_exactly_once() {
    let (registry, ctx) = build_harness(100);
    let message_id = send(&registry, &ctx, "c1");

    ctx.clock.advance(100).unwrap();
    let delivered_at = ctx.state_store.snapshot(ctx.session()).messages[&message_id].updated_ms;
    assert_eq!(delivered_at, 100);

    // Later advances find an empty queue and leave the message alone.
    ctx.clock.advance(100).unwrap();
    let state = ctx.state_store.snapshot(ctx.session());
    assert_eq!(state.messages[&message_id].updated_ms, 100);
    assert!(state.delivery_queue.is_empty());
}

#[test]
fn test_forced_status_is_not_overwritten_by_due_entry() {
    let (registry, ctx) = build_harness(100);
    let message_id = send(&registry, &ctx, "c1");

    // Force delivery early; the queue entry is dropped with it.
    let forced = registry.call(
        "admin.set_delivery",
        &json!({ "message_id": &message_id, "status": "failed" }),
        &ctx,
    );
    assert!(forced.ok);

    ctx.clock.advance(100).unwrap();
    let state = ctx.state_store.snapshot(ctx.session());
    assert_eq!(state.messages[&message_id].status, MessageStatus::Failed);
}

#[test]
fn test_repeated_sends_reuse_one_listener() {
    let (registry, ctx) = build_harness(100);
    let first = send(&registry, &ctx, "c1");
    let second = send(&registry, &ctx, "c2");

    ctx.clock.advance(100).unwrap();
    let state = ctx.state_store.snapshot(ctx.session());
    assert_eq!(state.messages[&first].status, MessageStatus::Delivered);
    assert_eq!(state.messages[&second].status, MessageStatus::Delivered);
    assert!(state.delivery_queue.is_empty());
}
