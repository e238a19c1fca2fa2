use std::sync::Arc;

use serde_json::{json, Map, Value};

use mockline_core::{
    Address, AddressKind, ContactRef, Conversation, Message, MessageStatus, RegistryError,
    SessionState, ToolContext, ToolError, ToolRegistry, ToolResult,
};

use crate::args::require_str;
use crate::delivery::DeliveryScheduler;

pub fn register_messaging_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    let scheduler = Arc::new(DeliveryScheduler::new());
    registry.register_tool("messaging.send_text", move |args, ctx| {
        send_text(&scheduler, args, ctx)
    })?;
    registry.register_tool("messaging.get_message", get_message)?;
    registry.register_tool("messaging.list_messages", list_messages)?;
    Ok(())
}

/// Send a text message and schedule its delivery on the logical clock.
///
/// Arguments are validated before any state is touched.
fn send_text(
    scheduler: &DeliveryScheduler,
    args: &Map<String, Value>,
    ctx: &ToolContext,
) -> Result<ToolResult, ToolError> {
    let to = args
        .get("to")
        .and_then(Value::as_object)
        .ok_or_else(|| ToolError::invalid_arguments("to, text, client_msg_id are required"))?;
    let text = require_str(args, "text")?;
    let client_msg_id = require_str(args, "client_msg_id")?;

    let kind = match to.get("type").and_then(Value::as_str) {
        Some("contact_id") => AddressKind::ContactId,
        Some("e164") => AddressKind::E164,
        _ => return Err(ToolError::invalid_arguments("to must include type and value")),
    };
    let value = to
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::invalid_arguments("to must include type and value"))?;

    scheduler.ensure_subscribed(ctx);
    let now_ms = ctx.now_ms();

    ctx.state_store.with_session(ctx.session(), |state| {
        let (peer, contact_ref) = resolve_recipient(state, kind, value)?;
        let conversation_id = ensure_conversation(state, &peer, now_ms);
        let message_id = create_message(
            state,
            &conversation_id,
            &peer,
            text,
            client_msg_id,
            contact_ref,
            now_ms,
        );
        scheduler.schedule(state, &message_id, now_ms);

        Ok(ToolResult::success(json!({
            "message_id": message_id,
            "conversation_id": conversation_id,
            "status": MessageStatus::Sent,
        })))
    })
}

fn get_message(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let message_id = require_str(args, "message_id")?;
    ctx.state_store.with_session(ctx.session(), |state| {
        let message = state
            .messages
            .get(message_id)
            .ok_or_else(|| ToolError::not_found("Message not found"))?;
        Ok(ToolResult::success(json!({ "message": message })))
    })
}

/// List a conversation's messages in send order, newest tail first kept.
fn list_messages(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let conversation_id = require_str(args, "conversation_id")?;
    let limit = match args.get("limit") {
        None => 50,
        Some(value) => value
            .as_u64()
            .filter(|limit| *limit > 0)
            .ok_or_else(|| ToolError::invalid_arguments("limit must be a positive integer"))?
            as usize,
    };

    ctx.state_store.with_session(ctx.session(), |state| {
        let conversation = state
            .conversations
            .get(conversation_id)
            .ok_or_else(|| ToolError::not_found("Conversation not found"))?;
        let start = conversation.messages.len().saturating_sub(limit);
        let messages: Vec<&Message> = conversation.messages[start..]
            .iter()
            .filter_map(|id| state.messages.get(id))
            .collect();
        Ok(ToolResult::success(json!({ "messages": messages })))
    })
}

/// Resolve the recipient to a peer e164 and an optional contact reference.
fn resolve_recipient(
    state: &SessionState,
    kind: AddressKind,
    value: &str,
) -> Result<(String, Option<ContactRef>), ToolError> {
    match kind {
        AddressKind::E164 => Ok((value.to_string(), None)),
        AddressKind::ContactId => {
            let contact = state
                .contacts
                .get(value)
                .ok_or_else(|| ToolError::not_found("Contact not found"))?;
            let phone = contact
                .phones
                .first()
                .ok_or_else(|| ToolError::not_found("Contact has no phone numbers"))?;
            Ok((
                phone.e164.clone(),
                Some(ContactRef {
                    contact_id: contact.contact_id.clone(),
                }),
            ))
        }
    }
}

/// Find the conversation for `peer`, creating it on first contact.
/// At most one conversation exists per distinct peer address.
fn ensure_conversation(state: &mut SessionState, peer: &str, now_ms: i64) -> String {
    if let Some(conversation) = state
        .conversations
        .values_mut()
        .find(|conversation| conversation.peer == peer)
    {
        conversation.updated_ms = now_ms;
        return conversation.conversation_id.clone();
    }

    let conversation_id = format!("c{}", state.next_conversation_id);
    state.next_conversation_id += 1;
    state.conversations.insert(
        conversation_id.clone(),
        Conversation {
            conversation_id: conversation_id.clone(),
            peer: peer.to_string(),
            messages: Vec::new(),
            status: "active".to_string(),
            created_ms: now_ms,
            updated_ms: now_ms,
        },
    );
    conversation_id
}

fn create_message(
    state: &mut SessionState,
    conversation_id: &str,
    peer: &str,
    text: &str,
    client_msg_id: &str,
    contact_ref: Option<ContactRef>,
    now_ms: i64,
) -> String {
    let message_id = format!("m{}", state.next_message_id);
    state.next_message_id += 1;

    let message = Message {
        message_id: message_id.clone(),
        conversation_id: conversation_id.to_string(),
        to: Address {
            kind: AddressKind::E164,
            value: peer.to_string(),
        },
        text: text.to_string(),
        client_msg_id: client_msg_id.to_string(),
        status: MessageStatus::Sent,
        created_ms: now_ms,
        updated_ms: now_ms,
        contact: contact_ref,
    };
    state.messages.insert(message_id.clone(), message);

    if let Some(conversation) = state.conversations.get_mut(conversation_id) {
        conversation.messages.push(message_id.clone());
        conversation.updated_ms = now_ms;
    }
    message_id
}
