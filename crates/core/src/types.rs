use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: String,
    pub name: String,
    #[serde(default)]
    pub phones: Vec<Phone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phone {
    pub e164: String,
}

/// Wire form is lowercase: "sent" | "delivered" | "failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Failed,
}

impl MessageStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    ContactId,
    E164,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "type")]
    pub kind: AddressKind,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRef {
    pub contact_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub conversation_id: String,
    pub to: Address,
    pub text: String,
    pub client_msg_id: String,
    pub status: MessageStatus,
    pub created_ms: i64,
    pub updated_ms: i64,
    pub contact: Option<ContactRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub peer: String,
    /// Message ids in send order, append-only.
    pub messages: Vec<String>,
    pub status: String,
    pub created_ms: i64,
    pub updated_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memo {
    pub memo_id: String,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Pending clock-driven status transition for a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryItem {
    pub message_id: String,
    pub due_ms: i64,
    pub target_status: MessageStatus,
}

/// Everything a session owns. Cloning a `SessionState` yields a fully
/// independent deep copy, which is what snapshot/restore rely on.
///
/// Keyed collections are `BTreeMap` so iteration and serialization order
/// are stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub contacts: BTreeMap<String, Contact>,
    pub messages: BTreeMap<String, Message>,
    pub conversations: BTreeMap<String, Conversation>,
    pub memos: BTreeMap<String, Memo>,
    pub delivery_queue: Vec<DeliveryItem>,
    pub rules: BTreeMap<String, Value>,
    pub next_message_id: u64,
    pub next_conversation_id: u64,
    pub delivery_delay_ms: i64,
}

impl SessionState {
    /// Empty state with id counters at 1 and the given delivery delay.
    pub fn new(delivery_delay_ms: i64) -> Self {
        Self {
            contacts: BTreeMap::new(),
            messages: BTreeMap::new(),
            conversations: BTreeMap::new(),
            memos: BTreeMap::new(),
            delivery_queue: Vec::new(),
            rules: BTreeMap::new(),
            next_message_id: 1,
            next_conversation_id: 1,
            delivery_delay_ms,
        }
    }
}
