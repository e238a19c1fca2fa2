use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use mockline_core::{DeliveryItem, MessageStatus, SessionState, ToolContext};

/// Schedules and applies clock-driven message status transitions.
///
/// One delivery listener is bound per distinct (session, clock) pair,
/// lazily on the first send within that session, so sessions which never
/// send messages incur no listener overhead. The subscription set lives
/// here rather than in any ambient global.
pub struct DeliveryScheduler {
    subscriptions: Mutex<HashSet<(String, usize)>>,
}

impl DeliveryScheduler {
    pub fn new() -> Self {
        Self {
            subscriptions: Mutex::new(HashSet::new()),
        }
    }

    /// Attach delivery-queue processing for this context's session to its
    /// clock. Subsequent calls for the same (session, clock) pair are no-ops.
    pub fn ensure_subscribed(&self, ctx: &ToolContext) {
        let key = (ctx.session().to_string(), Arc::as_ptr(&ctx.clock) as usize);
        let mut subscriptions = self.subscriptions.lock();
        if subscriptions.contains(&key) {
            return;
        }

        let store = Arc::clone(&ctx.state_store);
        let session = ctx.session().to_string();
        ctx.clock.add_listener(Arc::new(move |now_ms| {
            store.with_session(&session, |state| process_due_items(state, now_ms));
        }));
        subscriptions.insert(key);
    }

    /// Queue a delivery transition for `message_id` after the session's
    /// configured delay.
    pub fn schedule(&self, state: &mut SessionState, message_id: &str, now_ms: i64) {
        state.delivery_queue.push(DeliveryItem {
            message_id: message_id.to_string(),
            due_ms: now_ms + state.delivery_delay_ms,
            target_status: MessageStatus::Delivered,
        });
    }
}

impl Default for DeliveryScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Promote messages whose due time has passed.
///
/// Due entries are consumed exactly once whether or not the promotion
/// applies: a message already finalized by an explicit override keeps its
/// status. Entries not yet due keep their relative order.
fn process_due_items(state: &mut SessionState, now_ms: i64) {
    let queue = std::mem::take(&mut state.delivery_queue);
    let mut remaining = Vec::with_capacity(queue.len());
    for item in queue {
        if item.due_ms <= now_ms {
            if let Some(message) = state.messages.get_mut(&item.message_id) {
                if message.status == MessageStatus::Sent {
                    message.status = item.target_status;
                    message.updated_ms = now_ms;
                    debug!(message_id = %item.message_id, now_ms, "message promoted");
                }
            }
        } else {
            remaining.push(item);
        }
    }
    state.delivery_queue = remaining;
}
