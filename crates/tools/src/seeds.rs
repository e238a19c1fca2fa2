use std::collections::BTreeMap;

use mockline_core::{Contact, Memo, Phone, SessionState};

/// Delivery delay applied by the default seed.
pub const DEFAULT_DELIVERY_DELAY_MS: i64 = 500;

/// Fresh seeded state for a new or reset session.
///
/// Built from scratch on every call, so no two sessions ever share
/// structure with each other or with a previous seed.
pub fn default_state_factory() -> SessionState {
    state_factory_with_delay(DEFAULT_DELIVERY_DELAY_MS)
}

/// Seeded state with a custom delivery delay.
pub fn state_factory_with_delay(delivery_delay_ms: i64) -> SessionState {
    let mut state = SessionState::new(delivery_delay_ms);

    let anders = Contact {
        contact_id: "anders".to_string(),
        name: "Anders".to_string(),
        phones: vec![Phone {
            e164: "+15550001111".to_string(),
        }],
    };
    state.contacts.insert(anders.contact_id.clone(), anders);

    let decision = Memo {
        memo_id: "decision".to_string(),
        title: "Hiring Decision".to_string(),
        content: "Casey is the successful candidate for the staff engineer role.".to_string(),
        created_at: 0,
        updated_at: 0,
    };
    state.memos.insert(decision.memo_id.clone(), decision);

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counters_and_queue() {
        let state = default_state_factory();
        assert_eq!(state.next_message_id, 1);
        assert_eq!(state.next_conversation_id, 1);
        assert!(state.delivery_queue.is_empty());
        assert_eq!(state.delivery_delay_ms, 500);
    }

    #[test]
    fn test_seed_contains_anders_and_decision_memo() {
        let state = default_state_factory();
        assert_eq!(state.contacts["anders"].phones[0].e164, "+15550001111");
        assert!(state.memos["decision"]
            .content
            .contains("Casey is the successful candidate"));
    }
}
