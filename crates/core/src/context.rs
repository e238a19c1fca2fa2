use std::sync::Arc;

use serde_json::{Map, Value};

use mockline_state::{Clock, InMemoryStateStore};

use crate::types::SessionState;

pub type SessionStateStore = InMemoryStateStore<SessionState>;

/// Per-call context handed to every tool handler.
#[derive(Clone)]
pub struct ToolContext {
    /// Acting user; also the default session id.
    pub user_id: String,
    /// Correlation id for tracing.
    pub trace_id: String,
    pub clock: Arc<Clock>,
    pub state_store: Arc<SessionStateStore>,
    /// Optional session override.
    pub session_id: Option<String>,
    pub meta: Map<String, Value>,
}

impl ToolContext {
    pub fn new(
        user_id: impl Into<String>,
        trace_id: impl Into<String>,
        clock: Arc<Clock>,
        state_store: Arc<SessionStateStore>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            trace_id: trace_id.into(),
            clock,
            state_store,
            session_id: None,
            meta: Map::new(),
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Current logical time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Session id used for state isolation; defaults to the user id.
    pub fn session(&self) -> &str {
        self.session_id.as_deref().unwrap_or(&self.user_id)
    }
}
