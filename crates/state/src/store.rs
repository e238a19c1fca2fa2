use std::collections::HashMap;

use parking_lot::Mutex;

type Factory<S> = Box<dyn Fn() -> S + Send + Sync>;

/// Per-session in-memory state with snapshot/restore.
///
/// Each session owns a fully independent copy produced by the factory, so
/// mutating one session never leaks into another session or into a stored
/// snapshot. The store is a pure data container: it performs no event
/// processing of its own.
pub struct InMemoryStateStore<S: Clone> {
    factory: Factory<S>,
    sessions: Mutex<HashMap<String, S>>,
}

impl<S: Clone> InMemoryStateStore<S> {
    pub fn new(factory: impl Fn() -> S + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run `f` against the session's live state, creating it from the
    /// factory on first access. Mutations made by `f` are applied in place.
    pub fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut S) -> R) -> R {
        let mut sessions = self.sessions.lock();
        let state = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| (self.factory)());
        f(state)
    }

    /// Replace the session's state with a fresh seed, discarding what was
    /// there. Succeeds even if the session never existed.
    pub fn reset(&self, session_id: &str) -> S {
        let mut sessions = self.sessions.lock();
        let state = (self.factory)();
        sessions.insert(session_id.to_string(), state.clone());
        state
    }

    /// Drop every session.
    pub fn reset_all(&self) {
        self.sessions.lock().clear();
    }

    /// Deep copy of the session's current state, creating it if absent.
    pub fn snapshot(&self, session_id: &str) -> S {
        self.with_session(session_id, |state| state.clone())
    }

    /// Replace the session's state with a deep copy of `snapshot`.
    pub fn restore(&self, session_id: &str, snapshot: &S) -> S {
        let mut sessions = self.sessions.lock();
        sessions.insert(session_id.to_string(), snapshot.clone());
        snapshot.clone()
    }
}
