use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc, time::Duration};
use uuid::Uuid;

use super::session_state::SessionState;
use crate::app_error::AppError;

pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);

struct SessionEntry {
    state: SessionState,
    last_seen: DateTime<Utc>,
}

/// Live sessions of this process. Nothing survives a restart, and a
/// session untouched for longer than the idle timeout is dropped.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    idle_timeout: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_IDLE)
    }
}

impl SessionRegistry {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    pub fn create(&self) -> Uuid {
        let now = Utc::now();
        let evicted = self.evict_idle_at(now);
        if evicted > 0 {
            tracing::info!(evicted, "Idle sessions evicted");
        }

        let id = Uuid::new_v4();
        self.sessions.lock().insert(
            id,
            SessionEntry {
                state: SessionState::new(),
                last_seen: now,
            },
        );
        tracing::info!(session = %id, "Session created");
        id
    }

    /// Runs `f` against one session while holding the registry lock and
    /// marks the session as seen. Callers must not await inside `f`.
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> Result<R, AppError> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();

        let expired = sessions
            .get(&id)
            .is_some_and(|entry| self.is_idle(entry, now));
        if expired {
            sessions.remove(&id);
            tracing::info!(session = %id, "Session expired");
        }

        let entry = sessions.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
        entry.last_seen = now;
        Ok(f(&mut entry.state))
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.lock().contains_key(&id)
    }

    pub fn remove(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.lock().remove(&id).is_none() {
            return Err(AppError::SessionNotFound(id));
        }

        tracing::info!(session = %id, "Session ended");
        Ok(())
    }

    /// Drops every session idle for longer than the timeout as of `now`.
    pub fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_idle(entry, now));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    fn is_idle(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        (now - entry.last_seen)
            .to_std()
            .is_ok_and(|idle| idle > self.idle_timeout)
    }
}
