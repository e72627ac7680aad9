//! Per-owner pending session state.

use std::collections::HashMap;
use std::sync::Mutex;

/// An action awaiting the owner's next message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// A delete was requested; waiting for the confirmation reply.
    ConfirmDelete,
    /// An update was requested; the next valid URL replaces the profile.
    AwaitUpdateUrl,
}

/// In-memory session flags. Advisory only; a restart clears them.
#[derive(Default)]
pub struct Sessions {
    inner: Mutex<HashMap<i64, Pending>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a pending action to the owner's session, replacing any other.
    pub fn set(&self, owner_id: i64, pending: Pending) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.insert(owner_id, pending);
    }

    /// Remove and return the owner's pending action.
    pub fn take(&self, owner_id: i64) -> Option<Pending> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.remove(&owner_id)
    }

    /// The owner's pending action without consuming it.
    pub fn peek(&self, owner_id: i64) -> Option<Pending> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.get(&owner_id).copied()
    }

    /// Drop the owner's pending action, if any.
    pub fn clear(&self, owner_id: i64) {
        self.take(owner_id);
    }
}
