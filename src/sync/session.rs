//! Sync session lifecycle.
//!
//! `signed-out -> pulling -> idle <-> pushing`, with `signed-out` also the
//! terminal state on explicit sign-out. At most one push is in flight;
//! the dirty flag records mutations that arrive while one is, so the
//! trailing burst is re-pushed instead of silently dropped.

use crate::core::UserId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncPhase {
    SignedOut,
    Pulling,
    Idle,
    Pushing,
}

pub struct SyncSession {
    phase: SyncPhase,
    user: Option<UserId>,
    /// Local mutations since the last push started.
    dirty: bool,
}

impl SyncSession {
    pub fn new() -> Self {
        Self {
            phase: SyncPhase::SignedOut,
            user: None,
            dirty: false,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Auth success: enter the initial pull.
    pub fn sign_in(&mut self, user: UserId) {
        self.user = Some(user);
        self.phase = SyncPhase::Pulling;
        self.dirty = false;
    }

    /// The initial pull resolved (either direction).
    pub fn complete_pull(&mut self) {
        if self.phase == SyncPhase::Pulling {
            self.phase = SyncPhase::Idle;
        }
    }

    /// Explicit sign-out. Pending debounce timers become irrelevant:
    /// subsequent pushes are no-ops while signed out. Local persistence
    /// continues unaffected.
    pub fn sign_out(&mut self) {
        self.phase = SyncPhase::SignedOut;
        self.user = None;
        self.dirty = false;
    }

    /// Record a local mutation.
    pub fn notify_mutation(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Try to claim the single push slot. Fails while signed out or while
    /// a push is already in flight (the dirty flag covers that burst).
    pub fn begin_push(&mut self) -> bool {
        if self.user.is_none() || self.phase != SyncPhase::Idle {
            return false;
        }
        self.phase = SyncPhase::Pushing;
        self.dirty = false;
        true
    }

    /// Push finished (success or error). Returns true when mutations
    /// arrived during the flight and a follow-up push must be scheduled.
    pub fn complete_push(&mut self) -> bool {
        if self.phase == SyncPhase::Pushing {
            self.phase = SyncPhase::Idle;
        }
        std::mem::take(&mut self.dirty)
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new()
    }
}
