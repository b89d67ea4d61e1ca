//! Composition of the sync pipeline.
//!
//! Control flow: UI mutation -> holder updated + persisted synchronously
//! -> scheduler notified (debounced) -> on timer fire, push through the
//! resolver to the remote adapter. On sign-in, pull and let the resolver
//! decide which replica wins.
//!
//! Single-threaded cooperative use: the engine has one writer at any
//! instant. Timer threads only send ticks over the channel; the owner
//! drives everything by calling `pump`.

use std::time::Duration;

use crossbeam::channel::{Receiver, unbounded};

use crate::core::{State, UserId, WallClock};
use crate::error::Transience;
use crate::holder::StateHolder;
use crate::normalize::normalize;
use crate::store::StoreError;

use super::remote::{RemoteError, RemoteStore};
use super::resolver::{PullDecision, resolve_pull, resolve_push};
use super::scheduler::{SyncScheduler, SyncTick};
use super::session::{SyncPhase, SyncSession};

/// Non-blocking notifications surfaced to the embedding UI. Failures never
/// block a local mutation or roll one back; only the sync attempt failed.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncEvent {
    /// Remote was strictly newer; local state was replaced wholesale.
    AdoptedRemote { updated_at_ms: u64 },
    /// Local was authoritative on pull; remote gets overwritten.
    KeptLocal,
    /// First sync for this user: the remote record was seeded from local.
    SeededRemote,
    Pushed { updated_at_ms: u64 },
    Failed {
        reason: String,
        transience: Transience,
    },
}

pub struct SyncEngine<R: RemoteStore> {
    holder: StateHolder,
    scheduler: SyncScheduler,
    session: SyncSession,
    remote: R,
    tick_rx: Receiver<SyncTick>,
}

impl<R: RemoteStore> SyncEngine<R> {
    pub fn new(holder: StateHolder, remote: R) -> Self {
        Self::with_debounce(holder, remote, SyncScheduler::DEFAULT_DEBOUNCE)
    }

    /// Engine tuned from the persisted config.
    pub fn with_config(holder: StateHolder, remote: R, config: &crate::config::Config) -> Self {
        Self::with_debounce(holder, remote, Duration::from_millis(config.debounce_ms))
    }

    pub fn with_debounce(holder: StateHolder, remote: R, debounce: Duration) -> Self {
        let (tick_tx, tick_rx) = unbounded();
        Self {
            holder,
            scheduler: SyncScheduler::with_delay(tick_tx, debounce),
            session: SyncSession::new(),
            remote,
            tick_rx,
        }
    }

    pub fn state(&self) -> &State {
        self.holder.state()
    }

    pub fn phase(&self) -> SyncPhase {
        self.session.phase()
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Apply a local mutation. The durable write is unconditional and
    /// completes before this returns; the remote push is scheduled
    /// (debounced) and best-effort.
    pub fn mutate<T>(&mut self, f: impl FnOnce(&mut State) -> T) -> Result<T, StoreError> {
        let result = self.holder.mutate(f)?;
        self.session.notify_mutation();
        self.scheduler.notify();
        Ok(result)
    }

    /// Drain elapsed debounce timers, pushing at most once per call per
    /// elapsed deadline. Returns the notifications produced.
    pub fn pump(&mut self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while self.tick_rx.try_recv().is_ok() {
            if self.scheduler.should_fire() {
                self.push_now(&mut events);
            }
        }
        events
    }

    /// Block for up to `timeout` waiting for the next timer tick, then
    /// drain as `pump` does.
    pub fn pump_blocking(&mut self, timeout: Duration) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        if self.tick_rx.recv_timeout(timeout).is_ok() {
            if self.scheduler.should_fire() {
                self.push_now(&mut events);
            }
            events.extend(self.pump());
        }
        events
    }

    /// Auth success: pull the remote record and resolve. An absent record
    /// is seeded from local state; a strictly newer remote replaces local
    /// wholesale; otherwise local wins and is pushed.
    pub fn sign_in(&mut self, user: UserId) -> Result<Vec<SyncEvent>, StoreError> {
        self.session.sign_in(user.clone());
        let mut events = Vec::new();

        match self.remote.get_latest(&user) {
            Ok(Some(record)) => {
                self.session.complete_pull();
                let remote_ms = record.updated_at_ms();
                match resolve_pull(remote_ms, self.holder.state().last_modified) {
                    PullDecision::AdoptRemote => {
                        let incoming = normalize(&record.data);
                        self.holder.replace(incoming, remote_ms)?;
                        tracing::info!(updated_at_ms = remote_ms, "adopted remote state");
                        events.push(SyncEvent::AdoptedRemote {
                            updated_at_ms: remote_ms,
                        });
                    }
                    PullDecision::KeepLocalAndPush => {
                        events.push(SyncEvent::KeptLocal);
                        self.push_now(&mut events);
                    }
                }
            }
            Ok(None) => {
                self.session.complete_pull();
                tracing::info!("no remote record yet; seeding from local state");
                events.push(SyncEvent::SeededRemote);
                self.push_now(&mut events);
            }
            Err(e @ RemoteError::Unauthorized(_)) => {
                tracing::warn!("sign-in rejected: {e}");
                events.push(SyncEvent::Failed {
                    reason: e.to_string(),
                    transience: e.transience(),
                });
                self.session.sign_out();
            }
            Err(e) => {
                // Remote unavailable: stay signed in, keep local state
                // untouched. No retry is scheduled; the next debounced
                // mutation or the next sign-in pull is the retry.
                tracing::warn!("initial pull failed: {e}");
                events.push(SyncEvent::Failed {
                    reason: e.to_string(),
                    transience: e.transience(),
                });
                self.session.complete_pull();
            }
        }

        Ok(events)
    }

    /// Explicit sign-out. Local persistence continues unaffected; pending
    /// debounce timers become no-ops.
    pub fn sign_out(&mut self) {
        self.scheduler.cancel();
        self.session.sign_out();
    }

    fn push_now(&mut self, events: &mut Vec<SyncEvent>) {
        let Some(user) = self.session.user().cloned() else {
            return;
        };
        if !self.session.begin_push() {
            // A push is already in flight; the dirty flag covers this burst.
            return;
        }

        let payload = resolve_push(self.holder.state());
        let updated_at = WallClock(payload.updated_at_ms).to_datetime();
        match self.remote.upsert(&user, &payload.data, updated_at) {
            Ok(()) => {
                tracing::debug!(updated_at_ms = payload.updated_at_ms, "pushed to remote");
                events.push(SyncEvent::Pushed {
                    updated_at_ms: payload.updated_at_ms,
                });
            }
            Err(e) => {
                tracing::warn!("push failed: {e}");
                events.push(SyncEvent::Failed {
                    reason: e.to_string(),
                    transience: e.transience(),
                });
            }
        }

        // Mutations that landed during the flight must not be dropped:
        // re-arm the debounce for a follow-up push.
        if self.session.complete_push() {
            self.scheduler.notify();
        }
    }
}
