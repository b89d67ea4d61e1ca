//! Asynchronous synchronization with the remote account-scoped store.
//!
//! Layout:
//! - `scheduler`: debounce bursts of local mutations into one push
//! - `resolver`: whole-object last-write-wins decisions
//! - `remote`: the external backend's interface
//! - `session`: the sign-in/pull/push lifecycle state machine
//! - `engine`: composition of holder + scheduler + session + remote

pub mod engine;
pub mod remote;
pub mod resolver;
pub mod scheduler;
pub mod session;

pub use engine::{SyncEngine, SyncEvent};
pub use remote::{RemoteError, RemoteRecord, RemoteStore};
pub use resolver::{resolve_pull, resolve_push, PullDecision, PushPayload};
pub use scheduler::{SyncScheduler, SyncTick};
pub use session::{SyncPhase, SyncSession};
