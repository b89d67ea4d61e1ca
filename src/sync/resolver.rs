//! Whole-object last-write-wins conflict resolution.
//!
//! The unit of resolution is the entire state, not individual entities:
//! two devices that diverged offline converge by discarding the older
//! replica wholesale. That trade-off is deliberate; per-entity merge
//! would need a CRDT or an operation log, which this protocol does not
//! provide.

use serde_json::Value;

use crate::core::State;

/// Outcome of comparing an inbound remote payload against local state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullDecision {
    /// Remote is strictly newer: replace local wholesale.
    AdoptRemote,
    /// Local is authoritative: keep it and overwrite remote.
    KeepLocalAndPush,
}

/// Pure decision: adopt remote iff its stamp is strictly newer.
pub fn resolve_pull(remote_updated_at_ms: u64, local_last_modified: u64) -> PullDecision {
    if remote_updated_at_ms > local_last_modified {
        PullDecision::AdoptRemote
    } else {
        PullDecision::KeepLocalAndPush
    }
}

/// Outbound payload: always the full current state plus its stamp.
#[derive(Clone, Debug)]
pub struct PushPayload {
    pub data: Value,
    pub updated_at_ms: u64,
}

pub fn resolve_push(state: &State) -> PushPayload {
    PushPayload {
        data: serde_json::to_value(state).unwrap_or(Value::Null),
        updated_at_ms: state.last_modified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adopt_remote_iff_strictly_newer() {
        assert_eq!(resolve_pull(2000, 1000), PullDecision::AdoptRemote);
        assert_eq!(resolve_pull(2000, 3000), PullDecision::KeepLocalAndPush);
        // Equal stamps: local wins, a push re-establishes remote.
        assert_eq!(resolve_pull(2000, 2000), PullDecision::KeepLocalAndPush);
    }

    #[test]
    fn legacy_zero_stamp_always_loses_to_a_real_remote() {
        assert_eq!(resolve_pull(1, 0), PullDecision::AdoptRemote);
    }

    #[test]
    fn push_payload_carries_the_full_state_and_stamp() {
        let mut state = State::default();
        state.last_modified = 4321;
        state.start_workout(None);
        let payload = resolve_push(&state);
        assert_eq!(payload.updated_at_ms, 4321);
        assert_eq!(payload.data["workouts"].as_array().map(Vec::len), Some(1));
    }
}
