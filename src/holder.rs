//! Canonical state holder: the one live `State` instance.
//!
//! Every mutation entry point (1) mutates the in-memory object,
//! (2) stamps `lastModified`, (3) writes through the durable local store.
//! The durable write is unconditional; remote sync is best-effort and
//! layered on top (see `sync::SyncEngine`).
//!
//! Single writer by construction: the holder is not `Sync`-shared. A
//! preemptive-threading embedding must wrap it in a mutex or a
//! single-writer actor.

use crate::core::{EntityId, ExerciseType, SetTag, Settings, State, WallClock};
use crate::normalize::normalize;
use crate::store::{LocalStore, StoreError};

pub struct StateHolder {
    state: State,
    store: LocalStore,
}

impl StateHolder {
    /// Load and normalize the persisted document, or start from defaults
    /// on first run. A corrupt document degrades to defaults rather than
    /// crash-looping; I/O failures are loud.
    pub fn open(store: LocalStore) -> Result<Self, StoreError> {
        let state = match store.load() {
            Ok(Some(raw)) => normalize(&raw),
            Ok(None) => State::default(),
            Err(StoreError::Corrupt { path, source }) => {
                tracing::warn!(
                    "state document at {} is corrupt ({source}); starting from defaults",
                    path.display()
                );
                State::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self { state, store })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Apply a mutation, stamp the last-writer clock, persist. Returns the
    /// closure's result; the new stamp is `state().last_modified`.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut State) -> R) -> Result<R, StoreError> {
        let result = f(&mut self.state);
        self.state.last_modified = WallClock::next_stamp(self.state.last_modified);
        self.store.save(&self.state)?;
        Ok(result)
    }

    /// Wholesale replacement (remote adopt or file import), re-persisted
    /// immediately. The caller supplies the authoritative stamp.
    pub fn replace(&mut self, mut state: State, last_modified: u64) -> Result<(), StoreError> {
        state.last_modified = last_modified;
        self.state = state;
        self.store.save(&self.state)
    }
}

/// Typed mutation entry points. Each is `mutate` plus one `State` method,
/// so every one stamps and persists.
impl StateHolder {
    pub fn start_workout(
        &mut self,
        routine_id: Option<&EntityId>,
    ) -> Result<EntityId, StoreError> {
        self.mutate(|s| s.start_workout(routine_id))
    }

    pub fn end_workout(&mut self) -> Result<bool, StoreError> {
        self.mutate(State::end_workout)
    }

    pub fn add_exercise(
        &mut self,
        name: &str,
        category: &str,
        kind: ExerciseType,
    ) -> Result<Option<EntityId>, StoreError> {
        self.mutate(|s| s.add_exercise(name, category, kind))
    }

    pub fn delete_exercise(&mut self, id: &EntityId) -> Result<bool, StoreError> {
        self.mutate(|s| s.delete_exercise(id))
    }

    pub fn create_routine(&mut self, name: &str) -> Result<Option<EntityId>, StoreError> {
        self.mutate(|s| s.create_routine(name))
    }

    pub fn delete_routine(&mut self, id: &EntityId) -> Result<(), StoreError> {
        self.mutate(|s| s.delete_routine(id))
    }

    pub fn log_set(&mut self, item_id: &EntityId, tag: SetTag) -> Result<Option<EntityId>, StoreError> {
        self.mutate(|s| s.add_set(item_id, tag))
    }

    pub fn update_settings(
        &mut self,
        f: impl FnOnce(&mut Settings),
    ) -> Result<(), StoreError> {
        self.mutate(|s| f(&mut s.settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExerciseType;
    use crate::paths::STATE_FILE;

    fn temp_holder() -> (tempfile::TempDir, StateHolder) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::new(dir.path().join(STATE_FILE));
        let holder = StateHolder::open(store).expect("open holder");
        (dir, holder)
    }

    #[test]
    fn first_run_starts_from_defaults() {
        let (_dir, holder) = temp_holder();
        assert_eq!(holder.state(), &State::default());
    }

    #[test]
    fn every_mutation_is_durable_and_monotonic() {
        let (dir, mut holder) = temp_holder();
        let mut stamps = Vec::new();
        for i in 0..5 {
            holder
                .mutate(|s| {
                    s.add_exercise(&format!("Lift {i}"), "", ExerciseType::Weight);
                })
                .expect("mutate");
            stamps.push(holder.state().last_modified);
        }
        for pair in stamps.windows(2) {
            assert!(pair[1] > pair[0], "stamps must strictly increase");
        }

        // A fresh process sees the final state.
        let store = LocalStore::new(dir.path().join(STATE_FILE));
        let reloaded = StateHolder::open(store).expect("reopen");
        assert_eq!(reloaded.state().exercises.len(), 5);
        assert_eq!(reloaded.state().last_modified, stamps[4]);
    }

    #[test]
    fn corrupt_document_degrades_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(STATE_FILE);
        std::fs::write(&path, b"]]]").expect("write garbage");
        let holder = StateHolder::open(LocalStore::new(path)).expect("open holder");
        assert_eq!(holder.state(), &State::default());
    }

    #[test]
    fn typed_helpers_stamp_and_persist() {
        let (dir, mut holder) = temp_holder();
        holder
            .update_settings(|s| s.rest_seconds_work = 120)
            .expect("update settings");
        let ex = holder
            .add_exercise("Pull Up", "Pull", ExerciseType::Assisted)
            .expect("mutate")
            .expect("exercise created");
        holder.start_workout(None).expect("start workout");
        let item = holder
            .mutate(|s| s.add_workout_item(&ex, ""))
            .expect("mutate")
            .expect("item added");
        let set = holder
            .log_set(&item, SetTag::Warmup)
            .expect("mutate")
            .expect("set logged");

        let reloaded = StateHolder::open(LocalStore::new(dir.path().join(STATE_FILE)))
            .expect("reopen");
        assert_eq!(reloaded.state().settings.rest_seconds_work, 120);
        let logged = &reloaded.state().workouts[0].items[0].sets[0];
        assert_eq!(logged.id, set);
        assert_eq!(logged.kind, ExerciseType::Assisted);
    }

    #[test]
    fn replace_persists_with_the_given_stamp() {
        let (dir, mut holder) = temp_holder();
        let mut incoming = State::default();
        incoming.start_workout(None);
        holder.replace(incoming, 9000).expect("replace");
        assert_eq!(holder.state().last_modified, 9000);

        let store = LocalStore::new(dir.path().join(STATE_FILE));
        let reloaded = StateHolder::open(store).expect("reopen");
        assert_eq!(reloaded.state().last_modified, 9000);
        assert_eq!(reloaded.state().workouts.len(), 1);
    }
}
