//! Ledger plus store: the explicit load/save lifecycle.
//!
//! The tracker loads once when opened and writes the full snapshot after
//! every operation that changed something.

use crate::{DateKey, Ledger, LedgerStore, Outcome, Result};

pub struct Tracker<S: LedgerStore> {
    ledger: Ledger,
    store: S,
}

impl<S: LedgerStore> Tracker<S> {
    /// Load the ledger from `store`
    pub fn open(store: S) -> Result<Self> {
        let ledger = Ledger::from_snapshot(store.load()?);
        tracing::debug!(
            "Opened tracker with {} points across {} stored days",
            ledger.total_points(),
            ledger.stored_days().count()
        );
        Ok(Self { ledger, store })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn toggle_exercise(&mut self, key: DateKey, exercise_id: &str) -> Result<Outcome> {
        let outcome = self.ledger.toggle_exercise(key, exercise_id);
        self.commit(outcome)
    }

    pub fn add_exercise(&mut self, key: DateKey, name: &str) -> Result<Outcome> {
        let outcome = self.ledger.add_exercise(key, name);
        self.commit(outcome)
    }

    pub fn remove_exercise(&mut self, key: DateKey, exercise_id: &str) -> Result<Outcome> {
        let outcome = self.ledger.remove_exercise(key, exercise_id);
        self.commit(outcome)
    }

    pub fn collect_daily_bonus(&mut self, key: DateKey) -> Result<Outcome> {
        let outcome = self.ledger.collect_daily_bonus(key);
        self.commit(outcome)
    }

    /// Persist after a change; the in-memory ledger keeps the change even
    /// if the write fails
    fn commit(&mut self, outcome: Outcome) -> Result<Outcome> {
        if outcome.is_change() {
            if let Err(e) = self.store.save(&self.ledger.to_snapshot()) {
                tracing::error!("Failed to persist ledger: {}", e);
                return Err(e);
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::hero_id;
    use crate::store::{JsonFileStore, MemoryStore, DEFAULT_STORAGE_KEY};
    use crate::{Error, LedgerSnapshot};

    fn key(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    /// Store that refuses every write
    struct ReadOnlyStore;

    impl LedgerStore for ReadOnlyStore {
        fn load(&self) -> Result<LedgerSnapshot> {
            Ok(LedgerSnapshot::default())
        }

        fn save(&mut self, _snapshot: &LedgerSnapshot) -> Result<()> {
            Err(Error::Storage("read only".into()))
        }
    }

    #[test]
    fn test_changes_are_saved() {
        let mut tracker = Tracker::open(MemoryStore::new(DEFAULT_STORAGE_KEY)).unwrap();
        let day = key("2026-03-01");

        tracker.toggle_exercise(day, &hero_id(0)).unwrap();
        let saved = tracker.store().load().unwrap();
        assert_eq!(saved.total_points, 10);
        assert!(saved.workouts["2026-03-01"].exercises[0].completed);
    }

    #[test]
    fn test_noop_does_not_write() {
        let mut tracker = Tracker::open(MemoryStore::new(DEFAULT_STORAGE_KEY)).unwrap();
        let day = key("2026-03-01");

        assert_eq!(tracker.add_exercise(day, "   ").unwrap(), Outcome::Unchanged);
        assert_eq!(tracker.collect_daily_bonus(day).unwrap(), Outcome::Unchanged);
        assert_eq!(tracker.remove_exercise(day, "ghost").unwrap(), Outcome::Unchanged);
        assert!(tracker.store().raw().is_none());
    }

    #[test]
    fn test_reopen_restores_state() {
        let temp_dir = tempfile::tempdir().unwrap();
        let day = key("2026-03-01");

        {
            let store = JsonFileStore::new(temp_dir.path(), DEFAULT_STORAGE_KEY);
            let mut tracker = Tracker::open(store).unwrap();
            for i in 0..4 {
                tracker.toggle_exercise(day, &hero_id(i)).unwrap();
            }
            tracker.collect_daily_bonus(day).unwrap();
            tracker.add_exercise(day, "Star Jumps").unwrap();
        }

        let store = JsonFileStore::new(temp_dir.path(), DEFAULT_STORAGE_KEY);
        let tracker = Tracker::open(store).unwrap();
        assert_eq!(tracker.ledger().total_points(), 70);
        assert_eq!(tracker.ledger().current_streak(day), 1);
        assert_eq!(tracker.ledger().day_record(day).exercises[4].name, "Star Jumps");
    }

    #[test]
    fn test_open_with_corrupt_store_starts_fresh() {
        let tracker = Tracker::open(MemoryStore::with_raw(DEFAULT_STORAGE_KEY, "{]")).unwrap();
        assert_eq!(tracker.ledger(), &Ledger::new());
    }

    #[test]
    fn test_save_failure_is_reported_but_state_kept() {
        let mut tracker = Tracker::open(ReadOnlyStore).unwrap();
        let day = key("2026-03-01");

        assert!(tracker.toggle_exercise(day, &hero_id(0)).is_err());
        assert_eq!(tracker.ledger().total_points(), 10);
    }
}
