//! The workout ledger: per-day exercises, points, daily bonus and streak.
//!
//! Every operation is total. References to unknown days or exercises and
//! blank exercise names leave the ledger untouched and report
//! [`Outcome::Unchanged`] instead of failing.
//!
//! Days that were never modified are not stored. Reads synthesize them
//! ([`Ledger::day_record`]); only a mutation materializes them.

use crate::catalog::{BONUS_PER_DAY, POINTS_PER_EXERCISE};
use crate::{DateKey, DayRecord, Exercise, LedgerSnapshot};
use std::borrow::Cow;
use std::collections::BTreeMap;
use uuid::Uuid;

/// What a mutating ledger operation did
///
/// Outcomes are observational only; the presentation layer uses them for
/// point pop-ups and celebrations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (unknown reference, rejected input, already done)
    Unchanged,
    /// State changed without affecting points
    Updated,
    /// An exercise was completed
    PointsEarned(u64),
    /// An exercise was un-completed; carries the amount actually deducted
    PointsLost(u64),
    /// The daily bonus was collected
    BonusCollected(u64),
}

impl Outcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, Outcome::Unchanged)
    }

    /// Points to flash in a "+N" pop-up, if any
    pub fn points_awarded(&self) -> Option<u64> {
        match self {
            Outcome::PointsEarned(n) | Outcome::BonusCollected(n) => Some(*n),
            _ => None,
        }
    }
}

/// Canonical tracker state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    workouts: BTreeMap<DateKey, DayRecord>,
    total_points: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from its persisted form
    ///
    /// Entries whose key is not a valid date are dropped. A negative total
    /// is treated as zero.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let mut workouts = BTreeMap::new();
        for (key, day) in snapshot.workouts {
            match DateKey::parse(&key) {
                Ok(date_key) => {
                    workouts.insert(date_key, day);
                }
                Err(e) => {
                    tracing::warn!("Dropping stored day with bad key: {}", e);
                }
            }
        }

        Self {
            workouts,
            total_points: u64::try_from(snapshot.total_points).unwrap_or(0),
        }
    }

    pub fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            workouts: self
                .workouts
                .iter()
                .map(|(key, day)| (key.to_string(), day.clone()))
                .collect(),
            total_points: i64::try_from(self.total_points).unwrap_or(i64::MAX),
        }
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    /// Days that have been materialized, in date order
    pub fn stored_days(&self) -> impl Iterator<Item = (DateKey, &DayRecord)> {
        self.workouts.iter().map(|(key, day)| (*key, day))
    }

    pub fn is_stored(&self, key: DateKey) -> bool {
        self.workouts.contains_key(&key)
    }

    /// The record for a day, synthesizing the default day if none is stored
    ///
    /// Never modifies the ledger.
    pub fn day_record(&self, key: DateKey) -> Cow<'_, DayRecord> {
        match self.workouts.get(&key) {
            Some(day) => Cow::Borrowed(day),
            None => Cow::Owned(DayRecord::with_hero_exercises()),
        }
    }

    fn materialize(&mut self, key: DateKey) -> &mut DayRecord {
        self.workouts.entry(key).or_insert_with(|| {
            tracing::debug!("Materializing day {}", key);
            DayRecord::with_hero_exercises()
        })
    }

    fn bonus_awarded(&self, key: DateKey) -> bool {
        self.workouts.get(&key).is_some_and(|day| day.bonus_awarded)
    }

    /// Flip an exercise's completed flag, adjusting points
    pub fn toggle_exercise(&mut self, key: DateKey, exercise_id: &str) -> Outcome {
        if self.day_record(key).exercise(exercise_id).is_none() {
            tracing::debug!("Toggle ignored: no exercise {} on {}", exercise_id, key);
            return Outcome::Unchanged;
        }

        let completed = {
            let day = self.materialize(key);
            let Some(exercise) = day.exercises.iter_mut().find(|e| e.id == exercise_id) else {
                return Outcome::Unchanged;
            };
            exercise.completed = !exercise.completed;
            exercise.completed
        };

        if completed {
            self.total_points += POINTS_PER_EXERCISE;
            tracing::debug!("{} completed on {} (+{})", exercise_id, key, POINTS_PER_EXERCISE);
            Outcome::PointsEarned(POINTS_PER_EXERCISE)
        } else {
            let lost = self.total_points.min(POINTS_PER_EXERCISE);
            self.total_points -= lost;
            tracing::debug!("{} un-completed on {} (-{})", exercise_id, key, lost);
            Outcome::PointsLost(lost)
        }
    }

    /// Append a custom exercise to a day
    ///
    /// The name is trimmed; blank names are ignored.
    pub fn add_exercise(&mut self, key: DateKey, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Add ignored: blank exercise name for {}", key);
            return Outcome::Unchanged;
        }

        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            completed: false,
            is_hero: false,
        };
        tracing::debug!("Adding exercise {} ({}) to {}", exercise.id, name, key);
        self.materialize(key).exercises.push(exercise);
        Outcome::Updated
    }

    /// Remove an exercise from a day
    ///
    /// Points earned by a completed exercise are kept.
    pub fn remove_exercise(&mut self, key: DateKey, exercise_id: &str) -> Outcome {
        if self.day_record(key).exercise(exercise_id).is_none() {
            tracing::debug!("Remove ignored: no exercise {} on {}", exercise_id, key);
            return Outcome::Unchanged;
        }

        self.materialize(key)
            .exercises
            .retain(|e| e.id != exercise_id);
        tracing::debug!("Removed exercise {} from {}", exercise_id, key);
        Outcome::Updated
    }

    /// Award the one-time daily bonus once enough exercises are done
    pub fn collect_daily_bonus(&mut self, key: DateKey) -> Outcome {
        if !self.day_record(key).bonus_ready() {
            tracing::debug!("Bonus not collectible on {}", key);
            return Outcome::Unchanged;
        }

        self.materialize(key).bonus_awarded = true;
        self.total_points += BONUS_PER_DAY;
        tracing::info!("Daily bonus collected for {} (+{})", key, BONUS_PER_DAY);
        Outcome::BonusCollected(BONUS_PER_DAY)
    }

    /// Consecutive bonus days ending today, or yesterday if today is not
    /// done yet
    pub fn current_streak(&self, today: DateKey) -> u32 {
        let start = if self.bonus_awarded(today) {
            today
        } else {
            match today.previous() {
                Some(yesterday) if self.bonus_awarded(yesterday) => yesterday,
                _ => return 0,
            }
        };

        let mut streak = 0;
        let mut cursor = Some(start);
        while let Some(key) = cursor.filter(|k| self.bonus_awarded(*k)) {
            streak += 1;
            cursor = key.previous();
        }
        streak
    }
}
