//! Day card view model consumed by the presentation layer.

use crate::calendar::DayLabel;
use crate::catalog::{accent_color, BONUS_THRESHOLD};
use crate::{DateKey, Exercise, Ledger};
use chrono::Datelike;

/// State of a day's bonus button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusState {
    /// Already collected
    Collected,
    /// Enough exercises done; can be collected now
    Ready,
    /// Not enough exercises done yet
    Locked,
}

/// Everything needed to render one day card
#[derive(Clone, Debug)]
pub struct DayView {
    pub key: DateKey,
    pub label: DayLabel,
    pub accent: &'static str,
    pub exercises: Vec<Exercise>,
    pub completed_count: usize,
    pub bonus: BonusState,
    pub is_today: bool,
}

impl DayView {
    /// Build the card for `key`; the accent colour follows the day's
    /// position in its year
    pub fn build(ledger: &Ledger, key: DateKey, today: DateKey) -> Self {
        let day = ledger.day_record(key);
        let completed_count = day.completed_count();
        let bonus = if day.bonus_awarded {
            BonusState::Collected
        } else if completed_count >= BONUS_THRESHOLD {
            BonusState::Ready
        } else {
            BonusState::Locked
        };

        Self {
            key,
            label: DayLabel::for_key(key),
            accent: accent_color(key.date().ordinal0() as usize),
            exercises: day.into_owned().exercises,
            completed_count,
            bonus,
            is_today: key == today,
        }
    }

    /// Resolve a user reference to an exercise id
    ///
    /// Accepts either an exercise id or a 1-based position on the card.
    pub fn resolve_exercise(&self, reference: &str) -> Option<&str> {
        let reference = reference.trim();
        if let Some(exercise) = self.exercises.iter().find(|e| e.id == reference) {
            return Some(&exercise.id);
        }
        reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.exercises.get(i))
            .map(|e| e.id.as_str())
    }
}
