//! Core domain types for Hero Exercises.
//!
//! This module defines the fundamental types used throughout the system:
//! - Date keys (canonical `YYYY-MM-DD` day identifiers)
//! - Exercises and day records
//! - The persisted ledger snapshot

use crate::{Error, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Date Keys
// ============================================================================

/// Canonical identifier for a calendar day
///
/// Always renders as zero-padded `YYYY-MM-DD`. Parsing is strict: any string
/// that does not round-trip to the same text is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    const FORMAT: &'static str = "%Y-%m-%d";

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month and day, if that day exists
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn parse(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s, Self::FORMAT)
            .map_err(|_| Error::InvalidDateKey(s.to_string()))?;
        let key = Self(date);
        if key.to_string() != s {
            return Err(Error::InvalidDateKey(s.to_string()));
        }
        Ok(key)
    }

    /// Today's key according to the local clock
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The day before, or `None` at the start of chrono's range
    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn next(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

// ============================================================================
// Exercises and Days
// ============================================================================

/// A single exercise on a day card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    /// True for the four default exercises seeded into every day
    #[serde(default)]
    pub is_hero: bool,
}

/// Everything recorded for one calendar day
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Display order is insertion order
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub bonus_awarded: bool,
}

impl DayRecord {
    /// A fresh day: the hero exercises, none completed, no bonus
    pub fn with_hero_exercises() -> Self {
        Self {
            exercises: crate::catalog::hero_exercises(),
            bonus_awarded: false,
        }
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.completed).count()
    }

    /// Whether the daily bonus could be collected right now
    pub fn bonus_ready(&self) -> bool {
        !self.bonus_awarded && self.completed_count() >= crate::catalog::BONUS_THRESHOLD
    }
}

// ============================================================================
// Persisted Snapshot
// ============================================================================

/// The persisted blob: every materialized day plus the running point total
///
/// Field names match the browser storage format
/// (`{"workouts": {...}, "totalPoints": n}`). Day keys stay as plain strings
/// here so a single bad key cannot make the whole blob unreadable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub workouts: BTreeMap<String, DayRecord>,
    #[serde(default)]
    pub total_points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_display_is_zero_padded() {
        let key = DateKey::from_ymd(2026, 3, 1).unwrap();
        assert_eq!(key.to_string(), "2026-03-01");
    }

    #[test]
    fn test_date_key_parse_is_strict() {
        assert!(DateKey::parse("2026-03-01").is_ok());
        assert!(DateKey::parse("2026-3-1").is_err());
        assert!(DateKey::parse("2026-02-30").is_err());
        assert!(DateKey::parse("2026/03/01").is_err());
        assert!(DateKey::parse(" 2026-03-01").is_err());
        assert!(DateKey::parse("").is_err());
    }

    #[test]
    fn test_date_key_neighbours_cross_year() {
        let key = DateKey::parse("2026-01-01").unwrap();
        assert_eq!(key.previous().unwrap().to_string(), "2025-12-31");
        assert_eq!(key.previous().unwrap().next().unwrap(), key);
    }

    #[test]
    fn test_date_key_serializes_as_string() {
        let key = DateKey::parse("2026-12-31").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-12-31\"");
        let parsed: DateKey = serde_json::from_str("\"2026-12-31\"").unwrap();
        assert_eq!(parsed, key);
        assert!(serde_json::from_str::<DateKey>("\"31-12-2026\"").is_err());
    }

    #[test]
    fn test_day_record_reads_browser_format() {
        let json = r#"{
            "exercises": [
                {"id": "a", "name": "Push Ups", "completed": true, "isHero": true},
                {"id": "b", "name": "Cartwheels", "completed": false}
            ]
        }"#;
        let day: DayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(day.exercises.len(), 2);
        assert!(day.exercises[0].is_hero);
        assert!(!day.exercises[1].is_hero);
        assert!(!day.bonus_awarded);
        assert_eq!(day.completed_count(), 1);
    }

    #[test]
    fn test_snapshot_uses_camel_case_fields() {
        let mut snapshot = LedgerSnapshot::default();
        snapshot.total_points = 40;
        snapshot
            .workouts
            .insert("2026-03-01".into(), DayRecord::with_hero_exercises());

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["totalPoints"], 40);
        assert_eq!(value["workouts"]["2026-03-01"]["bonusAwarded"], false);
        assert_eq!(
            value["workouts"]["2026-03-01"]["exercises"][0]["isHero"],
            true
        );
    }
}
