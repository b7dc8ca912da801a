//! Built-in content: hero exercises, scoring constants and display tables.

use crate::Exercise;

/// Points for completing one exercise
pub const POINTS_PER_EXERCISE: u64 = 10;

/// Points for collecting a day's bonus
pub const BONUS_PER_DAY: u64 = 30;

/// Completed exercises needed before the daily bonus unlocks
pub const BONUS_THRESHOLD: usize = 4;

/// The four default exercises seeded into every day, in display order
pub const HERO_EXERCISES: [&str; 4] = [
    "Jumping Jacks 🏃‍♂️",
    "Bicep Curls 💪",
    "Push Ups 🏋️‍♂️",
    "Sit Ups 🧘‍♂️",
];

/// Weekday names indexed from Sunday
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Day card accent colours, cycled by position in the calendar
pub const DAY_COLORS: [&str; 7] = [
    "#FF6B6B", "#FF9E64", "#FFD93D", "#6BCB77", "#4D96FF", "#9D84B7", "#F473B9",
];

/// Identifier of the hero exercise at `index`
///
/// Hero ids are positional so an unsaved day reads back identically every
/// time and its exercises can be addressed before the day is stored.
pub fn hero_id(index: usize) -> String {
    format!("hero-{}", index + 1)
}

/// Fresh, incomplete copies of the hero exercises
pub fn hero_exercises() -> Vec<Exercise> {
    HERO_EXERCISES
        .iter()
        .enumerate()
        .map(|(i, name)| Exercise {
            id: hero_id(i),
            name: (*name).to_string(),
            completed: false,
            is_hero: true,
        })
        .collect()
}

pub fn accent_color(position: usize) -> &'static str {
    DAY_COLORS[position % DAY_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hero_exercises_are_unique_and_incomplete() {
        let heroes = hero_exercises();
        assert_eq!(heroes.len(), 4);
        assert!(heroes.iter().all(|e| e.is_hero && !e.completed));

        let ids: HashSet<_> = heroes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), heroes.len());
        assert_eq!(heroes[0].name, "Jumping Jacks 🏃‍♂️");
    }

    #[test]
    fn test_accent_color_cycles_weekly() {
        assert_eq!(accent_color(0), "#FF6B6B");
        assert_eq!(accent_color(6), "#F473B9");
        assert_eq!(accent_color(7), accent_color(0));
    }
}
