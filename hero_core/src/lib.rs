#![forbid(unsafe_code)]

//! Core domain model and state management for Hero Exercises.
//!
//! This crate provides:
//! - Domain types (exercises, day records, date keys)
//! - The workout ledger (points, daily bonus, streak)
//! - Calendar generation and day view models
//! - Share messages for the SMS handoff
//! - Persistence (JSON blob stores) and the load/save lifecycle

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod calendar;
pub mod ledger;
pub mod view;
pub mod share;
pub mod store;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use calendar::{CalendarYear, DayLabel};
pub use config::Config;
pub use ledger::{Ledger, Outcome};
pub use view::{BonusState, DayView};
pub use store::{JsonFileStore, LedgerStore, MemoryStore};
pub use tracker::Tracker;
