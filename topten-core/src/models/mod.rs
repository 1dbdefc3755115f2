use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod guess;

/// The single mutable record the game persists. Every field defaults so a
/// missing or partially decoded blob falls back to first-run values instead
/// of failing rehydration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    #[serde(default)]
    pub category_id: Option<String>,
    /// Zero-based indices into the current category's items, sorted
    /// ascending and free of duplicates by construction.
    #[serde(default)]
    pub guessed_positions: BTreeSet<usize>,
    /// Raw guess texts in submission order, incorrect guesses included.
    #[serde(default)]
    pub attempts: Vec<String>,
    #[serde(default)]
    pub last_played: Option<NaiveDate>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    #[serde(default)]
    pub total_played: u32,
    #[serde(default)]
    pub total_wins: u32,
    #[serde(default)]
    pub show_hints: bool,
    #[serde(default)]
    pub surrendered: bool,
    /// Date whose completion has already been counted into the lifetime
    /// stats. Completion accounting never runs twice for the same date.
    #[serde(default)]
    pub scored_date: Option<NaiveDate>,
}

/// Lifetime counters for the history screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub total_played: u32,
    pub total_wins: u32,
    pub streak: u32,
    pub best_streak: u32,
}

/// One row of the current category as a renderer sees it. `position` is the
/// 1-based rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedItem {
    pub position: usize,
    pub name: String,
    pub guessed: bool,
}
