use anyhow::Result;
use chrono::NaiveDate;

use crate::models::catalog::{Catalog, CategoryDefinition};
use crate::models::guess::GuessOutcome;
use crate::models::{GameSession, GameStats, RevealedItem};
use crate::storage::StateStore;
use crate::utils::similarity;
use crate::utils::text::normalize;
use crate::utils::time::{date_key, today_utc};

// Similarity threshold for close matches (50%)
const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Cosmetic side channel fired on correct guesses (haptics, sounds). Errors
/// are logged and dropped; the sink can never affect game state.
pub trait FeedbackSink: Send + Sync {
    fn correct_guess(&self, position: usize) -> Result<()>;
}

/// The daily game session: owns the catalog, the mutable session record and
/// the persistence handle. One logical owner mutates it; every mutating
/// operation writes the session through to the store.
pub struct GameService<S: StateStore> {
    catalog: Catalog,
    store: S,
    session: GameSession,
    feedback: Option<Box<dyn FeedbackSink>>,
}

impl<S: StateStore> GameService<S> {
    /// Fresh service with first-run state. Use [`GameService::load`] to
    /// rehydrate a persisted session.
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            catalog,
            store,
            session: GameSession::default(),
            feedback: None,
        }
    }

    /// Rehydrates the session from the store. A missing, unreadable or
    /// malformed blob means a first run, never an error.
    pub async fn load(catalog: Catalog, store: S) -> Self {
        let session = match store.load().await {
            Ok(Some(blob)) => match serde_json::from_str::<GameSession>(&blob) {
                Ok(session) => session,
                Err(err) => {
                    tracing::warn!("Persisted game state is malformed, starting fresh: {}", err);
                    GameSession::default()
                }
            },
            Ok(None) => GameSession::default(),
            Err(err) => {
                tracing::warn!("Failed to read persisted game state, starting fresh: {}", err);
                GameSession::default()
            }
        };

        let mut service = Self {
            catalog,
            store,
            session,
            feedback: None,
        };
        service.sanitize_loaded_session();
        service
    }

    pub fn with_feedback(mut self, sink: Box<dyn FeedbackSink>) -> Self {
        self.feedback = Some(sink);
        self
    }

    /// Drops puzzle-day state that no longer lines up with the catalog, so
    /// the next initialize reselects instead of resuming a phantom category.
    fn sanitize_loaded_session(&mut self) {
        let consistent = match self.session.category_id.as_deref() {
            None => {
                self.session.guessed_positions.is_empty() && self.session.attempts.is_empty()
            }
            Some(id) => match self.catalog.by_id(id) {
                Some(category) => self
                    .session
                    .guessed_positions
                    .iter()
                    .all(|&position| position < category.items.len()),
                None => false,
            },
        };

        if !consistent {
            tracing::warn!("Persisted puzzle state does not match the catalog, clearing it");
            self.session.category_id = None;
            self.session.guessed_positions.clear();
            self.session.attempts.clear();
            self.session.surrendered = false;
            self.session.last_played = None;
        }
    }

    /// Safe to call on every app start and foreground. Rolls the session
    /// over to a fresh puzzle when the calendar date changed; same-day calls
    /// are no-ops that preserve in-progress state.
    pub async fn initialize(&mut self, today: NaiveDate) {
        if self.session.last_played == Some(today) {
            return;
        }

        let category = self.catalog.select_for_date(today);
        tracing::info!("Starting puzzle {} for {}", category.id, date_key(today));

        self.session.category_id = Some(category.id.clone());
        self.session.guessed_positions.clear();
        self.session.attempts.clear();
        self.session.surrendered = false;
        self.session.last_played = Some(today);
        self.persist().await;
    }

    /// [`GameService::initialize`] against the current UTC calendar date,
    /// for callers that do not inject their own clock.
    pub async fn initialize_today(&mut self) {
        self.initialize(today_utc()).await;
    }

    /// Resolves one free-text guess. Total over its domain: inactive or
    /// surrendered sessions and duplicate attempts come back as `Miss`
    /// without side effects.
    pub async fn make_guess(&mut self, raw_text: &str) -> GuessOutcome {
        let category = match self.current_category() {
            Some(category) if !self.session.surrendered => category.clone(),
            _ => return GuessOutcome::Miss,
        };

        let normalized = normalize(raw_text);

        // Duplicates are matched on normalized text alone, so re-submitting
        // an already-correct answer is rejected here as well.
        if self
            .session
            .attempts
            .iter()
            .any(|attempt| normalize(attempt) == normalized)
        {
            tracing::debug!("Duplicate guess ignored: {}", raw_text);
            return GuessOutcome::Miss;
        }

        self.session.attempts.push(raw_text.to_string());

        for (index, item) in category.items.iter().enumerate() {
            if normalize(&item.name) == normalized {
                if self.session.guessed_positions.insert(index) {
                    tracing::debug!("Correct guess at position {}: {}", index + 1, item.name);
                    self.notify_correct(index + 1);
                    if self.session.guessed_positions.len() == category.items.len() {
                        self.apply_completion();
                    }
                    self.persist().await;
                    return GuessOutcome::Correct {
                        position: index + 1,
                    };
                }
                // Position already guessed: keep scanning, which ends in the
                // close-match fallback like any other non-hit.
            }
        }

        let names: Vec<String> = category
            .items
            .iter()
            .map(|item| normalize(&item.name))
            .collect();
        if let Some(best) = similarity::find_best_match(&normalized, &names) {
            if best.score >= SIMILARITY_THRESHOLD {
                let matched_with = category.items[best.index].name.clone();
                tracing::debug!(
                    "Close match for {}: {} (score {:.2})",
                    raw_text,
                    matched_with,
                    best.score
                );
                self.persist().await;
                return GuessOutcome::CloseMatch { matched_with };
            }
        }

        self.persist().await;
        GuessOutcome::Miss
    }

    /// Flips the hint display preference. Survives day rollovers.
    pub async fn toggle_hints(&mut self) {
        self.session.show_hints = !self.session.show_hints;
        self.persist().await;
    }

    /// Concedes today's puzzle. Flag flip and completion accounting happen
    /// in one step; calling it when the day is already over does nothing.
    pub async fn give_up(&mut self) {
        if self.current_category().is_none() || self.is_game_completed() {
            return;
        }

        let (guessed, total) = self.progress();
        tracing::info!("Player surrendered with {} of {} guessed", guessed, total);

        self.session.surrendered = true;
        self.apply_completion();
        self.persist().await;
    }

    /// Scores the finished day into the lifetime counters. Guarded: runs
    /// only when the day is complete and not yet counted, so completion
    /// watchers may call it freely.
    pub async fn complete_game(&mut self) {
        if !self.is_game_completed() {
            return;
        }
        self.apply_completion();
        self.persist().await;
    }

    /// True once every item is guessed or the player surrendered. Pure.
    pub fn is_game_completed(&self) -> bool {
        match self.current_category() {
            Some(category) => {
                self.session.guessed_positions.len() == category.items.len()
                    || self.session.surrendered
            }
            None => false,
        }
    }

    /// Replays today's category from scratch. The calendar day and lifetime
    /// counters stay put; the replayed day can be scored again once finished.
    pub async fn reset_game(&mut self) {
        self.session.guessed_positions.clear();
        self.session.attempts.clear();
        self.session.surrendered = false;
        self.session.scored_date = None;
        self.persist().await;
    }

    pub fn current_category(&self) -> Option<&CategoryDefinition> {
        self.session
            .category_id
            .as_deref()
            .and_then(|id| self.catalog.by_id(id))
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn show_hints(&self) -> bool {
        self.session.show_hints
    }

    /// (guessed, total) for the current category; (0, 0) before the first
    /// initialize.
    pub fn progress(&self) -> (usize, usize) {
        match self.current_category() {
            Some(category) => (
                self.session.guessed_positions.len(),
                category.items.len(),
            ),
            None => (0, 0),
        }
    }

    /// Share of attempts that hit, as a rounded percentage.
    pub fn accuracy(&self) -> u32 {
        if self.session.attempts.is_empty() {
            return 0;
        }
        let correct = self.session.guessed_positions.len() as f64;
        let attempts = self.session.attempts.len() as f64;
        (correct / attempts * 100.0).round() as u32
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            total_played: self.session.total_played,
            total_wins: self.session.total_wins,
            streak: self.session.streak,
            best_streak: self.session.best_streak,
        }
    }

    /// Hint text for a not-yet-guessed position, honoring the hint
    /// preference. `position` is 1-based like `GuessOutcome::Correct`.
    pub fn hint_for(&self, position: usize) -> Option<&str> {
        if !self.session.show_hints || position == 0 {
            return None;
        }
        let category = self.current_category()?;
        let index = position - 1;
        if self.session.guessed_positions.contains(&index) {
            return None;
        }
        category.items.get(index)?.hint.as_deref()
    }

    /// Category rows with their guessed flags, in ranking order.
    pub fn revealed_items(&self) -> Vec<RevealedItem> {
        let Some(category) = self.current_category() else {
            return Vec::new();
        };
        category
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| RevealedItem {
                position: index + 1,
                name: item.name.clone(),
                guessed: self.session.guessed_positions.contains(&index),
            })
            .collect()
    }

    /// Shareable summary of today's result. `None` before initialization.
    pub fn share_message(&self, today: NaiveDate) -> Option<String> {
        let category = self.current_category()?;
        let guessed = self.session.guessed_positions.len();
        let total = category.items.len();

        let mut message = format!(
            "🎮 Top 10 Daily Challenge - {}\n📊 {}\n✅ {}/{} correct\n🎯 {}% accuracy\n🔢 {} guesses\n",
            today.format("%b %-d, %Y"),
            category.title,
            guessed,
            total,
            self.accuracy(),
            self.session.attempts.len(),
        );
        if self.session.surrendered {
            message.push_str("🏳️ Gave up\n");
        }
        message.push_str("\nPlay Top 10 Daily Challenge!");
        Some(message)
    }

    /// Lifetime accounting for the day being completed. The scored-date
    /// guard makes this idempotent per calendar day regardless of whether
    /// the final guess, a give-up, or an external watcher triggers it.
    fn apply_completion(&mut self) {
        let Some(played) = self.session.last_played else {
            return;
        };
        if self.session.scored_date == Some(played) {
            return;
        }
        let total = match self.current_category() {
            Some(category) => category.items.len(),
            None => return,
        };

        let is_win =
            self.session.guessed_positions.len() == total && !self.session.surrendered;

        self.session.total_played += 1;
        if is_win {
            self.session.total_wins += 1;
            self.session.streak += 1;
        } else {
            self.session.streak = 0;
        }
        self.session.best_streak = self.session.best_streak.max(self.session.streak);
        self.session.scored_date = Some(played);

        tracing::info!(
            "Day {} scored: win={}, streak={}, best_streak={}",
            date_key(played),
            is_win,
            self.session.streak,
            self.session.best_streak
        );
    }

    fn notify_correct(&self, position: usize) {
        if let Some(sink) = &self.feedback {
            if let Err(err) = sink.correct_guess(position) {
                tracing::debug!("Feedback sink unavailable: {}", err);
            }
        }
    }

    /// Write-through after a mutation. Durability is best-effort: a failed
    /// write is logged and the in-memory session stays authoritative.
    async fn persist(&self) {
        let blob = match serde_json::to_string(&self.session) {
            Ok(blob) => blob,
            Err(err) => {
                tracing::warn!("Failed to serialize game state: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.save(&blob).await {
            tracing::warn!("Failed to persist game state: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::AnswerItem;
    use crate::storage::MemoryStore;

    fn single_category(names: &[&str]) -> Catalog {
        Catalog::new(vec![CategoryDefinition {
            id: "daily".to_string(),
            title: "Daily Top Ten".to_string(),
            description: "Test category".to_string(),
            items: names
                .iter()
                .map(|name| AnswerItem {
                    name: name.to_string(),
                    hint: None,
                })
                .collect(),
        }])
        .expect("test catalog is valid")
    }

    fn day(ordinal: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, ordinal).unwrap()
    }

    #[test]
    fn accuracy_rounds_to_whole_percent() {
        tokio_test::block_on(async {
            let mut game =
                GameService::new(single_category(&["Alpha", "Beta", "Gamma"]), MemoryStore::new());
            game.initialize(day(1)).await;

            game.make_guess("Alpha").await;
            game.make_guess("wrong one").await;
            game.make_guess("also wrong").await;
            assert_eq!(game.accuracy(), 33);

            game.make_guess("Beta").await;
            assert_eq!(game.accuracy(), 50);
        });
    }

    #[test]
    fn completion_accounting_runs_once_per_day() {
        tokio_test::block_on(async {
            let mut game = GameService::new(single_category(&["Only"]), MemoryStore::new());
            game.initialize(day(1)).await;

            assert_eq!(game.make_guess("Only").await, GuessOutcome::Correct { position: 1 });
            assert!(game.is_game_completed());
            assert_eq!(game.stats().total_played, 1);

            game.complete_game().await;
            game.complete_game().await;
            assert_eq!(game.stats().total_played, 1);
            assert_eq!(game.stats().streak, 1);
        });
    }

    #[test]
    fn share_message_matches_result() {
        tokio_test::block_on(async {
            let mut game = GameService::new(single_category(&["Alpha", "Beta"]), MemoryStore::new());
            game.initialize(day(5)).await;
            game.make_guess("Alpha").await;
            game.give_up().await;

            let message = game.share_message(day(5)).unwrap();
            assert!(message.contains("Jan 5, 2024"));
            assert!(message.contains("Daily Top Ten"));
            assert!(message.contains("1/2 correct"));
            assert!(message.contains("100% accuracy"));
            assert!(message.contains("1 guesses"));
            assert!(message.contains("Gave up"));
        });
    }

    #[test]
    fn feedback_sink_errors_are_swallowed() {
        struct FailingSink;
        impl FeedbackSink for FailingSink {
            fn correct_guess(&self, _position: usize) -> Result<()> {
                anyhow::bail!("haptics not available")
            }
        }

        tokio_test::block_on(async {
            let mut game = GameService::new(single_category(&["Alpha"]), MemoryStore::new())
                .with_feedback(Box::new(FailingSink));
            game.initialize(day(1)).await;
            assert_eq!(game.make_guess("Alpha").await, GuessOutcome::Correct { position: 1 });
        });
    }
}
