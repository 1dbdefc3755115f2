pub mod config;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use models::catalog::{AnswerItem, Catalog, CategoryDefinition};
pub use models::guess::GuessOutcome;
pub use models::{GameSession, GameStats, RevealedItem};
pub use services::game_service::{FeedbackSink, GameService};
pub use storage::{FileStore, MemoryStore, StateStore};
