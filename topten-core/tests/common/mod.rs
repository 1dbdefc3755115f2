#![allow(dead_code)]

use chrono::NaiveDate;
use topten_core::models::catalog::{AnswerItem, Catalog, CategoryDefinition};
use topten_core::storage::MemoryStore;
use topten_core::GameService;

/// Initialize tracing for tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn item(name: &str) -> AnswerItem {
    AnswerItem {
        name: name.to_string(),
        hint: None,
    }
}

pub fn hinted_item(name: &str, hint: &str) -> AnswerItem {
    AnswerItem {
        name: name.to_string(),
        hint: Some(hint.to_string()),
    }
}

/// Catalog with a single category, so every date selects it.
pub fn single_catalog(names: &[&str]) -> Catalog {
    Catalog::new(vec![CategoryDefinition {
        id: "daily".to_string(),
        title: "Daily Top Ten".to_string(),
        description: "Category used by the integration tests".to_string(),
        items: names.iter().map(|name| item(name)).collect(),
    }])
    .expect("test catalog is valid")
}

/// Three-category catalog with predictable ids for selector assertions.
pub fn three_catalog() -> Catalog {
    Catalog::new(vec![
        CategoryDefinition {
            id: "c0".to_string(),
            title: "Category Zero".to_string(),
            description: String::new(),
            items: vec![item("Zero")],
        },
        CategoryDefinition {
            id: "c1".to_string(),
            title: "Category One".to_string(),
            description: String::new(),
            items: vec![item("One")],
        },
        CategoryDefinition {
            id: "c2".to_string(),
            title: "Category Two".to_string(),
            description: String::new(),
            items: vec![item("Two")],
        },
    ])
    .expect("test catalog is valid")
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date is valid")
}

/// Game over a single-category catalog, backed by an in-memory store.
pub fn new_game(names: &[&str]) -> GameService<MemoryStore> {
    init_tracing();
    GameService::new(single_catalog(names), MemoryStore::new())
}
