use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::config::Config;
use crate::utils::time::date_key;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// One daily puzzle: an ordered Top-N list. Item order defines ranking
/// positions 1..N.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryDefinition {
    #[validate(length(min = 1, message = "Category id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "Category title must not be empty"))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1, message = "Category must have at least one item"))]
    pub items: Vec<AnswerItem>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog must contain at least one category")]
    Empty,
    #[error("invalid category {id}: {source}")]
    InvalidCategory {
        id: String,
        source: validator::ValidationErrors,
    },
    #[error("duplicate category id: {0}")]
    DuplicateId(String),
}

/// Immutable, ordered collection of puzzle definitions, loaded once at
/// startup and validated on construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<CategoryDefinition>,
}

impl Catalog {
    pub fn new(categories: Vec<CategoryDefinition>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &categories {
            category
                .validate()
                .map_err(|source| CatalogError::InvalidCategory {
                    id: category.id.clone(),
                    source,
                })?;
            if !seen.insert(category.id.clone()) {
                return Err(CatalogError::DuplicateId(category.id.clone()));
            }
        }

        Ok(Self { categories })
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let categories: Vec<CategoryDefinition> =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        Ok(Self::new(categories)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file {}", path.as_ref().display()))?;
        Self::from_json(&json)
    }

    /// Built-in catalog unless the configuration points at a JSON file.
    pub fn load(config: &Config) -> anyhow::Result<Self> {
        match &config.catalog_path {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path.display());
                Self::from_json_file(path)
            }
            None => Ok(Self::builtin()),
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn by_id(&self, id: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Maps a calendar date onto exactly one catalog entry, identically on
    /// every device: sum the character codes of the `YYYY-MM-DD` key, take
    /// the sum modulo the catalog length. Dates whose character codes sum to
    /// the same value land on the same entry.
    pub fn select_for_date(&self, date: NaiveDate) -> &CategoryDefinition {
        let key = date_key(date);
        let hash: u32 = key.chars().map(|c| c as u32).sum();
        let index = hash as usize % self.categories.len();
        &self.categories[index]
    }

    /// The catalog the game ships with.
    pub fn builtin() -> Self {
        let categories = vec![
            CategoryDefinition {
                id: "movies-2023".to_string(),
                title: "Highest Grossing Movies of 2023".to_string(),
                description: "Can you name the top 10 highest-grossing films released in 2023?"
                    .to_string(),
                items: vec![
                    item("Barbie", "Plastic fantastic"),
                    item("The Super Mario Bros. Movie", "Plumbers and princesses"),
                    item("Oppenheimer", "Atomic scientist biopic"),
                    item(
                        "Spider-Man: Across the Spider-Verse",
                        "Animated multiverse adventure",
                    ),
                    item("Guardians of the Galaxy Vol. 3", "Marvel space misfits"),
                    item("Fast X", "10th in a racing franchise"),
                    item("The Little Mermaid", "Disney live-action remake"),
                    item(
                        "Mission: Impossible – Dead Reckoning Part One",
                        "Tom Cruise action sequel",
                    ),
                    item("Ant-Man and the Wasp: Quantumania", "Tiny Marvel heroes"),
                    item("John Wick: Chapter 4", "Legendary hitman"),
                ],
            },
            CategoryDefinition {
                id: "countries-population".to_string(),
                title: "Most Populous Countries".to_string(),
                description: "Can you name the 10 most populous countries in the world?"
                    .to_string(),
                items: vec![
                    item("China", "East Asian country with the Great Wall"),
                    item("India", "South Asian country with the Taj Mahal"),
                    item(
                        "United States",
                        "North American country with the Statue of Liberty",
                    ),
                    item("Indonesia", "Southeast Asian archipelago"),
                    item("Pakistan", "South Asian country bordering India"),
                    item("Nigeria", "Most populous African country"),
                    item("Brazil", "Largest South American country"),
                    item("Bangladesh", "South Asian country east of India"),
                    item("Russia", "Largest country by area"),
                    item("Mexico", "North American country south of the US"),
                ],
            },
            CategoryDefinition {
                id: "apps-downloads".to_string(),
                title: "Most Downloaded Mobile Apps".to_string(),
                description: "Can you name the 10 most downloaded mobile apps worldwide?"
                    .to_string(),
                items: vec![
                    item("TikTok", "Short-form video platform"),
                    item("Instagram", "Photo and video sharing"),
                    item("Facebook", "Social network with blue logo"),
                    item("WhatsApp", "Messaging app owned by Meta"),
                    item("Telegram", "Cloud-based messaging app"),
                    item("Snapchat", "Disappearing messages and stories"),
                    item("Spotify", "Music streaming service"),
                    item("Netflix", "Video streaming platform"),
                    item("Zoom", "Video conferencing app"),
                    item("YouTube", "Video sharing platform"),
                ],
            },
        ];

        Self::new(categories).expect("built-in catalog is valid")
    }
}

fn item(name: &str, hint: &str) -> AnswerItem {
    AnswerItem {
        name: name.to_string(),
        hint: Some(hint.to_string()),
    }
}
