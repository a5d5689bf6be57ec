use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use thiserror::Error;

use super::{Category, WordEntry, WordSource};

static CATEGORY_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/categories/data");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to deserialize category data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("category `{0}` has no words")]
    EmptyCategory(String),

    #[error("category `{category}` contains `{word}`, words must be letters only")]
    InvalidWord { category: String, word: String },

    #[error("category `{0}` is defined more than once")]
    DuplicateCategory(String),
}

/// Categories keyed by unique name, sorted for display.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Self { categories }
    }

    /// Categories embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        let categories = CATEGORY_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .map(|f| serde_json::from_slice::<Category>(f.contents()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::validated(categories)
    }

    /// A JSON array of categories, e.g. a user-provided word list.
    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(data)?;
        Self::validated(categories)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    fn validated(categories: Vec<Category>) -> Result<Self, CatalogError> {
        if let Some(dup) = categories.iter().map(|c| &c.name).duplicates().next() {
            return Err(CatalogError::DuplicateCategory(dup.clone()));
        }

        let categories = categories
            .into_iter()
            .map(normalize_category)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(categories))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn normalize_category(mut category: Category) -> Result<Category, CatalogError> {
    if category.words.is_empty() {
        return Err(CatalogError::EmptyCategory(category.name));
    }

    for entry in &mut category.words {
        let word = entry.word.trim().to_uppercase();
        if word.is_empty() || !word.chars().all(char::is_alphabetic) {
            return Err(CatalogError::InvalidWord {
                category: category.name.clone(),
                word: entry.word.clone(),
            });
        }
        entry.word = word;
    }

    Ok(category)
}

impl WordSource for Catalog {
    fn all_categories(&self) -> Vec<&Category> {
        self.categories.iter().collect()
    }

    fn category_info(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn random_word(&self, name: &str) -> Option<WordEntry> {
        let mut rng = rand::thread_rng();
        self.category_info(name)?.words.choose(&mut rng).cloned()
    }
}
