pub mod catalog;
pub mod core;

// Re-export the main types for convenience
pub use catalog::{Catalog, CatalogError};
pub use core::{Category, WordEntry};

/// Read-only word data consumed by a game session.
pub trait WordSource {
    /// Every category, in display order.
    fn all_categories(&self) -> Vec<&Category>;

    fn category_info(&self, name: &str) -> Option<&Category>;

    /// Uniformly random entry of `name`; `None` for unknown or empty categories.
    fn random_word(&self, name: &str) -> Option<WordEntry>;
}
