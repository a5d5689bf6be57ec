use serde::{Deserialize, Serialize};

/// A secret word together with the hint shown on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            hint: hint.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub icon: String,
    pub words: Vec<WordEntry>,
}

impl Category {
    /// Icon and name as shown on a category button.
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}
