use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::categories::WordSource;
use crate::storage::{self, KeyValueStore};
use crate::util::{percent, round_div};

/// Storage key of the per-category score map.
pub const SCORES_KEY: &str = "hangmanScores";

/// Aggregate results for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_points: u64,
    pub games_played: u64,
    pub games_won: u64,
    pub average_score: u64,
}

impl CategoryStats {
    /// Fold one finished round into the aggregate.
    pub fn record(&mut self, points: u32, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
        self.total_points = self.total_points.saturating_add(u64::from(points));
        self.average_score = round_div(self.total_points, self.games_played).unwrap_or(0);
    }

    pub fn win_rate(&self) -> u64 {
        percent(self.games_won, self.games_played)
    }
}

/// Category name to stats, as persisted under [`SCORES_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    categories: BTreeMap<String, CategoryStats>,
}

/// A display row: category identity plus its (possibly zeroed) stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRow {
    pub icon: String,
    pub category: String,
    pub stats: CategoryStats,
}

impl ScoreBoard {
    pub fn record(&mut self, category: &str, points: u32, won: bool) -> CategoryStats {
        let entry = self.categories.entry(category.to_string()).or_default();
        entry.record(points, won);
        *entry
    }

    pub fn get(&self, category: &str) -> Option<&CategoryStats> {
        self.categories.get(category)
    }

    pub fn category_points(&self, category: &str) -> u64 {
        self.get(category).map_or(0, |s| s.total_points)
    }

    pub fn total_points(&self) -> u64 {
        self.categories.values().map(|s| s.total_points).sum()
    }

    /// Rounded percentage of won games, 0 for unplayed categories.
    pub fn win_rate(&self, category: &str) -> u64 {
        self.get(category).map_or(0, CategoryStats::win_rate)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// One row per known category, zeroed where nothing was played yet.
    pub fn rows(&self, source: &dyn WordSource) -> Vec<StatsRow> {
        source
            .all_categories()
            .into_iter()
            .map(|c| StatsRow {
                icon: c.icon.clone(),
                category: c.name.clone(),
                stats: self.get(&c.name).copied().unwrap_or_default(),
            })
            .collect()
    }
}

/// Reads and writes the [`ScoreBoard`] through a key-value store.
pub struct ScoreStore {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for ScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreStore").finish_non_exhaustive()
    }
}

impl ScoreStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> storage::Result<ScoreBoard> {
        Ok(storage::read_json(self.store.as_ref(), SCORES_KEY)?.unwrap_or_default())
    }

    pub fn save(&mut self, board: &ScoreBoard) -> storage::Result<()> {
        storage::write_json(self.store.as_mut(), SCORES_KEY, board)
    }

    /// Read-modify-write of a single category's stats.
    pub fn record_result(
        &mut self,
        category: &str,
        points: u32,
        won: bool,
    ) -> storage::Result<CategoryStats> {
        let mut board = self.load()?;
        let updated = board.record(category, points, won);
        self.save(&board)?;
        tracing::info!(
            category,
            points,
            won,
            games_played = updated.games_played,
            average = updated.average_score,
            "recorded round result"
        );
        Ok(updated)
    }

    /// Drop every category's stats at once.
    pub fn clear(&mut self) -> storage::Result<()> {
        self.store.remove(SCORES_KEY)
    }
}
