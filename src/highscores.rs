//! High score leaderboard system
//!
//! Fixed table of the top 10 scores, best first. Unused slots hold
//! `HIGH_SCORE_EMPTY`. Stored through a [`ScoreStore`] as an opaque blob.

use serde::{Deserialize, Serialize};

use crate::consts::{HIGH_SCORE_EMPTY, NUM_HIGH_SCORES, PERSIST_KEY_HIGH_SCORES};
use crate::persistence::{PersistError, ScoreStore};

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    slots: [i32; NUM_HIGH_SCORES],
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            slots: [HIGH_SCORE_EMPTY; NUM_HIGH_SCORES],
        }
    }

    /// Build from raw slots, e.g. as read back from storage
    ///
    /// Negative values are treated as empty. The table is re-sorted so a
    /// hand-edited blob cannot break the ordering.
    pub fn from_slots(raw: [i32; NUM_HIGH_SCORES]) -> Self {
        let mut table = Self::new();
        let mut scores: Vec<i32> = raw.into_iter().filter(|&s| s >= 0).collect();
        scores.sort_by(|a, b| b.cmp(a));
        for (slot, score) in table.slots.iter_mut().zip(scores) {
            *slot = score;
        }
        table
    }

    /// Raw slot values, `HIGH_SCORE_EMPTY` for unused
    pub fn slots(&self) -> &[i32; NUM_HIGH_SCORES] {
        &self.slots
    }

    /// Slots as options, best first
    pub fn rows(&self) -> [Option<u32>; NUM_HIGH_SCORES] {
        std::array::from_fn(|i| u32::try_from(self.slots[i]).ok())
    }

    /// Index a score would be inserted at (0-based), `None` if it misses
    fn insert_position(&self, score: i32) -> Option<usize> {
        self.slots
            .iter()
            .position(|&s| s == HIGH_SCORE_EMPTY || score > s)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        let score = i32::try_from(score).ok()?;
        self.insert_position(score).map(|i| i + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    ///
    /// Equal scores go below existing ones, so whoever got there first keeps
    /// the higher row. Returns the rank achieved (1-indexed).
    pub fn insert(&mut self, score: u32) -> Option<usize> {
        let score = i32::try_from(score).ok()?;
        let pos = self.insert_position(score)?;
        self.slots.copy_within(pos..NUM_HIGH_SCORES - 1, pos + 1);
        self.slots[pos] = score;
        Some(pos + 1)
    }

    /// Number of used slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|&&s| s != HIGH_SCORE_EMPTY).count()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.slots[0] == HIGH_SCORE_EMPTY
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.rows()[0]
    }

    /// Load the table, falling back to an empty one on any failure
    pub fn load(store: &dyn ScoreStore) -> Self {
        match Self::try_load(store) {
            Ok(Some(scores)) => {
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not load high scores ({}), starting fresh", e);
                Self::new()
            }
        }
    }

    fn try_load(store: &dyn ScoreStore) -> Result<Option<Self>, PersistError> {
        let Some(bytes) = store.read(PERSIST_KEY_HIGH_SCORES)? else {
            return Ok(None);
        };
        let raw: [i32; NUM_HIGH_SCORES] =
            serde_json::from_slice(&bytes).map_err(|e| PersistError::Corrupt(e.to_string()))?;
        Ok(Some(Self::from_slots(raw)))
    }

    /// Write the table back to storage
    pub fn save(&self, store: &mut dyn ScoreStore) -> Result<(), PersistError> {
        let bytes =
            serde_json::to_vec(&self.slots).map_err(|e| PersistError::Corrupt(e.to_string()))?;
        store.write(PERSIST_KEY_HIGH_SCORES, &bytes)?;
        log::info!("High scores saved ({} entries)", self.len());
        Ok(())
    }
}
