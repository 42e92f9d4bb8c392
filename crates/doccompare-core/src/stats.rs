use serde::{Deserialize, Serialize};

/// Change totals accumulated while composing the redline. Matched
/// paragraphs contribute inline segment counts; whole-paragraph inserts
/// and deletes contribute word counts. Always populated, even when
/// everything is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareStatistics {
    pub insertions: usize,
    pub deletions: usize,
    pub moves: usize,
    pub unchanged: usize,
    pub original_paragraphs: usize,
    pub modified_paragraphs: usize,
}

impl CompareStatistics {
    pub fn total_changes(&self) -> usize {
        self.insertions + self.deletions + self.moves
    }

    /// Percent of counted units that changed, in [0, 100].
    pub fn change_percentage(&self) -> f64 {
        let changed = self.total_changes();
        let total = (changed + self.unchanged).max(1);
        100.0 * changed as f64 / total as f64
    }
}
