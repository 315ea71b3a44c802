use super::model::{Category, Dataset, STATUS_COLUMN};

// ---------------------------------------------------------------------------
// Summary statistics over one dataset
// ---------------------------------------------------------------------------

/// Outcome counts for a dataset.
///
/// `accept + reject == total`. A status outside the four known labels counts
/// as accepted without landing in any sub-category, so
/// `oral + spotlight + poster <= accept`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub total: usize,
    pub accept: usize,
    pub reject: usize,
    pub oral: usize,
    pub spotlight: usize,
    pub poster: usize,
}

impl SummaryStats {
    /// Count every row of `dataset`. Pure; calling twice gives equal results.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut stats = SummaryStats {
            total: dataset.len(),
            ..Default::default()
        };

        for row in &dataset.rows {
            match Category::from_status(row.get_or_empty(STATUS_COLUMN)) {
                Some(Category::Reject) => stats.reject += 1,
                Some(Category::Oral) => {
                    stats.accept += 1;
                    stats.oral += 1;
                }
                Some(Category::Spotlight) => {
                    stats.accept += 1;
                    stats.spotlight += 1;
                }
                Some(Category::Poster) => {
                    stats.accept += 1;
                    stats.poster += 1;
                }
                None => stats.accept += 1,
            }
        }

        stats
    }

    /// Bar height for one category in the distribution chart.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Oral => self.oral,
            Category::Spotlight => self.spotlight,
            Category::Poster => self.poster,
            Category::Reject => self.reject,
        }
    }

    /// Accepted rows not attributed to oral, spotlight or poster.
    pub fn uncategorized(&self) -> usize {
        self.accept - (self.oral + self.spotlight + self.poster)
    }

    /// Acceptance rate as a percentage with one decimal, `"0.0"` when empty.
    pub fn accept_rate(&self) -> String {
        percentage(self.accept, self.total)
    }

    pub fn reject_rate(&self) -> String {
        percentage(self.reject, self.total)
    }
}

fn percentage(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", part as f64 / total as f64 * 100.0)
}
