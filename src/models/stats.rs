use chrono::Local;
use serde::{Deserialize, Serialize};

use super::{Idea, IdeaSource};

/// Capture counts for the insights dashboard.
///
/// Derived on demand from the signed-in user's ideas; never stored.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub voice: usize,
    pub typed: usize,
    /// Ideas captured since local midnight.
    pub today: usize,
}

impl Stats {
    pub fn compute(ideas: &[&Idea]) -> Self {
        let today = Local::now().date_naive();
        Self {
            total: ideas.len(),
            voice: ideas
                .iter()
                .filter(|i| i.source == IdeaSource::Voice)
                .count(),
            typed: ideas
                .iter()
                .filter(|i| i.source == IdeaSource::Typed)
                .count(),
            today: ideas
                .iter()
                .filter(|i| i.created_at.with_timezone(&Local).date_naive() == today)
                .count(),
        }
    }
}
