use std::collections::HashSet;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::assist::Assist;
use crate::models::{Category, CategoryFilter, Idea, IdeaSource, Stats, UpdateIdeaInput};
use crate::store::{keys, KvStore};

use super::App;

impl<S: KvStore, A: Assist> App<S, A> {
    /// Captures a new idea at the front of the collection.
    ///
    /// Enrichment is best-effort: a failed enhancement call never blocks or
    /// fails the capture, it only means no extra tags and no summary.
    /// Returns `None` (and writes nothing) without a session or for
    /// whitespace-only content.
    pub async fn create_idea(
        &mut self,
        content: &str,
        source: IdeaSource,
        category: Category,
        tags: Vec<String>,
    ) -> Result<Option<Idea>> {
        let Some(user) = self.current_user.as_ref() else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let user_id = user.id;

        let enhancement = match self.assist.enhance(content).await {
            Ok(enhancement) => Some(enhancement),
            Err(err) => {
                tracing::warn!("enhancement unavailable, capturing without it: {err}");
                None
            }
        };

        let mut merged = tags;
        if let Some(extra) = enhancement.as_ref().and_then(|e| e.tags.clone()) {
            merged.extend(extra);
        }
        let mut seen = HashSet::new();
        merged.retain(|tag| seen.insert(tag.clone()));

        let idea = Idea {
            id: Uuid::new_v4(),
            user_id,
            content: content.to_string(),
            source,
            category,
            tags: merged,
            created_at: Utc::now(),
            starred: false,
            ai_summary: enhancement.and_then(|e| e.summary),
        };

        self.ideas.insert(0, idea.clone());
        self.persist_ideas()?;
        self.arm_notice("Sync Successful!");
        Ok(Some(idea))
    }

    /// Removes the matching idea. Missing ids are ignored.
    pub fn delete_idea(&mut self, id: Uuid) -> Result<()> {
        let before = self.ideas.len();
        self.ideas.retain(|idea| idea.id != id);
        if self.ideas.len() != before {
            self.persist_ideas()?;
        }
        Ok(())
    }

    /// Flips the starred flag on the matching idea. Missing ids are ignored.
    pub fn toggle_star(&mut self, id: Uuid) -> Result<()> {
        let Some(idea) = self.ideas.iter_mut().find(|idea| idea.id == id) else {
            return Ok(());
        };
        idea.starred = !idea.starred;
        self.persist_ideas()
    }

    /// Merges fields into the matching idea. Missing ids are ignored.
    pub fn update_idea(&mut self, id: Uuid, input: UpdateIdeaInput) -> Result<()> {
        let Some(idea) = self.ideas.iter_mut().find(|idea| idea.id == id) else {
            return Ok(());
        };
        if let Some(content) = input.content {
            idea.content = content;
        }
        if let Some(category) = input.category {
            idea.category = category;
        }
        if let Some(tags) = input.tags {
            idea.tags = tags;
        }
        if let Some(starred) = input.starred {
            idea.starred = starred;
        }
        self.persist_ideas()
    }

    /// The signed-in user's ideas, newest first.
    ///
    /// Ownership filtering happens here, at the read boundary; the stored
    /// collection is shared across users.
    pub fn user_ideas(&self) -> Vec<&Idea> {
        let Some(user) = self.current_user.as_ref() else {
            return Vec::new();
        };
        self.ideas
            .iter()
            .filter(|idea| idea.user_id == user.id)
            .collect()
    }

    /// The knowledge-bank view: free-text query over content and tags plus a
    /// category selector, preserving newest-first order.
    pub fn filtered_ideas(&self, query: &str, filter: CategoryFilter) -> Vec<&Idea> {
        filter_ideas(self.user_ideas(), query, filter)
    }

    /// Capture counts for the insights dashboard.
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.user_ideas())
    }

    fn persist_ideas(&self) -> Result<()> {
        // Suppressed while signed out so the unauthenticated state cannot
        // clobber the stored collection.
        if self.current_user.is_none() {
            return Ok(());
        }
        self.save_json(keys::IDEAS, &self.ideas)
    }
}

/// The knowledge-bank matching rule: the query must appear case-insensitively
/// in the content or in at least one tag (an empty query matches everything),
/// and the category selector must match.
pub fn idea_matches(idea: &Idea, query: &str, filter: CategoryFilter) -> bool {
    let query = query.to_lowercase();
    let matches_query = query.is_empty()
        || idea.content.to_lowercase().contains(&query)
        || idea.tags.iter().any(|tag| tag.to_lowercase().contains(&query));
    matches_query && filter.matches(idea.category)
}

/// Pure filter over an idea slice. The output is an order-preserving
/// subsequence of the input; no ranking, no pagination.
pub fn filter_ideas<'a>(
    ideas: Vec<&'a Idea>,
    query: &str,
    filter: CategoryFilter,
) -> Vec<&'a Idea> {
    ideas
        .into_iter()
        .filter(|idea| idea_matches(idea, query, filter))
        .collect()
}
