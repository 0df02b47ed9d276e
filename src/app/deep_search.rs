use crate::assist::{Assist, AssistError};
use crate::models::{SubscriptionPlan, WebInsights};
use crate::store::KvStore;

use super::App;

/// Fallback digest rendered when the search backend cannot be reached.
/// Shown exactly like a successful-but-empty result set.
pub const DEGRADED_SEARCH_TEXT: &str =
    "Web search is temporarily unavailable. Please try again in a moment.";

/// Deep-search workflow state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DeepSearchState {
    #[default]
    Idle,
    /// Entitlement refusal: the account is on the free tier. No network call
    /// was made; the caller should redirect to the billing view.
    Gated,
    Searching,
    Results(WebInsights),
    /// The backend call failed. Holds the degraded payload and renders
    /// exactly like `Results`.
    Failed(WebInsights),
}

/// Outcome of starting a deep search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepSearchStart {
    /// In flight under this request generation.
    Started(u64),
    /// Entitlement refusal; redirect to billing.
    Gated,
    /// Whitespace query, or a search already in flight.
    Ignored,
}

#[derive(Debug, Default)]
pub(super) struct DeepSearch {
    state: DeepSearchState,
    generation: u64,
}

impl<S: KvStore, A: Assist> App<S, A> {
    /// Starts a deep search: re-entrancy guard, entitlement gate, fresh
    /// request generation.
    pub fn begin_deep_search(&mut self, query: &str) -> DeepSearchStart {
        if query.trim().is_empty() || self.deep_search.state == DeepSearchState::Searching {
            return DeepSearchStart::Ignored;
        }

        match self.current_user.as_ref() {
            Some(user) if user.subscription_plan != SubscriptionPlan::Free => {}
            _ => {
                self.deep_search.state = DeepSearchState::Gated;
                return DeepSearchStart::Gated;
            }
        }

        self.deep_search.generation += 1;
        self.deep_search.state = DeepSearchState::Searching;
        DeepSearchStart::Started(self.deep_search.generation)
    }

    /// Applies a search outcome. A response from a superseded generation is
    /// discarded, so a stale reply can never overwrite newer state.
    pub fn apply_deep_search(
        &mut self,
        generation: u64,
        outcome: Result<WebInsights, AssistError>,
    ) {
        if generation != self.deep_search.generation {
            tracing::debug!(generation, "discarding stale search response");
            return;
        }

        self.deep_search.state = match outcome {
            Ok(insights) => DeepSearchState::Results(insights),
            Err(err) => {
                tracing::warn!("web search degraded: {err}");
                DeepSearchState::Failed(WebInsights {
                    text: DEGRADED_SEARCH_TEXT.to_string(),
                    sources: Vec::new(),
                })
            }
        };
    }

    /// Runs a full search cycle against the assist backend.
    pub async fn deep_search(&mut self, query: &str) -> DeepSearchStart {
        let start = self.begin_deep_search(query);
        if let DeepSearchStart::Started(generation) = start {
            let outcome = self.assist.search_web(query).await;
            self.apply_deep_search(generation, outcome);
        }
        start
    }

    /// Discards any result set and returns to idle, e.g. when the view
    /// changes. Bumps the generation so an in-flight response is discarded
    /// on arrival.
    pub fn reset_deep_search(&mut self) {
        self.deep_search.generation += 1;
        self.deep_search.state = DeepSearchState::Idle;
    }

    pub fn deep_search_state(&self) -> &DeepSearchState {
        &self.deep_search.state
    }

    /// The rendered payload, identical for successful and degraded
    /// completions.
    pub fn web_insights(&self) -> Option<&WebInsights> {
        match &self.deep_search.state {
            DeepSearchState::Results(insights) | DeepSearchState::Failed(insights) => {
                Some(insights)
            }
            _ => None,
        }
    }
}
