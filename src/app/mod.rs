//! Application state and workflows.
//!
//! [`App`] is the single owner of all mutable state: the session identity,
//! the idea collection, the announcement collection, and the deep-search and
//! mobile-hub workflow state. Every mutation funnels through its methods and
//! is written through to the [`KvStore`] synchronously, with one exception:
//! idea writes are suppressed while no session is active, so the
//! unauthenticated state can never clobber the stored collection.

mod announcements;
mod deep_search;
mod ideas;
mod mobile;
mod session;

pub use deep_search::{DeepSearchStart, DeepSearchState, DEGRADED_SEARCH_TEXT};
pub use ideas::{filter_ideas, idea_matches};
pub use mobile::{DeployError, Platform, DEPLOY_DELAY, READINESS_BASE, READINESS_PER_ASSET};

use std::time::Duration;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::Instant;

use crate::assist::Assist;
use crate::models::{CmsAnnouncement, Idea, User};
use crate::store::{keys, KvStore};

use deep_search::DeepSearch;
use mobile::MobileHub;

/// How long a transient success notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// The application state.
pub struct App<S, A> {
    store: S,
    assist: A,
    current_user: Option<User>,
    ideas: Vec<Idea>,
    announcements: Vec<CmsAnnouncement>,
    deep_search: DeepSearch,
    mobile: MobileHub,
    notice: Option<Notice>,
}

struct Notice {
    message: String,
    expires_at: Instant,
}

impl<S: KvStore, A: Assist> App<S, A> {
    /// Loads persisted state. The idea collection is only loaded when a
    /// session exists.
    pub fn new(store: S, assist: A) -> Result<Self> {
        let current_user: Option<User> = load_json(&store, keys::AUTH)?;
        let ideas = if current_user.is_some() {
            load_json(&store, keys::IDEAS)?.unwrap_or_default()
        } else {
            Vec::new()
        };
        let announcements = load_json(&store, keys::CMS)?.unwrap_or_default();
        let mobile = MobileHub::load(&store)?;

        Ok(Self {
            store,
            assist,
            current_user,
            ideas,
            announcements,
            deep_search: DeepSearch::default(),
            mobile,
            notice: None,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The armed transient notice, until its display duration elapses.
    pub fn notice(&mut self) -> Option<&str> {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.expires_at <= Instant::now())
        {
            self.notice = None;
        }
        self.notice.as_ref().map(|n| n.message.as_str())
    }

    fn arm_notice(&mut self, message: &str) {
        self.notice = Some(Notice {
            message: message.to_string(),
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        load_json(&self.store, key)
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.store.save(key, &serde_json::to_string(value)?)
    }
}

fn load_json<T: DeserializeOwned>(store: &impl KvStore, key: &str) -> Result<Option<T>> {
    match store.load(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
