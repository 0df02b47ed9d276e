use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single captured thought, voice or typed.
///
/// Ideas carry their owner in `user_id` but live in one shared stored
/// collection; every display path filters to the signed-in user at the read
/// boundary rather than partitioning storage. The collection is kept
/// newest-first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Idea {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub source: IdeaSource,
    pub category: Category,
    /// Duplicates are collapsed (case-sensitive) when the idea is built.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub starred: bool,
    /// One-line digest returned by the enhancement service, when available.
    pub ai_summary: Option<String>,
}

/// How an idea was captured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdeaSource {
    Voice,
    Typed,
}

impl IdeaSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Typed => "typed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "voice" => Some(Self::Voice),
            "typed" => Some(Self::Typed),
            _ => None,
        }
    }
}

/// The fixed set of capture categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Note,
    Task,
    Inspiration,
    Meeting,
    Project,
    Question,
}

impl Category {
    /// Every category, in the order the capture screen presents them.
    pub const ALL: [Category; 6] = [
        Category::Note,
        Category::Task,
        Category::Inspiration,
        Category::Meeting,
        Category::Project,
        Category::Question,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Task => "task",
            Self::Inspiration => "inspiration",
            Self::Meeting => "meeting",
            Self::Project => "project",
            Self::Question => "question",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "note" => Some(Self::Note),
            "task" => Some(Self::Task),
            "inspiration" => Some(Self::Inspiration),
            "meeting" => Some(Self::Meeting),
            "project" => Some(Self::Project),
            "question" => Some(Self::Question),
            _ => None,
        }
    }
}

/// Category selector for the knowledge bank: a specific category or the
/// wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == category,
        }
    }
}

/// Input for updating an idea. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIdeaInput {
    pub content: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub starred: Option<bool>,
}
