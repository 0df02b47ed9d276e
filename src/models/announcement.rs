use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dashboard announcement managed from the CMS screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CmsAnnouncement {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
