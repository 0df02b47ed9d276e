use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::assist::Assist;
use crate::models::CmsAnnouncement;
use crate::store::{keys, KvStore};

use super::App;

impl<S: KvStore, A: Assist> App<S, A> {
    pub fn announcements(&self) -> &[CmsAnnouncement] {
        &self.announcements
    }

    /// Active announcements in publication order.
    pub fn active_announcements(&self) -> Vec<&CmsAnnouncement> {
        self.announcements.iter().filter(|a| a.is_active).collect()
    }

    /// Publishes a dashboard announcement and persists the collection.
    pub fn publish_announcement(
        &mut self,
        title: &str,
        text: &str,
        image_url: Option<String>,
    ) -> Result<CmsAnnouncement> {
        let announcement = CmsAnnouncement {
            id: Uuid::new_v4(),
            title: title.to_string(),
            text: text.to_string(),
            image_url,
            is_active: true,
            created_at: Utc::now(),
        };
        self.announcements.push(announcement.clone());
        self.save_json(keys::CMS, &self.announcements)?;
        Ok(announcement)
    }

    /// Removes an announcement. Missing ids are ignored.
    pub fn remove_announcement(&mut self, id: Uuid) -> Result<()> {
        let before = self.announcements.len();
        self.announcements.retain(|a| a.id != id);
        if self.announcements.len() != before {
            self.save_json(keys::CMS, &self.announcements)?;
        }
        Ok(())
    }
}
