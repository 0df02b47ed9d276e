mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use anyhow::Result;

/// Fixed keys of the persisted layout. Each key holds one serialized
/// document.
pub mod keys {
    /// Current session identity.
    pub const AUTH: &str = "ideaflow_auth";
    /// Every registered account.
    pub const USERS: &str = "ideaflow_users";
    /// CMS announcement collection.
    pub const CMS: &str = "ideaflow_cms";
    /// Full idea collection, all users.
    pub const IDEAS: &str = "ideaflow_ideas";
    /// Encoded Google Play icon.
    pub const ICON_GOOGLE_PLAY: &str = "mobile_icon_gp";
    /// Encoded App Store icon.
    pub const ICON_APP_STORE: &str = "mobile_icon_as";
}

/// String-keyed durability layer behind the application state.
///
/// Implementations are synchronous and assumed always available; callers do
/// not retry. Swapping the backend (durable SQLite vs. in-memory) must not
/// change observable behavior.
pub trait KvStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
