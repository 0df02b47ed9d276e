//! Domain models for IdeaFlow.
//!
//! # Core Concepts
//!
//! ## Persisted Entities
//!
//! - [`User`]: An account record. The signed-in copy lives in the session
//!   slot; the registered-user collection keeps every known account.
//! - [`Idea`]: A single captured thought, voice or typed. All users' ideas
//!   share one stored collection; ownership is enforced at the read boundary.
//! - [`CmsAnnouncement`]: Dashboard announcements managed from the CMS screen.
//!
//! ## Ephemeral Values
//!
//! These are derived or fetched on demand and never written to the store:
//!
//! - [`WebResult`] / [`WebInsights`]: Output of the deep-search workflow,
//!   discarded when a new search starts or the view changes.
//! - [`Stats`]: Capture counts recomputed from the signed-in user's ideas.

mod announcement;
mod idea;
mod stats;
mod user;
mod web;

pub use announcement::*;
pub use idea::*;
pub use stats::*;
pub use user::*;
pub use web::*;
