use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account record.
///
/// One logical record per account, held in two places: the session slot
/// (the signed-in copy) and the registered-user collection. Profile updates
/// rewrite both so they never drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    /// Kept for the simulated sign-in flow; not a real credential store.
    pub password: Option<String>,
    pub is_admin: bool,
    pub notifications_enabled: bool,
    pub joined_at: DateTime<Utc>,
    pub subscription_plan: SubscriptionPlan,
    pub subscription_active: bool,
    /// External billing reference, set once a paid plan is activated.
    pub paypal_subscription_id: Option<String>,
    pub has_completed_tour: bool,
    pub mobile_launch_status: Option<MobileLaunchStatus>,
}

/// Subscription tier. Deep search is refused on `Free`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Free,
    Pro,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "pro" => Some(Self::Pro),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }
}

/// Progress of the simulated app-store launch.
///
/// Variants are declared in lifecycle order and compare accordingly;
/// transitions only ever move forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MobileLaunchStatus {
    NotStarted,
    AssetPreparation,
    StoreReview,
    LiveOnGooglePlay,
    LiveOnAppStore,
}

impl MobileLaunchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::AssetPreparation => "asset_preparation",
            Self::StoreReview => "store_review",
            Self::LiveOnGooglePlay => "live_on_google_play",
            Self::LiveOnAppStore => "live_on_app_store",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(Self::NotStarted),
            "asset_preparation" => Some(Self::AssetPreparation),
            "store_review" => Some(Self::StoreReview),
            "live_on_google_play" => Some(Self::LiveOnGooglePlay),
            "live_on_app_store" => Some(Self::LiveOnAppStore),
            _ => None,
        }
    }
}

/// Input for updating a profile. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub username: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub subscription_plan: Option<SubscriptionPlan>,
    pub subscription_active: Option<bool>,
    pub paypal_subscription_id: Option<String>,
    pub has_completed_tour: Option<bool>,
    pub mobile_launch_status: Option<MobileLaunchStatus>,
}
