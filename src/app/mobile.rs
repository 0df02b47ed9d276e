use std::time::Duration;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

use crate::assist::Assist;
use crate::models::{MobileLaunchStatus, UpdateUserInput};
use crate::store::{keys, KvStore};

use super::App;

/// Simulated review hand-off time.
pub const DEPLOY_DELAY: Duration = Duration::from_secs(4);

/// Readiness granted by the core bundle alone.
pub const READINESS_BASE: u8 = 50;

/// Additional readiness per uploaded store icon.
pub const READINESS_PER_ASSET: u8 = 15;

/// Store platforms with an icon asset slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    GooglePlay,
    AppStore,
}

impl Platform {
    fn slot_key(self) -> &'static str {
        match self {
            Self::GooglePlay => keys::ICON_GOOGLE_PLAY,
            Self::AppStore => keys::ICON_APP_STORE,
        }
    }
}

/// Deployment failures. The refusal variants carry the user-facing message.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Please upload a Google Play app icon before deploying.")]
    MissingGoogleIcon,

    #[error("A deployment is already running.")]
    AlreadyDeploying,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Default)]
pub(super) struct MobileHub {
    google_play_icon: Option<String>,
    app_store_icon: Option<String>,
    deploying: bool,
}

impl MobileHub {
    pub(super) fn load(store: &impl KvStore) -> Result<Self> {
        Ok(Self {
            google_play_icon: store.load(keys::ICON_GOOGLE_PLAY)?,
            app_store_icon: store.load(keys::ICON_APP_STORE)?,
            deploying: false,
        })
    }

    fn slot(&self, platform: Platform) -> &Option<String> {
        match platform {
            Platform::GooglePlay => &self.google_play_icon,
            Platform::AppStore => &self.app_store_icon,
        }
    }

    fn slot_mut(&mut self, platform: Platform) -> &mut Option<String> {
        match platform {
            Platform::GooglePlay => &mut self.google_play_icon,
            Platform::AppStore => &mut self.app_store_icon,
        }
    }
}

impl<S: KvStore, A: Assist> App<S, A> {
    /// Encodes a platform icon into its storable form and persists it. A
    /// Google Play upload advances the launch status to asset preparation
    /// unless the account is already further along.
    pub fn upload_asset(&mut self, platform: Platform, image: &[u8]) -> Result<()> {
        let encoded = BASE64.encode(image);
        self.store.save(platform.slot_key(), &encoded)?;
        *self.mobile.slot_mut(platform) = Some(encoded);

        if platform == Platform::GooglePlay {
            self.advance_launch_status(MobileLaunchStatus::AssetPreparation)?;
        }
        Ok(())
    }

    /// Clears a platform icon slot and its persisted entry.
    pub fn remove_asset(&mut self, platform: Platform) -> Result<()> {
        self.store.remove(platform.slot_key())?;
        *self.mobile.slot_mut(platform) = None;
        Ok(())
    }

    /// The encoded icon in a platform slot, if present.
    pub fn asset(&self, platform: Platform) -> Option<&str> {
        self.mobile.slot(platform).as_deref()
    }

    /// Simulates a Google Play deployment.
    ///
    /// Refused without the Google Play icon or while a deployment is already
    /// running; a refusal changes nothing. Otherwise the hub stays in the
    /// deploying state for [`DEPLOY_DELAY`], then the account moves to store
    /// review and a transient success notice is armed.
    pub async fn deploy(&mut self) -> Result<(), DeployError> {
        if self.mobile.google_play_icon.is_none() {
            return Err(DeployError::MissingGoogleIcon);
        }
        if self.mobile.deploying {
            return Err(DeployError::AlreadyDeploying);
        }

        self.mobile.deploying = true;
        tracing::info!("deployment started, review hand-off in {DEPLOY_DELAY:?}");
        tokio::time::sleep(DEPLOY_DELAY).await;
        self.mobile.deploying = false;

        self.advance_launch_status(MobileLaunchStatus::StoreReview)?;
        self.arm_notice("Sync Successful!");
        Ok(())
    }

    pub fn is_deploying(&self) -> bool {
        self.mobile.deploying
    }

    /// Deployment readiness: the base value plus a fixed step per uploaded
    /// icon. Purely cosmetic; drives the progress indicator.
    pub fn readiness(&self) -> u8 {
        let mut value = READINESS_BASE;
        if self.mobile.google_play_icon.is_some() {
            value += READINESS_PER_ASSET;
        }
        if self.mobile.app_store_icon.is_some() {
            value += READINESS_PER_ASSET;
        }
        value
    }

    fn advance_launch_status(&mut self, status: MobileLaunchStatus) -> Result<()> {
        let current = self.current_user.as_ref().and_then(|u| u.mobile_launch_status);
        if current.is_none_or(|c| c < status) {
            self.update_profile(UpdateUserInput {
                mobile_launch_status: Some(status),
                ..Default::default()
            })?;
        }
        Ok(())
    }
}
