use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::assist::Assist;
use crate::models::{SubscriptionPlan, UpdateUserInput, User};
use crate::store::{keys, KvStore};

use super::App;

impl<S: KvStore, A: Assist> App<S, A> {
    /// Replaces the session identity, persists it, and loads the idea
    /// collection.
    pub fn sign_in(&mut self, user: User) -> Result<()> {
        tracing::info!(user = %user.username, "signing in");
        self.save_json(keys::AUTH, &user)?;
        self.current_user = Some(user);
        self.ideas = self.load_json(keys::IDEAS)?.unwrap_or_default();
        Ok(())
    }

    /// Clears the identity and its persisted entry. Stored ideas are left
    /// untouched and become inaccessible until the same user signs in again.
    pub fn sign_out(&mut self) -> Result<()> {
        self.current_user = None;
        self.store.remove(keys::AUTH)?;
        Ok(())
    }

    /// Merges fields into the current identity, re-persists it, and rewrites
    /// the matching entry in the registered-user collection. Silent no-op
    /// without a session.
    pub fn update_profile(&mut self, input: UpdateUserInput) -> Result<()> {
        let Some(user) = self.current_user.as_mut() else {
            return Ok(());
        };

        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(username) = input.username {
            user.username = username;
        }
        if let Some(enabled) = input.notifications_enabled {
            user.notifications_enabled = enabled;
        }
        if let Some(plan) = input.subscription_plan {
            user.subscription_plan = plan;
        }
        if let Some(active) = input.subscription_active {
            user.subscription_active = active;
        }
        if let Some(subscription_id) = input.paypal_subscription_id {
            user.paypal_subscription_id = Some(subscription_id);
        }
        if let Some(completed) = input.has_completed_tour {
            user.has_completed_tour = completed;
        }
        if let Some(status) = input.mobile_launch_status {
            user.mobile_launch_status = Some(status);
        }

        let updated = user.clone();
        self.save_json(keys::AUTH, &updated)?;

        let mut users: Vec<User> = self.load_json(keys::USERS)?.unwrap_or_default();
        for entry in users.iter_mut() {
            if entry.id == updated.id {
                *entry = updated.clone();
            }
        }
        self.save_json(keys::USERS, &users)
    }

    /// Creates an account on the free plan, records it in the registered-user
    /// collection, and signs it in.
    pub fn register(&mut self, email: &str, username: &str, password: &str) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: username.to_string(),
            password: Some(password.to_string()),
            is_admin: false,
            notifications_enabled: true,
            joined_at: Utc::now(),
            subscription_plan: SubscriptionPlan::Free,
            subscription_active: false,
            paypal_subscription_id: None,
            has_completed_tour: false,
            mobile_launch_status: None,
        };

        let mut users: Vec<User> = self.load_json(keys::USERS)?.unwrap_or_default();
        users.push(user.clone());
        self.save_json(keys::USERS, &users)?;

        self.sign_in(user.clone())?;
        Ok(user)
    }

    /// Looks up an account by credentials in the registered-user collection.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.load_json(keys::USERS)?.unwrap_or_default();
        Ok(users
            .into_iter()
            .find(|u| u.email == email && u.password.as_deref() == Some(password)))
    }

    /// Billing screen hand-off: activates a plan on the current account.
    pub fn update_subscription(&mut self, plan: SubscriptionPlan) -> Result<()> {
        self.update_profile(UpdateUserInput {
            subscription_plan: Some(plan),
            subscription_active: Some(true),
            ..Default::default()
        })
    }
}
