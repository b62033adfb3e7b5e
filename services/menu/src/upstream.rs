//! Seams over the Manage Users API used at request time.
//!
//! Handlers depend on these traits rather than on the HTTP client so router
//! tests can run without a network.
use async_trait::async_trait;
use manage_users_client::types::{HealthPing, NotificationMessage};
use manage_users_client::{ClientResult, ManageUsersClient};

/// Source of notification banner messages.
#[async_trait]
pub trait NotificationSource {
    async fn notification_banner_message(
        &self,
        token: &str,
        notification_type: &str,
    ) -> ClientResult<NotificationMessage>;
}

/// Liveness check for the upstream dependency.
#[async_trait]
pub trait UpstreamHealth {
    async fn ping(&self) -> ClientResult<HealthPing>;
}

#[async_trait]
impl NotificationSource for ManageUsersClient {
    async fn notification_banner_message(
        &self,
        token: &str,
        notification_type: &str,
    ) -> ClientResult<NotificationMessage> {
        ManageUsersClient::notification_banner_message(self, token, notification_type).await
    }
}

#[async_trait]
impl UpstreamHealth for ManageUsersClient {
    async fn ping(&self) -> ClientResult<HealthPing> {
        ManageUsersClient::ping(self).await
    }
}
