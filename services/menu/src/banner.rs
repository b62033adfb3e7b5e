//! Role-gated notification banner lookup.
//!
//! # Purpose
//! Only callers who maintain access roles see the menu banner, so only their
//! requests reach the notification endpoint. Everyone else gets an empty
//! message without any upstream traffic.
use crate::upstream::NotificationSource;
use manage_users_client::ClientResult;
use menu_tiles::roles::{MAINTAIN_ACCESS_ROLES, MAINTAIN_ACCESS_ROLES_ADMIN};
use std::sync::Arc;

/// Notification type requested for the menu page.
pub const BANNER_KEY: &str = "DPSMENU";

const BANNER_ROLES: [&str; 2] = [MAINTAIN_ACCESS_ROLES, MAINTAIN_ACCESS_ROLES_ADMIN];

#[derive(Clone)]
pub struct BannerFetcher {
    source: Arc<dyn NotificationSource + Send + Sync>,
}

impl BannerFetcher {
    pub fn new(source: Arc<dyn NotificationSource + Send + Sync>) -> Self {
        Self { source }
    }

    /// Banner text for a caller holding `roles` (bare role names).
    ///
    /// # Errors
    /// - Upstream failures are returned unchanged; nothing is retried.
    pub async fn banner_message<S: AsRef<str>>(
        &self,
        token: &str,
        roles: &[S],
    ) -> ClientResult<String> {
        let gated = roles
            .iter()
            .any(|role| BANNER_ROLES.contains(&role.as_ref()));
        if !gated {
            metrics::counter!("banner_fetch_total", "outcome" => "skipped").increment(1);
            return Ok(String::new());
        }
        match self
            .source
            .notification_banner_message(token, BANNER_KEY)
            .await
        {
            Ok(notification) => {
                metrics::counter!("banner_fetch_total", "outcome" => "ok").increment(1);
                Ok(notification.message)
            }
            Err(err) => {
                metrics::counter!("banner_fetch_total", "outcome" => "error").increment(1);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::{Method, StatusCode};
    use manage_users_client::ClientError;
    use manage_users_client::types::NotificationMessage;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl RecordingSource {
        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait]
    impl NotificationSource for RecordingSource {
        async fn notification_banner_message(
            &self,
            token: &str,
            notification_type: &str,
        ) -> ClientResult<NotificationMessage> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((token.to_string(), notification_type.to_string()));
            if self.fail {
                return Err(ClientError::Status {
                    method: Method::GET,
                    path: format!("/notification/banner/{notification_type}"),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                });
            }
            Ok(NotificationMessage {
                message: "Scheduled maintenance".to_string(),
            })
        }
    }

    fn fetcher(source: &Arc<RecordingSource>) -> BannerFetcher {
        BannerFetcher::new(source.clone())
    }

    #[tokio::test]
    async fn maintain_access_roles_fetches_dpsmenu_banner() {
        let source = Arc::new(RecordingSource::default());
        let message = fetcher(&source)
            .banner_message("token-1", &["MAINTAIN_ACCESS_ROLES"])
            .await
            .expect("banner");
        assert_eq!(message, "Scheduled maintenance");
        assert_eq!(
            source.calls(),
            vec![("token-1".to_string(), "DPSMENU".to_string())]
        );
    }

    #[tokio::test]
    async fn admin_variant_also_fetches() {
        let source = Arc::new(RecordingSource::default());
        let message = fetcher(&source)
            .banner_message("t", &["CREATE_USER", "MAINTAIN_ACCESS_ROLES_ADMIN"])
            .await
            .expect("banner");
        assert_eq!(message, "Scheduled maintenance");
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn other_roles_skip_the_call() {
        let source = Arc::new(RecordingSource::default());
        let message = fetcher(&source)
            .banner_message("t", &["ROLES_ADMIN", "CREATE_USER"])
            .await
            .expect("banner");
        assert_eq!(message, "");
        assert!(source.calls().is_empty());

        let none: [&str; 0] = [];
        let message = fetcher(&source)
            .banner_message("t", &none)
            .await
            .expect("banner");
        assert_eq!(message, "");
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn prefixed_role_names_do_not_match() {
        let source = Arc::new(RecordingSource::default());
        let message = fetcher(&source)
            .banner_message("t", &["ROLE_MAINTAIN_ACCESS_ROLES"])
            .await
            .expect("banner");
        assert_eq!(message, "");
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let source = Arc::new(RecordingSource {
            fail: true,
            ..RecordingSource::default()
        });
        let err = fetcher(&source)
            .banner_message("t", &["MAINTAIN_ACCESS_ROLES".to_string()])
            .await
            .expect_err("failure propagates");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
