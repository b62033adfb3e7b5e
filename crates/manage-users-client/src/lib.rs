//! Typed client for the upstream Manage Users API.
//!
//! # Purpose
//! Wraps the REST endpoints the DPS menu and its sibling admin screens call,
//! forwarding the caller's own bearer token on every request.
//!
//! # How it fits
//! The menu service uses [`ManageUsersClient::notification_banner_message`]
//! for the banner and [`ManageUsersClient::ping`] for its health endpoint; the
//! remaining methods are thin pass-throughs shared with other admin tools.
//!
//! # Key invariants
//! - Requests are never retried; a failure is returned to the caller as-is.
//! - Non-2xx responses become [`ClientError::Status`] carrying the body text.
//!
//! # Examples
//! ```rust,no_run
//! use manage_users_client::{ClientConfig, ManageUsersClient};
//! use std::time::Duration;
//!
//! # async fn demo() -> manage_users_client::ClientResult<()> {
//! let client = ManageUsersClient::new(&ClientConfig {
//!     url: "http://localhost:8082".to_string(),
//!     timeout: Duration::from_secs(20),
//! })?;
//! let banner = client.notification_banner_message("user-token", "DPSMENU").await?;
//! println!("{}", banner.message);
//! # Ok(())
//! # }
//! ```

mod client;
mod errors;
pub mod types;

pub use client::{ClientConfig, ManageUsersClient};
pub use errors::{ClientError, ClientResult};
