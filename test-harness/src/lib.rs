//! Shared fixtures for DPS menu integration tests.
//!
//! - [`http`]: spawn axum routers on ephemeral ports with graceful shutdown.
//! - [`manage_users_api`]: a stub of the upstream Manage Users API.
//! - [`tokens`]: mint caller tokens carrying role authorities.
pub mod http;
pub mod manage_users_api;
pub mod tokens;
