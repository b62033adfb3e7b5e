//! Menu HTTP API module.
//!
//! # Purpose
//! Exposes route handler modules plus the shared error and payload types.
pub mod error;
pub mod menu;
pub mod openapi;
pub mod system;
pub mod types;
