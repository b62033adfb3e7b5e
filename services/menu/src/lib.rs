//! DPS admin menu service library crate.
//!
//! # Purpose
//! Exposes the menu HTTP surface, caller extraction, banner gate,
//! configuration, and observability wiring for use by the binary and tests.
//!
//! # Notes
//! Tile selection itself lives in `menu-tiles`; this crate only adapts it to
//! HTTP callers.
pub mod api;
pub mod app;
pub mod auth;
pub mod banner;
pub mod config;
pub mod observability;
pub mod upstream;
