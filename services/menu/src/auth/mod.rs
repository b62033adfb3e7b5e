//! Caller identity for menu requests.
//!
//! # Purpose
//! The menu sits behind the auth gateway, which has already verified the
//! caller's token. This module only reads the identity carried in it.
pub mod caller;

pub use caller::{CallerContext, CallerError, require_caller};
