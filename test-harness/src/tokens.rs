// Caller tokens for tests. The menu service trusts the gateway to verify
// signatures, so a fixed HMAC secret is enough here.
use anyhow::{Context, Result};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

const TEST_SECRET: &[u8] = b"dps-menu-test-secret";

#[derive(Debug, Serialize)]
struct CallerClaims<'a> {
    user_name: &'a str,
    auth_source: &'a str,
    authorities: Vec<String>,
    client_id: &'a str,
    exp: u64,
}

/// Mint a token for `username` holding `roles` (bare names, no `ROLE_`).
pub fn mint_token(username: &str, roles: &[&str]) -> Result<String> {
    mint_token_with_source(username, "nomis", roles)
}

pub fn mint_token_with_source(username: &str, auth_source: &str, roles: &[&str]) -> Result<String> {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock")?
        .as_secs()
        + 3600;
    let claims = CallerClaims {
        user_name: username,
        auth_source,
        authorities: roles.iter().map(|role| format!("ROLE_{role}")).collect(),
        client_id: "dps-menu-test",
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .context("encode test token")
}
