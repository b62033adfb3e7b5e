//! Role names referenced by the catalogue and the banner gate.
//!
//! Tokens carry authorities as `ROLE_<NAME>`; everything in this crate works
//! on the bare `<NAME>` form.

pub const MAINTAIN_ACCESS_ROLES: &str = "MAINTAIN_ACCESS_ROLES";
pub const MAINTAIN_ACCESS_ROLES_ADMIN: &str = "MAINTAIN_ACCESS_ROLES_ADMIN";
pub const CREATE_USER: &str = "CREATE_USER";
pub const MAINTAIN_EMAIL_DOMAINS: &str = "MAINTAIN_EMAIL_DOMAINS";
pub const MAINTAIN_OAUTH_USERS: &str = "MAINTAIN_OAUTH_USERS";
pub const AUTH_GROUP_MANAGER: &str = "AUTH_GROUP_MANAGER";
pub const ROLES_ADMIN: &str = "ROLES_ADMIN";
pub const VIEW_ADMINISTRABLE_USER_ROLES: &str = "VIEW_ADMINISTRABLE_USER_ROLES";
pub const MANAGE_USER_ALLOW_LIST: &str = "MANAGE_USER_ALLOW_LIST";
pub const CONTRACT_MANAGER_VIEW_GROUP: &str = "CONTRACT_MANAGER_VIEW_GROUP";

/// Prefix carried by authorities in upstream tokens.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Remove the `ROLE_` authority prefix if present.
///
/// # Examples
/// ```rust
/// use menu_tiles::roles::strip_role_prefix;
///
/// assert_eq!(strip_role_prefix("ROLE_CREATE_USER"), "CREATE_USER");
/// assert_eq!(strip_role_prefix("CREATE_USER"), "CREATE_USER");
/// ```
pub fn strip_role_prefix(authority: &str) -> &str {
    authority.strip_prefix(ROLE_PREFIX).unwrap_or(authority)
}
