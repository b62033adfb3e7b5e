//! Tile definitions and the projection handed to callers.
//!
//! # Purpose
//! Separates the catalogue-only metadata (sort key, eligibility rule) from the
//! [`MenuTile`] payload that leaves the service.
//!
//! # Key invariants
//! - `Eligibility` is evaluated against immutable data only; the feature flag
//!   for gated entries is captured when the catalogue is built.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rule deciding whether a single role grants access to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Any listed role grants access.
    AnyOf(&'static [&'static str]),
    /// A listed role grants access only while the feature switch is on.
    FeatureGated {
        roles: &'static [&'static str],
        enabled: bool,
    },
}

impl Eligibility {
    /// Role names that can grant access, regardless of feature state.
    pub fn roles(&self) -> &'static [&'static str] {
        match self {
            Eligibility::AnyOf(roles) => *roles,
            Eligibility::FeatureGated { roles, .. } => *roles,
        }
    }

    /// Evaluate the rule for one role.
    ///
    /// # Examples
    /// ```rust
    /// use menu_tiles::Eligibility;
    ///
    /// let gated = Eligibility::FeatureGated { roles: &["A"], enabled: false };
    /// assert!(!gated.admits("A"));
    /// assert!(Eligibility::AnyOf(&["A", "B"]).admits("B"));
    /// ```
    pub fn admits(&self, role: &str) -> bool {
        match self {
            Eligibility::AnyOf(roles) => roles.iter().any(|candidate| *candidate == role),
            Eligibility::FeatureGated { roles, enabled } => {
                *enabled && roles.iter().any(|candidate| *candidate == role)
            }
        }
    }
}

/// Catalogue entry: display fields plus sort key and eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDefinition {
    pub title: String,
    pub description: String,
    pub href: String,
    pub data_qa: String,
    pub order: u32,
    pub eligibility: Eligibility,
}

impl TileDefinition {
    pub(crate) fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        href: &str,
        data_qa: &str,
        order: u32,
        eligibility: Eligibility,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            href: href.to_string(),
            data_qa: data_qa.to_string(),
            order,
            eligibility,
        }
    }

    /// Strip catalogue metadata, leaving the caller-facing tile.
    pub fn to_menu_tile(&self) -> MenuTile {
        MenuTile {
            title: self.title.clone(),
            description: self.description.clone(),
            href: self.href.clone(),
            data_qa: self.data_qa.clone(),
        }
    }
}

/// Tile as presented to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuTile {
    pub title: String,
    pub description: String,
    pub href: String,
    pub data_qa: String,
}
