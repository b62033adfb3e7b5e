//! Static tile catalogue construction.
//!
//! # Purpose
//! Builds the ordered list of every tile the menu can show, with the allow
//! list entries labelled for the deployment environment.
//!
//! # Key invariants
//! - Built once per process; the feature snapshot is baked into the entries.
//! - When the allow list feature is off its two entries are still present but
//!   never admit any role.
use crate::roles::{
    AUTH_GROUP_MANAGER, CONTRACT_MANAGER_VIEW_GROUP, CREATE_USER, MAINTAIN_ACCESS_ROLES,
    MAINTAIN_ACCESS_ROLES_ADMIN, MAINTAIN_EMAIL_DOMAINS, MAINTAIN_OAUTH_USERS,
    MANAGE_USER_ALLOW_LIST, ROLES_ADMIN, VIEW_ADMINISTRABLE_USER_ROLES,
};
use crate::tile::{Eligibility, TileDefinition};

const SEARCH_DPS_USER_ROLES: &[&str] = &[MAINTAIN_ACCESS_ROLES, MAINTAIN_ACCESS_ROLES_ADMIN];
const CREATE_DPS_USER_ROLES: &[&str] = &[CREATE_USER];
const EMAIL_DOMAIN_ROLES: &[&str] = &[MAINTAIN_EMAIL_DOMAINS];
const EXTERNAL_USER_ROLES: &[&str] = &[MAINTAIN_OAUTH_USERS, AUTH_GROUP_MANAGER];
const CREATE_GROUP_ROLES: &[&str] = &[MAINTAIN_OAUTH_USERS];
const VIEW_ROLES_ROLES: &[&str] = &[ROLES_ADMIN, VIEW_ADMINISTRABLE_USER_ROLES];
const CREATE_ROLE_ROLES: &[&str] = &[ROLES_ADMIN];
const ALLOW_LIST_ROLES: &[&str] = &[MANAGE_USER_ALLOW_LIST];
const CRS_GROUP_ROLES: &[&str] = &[CONTRACT_MANAGER_VIEW_GROUP];

/// Snapshot of the manage-user allow list feature switch.
///
/// # Summary
/// Read from configuration once at startup and injected into
/// [`TileCatalogue::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowListFeature {
    pub enabled: bool,
    pub environment_label: String,
}

impl AllowListFeature {
    pub fn new(enabled: bool, environment_label: impl Into<String>) -> Self {
        Self {
            enabled,
            environment_label: environment_label.into(),
        }
    }

    /// Feature off; the label is kept so entry text stays well-formed.
    pub fn disabled() -> Self {
        Self::new(false, "Test")
    }
}

/// Immutable, ordered collection of tile definitions.
#[derive(Debug, Clone)]
pub struct TileCatalogue {
    entries: Vec<TileDefinition>,
}

impl TileCatalogue {
    /// Build the catalogue for this deployment.
    ///
    /// # Parameters
    /// - `allow_list`: feature switch snapshot; its label is interpolated into
    ///   the two allow list entries and its flag gates their eligibility.
    pub fn new(allow_list: &AllowListFeature) -> Self {
        let env = allow_list.environment_label.as_str();
        let allow_list_rule = Eligibility::FeatureGated {
            roles: ALLOW_LIST_ROLES,
            enabled: allow_list.enabled,
        };
        let entries = vec![
            TileDefinition::new(
                "Search for a DPS user",
                "Enhanced searching and managing of DPS and NOMIS users",
                "/search-with-filter-dps-users",
                "search_with_filter_dps_users",
                1,
                Eligibility::AnyOf(SEARCH_DPS_USER_ROLES),
            ),
            TileDefinition::new(
                "Create a DPS user",
                "Create an account for a DPS user",
                "/create-user",
                "create_dps_user_link",
                2,
                Eligibility::AnyOf(CREATE_DPS_USER_ROLES),
            ),
            TileDefinition::new(
                "Manage Email Domains",
                "Create, Delete and View email domain listing",
                "/email-domains",
                "view_email_domains_link",
                3,
                Eligibility::AnyOf(EMAIL_DOMAIN_ROLES),
            ),
            TileDefinition::new(
                "Search for an external user",
                "Search for users that typically do not have a DPS or Delius account",
                "/search-external-users",
                "maintain_auth_users_link",
                4,
                Eligibility::AnyOf(EXTERNAL_USER_ROLES),
            ),
            TileDefinition::new(
                "Create an external user",
                "Create an account for people who do not have a DPS or Delius account",
                "/create-external-user",
                "create_auth_user_link",
                5,
                Eligibility::AnyOf(EXTERNAL_USER_ROLES),
            ),
            TileDefinition::new(
                "View the groups I administer",
                "View and make changes to a group which contain users outside of HMPPS",
                "/manage-groups",
                "manage_groups_link",
                6,
                Eligibility::AnyOf(EXTERNAL_USER_ROLES),
            ),
            TileDefinition::new(
                "Create a group",
                "Create a new group which will represent a cohort of users outside of HMPPS",
                "/manage-groups/create-group",
                "create_groups_link",
                7,
                Eligibility::AnyOf(CREATE_GROUP_ROLES),
            ),
            TileDefinition::new(
                "View roles",
                "View roles that are available to be assigned to users",
                "/manage-roles",
                "view_roles_link",
                8,
                Eligibility::AnyOf(VIEW_ROLES_ROLES),
            ),
            TileDefinition::new(
                "Create a role",
                "Create a new role that can later be assigned to users",
                "/manage-roles/create-role",
                "create_roles_link",
                9,
                Eligibility::AnyOf(CREATE_ROLE_ROLES),
            ),
            TileDefinition::new(
                format!("Search the {env} allow list"),
                format!("Search for a user and update their access to {env}"),
                "/user-allow-list",
                "search_user_allow_list",
                10,
                allow_list_rule,
            ),
            TileDefinition::new(
                format!("Add a user to the {env} allow list"),
                format!("Add an existing user to the {env} allow list"),
                "/user-allow-list/add",
                "add_user_to_allow_list",
                11,
                allow_list_rule,
            ),
            TileDefinition::new(
                "Download CRS Group members",
                "Select CRS Group and download list of members",
                "/crs-group-selection",
                "view_crs_group_users_link",
                12,
                Eligibility::AnyOf(CRS_GROUP_ROLES),
            ),
        ];
        Self { entries }
    }

    /// Read-only view of every definition, in catalogue order.
    pub fn entries(&self) -> &[TileDefinition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
