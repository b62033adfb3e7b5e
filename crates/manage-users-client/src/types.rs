//! Request and response payloads for the Manage Users API.
//!
//! Field names follow the upstream JSON (camelCase). Optional fields default
//! so partially populated responses still decode.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPing {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub auth_source: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalUserRole {
    pub role_code: String,
    #[serde(default)]
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddress {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDomain {
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmailDomainRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminType {
    pub admin_type_code: String,
    pub admin_type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_code: String,
    pub role_name: String,
    #[serde(default)]
    pub role_description: Option<String>,
    #[serde(default)]
    pub admin_type: Vec<AdminType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    pub role_code: String,
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_description: Option<String>,
    pub admin_type: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleNameRequest {
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleDescriptionRequest {
    pub role_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleAdminTypeRequest {
    pub admin_type: Vec<String>,
}

/// Spring-style page envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub empty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
    NoRestriction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllowlistStatus {
    #[default]
    All,
    Active,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAllowlistAddRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub reason: String,
    pub access_period: AccessPeriod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAllowlistPatchRequest {
    pub reason: String,
    pub access_period: AccessPeriod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAllowlistDetail {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub reason: String,
    pub created_on: String,
    #[serde(default)]
    pub allowlist_end_date: Option<String>,
    pub last_updated: String,
    pub last_updated_by: String,
}

/// Query for the paged allow list search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAllowlistQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: AllowlistStatus,
    pub size: u32,
    pub page: u32,
}

impl Default for UserAllowlistQuery {
    fn default() -> Self {
        Self {
            name: None,
            status: AllowlistStatus::All,
            size: 20,
            page: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub group_code: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalUser {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub last_logged_in: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrisonCaseload {
    pub id: String,
    pub name: String,
}

/// Caseloads for a prison user.
///
/// `auth` users have no caseloads; their detail is the default value, which
/// serializes to `{}` like the upstream's empty answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCaseloadDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_caseload: Option<PrisonCaseload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caseloads: Vec<PrisonCaseload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub role_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_description: Option<String>,
}

/// New external (auth) user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExternalUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_codes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserEmailRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateReason {
    pub reason: String,
}

/// Filter for the external user search. Unset fields are left off the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalUserSearch {
    pub name_filter: Option<String>,
    pub role: Option<String>,
    pub group: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ExternalUserSearch {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "name", self.name_filter.as_deref());
        push_opt(&mut pairs, "groups", self.group.as_deref());
        push_opt(&mut pairs, "roles", self.role.as_deref());
        push_opt(&mut pairs, "status", self.status.as_deref());
        push_opt(&mut pairs, "page", self.page);
        push_opt(&mut pairs, "size", self.size);
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub group_code: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildGroupRequest {
    pub parent_group_code: String,
    pub group_code: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupNameRequest {
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildGroup {
    pub group_code: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignableRole {
    pub role_code: String,
    pub role_name: String,
    #[serde(default)]
    pub automatic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetails {
    pub group_code: String,
    pub group_name: String,
    #[serde(default)]
    pub assignable_roles: Vec<AssignableRole>,
    #[serde(default)]
    pub children: Vec<ChildGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkedCentralAdminRequest {
    pub existing_username: String,
    pub admin_username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkedGeneralUserRequest {
    pub existing_admin_username: String,
    pub general_username: String,
    pub default_caseload_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkedLocalAdminRequest {
    pub existing_username: String,
    pub admin_username: String,
    pub local_admin_group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonUserAccount {
    pub username: String,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub default_caseload: Option<String>,
}

/// A staff member with their linked general and admin accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonStaffUser {
    #[serde(default)]
    pub staff_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub general_account: Option<PrisonUserAccount>,
    #[serde(default)]
    pub admin_account: Option<PrisonUserAccount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrisonUserType {
    DpsAdm,
    DpsGen,
    DpsLsa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: PrisonUserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_caseload_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonStaffNewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub primary_email: Option<String>,
}

/// Row of the prison user search and its downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonUserSearchSummary {
    pub username: String,
    pub staff_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub active_caseload: Option<PrisonCaseload>,
    #[serde(default)]
    pub dps_role_count: u32,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub staff_status: Option<String>,
    #[serde(default)]
    pub last_logon_date: Option<String>,
}

pub type PrisonUserDownloadSummary = PrisonUserSearchSummary;

/// Local system administrator row, with the admin groups it manages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonAdminUserSummary {
    #[serde(flatten)]
    pub summary: PrisonUserSearchSummary,
    #[serde(default)]
    pub groups: Vec<PrisonCaseload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonUserDetails {
    pub username: String,
    pub staff_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub active_caseload_id: Option<String>,
    #[serde(default)]
    pub account_status: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub auth_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonRole {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub sequence: Option<i32>,
    #[serde(default, rename = "type")]
    pub role_type: Option<String>,
    #[serde(default)]
    pub admin_role_only: bool,
}

/// DPS roles held by a prison user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleDetail {
    pub username: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub active_caseload: Option<PrisonCaseload>,
    #[serde(default)]
    pub dps_roles: Vec<PrisonRole>,
}

/// Filter shared by the prison user search and its two downloads.
///
/// `access_roles` goes out as one `accessRoles` pair per role. Paging only
/// applies to the search, which defaults to page 0 of 20.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrisonUserFilter {
    pub name_filter: Option<String>,
    pub access_roles: Vec<String>,
    pub status: Option<String>,
    pub caseload: Option<String>,
    pub active_caseload: Option<String>,
    pub inclusive_roles: Option<bool>,
    pub show_only_lsas: Option<bool>,
    pub size: Option<u32>,
    pub page: Option<u32>,
}

impl PrisonUserFilter {
    pub fn download_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "nameFilter", self.name_filter.as_deref());
        for role in &self.access_roles {
            pairs.push(("accessRoles", role.clone()));
        }
        push_opt(&mut pairs, "status", self.status.as_deref());
        push_opt(&mut pairs, "caseload", self.caseload.as_deref());
        push_opt(&mut pairs, "activeCaseload", self.active_caseload.as_deref());
        push_opt(&mut pairs, "inclusiveRoles", self.inclusive_roles);
        push_opt(&mut pairs, "showOnlyLSAs", self.show_only_lsas);
        pairs
    }

    pub fn search_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.download_pairs();
        pairs.push(("page", self.page.unwrap_or(0).to_string()));
        pairs.push(("size", self.size.unwrap_or(20).to_string()));
        pairs
    }
}

fn push_opt<V: ToString>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<V>,
) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}
