//! HTTP transport for the Manage Users API.
//!
//! # Purpose and responsibility
//! Builds requests against the configured base URL, attaches the caller's
//! bearer token, and decodes JSON responses.
//!
//! # Key invariants and assumptions
//! - Exactly one attempt per call; timeouts come from the shared client.
//! - Identifiers placed in the path are percent-encoded as single segments,
//!   so a `/` or `?` in a username cannot change the route.
//! - Absent filter fields are left off the query string.
//!
//! # Security considerations
//! - Tokens are forwarded but never logged.
use crate::errors::{ClientError, ClientResult};
use crate::types::{
    ChildGroup, CreateChildGroupRequest, CreateEmailDomainRequest, CreateExternalUserRequest,
    CreateGroupRequest, CreateLinkedCentralAdminRequest, CreateLinkedGeneralUserRequest,
    CreateLinkedLocalAdminRequest, CreateRoleRequest, CreateUserRequest, DeactivateReason,
    EmailAddress, EmailDomain, ExternalUser, ExternalUserRole, ExternalUserSearch, GroupDetails,
    HealthPing, NotificationMessage, PagedList, PrisonAdminUserSummary, PrisonCaseload,
    PrisonStaffNewUser, PrisonStaffUser, PrisonUserDetails, PrisonUserDownloadSummary,
    PrisonUserFilter, PrisonUserSearchSummary, Role, UpdateGroupNameRequest,
    UpdateRoleAdminTypeRequest, UpdateRoleDescriptionRequest, UpdateRoleNameRequest,
    UpdateUserEmailRequest, User, UserAllowlistAddRequest, UserAllowlistDetail,
    UserAllowlistPatchRequest, UserAllowlistQuery, UserCaseloadDetail, UserGroup, UserRole,
    UserRoleDetail,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connection settings for the upstream API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub timeout: Duration,
}

/// Client for the Manage Users API.
///
/// # Summary
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ManageUsersClient {
    base_url: Url,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct PagedRolesQuery<'a> {
    page: u32,
    size: u32,
    #[serde(rename = "roleName")]
    role_name: &'a str,
    #[serde(rename = "roleCode")]
    role_code: &'a str,
    #[serde(rename = "adminTypes")]
    admin_types: &'a str,
}

#[derive(Serialize)]
struct EmailChange<'a> {
    email: &'a str,
}

impl ManageUsersClient {
    /// Build a client with its own connection pool.
    ///
    /// # Errors
    /// - Returns [`ClientError::Http`] if the TLS backend cannot initialize.
    /// - Returns [`ClientError::InvalidBaseUrl`] if the URL cannot carry a path.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Self::with_http_client(&config.url, http)
    }

    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> ClientResult<Self> {
        let invalid = || ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
        };
        let base_url = Url::parse(base_url).map_err(|_| invalid())?;
        if base_url.cannot_be_a_base() {
            return Err(invalid());
        }
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Base URL with each segment appended and percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked at construction: the base always accepts path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn call(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ClientResult<Response> {
        let url = self.endpoint(segments);
        let path = url.path().to_string();
        let mut builder = self.http.request(method.clone(), url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        let response = prepare(builder).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, %method, %path, "manage users api request failed");
        Err(ClientError::Status {
            method,
            path,
            status,
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, segments: &[&str]) -> ClientResult<T> {
        let response = self
            .call(Method::GET, segments, Some(token), |builder| builder)
            .await?;
        Ok(response.json().await?)
    }

    async fn get_json_with_query<T, Q>(
        &self,
        token: &str,
        segments: &[&str],
        query: &Q,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .call(Method::GET, segments, Some(token), |builder| {
                builder.query(query)
            })
            .await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        token: &str,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<Response> {
        self.call(method, segments, Some(token), |builder| builder.json(body))
            .await
    }

    async fn send_json_for<T, B>(
        &self,
        method: Method,
        token: &str,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send_json(method, token, segments, body).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, method: Method, token: &str, segments: &[&str]) -> ClientResult<()> {
        self.call(method, segments, Some(token), |builder| builder)
            .await?;
        Ok(())
    }

    /// Upstream liveness check; sent without a token.
    pub async fn ping(&self) -> ClientResult<HealthPing> {
        let response = self
            .call(Method::GET, &["health", "ping"], None, |builder| builder)
            .await?;
        Ok(response.json().await?)
    }

    pub async fn notification_banner_message(
        &self,
        token: &str,
        notification_type: &str,
    ) -> ClientResult<NotificationMessage> {
        self.get_json(token, &["notification", "banner", notification_type])
            .await
    }

    // Signed-in user.

    pub async fn current_user(&self, token: &str) -> ClientResult<User> {
        self.get_json(token, &["users", "me"]).await
    }

    pub async fn current_roles(&self, token: &str) -> ClientResult<Vec<ExternalUserRole>> {
        self.get_json(token, &["users", "me", "roles"]).await
    }

    /// Fetch a user's email, including unverified addresses.
    ///
    /// # Returns
    /// - `Ok(None)` when the upstream answers 404.
    ///
    /// # Errors
    /// - Any other failure is returned unchanged.
    pub async fn get_user_email(
        &self,
        token: &str,
        username: &str,
    ) -> ClientResult<Option<EmailAddress>> {
        match self
            .get_json_with_query(
                token,
                &["users", username, "email"],
                &[("unverified", "true")],
            )
            .await
        {
            Ok(email) => Ok(Some(email)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    // Email domains.

    pub async fn get_all_email_domains(&self, token: &str) -> ClientResult<PagedList<EmailDomain>> {
        self.get_json(token, &["email-domains"]).await
    }

    pub async fn create_email_domain(
        &self,
        token: &str,
        domain: &CreateEmailDomainRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["email-domains"], domain)
            .await?;
        Ok(())
    }

    pub async fn delete_email_domain(&self, token: &str, domain_id: &str) -> ClientResult<()> {
        self.send_empty(Method::DELETE, token, &["email-domains", domain_id])
            .await
    }

    // External (auth) users.

    pub async fn create_external_user(
        &self,
        token: &str,
        user: &CreateExternalUserRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["externalusers", "create"], user)
            .await?;
        Ok(())
    }

    pub async fn get_user(&self, token: &str, user_id: &str) -> ClientResult<ExternalUser> {
        self.get_json(token, &["externalusers", "id", user_id]).await
    }

    pub async fn assignable_groups(&self, token: &str) -> ClientResult<Vec<UserGroup>> {
        self.get_json(token, &["externalusers", "me", "assignable-groups"])
            .await
    }

    pub async fn searchable_roles(&self, token: &str) -> ClientResult<Vec<UserRole>> {
        self.get_json(token, &["externalusers", "me", "searchable-roles"])
            .await
    }

    /// Search external users; a single role or group is sent as a one-element filter.
    pub async fn user_search(
        &self,
        token: &str,
        search: &ExternalUserSearch,
    ) -> ClientResult<PagedList<ExternalUser>> {
        self.get_json_with_query(token, &["externalusers", "search"], &search.query_pairs())
            .await
    }

    pub async fn assignable_roles(&self, token: &str, user_id: &str) -> ClientResult<Vec<UserRole>> {
        self.get_json(token, &["externalusers", user_id, "assignable-roles"])
            .await
    }

    /// Disable an external user, recording why.
    pub async fn deactivate_external_user(
        &self,
        token: &str,
        user_id: &str,
        reason: &str,
    ) -> ClientResult<()> {
        let body = DeactivateReason {
            reason: reason.to_string(),
        };
        self.send_json(Method::PUT, token, &["externalusers", user_id, "disable"], &body)
            .await?;
        Ok(())
    }

    pub async fn disable_external_user(&self, token: &str, user_id: &str) -> ClientResult<()> {
        self.send_empty(Method::PUT, token, &["externalusers", user_id, "disable"])
            .await
    }

    pub async fn enable_external_user(&self, token: &str, user_id: &str) -> ClientResult<()> {
        self.send_empty(Method::PUT, token, &["externalusers", user_id, "enable"])
            .await
    }

    pub async fn amend_user_email(
        &self,
        token: &str,
        user_id: &str,
        email: &UpdateUserEmailRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["externalusers", user_id, "email"], email)
            .await?;
        Ok(())
    }

    pub async fn add_user_group(&self, token: &str, user_id: &str, group: &str) -> ClientResult<()> {
        self.send_empty(Method::PUT, token, &["externalusers", user_id, "groups", group])
            .await
    }

    pub async fn remove_user_group(
        &self,
        token: &str,
        user_id: &str,
        group: &str,
    ) -> ClientResult<()> {
        self.send_empty(Method::DELETE, token, &["externalusers", user_id, "groups", group])
            .await
    }

    /// Direct group memberships only; child groups are not expanded.
    pub async fn user_groups(&self, token: &str, user_id: &str) -> ClientResult<Vec<UserGroup>> {
        self.get_json_with_query(
            token,
            &["externalusers", user_id, "groups"],
            &[("children", "false")],
        )
        .await
    }

    pub async fn external_user_add_roles(
        &self,
        token: &str,
        user_id: &str,
        roles: &[String],
    ) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["externalusers", user_id, "roles"], roles)
            .await?;
        Ok(())
    }

    pub async fn external_user_roles(&self, token: &str, user_id: &str) -> ClientResult<Vec<UserRole>> {
        self.get_json(token, &["externalusers", user_id, "roles"])
            .await
    }

    pub async fn delete_external_user_role(
        &self,
        token: &str,
        user_id: &str,
        role: &str,
    ) -> ClientResult<()> {
        self.send_empty(Method::DELETE, token, &["externalusers", user_id, "roles", role])
            .await
    }

    pub async fn get_users_in_crs_group(
        &self,
        token: &str,
        group_code: &str,
    ) -> ClientResult<Vec<ExternalUser>> {
        self.get_json(token, &["externalusers", "crsgroup", group_code])
            .await
    }

    // Groups.

    pub async fn create_group(&self, token: &str, group: &CreateGroupRequest) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["groups"], group)
            .await?;
        Ok(())
    }

    pub async fn group_details(&self, token: &str, group: &str) -> ClientResult<GroupDetails> {
        self.get_json(token, &["groups", group]).await
    }

    pub async fn change_group_name(
        &self,
        token: &str,
        group: &str,
        request: &UpdateGroupNameRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::PUT, token, &["groups", group], request)
            .await?;
        Ok(())
    }

    pub async fn delete_group(&self, token: &str, group: &str) -> ClientResult<()> {
        self.send_empty(Method::DELETE, token, &["groups", group])
            .await
    }

    pub async fn create_child_group(
        &self,
        token: &str,
        group: &CreateChildGroupRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["groups", "child"], group)
            .await?;
        Ok(())
    }

    pub async fn child_group_details(&self, token: &str, group: &str) -> ClientResult<ChildGroup> {
        self.get_json(token, &["groups", "child", group]).await
    }

    pub async fn change_child_group_name(
        &self,
        token: &str,
        group: &str,
        request: &UpdateGroupNameRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::PUT, token, &["groups", "child", group], request)
            .await?;
        Ok(())
    }

    pub async fn delete_child_group(&self, token: &str, group: &str) -> ClientResult<()> {
        self.send_empty(Method::DELETE, token, &["groups", "child", group])
            .await
    }

    pub async fn get_all_crs_groups(&self, token: &str) -> ClientResult<Vec<UserGroup>> {
        self.get_json(token, &["groups", "subset", "crs"]).await
    }

    // Linked prison accounts.

    pub async fn create_linked_central_admin_user(
        &self,
        token: &str,
        request: &CreateLinkedCentralAdminRequest,
    ) -> ClientResult<PrisonStaffUser> {
        self.send_json_for(Method::POST, token, &["linkedprisonusers", "admin"], request)
            .await
    }

    pub async fn create_linked_general_user(
        &self,
        token: &str,
        request: &CreateLinkedGeneralUserRequest,
    ) -> ClientResult<PrisonStaffUser> {
        self.send_json_for(Method::POST, token, &["linkedprisonusers", "general"], request)
            .await
    }

    pub async fn create_linked_lsa_user(
        &self,
        token: &str,
        request: &CreateLinkedLocalAdminRequest,
    ) -> ClientResult<PrisonStaffUser> {
        self.send_json_for(Method::POST, token, &["linkedprisonusers", "lsa"], request)
            .await
    }

    // Prison (DPS) users.

    pub async fn create_user(
        &self,
        token: &str,
        user: &CreateUserRequest,
    ) -> ClientResult<PrisonStaffNewUser> {
        self.send_json_for(Method::POST, token, &["prisonusers"], user)
            .await
    }

    pub async fn download_lsa_search(
        &self,
        token: &str,
        filter: &PrisonUserFilter,
    ) -> ClientResult<Vec<PrisonAdminUserSummary>> {
        self.get_json_with_query(
            token,
            &["prisonusers", "download", "admins"],
            &filter.download_pairs(),
        )
        .await
    }

    pub async fn download_user_search(
        &self,
        token: &str,
        filter: &PrisonUserFilter,
    ) -> ClientResult<Vec<PrisonUserDownloadSummary>> {
        self.get_json_with_query(token, &["prisonusers", "download"], &filter.download_pairs())
            .await
    }

    /// Paged prison user search; page 0 of 20 unless the filter says otherwise.
    pub async fn dps_user_search(
        &self,
        token: &str,
        filter: &PrisonUserFilter,
    ) -> ClientResult<PagedList<PrisonUserSearchSummary>> {
        self.get_json_with_query(token, &["prisonusers", "search"], &filter.search_pairs())
            .await
    }

    pub async fn get_caseloads(&self, token: &str) -> ClientResult<Vec<PrisonCaseload>> {
        self.get_json(token, &["prisonusers", "reference-data", "caseloads"])
            .await
    }

    pub async fn get_user_caseloads(
        &self,
        token: &str,
        username: &str,
    ) -> ClientResult<UserCaseloadDetail> {
        self.get_json(token, &["prisonusers", username, "caseloads"])
            .await
    }

    /// Caseloads for the signed-in user; `auth` users have none upstream.
    pub async fn current_user_caseloads(
        &self,
        token: &str,
        auth_source: &str,
        username: &str,
    ) -> ClientResult<UserCaseloadDetail> {
        if auth_source == "auth" {
            return Ok(UserCaseloadDetail::default());
        }
        self.get_user_caseloads(token, username).await
    }

    pub async fn add_user_caseloads(
        &self,
        token: &str,
        username: &str,
        caseloads: &[String],
    ) -> ClientResult<UserCaseloadDetail> {
        self.send_json_for(
            Method::POST,
            token,
            &["prisonusers", username, "caseloads"],
            caseloads,
        )
        .await
    }

    pub async fn remove_user_caseload(
        &self,
        token: &str,
        username: &str,
        caseload_id: &str,
    ) -> ClientResult<UserCaseloadDetail> {
        let response = self
            .call(
                Method::DELETE,
                &["prisonusers", username, "caseloads", caseload_id],
                Some(token),
                |builder| builder,
            )
            .await?;
        Ok(response.json().await?)
    }

    pub async fn get_dps_user(&self, token: &str, username: &str) -> ClientResult<PrisonUserDetails> {
        self.get_json(token, &["prisonusers", username, "details"])
            .await
    }

    pub async fn disable_prison_user(&self, token: &str, username: &str) -> ClientResult<()> {
        self.send_empty(Method::PUT, token, &["prisonusers", username, "disable-user"])
            .await
    }

    pub async fn enable_prison_user(&self, token: &str, username: &str) -> ClientResult<()> {
        self.send_empty(Method::PUT, token, &["prisonusers", username, "enable-user"])
            .await
    }

    /// Change a prison user's email; returns the raw response text.
    pub async fn change_dps_email(
        &self,
        token: &str,
        username: &str,
        email: &str,
    ) -> ClientResult<String> {
        let response = self
            .send_json(
                Method::POST,
                token,
                &["prisonusers", username, "email"],
                &EmailChange { email },
            )
            .await?;
        Ok(response.text().await?)
    }

    /// Pull the user's email from NOMIS into the auth record.
    pub async fn sync_dps_email(&self, token: &str, username: &str) -> ClientResult<()> {
        self.send_empty(Method::POST, token, &["prisonusers", username, "email", "sync"])
            .await
    }

    pub async fn context_user_roles(
        &self,
        token: &str,
        username: &str,
    ) -> ClientResult<UserRoleDetail> {
        self.get_json(token, &["prisonusers", username, "roles"])
            .await
    }

    pub async fn add_dps_user_roles(
        &self,
        token: &str,
        username: &str,
        roles: &[String],
    ) -> ClientResult<UserRoleDetail> {
        self.send_json_for(Method::POST, token, &["prisonusers", username, "roles"], roles)
            .await
    }

    pub async fn remove_dps_user_role(
        &self,
        token: &str,
        username: &str,
        role_code: &str,
    ) -> ClientResult<UserRoleDetail> {
        let response = self
            .call(
                Method::DELETE,
                &["prisonusers", username, "roles", role_code],
                Some(token),
                |builder| builder,
            )
            .await?;
        Ok(response.json().await?)
    }

    // Roles.

    pub async fn get_roles(&self, token: &str, admin_type: &str) -> ClientResult<Vec<Role>> {
        self.get_json_with_query(token, &["roles"], &[("adminTypes", admin_type)])
            .await
    }

    /// Page through roles; an `ALL` admin type is sent as no filter.
    pub async fn get_paged_roles(
        &self,
        token: &str,
        page: u32,
        size: u32,
        role_name: &str,
        role_code: &str,
        admin_type: &str,
    ) -> ClientResult<PagedList<Role>> {
        let admin_types = if admin_type == "ALL" { "" } else { admin_type };
        let query = PagedRolesQuery {
            page,
            size,
            role_name,
            role_code,
            admin_types,
        };
        self.get_json_with_query(token, &["roles", "paged"], &query)
            .await
    }

    pub async fn get_role_details(&self, token: &str, role_code: &str) -> ClientResult<Role> {
        self.get_json(token, &["roles", role_code]).await
    }

    pub async fn create_role(&self, token: &str, role: &CreateRoleRequest) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["roles"], role).await?;
        Ok(())
    }

    pub async fn change_role_name(
        &self,
        token: &str,
        role_code: &str,
        request: &UpdateRoleNameRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::PUT, token, &["roles", role_code], request)
            .await?;
        Ok(())
    }

    pub async fn change_role_description(
        &self,
        token: &str,
        role_code: &str,
        request: &UpdateRoleDescriptionRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::PUT, token, &["roles", role_code, "description"], request)
            .await?;
        Ok(())
    }

    pub async fn change_role_admin_type(
        &self,
        token: &str,
        role_code: &str,
        request: &UpdateRoleAdminTypeRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::PUT, token, &["roles", role_code, "admintype"], request)
            .await?;
        Ok(())
    }

    // Allow list.

    pub async fn add_allowlist_user(
        &self,
        token: &str,
        request: &UserAllowlistAddRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::POST, token, &["users", "allowlist"], request)
            .await?;
        Ok(())
    }

    pub async fn get_all_allowlist_users(
        &self,
        token: &str,
        query: &UserAllowlistQuery,
    ) -> ClientResult<PagedList<UserAllowlistDetail>> {
        self.get_json_with_query(token, &["users", "allowlist"], query)
            .await
    }

    pub async fn get_allowlist_user(
        &self,
        token: &str,
        username: &str,
    ) -> ClientResult<UserAllowlistDetail> {
        self.get_json(token, &["users", "allowlist", username])
            .await
    }

    pub async fn update_allowlist_user_access(
        &self,
        token: &str,
        id: &str,
        request: &UserAllowlistPatchRequest,
    ) -> ClientResult<()> {
        self.send_json(Method::PATCH, token, &["users", "allowlist", id], request)
            .await?;
        Ok(())
    }
}
