//! HTTP API request/response types.
//!
//! # Purpose
//! Defines payload shapes for the menu API and OpenAPI schema generation.
use menu_tiles::MenuTile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Everything the menu page needs to render.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MenuPage {
    /// Banner text; empty when there is nothing to show.
    pub message: String,
    pub menu_tiles: Vec<MenuTile>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct FeatureFlags {
    pub manage_user_allow_list: bool,
    pub environment_label: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub features: FeatureFlags,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PingStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthComponents {
    pub manage_users_api: ComponentHealth,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub components: HealthComponents,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}
