//! OpenAPI schema aggregation for the menu API.
use crate::api::{
    menu, system,
    types::{
        ComponentHealth, ErrorResponse, FeatureFlags, HealthComponents, HealthStatus, MenuPage,
        PingStatus, ServiceInfo,
    },
};
use menu_tiles::MenuTile;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "dps-menu",
        version = "v1",
        description = "Role-gated DPS admin menu"
    ),
    paths(menu::menu_page, system::ping, system::health, system::info),
    components(schemas(
        MenuPage,
        MenuTile,
        ErrorResponse,
        PingStatus,
        HealthStatus,
        HealthComponents,
        ComponentHealth,
        ServiceInfo,
        FeatureFlags
    )),
    tags(
        (name = "menu", description = "Admin menu tiles"),
        (name = "system", description = "Liveness, health and service info")
    )
)]
pub struct ApiDoc;
