//! Menu page handler.
//!
//! # Purpose and responsibility
//! Resolves the caller's tiles and banner in one response. Tile resolution is
//! pure and local; the banner may call the Manage Users API.
//!
//! # Key invariants and assumptions
//! - Tiles are ordered and de-duplicated by the catalogue.
//! - A failed banner lookup fails the request; it is never replaced by an
//!   empty banner.
use crate::api::error::{ApiError, api_upstream};
use crate::api::types::{ErrorResponse, MenuPage};
use crate::app::AppState;
use crate::auth::require_caller;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

#[utoipa::path(
    get,
    path = "/",
    tag = "menu",
    responses(
        (status = 200, description = "Tiles visible to the caller and the banner message", body = MenuPage),
        (status = 401, description = "Missing or unreadable bearer token", body = ErrorResponse),
        (status = 502, description = "Notification banner lookup failed", body = ErrorResponse)
    )
)]
/// Return the menu for the signed-in caller.
///
/// # Errors
/// - 401 when the request carries no usable bearer token.
/// - 502 when the caller is eligible for the banner and the lookup fails.
pub(crate) async fn menu_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MenuPage>, ApiError> {
    let caller = require_caller(&headers)?;
    metrics::counter!("menu_page_requests_total").increment(1);

    let message = state
        .banner
        .banner_message(&caller.token, &caller.roles)
        .await
        .map_err(|err| api_upstream("notification banner unavailable", &err))?;

    let menu_tiles = state.catalogue.tiles_for_roles(&caller.roles);
    metrics::counter!("menu_tiles_resolved_total").increment(menu_tiles.len() as u64);
    tracing::debug!(
        username = caller.username.as_deref().unwrap_or("unknown"),
        roles = caller.roles.len(),
        tiles = menu_tiles.len(),
        "menu resolved"
    );

    Ok(Json(MenuPage {
        message,
        menu_tiles,
    }))
}
