mod common;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use common::{get_request, read_json};
use manage_users_client::types::{HealthPing, NotificationMessage};
use manage_users_client::{ClientError, ClientResult};
use menu::api::types::FeatureFlags;
use menu::app::{AppState, build_router};
use menu::banner::BannerFetcher;
use menu::upstream::{NotificationSource, UpstreamHealth};
use menu_test_harness::tokens::mint_token;
use menu_tiles::{AllowListFeature, TileCatalogue};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

struct FakeUpstream {
    banner: Result<&'static str, StatusCode>,
    healthy: bool,
    banner_calls: AtomicUsize,
}

impl FakeUpstream {
    fn new(banner: Result<&'static str, StatusCode>, healthy: bool) -> Arc<Self> {
        Arc::new(Self {
            banner,
            healthy,
            banner_calls: AtomicUsize::new(0),
        })
    }

    fn banner_calls(&self) -> usize {
        self.banner_calls.load(Ordering::SeqCst)
    }
}

fn upstream_error(path: &str, status: StatusCode) -> ClientError {
    ClientError::Status {
        method: Method::GET,
        path: path.to_string(),
        status,
        body: String::new(),
    }
}

#[async_trait]
impl NotificationSource for FakeUpstream {
    async fn notification_banner_message(
        &self,
        _token: &str,
        notification_type: &str,
    ) -> ClientResult<NotificationMessage> {
        self.banner_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(notification_type, "DPSMENU");
        match self.banner {
            Ok(message) => Ok(NotificationMessage {
                message: message.to_string(),
            }),
            Err(status) => Err(upstream_error("/notification/banner/DPSMENU", status)),
        }
    }
}

#[async_trait]
impl UpstreamHealth for FakeUpstream {
    async fn ping(&self) -> ClientResult<HealthPing> {
        if self.healthy {
            Ok(HealthPing {
                status: "UP".to_string(),
            })
        } else {
            Err(upstream_error("/health/ping", StatusCode::SERVICE_UNAVAILABLE))
        }
    }
}

fn app(
    fake: &Arc<FakeUpstream>,
    allow_list: AllowListFeature,
) -> axum::routing::RouterIntoService<axum::body::Body, ()> {
    let state = AppState {
        service_name: "dps-menu".to_string(),
        version: "test".to_string(),
        features: FeatureFlags {
            manage_user_allow_list: allow_list.enabled,
            environment_label: allow_list.environment_label.clone(),
        },
        catalogue: Arc::new(TileCatalogue::new(&allow_list)),
        banner: BannerFetcher::new(fake.clone()),
        upstream_health: fake.clone(),
    };
    build_router(state).into_service()
}

fn titles(body: &serde_json::Value) -> Vec<String> {
    body["menuTiles"]
        .as_array()
        .expect("menuTiles array")
        .iter()
        .map(|tile| tile["title"].as_str().expect("title").to_string())
        .collect()
}

#[tokio::test]
async fn menu_requires_bearer_token() {
    let fake = FakeUpstream::new(Ok("hello"), true);
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/", None))
        .await
        .expect("menu");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(fake.banner_calls(), 0);
}

#[tokio::test]
async fn menu_rejects_undecodable_token() {
    let fake = FakeUpstream::new(Ok("hello"), true);
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/", Some("not-a-jwt")))
        .await
        .expect("menu");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_user_sees_one_tile_and_no_banner() {
    let fake = FakeUpstream::new(Ok("should not be shown"), true);
    let token = mint_token("ITAG_USER", &["CREATE_USER"]).expect("token");
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/", Some(&token)))
        .await
        .expect("menu");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["message"], "");
    assert_eq!(
        body["menuTiles"],
        serde_json::json!([{
            "title": "Create a DPS user",
            "description": "Create an account for a DPS user",
            "href": "/create-user",
            "dataQa": "create_dps_user_link"
        }])
    );
    assert_eq!(fake.banner_calls(), 0);
}

#[tokio::test]
async fn maintain_access_roles_sees_banner() {
    let fake = FakeUpstream::new(Ok("The service is being tested"), true);
    let token = mint_token("ITAG_USER", &["MAINTAIN_ACCESS_ROLES"]).expect("token");
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/", Some(&token)))
        .await
        .expect("menu");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["message"], "The service is being tested");
    assert_eq!(titles(&body), vec!["Search for a DPS user"]);
    assert_eq!(fake.banner_calls(), 1);
}

#[tokio::test]
async fn banner_failure_is_a_bad_gateway() {
    let fake = FakeUpstream::new(Err(StatusCode::INTERNAL_SERVER_ERROR), true);
    let token = mint_token("ITAG_USER", &["MAINTAIN_ACCESS_ROLES_ADMIN"]).expect("token");
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/", Some(&token)))
        .await
        .expect("menu");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json(response).await;
    assert_eq!(body["code"], "upstream_error");
}

#[tokio::test]
async fn combined_roles_with_allow_list_enabled() {
    let fake = FakeUpstream::new(Ok(""), true);
    let token = mint_token(
        "ITAG_USER",
        &["MAINTAIN_OAUTH_USERS", "ROLES_ADMIN", "MANAGE_USER_ALLOW_LIST"],
    )
    .expect("token");
    let response = app(&fake, AllowListFeature::new(true, "Dev"))
        .oneshot(get_request("/", Some(&token)))
        .await
        .expect("menu");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(
        titles(&body),
        vec![
            "Search for an external user",
            "Create an external user",
            "View the groups I administer",
            "Create a group",
            "View roles",
            "Create a role",
            "Search the Dev allow list",
            "Add a user to the Dev allow list",
        ]
    );
}

#[tokio::test]
async fn allow_list_role_alone_sees_nothing_when_disabled() {
    let fake = FakeUpstream::new(Ok(""), true);
    let token = mint_token("ITAG_USER", &["MANAGE_USER_ALLOW_LIST"]).expect("token");
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/", Some(&token)))
        .await
        .expect("menu");
    let body = read_json(response).await;
    assert!(titles(&body).is_empty());
}

#[tokio::test]
async fn ping_is_up() {
    let fake = FakeUpstream::new(Ok(""), false);
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/ping", None))
        .await
        .expect("ping");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "UP");
}

#[tokio::test]
async fn health_follows_upstream() {
    let healthy = FakeUpstream::new(Ok(""), true);
    let response = app(&healthy, AllowListFeature::disabled())
        .oneshot(get_request("/health", None))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "UP");
    assert_eq!(body["components"]["manageUsersApi"]["status"], "UP");

    let unhealthy = FakeUpstream::new(Ok(""), false);
    let response = app(&unhealthy, AllowListFeature::disabled())
        .oneshot(get_request("/health", None))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json(response).await;
    assert_eq!(body["status"], "DOWN");
    assert_eq!(
        body["components"]["manageUsersApi"]["detail"],
        "upstream returned 503"
    );
}

#[tokio::test]
async fn info_reports_feature_switch() {
    let fake = FakeUpstream::new(Ok(""), true);
    let response = app(&fake, AllowListFeature::new(true, "Pre-production"))
        .oneshot(get_request("/info", None))
        .await
        .expect("info");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["name"], "dps-menu");
    assert_eq!(body["features"]["manage_user_allow_list"], true);
    assert_eq!(body["features"]["environment_label"], "Pre-production");
}

#[tokio::test]
async fn openapi_document_lists_menu_routes() {
    let fake = FakeUpstream::new(Ok(""), true);
    let response = app(&fake, AllowListFeature::disabled())
        .oneshot(get_request("/v1/openapi.json", None))
        .await
        .expect("openapi");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    for path in ["/", "/ping", "/health", "/info"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
    assert!(body["components"]["schemas"].get("MenuTile").is_some());
}
