use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::services::{ActivityService, AuthService, OrganizationService};

use super::handlers::{activities, auth, health, organizations};
use super::middleware::api_key::require_api_key;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub organizations: OrganizationService,
    pub activities: ActivityService,
    pub auth: AuthService,
}

pub async fn create_app(db: DatabaseConnection, config: Arc<AppConfig>) -> Result<Router> {
    let state = AppState {
        organizations: OrganizationService::new(db.clone()),
        activities: ActivityService::new(db.clone()),
        auth: AuthService::new(db.clone()),
        db,
        config: config.clone(),
    };

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any)
            .allow_credentials(false),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any)
            .allow_credentials(false),
    };

    // Everything except health and token issuance sits behind the API key
    let protected = Router::new()
        .route(
            "/api/v1/organization/:organization_id",
            get(organizations::get_organization),
        )
        .route(
            "/api/v1/organization/name/:name",
            get(organizations::get_organization_by_name),
        )
        .route(
            "/api/v1/organization/building/:building_address",
            get(organizations::get_organizations_by_building_address),
        )
        .route(
            "/api/v1/organization/activity/:activity_name",
            get(organizations::get_organizations_by_activity),
        )
        .route(
            "/api/v1/organization/activity-tree/:activity_name",
            get(organizations::get_organizations_by_activity_tree),
        )
        .route(
            "/api/v1/organization/geo/radius",
            get(organizations::get_organizations_in_radius),
        )
        .route(
            "/api/v1/organization/geo/bounds",
            get(organizations::get_organizations_in_bounds),
        )
        .route(
            "/api/v1/activity/set-max-level",
            post(activities::set_activity_max_level),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/auth/token", get(auth::get_token))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}
