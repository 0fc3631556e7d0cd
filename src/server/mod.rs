pub mod app;
pub mod handlers;
pub mod middleware;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::AppConfig;
use crate::database::connection::{establish_connection, get_database_url};
use crate::database::migrations::Migrator;
use crate::errors::DirectoryError;
use crate::services::SeedService;

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            DirectoryError::ActivityNotFound(_) | DirectoryError::OrganizationNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
            DirectoryError::MalformedCoordinates(_)
            | DirectoryError::MissingBuilding { .. }
            | DirectoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

pub async fn start_server(config: AppConfig, seed: bool) -> Result<()> {
    let database_url = get_database_url(Some(&config.database_path));
    let db = establish_connection(&database_url).await?;

    Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    if seed {
        SeedService::new(db.clone()).seed_demo_data().await?;
    }

    let port = config.port;
    let app = app::create_app(db, Arc::new(config)).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                                      - Health check");
    info!("  /api/v1/auth/token                           - Issue or return the API key");
    info!("  /api/v1/organization/:id                     - Organization by id");
    info!("  /api/v1/organization/name/:name              - Organization by unique name");
    info!("  /api/v1/organization/building/:address       - Organizations at a building");
    info!("  /api/v1/organization/activity/:name          - Organizations by exact activity");
    info!("  /api/v1/organization/activity-tree/:name     - Organizations by activity subtree");
    info!("  /api/v1/organization/geo/radius              - Organizations within a radius");
    info!("  /api/v1/organization/geo/bounds              - Organizations within a rectangle");
    info!("  /api/v1/activity/set-max-level               - Set an activity's nesting cap");
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Recreating database from scratch");
            Migrator::fresh(&db).await?;
        }
    }

    Ok(())
}
