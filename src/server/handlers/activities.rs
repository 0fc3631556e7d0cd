use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::database::entities::activities;
use crate::errors::DirectoryError;
use crate::server::app::AppState;

#[derive(Serialize, Deserialize)]
pub struct SetMaxLevelRequest {
    pub name: String,
    #[serde(default = "default_max_level")]
    pub max_level: i32,
}

fn default_max_level() -> i32 {
    3
}

#[derive(Serialize, Deserialize)]
pub struct ActivityResponse {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub max_level: i32,
}

impl From<activities::Model> for ActivityResponse {
    fn from(model: activities::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
            max_level: model.max_level,
        }
    }
}

/// Overwrite the declared nesting cap of the named activity.
pub async fn set_activity_max_level(
    State(state): State<AppState>,
    Json(payload): Json<SetMaxLevelRequest>,
) -> Result<Json<ActivityResponse>, DirectoryError> {
    let updated = state
        .activities
        .set_max_level_by_name(&payload.name, payload.max_level)
        .await?
        .ok_or_else(|| DirectoryError::ActivityNotFound(payload.name.clone()))?;

    Ok(Json(updated.into()))
}
