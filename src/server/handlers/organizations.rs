use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::entities::organizations;
use crate::errors::DirectoryError;
use crate::server::app::AppState;

#[derive(Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub id: i32,
    pub name: String,
    pub phone_numbers: Vec<String>,
    pub building_id: i32,
    pub activity_id: i32,
}

impl From<organizations::Model> for OrganizationResponse {
    fn from(model: organizations::Model) -> Self {
        let phone_numbers = model.phone_list();
        Self {
            id: model.id,
            name: model.name,
            phone_numbers,
            building_id: model.building_id,
            activity_id: model.activity_id,
        }
    }
}

#[derive(Deserialize)]
pub struct RadiusQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: f64,
}

#[derive(Deserialize)]
pub struct BoundsQuery {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

fn to_responses(models: Vec<organizations::Model>) -> Vec<OrganizationResponse> {
    models.into_iter().map(Into::into).collect()
}

pub async fn get_organization(
    State(state): State<AppState>,
    Path(organization_id): Path<i32>,
) -> Result<Json<OrganizationResponse>, DirectoryError> {
    let organization = state
        .organizations
        .get_by_id(organization_id)
        .await?
        .ok_or_else(|| DirectoryError::OrganizationNotFound(organization_id.to_string()))?;

    Ok(Json(organization.into()))
}

pub async fn get_organization_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<OrganizationResponse>, DirectoryError> {
    let organization = state
        .organizations
        .get_by_name(&name)
        .await?
        .ok_or_else(|| DirectoryError::OrganizationNotFound(name.clone()))?;

    Ok(Json(organization.into()))
}

pub async fn get_organizations_by_building_address(
    State(state): State<AppState>,
    Path(building_address): Path<String>,
) -> Result<Json<Vec<OrganizationResponse>>, DirectoryError> {
    let organizations = state
        .organizations
        .by_building_address(&building_address)
        .await?;

    Ok(Json(to_responses(organizations)))
}

pub async fn get_organizations_by_activity(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
) -> Result<Json<Vec<OrganizationResponse>>, DirectoryError> {
    let organizations = state.organizations.by_activity_exact(&activity_name).await?;

    Ok(Json(to_responses(organizations)))
}

pub async fn get_organizations_by_activity_tree(
    State(state): State<AppState>,
    Path(activity_name): Path<String>,
) -> Result<Json<Vec<OrganizationResponse>>, DirectoryError> {
    let organizations = state.organizations.by_activity_tree(&activity_name).await?;

    Ok(Json(to_responses(organizations)))
}

pub async fn get_organizations_in_radius(
    State(state): State<AppState>,
    Query(query): Query<RadiusQuery>,
) -> Result<Json<Vec<OrganizationResponse>>, DirectoryError> {
    let organizations = state
        .organizations
        .in_radius(query.lat, query.lon, query.radius_km)
        .await?;

    Ok(Json(to_responses(organizations)))
}

pub async fn get_organizations_in_bounds(
    State(state): State<AppState>,
    Query(query): Query<BoundsQuery>,
) -> Result<Json<Vec<OrganizationResponse>>, DirectoryError> {
    let organizations = state
        .organizations
        .in_bounds(query.min_lat, query.min_lon, query.max_lat, query.max_lon)
        .await?;

    Ok(Json(to_responses(organizations)))
}
