use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
};

use crate::database::entities::{activities, buildings, organizations};
use crate::errors::{DirectoryError, DirectoryResult};
use crate::geo::{BoundsFilter, RadiusFilter};
use crate::hierarchy::ActivityTree;

/// Read-only queries over organizations. Every operation is a single
/// logical read; result ordering is whatever the store returns.
#[derive(Clone)]
pub struct OrganizationService {
    db: DatabaseConnection,
}

impl OrganizationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> DirectoryResult<Option<organizations::Model>> {
        let organization = organizations::Entity::find_by_id(id).one(&self.db).await?;
        Ok(organization)
    }

    /// Organization names are unique, so this returns at most one row.
    pub async fn get_by_name(&self, name: &str) -> DirectoryResult<Option<organizations::Model>> {
        let organization = organizations::Entity::find()
            .filter(organizations::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(organization)
    }

    /// Organizations hosted at the building with exactly this address.
    pub async fn by_building_address(
        &self,
        address: &str,
    ) -> DirectoryResult<Vec<organizations::Model>> {
        let organizations = organizations::Entity::find()
            .join(JoinType::InnerJoin, organizations::Relation::Buildings.def())
            .filter(buildings::Column::Address.eq(address))
            .all(&self.db)
            .await?;

        Ok(organizations)
    }

    /// Organizations whose activity is named exactly `name`; descendants of
    /// that activity are not included.
    pub async fn by_activity_exact(
        &self,
        name: &str,
    ) -> DirectoryResult<Vec<organizations::Model>> {
        let organizations = organizations::Entity::find()
            .join(
                JoinType::InnerJoin,
                organizations::Relation::Activities.def(),
            )
            .filter(activities::Column::Name.eq(name))
            .all(&self.db)
            .await?;

        Ok(organizations)
    }

    /// Organizations whose activity is the named one or any of its
    /// transitive descendants.
    ///
    /// The closure is computed over one scan of the activities table; an
    /// unresolvable name is surfaced as not-found rather than an empty
    /// tree.
    pub async fn by_activity_tree(
        &self,
        name: &str,
    ) -> DirectoryResult<Vec<organizations::Model>> {
        let rows = activities::Entity::find().all(&self.db).await?;
        let tree = ActivityTree::from_rows(
            rows.into_iter()
                .map(|activity| (activity.id, activity.name, activity.parent_id)),
        );

        let Some(closure) = tree.closure_by_name(name) else {
            return Err(DirectoryError::ActivityNotFound(name.to_string()));
        };

        let ids: Vec<i32> = closure.into_iter().collect();
        let organizations = organizations::Entity::find()
            .filter(organizations::Column::ActivityId.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(organizations)
    }

    /// Organizations whose building lies within `radius_km` of the center
    /// point, by great-circle distance.
    pub async fn in_radius(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> DirectoryResult<Vec<organizations::Model>> {
        let filter = RadiusFilter::new(lat, lon, radius_km)?;
        self.filter_by_coordinates(move |lat, lon| filter.contains(lat, lon))
            .await
    }

    /// Organizations whose building lies inside the inclusive rectangle.
    pub async fn in_bounds(
        &self,
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    ) -> DirectoryResult<Vec<organizations::Model>> {
        let filter = BoundsFilter::new(min_lat, min_lon, max_lat, max_lon)?;
        self.filter_by_coordinates(move |lat, lon| filter.contains(lat, lon))
            .await
    }

    /// Fetch organizations with their buildings in one read and keep the
    /// ones whose coordinates satisfy the predicate.
    async fn filter_by_coordinates<F>(
        &self,
        predicate: F,
    ) -> DirectoryResult<Vec<organizations::Model>>
    where
        F: Fn(f64, f64) -> bool,
    {
        let rows = organizations::Entity::find()
            .find_also_related(buildings::Entity)
            .all(&self.db)
            .await?;

        let mut matched = Vec::new();
        for (organization, building) in rows {
            let building = building.ok_or(DirectoryError::MissingBuilding {
                organization: organization.id,
                building: organization.building_id,
            })?;
            let (lat, lon) = building.coordinate_pair()?;
            if predicate(lat, lon) {
                matched.push(organization);
            }
        }

        Ok(matched)
    }
}
