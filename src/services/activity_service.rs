use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::database::entities::activities;
use crate::errors::{DirectoryError, DirectoryResult};

#[derive(Clone)]
pub struct ActivityService {
    db: DatabaseConnection,
}

impl ActivityService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look an activity up by name. Names are not unique; the lowest id
    /// wins so repeated calls resolve to the same row.
    pub async fn get_by_name(&self, name: &str) -> DirectoryResult<Option<activities::Model>> {
        let activity = activities::Entity::find()
            .filter(activities::Column::Name.eq(name))
            .order_by_asc(activities::Column::Id)
            .one(&self.db)
            .await?;

        Ok(activity)
    }

    /// Overwrite the declared nesting cap of the activity named `name`.
    ///
    /// The cap is a declarative label only; it is not validated against the
    /// node's actual depth in the tree, and closure queries never consult
    /// it. Returns `Ok(None)` when the name matches no activity.
    pub async fn set_max_level_by_name(
        &self,
        name: &str,
        max_level: i32,
    ) -> DirectoryResult<Option<activities::Model>> {
        if max_level < 1 {
            return Err(DirectoryError::Validation(format!(
                "max_level must be at least 1, got {}",
                max_level
            )));
        }

        let Some(activity) = self.get_by_name(name).await? else {
            return Ok(None);
        };

        let mut active: activities::ActiveModel = activity.into();
        active.max_level = Set(max_level);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }
}
