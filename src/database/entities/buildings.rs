use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{DirectoryError, DirectoryResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "buildings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub address: String,
    /// JSON array stored as string, exactly [latitude, longitude]
    #[sea_orm(column_type = "Text")]
    pub coordinates: String,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::organizations::Entity")]
    Organizations,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parse the stored pair as `(latitude, longitude)`.
    ///
    /// The schema cannot enforce the array length, so it is checked here;
    /// anything but exactly two numbers is a data error.
    pub fn coordinate_pair(&self) -> DirectoryResult<(f64, f64)> {
        let values: Vec<f64> = serde_json::from_str(&self.coordinates)
            .map_err(|_| DirectoryError::MalformedCoordinates(self.id))?;
        match values.as_slice() {
            [lat, lon] => Ok((*lat, *lon)),
            _ => Err(DirectoryError::MalformedCoordinates(self.id)),
        }
    }
}

/// Serialize a `(lat, lon)` pair into the stored column format.
pub fn encode_coordinates(lat: f64, lon: f64) -> String {
    serde_json::to_string(&[lat, lon]).expect("two floats always serialize")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn building(coordinates: &str) -> Model {
        Model {
            id: 1,
            address: "г. Москва, ул. Тверская, д. 1".to_string(),
            coordinates: coordinates.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn coordinate_pair_round_trips() {
        let model = building(&encode_coordinates(55.7558, 37.6173));
        assert_eq!(model.coordinate_pair().unwrap(), (55.7558, 37.6173));
    }

    #[test]
    fn coordinate_pair_rejects_wrong_length() {
        assert!(building("[55.7558]").coordinate_pair().is_err());
        assert!(building("[1.0, 2.0, 3.0]").coordinate_pair().is_err());
    }

    #[test]
    fn coordinate_pair_rejects_garbage() {
        assert!(building("not json").coordinate_pair().is_err());
    }
}
