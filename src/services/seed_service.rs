//! Demo dataset loader
//!
//! Populates an empty database with a small directory: buildings in three
//! cities, a four-root activity tree, and organizations referencing both.
//! Idempotent: a database that already has buildings is left untouched.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::{debug, info};

use crate::database::entities::{activities, buildings, organizations};
use crate::database::entities::buildings::encode_coordinates;
use crate::database::entities::organizations::encode_phones;
use crate::errors::DirectoryResult;

/// (address, latitude, longitude)
const BUILDINGS: &[(&str, f64, f64)] = &[
    ("г. Москва, ул. Тверская, д. 1", 55.757718, 37.612276),
    ("г. Москва, ул. Арбат, д. 10", 55.752023, 37.591094),
    ("г. Москва, Красная площадь, д. 3", 55.753544, 37.621202),
    ("г. Москва, ул. Новый Арбат, д. 15", 55.752675, 37.583894),
    ("г. Москва, Ленинский проспект, д. 45", 55.703636, 37.587152),
    (
        "г. Санкт-Петербург, Невский проспект, д. 28",
        59.935241,
        30.327894,
    ),
    (
        "г. Санкт-Петербург, ул. Большая Морская, д. 18",
        59.933861,
        30.309118,
    ),
    ("г. Новосибирск, ул. Ленина, д. 1", 55.030199, 82.920430),
];

/// (name, parent index into this slice, declared nesting cap)
const ACTIVITIES: &[(&str, Option<usize>, i32)] = &[
    ("Еда", None, 3),
    ("Автомобили", None, 3),
    ("Услуги", None, 2),
    ("Медицина", None, 3),
    ("Мясная продукция", Some(0), 2),
    ("Молочная продукция", Some(0), 2),
    ("Выпечка", Some(0), 2),
    ("Напитки", Some(0), 2),
    ("Грузовые", Some(1), 2),
    ("Легковые", Some(1), 2),
    ("Запчасти", Some(9), 1),
    ("Аксессуары", Some(9), 1),
    ("Шины и диски", Some(9), 1),
    ("Ремонт техники", Some(2), 1),
    ("Клининг", Some(2), 1),
    ("Стоматология", Some(3), 2),
    ("Терапия", Some(3), 2),
    ("Аптеки", Some(3), 1),
    ("Колбасы", Some(4), 1),
    ("Полуфабрикаты", Some(4), 1),
];

/// (name, phones, building index, activity index)
const ORGANIZATIONS: &[(&str, &[&str], usize, usize)] = &[
    (
        "ООО \"Рога и Копыта\"",
        &["8-495-123-45-67", "8-495-123-45-68"],
        0,
        4,
    ),
    ("ООО \"Молочный рай\"", &["8-495-222-33-44"], 0, 5),
    (
        "АО \"АвтоМир\"",
        &["8-495-333-44-55", "8-800-100-200-300"],
        1,
        9,
    ),
    ("ИП Петров - Шиномонтаж", &["8-926-555-66-77"], 1, 12),
    (
        "Клиника \"Здоровье\"",
        &["8-495-444-55-66", "8-495-444-55-67"],
        2,
        15,
    ),
    ("Пекарня \"Хлебный дом\"", &["8-495-666-77-88"], 3, 6),
    (
        "ООО \"Чистый дом\"",
        &["8-495-777-88-99", "8-495-777-88-00"],
        4,
        14,
    ),
    ("Аптека \"Здравие\"", &["8-812-111-22-33"], 5, 17),
    (
        "ООО \"СевероЗапад Авто\"",
        &["8-812-222-33-44", "8-812-222-33-45"],
        6,
        8,
    ),
    ("Кафе \"Сибирские просторы\"", &["8-383-333-44-55"], 7, 0),
    ("Магазин \"Колбасный рай\"", &["8-495-888-99-00"], 3, 19),
    (
        "ООО \"Запчасти Люкс\"",
        &["8-495-999-00-11", "8-800-555-35-35"],
        4,
        10,
    ),
];

#[derive(Clone)]
pub struct SeedService {
    db: DatabaseConnection,
}

impl SeedService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the demo dataset. Returns `false` when data was already present.
    pub async fn seed_demo_data(&self) -> DirectoryResult<bool> {
        if buildings::Entity::find().count(&self.db).await? > 0 {
            debug!("Database already seeded, skipping");
            return Ok(false);
        }

        let mut building_ids = Vec::with_capacity(BUILDINGS.len());
        for (address, lat, lon) in BUILDINGS {
            let building = buildings::ActiveModel {
                address: Set((*address).to_string()),
                coordinates: Set(encode_coordinates(*lat, *lon)),
                created_at: Set(Utc::now()),
                updated_at: Set(Utc::now()),
                ..Default::default()
            };
            building_ids.push(building.insert(&self.db).await?.id);
        }

        // Parents precede children in ACTIVITIES, so one ordered pass
        // resolves every parent index to an already-inserted id.
        let mut activity_ids = Vec::with_capacity(ACTIVITIES.len());
        for (name, parent_idx, max_level) in ACTIVITIES {
            let activity = activities::ActiveModel {
                name: Set((*name).to_string()),
                parent_id: Set(parent_idx.map(|idx| activity_ids[idx])),
                max_level: Set(*max_level),
                created_at: Set(Utc::now()),
                updated_at: Set(Utc::now()),
                ..Default::default()
            };
            activity_ids.push(activity.insert(&self.db).await?.id);
        }

        for (name, phones, building_idx, activity_idx) in ORGANIZATIONS {
            let organization = organizations::ActiveModel {
                name: Set((*name).to_string()),
                phone_numbers: Set(encode_phones(phones)),
                building_id: Set(building_ids[*building_idx]),
                activity_id: Set(activity_ids[*activity_idx]),
                created_at: Set(Utc::now()),
                updated_at: Set(Utc::now()),
                ..Default::default()
            };
            organization.insert(&self.db).await?;
        }

        info!(
            buildings = BUILDINGS.len(),
            activities = ACTIVITIES.len(),
            organizations = ORGANIZATIONS.len(),
            "Seeded demo dataset"
        );
        Ok(true)
    }
}
