//! Directory query tests over the seeded demo dataset.

use orgdir::database::test_utils::setup_test_db;
use orgdir::errors::DirectoryError;
use orgdir::services::{ActivityService, OrganizationService, SeedService};
use sea_orm::DatabaseConnection;

async fn seeded_db() -> DatabaseConnection {
    let db = setup_test_db().await;
    let seeded = SeedService::new(db.clone())
        .seed_demo_data()
        .await
        .expect("seeding failed");
    assert!(seeded);
    db
}

fn names(mut organizations: Vec<String>) -> Vec<String> {
    organizations.sort();
    organizations
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let db = seeded_db().await;
    let second = SeedService::new(db).seed_demo_data().await.unwrap();
    assert!(!second);
}

#[tokio::test]
async fn organizations_by_building_address() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let found = service
        .by_building_address("г. Москва, ул. Тверская, д. 1")
        .await
        .unwrap();
    assert_eq!(
        names(found.into_iter().map(|o| o.name).collect()),
        vec!["ООО \"Молочный рай\"", "ООО \"Рога и Копыта\""]
    );

    let missing = service
        .by_building_address("г. Москва, несуществующий адрес")
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn exact_activity_match_excludes_descendants() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let food_exact = service.by_activity_exact("Еда").await.unwrap();
    assert_eq!(
        names(food_exact.into_iter().map(|o| o.name).collect()),
        vec!["Кафе \"Сибирские просторы\""]
    );
}

#[tokio::test]
async fn activity_tree_includes_transitive_descendants() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    // Еда -> {Мясная, Молочная, Выпечка, Напитки}; Мясная -> {Колбасы, Полуфабрикаты}
    let food_tree = service.by_activity_tree("Еда").await.unwrap();
    assert_eq!(
        names(food_tree.into_iter().map(|o| o.name).collect()),
        vec![
            "Кафе \"Сибирские просторы\"",
            "Магазин \"Колбасный рай\"",
            "ООО \"Молочный рай\"",
            "ООО \"Рога и Копыта\"",
            "Пекарня \"Хлебный дом\"",
        ]
    );

    let meat_tree = service.by_activity_tree("Мясная продукция").await.unwrap();
    assert_eq!(
        names(meat_tree.into_iter().map(|o| o.name).collect()),
        vec!["Магазин \"Колбасный рай\"", "ООО \"Рога и Копыта\""]
    );
}

#[tokio::test]
async fn activity_tree_on_leaf_matches_exact_query() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let exact = service.by_activity_exact("Клининг").await.unwrap();
    let tree = service.by_activity_tree("Клининг").await.unwrap();
    assert_eq!(
        names(exact.into_iter().map(|o| o.name).collect()),
        names(tree.into_iter().map(|o| o.name).collect()),
    );
}

#[tokio::test]
async fn activity_tree_unknown_name_is_not_found() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let err = service.by_activity_tree("Несуществующая").await.unwrap_err();
    assert!(matches!(err, DirectoryError::ActivityNotFound(_)));
}

#[tokio::test]
async fn organization_by_unique_name() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let org = service
        .get_by_name("ООО \"Рога и Копыта\"")
        .await
        .unwrap()
        .expect("organization should exist");
    assert_eq!(org.phone_list(), vec!["8-495-123-45-67", "8-495-123-45-68"]);

    assert!(service.get_by_name("НеОрганизация").await.unwrap().is_none());

    let by_id = service.get_by_id(org.id).await.unwrap().unwrap();
    assert_eq!(by_id.name, org.name);
}

#[tokio::test]
async fn radius_query_scopes_to_nearby_buildings() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    // 1 km around Moscow center covers Тверская and Красная площадь only
    let nearby = service.in_radius(55.7558, 37.6173, 1.0).await.unwrap();
    assert_eq!(
        names(nearby.into_iter().map(|o| o.name).collect()),
        vec![
            "Клиника \"Здоровье\"",
            "ООО \"Молочный рай\"",
            "ООО \"Рога и Копыта\"",
        ]
    );

    // 100 km around Moscow still excludes Saint Petersburg and Novosibirsk
    let metro = service.in_radius(55.7558, 37.6173, 100.0).await.unwrap();
    let metro_names: Vec<String> = metro.into_iter().map(|o| o.name).collect();
    assert_eq!(metro_names.len(), 9);
    assert!(!metro_names.iter().any(|n| n == "Аптека \"Здравие\""));
    assert!(!metro_names.iter().any(|n| n == "Кафе \"Сибирские просторы\""));
}

#[tokio::test]
async fn radius_query_rejects_non_positive_radius() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let err = service.in_radius(55.7558, 37.6173, 0.0).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));
}

#[tokio::test]
async fn bounds_query_selects_moscow_rectangle() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let moscow = service.in_bounds(55.0, 37.0, 56.0, 38.0).await.unwrap();
    assert_eq!(moscow.len(), 9);

    let spb = service.in_bounds(59.0, 30.0, 60.0, 31.0).await.unwrap();
    assert_eq!(
        names(spb.into_iter().map(|o| o.name).collect()),
        vec!["Аптека \"Здравие\"", "ООО \"СевероЗапад Авто\""]
    );
}

#[tokio::test]
async fn bounds_query_rejects_inverted_limits() {
    let db = seeded_db().await;
    let service = OrganizationService::new(db);

    let err = service.in_bounds(56.0, 37.0, 55.0, 38.0).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));
}

#[tokio::test]
async fn set_max_level_round_trips_and_leaves_closure_alone() {
    let db = seeded_db().await;
    let activities = ActivityService::new(db.clone());
    let organizations = OrganizationService::new(db);

    let before = organizations.by_activity_tree("Еда").await.unwrap().len();

    let updated = activities
        .set_max_level_by_name("Еда", 5)
        .await
        .unwrap()
        .expect("activity should exist");
    assert_eq!(updated.max_level, 5);

    let reread = activities.get_by_name("Еда").await.unwrap().unwrap();
    assert_eq!(reread.max_level, 5);

    // The cap is a declared label: the closure query is unaffected
    let after = organizations.by_activity_tree("Еда").await.unwrap().len();
    assert_eq!(before, after);
}

#[tokio::test]
async fn set_max_level_validates_input_and_name() {
    let db = seeded_db().await;
    let activities = ActivityService::new(db);

    let err = activities.set_max_level_by_name("Еда", 0).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));

    let missing = activities
        .set_max_level_by_name("Несуществующая", 3)
        .await
        .unwrap();
    assert!(missing.is_none());
}
