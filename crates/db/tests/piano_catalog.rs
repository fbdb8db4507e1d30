//! Repository-level tests for catalog listing and filtering.

use std::collections::BTreeSet;
use std::str::FromStr;

use pianoshop_core::catalog::{build_query, parse_criteria, Category, QuerySpec};
use pianoshop_core::roles::ROLE_ADMIN;
use pianoshop_db::models::piano::{CreatePiano, UpdatePiano};
use pianoshop_db::models::user::CreateUser;
use pianoshop_db::repositories::{PianoRepo, RoleRepo, UserRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_owner(pool: &PgPool) -> i64 {
    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await
        .unwrap()
        .expect("admin role is seeded");
    UserRepo::create(
        pool,
        &CreateUser {
            username: "owner".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_piano(name: &str, category: Category, piano_type: &str, condition: &str, price: &str) -> CreatePiano {
    CreatePiano {
        name: name.to_string(),
        description: None,
        category,
        piano_type: piano_type.to_string(),
        condition: condition.to_string(),
        price: Decimal::from_str(price).unwrap(),
        images: vec![],
        key_image: None,
    }
}

async fn seed_catalog(pool: &PgPool) -> i64 {
    let owner = seed_owner(pool).await;
    let pianos = [
        new_piano("Yamaha U1", Category::Used, "Upright", "Excellent", "4200"),
        new_piano("Steinway B", Category::Used, "Grand", "Good", "48000"),
        new_piano("Kawai K-300", Category::New, "Upright", "New", "7800"),
        new_piano("Roland FP-30X", Category::Digital, "Digital", "New", "699"),
        new_piano("Boston GP-156", Category::New, "Grand", "New", "32000"),
    ];
    for piano in &pianos {
        PianoRepo::create(pool, owner, piano).await.unwrap();
    }
    owner
}

fn names(rows: &[pianoshop_db::models::piano::Piano]) -> BTreeSet<String> {
    rows.iter().map(|p| p.name.clone()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_unfiltered_lists_everything_newest_first(pool: PgPool) {
    seed_catalog(&pool).await;

    let rows = PianoRepo::list(&pool, &QuerySpec::unfiltered()).await.unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].name, "Boston GP-156");
    assert_eq!(rows[4].name, "Yamaha U1");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_filter_by_category_types_and_price(pool: PgPool) {
    seed_catalog(&pool).await;

    let query = build_query(&parse_criteria("?category=used&type=Upright&type=Grand&maxPrice=10000"));
    let rows = PianoRepo::list(&pool, &query).await.unwrap();
    assert_eq!(names(&rows), BTreeSet::from(["Yamaha U1".to_string()]));

    let query = build_query(&parse_criteria("type=Grand&condition=New"));
    let rows = PianoRepo::list(&pool, &query).await.unwrap();
    assert_eq!(names(&rows), BTreeSet::from(["Boston GP-156".to_string()]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_price_range_is_inclusive(pool: PgPool) {
    seed_catalog(&pool).await;

    let query = build_query(&parse_criteria("minPrice=699&maxPrice=4200"));
    let rows = PianoRepo::list(&pool, &query).await.unwrap();
    assert_eq!(
        names(&rows),
        BTreeSet::from(["Roland FP-30X".to_string(), "Yamaha U1".to_string()])
    );

    let query = build_query(&parse_criteria("minPrice=30000"));
    let rows = PianoRepo::list(&pool, &query).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_inverted_price_range_matches_nothing(pool: PgPool) {
    seed_catalog(&pool).await;

    let query = build_query(&parse_criteria("minPrice=5000&maxPrice=1000"));
    let rows = PianoRepo::list(&pool, &query).await.unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_limit_caps_results(pool: PgPool) {
    seed_catalog(&pool).await;

    let query = QuerySpec::unfiltered().with_limit(Some(2));
    let rows = PianoRepo::list(&pool, &query).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_facets_and_max_price(pool: PgPool) {
    assert_eq!(PianoRepo::max_price(&pool).await.unwrap(), None);

    seed_catalog(&pool).await;

    let facets = PianoRepo::facets(&pool).await.unwrap();
    assert_eq!(facets.types, vec!["Digital", "Grand", "Upright"]);
    assert_eq!(facets.conditions, vec!["Excellent", "Good", "New"]);
    assert_eq!(
        PianoRepo::max_price(&pool).await.unwrap(),
        Some(Decimal::from(48000))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    let mut input = new_piano("Yamaha U1", Category::Used, "Upright", "Good", "4200");
    input.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
    input.key_image = Some("b.jpg".to_string());
    let piano = PianoRepo::create(&pool, owner, &input).await.unwrap();
    assert_eq!(piano.key_image.as_deref(), Some("b.jpg"));
    assert_eq!(piano.owner_id, owner);

    let update = UpdatePiano {
        price: Some(Decimal::from(3900)),
        images: Some(vec!["a.jpg".to_string()]),
        ..Default::default()
    };
    let updated = PianoRepo::update(&pool, piano.id, &update, Some("a.jpg"))
        .await
        .unwrap()
        .expect("piano exists");
    assert_eq!(updated.price, Decimal::from(3900));
    assert_eq!(updated.name, "Yamaha U1");
    assert_eq!(updated.images, vec!["a.jpg"]);
    assert_eq!(updated.key_image.as_deref(), Some("a.jpg"));

    assert!(PianoRepo::delete(&pool, piano.id).await.unwrap());
    assert!(!PianoRepo::delete(&pool, piano.id).await.unwrap());
    assert!(PianoRepo::find_by_id(&pool, piano.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_key_image_must_be_one_of_the_images(pool: PgPool) {
    let owner = seed_owner(&pool).await;
    let mut input = new_piano("Yamaha U1", Category::Used, "Upright", "Good", "4200");
    input.images = vec!["a.jpg".to_string()];
    input.key_image = Some("elsewhere.jpg".to_string());

    let err = PianoRepo::create(&pool, owner, &input).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("ck_pianos_key_image"));
}
