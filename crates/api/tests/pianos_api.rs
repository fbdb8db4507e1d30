//! HTTP-level tests for the public catalog and admin listing management.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete_auth, get, post_json_auth, put_json_auth, token_for};
use pianoshop_core::roles::{ROLE_ADMIN, ROLE_USER};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn admin_token(pool: &PgPool) -> String {
    let admin = create_user(pool, "admin", ROLE_ADMIN).await;
    token_for(admin.id, ROLE_ADMIN)
}

async fn create_piano(pool: &PgPool, token: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/pianos", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn piano(name: &str, category: &str, piano_type: &str, condition: &str, price: u32) -> Value {
    json!({
        "name": name,
        "category": category,
        "type": piano_type,
        "condition": condition,
        "price": price,
    })
}

async fn seed_catalog(pool: &PgPool) -> String {
    let token = admin_token(pool).await;
    for body in [
        piano("Yamaha U1", "used", "Upright", "Excellent", 4200),
        piano("Steinway B", "used", "Grand", "Good", 48000),
        piano("Kawai K-300", "new", "Upright", "New", 7800),
        piano("Roland FP-30X", "digital", "Digital", "New", 699),
    ] {
        create_piano(pool, &token, body).await;
    }
    token
}

fn names(page: &Value) -> Vec<String> {
    let mut names: Vec<String> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_applies_url_filters(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/pianos?type=Grand&type=Upright&minPrice=5000").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(response).await["data"].clone();
    assert_eq!(names(&page), vec!["Kawai K-300", "Steinway B"]);
    assert_eq!(page["criteria"]["types"], json!(["Grand", "Upright"]));
    assert_eq!(page["criteria"]["price_min"], json!(5000.0));
    assert!(page["criteria"]["price_max"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_without_filters_is_newest_first(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool);

    let page = body_json(get(app, "/api/v1/pianos").await).await["data"].clone();
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["name"], "Roland FP-30X");
    assert_eq!(items[3]["name"], "Yamaha U1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_filters_are_ignored(pool: PgPool) {
    seed_catalog(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/pianos?category=harpsichord&maxPrice=cheap").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await["data"].clone();
    assert_eq!(page["items"].as_array().unwrap().len(), 4);
    assert!(page["criteria"]["category"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_category_filter_and_limit(pool: PgPool) {
    seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone());
    let page = body_json(get(app, "/api/v1/pianos?category=used").await).await["data"].clone();
    assert_eq!(names(&page), vec!["Steinway B", "Yamaha U1"]);

    let app = common::build_test_app(pool);
    let page = body_json(get(app, "/api/v1/pianos?limit=1").await).await["data"].clone();
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_limit_is_ignored(pool: PgPool) {
    seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/pianos?limit=abc&category=used").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await["data"].clone();
    assert_eq!(names(&page), vec!["Steinway B", "Yamaha U1"]);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/pianos?limit=1&limit=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await["data"].clone();
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_price_bounds_and_facets(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let empty = body_json(get(app, "/api/v1/pianos/price-bounds").await).await;
    assert!(empty["data"]["max_price"].is_null());

    seed_catalog(&pool).await;

    let app = common::build_test_app(pool.clone());
    let bounds = body_json(get(app, "/api/v1/pianos/price-bounds").await).await;
    assert_eq!(bounds["data"]["max_price"], json!(48000.0));

    let app = common::build_test_app(pool);
    let facets = body_json(get(app, "/api/v1/pianos/facets").await).await;
    assert_eq!(facets["data"]["types"], json!(["Digital", "Grand", "Upright"]));
    assert_eq!(facets["data"]["conditions"], json!(["Excellent", "Good", "New"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_missing_piano_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/pianos/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Listing management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_sets_owner_and_default_key_image(pool: PgPool) {
    let admin = create_user(&pool, "admin", ROLE_ADMIN).await;
    let token = token_for(admin.id, ROLE_ADMIN);

    let mut body = piano("Bechstein A", "used", "Grand", "Good", 21000);
    body["images"] = json!(["front.jpg", "keys.jpg"]);
    let created = create_piano(&pool, &token, body).await;

    assert_eq!(created["owner_id"], admin.id);
    assert_eq!(created["key_image"], "front.jpg");
    assert_eq!(created["is_featured"], false);
    assert!(created["featured_order"].is_null());
    assert_eq!(created["type"], "Grand");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_foreign_key_image(pool: PgPool) {
    let token = admin_token(&pool).await;
    let mut body = piano("Bechstein A", "used", "Grand", "Good", 21000);
    body["images"] = json!(["front.jpg"]);
    body["key_image"] = json!("elsewhere.jpg");

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/pianos", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_blank_name(pool: PgPool) {
    let token = admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/pianos",
        piano("   ", "new", "Upright", "New", 100),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_admin_cannot_manage_listings(pool: PgPool) {
    let visitor = create_user(&pool, "visitor", ROLE_USER).await;
    // Even a token claiming admin is checked against the database.
    let token = token_for(visitor.id, ROLE_ADMIN);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/pianos",
        piano("Yamaha U1", "used", "Upright", "Good", 4200),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/pianos",
        piano("Yamaha U1", "used", "Upright", "Good", 4200),
        "garbage",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_reconciles_key_image_then_delete(pool: PgPool) {
    let token = admin_token(&pool).await;
    let mut body = piano("Bechstein A", "used", "Grand", "Good", 21000);
    body["images"] = json!(["front.jpg", "keys.jpg"]);
    body["key_image"] = json!("keys.jpg");
    let created = create_piano(&pool, &token, body).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/v1/pianos/{id}");

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!({ "images": ["front.jpg", "lid.jpg"], "price": 19500 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["key_image"], "front.jpg");
    assert_eq!(updated["price"], json!(19500.0));
    assert_eq!(updated["name"], "Bechstein A");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
