use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    pianoshop_db::health_check(&pool).await.unwrap();

    let roles: Vec<(String,)> = sqlx::query_as("SELECT name FROM roles ORDER BY name")
        .fetch_all(&pool)
        .await
        .unwrap();
    let roles: Vec<&str> = roles.iter().map(|(name,)| name.as_str()).collect();
    assert_eq!(roles, vec!["admin", "user"]);

    let banners: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM hero_banners")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(banners.0, 1, "hero banner should be seeded");
}

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}
