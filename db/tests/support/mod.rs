//! Shared test scaffolding: an isolated in-memory SQLite pool per test,
//! migrated the same way `tpe_db::pool::create_pool` migrates a real one.
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    sqlx::query(include_str!("../../sqlx_migrations/001_create_tables.sql"))
        .execute(&pool)
        .await
        .expect("run migrations");
    pool
}
