//! Season entity store (C1). Activation/deactivation lives in
//! [`crate::lifecycle`] since flipping `is_active` is an orchestration
//! concern (C9) that must keep the "at most one active season" invariant.
use crate::models::{encode_date, SeasonRow};
use crate::DbError;
use sqlx::SqlitePool;
use tpe_core::ids::SeasonId;
use tpe_core::season::{Season, SeasonYear};
use tpe_core::Date;

pub async fn create(pool: &SqlitePool, name: &str, year: SeasonYear, created_at: Date) -> Result<Season, DbError> {
    let created_at_str = encode_date(created_at);
    let id = sqlx::query(
        "INSERT INTO seasons (name, year, is_active, created_at) VALUES (?, ?, 0, ?)",
    )
    .bind(name)
    .bind(year.get())
    .bind(&created_at_str)
    .execute(pool)
    .await?
    .last_insert_rowid();
    get(pool, SeasonId::new(id)).await
}

pub async fn get(pool: &SqlitePool, id: SeasonId) -> Result<Season, DbError> {
    let row: SeasonRow = sqlx::query_as("SELECT id, name, year, is_active, created_at FROM seasons WHERE id = ?")
        .bind(id.get())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::not_found(format!("season {}", id))))?;
    Season::try_from(row)
}

pub async fn active(pool: &SqlitePool) -> Result<Option<Season>, DbError> {
    let row: Option<SeasonRow> =
        sqlx::query_as("SELECT id, name, year, is_active, created_at FROM seasons WHERE is_active = 1")
            .fetch_optional(pool)
            .await?;
    row.map(Season::try_from).transpose()
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Season>, DbError> {
    let rows: Vec<SeasonRow> =
        sqlx::query_as("SELECT id, name, year, is_active, created_at FROM seasons ORDER BY year DESC")
            .fetch_all(pool)
            .await?;
    rows.into_iter().map(Season::try_from).collect()
}
