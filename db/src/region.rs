//! Region entity store (C1).
use crate::models::{encode_date, RegionRow};
use crate::DbError;
use sqlx::SqlitePool;
use tpe_core::ids::RegionId;
use tpe_core::region::{Region, RegionCode};
use tpe_core::Date;

pub async fn create(pool: &SqlitePool, name: &str, code: &RegionCode, created_at: Date) -> Result<Region, DbError> {
    let code_str = code.as_ref().to_string();
    let created_at_str = encode_date(created_at);
    let id = sqlx::query("INSERT INTO regions (name, code, created_at) VALUES (?, ?, ?)")
        .bind(name)
        .bind(&code_str)
        .bind(&created_at_str)
        .execute(pool)
        .await?
        .last_insert_rowid();
    get(pool, RegionId::new(id)).await
}

pub async fn get(pool: &SqlitePool, id: RegionId) -> Result<Region, DbError> {
    let row: RegionRow = sqlx::query_as("SELECT id, name, code, created_at FROM regions WHERE id = ?")
        .bind(id.get())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::not_found(format!("region {}", id))))?;
    Region::try_from(row)
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<Region>, DbError> {
    let rows: Vec<RegionRow> = sqlx::query_as("SELECT id, name, code, created_at FROM regions ORDER BY id")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(Region::try_from).collect()
}
