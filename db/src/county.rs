//! County entity store (C1).
use crate::models::{encode_date, CountyRow};
use crate::DbError;
use sqlx::SqlitePool;
use tpe_core::county::{County, CountyCode};
use tpe_core::ids::{CountyId, RegionId};
use tpe_core::Date;

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    code: CountyCode,
    region_id: RegionId,
    created_at: Date,
) -> Result<County, DbError> {
    let created_at_str = encode_date(created_at);
    let id = sqlx::query("INSERT INTO counties (name, code, region_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(i64::from(code))
        .bind(region_id.get())
        .bind(&created_at_str)
        .execute(pool)
        .await?
        .last_insert_rowid();
    get(pool, CountyId::new(id)).await
}

pub async fn get(pool: &SqlitePool, id: CountyId) -> Result<County, DbError> {
    let row: CountyRow = sqlx::query_as("SELECT id, name, code, region_id, created_at FROM counties WHERE id = ?")
        .bind(id.get())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::not_found(format!("county {}", id))))?;
    County::try_from(row)
}

pub async fn list_by_region(pool: &SqlitePool, region_id: RegionId) -> Result<Vec<County>, DbError> {
    let rows: Vec<CountyRow> = sqlx::query_as(
        "SELECT id, name, code, region_id, created_at FROM counties WHERE region_id = ? ORDER BY id",
    )
    .bind(region_id.get())
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(County::try_from).collect()
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<County>, DbError> {
    let rows: Vec<CountyRow> =
        sqlx::query_as("SELECT id, name, code, region_id, created_at FROM counties ORDER BY id")
            .fetch_all(pool)
            .await?;
    rows.into_iter().map(County::try_from).collect()
}
