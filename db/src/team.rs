//! Team entity store (C1). `delete` (C9's roster management) enforces the
//! "no confirmed matches" guard in [`crate::lifecycle`], not here: this
//! module is a thin, unconditional CRUD layer.
use crate::models::{encode_category, encode_team_status, TeamRow};
use crate::DbError;
use sqlx::SqlitePool;
use tpe_core::county::County;
use tpe_core::ids::{CompetitionId, CountyId, RegionId, TeamId};
use tpe_core::team::{Team, TeamCategory, TeamStatus};

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    county: &County,
    category: TeamCategory,
    status: TeamStatus,
) -> Result<Team, DbError> {
    let id = sqlx::query(
        "INSERT INTO teams (name, county_id, region_id, category, status) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(county.id.get())
    .bind(county.region_id.get())
    .bind(encode_category(category))
    .bind(encode_team_status(status))
    .execute(pool)
    .await?
    .last_insert_rowid();
    get(pool, TeamId::new(id)).await
}

pub async fn get(pool: &SqlitePool, id: TeamId) -> Result<Team, DbError> {
    let row: TeamRow =
        sqlx::query_as("SELECT id, name, county_id, region_id, category, status FROM teams WHERE id = ?")
            .bind(id.get())
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::not_found(format!("team {}", id))))?;
    Team::try_from(row)
}

pub async fn list_by_region(pool: &SqlitePool, region_id: RegionId) -> Result<Vec<Team>, DbError> {
    let rows: Vec<TeamRow> = sqlx::query_as(
        "SELECT id, name, county_id, region_id, category, status FROM teams WHERE region_id = ? ORDER BY id",
    )
    .bind(region_id.get())
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Team::try_from).collect()
}

pub async fn list_by_county(pool: &SqlitePool, county_id: CountyId) -> Result<Vec<Team>, DbError> {
    let rows: Vec<TeamRow> = sqlx::query_as(
        "SELECT id, name, county_id, region_id, category, status FROM teams WHERE county_id = ? ORDER BY id",
    )
    .bind(county_id.get())
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Team::try_from).collect()
}

pub async fn list_by_competition(pool: &SqlitePool, competition_id: CompetitionId) -> Result<Vec<Team>, DbError> {
    let rows: Vec<TeamRow> = sqlx::query_as(
        "SELECT t.id, t.name, t.county_id, t.region_id, t.category, t.status
         FROM teams t
         JOIN competition_teams ct ON ct.team_id = t.id
         WHERE ct.competition_id = ?
         ORDER BY t.id",
    )
    .bind(competition_id.get())
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Team::try_from).collect()
}

pub async fn set_status(pool: &SqlitePool, id: TeamId, status: TeamStatus) -> Result<(), DbError> {
    sqlx::query("UPDATE teams SET status = ? WHERE id = ?")
        .bind(encode_team_status(status))
        .bind(id.get())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: TeamId) -> Result<(), DbError> {
    sqlx::query("DELETE FROM competition_teams WHERE team_id = ?")
        .bind(id.get())
        .execute(pool)
        .await?;
    sqlx::query("DELETE FROM teams WHERE id = ?")
        .bind(id.get())
        .execute(pool)
        .await?;
    Ok(())
}

/// How many players are registered to `team_id`. `lifecycle::delete_team`'s
/// guard queries this before allowing removal; player management lives
/// outside this crate, which only ever reads the count.
pub async fn player_count(pool: &SqlitePool, id: TeamId) -> Result<i64, DbError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players WHERE team_id = ?")
        .bind(id.get())
        .fetch_one(pool)
        .await?;
    Ok(count)
}
