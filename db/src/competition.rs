//! Competition entity store (C1), including the `competition_teams` roster
//! join table.
use crate::models::{encode_category, encode_competition_type, CompetitionRow};
use crate::DbError;
use sqlx::SqlitePool;
use tpe_core::competition::{Competition, CompetitionType};
use tpe_core::ids::{CompetitionId, CountyId, RegionId, SeasonId, TeamId};
use tpe_core::team::TeamCategory;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    kind: CompetitionType,
    category: TeamCategory,
    season_id: SeasonId,
    region_id: Option<RegionId>,
    county_id: Option<CountyId>,
) -> Result<Competition, DbError> {
    tpe_core::competition::validate_scope(kind, region_id, county_id)?;
    let id = sqlx::query(
        "INSERT INTO competitions (name, kind, category, season_id, region_id, county_id)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(encode_competition_type(kind))
    .bind(encode_category(category))
    .bind(season_id.get())
    .bind(region_id.map(|r| r.get()))
    .bind(county_id.map(|c| c.get()))
    .execute(pool)
    .await?
    .last_insert_rowid();
    get(pool, CompetitionId::new(id)).await
}

const SELECT_COLS: &str = "id, name, kind, category, season_id, region_id, county_id";

pub async fn get(pool: &SqlitePool, id: CompetitionId) -> Result<Competition, DbError> {
    let row: CompetitionRow = sqlx::query_as(&format!("SELECT {} FROM competitions WHERE id = ?", SELECT_COLS))
        .bind(id.get())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::not_found(format!("competition {}", id))))?;
    Competition::try_from(row)
}

pub async fn list_by_season(pool: &SqlitePool, season_id: SeasonId) -> Result<Vec<Competition>, DbError> {
    let rows: Vec<CompetitionRow> = sqlx::query_as(&format!(
        "SELECT {} FROM competitions WHERE season_id = ? ORDER BY id",
        SELECT_COLS
    ))
    .bind(season_id.get())
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Competition::try_from).collect()
}

pub async fn add_team(pool: &SqlitePool, competition_id: CompetitionId, team_id: TeamId) -> Result<(), DbError> {
    sqlx::query("INSERT OR IGNORE INTO competition_teams (competition_id, team_id) VALUES (?, ?)")
        .bind(competition_id.get())
        .bind(team_id.get())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn remove_team(pool: &SqlitePool, competition_id: CompetitionId, team_id: TeamId) -> Result<(), DbError> {
    sqlx::query("DELETE FROM competition_teams WHERE competition_id = ? AND team_id = ?")
        .bind(competition_id.get())
        .bind(team_id.get())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn team_ids(pool: &SqlitePool, competition_id: CompetitionId) -> Result<Vec<TeamId>, DbError> {
    let ids: Vec<i64> = sqlx::query_scalar("SELECT team_id FROM competition_teams WHERE competition_id = ?")
        .bind(competition_id.get())
        .fetch_all(pool)
        .await?;
    Ok(ids.into_iter().map(TeamId::new).collect())
}
