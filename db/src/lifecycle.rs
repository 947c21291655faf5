//! Thin orchestration wrappers spanning more than one entity table: season
//! activation, competition creation with its scoping invariant, roster
//! management, and team removal.
use crate::competition;
use crate::team;
use crate::DbError;
use sqlx::SqlitePool;
use tpe_core::competition::{Competition, CompetitionType};
use tpe_core::ids::{CompetitionId, CountyId, RegionId, SeasonId, TeamId};
use tpe_core::season::{Season, SeasonYear};
use tpe_core::team::TeamCategory;
use tpe_core::Date;

/// Clears `is_active` on every existing season, then inserts the new one as
/// active, in a single transaction — the "at most one active season"
/// invariant is never observably violated.
pub async fn create_season(pool: &SqlitePool, name: &str, year: SeasonYear, created_at: Date) -> Result<Season, DbError> {
    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE seasons SET is_active = 0")
        .execute(&mut *tx)
        .await?;
    let created_at_str = crate::models::encode_date(created_at);
    let id = sqlx::query("INSERT INTO seasons (name, year, is_active, created_at) VALUES (?, ?, 1, ?)")
        .bind(name)
        .bind(year.get())
        .bind(&created_at_str)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    tx.commit().await?;
    crate::season::get(pool, SeasonId::new(id)).await
}

/// Validates the COUNTY/REGIONAL scoping invariant (pure) before inserting.
#[allow(clippy::too_many_arguments)]
pub async fn create_competition(
    pool: &SqlitePool,
    name: &str,
    kind: CompetitionType,
    category: TeamCategory,
    season_id: SeasonId,
    region_id: Option<RegionId>,
    county_id: Option<CountyId>,
) -> Result<Competition, DbError> {
    competition::create(pool, name, kind, category, season_id, region_id, county_id).await
}

/// Idempotent batch add: teams already on the roster are silently skipped
/// (`INSERT OR IGNORE`), matching "adding an already-present team is
/// a no-op, not an error".
pub async fn add_teams(pool: &SqlitePool, competition_id: CompetitionId, team_ids: &[TeamId]) -> Result<(), DbError> {
    for &team_id in team_ids {
        competition::add_team(pool, competition_id, team_id).await?;
    }
    Ok(())
}

pub async fn add_team(pool: &SqlitePool, competition_id: CompetitionId, team_id: TeamId) -> Result<(), DbError> {
    competition::add_team(pool, competition_id, team_id).await
}

/// Fails with `CoreError::InvariantConflict` if the team has any registered
/// players.
pub async fn delete_team(pool: &SqlitePool, team_id: TeamId) -> Result<(), DbError> {
    let players = team::player_count(pool, team_id).await?;
    if players > 0 {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "team {} still has {} registered player(s)",
            team_id, players
        ))));
    }
    team::delete(pool, team_id).await
}
