//! Standing entity store: the persisted half of [`crate::standings`]'s
//! recalculate-then-upsert orchestration.
use crate::models::{encode_date, StandingRow};
use crate::DbError;
use sqlx::{Sqlite, SqlitePool};
use tpe_core::ids::{CompetitionId, SeasonId};
use tpe_core::standing::Standing;

const SELECT_COLS: &str = "team_id, competition_id, season_id, played, won, drawn, lost, goals_for, \
    goals_against, goal_difference, points, group_name, updated_at";

pub async fn fetch(pool: &SqlitePool, competition_id: CompetitionId, season_id: SeasonId) -> Result<Vec<Standing>, DbError> {
    let rows: Vec<StandingRow> = sqlx::query_as(&format!(
        "SELECT {} FROM standings WHERE competition_id = ? AND season_id = ?",
        SELECT_COLS
    ))
    .bind(competition_id.get())
    .bind(season_id.get())
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Standing::try_from).collect()
}

pub async fn fetch_group(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    group_name: &str,
) -> Result<Vec<Standing>, DbError> {
    let rows: Vec<StandingRow> = sqlx::query_as(&format!(
        "SELECT {} FROM standings WHERE competition_id = ? AND season_id = ? AND group_name = ?",
        SELECT_COLS
    ))
    .bind(competition_id.get())
    .bind(season_id.get())
    .bind(group_name)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Standing::try_from).collect()
}

/// Replaces every standings row for `(competition_id, season_id)` with
/// `rows`, inside the caller's transaction. `tpe_core::standings::recalculate`
/// always rebuilds from scratch, so a delete-then-insert keeps this
/// layer just as idempotent.
pub async fn replace_all(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    competition_id: CompetitionId,
    season_id: SeasonId,
    rows: &[Standing],
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM standings WHERE competition_id = ? AND season_id = ?")
        .bind(competition_id.get())
        .bind(season_id.get())
        .execute(&mut **tx)
        .await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO standings
            (team_id, competition_id, season_id, played, won, drawn, lost, goals_for,
             goals_against, goal_difference, points, group_name, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(row.team_id.get())
        .bind(row.competition_id.get())
        .bind(row.season_id.get())
        .bind(row.played.0 as i64)
        .bind(row.won.0 as i64)
        .bind(row.drawn.0 as i64)
        .bind(row.lost.0 as i64)
        .bind(row.goals_for.as_u32() as i64)
        .bind(row.goals_against.as_u32() as i64)
        .bind(row.goal_difference.0 as i64)
        .bind(row.points.0 as i64)
        .bind(row.group_name.clone())
        .bind(encode_date(row.updated_at))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
