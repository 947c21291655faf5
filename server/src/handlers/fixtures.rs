//! Fixture generation endpoints: the round-robin scheduler, group draw
//! engine and bracket engine, wired to `tpe_db::scheduler`.
use crate::err::AppResult;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tpe_core::fixture::{Match, Stage};
use tpe_core::ids::{CompetitionId, SeasonId, TeamId};
use tpe_core::Date;

fn default_interval() -> i64 {
    7
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub season_id: Option<i64>,
    pub start_date: Date,
    #[serde(default = "default_interval")]
    pub interval_days: i64,
}

/// `POST /competitions/{id}/generate-fixtures` and
/// `generate-county-fixtures`: double round-robin. Both routes share
/// one handler — the precondition (REGIONAL or COUNTY) is enforced by
/// `tpe_core::competition::CompetitionType::permits_league_play`, not by
/// which URL the caller used.
pub async fn generate_round_robin(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Json<Vec<Match>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, body.season_id.map(SeasonId::new)).await?;
    let matches = tpe_db::scheduler::generate_round_robin(
        &state.pool,
        CompetitionId::new(competition_id),
        season_id,
        body.start_date,
        body.interval_days,
    )
    .await?;
    Ok(Json(matches))
}

/// `POST /competitions/{id}/generate-regional-groups` and `generate-groups`:
/// 7-region/21-team group draw.
pub async fn generate_group_draw(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Json<Vec<Match>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, body.season_id.map(SeasonId::new)).await?;
    let mut rng = rand::thread_rng();
    let matches = tpe_db::scheduler::generate_group_draw(
        &state.pool,
        CompetitionId::new(competition_id),
        season_id,
        body.start_date,
        body.interval_days,
        &mut rng,
    )
    .await?;
    Ok(Json(matches))
}

/// `POST /competitions/{id}/generate-cup-draw`: single-elimination
/// bracket with byes over the competition's full roster.
pub async fn generate_cup_draw(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Json<Vec<Match>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, body.season_id.map(SeasonId::new)).await?;
    let mut rng = rand::thread_rng();
    let matches = tpe_db::scheduler::generate_cup_draw(
        &state.pool,
        CompetitionId::new(competition_id),
        season_id,
        body.start_date,
        body.interval_days,
        &mut rng,
    )
    .await?;
    Ok(Json(matches))
}

#[derive(Deserialize)]
pub struct GenerateKnockoutRequest {
    pub season_id: Option<i64>,
    pub start_date: Date,
    #[serde(default = "default_interval_knockout")]
    pub interval_days: i64,
    /// The four quarter-final pairings resolved by
    /// `advance_cl_knockout`, `(team_a, team_b)` with `team_a` at home
    /// for leg 1.
    pub team_pairs: [(i64, i64); 4],
}

fn default_interval_knockout() -> i64 {
    14
}

/// `POST /competitions/{id}/generate-knockout`: champions-league
/// 8-team knockout bracket, seeded from an already-resolved QF draw.
pub async fn generate_cl_bracket(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Json(body): Json<GenerateKnockoutRequest>,
) -> AppResult<Json<Vec<Match>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, body.season_id.map(SeasonId::new)).await?;
    let team_pairs = body
        .team_pairs
        .map(|(a, b)| (TeamId::new(a), TeamId::new(b)));
    let matches = tpe_db::scheduler::generate_cl_bracket(
        &state.pool,
        CompetitionId::new(competition_id),
        season_id,
        team_pairs,
        body.start_date,
        body.interval_days,
    )
    .await?;
    Ok(Json(matches))
}

#[derive(Deserialize)]
pub struct SeasonQuery {
    pub season_id: Option<i64>,
}

/// `GET /competitions/{id}/bracket`: every bracket match, grouped by stage
/// in depth order.
pub async fn get_bracket(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    axum::extract::Query(query): axum::extract::Query<SeasonQuery>,
) -> AppResult<Json<Vec<(Stage, Vec<Match>)>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, query.season_id.map(SeasonId::new)).await?;
    Ok(Json(
        tpe_db::scheduler::get_bracket(&state.pool, CompetitionId::new(competition_id), season_id).await?,
    ))
}

/// `DELETE /competitions/{id}/bracket`: blocked (409) once any bracket
/// match has been CONFIRMED.
pub async fn reset_bracket(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    axum::extract::Query(query): axum::extract::Query<SeasonQuery>,
) -> AppResult<()> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, query.season_id.map(SeasonId::new)).await?;
    tpe_db::scheduler::reset_bracket(&state.pool, CompetitionId::new(competition_id), season_id).await?;
    Ok(())
}
