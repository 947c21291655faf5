//! Qualification pipeline endpoints: completion status, top-team
//! extraction, and the cross-tier promotion operations.
use crate::err::AppResult;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tpe_core::ids::{CompetitionId, SeasonId, TeamId};

#[derive(Serialize)]
pub struct StatusResponse {
    pub competition_id: CompetitionId,
    pub total: usize,
    pub confirmed: usize,
    pub remaining: usize,
    pub complete: bool,
}

impl From<tpe_db::qualification::CompetitionStatus> for StatusResponse {
    fn from(s: tpe_db::qualification::CompetitionStatus) -> Self {
        StatusResponse {
            competition_id: s.competition_id,
            total: s.total,
            confirmed: s.confirmed,
            remaining: s.remaining,
            complete: s.complete,
        }
    }
}

#[derive(Deserialize)]
pub struct SeasonQuery {
    pub season_id: Option<i64>,
}

/// `GET /competitions/{id}/status`.
pub async fn get_competition_status(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Query(query): Query<SeasonQuery>,
) -> AppResult<Json<StatusResponse>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, query.season_id.map(SeasonId::new)).await?;
    let status =
        tpe_db::qualification::get_competition_status(&state.pool, CompetitionId::new(competition_id), season_id)
            .await?;
    Ok(Json(status.into()))
}

#[derive(Deserialize)]
pub struct TopTeamsQuery {
    pub season_id: Option<i64>,
    #[serde(default = "default_top_n")]
    pub count: usize,
}

fn default_top_n() -> usize {
    4
}

/// `GET /competitions/{id}/top-teams`: overall sort if the competition
/// carries no group standings, per-group winners-then-runners-up otherwise.
pub async fn get_top_teams(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Query(query): Query<TopTeamsQuery>,
) -> AppResult<Json<Vec<TeamId>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, query.season_id.map(SeasonId::new)).await?;
    let competition_id = CompetitionId::new(competition_id);
    let rows = tpe_db::standing::fetch(&state.pool, competition_id, season_id).await?;
    let teams = if rows.iter().any(|r| r.group_name.is_some()) {
        tpe_db::qualification::get_top_teams_from_groups(&state.pool, competition_id, season_id, query.count).await?
    } else {
        tpe_db::qualification::get_top_teams(&state.pool, competition_id, season_id, query.count).await?
    };
    Ok(Json(teams))
}

#[derive(Serialize)]
pub struct QualificationResponse {
    pub qualified_count: usize,
    pub added_count: usize,
    pub already_present_count: usize,
    pub source_count: usize,
}

impl From<tpe_db::qualification::QualificationResult> for QualificationResponse {
    fn from(r: tpe_db::qualification::QualificationResult) -> Self {
        QualificationResponse {
            qualified_count: r.qualified_count,
            added_count: r.added_count,
            already_present_count: r.already_present_count,
            source_count: r.source_count,
        }
    }
}

#[derive(Deserialize)]
pub struct QualifyRequest {
    pub competition_id: i64,
    #[serde(default = "default_top_n_regional")]
    pub top_n: usize,
}

fn default_top_n_regional() -> usize {
    4
}

/// `POST /seasons/{id}/qualify-for-regional`: promotes COUNTY winners into
/// a REGIONAL competition.
pub async fn qualify_for_regional(
    State(state): State<AppState>,
    Path(season_id): Path<i64>,
    Json(body): Json<QualifyRequest>,
) -> AppResult<Json<QualificationResponse>> {
    let result = tpe_db::qualification::qualify_for_regional(
        &state.pool,
        SeasonId::new(season_id),
        CompetitionId::new(body.competition_id),
        body.top_n,
    )
    .await?;
    Ok(Json(result.into()))
}

#[derive(Deserialize)]
pub struct QualifyCLRequest {
    pub competition_id: i64,
    #[serde(default = "default_top_n_cl")]
    pub top_n: usize,
}

fn default_top_n_cl() -> usize {
    3
}

/// `POST /seasons/{id}/qualify-for-cl`: promotes REGIONAL finishers into
/// the NATIONAL ("champions league") competition.
pub async fn qualify_for_champions_league(
    State(state): State<AppState>,
    Path(season_id): Path<i64>,
    Json(body): Json<QualifyCLRequest>,
) -> AppResult<Json<QualificationResponse>> {
    let result = tpe_db::qualification::qualify_for_champions_league(
        &state.pool,
        SeasonId::new(season_id),
        CompetitionId::new(body.competition_id),
        body.top_n,
    )
    .await?;
    Ok(Json(result.into()))
}

/// `POST /competitions/{id}/advance-knockout`: resolves the group ->
/// quarter-final draw once the national competition's group stage is
/// complete.
pub async fn advance_cl_knockout(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Query(query): Query<SeasonQuery>,
) -> AppResult<Json<tpe_core::bracket::advance::KnockoutField>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, query.season_id.map(SeasonId::new)).await?;
    let field =
        tpe_db::qualification::advance_cl_knockout(&state.pool, CompetitionId::new(competition_id), season_id)
            .await?;
    Ok(Json(field))
}
