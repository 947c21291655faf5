//! Result state machine endpoints: submit/confirm a match result, and
//! the filtered match reads the HTTP surface needs around it.
use crate::auth::CallerActor;
use crate::err::{AppError, AppResult};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tpe_core::fixture::{Leg, Match, MatchStatus, Stage};
use tpe_core::ids::{CompetitionId, MatchId, SeasonId, TeamId};
use tpe_core::Date;
use tpe_db::match_::MatchFilter;

#[derive(Deserialize)]
pub struct MatchQuery {
    pub competition_id: Option<i64>,
    pub season_id: Option<i64>,
    pub stage: Option<Stage>,
    pub status: Option<MatchStatus>,
    pub group_name: Option<String>,
    pub matchday: Option<u32>,
    pub bracket_position: Option<u32>,
    pub leg: Option<Leg>,
    pub team_id: Option<i64>,
    pub match_date: Option<String>,
}

pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> AppResult<Json<Vec<Match>>> {
    let mut filter = MatchFilter::default();
    if let (Some(competition_id), Some(season_id)) = (query.competition_id, query.season_id) {
        filter = MatchFilter::for_competition(CompetitionId::new(competition_id), SeasonId::new(season_id));
    } else {
        filter.competition_id = query.competition_id.map(CompetitionId::new);
        filter.season_id = query.season_id.map(SeasonId::new);
    }
    if let Some(stage) = query.stage {
        filter = filter.with_stage(stage);
    }
    if let Some(status) = query.status {
        filter = filter.with_status(status);
    }
    if let Some(group_name) = query.group_name {
        filter = filter.with_group(group_name);
    }
    if let Some(matchday) = query.matchday {
        filter = filter.with_matchday(matchday);
    }
    if let Some(bracket_position) = query.bracket_position {
        filter = filter.with_bracket_position(bracket_position);
    }
    if let Some(leg) = query.leg {
        filter = filter.with_leg(leg);
    }
    if let Some(team_id) = query.team_id {
        filter = filter.with_team(TeamId::new(team_id));
    }
    if let Some(day) = query.match_date {
        filter = filter.with_match_date_day(day);
    }
    Ok(Json(tpe_db::match_::fetch(&state.pool, &filter).await?))
}

pub async fn get_match(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Match>> {
    Ok(Json(tpe_db::match_::get(&state.pool, MatchId::new(id)).await?))
}

#[derive(Deserialize)]
pub struct SubmitResult {
    pub home_score: u32,
    pub away_score: u32,
}

/// `POST /matches/{id}/submit-result`: SCHEDULED -> COMPLETED.
pub async fn submit_result(
    State(state): State<AppState>,
    CallerActor(actor): CallerActor,
    Path(id): Path<i64>,
    Json(body): Json<SubmitResult>,
) -> AppResult<()> {
    tpe_db::result::submit_result(
        &state.pool,
        MatchId::new(id),
        &actor,
        body.home_score,
        body.away_score,
    )
    .await?;
    Ok(())
}

#[derive(Deserialize)]
pub struct ConfirmResult {
    pub penalty_winner_id: Option<i64>,
}

/// `POST /matches/{id}/confirm-result`: COMPLETED -> CONFIRMED, plus the
/// post-confirmation side effects (standings, events, advancement).
/// Only an admin may confirm; enforced by the outer auth layer in
/// production, re-checked here against the decoded caller.
pub async fn confirm_result(
    State(state): State<AppState>,
    CallerActor(actor): CallerActor,
    Path(id): Path<i64>,
    Json(body): Json<ConfirmResult>,
) -> AppResult<()> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden);
    }
    tpe_db::result::confirm_result(
        &state.pool,
        &state.events,
        MatchId::new(id),
        actor.user_id,
        body.penalty_winner_id.map(TeamId::new),
        Date::now(),
    )
    .await?;
    Ok(())
}
