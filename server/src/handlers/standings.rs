//! `GET /standings`: the Standings Calculator's (C2) read side.
use crate::err::AppResult;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tpe_core::ids::{CompetitionId, SeasonId};
use tpe_core::standing::Standing;

#[derive(Deserialize)]
pub struct StandingsQuery {
    pub competition_id: i64,
    pub season_id: Option<i64>,
    pub group_name: Option<String>,
}

pub async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<StandingsQuery>,
) -> AppResult<Json<Vec<Standing>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, query.season_id.map(SeasonId::new)).await?;
    let competition_id = CompetitionId::new(query.competition_id);
    let rows = match query.group_name {
        Some(group_name) => tpe_db::standings::ranked_group(&state.pool, competition_id, season_id, &group_name).await?,
        None => tpe_db::standings::ranked_table(&state.pool, competition_id, season_id).await?,
    };
    Ok(Json(rows))
}
