//! Reads and creations for the entity hierarchy: Region, County, Season,
//! Team, Competition. Everything here is thin CRUD wired to `tpe_db`;
//! orchestration (fixtures, standings, qualification) lives in its own
//! handler modules.
use crate::err::AppResult;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tpe_core::competition::{Competition, CompetitionType};
use tpe_core::county::{County, CountyCode};
use tpe_core::ids::{CompetitionId, CountyId, RegionId, SeasonId, TeamId};
use tpe_core::region::{Region, RegionCode};
use tpe_core::season::{Season, SeasonYear};
use tpe_core::team::{Team, TeamCategory, TeamStatus};
use tpe_core::Date;

#[derive(Deserialize)]
pub struct CreateRegion {
    pub name: String,
    pub code: String,
}

pub async fn create_region(State(state): State<AppState>, Json(body): Json<CreateRegion>) -> AppResult<Json<Region>> {
    let code = RegionCode::try_new(body.code)?;
    let region = tpe_db::region::create(&state.pool, &body.name, &code, Date::now()).await?;
    Ok(Json(region))
}

pub async fn list_regions(State(state): State<AppState>) -> AppResult<Json<Vec<Region>>> {
    Ok(Json(tpe_db::region::list(&state.pool).await?))
}

pub async fn get_region(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Region>> {
    Ok(Json(tpe_db::region::get(&state.pool, RegionId::new(id)).await?))
}

#[derive(Deserialize)]
pub struct CreateCounty {
    pub name: String,
    pub code: i64,
    pub region_id: i64,
}

pub async fn create_county(State(state): State<AppState>, Json(body): Json<CreateCounty>) -> AppResult<Json<County>> {
    let county = tpe_db::county::create(
        &state.pool,
        &body.name,
        CountyCode::from(body.code),
        RegionId::new(body.region_id),
        Date::now(),
    )
    .await?;
    Ok(Json(county))
}

pub async fn list_counties(State(state): State<AppState>) -> AppResult<Json<Vec<County>>> {
    Ok(Json(tpe_db::county::list(&state.pool).await?))
}

pub async fn list_counties_by_region(
    State(state): State<AppState>,
    Path(region_id): Path<i64>,
) -> AppResult<Json<Vec<County>>> {
    Ok(Json(tpe_db::county::list_by_region(&state.pool, RegionId::new(region_id)).await?))
}

#[derive(Deserialize)]
pub struct CreateSeason {
    pub name: String,
    pub year: i32,
    /// When `true`, deactivates every other season (single-active
    /// invariant). Creating a non-active season is just a CRUD insert.
    #[serde(default)]
    pub activate: bool,
}

pub async fn create_season(State(state): State<AppState>, Json(body): Json<CreateSeason>) -> AppResult<Json<Season>> {
    let year = SeasonYear::try_new(body.year)?;
    let season = if body.activate {
        tpe_db::lifecycle::create_season(&state.pool, &body.name, year, Date::now()).await?
    } else {
        tpe_db::season::create(&state.pool, &body.name, year, Date::now()).await?
    };
    Ok(Json(season))
}

pub async fn list_seasons(State(state): State<AppState>) -> AppResult<Json<Vec<Season>>> {
    Ok(Json(tpe_db::season::list(&state.pool).await?))
}

pub async fn active_season(State(state): State<AppState>) -> AppResult<Json<Option<Season>>> {
    Ok(Json(tpe_db::season::active(&state.pool).await?))
}

#[derive(Deserialize)]
pub struct CreateTeam {
    pub name: String,
    pub county_id: i64,
    pub category: TeamCategory,
    #[serde(default = "default_pending")]
    pub status: TeamStatus,
}

fn default_pending() -> TeamStatus {
    TeamStatus::Pending
}

pub async fn create_team(State(state): State<AppState>, Json(body): Json<CreateTeam>) -> AppResult<Json<Team>> {
    let county = tpe_db::county::get(&state.pool, CountyId::new(body.county_id)).await?;
    let team = tpe_db::team::create(&state.pool, &body.name, &county, body.category, body.status).await?;
    Ok(Json(team))
}

pub async fn get_team(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Team>> {
    Ok(Json(tpe_db::team::get(&state.pool, TeamId::new(id)).await?))
}

pub async fn list_teams_by_county(
    State(state): State<AppState>,
    Path(county_id): Path<i64>,
) -> AppResult<Json<Vec<Team>>> {
    Ok(Json(tpe_db::team::list_by_county(&state.pool, CountyId::new(county_id)).await?))
}

#[derive(Deserialize)]
pub struct SetTeamStatus {
    pub status: TeamStatus,
}

pub async fn set_team_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<SetTeamStatus>,
) -> AppResult<()> {
    tpe_db::team::set_status(&state.pool, TeamId::new(id), body.status).await?;
    Ok(())
}

pub async fn delete_team(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<()> {
    tpe_db::lifecycle::delete_team(&state.pool, TeamId::new(id)).await?;
    Ok(())
}

#[derive(Deserialize)]
pub struct CreateCompetition {
    pub name: String,
    pub kind: CompetitionType,
    pub category: TeamCategory,
    pub season_id: Option<i64>,
    pub region_id: Option<i64>,
    pub county_id: Option<i64>,
}

pub async fn create_competition(
    State(state): State<AppState>,
    Json(body): Json<CreateCompetition>,
) -> AppResult<Json<Competition>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, body.season_id.map(SeasonId::new)).await?;
    let competition = tpe_db::lifecycle::create_competition(
        &state.pool,
        &body.name,
        body.kind,
        body.category,
        season_id,
        body.region_id.map(RegionId::new),
        body.county_id.map(CountyId::new),
    )
    .await?;
    Ok(Json(competition))
}

pub async fn get_competition(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Competition>> {
    Ok(Json(tpe_db::competition::get(&state.pool, CompetitionId::new(id)).await?))
}

#[derive(Deserialize)]
pub struct SeasonQuery {
    pub season_id: Option<i64>,
}

pub async fn list_competitions(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<SeasonQuery>,
) -> AppResult<Json<Vec<Competition>>> {
    let season_id = tpe_db::qualification::resolve_season(&state.pool, query.season_id.map(SeasonId::new)).await?;
    Ok(Json(tpe_db::competition::list_by_season(&state.pool, season_id).await?))
}

#[derive(Deserialize)]
pub struct AddTeams {
    pub team_ids: Vec<i64>,
}

pub async fn add_teams(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
    Json(body): Json<AddTeams>,
) -> AppResult<()> {
    let team_ids: Vec<TeamId> = body.team_ids.into_iter().map(TeamId::new).collect();
    tpe_db::lifecycle::add_teams(&state.pool, CompetitionId::new(competition_id), &team_ids).await?;
    Ok(())
}

pub async fn list_competition_teams(
    State(state): State<AppState>,
    Path(competition_id): Path<i64>,
) -> AppResult<Json<Vec<Team>>> {
    Ok(Json(
        tpe_db::team::list_by_competition(&state.pool, CompetitionId::new(competition_id)).await?,
    ))
}
