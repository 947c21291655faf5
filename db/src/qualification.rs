//! Qualification pipeline orchestration: completeness checks, the
//! expected-count assertion, and idempotent team-set mutation around
//! `tpe_core::qualification`'s pure selection helpers.
use crate::{competition, match_, season, standing, standings, DbError};
use sqlx::SqlitePool;
use tpe_core::competition::CompetitionType;
use tpe_core::fixture::MatchStatus;
use tpe_core::ids::{CompetitionId, RegionId, SeasonId, TeamId};

/// One competition's completion status, counted over its LEAGUE/GROUP
/// fixtures only (a competition's knockout stage, if any, never gates
/// qualification). Feeds `GET /competitions/{id}/status`.
#[derive(Debug, Clone)]
pub struct CompetitionStatus {
    pub competition_id: CompetitionId,
    pub total: usize,
    pub confirmed: usize,
    pub remaining: usize,
    pub complete: bool,
}

pub async fn get_competition_status(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<CompetitionStatus, DbError> {
    let all = match_::fetch(pool, &match_::MatchFilter::for_competition(competition_id, season_id)).await?;
    let league_or_group: Vec<_> = all
        .iter()
        .filter(|m| m.stage.map(|s| s.is_league_or_group()).unwrap_or(false))
        .collect();
    let confirmed = league_or_group.iter().filter(|m| m.status == MatchStatus::Confirmed).count();
    let total = league_or_group.len();
    Ok(CompetitionStatus {
        competition_id,
        total,
        confirmed,
        remaining: total - confirmed,
        complete: total > 0 && confirmed == total,
    })
}

/// Sorts over the competition's whole table, no group filter.
pub async fn get_top_teams(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    count: usize,
) -> Result<Vec<TeamId>, DbError> {
    let table = standings::ranked_table(pool, competition_id, season_id).await?;
    Ok(tpe_core::qualification::top_teams(&table, count))
}

/// Each group sorted individually, winners first then runners-up, until
/// `count` teams are collected.
pub async fn get_top_teams_from_groups(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    count: usize,
) -> Result<Vec<TeamId>, DbError> {
    let groups_sorted = ranked_groups(pool, competition_id, season_id).await?;
    Ok(tpe_core::qualification::top_teams_from_groups(&groups_sorted, count))
}

/// Every distinct `group_name` under the competition, each already
/// `sort_standings`-ordered. Empty if the competition carries no grouped
/// standings at all.
async fn ranked_groups(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<Vec<Vec<tpe_core::standing::Standing>>, DbError> {
    let rows = standing::fetch(pool, competition_id, season_id).await?;
    let mut names: Vec<String> = rows.into_iter().filter_map(|r| r.group_name).collect();
    names.sort();
    names.dedup();

    let mut groups = Vec::with_capacity(names.len());
    for name in &names {
        groups.push(standings::ranked_group(pool, competition_id, season_id, name).await?);
    }
    Ok(groups)
}

async fn is_grouped(pool: &SqlitePool, competition_id: CompetitionId, season_id: SeasonId) -> Result<bool, DbError> {
    let rows = standing::fetch(pool, competition_id, season_id).await?;
    Ok(rows.iter().any(|r| r.group_name.is_some()))
}

/// Per-source breakdown of which teams qualified from one feeder
/// competition, shared by both qualification endpoints.
#[derive(Debug, Clone)]
pub struct QualificationBreakdown {
    pub region_id: RegionId,
    pub source_competition_id: CompetitionId,
    pub qualified: Vec<TeamId>,
}

/// The outcome of a qualification run: how many teams were selected versus
/// how many were genuinely newly added to the target roster (idempotent
/// repeat calls report `added = 0`, `already_present = qualified_count`).
#[derive(Debug, Clone)]
pub struct QualificationResult {
    pub qualified_count: usize,
    pub added_count: usize,
    pub already_present_count: usize,
    pub source_count: usize,
    pub breakdown: Vec<QualificationBreakdown>,
}

async fn apply_breakdowns(
    pool: &SqlitePool,
    target_competition_id: CompetitionId,
    breakdowns: Vec<QualificationBreakdown>,
) -> Result<QualificationResult, DbError> {
    let existing: std::collections::HashSet<TeamId> =
        competition::team_ids(pool, target_competition_id).await?.into_iter().collect();

    let mut added = 0usize;
    let mut already_present = 0usize;
    let mut qualified_count = 0usize;
    for b in &breakdowns {
        for &team_id in &b.qualified {
            qualified_count += 1;
            if existing.contains(&team_id) {
                already_present += 1;
            } else {
                added += 1;
            }
            competition::add_team(pool, target_competition_id, team_id).await?;
        }
    }

    Ok(QualificationResult {
        qualified_count,
        added_count: added,
        already_present_count: already_present,
        source_count: breakdowns.len(),
        breakdown: breakdowns,
    })
}

/// Target must be REGIONAL. Gathers every COUNTY competition scoped
/// to the target's region and the given season, requires each complete,
/// takes the top `top_n` of each, and adds them to the REGIONAL's roster.
pub async fn qualify_for_regional(
    pool: &SqlitePool,
    season_id: SeasonId,
    regional_competition_id: CompetitionId,
    top_n: usize,
) -> Result<QualificationResult, DbError> {
    let target = competition::get(pool, regional_competition_id).await?;
    if target.kind != CompetitionType::Regional {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "qualify_for_regional requires a REGIONAL target, got {:?}",
            target.kind
        ))));
    }
    let region_id = target
        .region_id
        .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::invariant("a REGIONAL competition must carry region_id")))?;

    let counties: Vec<_> = competition::list_by_season(pool, season_id)
        .await?
        .into_iter()
        .filter(|c| c.kind == CompetitionType::County && c.region_id == Some(region_id))
        .collect();
    if counties.is_empty() {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "no COUNTY competitions exist for region {} in this season",
            region_id
        ))));
    }

    let mut remaining = Vec::new();
    for county in &counties {
        let status = get_competition_status(pool, county.id, season_id).await?;
        if !status.complete {
            remaining.push(county.id);
        }
    }
    if !remaining.is_empty() {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "{} of {} COUNTY competitions are not yet complete: {:?}",
            remaining.len(),
            counties.len(),
            remaining
        ))));
    }

    let mut breakdowns = Vec::with_capacity(counties.len());
    for county in &counties {
        let qualified = get_top_teams(pool, county.id, season_id, top_n).await?;
        breakdowns.push(QualificationBreakdown {
            region_id,
            source_competition_id: county.id,
            qualified,
        });
    }

    let expected = counties.len() * top_n;
    let actual: usize = breakdowns.iter().map(|b| b.qualified.len()).sum();
    if actual != expected {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "expected {} qualifiers ({} counties * {} each), got {}",
            expected,
            counties.len(),
            top_n,
            actual
        ))));
    }

    apply_breakdowns(pool, regional_competition_id, breakdowns).await
}

/// Target must be NATIONAL. Gathers every REGIONAL competition for
/// the season, requires each complete, takes the top `top_n` of each
/// (group-aware when the feeder carries `group_name` standings), and adds
/// them to the NATIONAL/champions-league roster.
pub async fn qualify_for_champions_league(
    pool: &SqlitePool,
    season_id: SeasonId,
    cl_competition_id: CompetitionId,
    top_n: usize,
) -> Result<QualificationResult, DbError> {
    let target = competition::get(pool, cl_competition_id).await?;
    if target.kind != CompetitionType::National {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "qualify_for_champions_league requires a NATIONAL target, got {:?}",
            target.kind
        ))));
    }

    let regionals: Vec<_> = competition::list_by_season(pool, season_id)
        .await?
        .into_iter()
        .filter(|c| c.kind == CompetitionType::Regional)
        .collect();
    if regionals.is_empty() {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(
            "no REGIONAL competitions exist for this season",
        )));
    }

    let mut remaining = Vec::new();
    for regional in &regionals {
        let status = get_competition_status(pool, regional.id, season_id).await?;
        if !status.complete {
            remaining.push(regional.id);
        }
    }
    if !remaining.is_empty() {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "{} of {} REGIONAL competitions are not yet complete: {:?}",
            remaining.len(),
            regionals.len(),
            remaining
        ))));
    }

    let mut breakdowns = Vec::with_capacity(regionals.len());
    for regional in &regionals {
        let region_id = regional
            .region_id
            .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::invariant("a REGIONAL competition must carry region_id")))?;
        let qualified = if is_grouped(pool, regional.id, season_id).await? {
            get_top_teams_from_groups(pool, regional.id, season_id, top_n).await?
        } else {
            get_top_teams(pool, regional.id, season_id, top_n).await?
        };
        breakdowns.push(QualificationBreakdown {
            region_id,
            source_competition_id: regional.id,
            qualified,
        });
    }

    let expected = regionals.len() * top_n;
    let actual: usize = breakdowns.iter().map(|b| b.qualified.len()).sum();
    if actual != expected {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "expected {} qualifiers ({} regionals * {} each), got {}",
            expected,
            regionals.len(),
            top_n,
            actual
        ))));
    }

    apply_breakdowns(pool, cl_competition_id, breakdowns).await
}

/// Resolves the national competition's 7 group tables into the
/// quarter-final draw. Distinct from the qualification pipeline above —
/// this runs on the champions-league competition's own GROUP stage, once
/// its 21 qualifiers have been drawn into groups by
/// [`crate::scheduler::generate_group_draw`].
pub async fn advance_cl_knockout(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<tpe_core::bracket::advance::KnockoutField, DbError> {
    let status = get_competition_status(pool, competition_id, season_id).await?;
    if !status.complete {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(
            "the group stage is not yet complete",
        )));
    }

    let groups_sorted = ranked_groups(pool, competition_id, season_id).await?;
    if groups_sorted.len() != 7 {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "champions league knockout advancement requires exactly 7 groups, found {}",
            groups_sorted.len()
        ))));
    }

    Ok(tpe_core::bracket::advance::cl_knockout_field(&groups_sorted))
}

/// Resolves `season_id` to the active season when `None`.
pub async fn resolve_season(pool: &SqlitePool, season_id: Option<SeasonId>) -> Result<SeasonId, DbError> {
    match season_id {
        Some(id) => Ok(id),
        None => season::active(pool)
            .await?
            .map(|s| s.id)
            .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::not_found("an active season"))),
    }
}
