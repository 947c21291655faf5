//! Round-robin/group-draw/bracket orchestration: wraps
//! `tpe_core::scheduler` and `tpe_core::bracket`'s pure generators with the
//! precondition checks, transactional persistence and zeroed-standings
//! seeding that every draw needs around it.
use crate::{competition, match_, standing, team, DbError};
use rand::RngCore;
use sqlx::SqlitePool;
use tpe_core::fixture::{Match, Stage};
use tpe_core::ids::{CompetitionId, SeasonId, TeamId};
use tpe_core::standing::Standing;
use tpe_core::team::ScheduleTeam;
use tpe_core::Date;

fn schedule_team(team: &tpe_core::team::Team) -> ScheduleTeam {
    ScheduleTeam {
        id: team.id,
        county_id: team.county_id,
        region_id: team.region_id,
    }
}

/// Each generator only rejects on the presence of ITS OWN kind of match,
/// not on any match for the competition/season — a champions-league
/// competition carries both a GROUP stage and, once qualification is done,
/// a QUARTER_FINAL-rooted knockout bracket under the same
/// `(competition_id, season_id)`, and the second generator must not choke
/// on the first's fixtures.
async fn reject_if_exists(pool: &SqlitePool, filter: &match_::MatchFilter, what: &str) -> Result<(), DbError> {
    if !match_::fetch(pool, filter).await?.is_empty() {
        return Err(DbError::Conflict(format!(
            "{} have already been generated for this competition/season",
            what
        )));
    }
    Ok(())
}

async fn seed_zeroed_standings(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    competition_id: CompetitionId,
    season_id: SeasonId,
    teams: &[TeamId],
    group_of: impl Fn(TeamId) -> Option<String>,
    now: Date,
) -> Result<(), DbError> {
    let rows: Vec<Standing> = teams
        .iter()
        .map(|&id| Standing::zeroed(id, competition_id, season_id, group_of(id), now))
        .collect();
    standing::replace_all(tx, competition_id, season_id, &rows).await
}

/// Generates and persists a double round-robin for every team
/// registered to the competition.
pub async fn generate_round_robin(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    start_date: Date,
    interval_days: i64,
) -> Result<Vec<Match>, DbError> {
    let comp = competition::get(pool, competition_id).await?;
    if !comp.kind.permits_league_play() {
        return Err(DbError::Core(tpe_core::error::CoreError::invariant(format!(
            "{:?} competitions do not schedule a round-robin league",
            comp.kind
        ))));
    }
    reject_if_exists(
        pool,
        &match_::MatchFilter::for_competition(competition_id, season_id).with_stage(Stage::League),
        "LEAGUE fixtures",
    )
    .await?;
    let roster = team::list_by_competition(pool, competition_id).await?;
    let schedule_teams: Vec<ScheduleTeam> = roster.iter().map(schedule_team).collect();
    let team_ids: Vec<TeamId> = roster.iter().map(|t| t.id).collect();

    let new_matches = tpe_core::scheduler::round_robin::generate(
        &schedule_teams,
        start_date,
        interval_days,
        competition_id,
        season_id,
    )?;

    let mut tx = pool.begin().await?;
    let ids = match_::insert_many(&mut tx, &new_matches).await?;
    seed_zeroed_standings(&mut tx, competition_id, season_id, &team_ids, |_| None, start_date).await?;
    tx.commit().await?;

    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        out.push(match_::get(pool, id).await?);
    }
    Ok(out)
}

/// Draws 7 groups of 3 from the competition's 21-team roster.
pub async fn generate_group_draw(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    start_date: Date,
    interval_days: i64,
    rng: &mut impl RngCore,
) -> Result<Vec<Match>, DbError> {
    reject_if_exists(
        pool,
        &match_::MatchFilter::for_competition(competition_id, season_id).with_stage(Stage::Group),
        "GROUP fixtures",
    )
    .await?;
    let roster = team::list_by_competition(pool, competition_id).await?;
    let schedule_teams: Vec<ScheduleTeam> = roster.iter().map(schedule_team).collect();

    let drawn = tpe_core::scheduler::group_draw::draw(
        &schedule_teams,
        start_date,
        interval_days,
        competition_id,
        season_id,
        rng,
    )?;

    let group_of: std::collections::HashMap<TeamId, String> = drawn.assignments.iter().cloned().collect();
    let team_ids: Vec<TeamId> = drawn.assignments.iter().map(|(id, _)| *id).collect();

    let mut tx = pool.begin().await?;
    let ids = match_::insert_many(&mut tx, &drawn.matches).await?;
    seed_zeroed_standings(
        &mut tx,
        competition_id,
        season_id,
        &team_ids,
        |id| group_of.get(&id).cloned(),
        start_date,
    )
    .await?;
    tx.commit().await?;

    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        out.push(match_::get(pool, id).await?);
    }
    Ok(out)
}

/// Single-elimination cup draw with byes over the full roster.
pub async fn generate_cup_draw(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    start_date: Date,
    interval_days: i64,
    rng: &mut impl RngCore,
) -> Result<Vec<Match>, DbError> {
    reject_if_exists(
        pool,
        &match_::MatchFilter::for_competition(competition_id, season_id).bracket_only(),
        "a bracket",
    )
    .await?;
    let roster = team::list_by_competition(pool, competition_id).await?;
    let team_ids: Vec<TeamId> = roster.iter().map(|t| t.id).collect();

    let drawn = tpe_core::bracket::cup::draw(&team_ids, start_date, interval_days, competition_id, season_id, rng)?;

    let mut tx = pool.begin().await?;
    let ids = match_::insert_many(&mut tx, &drawn.matches).await?;
    tx.commit().await?;

    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        out.push(match_::get(pool, id).await?);
    }
    Ok(out)
}

/// Seeds the champions-league-style 8-team knockout bracket from
/// `team_pairs`, as already resolved by [`crate::qualification::qualify_for_champions_league`].
pub async fn generate_cl_bracket(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    team_pairs: [(TeamId, TeamId); 4],
    start_date: Date,
    interval_days: i64,
) -> Result<Vec<Match>, DbError> {
    reject_if_exists(
        pool,
        &match_::MatchFilter::for_competition(competition_id, season_id).with_stage(Stage::QuarterFinal),
        "a quarter-final bracket",
    )
    .await?;
    let new_matches =
        tpe_core::bracket::knockout::cl_bracket(team_pairs, start_date, interval_days, competition_id, season_id);

    let mut tx = pool.begin().await?;
    let ids = match_::insert_many(&mut tx, &new_matches).await?;
    tx.commit().await?;

    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        out.push(match_::get(pool, id).await?);
    }
    Ok(out)
}

/// Resolves the just-confirmed bracket match's winner and writes it
/// into the parent placeholder slot. No-op if `match_id` is the bracket
/// root (no parent) or isn't a bracket match at all.
pub async fn advance_bracket_winner(pool: &SqlitePool, match_id: tpe_core::ids::MatchId) -> Result<(), DbError> {
    let played = match_::get(pool, match_id).await?;
    let Some(position) = played.bracket_position else {
        return Ok(());
    };
    let Some(home_score) = played.home_score else {
        return Ok(());
    };
    let Some(away_score) = played.away_score else {
        return Ok(());
    };
    let (Some(home_team), Some(away_team)) = (played.home_team_id, played.away_team_id) else {
        return Ok(());
    };

    let winner = match played.leg {
        None => tpe_core::bracket::advance::single_leg_winner(
            tpe_core::bracket::advance::LegScore {
                home_team,
                away_team,
                home_score,
                away_score,
            },
            played.penalty_winner_id,
        ),
        Some(tpe_core::fixture::Leg::Second) => {
            let leg1 = match_::get_by_bracket_position(pool, played.competition_id, played.season_id, position)
                .await?;
            let (Some(l1_home_score), Some(l1_away_score), Some(l1_home), Some(l1_away)) =
                (leg1.home_score, leg1.away_score, leg1.home_team_id, leg1.away_team_id)
            else {
                return Ok(());
            };
            tpe_core::bracket::advance::two_legged_winner(
                tpe_core::bracket::advance::LegScore {
                    home_team: l1_home,
                    away_team: l1_away,
                    home_score: l1_home_score,
                    away_score: l1_away_score,
                },
                tpe_core::bracket::advance::LegScore {
                    home_team,
                    away_team,
                    home_score,
                    away_score,
                },
            )
        }
        Some(tpe_core::fixture::Leg::First) => return Ok(()),
    };

    let Some(winner) = winner else { return Ok(()) };
    let Some(write) = tpe_core::bracket::advance::parent_write(position) else {
        return Ok(());
    };

    let mut tx = pool.begin().await?;
    match_::fill_bracket_slot(&mut tx, played.competition_id, played.season_id, write.position, write.slot, winner)
        .await?;
    tx.commit().await?;
    Ok(())
}

/// Every persisted match for the competition/season, grouped by stage in
/// bracket-depth order (`GET /competitions/{id}/bracket` shape).
pub async fn get_bracket(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<Vec<(Stage, Vec<Match>)>, DbError> {
    let filter = match_::MatchFilter::for_competition(competition_id, season_id).bracket_only();
    let matches = match_::fetch(pool, &filter).await?;

    let stage_order = [
        Stage::Final,
        Stage::SemiFinal,
        Stage::QuarterFinal,
        Stage::RoundOf16,
        Stage::Round3,
        Stage::Round2,
        Stage::Round1,
    ];
    let mut grouped = Vec::new();
    for stage in stage_order {
        let rows: Vec<Match> = matches.iter().filter(|m| m.stage == Some(stage)).cloned().collect();
        if !rows.is_empty() {
            grouped.push((stage, rows));
        }
    }
    Ok(grouped)
}

/// `DELETE /competitions/{id}/bracket`: refuses (409) once any bracket
/// match has been CONFIRMED.
pub async fn reset_bracket(pool: &SqlitePool, competition_id: CompetitionId, season_id: SeasonId) -> Result<(), DbError> {
    if match_::any_confirmed(pool, competition_id, season_id).await? {
        return Err(DbError::Conflict(
            "cannot reset a bracket with confirmed results".to_string(),
        ));
    }
    match_::delete_by_competition(pool, competition_id, season_id).await
}
