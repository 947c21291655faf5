//! Result state machine orchestration: runs the sequence inside
//! one transaction, then publishes events only after `tx.commit` succeeds.
use crate::events::{Event, EventBus};
use crate::{match_, scheduler, standings, DbError};
use sqlx::SqlitePool;
use tpe_core::actor::Actor;
use tpe_core::fixture::MatchStatus;
use tpe_core::ids::{MatchId, TeamId, UserId};
use tpe_core::Date;

/// A coach or admin submits a final score for a SCHEDULED match,
/// moving it to COMPLETED.
pub async fn submit_result(
    pool: &SqlitePool,
    match_id: MatchId,
    actor: &Actor,
    home_score: u32,
    away_score: u32,
) -> Result<(), DbError> {
    let m = match_::get(pool, match_id).await?;
    tpe_core::result::can_submit(m.status)?;
    tpe_core::result::coach_may_submit(actor, m.home_team_id, m.away_team_id)?;

    let mut tx = pool.begin().await?;
    match_::submit_result(&mut tx, match_id, home_score, away_score, actor.user_id).await?;
    tx.commit().await?;
    Ok(())
}

/// An admin confirms a COMPLETED match, triggering standings
/// recalculation, event publication, and (for bracket matches) advancement.
pub async fn confirm_result(
    pool: &SqlitePool,
    events: &EventBus,
    match_id: MatchId,
    confirmed_by_id: UserId,
    penalty_winner_id: Option<TeamId>,
    now: Date,
) -> Result<(), DbError> {
    let m = match_::get(pool, match_id).await?;
    tpe_core::result::can_confirm(m.status)?;

    let home_score = m.home_score.ok_or_else(|| {
        DbError::Core(tpe_core::error::CoreError::invariant(
            "a COMPLETED match must carry a score",
        ))
    })?;
    let away_score = m.away_score.ok_or_else(|| {
        DbError::Core(tpe_core::error::CoreError::invariant(
            "a COMPLETED match must carry a score",
        ))
    })?;

    let penalty_winner_id = if tpe_core::result::penalty_winner_required(m.bracket_position, m.leg, home_score, away_score) {
        let (home, away) = (m.home_team_id, m.away_team_id);
        Some(tpe_core::result::validate_penalty_winner(penalty_winner_id, home, away)?)
    } else {
        None
    };

    let mut tx = pool.begin().await?;
    match_::confirm_result(&mut tx, match_id, confirmed_by_id, penalty_winner_id).await?;
    tx.commit().await?;

    events.publish(Event::MatchConfirmed {
        match_id,
        competition_id: m.competition_id,
        season_id: m.season_id,
        home_team_id: m.home_team_id.expect("a CONFIRMED match carries both teams"),
        away_team_id: m.away_team_id.expect("a CONFIRMED match carries both teams"),
        home_score: home_score.as_u32(),
        away_score: away_score.as_u32(),
    });

    if m.counts_towards_standings() {
        standings::recalculate(pool, m.competition_id, m.season_id, now).await?;
        events.publish(Event::StandingsUpdated {
            competition_id: m.competition_id,
            season_id: m.season_id,
        });
    }

    if m.bracket_position.is_some() {
        scheduler::advance_bracket_winner(pool, match_id).await?;
        events.publish(Event::BracketUpdated {
            competition_id: m.competition_id,
            match_id,
            bracket_position: m.bracket_position,
        });
    }

    // Only LEAGUE/GROUP matches drive a competition-complete signal.
    // Knockout stages may legitimately leave unresolved slots behind (an
    // unresolved two-legged tie), so they must never hold this flag back
    // nor trigger it prematurely.
    if m.stage.map(|s| s.is_league_or_group()).unwrap_or(false) {
        let unplayed = match_::fetch(
            pool,
            &match_::MatchFilter::for_competition(m.competition_id, m.season_id),
        )
        .await?
        .into_iter()
        .filter(|other| other.stage.map(|s| s.is_league_or_group()).unwrap_or(false))
        .filter(|other| other.status != MatchStatus::Confirmed)
        .count();
        if unplayed == 0 {
            events.publish(Event::CompetitionComplete {
                competition_id: m.competition_id,
                season_id: m.season_id,
            });
        }
    }

    Ok(())
}
