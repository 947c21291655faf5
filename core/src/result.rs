//! Result state machine: pure guards.
//!
//! The actual status mutation, transactional persistence and post-
//! confirmation side effects (recalculation, event publication, bracket
//! advancement) live in `tpe_db::result`, which calls these guards before
//! writing anything.
use crate::actor::{Actor, Role};
use crate::error::CoreError;
use crate::fixture::{Leg, MatchStatus};
use crate::game::GoalCount;
use crate::ids::TeamId;
use crate::Date;

pub fn can_submit(status: MatchStatus) -> Result<(), CoreError> {
    match status {
        MatchStatus::Scheduled => Ok(()),
        _ => Err(CoreError::invariant(
            "a result can only be submitted for a SCHEDULED match",
        )),
    }
}

pub fn can_confirm(status: MatchStatus) -> Result<(), CoreError> {
    match status {
        MatchStatus::Completed => Ok(()),
        _ => Err(CoreError::invariant(
            "a result can only be confirmed for a COMPLETED match",
        )),
    }
}

/// Enforces the coach-ownership rule: a COACH may only submit for a match
/// one of whose participants is their own team. Admins and viewers are
/// unconstrained by this guard; this rule considers only team_id equality.
pub fn coach_may_submit(
    actor: &Actor,
    home_team_id: Option<TeamId>,
    away_team_id: Option<TeamId>,
) -> Result<(), CoreError> {
    if actor.role != Role::Coach {
        return Ok(());
    }
    let is_participant = actor.team_id.is_some()
        && (actor.team_id == home_team_id || actor.team_id == away_team_id);
    if is_participant {
        Ok(())
    } else {
        Err(CoreError::invariant(
            "a coach may only submit results for their own team's matches",
        ))
    }
}

/// A single-leg bracket match drawn at full time requires a penalty
/// winner before it can be confirmed.
pub fn penalty_winner_required(
    bracket_position: Option<u32>,
    leg: Option<Leg>,
    home_score: GoalCount,
    away_score: GoalCount,
) -> bool {
    bracket_position.is_some() && leg.is_none() && home_score == away_score
}

pub fn validate_penalty_winner(
    penalty_winner_id: Option<TeamId>,
    home_team_id: Option<TeamId>,
    away_team_id: Option<TeamId>,
) -> Result<TeamId, CoreError> {
    let winner = penalty_winner_id.ok_or_else(|| {
        CoreError::invariant("a drawn knockout match requires a penalty winner to confirm")
    })?;
    if Some(winner) == home_team_id || Some(winner) == away_team_id {
        Ok(winner)
    } else {
        Err(CoreError::validation(
            "penalty_winner_id must identify one of the match's participants",
        ))
    }
}

/// Advisory-only gate: non-admin callers may submit a result only
/// after `match_date + 90 minutes`. Computed for display; the state machine
/// itself does not enforce it.
pub fn submission_allowed_at(match_date: Option<Date>, now: Date, is_admin: bool) -> bool {
    if is_admin {
        return true;
    }
    match match_date {
        Some(date) => now.inner() >= date.inner() + chrono::Duration::minutes(90),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coach_can_only_submit_for_own_team() {
        let actor = Actor {
            user_id: crate::ids::UserId::new(1),
            role: Role::Coach,
            team_id: Some(TeamId::new(1)),
        };
        assert!(coach_may_submit(&actor, Some(TeamId::new(1)), Some(TeamId::new(2))).is_ok());
        assert!(coach_may_submit(&actor, Some(TeamId::new(2)), Some(TeamId::new(3))).is_err());
    }

    #[test]
    fn admin_bypasses_coach_ownership() {
        let actor = Actor {
            user_id: crate::ids::UserId::new(1),
            role: Role::Admin,
            team_id: None,
        };
        assert!(coach_may_submit(&actor, Some(TeamId::new(2)), Some(TeamId::new(3))).is_ok());
    }

    #[test]
    fn penalty_winner_required_only_for_drawn_single_leg_bracket_match() {
        let drawn = GoalCount::new(1).unwrap();
        assert!(penalty_winner_required(Some(1), None, drawn, drawn));
        assert!(!penalty_winner_required(None, None, drawn, drawn));
        assert!(!penalty_winner_required(
            Some(1),
            Some(Leg::First),
            drawn,
            drawn
        ));
        assert!(!penalty_winner_required(
            Some(1),
            None,
            GoalCount::new(2).unwrap(),
            drawn
        ));
    }
}
