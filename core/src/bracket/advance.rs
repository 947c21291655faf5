//! Parent-slot filling and CL knockout advancement.
use crate::bracket::position::{parent_of, Slot};
use crate::game::GoalCount;
use crate::ids::TeamId;
use crate::standing::Standing;
use serde::Serialize;

/// One side of a played leg, as needed to resolve a tie.
#[derive(Debug, Clone, Copy)]
pub struct LegScore {
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_score: GoalCount,
    pub away_score: GoalCount,
}

/// Single-leg branch: higher score wins; a draw is resolved by the
/// (already-validated-as-present) penalty winner.
pub fn single_leg_winner(
    leg: LegScore,
    penalty_winner_id: Option<TeamId>,
) -> Option<TeamId> {
    match leg.home_score.as_u32().cmp(&leg.away_score.as_u32()) {
        std::cmp::Ordering::Greater => Some(leg.home_team),
        std::cmp::Ordering::Less => Some(leg.away_team),
        std::cmp::Ordering::Equal => penalty_winner_id,
    }
}

/// Two-legged branch. `leg1.home_team == leg2.away_team` (team A)
/// and `leg1.away_team == leg2.home_team` (team B) by construction.
/// Resolves by aggregate score, then away goals, then gives up (`None`) —
/// leaving a still-tied result for manual intervention.
pub fn two_legged_winner(leg1: LegScore, leg2: LegScore) -> Option<TeamId> {
    let team_a = leg1.home_team;
    let team_b = leg1.away_team;

    let aggregate_a = leg1.home_score.as_u32() + leg2.away_score.as_u32();
    let aggregate_b = leg1.away_score.as_u32() + leg2.home_score.as_u32();
    match aggregate_a.cmp(&aggregate_b) {
        std::cmp::Ordering::Greater => return Some(team_a),
        std::cmp::Ordering::Less => return Some(team_b),
        std::cmp::Ordering::Equal => {}
    }

    let away_goals_a = leg2.away_score.as_u32();
    let away_goals_b = leg1.away_score.as_u32();
    match away_goals_a.cmp(&away_goals_b) {
        std::cmp::Ordering::Greater => Some(team_a),
        std::cmp::Ordering::Less => Some(team_b),
        std::cmp::Ordering::Equal => None,
    }
}

/// Where a winner should be written once resolved: which parent position,
/// and which logical slot of it ("home slot" of a two-legged tie is realized
/// as `leg1.home == leg2.away`; "away slot" as `leg1.away == leg2.home`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentWrite {
    pub position: u32,
    pub slot: Slot,
}

/// `None` if `position` is the root (position 1, no parent to fill).
pub fn parent_write(position: u32) -> Option<ParentWrite> {
    parent_of(position).map(|(position, slot)| ParentWrite { position, slot })
}

/// From each of the 7 already-sorted groups, collects the 7 winners
/// and the single best runner-up, then pairs seeded winners against
/// unseeded opponents while avoiding same-group rematches where possible.
#[derive(Debug, Clone, Serialize)]
pub struct KnockoutField {
    /// The 8 qualified team ids.
    pub qualified: Vec<TeamId>,
    /// The 4 quarter-final pairings, `(seeded, unseeded)`.
    pub pairs: Vec<(TeamId, TeamId)>,
}

/// `groups_sorted` must contain exactly 7 already-`sort_standings`-ordered
/// groups (one `Vec<Standing>` per group, best first).
pub fn cl_knockout_field(groups_sorted: &[Vec<Standing>]) -> KnockoutField {
    assert_eq!(groups_sorted.len(), 7, "CL knockout draws from exactly 7 groups");

    let winners: Vec<(TeamId, &Standing, usize)> = groups_sorted
        .iter()
        .enumerate()
        .map(|(group_idx, rows)| (rows[0].team_id, &rows[0], group_idx))
        .collect();

    let mut runners_up: Vec<(TeamId, &Standing, usize)> = groups_sorted
        .iter()
        .enumerate()
        .map(|(group_idx, rows)| (rows[1].team_id, &rows[1], group_idx))
        .collect();
    runners_up.sort_by(|(_, a, _), (_, b, _)| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    let best_runner_up = runners_up[0];

    // Seeded = top 4 winners by the group sort order (mirrors the original
    // service's simple slice-by-group-index seeding).
    let mut winners_by_strength = winners.clone();
    winners_by_strength.sort_by(|(_, a, _), (_, b, _)| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    let seeded: Vec<(TeamId, usize)> = winners_by_strength[0..4]
        .iter()
        .map(|(id, _, g)| (*id, *g))
        .collect();
    let mut unseeded: Vec<(TeamId, usize)> = winners_by_strength[4..7]
        .iter()
        .map(|(id, _, g)| (*id, *g))
        .collect();
    unseeded.push((best_runner_up.0, best_runner_up.2));

    let pairs = pair_avoiding_same_group(&seeded, &unseeded);

    let mut qualified: Vec<TeamId> = winners.iter().map(|(id, _, _)| *id).collect();
    qualified.push(best_runner_up.0);

    KnockoutField { qualified, pairs }
}

fn pair_avoiding_same_group(
    seeded: &[(TeamId, usize)],
    unseeded: &[(TeamId, usize)],
) -> Vec<(TeamId, TeamId)> {
    let mut remaining: Vec<(TeamId, usize)> = unseeded.to_vec();
    let mut pairs = Vec::with_capacity(seeded.len());
    for &(seed_id, seed_group) in seeded {
        let pick_idx = remaining
            .iter()
            .position(|(_, group)| *group != seed_group)
            .unwrap_or(0);
        let (opponent_id, _) = remaining.remove(pick_idx);
        pairs.push((seed_id, opponent_id));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GoalCount;
    use crate::ids::TeamId;

    fn score(n: u32) -> GoalCount {
        GoalCount::new(n).unwrap()
    }

    #[test]
    fn single_leg_prefers_higher_score() {
        let leg = LegScore {
            home_team: TeamId::new(1),
            away_team: TeamId::new(2),
            home_score: score(3),
            away_score: score(1),
        };
        assert_eq!(single_leg_winner(leg, None), Some(TeamId::new(1)));
    }

    #[test]
    fn single_leg_draw_uses_penalty_winner() {
        let leg = LegScore {
            home_team: TeamId::new(1),
            away_team: TeamId::new(2),
            home_score: score(1),
            away_score: score(1),
        };
        assert_eq!(
            single_leg_winner(leg, Some(TeamId::new(2))),
            Some(TeamId::new(2))
        );
    }

    #[test]
    fn two_legged_aggregate_decides() {
        // leg1: A(home) 3-0 B(away); leg2: B(home) 0-1 A(away). Aggregate A=4, B=1.
        let leg1 = LegScore {
            home_team: TeamId::new(1),
            away_team: TeamId::new(2),
            home_score: score(3),
            away_score: score(0),
        };
        let leg2 = LegScore {
            home_team: TeamId::new(2),
            away_team: TeamId::new(1),
            home_score: score(0),
            away_score: score(1),
        };
        assert_eq!(two_legged_winner(leg1, leg2), Some(TeamId::new(1)));
    }

    #[test]
    fn two_legged_away_goals_tiebreak() {
        // leg1: A 1-0 B, leg2: B 0-1 A -> aggregate A=2 B=0... use an actual tie instead.
        // leg1: A 1-1 B, leg2: B 1-1 A -> aggregate 2-2, away goals: A's away goal
        // (leg2 away score) = 1, B's away goal (leg1 away score) = 1 -> fully tied -> None.
        let leg1 = LegScore {
            home_team: TeamId::new(1),
            away_team: TeamId::new(2),
            home_score: score(1),
            away_score: score(1),
        };
        let leg2 = LegScore {
            home_team: TeamId::new(2),
            away_team: TeamId::new(1),
            home_score: score(1),
            away_score: score(1),
        };
        assert_eq!(two_legged_winner(leg1, leg2), None);
    }

    #[test]
    fn two_legged_away_goals_break_aggregate_tie() {
        // leg1: A 2-2 B, leg2: B 1-1 A -> aggregate A=3,B=3. away_a=leg2.away=1, away_b=leg1.away=2.
        let leg1 = LegScore {
            home_team: TeamId::new(1),
            away_team: TeamId::new(2),
            home_score: score(2),
            away_score: score(2),
        };
        let leg2 = LegScore {
            home_team: TeamId::new(2),
            away_team: TeamId::new(1),
            home_score: score(1),
            away_score: score(1),
        };
        assert_eq!(two_legged_winner(leg1, leg2), Some(TeamId::new(2)));
    }
}
