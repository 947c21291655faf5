//! Qualification pipeline: pure selection helpers.
//!
//! Completeness checks, the expected-count assertion, and idempotent
//! team-set mutation live in `tpe_db::qualification`, which loads
//! standings, calls these, and persists the result.
use crate::ids::TeamId;
use crate::standing::Standing;

/// `rows` must already be `sort_standings`-ordered. Returns the first
/// `count` team ids.
pub fn top_teams(rows: &[Standing], count: usize) -> Vec<TeamId> {
    rows.iter().take(count).map(|r| r.team_id).collect()
}

/// `groups_sorted` holds one already-`sort_standings`-ordered `Vec<Standing>`
/// per group. Collects winners first (in group order), then runners-up
/// sorted by (points, GD, GF) descending, until `count` ids are gathered.
pub fn top_teams_from_groups(groups_sorted: &[Vec<Standing>], count: usize) -> Vec<TeamId> {
    let winners: Vec<TeamId> = groups_sorted
        .iter()
        .filter_map(|g| g.first())
        .map(|s| s.team_id)
        .collect();

    let mut runners_up: Vec<&Standing> = groups_sorted.iter().filter_map(|g| g.get(1)).collect();
    runners_up.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });

    winners
        .into_iter()
        .chain(runners_up.into_iter().map(|s| s.team_id))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GoalCount, GoalDiff, NumGames};
    use crate::ids::{CompetitionId, SeasonId};
    use crate::standing::Points;

    fn standing(id: i64, points: u32, gd: i32, gf: u32, group: &str) -> Standing {
        Standing {
            team_id: TeamId::new(id),
            competition_id: CompetitionId::new(1),
            season_id: SeasonId::new(1),
            played: NumGames(0),
            won: NumGames(0),
            drawn: NumGames(0),
            lost: NumGames(0),
            goals_for: GoalCount::new(gf).unwrap(),
            goals_against: GoalCount::new(0).unwrap(),
            goal_difference: GoalDiff(gd),
            points: Points(points),
            group_name: Some(group.to_string()),
            updated_at: crate::Date::mock(),
        }
    }

    #[test]
    fn top_n_from_a_single_table() {
        let rows = vec![
            standing(1, 9, 5, 10, "A"),
            standing(2, 6, 2, 7, "A"),
            standing(3, 3, -2, 3, "A"),
        ];
        assert_eq!(top_teams(&rows, 2), vec![TeamId::new(1), TeamId::new(2)]);
    }

    #[test]
    fn winners_then_runners_up() {
        let groups = vec![
            vec![standing(1, 9, 5, 10, "A"), standing(2, 4, 0, 3, "A")],
            vec![standing(3, 9, 3, 8, "B"), standing(4, 6, 1, 5, "B")],
        ];
        let top3 = top_teams_from_groups(&groups, 3);
        assert_eq!(top3, vec![TeamId::new(1), TeamId::new(3), TeamId::new(4)]);
    }
}
