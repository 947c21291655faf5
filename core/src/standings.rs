//! Standings calculator.
//!
//! Pure functions only. The caller (`tpe_db::standings`) is responsible for
//! loading the right match set from storage and persisting the result.
use crate::game::{GoalCount, GoalDiff, NumGames};
use crate::ids::TeamId;
use crate::standing::{Points, Standing};
use std::collections::HashMap;

/// The minimal read-only view of a confirmed, standings-relevant match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchFacts {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: GoalCount,
    pub away_score: GoalCount,
    pub group_name: Option<String>,
}

/// Rebuilds each team's row from `matches`, the already-filtered set of
/// CONFIRMED LEAGUE/GROUP/legacy-null-stage matches for one
/// (competition_id, season_id). `teams` is the full roster to produce a row
/// for, including teams with zero matches played.
///
/// Idempotent: called twice on the same inputs, this returns
/// bit-for-bit-equal rows, since it always rebuilds from scratch rather
/// than accumulating onto existing state.
pub fn recalculate(
    teams: &[TeamId],
    matches: &[MatchFacts],
    competition_id: crate::ids::CompetitionId,
    season_id: crate::ids::SeasonId,
    updated_at: crate::Date,
) -> Vec<Standing> {
    let mut rows: HashMap<TeamId, Standing> = teams
        .iter()
        .map(|&id| {
            (
                id,
                Standing::zeroed(id, competition_id, season_id, None, updated_at),
            )
        })
        .collect();

    for m in matches {
        apply_match(rows.get_mut(&m.home_team_id), m.home_score, m.away_score);
        apply_match(rows.get_mut(&m.away_team_id), m.away_score, m.home_score);
        if let Some(group_name) = &m.group_name {
            set_group_if_absent(rows.get_mut(&m.home_team_id), group_name);
            set_group_if_absent(rows.get_mut(&m.away_team_id), group_name);
        }
    }

    teams.iter().filter_map(|id| rows.remove(id)).collect()
}

fn apply_match(row: Option<&mut Standing>, scored: GoalCount, conceded: GoalCount) {
    let Some(row) = row else { return };
    row.played += NumGames(1);
    row.goals_for += scored;
    row.goals_against += conceded;
    row.goal_difference = row.goal_difference + (scored - conceded);
    match scored.as_u32().cmp(&conceded.as_u32()) {
        std::cmp::Ordering::Greater => {
            row.won += NumGames(1);
            row.points += Points(3);
        }
        std::cmp::Ordering::Equal => {
            row.drawn += NumGames(1);
            row.points += Points(1);
        }
        std::cmp::Ordering::Less => {
            row.lost += NumGames(1);
        }
    }
}

fn set_group_if_absent(row: Option<&mut Standing>, group_name: &str) {
    if let Some(row) = row {
        if row.group_name.is_none() {
            row.group_name = Some(group_name.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct H2hStat {
    points: Points,
    goal_diff: GoalDiff,
}

/// Five-key sort. Does not mutate `rows`; returns a freshly ordered copy.
pub fn sort_standings(rows: &[Standing], matches: &[MatchFacts]) -> Vec<Standing> {
    let mut indexed: Vec<(usize, Standing)> = rows.iter().cloned().enumerate().collect();
    // Primary key: overall points descending, stable on original order.
    indexed.sort_by(|(ia, a), (ib, b)| b.points.cmp(&a.points).then(ia.cmp(ib)));

    let mut result = Vec::with_capacity(indexed.len());
    let mut i = 0;
    while i < indexed.len() {
        let mut j = i + 1;
        while j < indexed.len() && indexed[j].1.points == indexed[i].1.points {
            j += 1;
        }
        let mut cluster: Vec<(usize, Standing)> = indexed[i..j].to_vec();
        if cluster.len() > 1 {
            let tied_ids: Vec<TeamId> = cluster.iter().map(|(_, s)| s.team_id).collect();
            let h2h = head_to_head(&tied_ids, matches);
            cluster.sort_by(|(ia, a), (ib, b)| {
                let ha = h2h.get(&a.team_id).copied().unwrap_or_default();
                let hb = h2h.get(&b.team_id).copied().unwrap_or_default();
                hb.points
                    .cmp(&ha.points)
                    .then(hb.goal_diff.cmp(&ha.goal_diff))
                    .then(b.goal_difference.cmp(&a.goal_difference))
                    .then(b.goals_for.cmp(&a.goals_for))
                    .then(ia.cmp(ib))
            });
        }
        result.extend(cluster.into_iter().map(|(_, s)| s));
        i = j;
    }
    result
}

fn head_to_head(tied_ids: &[TeamId], matches: &[MatchFacts]) -> HashMap<TeamId, H2hStat> {
    let tied: std::collections::HashSet<TeamId> = tied_ids.iter().copied().collect();
    let mut stats: HashMap<TeamId, H2hStat> =
        tied_ids.iter().map(|&id| (id, H2hStat::default())).collect();
    for m in matches {
        if !tied.contains(&m.home_team_id) || !tied.contains(&m.away_team_id) {
            continue;
        }
        let diff = m.home_score - m.away_score;
        if let Some(home) = stats.get_mut(&m.home_team_id) {
            home.goal_diff = home.goal_diff + diff;
            home.points += match m.home_score.as_u32().cmp(&m.away_score.as_u32()) {
                std::cmp::Ordering::Greater => Points(3),
                std::cmp::Ordering::Equal => Points(1),
                std::cmp::Ordering::Less => Points(0),
            };
        }
        if let Some(away) = stats.get_mut(&m.away_team_id) {
            away.goal_diff = away.goal_diff - diff;
            away.points += match m.away_score.as_u32().cmp(&m.home_score.as_u32()) {
                std::cmp::Ordering::Greater => Points(3),
                std::cmp::Ordering::Equal => Points(1),
                std::cmp::Ordering::Less => Points(0),
            };
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CompetitionId, SeasonId};

    fn facts(home: i64, away: i64, hs: u32, as_: u32) -> MatchFacts {
        MatchFacts {
            home_team_id: TeamId::new(home),
            away_team_id: TeamId::new(away),
            home_score: GoalCount::new(hs).unwrap(),
            away_score: GoalCount::new(as_).unwrap(),
            group_name: None,
        }
    }

    fn teams(ids: &[i64]) -> Vec<TeamId> {
        ids.iter().map(|&i| TeamId::new(i)).collect()
    }

    #[test]
    fn scenario_home_always_wins_2_1() {
        // 4-team double round robin, every match home 2-1.
        let t = teams(&[1, 2, 3, 4]);
        let pairs = [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)];
        let mut matches = Vec::new();
        for (a, b) in pairs {
            matches.push(facts(a, b, 2, 1));
            matches.push(facts(b, a, 2, 1));
        }
        let rows = recalculate(&t, &matches, CompetitionId::new(1), SeasonId::new(1), crate::Date::mock());
        for row in &rows {
            assert_eq!(row.played, NumGames(6));
            assert_eq!(row.won, NumGames(3));
            assert_eq!(row.lost, NumGames(3));
            assert_eq!(row.drawn, NumGames(0));
            assert_eq!(row.points, Points(9));
            assert_eq!(row.goals_for, GoalCount::new(9).unwrap());
            assert_eq!(row.goals_against, GoalCount::new(9).unwrap());
            assert_eq!(row.goal_difference, GoalDiff(0));
            assert!(row.invariants_hold());
        }
    }

    #[test]
    fn scenario_all_draws() {
        let t = teams(&[1, 2, 3, 4]);
        let pairs = [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)];
        let mut matches = Vec::new();
        for (a, b) in pairs {
            matches.push(facts(a, b, 0, 0));
            matches.push(facts(b, a, 0, 0));
        }
        let rows = recalculate(&t, &matches, CompetitionId::new(1), SeasonId::new(1), crate::Date::mock());
        for row in &rows {
            assert_eq!(row.played, NumGames(6));
            assert_eq!(row.drawn, NumGames(6));
            assert_eq!(row.points, Points(6));
            assert_eq!(row.goals_for, GoalCount::new(0).unwrap());
        }
    }

    #[test]
    fn recalculate_is_idempotent() {
        let t = teams(&[1, 2]);
        let matches = vec![facts(1, 2, 3, 0)];
        let a = recalculate(&t, &matches, CompetitionId::new(1), SeasonId::new(1), crate::Date::mock());
        let b = recalculate(&t, &matches, CompetitionId::new(1), SeasonId::new(1), crate::Date::mock());
        assert_eq!(a, b);
    }

    #[test]
    fn head_to_head_tiebreak_scenario() {
        let a = TeamId::new(1);
        let b = TeamId::new(2);
        let c = TeamId::new(3);
        let d = TeamId::new(4);
        let t = vec![a, b, c, d];
        let mut matches = Vec::new();
        // A vs B: A wins both 1-0
        matches.push(facts(1, 2, 1, 0));
        matches.push(facts(2, 1, 0, 1));
        // A vs C: A loses both 0-1
        matches.push(facts(1, 3, 0, 1));
        matches.push(facts(3, 1, 1, 0));
        // A vs D: draw 1-1 both
        matches.push(facts(1, 4, 1, 1));
        matches.push(facts(4, 1, 1, 1));
        // B vs C: draw 1-1 both
        matches.push(facts(2, 3, 1, 1));
        matches.push(facts(3, 2, 1, 1));
        // B vs D: B wins both 1-0
        matches.push(facts(2, 4, 1, 0));
        matches.push(facts(4, 2, 0, 1));
        // C vs D: draw 0-0 both
        matches.push(facts(3, 4, 0, 0));
        matches.push(facts(4, 3, 0, 0));

        let rows = recalculate(&t, &matches, CompetitionId::new(1), SeasonId::new(1), crate::Date::mock());
        let by_id = |id: TeamId| rows.iter().find(|r| r.team_id == id).unwrap().clone();
        assert_eq!(by_id(a).points, Points(8));
        assert_eq!(by_id(b).points, Points(8));
        assert_eq!(by_id(c).points, Points(10));
        assert_eq!(by_id(d).points, Points(4));

        let sorted = sort_standings(&rows, &matches);
        let order: Vec<TeamId> = sorted.iter().map(|r| r.team_id).collect();
        assert_eq!(order, vec![c, a, b, d]);
    }
}
