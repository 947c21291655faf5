//! Round-Robin Scheduler (C3).
use crate::error::CoreError;
use crate::fixture::{NewMatch, Stage};
use crate::ids::{CompetitionId, SeasonId};
use crate::team::ScheduleTeam;
use crate::Date;

/// One round of the circle-method rotation: a perfect matching over the
/// (possibly bye-padded) team list, in position order.
type Round = Vec<(Option<ScheduleTeam>, Option<ScheduleTeam>)>;

/// Produces a full double round-robin for `teams`.
///
/// `teams.len()` must be >= 2. Odd counts are padded internally with a bye
/// placeholder; the caller never sees bye fixtures.
pub fn generate(
    teams: &[ScheduleTeam],
    start_date: Date,
    interval_days: i64,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<Vec<NewMatch>, CoreError> {
    let n = teams.len();
    if n < 2 {
        return Err(CoreError::invariant(
            "round-robin scheduling requires at least 2 teams",
        ));
    }

    let mut rounds = circle_method_rounds(teams);
    // Descending travel-cost score, stable so same-cost rounds keep their
    // rotation order.
    rounds.sort_by_key(|round| std::cmp::Reverse(same_county_pairings(round)));

    let num_rounds = rounds.len() as u32;
    let mut matches = Vec::new();

    // Pass A: original (home, away) at matchdays 1..num_rounds.
    for (i, round) in rounds.iter().enumerate() {
        let matchday = i as u32 + 1;
        let match_date = start_date.plus_days((matchday as i64 - 1) * interval_days);
        for (home, away) in round {
            if let (Some(home), Some(away)) = (home, away) {
                matches.push(new_league_match(
                    competition_id,
                    season_id,
                    home.id,
                    away.id,
                    match_date,
                    matchday,
                ));
            }
        }
    }
    // Pass B: same rounds, home/away swapped, matchdays num_rounds+1..2*num_rounds.
    for (i, round) in rounds.iter().enumerate() {
        let matchday = num_rounds + i as u32 + 1;
        let match_date = start_date.plus_days((matchday as i64 - 1) * interval_days);
        for (home, away) in round {
            if let (Some(home), Some(away)) = (home, away) {
                matches.push(new_league_match(
                    competition_id,
                    season_id,
                    away.id,
                    home.id,
                    match_date,
                    matchday,
                ));
            }
        }
    }

    for m in &matches {
        m.validate()?;
    }
    Ok(matches)
}

fn new_league_match(
    competition_id: CompetitionId,
    season_id: SeasonId,
    home: crate::ids::TeamId,
    away: crate::ids::TeamId,
    match_date: Date,
    matchday: u32,
) -> NewMatch {
    NewMatch {
        competition_id,
        season_id,
        home_team_id: Some(home),
        away_team_id: Some(away),
        match_date: Some(match_date),
        matchday: Some(matchday),
        stage: Some(Stage::League),
        group_name: None,
        leg: None,
        round_number: None,
        bracket_position: None,
    }
}

fn circle_method_rounds(teams: &[ScheduleTeam]) -> Vec<Round> {
    let n = teams.len();
    let padded = n % 2 != 0;
    let size = if padded { n + 1 } else { n };

    let mut positions: Vec<Option<ScheduleTeam>> =
        teams.iter().map(|&t| Some(t)).collect();
    if padded {
        positions.push(None);
    }

    let num_rounds = size - 1;
    let mut rounds = Vec::with_capacity(num_rounds);
    for _ in 0..num_rounds {
        let mut pairs = Vec::with_capacity(size / 2);
        for i in 0..size / 2 {
            pairs.push((positions[i], positions[size - 1 - i]));
        }
        rounds.push(pairs);

        // Rotate all but the anchored position[0] one step.
        let last = positions.pop().expect("size >= 2");
        positions.insert(1, last);
    }
    rounds
}

fn same_county_pairings(round: &Round) -> usize {
    round
        .iter()
        .filter(|(home, away)| match (home, away) {
            (Some(h), Some(a)) => h.county_id == a.county_id,
            _ => false,
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CountyId, RegionId, TeamId};

    fn team(id: i64, county: i64) -> ScheduleTeam {
        ScheduleTeam {
            id: TeamId::new(id),
            county_id: CountyId::new(county),
            region_id: RegionId::new(1),
        }
    }

    #[test]
    fn even_team_count_total_matches() {
        let teams = vec![team(1, 1), team(2, 2), team(3, 3), team(4, 4)];
        let n = teams.len() as u32;
        let matches = generate(
            &teams,
            Date::mock(),
            7,
            CompetitionId::new(1),
            SeasonId::new(1),
        )
        .unwrap();
        assert_eq!(matches.len() as u32, n * (n - 1));

        let mut home_count = std::collections::HashMap::new();
        let mut away_count = std::collections::HashMap::new();
        let mut seen_pairs = std::collections::HashSet::new();
        for m in &matches {
            *home_count.entry(m.home_team_id.unwrap()).or_insert(0u32) += 1;
            *away_count.entry(m.away_team_id.unwrap()).or_insert(0u32) += 1;
            assert!(seen_pairs.insert((m.home_team_id, m.away_team_id)));
        }
        for t in &teams {
            assert_eq!(home_count[&t.id], n - 1);
            assert_eq!(away_count[&t.id], n - 1);
        }
    }

    #[test]
    fn odd_team_count_drops_byes_but_keeps_pair_count() {
        let teams = vec![team(1, 1), team(2, 2), team(3, 3)];
        let n = teams.len() as u32;
        let matches = generate(
            &teams,
            Date::mock(),
            7,
            CompetitionId::new(1),
            SeasonId::new(1),
        )
        .unwrap();
        assert_eq!(matches.len() as u32, n * (n - 1));
    }

    #[test]
    fn rejects_single_team() {
        let teams = vec![team(1, 1)];
        assert!(generate(&teams, Date::mock(), 7, CompetitionId::new(1), SeasonId::new(1)).is_err());
    }
}
