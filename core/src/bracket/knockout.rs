//! Champions-league-style knockout bracket generation.
use crate::bracket::position::stage_for_position;
use crate::fixture::{Leg, NewMatch};
use crate::ids::{CompetitionId, SeasonId, TeamId};
use crate::Date;

/// Emits the Final (position 1), both semi-final placeholders (2, 3, two
/// legs each) and the four real quarter-final ties (4-7, two legs each)
/// seeded from `team_pairs`.
///
/// `team_pairs[0..4]` map onto bracket positions `4..8` in order.
pub fn cl_bracket(
    team_pairs: [(TeamId, TeamId); 4],
    start_date: Date,
    interval_days: i64,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Vec<NewMatch> {
    let mut matches = Vec::with_capacity(1 + 4 + 8);

    matches.push(placeholder(
        competition_id,
        season_id,
        1,
        None,
        Some(start_date.plus_days(4 * interval_days)),
    ));

    for (offset, position) in [2u32, 3].into_iter().enumerate() {
        let offset = offset as i64;
        matches.push(placeholder(
            competition_id,
            season_id,
            position,
            Some(Leg::First),
            Some(start_date.plus_days((2 + offset) * interval_days)),
        ));
        matches.push(placeholder(
            competition_id,
            season_id,
            position,
            Some(Leg::Second),
            Some(start_date.plus_days((3 + offset) * interval_days)),
        ));
    }

    for (i, &(team_a, team_b)) in team_pairs.iter().enumerate() {
        let position = 4 + i as u32;
        matches.push(leg_match(
            competition_id,
            season_id,
            position,
            Leg::First,
            team_a,
            team_b,
            start_date,
        ));
        matches.push(leg_match(
            competition_id,
            season_id,
            position,
            Leg::Second,
            team_b,
            team_a,
            start_date.plus_days(7),
        ));
    }

    matches
}

fn placeholder(
    competition_id: CompetitionId,
    season_id: SeasonId,
    position: u32,
    leg: Option<Leg>,
    match_date: Option<Date>,
) -> NewMatch {
    NewMatch {
        competition_id,
        season_id,
        home_team_id: None,
        away_team_id: None,
        match_date,
        matchday: None,
        stage: Some(stage_for_position(position)),
        group_name: None,
        leg,
        round_number: None,
        bracket_position: Some(position),
    }
}

fn leg_match(
    competition_id: CompetitionId,
    season_id: SeasonId,
    position: u32,
    leg: Leg,
    home: TeamId,
    away: TeamId,
    match_date: Date,
) -> NewMatch {
    NewMatch {
        competition_id,
        season_id,
        home_team_id: Some(home),
        away_team_id: Some(away),
        match_date: Some(match_date),
        matchday: None,
        stage: Some(stage_for_position(position)),
        group_name: None,
        leg: Some(leg),
        round_number: None,
        bracket_position: Some(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CompetitionId, SeasonId};

    #[test]
    fn emits_final_two_sf_legs_and_four_qf_ties() {
        let team_pairs = [
            (TeamId::new(1), TeamId::new(2)),
            (TeamId::new(3), TeamId::new(4)),
            (TeamId::new(5), TeamId::new(6)),
            (TeamId::new(7), TeamId::new(8)),
        ];
        let matches = cl_bracket(
            team_pairs,
            Date::mock(),
            14,
            CompetitionId::new(1),
            SeasonId::new(1),
        );
        assert_eq!(matches.len(), 1 + 4 + 8);

        let final_match = matches.iter().find(|m| m.bracket_position == Some(1)).unwrap();
        assert!(final_match.home_team_id.is_none());
        assert!(final_match.leg.is_none());

        let qf_position_4: Vec<_> = matches
            .iter()
            .filter(|m| m.bracket_position == Some(4))
            .collect();
        assert_eq!(qf_position_4.len(), 2);
        assert_eq!(qf_position_4[0].home_team_id, Some(TeamId::new(1)));
        assert_eq!(qf_position_4[0].away_team_id, Some(TeamId::new(2)));
        assert_eq!(qf_position_4[1].home_team_id, Some(TeamId::new(2)));
        assert_eq!(qf_position_4[1].away_team_id, Some(TeamId::new(1)));
    }
}
