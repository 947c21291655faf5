//! Single-elimination cup draw with byes.
use crate::bracket::position::{depth_of, next_power_of_two, parent_of, stage_for_position, Slot};
use crate::error::CoreError;
use crate::fixture::{NewMatch, Stage};
use crate::ids::{CompetitionId, SeasonId, TeamId};
use crate::Date;
use rand::seq::SliceRandom;
use rand::RngCore;

#[derive(Debug, Clone)]
pub struct CupDraw {
    pub matches: Vec<NewMatch>,
}

/// Builds every inner placeholder and first-round match for a single
/// elimination cup over `teams`.
pub fn draw(
    teams: &[TeamId],
    start_date: Date,
    interval_days: i64,
    competition_id: CompetitionId,
    season_id: SeasonId,
    rng: &mut impl RngCore,
) -> Result<CupDraw, CoreError> {
    let n = teams.len();
    if n < 2 {
        return Err(CoreError::invariant("a cup draw requires at least 2 teams"));
    }

    let bracket_size = next_power_of_two(n);
    let num_byes = bracket_size - n;
    let num_rounds = bracket_size.trailing_zeros();
    let leaf_start = (bracket_size / 2) as u32;

    let mut matches = Vec::with_capacity(leaf_start as usize - 1 + (bracket_size / 2 - num_byes));
    for position in 1..leaf_start {
        matches.push(placeholder(
            competition_id,
            season_id,
            position,
            num_rounds,
            start_date,
            interval_days,
        ));
    }

    let mut shuffled = teams.to_vec();
    shuffled.shuffle(rng);
    let (bye_teams, rest) = shuffled.split_at(num_byes);

    for (k, &team) in bye_teams.iter().enumerate() {
        let leaf_position = leaf_start + k as u32;
        let (parent, slot) = parent_of(leaf_position)
            .expect("every leaf position has a parent by construction");
        fill_slot(&mut matches, parent, slot, team)?;
    }

    for (k, pair) in rest.chunks(2).enumerate() {
        let leaf_position = leaf_start + num_byes as u32 + k as u32;
        let (home, away) = (pair[0], pair[1]);
        matches.push(NewMatch {
            competition_id,
            season_id,
            home_team_id: Some(home),
            away_team_id: Some(away),
            match_date: Some(start_date),
            matchday: None,
            stage: Some(Stage::Round1),
            group_name: None,
            leg: None,
            round_number: Some(num_rounds - depth_of(leaf_position)),
            bracket_position: Some(leaf_position),
        });
    }

    for m in &matches {
        m.validate()?;
    }

    Ok(CupDraw { matches })
}

fn placeholder(
    competition_id: CompetitionId,
    season_id: SeasonId,
    position: u32,
    num_rounds: u32,
    start_date: Date,
    interval_days: i64,
) -> NewMatch {
    let depth = depth_of(position);
    NewMatch {
        competition_id,
        season_id,
        home_team_id: None,
        away_team_id: None,
        match_date: Some(start_date.plus_days((num_rounds - depth) as i64 * interval_days)),
        matchday: None,
        stage: Some(stage_for_position(position)),
        group_name: None,
        leg: None,
        round_number: Some(num_rounds - depth),
        bracket_position: Some(position),
    }
}

fn fill_slot(
    matches: &mut [NewMatch],
    parent_position: u32,
    slot: Slot,
    team: TeamId,
) -> Result<(), CoreError> {
    let parent = matches
        .iter_mut()
        .find(|m| m.bracket_position == Some(parent_position))
        .ok_or_else(|| CoreError::DrawFailure(format!("no placeholder at position {}", parent_position)))?;
    match slot {
        Slot::Home => parent.home_team_id = Some(team),
        Slot::Away => parent.away_team_id = Some(team),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn teams(n: usize) -> Vec<TeamId> {
        (1..=n as i64).map(TeamId::new).collect()
    }

    #[test]
    fn forty_eight_teams_scenario() {
        let ts = teams(48);
        let mut rng = StdRng::seed_from_u64(7);
        let draw_result = draw(
            &ts,
            Date::mock(),
            7,
            CompetitionId::new(1),
            SeasonId::new(1),
            &mut rng,
        )
        .unwrap();
        assert_eq!(draw_result.matches.len(), 47);
        let bye_filled_slots: usize = draw_result
            .matches
            .iter()
            .filter(|m| m.bracket_position.map(|p| p < 32).unwrap_or(false))
            .map(|m| m.home_team_id.is_some() as usize + m.away_team_id.is_some() as usize)
            .sum();
        assert_eq!(bye_filled_slots, 16);
        let real_r1 = draw_result
            .matches
            .iter()
            .filter(|m| matches!(m.stage, Some(Stage::Round1)) && m.home_team_id.is_some())
            .count();
        assert_eq!(real_r1, 16);
    }

    #[test]
    fn power_of_two_team_count_has_no_byes() {
        let ts = teams(8);
        let mut rng = StdRng::seed_from_u64(3);
        let draw_result = draw(
            &ts,
            Date::mock(),
            7,
            CompetitionId::new(1),
            SeasonId::new(1),
            &mut rng,
        )
        .unwrap();
        // 3 inner placeholders + 4 real R1 matches, none pre-filled.
        assert_eq!(draw_result.matches.len(), 7);
        for m in &draw_result.matches {
            if m.bracket_position.unwrap() < 4 {
                assert!(m.home_team_id.is_none() && m.away_team_id.is_none());
            } else {
                assert!(m.home_team_id.is_some() && m.away_team_id.is_some());
            }
        }
    }
}
