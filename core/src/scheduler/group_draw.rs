//! Group draw engine: 7 regions of 3 teams into 7 groups of 3.
use crate::error::CoreError;
use crate::fixture::{NewMatch, Stage};
use crate::ids::{CompetitionId, RegionId, SeasonId, TeamId};
use crate::team::ScheduleTeam;
use crate::Date;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashMap;

pub const NUM_GROUPS: usize = 7;
pub const TEAMS_PER_REGION: usize = 3;

/// The six-fixture rotation, indexed by within-group slot (0="A",
/// 1="B", 2="C") and matchday.
const ROTATION: [(usize, usize, u32); 6] = [(0, 1, 1), (2, 0, 2), (1, 2, 3), (1, 0, 4), (0, 2, 5), (2, 1, 6)];

#[derive(Debug, Clone)]
pub struct GroupDraw {
    /// `(team_id, group_name)` for every drawn team, used to create zeroed
    /// Standing rows.
    pub assignments: Vec<(TeamId, String)>,
    pub matches: Vec<NewMatch>,
}

/// Draws 21 teams from exactly 7 regions of 3 into 7 groups of 3, then
/// emits the six-match fixture list for each group.
pub fn draw(
    teams: &[ScheduleTeam],
    start_date: Date,
    interval_days: i64,
    competition_id: CompetitionId,
    season_id: SeasonId,
    rng: &mut impl RngCore,
) -> Result<GroupDraw, CoreError> {
    let mut by_region: HashMap<RegionId, Vec<ScheduleTeam>> = HashMap::new();
    for &t in teams {
        by_region.entry(t.region_id).or_default().push(t);
    }
    if by_region.len() != NUM_GROUPS {
        return Err(CoreError::invariant(format!(
            "group draw requires exactly {} regions, got {}",
            NUM_GROUPS,
            by_region.len()
        )));
    }
    for (region_id, region_teams) in &by_region {
        if region_teams.len() != TEAMS_PER_REGION {
            return Err(CoreError::invariant(format!(
                "region {} must contribute exactly {} teams, got {}",
                region_id.get(),
                TEAMS_PER_REGION,
                region_teams.len()
            )));
        }
    }

    let mut region_ids: Vec<RegionId> = by_region.keys().copied().collect();
    region_ids.shuffle(rng);
    for region_teams in by_region.values_mut() {
        region_teams.shuffle(rng);
    }

    let mut slots: Vec<[Option<ScheduleTeam>; TEAMS_PER_REGION]> =
        vec![[None; TEAMS_PER_REGION]; NUM_GROUPS];
    let mut group_region: Vec<Vec<RegionId>> = vec![Vec::new(); NUM_GROUPS];

    for (i, region_id) in region_ids.iter().enumerate() {
        let region_teams = &by_region[region_id];
        for (j, &team) in region_teams.iter().enumerate() {
            let group_idx = (i + 2 * j) % NUM_GROUPS;
            slots[group_idx][j] = Some(team);
            group_region[group_idx].push(*region_id);
        }
    }

    // Verification pass: every slot filled, every group's three
    // regions distinct.
    for (g, slot) in slots.iter().enumerate() {
        if slot.iter().any(Option::is_none) {
            return Err(CoreError::DrawFailure(format!(
                "group {} left an unfilled slot",
                group_letter(g)
            )));
        }
        let regions = &group_region[g];
        let unique: std::collections::HashSet<_> = regions.iter().collect();
        if unique.len() != regions.len() {
            return Err(CoreError::DrawFailure(format!(
                "group {} contains two teams from the same region",
                group_letter(g)
            )));
        }
    }

    let mut assignments = Vec::with_capacity(teams.len());
    let mut matches = Vec::with_capacity(NUM_GROUPS * ROTATION.len());
    for (g, slot) in slots.iter().enumerate() {
        let group_name = group_letter(g);
        let members: [ScheduleTeam; TEAMS_PER_REGION] = [
            slot[0].expect("verified above"),
            slot[1].expect("verified above"),
            slot[2].expect("verified above"),
        ];
        for &member in &members {
            assignments.push((member.id, group_name.clone()));
        }
        for &(home_slot, away_slot, matchday) in ROTATION.iter() {
            let match_date = start_date.plus_days((matchday as i64 - 1) * interval_days);
            matches.push(NewMatch {
                competition_id,
                season_id,
                home_team_id: Some(members[home_slot].id),
                away_team_id: Some(members[away_slot].id),
                match_date: Some(match_date),
                matchday: Some(matchday),
                stage: Some(Stage::Group),
                group_name: Some(group_name.clone()),
                leg: None,
                round_number: None,
                bracket_position: None,
            });
        }
    }

    for m in &matches {
        m.validate()?;
    }

    Ok(GroupDraw {
        assignments,
        matches,
    })
}

fn group_letter(index: usize) -> String {
    char::from(b'A' + index as u8).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CountyId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_teams() -> Vec<ScheduleTeam> {
        let mut teams = Vec::new();
        let mut id = 1;
        for region in 0..NUM_GROUPS {
            for _ in 0..TEAMS_PER_REGION {
                teams.push(ScheduleTeam {
                    id: TeamId::new(id),
                    county_id: CountyId::new(id),
                    region_id: RegionId::new(region as i64),
                });
                id += 1;
            }
        }
        teams
    }

    #[test]
    fn every_group_has_three_distinct_regions() {
        let teams = make_teams();
        let mut rng = StdRng::seed_from_u64(42);
        let result = draw(
            &teams,
            Date::mock(),
            7,
            CompetitionId::new(1),
            SeasonId::new(1),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.assignments.len(), 21);
        assert_eq!(result.matches.len(), 42);

        let mut by_group: HashMap<String, Vec<TeamId>> = HashMap::new();
        for (team_id, group) in &result.assignments {
            by_group.entry(group.clone()).or_default().push(*team_id);
        }
        assert_eq!(by_group.len(), NUM_GROUPS);
        let region_of: HashMap<TeamId, RegionId> =
            teams.iter().map(|t| (t.id, t.region_id)).collect();
        for members in by_group.values() {
            assert_eq!(members.len(), TEAMS_PER_REGION);
            let regions: std::collections::HashSet<_> =
                members.iter().map(|id| region_of[id]).collect();
            assert_eq!(regions.len(), TEAMS_PER_REGION);
        }
    }

    #[test]
    fn rejects_wrong_region_count() {
        let mut teams = make_teams();
        teams.truncate(18); // only 6 regions remain fully stocked
        let mut rng = StdRng::seed_from_u64(1);
        assert!(draw(
            &teams,
            Date::mock(),
            7,
            CompetitionId::new(1),
            SeasonId::new(1),
            &mut rng
        )
        .is_err());
    }
}
