//! Match — the single scheduled/playable fixture entity.
//!
//! A [`Match`] is a flat struct mutated in place through its lifecycle
//! rather than re-constructed; one type serves league, group and
//! bracket play alike.
use crate::error::CoreError;
use crate::game::{GoalCount, GoalDiff};
use crate::ids::{CompetitionId, MatchId, SeasonId, TeamId, UserId};
use crate::Date;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Stage {
    League,
    Group,
    Round1,
    Round2,
    Round3,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
    Super,
}

impl Stage {
    /// Stages excluded from standings recomputation.
    pub fn is_knockout(&self) -> bool {
        !matches!(self, Stage::League | Stage::Group)
    }

    /// Stages whose completeness drives a `competition_complete` event.
    /// Knockout stages may leave an unresolved tie behind forever, so they
    /// never gate this signal.
    pub fn is_league_or_group(&self) -> bool {
        matches!(self, Stage::League | Stage::Group)
    }

    /// Maps a bracket depth (0 = final) to its stage. Any depth beyond what's
    /// named collapses to `Round1`.
    pub fn from_bracket_depth(depth: u32) -> Self {
        match depth {
            0 => Stage::Final,
            1 => Stage::SemiFinal,
            2 => Stage::QuarterFinal,
            3 => Stage::RoundOf16,
            4 => Stage::Round3,
            5 => Stage::Round2,
            _ => Stage::Round1,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    Scheduled,
    Completed,
    Confirmed,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Leg {
    First,
    Second,
}

/// A match, including not-yet-known bracket participants (`home_team_id`/
/// `away_team_id` both `None`) for placeholder slots.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub competition_id: CompetitionId,
    pub season_id: SeasonId,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub home_score: Option<GoalCount>,
    pub away_score: Option<GoalCount>,
    pub match_date: Option<Date>,
    pub venue: Option<String>,
    pub status: MatchStatus,
    pub submitted_by_id: Option<UserId>,
    pub confirmed_by_id: Option<UserId>,
    pub matchday: Option<u32>,
    pub stage: Option<Stage>,
    pub group_name: Option<String>,
    pub leg: Option<Leg>,
    pub round_number: Option<u32>,
    pub bracket_position: Option<u32>,
    pub penalty_winner_id: Option<TeamId>,
}

impl Match {
    pub fn goal_diff(&self) -> Option<(GoalDiff, GoalDiff)> {
        let home = self.home_score?;
        let away = self.away_score?;
        Some((home - away, away - home))
    }

    /// Minimal read-only projection consumed by [`crate::standings`]. Only
    /// CONFIRMED matches with a standings-relevant stage should ever be
    /// turned into one of these.
    pub fn as_facts(&self) -> Option<crate::standings::MatchFacts> {
        let home_team_id = self.home_team_id?;
        let away_team_id = self.away_team_id?;
        let home_score = self.home_score?;
        let away_score = self.away_score?;
        Some(crate::standings::MatchFacts {
            home_team_id,
            away_team_id,
            home_score,
            away_score,
            group_name: self.group_name.clone(),
        })
    }

    /// Is this fixture eligible for standings recomputation?
    pub fn counts_towards_standings(&self) -> bool {
        self.status == MatchStatus::Confirmed
            && matches!(self.stage, None | Some(Stage::League) | Some(Stage::Group))
    }
}

/// A freshly scheduled fixture, not yet assigned a database id. Produced by
/// every generator in [`crate::scheduler`] and [`crate::bracket`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub competition_id: CompetitionId,
    pub season_id: SeasonId,
    pub home_team_id: Option<TeamId>,
    pub away_team_id: Option<TeamId>,
    pub match_date: Option<Date>,
    pub matchday: Option<u32>,
    pub stage: Option<Stage>,
    pub group_name: Option<String>,
    pub leg: Option<Leg>,
    pub round_number: Option<u32>,
    pub bracket_position: Option<u32>,
}

impl NewMatch {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let (Some(h), Some(a)) = (self.home_team_id, self.away_team_id) {
            if h == a {
                return Err(CoreError::validation(
                    "a match cannot pair a team against itself",
                ));
            }
        }
        Ok(())
    }
}
