//! Standing — one team's derived league-table row.
use crate::game::{GoalCount, GoalDiff, NumGames};
use crate::ids::{CompetitionId, SeasonId, TeamId};
use serde::{Deserialize, Serialize};

/// Points awarded per win/draw, per the competition point scheme. Only a
/// 3/1/0 scheme is used anywhere in this crate, but the type keeps the
/// intent explicit at call sites rather than passing a bare integer.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sum,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Deserialize,
    Serialize,
)]
pub struct Points(pub u32);

impl num::Zero for Points {
    fn zero() -> Points {
        Points(0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Standing {
    pub team_id: TeamId,
    pub competition_id: CompetitionId,
    pub season_id: SeasonId,
    pub played: NumGames,
    pub won: NumGames,
    pub drawn: NumGames,
    pub lost: NumGames,
    pub goals_for: GoalCount,
    pub goals_against: GoalCount,
    pub goal_difference: GoalDiff,
    pub points: Points,
    pub group_name: Option<String>,
    pub updated_at: crate::Date,
}

impl Standing {
    pub fn zeroed(
        team_id: TeamId,
        competition_id: CompetitionId,
        season_id: SeasonId,
        group_name: Option<String>,
        updated_at: crate::Date,
    ) -> Self {
        Standing {
            team_id,
            competition_id,
            season_id,
            played: NumGames(0),
            won: NumGames(0),
            drawn: NumGames(0),
            lost: NumGames(0),
            goals_for: GoalCount::new(0).expect("zero is always a valid GoalCount"),
            goals_against: GoalCount::new(0).expect("zero is always a valid GoalCount"),
            goal_difference: GoalDiff(0),
            points: Points(0),
            group_name,
            updated_at,
        }
    }

    /// Checks the three arithmetic invariants for a well-formed standing row.
    pub fn invariants_hold(&self) -> bool {
        self.played == self.won + self.drawn + self.lost
            && self.goal_difference == self.goals_for - self.goals_against
            && self.points == Points(3 * self.won.0 + self.drawn.0)
    }
}
