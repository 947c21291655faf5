//! Database row shapes and their conversions to/from `tpe_core` domain
//! types. Mirrors the `From`/`TryFrom`-with-explicit-cast pattern the
//! sqlx-backed predecessor of this crate used for its `Team`/`Game` rows,
//! generalized to every entity of the data model.
use crate::DbError;
use chrono::{DateTime, FixedOffset};
use sqlx::FromRow;
use tpe_core::competition::{Competition, CompetitionType};
use tpe_core::county::{County, CountyCode};
use tpe_core::fixture::{Leg, Match, MatchStatus, Stage};
use tpe_core::game::{GoalCount, GoalDiff, NumGames};
use tpe_core::ids::{CompetitionId, CountyId, MatchId, RegionId, SeasonId, TeamId, UserId};
use tpe_core::region::{Region, RegionCode};
use tpe_core::season::{Season, SeasonYear};
use tpe_core::standing::{Points, Standing};
use tpe_core::team::{Team, TeamCategory, TeamStatus};
use tpe_core::Date;

pub fn encode_date(date: Date) -> String {
    date.inner().to_rfc3339()
}

pub fn decode_date(raw: &str) -> Result<Date, DbError> {
    DateTime::<FixedOffset>::parse_from_rfc3339(raw)
        .map(Date::new)
        .map_err(|e| DbError::Decode(format!("bad date {:?}: {}", raw, e)))
}

fn decode_category(raw: &str) -> Result<TeamCategory, DbError> {
    match raw {
        "MEN" => Ok(TeamCategory::Men),
        "WOMEN" => Ok(TeamCategory::Women),
        other => Err(DbError::Decode(format!("unknown category {:?}", other))),
    }
}

pub fn encode_category(category: TeamCategory) -> &'static str {
    match category {
        TeamCategory::Men => "MEN",
        TeamCategory::Women => "WOMEN",
    }
}

fn decode_team_status(raw: &str) -> Result<TeamStatus, DbError> {
    match raw {
        "PENDING" => Ok(TeamStatus::Pending),
        "ACTIVE" => Ok(TeamStatus::Active),
        "SUSPENDED" => Ok(TeamStatus::Suspended),
        other => Err(DbError::Decode(format!("unknown team status {:?}", other))),
    }
}

pub fn encode_team_status(status: TeamStatus) -> &'static str {
    match status {
        TeamStatus::Pending => "PENDING",
        TeamStatus::Active => "ACTIVE",
        TeamStatus::Suspended => "SUSPENDED",
    }
}

fn decode_competition_type(raw: &str) -> Result<CompetitionType, DbError> {
    match raw {
        "REGIONAL" => Ok(CompetitionType::Regional),
        "NATIONAL" => Ok(CompetitionType::National),
        "CUP" => Ok(CompetitionType::Cup),
        "SUPER" => Ok(CompetitionType::Super),
        "COUNTY" => Ok(CompetitionType::County),
        other => Err(DbError::Decode(format!("unknown competition kind {:?}", other))),
    }
}

pub fn encode_competition_type(kind: CompetitionType) -> &'static str {
    match kind {
        CompetitionType::Regional => "REGIONAL",
        CompetitionType::National => "NATIONAL",
        CompetitionType::Cup => "CUP",
        CompetitionType::Super => "SUPER",
        CompetitionType::County => "COUNTY",
    }
}

pub fn encode_stage(stage: Stage) -> &'static str {
    match stage {
        Stage::League => "LEAGUE",
        Stage::Group => "GROUP",
        Stage::Round1 => "ROUND_1",
        Stage::Round2 => "ROUND_2",
        Stage::Round3 => "ROUND_3",
        Stage::RoundOf16 => "ROUND_OF_16",
        Stage::QuarterFinal => "QUARTER_FINAL",
        Stage::SemiFinal => "SEMI_FINAL",
        Stage::Final => "FINAL",
        Stage::Super => "SUPER",
    }
}

fn decode_stage(raw: &str) -> Result<Stage, DbError> {
    match raw {
        "LEAGUE" => Ok(Stage::League),
        "GROUP" => Ok(Stage::Group),
        "ROUND_1" => Ok(Stage::Round1),
        "ROUND_2" => Ok(Stage::Round2),
        "ROUND_3" => Ok(Stage::Round3),
        "ROUND_OF_16" => Ok(Stage::RoundOf16),
        "QUARTER_FINAL" => Ok(Stage::QuarterFinal),
        "SEMI_FINAL" => Ok(Stage::SemiFinal),
        "FINAL" => Ok(Stage::Final),
        "SUPER" => Ok(Stage::Super),
        other => Err(DbError::Decode(format!("unknown stage {:?}", other))),
    }
}

pub fn encode_match_status(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Scheduled => "SCHEDULED",
        MatchStatus::Completed => "COMPLETED",
        MatchStatus::Confirmed => "CONFIRMED",
    }
}

fn decode_match_status(raw: &str) -> Result<MatchStatus, DbError> {
    match raw {
        "SCHEDULED" => Ok(MatchStatus::Scheduled),
        "COMPLETED" => Ok(MatchStatus::Completed),
        "CONFIRMED" => Ok(MatchStatus::Confirmed),
        other => Err(DbError::Decode(format!("unknown match status {:?}", other))),
    }
}

pub fn encode_leg(leg: Leg) -> &'static str {
    match leg {
        Leg::First => "FIRST",
        Leg::Second => "SECOND",
    }
}

fn decode_leg(raw: &str) -> Result<Leg, DbError> {
    match raw {
        "FIRST" => Ok(Leg::First),
        "SECOND" => Ok(Leg::Second),
        other => Err(DbError::Decode(format!("unknown leg {:?}", other))),
    }
}

fn decode_goal_count(raw: i64) -> Result<GoalCount, DbError> {
    let raw = u32::try_from(raw).map_err(|_| DbError::Decode(format!("negative goal count {}", raw)))?;
    GoalCount::new(raw).map_err(|e| DbError::Decode(e.to_string()))
}

#[derive(Debug, FromRow)]
pub struct RegionRow {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub created_at: String,
}

impl TryFrom<RegionRow> for Region {
    type Error = DbError;
    fn try_from(row: RegionRow) -> Result<Self, Self::Error> {
        Ok(Region::new(
            RegionId::new(row.id),
            row.name,
            RegionCode::try_new(row.code).map_err(|e| DbError::Decode(e.to_string()))?,
            decode_date(&row.created_at)?,
        ))
    }
}

#[derive(Debug, FromRow)]
pub struct CountyRow {
    pub id: i64,
    pub name: String,
    pub code: i64,
    pub region_id: i64,
    pub created_at: String,
}

impl TryFrom<CountyRow> for County {
    type Error = DbError;
    fn try_from(row: CountyRow) -> Result<Self, Self::Error> {
        Ok(County::new(
            CountyId::new(row.id),
            row.name,
            CountyCode::from(row.code),
            RegionId::new(row.region_id),
            decode_date(&row.created_at)?,
        ))
    }
}

#[derive(Debug, FromRow)]
pub struct SeasonRow {
    pub id: i64,
    pub name: String,
    pub year: i64,
    pub is_active: bool,
    pub created_at: String,
}

impl TryFrom<SeasonRow> for Season {
    type Error = DbError;
    fn try_from(row: SeasonRow) -> Result<Self, Self::Error> {
        Ok(Season::new(
            SeasonId::new(row.id),
            row.name,
            SeasonYear::try_new(row.year as i32).map_err(|e| DbError::Decode(e.to_string()))?,
            row.is_active,
            decode_date(&row.created_at)?,
        ))
    }
}

#[derive(Debug, FromRow)]
pub struct TeamRow {
    pub id: i64,
    pub name: String,
    pub county_id: i64,
    pub region_id: i64,
    pub category: String,
    pub status: String,
}

impl TryFrom<TeamRow> for Team {
    type Error = DbError;
    fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
        let region_id = RegionId::new(row.region_id);
        Team::try_new(
            TeamId::new(row.id),
            row.name,
            CountyId::new(row.county_id),
            region_id,
            region_id,
            decode_category(&row.category)?,
            decode_team_status(&row.status)?,
        )
        .map_err(|e| DbError::Decode(e.to_string()))
    }
}

#[derive(Debug, FromRow)]
pub struct CompetitionRow {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub category: String,
    pub season_id: i64,
    pub region_id: Option<i64>,
    pub county_id: Option<i64>,
}

impl TryFrom<CompetitionRow> for Competition {
    type Error = DbError;
    fn try_from(row: CompetitionRow) -> Result<Self, Self::Error> {
        Competition::try_new(
            CompetitionId::new(row.id),
            row.name,
            decode_competition_type(&row.kind)?,
            decode_category(&row.category)?,
            SeasonId::new(row.season_id),
            row.region_id.map(RegionId::new),
            row.county_id.map(CountyId::new),
        )
        .map_err(|e| DbError::Decode(e.to_string()))
    }
}

#[derive(Debug, FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub competition_id: i64,
    pub season_id: i64,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub match_date: Option<String>,
    pub venue: Option<String>,
    pub status: String,
    pub submitted_by_id: Option<i64>,
    pub confirmed_by_id: Option<i64>,
    pub matchday: Option<i64>,
    pub stage: Option<String>,
    pub group_name: Option<String>,
    pub leg: Option<String>,
    pub round_number: Option<i64>,
    pub bracket_position: Option<i64>,
    pub penalty_winner_id: Option<i64>,
}

impl TryFrom<MatchRow> for Match {
    type Error = DbError;
    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        let home_score = row.home_score.map(decode_goal_count).transpose()?;
        let away_score = row.away_score.map(decode_goal_count).transpose()?;
        Ok(Match {
            id: MatchId::new(row.id),
            competition_id: CompetitionId::new(row.competition_id),
            season_id: SeasonId::new(row.season_id),
            home_team_id: row.home_team_id.map(TeamId::new),
            away_team_id: row.away_team_id.map(TeamId::new),
            home_score,
            away_score,
            match_date: row.match_date.as_deref().map(decode_date).transpose()?,
            venue: row.venue,
            status: decode_match_status(&row.status)?,
            submitted_by_id: row.submitted_by_id.map(UserId::new),
            confirmed_by_id: row.confirmed_by_id.map(UserId::new),
            matchday: row.matchday.map(|v| v as u32),
            stage: row.stage.as_deref().map(decode_stage).transpose()?,
            group_name: row.group_name,
            leg: row.leg.as_deref().map(decode_leg).transpose()?,
            round_number: row.round_number.map(|v| v as u32),
            bracket_position: row.bracket_position.map(|v| v as u32),
            penalty_winner_id: row.penalty_winner_id.map(TeamId::new),
        })
    }
}

#[derive(Debug, FromRow)]
pub struct StandingRow {
    pub team_id: i64,
    pub competition_id: i64,
    pub season_id: i64,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
    pub group_name: Option<String>,
    pub updated_at: String,
}

impl TryFrom<StandingRow> for Standing {
    type Error = DbError;
    fn try_from(row: StandingRow) -> Result<Self, Self::Error> {
        Ok(Standing {
            team_id: TeamId::new(row.team_id),
            competition_id: CompetitionId::new(row.competition_id),
            season_id: SeasonId::new(row.season_id),
            played: NumGames(row.played as u32),
            won: NumGames(row.won as u32),
            drawn: NumGames(row.drawn as u32),
            lost: NumGames(row.lost as u32),
            goals_for: decode_goal_count(row.goals_for)?,
            goals_against: decode_goal_count(row.goals_against)?,
            goal_difference: GoalDiff(row.goal_difference as i32),
            points: Points(row.points as u32),
            group_name: row.group_name,
            updated_at: decode_date(&row.updated_at)?,
        })
    }
}
