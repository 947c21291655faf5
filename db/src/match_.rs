//! Match entity store: fixture persistence and the filtered reads
//! every orchestration module builds on.
use crate::models::{encode_date, encode_leg, encode_match_status, encode_stage, MatchRow};
use crate::DbError;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tpe_core::fixture::{Leg, Match, MatchStatus, NewMatch, Stage};
use tpe_core::ids::{CompetitionId, MatchId, SeasonId, TeamId};

/// Builds a dynamic `WHERE` clause over the one `matches` table, covering
/// every combination §4.1 names: (competition_id, season_id, team_id as
/// either home or away, status, stage, matchday, group_name,
/// bracket_position, leg, match_date day).
#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub competition_id: Option<CompetitionId>,
    pub season_id: Option<SeasonId>,
    pub stage: Option<Stage>,
    pub status: Option<MatchStatus>,
    pub group_name: Option<String>,
    pub matchday: Option<u32>,
    pub bracket_position: Option<u32>,
    pub leg: Option<Leg>,
    /// Matches whose `team_id` took part, as either home or away.
    pub team_id: Option<TeamId>,
    /// Matches whose `match_date` falls on this calendar day (`YYYY-MM-DD`).
    pub match_date_day: Option<String>,
    pub bracket_only: bool,
}

impl MatchFilter {
    pub fn for_competition(competition_id: CompetitionId, season_id: SeasonId) -> Self {
        MatchFilter {
            competition_id: Some(competition_id),
            season_id: Some(season_id),
            ..Default::default()
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_status(mut self, status: MatchStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_group(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    pub fn with_matchday(mut self, matchday: u32) -> Self {
        self.matchday = Some(matchday);
        self
    }

    pub fn with_bracket_position(mut self, bracket_position: u32) -> Self {
        self.bracket_position = Some(bracket_position);
        self
    }

    pub fn with_leg(mut self, leg: Leg) -> Self {
        self.leg = Some(leg);
        self
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_match_date_day(mut self, day: impl Into<String>) -> Self {
        self.match_date_day = Some(day.into());
        self
    }

    pub fn bracket_only(mut self) -> Self {
        self.bracket_only = true;
        self
    }
}

const SELECT_COLS: &str = "id, competition_id, season_id, home_team_id, away_team_id, home_score, \
    away_score, match_date, venue, status, submitted_by_id, confirmed_by_id, matchday, stage, \
    group_name, leg, round_number, bracket_position, penalty_winner_id";

pub async fn fetch(pool: &SqlitePool, filter: &MatchFilter) -> Result<Vec<Match>, DbError> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!("SELECT {} FROM matches", SELECT_COLS));
    let mut first = true;
    macro_rules! clause {
        () => {{
            qb.push(if first { " WHERE " } else { " AND " });
            first = false;
        }};
    }
    if let Some(id) = filter.competition_id {
        clause!();
        qb.push("competition_id = ").push_bind(id.get());
    }
    if let Some(id) = filter.season_id {
        clause!();
        qb.push("season_id = ").push_bind(id.get());
    }
    if let Some(stage) = filter.stage {
        clause!();
        qb.push("stage = ").push_bind(encode_stage(stage));
    }
    if let Some(status) = filter.status {
        clause!();
        qb.push("status = ").push_bind(encode_match_status(status));
    }
    if let Some(group_name) = &filter.group_name {
        clause!();
        qb.push("group_name = ").push_bind(group_name.clone());
    }
    if let Some(matchday) = filter.matchday {
        clause!();
        qb.push("matchday = ").push_bind(matchday as i64);
    }
    if let Some(bracket_position) = filter.bracket_position {
        clause!();
        qb.push("bracket_position = ").push_bind(bracket_position as i64);
    }
    if let Some(leg) = filter.leg {
        clause!();
        qb.push("leg = ").push_bind(encode_leg(leg));
    }
    if let Some(team_id) = filter.team_id {
        clause!();
        qb.push("(home_team_id = ").push_bind(team_id.get()).push(" OR away_team_id = ").push_bind(team_id.get()).push(")");
    }
    if let Some(day) = &filter.match_date_day {
        clause!();
        qb.push("date(match_date) = ").push_bind(day.clone());
    }
    if filter.bracket_only {
        clause!();
        qb.push("bracket_position IS NOT NULL");
    }
    qb.push(" ORDER BY id");

    let rows: Vec<MatchRow> = qb.build_query_as().fetch_all(pool).await?;
    rows.into_iter().map(Match::try_from).collect()
}

pub async fn get(pool: &SqlitePool, id: MatchId) -> Result<Match, DbError> {
    let row: MatchRow = sqlx::query_as(&format!("SELECT {} FROM matches WHERE id = ?", SELECT_COLS))
        .bind(id.get())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::Core(tpe_core::error::CoreError::not_found(format!("match {}", id))))?;
    Match::try_from(row)
}

pub async fn get_by_bracket_position(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    bracket_position: u32,
) -> Result<Match, DbError> {
    let row: MatchRow = sqlx::query_as(&format!(
        "SELECT {} FROM matches WHERE competition_id = ? AND season_id = ? AND bracket_position = ?",
        SELECT_COLS
    ))
    .bind(competition_id.get())
    .bind(season_id.get())
    .bind(bracket_position as i64)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
        DbError::Core(tpe_core::error::CoreError::not_found(format!(
            "match at bracket position {}",
            bracket_position
        )))
    })?;
    Match::try_from(row)
}

/// Inserts every fixture a scheduler/bracket generator produced, inside the
/// caller's transaction (draws are all-or-nothing writes).
pub async fn insert_many(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    matches: &[NewMatch],
) -> Result<Vec<MatchId>, DbError> {
    let mut ids = Vec::with_capacity(matches.len());
    for m in matches {
        let id = sqlx::query(
            "INSERT INTO matches
            (competition_id, season_id, home_team_id, away_team_id, match_date, matchday,
             stage, group_name, leg, round_number, bracket_position, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'SCHEDULED')",
        )
        .bind(m.competition_id.get())
        .bind(m.season_id.get())
        .bind(m.home_team_id.map(|t| t.get()))
        .bind(m.away_team_id.map(|t| t.get()))
        .bind(m.match_date.map(encode_date))
        .bind(m.matchday.map(|v| v as i64))
        .bind(m.stage.map(encode_stage))
        .bind(m.group_name.clone())
        .bind(m.leg.map(encode_leg))
        .bind(m.round_number.map(|v| v as i64))
        .bind(m.bracket_position.map(|v| v as i64))
        .execute(&mut **tx)
        .await?
        .last_insert_rowid();
        ids.push(MatchId::new(id));
    }
    Ok(ids)
}

pub async fn delete_by_competition(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<(), DbError> {
    sqlx::query("DELETE FROM matches WHERE competition_id = ? AND season_id = ?")
        .bind(competition_id.get())
        .bind(season_id.get())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn any_confirmed(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<bool, DbError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM matches WHERE competition_id = ? AND season_id = ? AND status = 'CONFIRMED'",
    )
    .bind(competition_id.get())
    .bind(season_id.get())
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Result submission: records the score, moves the match to COMPLETED.
pub async fn submit_result(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    id: MatchId,
    home_score: u32,
    away_score: u32,
    submitted_by_id: tpe_core::ids::UserId,
) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE matches SET home_score = ?, away_score = ?, status = 'COMPLETED', submitted_by_id = ?
         WHERE id = ?",
    )
    .bind(home_score as i64)
    .bind(away_score as i64)
    .bind(submitted_by_id.get())
    .bind(id.get())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Result confirmation: moves COMPLETED to CONFIRMED, optionally recording a
/// penalty winner for a drawn knockout leg.
pub async fn confirm_result(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    id: MatchId,
    confirmed_by_id: tpe_core::ids::UserId,
    penalty_winner_id: Option<tpe_core::ids::TeamId>,
) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE matches SET status = 'CONFIRMED', confirmed_by_id = ?, penalty_winner_id = ?
         WHERE id = ?",
    )
    .bind(confirmed_by_id.get())
    .bind(penalty_winner_id.map(|t| t.get()))
    .bind(id.get())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Writes the resolved winner into the parent bracket slot: either
/// `home_team_id` or `away_team_id` of the placeholder at `parent_position`.
pub async fn fill_bracket_slot(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    competition_id: CompetitionId,
    season_id: SeasonId,
    parent_position: u32,
    slot: tpe_core::bracket::position::Slot,
    team_id: tpe_core::ids::TeamId,
) -> Result<(), DbError> {
    let column = match slot {
        tpe_core::bracket::position::Slot::Home => "home_team_id",
        tpe_core::bracket::position::Slot::Away => "away_team_id",
    };
    let sql = format!(
        "UPDATE matches SET {} = ? WHERE competition_id = ? AND season_id = ? AND bracket_position = ?",
        column
    );
    sqlx::query(&sql)
        .bind(team_id.get())
        .bind(competition_id.get())
        .bind(season_id.get())
        .bind(parent_position as i64)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
