//! Standings calculator orchestration: loads the relevant matches,
//! calls `tpe_core::standings::recalculate`/`sort_standings`, and persists
//! the result. The pure arithmetic itself lives entirely in `tpe_core`.
use crate::{competition, match_, standing, DbError};
use sqlx::SqlitePool;
use tpe_core::ids::{CompetitionId, SeasonId};
use tpe_core::standing::Standing;
use tpe_core::Date;

/// Rebuilds every standings row for `(competition_id, season_id)` from the
/// CONFIRMED league/group matches on record. Called after every
/// confirmation and safe to call redundantly since recalculation is
/// idempotent.
pub async fn recalculate(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    now: Date,
) -> Result<Vec<Standing>, DbError> {
    let teams = competition::team_ids(pool, competition_id).await?;
    let filter = match_::MatchFilter::for_competition(competition_id, season_id)
        .with_status(tpe_core::fixture::MatchStatus::Confirmed);
    let matches = match_::fetch(pool, &filter).await?;
    let facts: Vec<_> = matches
        .iter()
        .filter(|m| m.counts_towards_standings())
        .filter_map(|m| m.as_facts())
        .collect();

    let rows = tpe_core::standings::recalculate(&teams, &facts, competition_id, season_id, now);

    let mut tx = pool.begin().await?;
    standing::replace_all(&mut tx, competition_id, season_id, &rows).await?;
    tx.commit().await?;
    Ok(rows)
}

/// The competition's table in display order: one overall ranking, or one
/// per distinct `group_name` if the competition is grouped.
pub async fn ranked_table(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
) -> Result<Vec<Standing>, DbError> {
    let rows = standing::fetch(pool, competition_id, season_id).await?;
    let filter = match_::MatchFilter::for_competition(competition_id, season_id)
        .with_status(tpe_core::fixture::MatchStatus::Confirmed);
    let matches = match_::fetch(pool, &filter).await?;
    let facts: Vec<_> = matches
        .iter()
        .filter(|m| m.counts_towards_standings())
        .filter_map(|m| m.as_facts())
        .collect();

    if rows.iter().any(|r| r.group_name.is_some()) {
        let mut groups: std::collections::BTreeMap<String, Vec<Standing>> = std::collections::BTreeMap::new();
        for row in rows {
            groups.entry(row.group_name.clone().unwrap_or_default()).or_default().push(row);
        }
        let mut out = Vec::new();
        for (_, group_rows) in groups {
            out.extend(tpe_core::standings::sort_standings(&group_rows, &facts));
        }
        Ok(out)
    } else {
        Ok(tpe_core::standings::sort_standings(&rows, &facts))
    }
}

/// One group's already-sorted table, by name. Feeds the qualification and
/// CL-knockout-field orchestration, which both need the
/// per-group ranking rather than the whole-competition table.
pub async fn ranked_group(
    pool: &SqlitePool,
    competition_id: CompetitionId,
    season_id: SeasonId,
    group_name: &str,
) -> Result<Vec<Standing>, DbError> {
    let rows = standing::fetch_group(pool, competition_id, season_id, group_name).await?;
    let filter = match_::MatchFilter::for_competition(competition_id, season_id)
        .with_status(tpe_core::fixture::MatchStatus::Confirmed)
        .with_group(group_name);
    let matches = match_::fetch(pool, &filter).await?;
    let facts: Vec<_> = matches.iter().filter_map(|m| m.as_facts()).collect();
    Ok(tpe_core::standings::sort_standings(&rows, &facts))
}
