//! `GET /events/stream`: the event bus's server-sent-events gateway.
//!
//! Wire format is one `data: <json>\n\n` line per event, with a
//! `: keepalive\n\n` comment every 30 seconds of silence so intermediaries
//! don't time the connection out.
use crate::state::AppState;
use axum::extract::State;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::{Stream, StreamExt};
use tpe_db::events::Event;

#[derive(Serialize)]
struct WireEvent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    data: serde_json::Value,
    timestamp: String,
}

fn to_wire(event: Event) -> WireEvent<'static> {
    let now = tpe_core::Date::now().to_string();
    match event {
        Event::MatchConfirmed {
            match_id,
            competition_id,
            season_id,
            home_team_id,
            away_team_id,
            home_score,
            away_score,
        } => WireEvent {
            kind: "match_confirmed",
            data: serde_json::json!({
                "match_id": match_id,
                "competition_id": competition_id,
                "season_id": season_id,
                "home_team_id": home_team_id,
                "away_team_id": away_team_id,
                "home_score": home_score,
                "away_score": away_score,
            }),
            timestamp: now,
        },
        Event::StandingsUpdated { competition_id, season_id } => WireEvent {
            kind: "standings_updated",
            data: serde_json::json!({ "competition_id": competition_id, "season_id": season_id }),
            timestamp: now,
        },
        Event::BracketUpdated { competition_id, match_id, bracket_position } => WireEvent {
            kind: "bracket_updated",
            data: serde_json::json!({
                "competition_id": competition_id,
                "match_id": match_id,
                "bracket_position": bracket_position,
            }),
            timestamp: now,
        },
        Event::CompetitionComplete { competition_id, season_id } => WireEvent {
            kind: "competition_complete",
            data: serde_json::json!({ "competition_id": competition_id, "season_id": season_id }),
            timestamp: now,
        },
    }
}

pub async fn stream(State(state): State<AppState>) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = state.events.subscribe();
    let stream = tokio_stream::wrappers::ReceiverStream::new(rx).map(|event| {
        let wire = to_wire(event);
        let body = serde_json::to_string(&wire).unwrap_or_default();
        Ok(SseEvent::default().data(body))
    });
    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(30)).text("keepalive"))
}
