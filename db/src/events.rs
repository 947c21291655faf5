//! In-process pub/sub event bus.
use std::sync::Mutex;
use tokio::sync::mpsc;
use tpe_core::ids::{CompetitionId, MatchId, SeasonId, TeamId};

/// The named event set. `tpe_server`'s SSE handler serializes these to
/// the wire; this crate only needs to move them between publisher and
/// subscriber.
#[derive(Debug, Clone)]
pub enum Event {
    MatchConfirmed {
        match_id: MatchId,
        competition_id: CompetitionId,
        season_id: SeasonId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        home_score: u32,
        away_score: u32,
    },
    StandingsUpdated { competition_id: CompetitionId, season_id: SeasonId },
    BracketUpdated { competition_id: CompetitionId, match_id: MatchId, bracket_position: Option<u32> },
    CompetitionComplete { competition_id: CompetitionId, season_id: SeasonId },
}

const SUBSCRIBER_CAPACITY: usize = 50;

/// Process-wide, cloneable handle onto a shared subscriber list. Every SSE
/// connection registers a new subscriber; `publish` fans an event out to
/// all of them, dropping any whose channel is full rather than blocking.
#[derive(Clone)]
pub struct EventBus {
    subscribers: std::sync::Arc<Mutex<Vec<mpsc::Sender<Event>>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            subscribers: std::sync::Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers a new subscriber and returns the receiving half of its
    /// channel, typically handed straight to an SSE response stream.
    pub fn subscribe(&self) -> mpsc::Receiver<Event> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CAPACITY);
        self.subscribers.lock().expect("event bus lock poisoned").push(tx);
        rx
    }

    /// Fans `event` out to every live subscriber. A subscriber whose queue
    /// is full is dropped rather than allowed to back-pressure the publisher.
    pub fn publish(&self, event: Event) {
        let mut subscribers = self.subscribers.lock().expect("event bus lock poisoned");
        subscribers.retain(|tx| tx.try_send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().expect("event bus lock poisoned").len()
    }
}
