use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::data::Backend;
use crate::page::{Document, Slot};
use crate::render::{self, live, Tint};
use crate::search;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Idle,
    Polling { ticks: u64 },
}

/// Live-score refresher. Once started it never stops or backs off; a failed
/// tick is reported and the next one runs on schedule.
#[derive(Debug)]
pub struct Poller {
    interval: Duration,
    state: PollState,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: PollState::Idle,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Idle → Polling. Returns false if polling had already started.
    pub fn start(&mut self) -> bool {
        match self.state {
            PollState::Idle => {
                self.state = PollState::Polling { ticks: 0 };
                info!(every = ?self.interval, "live polling started");
                true
            }
            PollState::Polling { .. } => false,
        }
    }

    /// Schedule for the ticks after the initial load.
    pub fn ticker(&self) -> Interval {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Fetches live matches and replaces the whole live view.
    pub async fn tick<B: Backend>(&mut self, backend: &B, doc: &mut Document) {
        if let PollState::Polling { ticks } = &mut self.state {
            *ticks += 1;
        }
        match backend.live_matches().await {
            Ok(matches) => {
                doc.set(Slot::LiveScores, live::render(&matches));
                doc.set_cards(Slot::LiveScores, search::live_cards(&matches));
            }
            Err(e) => {
                warn!(error = %e, "live scores failed");
                doc.set(Slot::LiveScores, render::message(live::FAILED, Tint::Loss));
                doc.set_cards(Slot::LiveScores, Vec::new());
            }
        }
    }
}
