//! Per-match detail panels that load on demand.
//!
//! Opening a panel shows a loading line and hands back a `Ticket`; the caller
//! fetches with `load` (inline, or on a spawned task) and passes the result
//! to `complete`. Every toggle bumps the panel's token, so a response that
//! arrives after the panel was closed or re-opened is dropped instead of
//! overwriting newer state. Panels re-fetch on every open.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::data::Backend;
use crate::page::{Document, Slot};
use crate::render::{self, detail, Tint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    /// Events and statistics, joined.
    Stats,
    /// Goal events only.
    Scorers,
}

impl DetailKind {
    pub fn slot(self, fixture_id: u64) -> Slot {
        match self {
            DetailKind::Stats => Slot::Stats(fixture_id),
            DetailKind::Scorers => Slot::Scorers(fixture_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub kind: DetailKind,
    pub fixture_id: u64,
    token: u64,
}

impl Ticket {
    pub fn slot(&self) -> Slot {
        self.kind.slot(self.fixture_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    Collapsed,
    Opened(Ticket),
}

/// A finished load waiting to be applied.
#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: Ticket,
    pub html: String,
}

#[derive(Debug, Default)]
pub struct DetailExpander {
    tokens: HashMap<Slot, u64>,
}

impl DetailExpander {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&mut self, slot: Slot) -> u64 {
        let token = self.tokens.entry(slot).or_insert(0);
        *token += 1;
        *token
    }

    /// Hides an open panel, or opens a closed one and returns what to load.
    pub fn toggle(&mut self, doc: &mut Document, kind: DetailKind, fixture_id: u64) -> Toggle {
        let slot = kind.slot(fixture_id);
        let token = self.bump(slot);
        if doc.is_visible(slot) {
            doc.hide(slot);
            return Toggle::Collapsed;
        }
        doc.set(slot, render::loading());
        Toggle::Opened(Ticket {
            kind,
            fixture_id,
            token,
        })
    }

    /// Applies a load result. Returns false when the ticket was superseded
    /// or its panel is gone.
    pub fn complete(&self, doc: &mut Document, completion: Completion) -> bool {
        let slot = completion.ticket.slot();
        let current = self.tokens.get(&slot).copied();
        if current != Some(completion.ticket.token) || !doc.is_visible(slot) {
            debug!(panel = %slot.dom_id(), "dropping stale detail response");
            return false;
        }
        doc.set(slot, completion.html);
        true
    }

    /// Toggle, fetch and apply in one step.
    pub async fn toggle_and_load<B: Backend>(
        &mut self,
        backend: &B,
        doc: &mut Document,
        kind: DetailKind,
        fixture_id: u64,
    ) -> Toggle {
        let toggle = self.toggle(doc, kind, fixture_id);
        if let Toggle::Opened(ticket) = &toggle {
            let html = load(backend, ticket).await;
            self.complete(
                doc,
                Completion {
                    ticket: ticket.clone(),
                    html,
                },
            );
        }
        toggle
    }
}

/// Fetches and renders a panel. Stats waits for both requests and renders a
/// single failure line if either fails.
pub async fn load<B: Backend>(backend: &B, ticket: &Ticket) -> String {
    let id = ticket.fixture_id;
    match ticket.kind {
        DetailKind::Stats => match tokio::join!(backend.events(id), backend.statistics(id)) {
            (Ok(events), Ok(stats)) => detail::stats_panel(&events, &stats),
            (Err(e), _) | (_, Err(e)) => {
                warn!(fixture = id, error = %e, "match stats failed");
                render::message(detail::STATS_FAILED, Tint::Loss)
            }
        },
        DetailKind::Scorers => match backend.events(id).await {
            Ok(events) => detail::scorers(&events),
            Err(e) => {
                warn!(fixture = id, error = %e, "scorers failed");
                render::message(detail::SCORERS_FAILED, Tint::Loss)
            }
        },
    }
}
