//! The document a page renders into.
//!
//! `Document` stands in for the browser DOM: a set of containers keyed by
//! their element id, each with its current markup and visibility, plus the
//! form inputs, user-facing notices and the searchable match cards. Every
//! write marks the container dirty so a front end can patch only what
//! changed.

use std::collections::{BTreeMap, BTreeSet};

/// A container the site writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    LiveScores,
    Matches,
    StandingsBody,
    News,
    TeamPicker,
    AdminTeams,
    AdminPlayers,
    AdminNews,
    Squad,
    /// Stats panel under a live match card.
    Stats(u64),
    /// Scorers panel under a fixture card.
    Scorers(u64),
}

impl Slot {
    pub fn dom_id(&self) -> String {
        match self {
            Slot::LiveScores => "live-scores-container".into(),
            Slot::Matches => "matches-container".into(),
            Slot::StandingsBody => "standings-body".into(),
            Slot::News => "news-container".into(),
            Slot::TeamPicker => "input-player-team".into(),
            Slot::AdminTeams => "admin-team-list".into(),
            Slot::AdminPlayers => "admin-player-list".into(),
            Slot::AdminNews => "admin-news-list".into(),
            Slot::Squad => "squad-container".into(),
            Slot::Stats(id) => format!("details-{id}"),
            Slot::Scorers(id) => format!("scorers-{id}"),
        }
    }

    /// Whether the container holds searchable match cards.
    pub fn has_cards(&self) -> bool {
        matches!(self, Slot::LiveScores | Slot::Matches)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    pub html: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Text of one match card, used by the search filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub fixture_id: u64,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Document {
    panels: BTreeMap<Slot, Panel>,
    fields: BTreeMap<String, String>,
    notices: Vec<Notice>,
    cards: BTreeMap<Slot, Vec<Card>>,
    hidden_cards: BTreeSet<u64>,
    search: String,
    dirty: BTreeSet<Slot>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self, slot: Slot) -> Option<&str> {
        self.panels.get(&slot).map(|p| p.html.as_str())
    }

    pub fn is_visible(&self, slot: Slot) -> bool {
        self.panels.get(&slot).is_some_and(|p| p.visible)
    }

    /// Replaces a container's markup and shows it.
    ///
    /// A card list owns the detail panels rendered inside it, so replacing
    /// one drops them: any open panel collapses.
    pub fn set(&mut self, slot: Slot, html: String) {
        let owned: fn(&Slot) -> bool = match slot {
            Slot::LiveScores => |s| matches!(s, Slot::Stats(_)),
            Slot::Matches => |s| matches!(s, Slot::Scorers(_)),
            _ => |_| false,
        };
        let dropped: Vec<Slot> = self.panels.keys().copied().filter(owned).collect();
        for s in dropped {
            self.panels.remove(&s);
            self.dirty.insert(s);
        }
        self.panels.insert(slot, Panel { html, visible: true });
        self.dirty.insert(slot);
    }

    pub fn hide(&mut self, slot: Slot) {
        if let Some(panel) = self.panels.get_mut(&slot) {
            if panel.visible {
                panel.visible = false;
                self.dirty.insert(slot);
            }
        }
    }

    /// Marks every container dirty, e.g. to redraw the whole page.
    pub fn touch_all(&mut self) {
        self.dirty.extend(self.panels.keys().copied());
    }

    /// Containers written since the last call, with their current state.
    pub fn take_dirty(&mut self) -> Vec<(Slot, Option<Panel>)> {
        std::mem::take(&mut self.dirty)
            .into_iter()
            .map(|slot| (slot, self.panels.get(&slot).cloned()))
            .collect()
    }

    // --- form inputs ---

    pub fn field(&self, id: &str) -> &str {
        self.fields.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn set_field(&mut self, id: &str, value: &str) {
        self.fields.insert(id.to_string(), value.to_string());
    }

    pub fn clear_fields(&mut self, ids: &[&str]) {
        for id in ids {
            self.fields.remove(*id);
        }
    }

    // --- notices ---

    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- search ---

    /// Records the cards rendered into `slot` and re-applies the search term.
    pub fn set_cards(&mut self, slot: Slot, cards: Vec<Card>) {
        self.cards.insert(slot, cards);
        self.apply_search();
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_lowercase();
        self.apply_search();
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn is_card_visible(&self, fixture_id: u64) -> bool {
        !self.hidden_cards.contains(&fixture_id)
    }

    pub fn hidden_cards(&self) -> &BTreeSet<u64> {
        &self.hidden_cards
    }

    fn apply_search(&mut self) {
        let hidden: BTreeSet<u64> = self
            .cards
            .values()
            .flatten()
            .filter(|card| !crate::search::matches(&card.text, &self.search))
            .map(|card| card.fixture_id)
            .collect();
        if hidden != self.hidden_cards {
            self.hidden_cards = hidden;
            self.dirty.extend(self.cards.keys().copied());
        }
    }
}
