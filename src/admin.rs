//! Dashboard mutations and the team → players selection.
//!
//! A successful mutation clears its form and refreshes only the list it
//! touched. A refused one shows the server's message and refreshes nothing.

use reqwest::Method;
use serde_json::Value;
use tracing::{info, warn};

use crate::data::{api_path, Backend};
use crate::error::ApiError;
use crate::model::{NewNews, NewPlayer, NewTeam};
use crate::page::{Document, NoticeLevel, Slot};
use crate::render::{self, admin, Tint};
use crate::state::SiteState;

pub const TEAM_FIELDS: [&str; 3] = ["new-team-name", "new-team-code", "new-team-logo"];
pub const PLAYER_TEAM_FIELD: &str = "input-player-team";
pub const PLAYER_FIELDS: [&str; 3] = ["new-player-name", "new-player-number", "new-player-pos"];
pub const NEWS_FIELDS: [&str; 3] = ["news-title", "news-content", "news-image"];

pub const MISSING_FIELDS: &str = "Please fill in all fields.";
pub const PLAYERS_FAILED: &str = "Error loading players.";
pub const TEAMS_FAILED: &str = "Error loading teams.";
pub const NEWS_FAILED: &str = "Error loading news.";

/// Answers the "are you sure?" question asked before a delete.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// An answer collected before the request reached the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Team,
    Player,
    News,
}

impl FormKind {
    fn value(doc: &Document, id: &str) -> String {
        doc.field(id).trim().to_string()
    }

    /// Builds the mutation from the form inputs, or `None` if a required
    /// input is empty.
    pub fn read(self, doc: &Document) -> Option<Mutation> {
        let mutation = match self {
            FormKind::Team => Mutation::CreateTeam(NewTeam {
                name: Self::value(doc, TEAM_FIELDS[0]),
                code: Self::value(doc, TEAM_FIELDS[1]),
                logo: Self::value(doc, TEAM_FIELDS[2]),
            }),
            FormKind::Player => Mutation::CreatePlayer(NewPlayer {
                team_code: Self::value(doc, PLAYER_TEAM_FIELD),
                name: Self::value(doc, PLAYER_FIELDS[0]),
                number: Self::value(doc, PLAYER_FIELDS[1]),
                pos: Self::value(doc, PLAYER_FIELDS[2]),
            }),
            FormKind::News => Mutation::CreateNews(NewNews {
                title: Self::value(doc, NEWS_FIELDS[0]),
                content: Self::value(doc, NEWS_FIELDS[1]),
                image: Self::value(doc, NEWS_FIELDS[2]),
            }),
        };
        mutation.is_complete().then_some(mutation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateTeam(NewTeam),
    CreatePlayer(NewPlayer),
    CreateNews(NewNews),
    DeleteTeam { code: String },
    DeletePlayer { team_code: String, name: String },
    DeleteNews { id: String },
}

impl Mutation {
    pub fn method(&self) -> Method {
        match self {
            Mutation::CreateTeam(_) | Mutation::CreatePlayer(_) | Mutation::CreateNews(_) => {
                Method::POST
            }
            _ => Method::DELETE,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Mutation::CreateTeam(_) => "/api/team".to_string(),
            Mutation::CreatePlayer(_) => "/api/player".to_string(),
            Mutation::CreateNews(_) => "/api/news".to_string(),
            Mutation::DeleteTeam { code } => api_path(&["api", "team", code.as_str()]),
            Mutation::DeletePlayer { team_code, name } => {
                api_path(&["api", "player", team_code.as_str(), name.as_str()])
            }
            Mutation::DeleteNews { id } => api_path(&["api", "news", id.as_str()]),
        }
    }

    pub fn body(&self) -> Option<Value> {
        match self {
            Mutation::CreateTeam(team) => serde_json::to_value(team).ok(),
            Mutation::CreatePlayer(player) => serde_json::to_value(player).ok(),
            Mutation::CreateNews(news) => serde_json::to_value(news).ok(),
            _ => None,
        }
    }

    /// Question to ask before sending; deletes only.
    pub fn confirmation(&self) -> Option<String> {
        match self {
            Mutation::DeleteTeam { code } => Some(format!(
                "Delete team {code}? All of its players will be deleted too."
            )),
            Mutation::DeletePlayer { team_code, name } => {
                Some(format!("Delete player {name} from {team_code}?"))
            }
            Mutation::DeleteNews { .. } => Some("Delete this news item?".to_string()),
            _ => None,
        }
    }

    fn is_complete(&self) -> bool {
        let required: Vec<&str> = match self {
            Mutation::CreateTeam(t) => vec![t.name.as_str(), t.code.as_str()],
            Mutation::CreatePlayer(p) => vec![
                p.team_code.as_str(),
                p.name.as_str(),
                p.number.as_str(),
                p.pos.as_str(),
            ],
            Mutation::CreateNews(n) => vec![n.title.as_str(), n.content.as_str()],
            Mutation::DeleteTeam { code } => vec![code.as_str()],
            Mutation::DeletePlayer { team_code, name } => vec![team_code.as_str(), name.as_str()],
            Mutation::DeleteNews { id } => vec![id.as_str()],
        };
        required.iter().all(|v| !v.trim().is_empty())
    }

    /// Inputs cleared after success. The team picker keeps its selection.
    fn form_fields(&self) -> &'static [&'static str] {
        match self {
            Mutation::CreateTeam(_) => &TEAM_FIELDS,
            Mutation::CreatePlayer(_) => &PLAYER_FIELDS,
            Mutation::CreateNews(_) => &NEWS_FIELDS,
            _ => &[],
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Mutation::CreateTeam(_) => "Team registered.",
            Mutation::CreatePlayer(_) => "Player registered.",
            Mutation::CreateNews(_) => "News posted.",
            Mutation::DeleteTeam { .. } => "Team deleted.",
            Mutation::DeletePlayer { .. } => "Player deleted.",
            Mutation::DeleteNews { .. } => "News deleted.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Declined,
    Invalid,
    Rejected(String),
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TeamSelection {
    #[default]
    NoSelection,
    Loaded(String),
}

#[derive(Debug, Default)]
pub struct AdminPanel {
    selection: TeamSelection,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &TeamSelection {
        &self.selection
    }

    /// Picks the team whose players are listed. An empty code clears the
    /// selection and leaves the list as it is.
    pub async fn select_team<B: Backend>(&mut self, backend: &B, doc: &mut Document, code: &str) {
        let code = code.trim();
        doc.set_field(PLAYER_TEAM_FIELD, code);
        if code.is_empty() {
            self.selection = TeamSelection::NoSelection;
            return;
        }
        self.selection = TeamSelection::Loaded(code.to_string());
        self.refresh_players(backend, doc).await;
    }

    pub async fn refresh_players<B: Backend>(&self, backend: &B, doc: &mut Document) {
        let TeamSelection::Loaded(code) = &self.selection else {
            return;
        };
        match backend.local_squad(code).await {
            Ok(players) => doc.set(Slot::AdminPlayers, admin::player_list(code, &players)),
            Err(e) => {
                warn!(team = %code, error = %e, "player list failed");
                doc.set(Slot::AdminPlayers, render::message(PLAYERS_FAILED, Tint::Loss));
            }
        }
    }

    /// Sends a form submission.
    pub async fn submit_form<B: Backend>(
        &mut self,
        backend: &B,
        doc: &mut Document,
        state: &mut SiteState,
        form: FormKind,
    ) -> Outcome {
        let Some(mutation) = form.read(doc) else {
            doc.notify(NoticeLevel::Error, MISSING_FIELDS);
            return Outcome::Invalid;
        };
        self.submit(backend, doc, state, mutation, &mut Answer(true)).await
    }

    pub async fn submit<B: Backend>(
        &mut self,
        backend: &B,
        doc: &mut Document,
        state: &mut SiteState,
        mutation: Mutation,
        confirm: &mut impl Confirm,
    ) -> Outcome {
        if !mutation.is_complete() {
            doc.notify(NoticeLevel::Error, MISSING_FIELDS);
            return Outcome::Invalid;
        }
        if let Some(question) = mutation.confirmation() {
            if !confirm.confirm(&question) {
                info!(path = %mutation.path(), "mutation cancelled");
                return Outcome::Declined;
            }
        }

        let path = mutation.path();
        match backend.mutate(mutation.method(), &path, mutation.body()).await {
            Ok(_) => {
                info!(method = %mutation.method(), %path, "mutation applied");
                doc.clear_fields(mutation.form_fields());
                doc.notify(NoticeLevel::Success, mutation.success_message());
                self.refresh_after(backend, doc, state, &mutation).await;
                Outcome::Applied
            }
            Err(ApiError::Rejected(message)) => {
                warn!(%path, %message, "mutation rejected");
                doc.notify(NoticeLevel::Error, message.clone());
                Outcome::Rejected(message)
            }
            Err(e) => {
                warn!(%path, error = %e, "mutation failed");
                doc.notify(NoticeLevel::Error, format!("Request failed: {e}"));
                Outcome::Failed(e.to_string())
            }
        }
    }

    async fn refresh_after<B: Backend>(
        &mut self,
        backend: &B,
        doc: &mut Document,
        state: &mut SiteState,
        mutation: &Mutation,
    ) {
        match mutation {
            Mutation::CreateNews(_) | Mutation::DeleteNews { .. } => {
                refresh_news(backend, doc).await;
            }
            Mutation::CreateTeam(_) => refresh_teams(backend, doc, state).await,
            Mutation::DeleteTeam { code } => {
                if self.selection == TeamSelection::Loaded(code.clone()) {
                    self.selection = TeamSelection::NoSelection;
                    doc.set_field(PLAYER_TEAM_FIELD, "");
                    doc.set(Slot::AdminPlayers, String::new());
                }
                refresh_teams(backend, doc, state).await;
            }
            Mutation::CreatePlayer(NewPlayer { team_code, .. })
            | Mutation::DeletePlayer { team_code, .. } => {
                if self.selection == TeamSelection::Loaded(team_code.clone()) {
                    self.refresh_players(backend, doc).await;
                }
            }
        }
    }
}

/// Re-reads the local store and redraws the team list and the team picker.
pub async fn refresh_teams<B: Backend>(backend: &B, doc: &mut Document, state: &mut SiteState) {
    match backend.bootstrap().await {
        Ok(data) => {
            state.apply_bootstrap(data);
            render_teams(doc, state);
        }
        Err(e) => {
            warn!(error = %e, "team list failed");
            doc.set(Slot::AdminTeams, render::message(TEAMS_FAILED, Tint::Loss));
        }
    }
}

pub fn render_teams(doc: &mut Document, state: &SiteState) {
    doc.set(Slot::AdminTeams, admin::team_list(state.teams()));
    doc.set(
        Slot::TeamPicker,
        admin::team_options(state.teams(), state.league_teams()),
    );
}

pub async fn refresh_news<B: Backend>(backend: &B, doc: &mut Document) {
    match backend.local_news().await {
        Ok(items) => doc.set(Slot::AdminNews, admin::news_list(&items)),
        Err(e) => {
            warn!(error = %e, "admin news failed");
            doc.set(Slot::AdminNews, render::message(NEWS_FAILED, Tint::Loss));
        }
    }
}
