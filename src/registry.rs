//! Owns a page's state and decides which subsystems run on it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Interval;
use tracing::{debug, info, warn};

use crate::admin::{self, AdminPanel, Answer, Confirm, Outcome};
use crate::command::{Command, Request};
use crate::data::Backend;
use crate::detail::{self, Completion, DetailExpander, DetailKind, Toggle};
use crate::page::{Document, NoticeLevel, Slot};
use crate::poller::Poller;
use crate::render::{self, admin as admin_view, fixtures, news, squad, standings, Tint};
use crate::route::{Feature, FeatureSet, Route};
use crate::search;
use crate::state::SiteState;

pub const FIXTURES_FAILED: &str = "API Error";
pub const STANDINGS_FAILED: &str = "Unable to load standings.";

pub struct ViewRegistry<B> {
    backend: Arc<B>,
    route: Option<Route>,
    features: FeatureSet,
    document: Document,
    state: SiteState,
    expander: DetailExpander,
    admin: AdminPanel,
    poller: Poller,
}

impl<B: Backend + 'static> ViewRegistry<B> {
    pub fn new(backend: B, route: Route, poll_interval: Duration) -> Self {
        let mut registry = Self::with_features(backend, route.features(), poll_interval);
        registry.route = Some(route);
        registry
    }

    /// Registry for a page described only by the features it carries.
    pub fn with_features(backend: B, features: FeatureSet, poll_interval: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            route: None,
            features,
            document: Document::new(),
            state: SiteState::default(),
            expander: DetailExpander::new(),
            admin: AdminPanel::new(),
            poller: Poller::new(poll_interval),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn features(&self) -> FeatureSet {
        self.features
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn admin(&self) -> &AdminPanel {
        &self.admin
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    fn has(&self, feature: Feature) -> bool {
        self.features.contains(feature)
    }

    /// Initial load: bootstrap data, then one load per active feature.
    pub async fn activate(&mut self) {
        info!(route = ?self.route, features = ?self.features.iter().collect::<Vec<_>>(), "activating page");
        let bootstrapped = self.bootstrap().await;

        if self.has(Feature::LiveScores) {
            self.poller.start();
            self.poll_live().await;
        }
        if self.has(Feature::Fixtures) {
            self.load_fixtures().await;
        }
        if self.has(Feature::Standings) {
            self.load_standings().await;
        }
        if self.has(Feature::TeamPicker) {
            self.load_team_picker().await;
        }
        // a failed bootstrap has already put its message in the team list
        if self.has(Feature::AdminTeams) && bootstrapped {
            self.document
                .set(Slot::AdminTeams, admin_view::team_list(self.state.teams()));
        }
        if self.has(Feature::AdminNews) {
            admin::refresh_news(&*self.backend, &mut self.document).await;
        }
        if let (true, Some(Route::Team(id))) = (self.has(Feature::Squad), self.route) {
            self.load_squad(id).await;
        }
    }

    /// Local teams and matches, then the news feed. A news failure leaves
    /// the loading placeholder in place. Returns whether the local store
    /// loaded.
    pub async fn bootstrap(&mut self) -> bool {
        let loaded = match self.backend.bootstrap().await {
            Ok(data) => {
                self.state.apply_bootstrap(data);
                true
            }
            Err(e) => {
                warn!(error = %e, "bootstrap failed");
                if self.has(Feature::AdminTeams) {
                    self.document
                        .set(Slot::AdminTeams, render::message(admin::TEAMS_FAILED, Tint::Loss));
                }
                false
            }
        };

        if !self.has(Feature::News) {
            return loaded;
        }
        match self.backend.external_news().await {
            Ok(items) => self.state.set_news(items),
            Err(e) => debug!(error = %e, "news feed unavailable"),
        }
        self.document.set(Slot::News, news::render(self.state.news()));
        loaded
    }

    pub async fn poll_live(&mut self) {
        self.poller.tick(&*self.backend, &mut self.document).await;
    }

    async fn load_fixtures(&mut self) {
        match self.backend.fixtures().await {
            Ok(list) => {
                self.document.set(Slot::Matches, fixtures::render(&list));
                self.document
                    .set_cards(Slot::Matches, search::fixture_cards(&list));
            }
            Err(e) => {
                warn!(error = %e, "fixtures failed");
                self.document
                    .set(Slot::Matches, render::message(FIXTURES_FAILED, Tint::Loss));
            }
        }
    }

    async fn load_standings(&mut self) {
        match self.backend.standings().await {
            Ok(rows) => self
                .document
                .set(Slot::StandingsBody, standings::render(&rows)),
            Err(e) => {
                warn!(error = %e, "standings failed");
                self.document.set(
                    Slot::StandingsBody,
                    standings::message_row(STANDINGS_FAILED, Tint::Loss),
                );
            }
        }
    }

    async fn load_team_picker(&mut self) {
        self.document
            .set(Slot::TeamPicker, admin_view::team_options_loading());
        match self.backend.standings().await {
            Ok(rows) => self
                .state
                .set_league_teams(rows.into_iter().map(|r| r.team).collect()),
            Err(e) => warn!(error = %e, "league teams unavailable for picker"),
        }
        let html = if self.state.teams().next().is_none() && self.state.league_teams().is_empty() {
            admin_view::team_options_failed()
        } else {
            admin_view::team_options(self.state.teams(), self.state.league_teams())
        };
        self.document.set(Slot::TeamPicker, html);
    }

    async fn load_squad(&mut self, team_id: u64) {
        match self.backend.squad(team_id).await {
            Ok(players) => self.document.set(Slot::Squad, squad::render(&players)),
            Err(e) => {
                warn!(team = team_id, error = %e, "squad failed");
                self.document
                    .set(Slot::Squad, render::message(squad::FAILED, Tint::Loss));
            }
        }
    }

    /// Feature a command needs, if it is page specific.
    fn required_feature(command: &Command) -> Option<Feature> {
        match command {
            Command::ToggleStats(_) => Some(Feature::LiveScores),
            Command::ToggleScorers(_) => Some(Feature::Fixtures),
            Command::Search(_) => Some(Feature::Search),
            Command::SelectTeam(_) => Some(Feature::AdminPlayers),
            Command::Submit(admin::FormKind::Team) => Some(Feature::AdminTeams),
            Command::Submit(admin::FormKind::Player) => Some(Feature::AdminPlayers),
            Command::Submit(admin::FormKind::News) => Some(Feature::AdminNews),
            Command::Mutate(admin::Mutation::DeleteTeam { .. }) => Some(Feature::AdminTeams),
            Command::Mutate(admin::Mutation::DeletePlayer { .. }) => Some(Feature::AdminPlayers),
            Command::Mutate(admin::Mutation::DeleteNews { .. }) => Some(Feature::AdminNews),
            Command::Mutate(admin::Mutation::CreateTeam(_)) => Some(Feature::AdminTeams),
            Command::Mutate(admin::Mutation::CreatePlayer(_)) => Some(Feature::AdminPlayers),
            Command::Mutate(admin::Mutation::CreateNews(_)) => Some(Feature::AdminNews),
            _ => None,
        }
    }

    /// Refuses commands for subsystems this page does not run.
    fn allowed(&mut self, command: &Command) -> bool {
        match Self::required_feature(command) {
            Some(feature) if !self.has(feature) => {
                warn!(?command, ?feature, "command not available on this page");
                self.document
                    .notify(NoticeLevel::Error, "Not available on this page.");
                false
            }
            _ => true,
        }
    }

    /// Runs one command to completion. Detail panels load inline.
    pub async fn handle(&mut self, command: Command, confirm: &mut impl Confirm) -> Option<Outcome> {
        if !self.allowed(&command) {
            return None;
        }
        match command {
            Command::ToggleStats(id) => {
                self.expander
                    .toggle_and_load(&*self.backend, &mut self.document, DetailKind::Stats, id)
                    .await;
            }
            Command::ToggleScorers(id) => {
                self.expander
                    .toggle_and_load(&*self.backend, &mut self.document, DetailKind::Scorers, id)
                    .await;
            }
            Command::Search(term) => self.document.set_search(&term),
            Command::SelectTeam(code) => {
                self.admin
                    .select_team(&*self.backend, &mut self.document, &code)
                    .await;
            }
            Command::SetField { id, value } => self.document.set_field(&id, &value),
            Command::Submit(form) => {
                let outcome = self
                    .admin
                    .submit_form(&*self.backend, &mut self.document, &mut self.state, form)
                    .await;
                return Some(outcome);
            }
            Command::Mutate(mutation) => {
                let outcome = self
                    .admin
                    .submit(
                        &*self.backend,
                        &mut self.document,
                        &mut self.state,
                        mutation,
                        confirm,
                    )
                    .await;
                return Some(outcome);
            }
            Command::Refresh => self.activate().await,
            Command::Show => self.document.touch_all(),
            Command::Quit => {}
        }
        None
    }

    /// Event loop: poll ticks, user requests and detail completions, one at a
    /// time. Detail fetches run on their own tasks so a slow panel never holds
    /// up the page. `on_change` runs after every event.
    pub async fn run(
        mut self,
        mut requests: mpsc::Receiver<Request>,
        mut on_change: impl FnMut(&mut Document),
    ) {
        let mut ticker = self
            .has(Feature::LiveScores)
            .then(|| self.poller.ticker());
        let (done_tx, mut done_rx) = mpsc::channel::<Completion>(32);
        let mut listening = true;

        loop {
            tokio::select! {
                _ = next_tick(&mut ticker) => self.poll_live().await,
                Some(done) = done_rx.recv() => {
                    self.expander.complete(&mut self.document, done);
                }
                request = requests.recv(), if listening => match request {
                    // input closed: a polling page keeps updating
                    None if ticker.is_some() => listening = false,
                    None => break,
                    Some(Request { command: Command::Quit, .. }) => break,
                    Some(Request { command, confirmed }) => {
                        self.dispatch(command, confirmed, &done_tx).await;
                    }
                },
            }
            on_change(&mut self.document);
        }
        info!("page closed");
    }

    async fn dispatch(&mut self, command: Command, confirmed: bool, done: &mpsc::Sender<Completion>) {
        let panel = match command {
            Command::ToggleStats(id) => Some((DetailKind::Stats, id)),
            Command::ToggleScorers(id) => Some((DetailKind::Scorers, id)),
            _ => None,
        };
        let Some((kind, id)) = panel else {
            self.handle(command, &mut Answer(confirmed)).await;
            return;
        };
        if !self.allowed(&command) {
            return;
        }
        if let Toggle::Opened(ticket) = self.expander.toggle(&mut self.document, kind, id) {
            let backend = Arc::clone(&self.backend);
            let done = done.clone();
            tokio::spawn(async move {
                let html = detail::load(&*backend, &ticket).await;
                let _ = done.send(Completion { ticket, html }).await;
            });
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
