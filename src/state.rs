use std::collections::HashMap;

use serde_json::Value;

use crate::model::{BootstrapData, LocalTeam, NewsItem, TeamRef};

/// Page-lifetime data shared by the views.
///
/// Every field is replaced wholesale by the next successful fetch of the
/// resource it mirrors; nothing is patched in place.
#[derive(Debug, Default)]
pub struct SiteState {
    teams: HashMap<String, LocalTeam>,
    matches: Vec<Value>,
    news: Vec<NewsItem>,
    league_teams: Vec<TeamRef>,
}

impl SiteState {
    pub fn apply_bootstrap(&mut self, data: BootstrapData) {
        self.teams = data
            .teams
            .into_iter()
            .filter_map(|t| Some((t.key()?.to_string(), t)))
            .collect();
        self.matches = data.matches;
    }

    pub fn set_news(&mut self, news: Vec<NewsItem>) {
        self.news = news;
    }

    pub fn set_league_teams(&mut self, teams: Vec<TeamRef>) {
        self.league_teams = teams;
    }

    pub fn team(&self, key: &str) -> Option<&LocalTeam> {
        self.teams.get(key)
    }

    pub fn teams(&self) -> impl Iterator<Item = &LocalTeam> {
        self.teams.values()
    }

    /// Local matches exactly as `/api/data` returned them.
    pub fn matches(&self) -> &[Value] {
        &self.matches
    }

    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    pub fn league_teams(&self) -> &[TeamRef] {
        &self.league_teams
    }
}
