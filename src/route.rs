use std::fmt;
use std::str::FromStr;

/// Which page the site is serving. Chosen at startup instead of probing the
/// markup for containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Live,
    Results,
    Standings,
    News,
    Dashboard,
    Team(u64),
}

impl Route {
    pub fn features(self) -> FeatureSet {
        use Feature::*;
        let list: &[Feature] = match self {
            Route::Live => &[LiveScores, Search],
            Route::Results => &[Fixtures, Search],
            Route::Standings => &[Standings],
            Route::News => &[News],
            Route::Dashboard => &[TeamPicker, AdminTeams, AdminPlayers, AdminNews],
            Route::Team(_) => &[Squad],
        };
        FeatureSet::from_iter(list.iter().copied())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Route::Live),
            "results" | "fixtures" => Ok(Route::Results),
            "standings" => Ok(Route::Standings),
            "news" => Ok(Route::News),
            "dashboard" | "admin" => Ok(Route::Dashboard),
            other => match other.strip_prefix("team:") {
                Some(id) => id
                    .parse()
                    .map(Route::Team)
                    .map_err(|_| format!("bad team id in page `{s}`")),
                None => Err(format!(
                    "unknown page `{s}` (live, results, standings, news, dashboard, team:<id>)"
                )),
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Live => f.write_str("live"),
            Route::Results => f.write_str("results"),
            Route::Standings => f.write_str("standings"),
            Route::News => f.write_str("news"),
            Route::Dashboard => f.write_str("dashboard"),
            Route::Team(id) => write!(f, "team:{id}"),
        }
    }
}

/// A subsystem that runs only when its page asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Feature {
    LiveScores,
    Fixtures,
    Standings,
    News,
    TeamPicker,
    AdminTeams,
    AdminPlayers,
    AdminNews,
    Search,
    Squad,
}

impl Feature {
    pub const ALL: [Feature; 10] = [
        Feature::LiveScores,
        Feature::Fixtures,
        Feature::Standings,
        Feature::News,
        Feature::TeamPicker,
        Feature::AdminTeams,
        Feature::AdminPlayers,
        Feature::AdminNews,
        Feature::Search,
        Feature::Squad,
    ];

    /// Element id whose presence marks the feature on a legacy page.
    pub fn marker(self) -> &'static str {
        match self {
            Feature::LiveScores => "live-scores-container",
            Feature::Fixtures => "matches-container",
            Feature::Standings => "standings-body",
            Feature::News => "news-container",
            Feature::TeamPicker => "input-player-team",
            Feature::AdminTeams => "admin-team-list",
            Feature::AdminPlayers => "admin-player-list",
            Feature::AdminNews => "admin-news-list",
            Feature::Search => "search-input",
            Feature::Squad => "squad-container",
        }
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet(u16);

impl FeatureSet {
    /// Features whose marker element is present on the page.
    pub fn from_markers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let ids: Vec<&str> = ids.into_iter().collect();
        Feature::ALL
            .into_iter()
            .filter(|f| ids.contains(&f.marker()))
            .collect()
    }

    pub fn contains(self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    pub fn insert(&mut self, feature: Feature) {
        self.0 |= feature.bit();
    }

    pub fn iter(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut set = FeatureSet::default();
        for f in iter {
            set.insert(f);
        }
        set
    }
}
