use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper the backend forwards from the sports-data provider.
///
/// A failed upstream call comes back as `{ "error": "..." }` with no
/// `response` field at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEnvelope<T> {
    pub response: Option<Vec<T>>,
    pub error: Option<String>,
}

impl<T> Default for ProviderEnvelope<T> {
    fn default() -> Self {
        Self {
            response: None,
            error: None,
        }
    }
}

// --- local store (/api/data) ---

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapData {
    #[serde(default)]
    pub teams: Vec<LocalTeam>,
    #[serde(default)]
    pub matches: Vec<serde_json::Value>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalTeam {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl LocalTeam {
    /// Lookup key: the team code when present, else the store id.
    pub fn key(&self) -> Option<&str> {
        self.code
            .as_deref()
            .filter(|c| !c.is_empty())
            .or(self.id.as_deref())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: Option<Scalar>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub is_local: Option<bool>,
}

/// A loosely typed JSON scalar. The provider and the admin forms both send
/// numbers as strings in some places and integers in others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Integer reading of the value; `"54%"` parses as 54.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(f) => Some(f.round() as i64),
            Scalar::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

// --- provider fixtures (/api/fixtures, /api/live-epl) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture: FixtureInfo,
    pub teams: Sides,
    #[serde(default)]
    pub goals: Goals,
}

impl Fixture {
    pub fn id(&self) -> u64 {
        self.fixture.id
    }

    pub fn kickoff(&self) -> DateTime<Utc> {
        self.fixture.date
    }

    pub fn status_code(&self) -> &str {
        &self.fixture.status.short
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureInfo {
    pub id: u64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: FixtureStatus,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureStatus {
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub long: Option<String>,
    #[serde(default)]
    pub elapsed: Option<u32>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sides {
    pub home: TeamRef,
    pub away: TeamRef,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// `None` on either side means the match has not kicked off.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

// --- standings (/api/standings) ---

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub league: League,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub standings: Vec<Vec<StandingRow>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub rank: u32,
    pub team: TeamRef,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub goals_diff: i32,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub all: Record,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub win: u32,
    #[serde(default)]
    pub draw: u32,
    #[serde(default)]
    pub lose: u32,
}

// --- match detail (/api/events/:id, /api/stats/:id) ---

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    #[serde(default)]
    pub time: EventTime,
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default)]
    pub player: PlayerRef,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub detail: String,
}

impl MatchEvent {
    pub fn is_goal(&self) -> bool {
        self.kind.eq_ignore_ascii_case("goal")
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTime {
    pub elapsed: Option<u32>,
    #[serde(default)]
    pub extra: Option<u32>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatistics {
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default)]
    pub statistics: Vec<Statistic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Option<Scalar>,
}

// --- squads (/api/squad/:id) ---

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    #[serde(default)]
    pub team: TeamRef,
    #[serde(default)]
    pub players: Vec<SquadPlayer>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadPlayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

// --- news (/api/external-news, /api/news) ---

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Only locally-authored items carry a store id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

// --- admin mutations ---

/// `{ status, error? }` returned by every mutating endpoint.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MutationEnvelope {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub code: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub team_code: String,
    pub name: String,
    pub number: String,
    pub pos: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub image: String,
}
