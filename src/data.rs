use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::model::{
    BootstrapData, Fixture, MatchEvent, MutationEnvelope, NewsItem, Player, ProviderEnvelope,
    SquadPlayer, Squad, StandingRow, StandingsEntry, TeamStatistics,
};

/// Transport seam between the views and the backend.
///
/// Implementors only move JSON. The typed endpoint helpers are provided
/// methods built on top of the two raw calls, so every implementation
/// (the reqwest client, the in-memory fakes used by tests) shares the same
/// parsing rules. Every call is a single attempt.
pub trait Backend: Send + Sync {
    fn get_json(&self, path: &str) -> impl Future<Output = Result<Value>> + Send;

    /// Mutating request. The body is returned even for non-2xx statuses:
    /// the backend reports refusals inside the JSON envelope.
    fn send_json(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<Value>> + Send;

    fn fetch<T>(&self, path: &str) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let value = self.get_json(path).await?;
            Ok(serde_json::from_value(value)?)
        }
    }

    fn provider_list<T>(&self, path: &str) -> impl Future<Output = Result<Vec<T>>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let envelope: ProviderEnvelope<T> = self.fetch(path).await?;
            match (envelope.response, envelope.error) {
                (Some(list), _) => Ok(list),
                (None, Some(message)) => Err(ApiError::Upstream(message)),
                (None, None) => Err(ApiError::Parse(format!("{path}: missing `response`"))),
            }
        }
    }

    fn bootstrap(&self) -> impl Future<Output = Result<BootstrapData>> + Send {
        self.fetch("/api/data")
    }

    fn external_news(&self) -> impl Future<Output = Result<Vec<NewsItem>>> + Send {
        self.fetch("/api/external-news")
    }

    fn local_news(&self) -> impl Future<Output = Result<Vec<NewsItem>>> + Send {
        self.fetch("/api/news")
    }

    fn fixtures(&self) -> impl Future<Output = Result<Vec<Fixture>>> + Send {
        self.provider_list("/api/fixtures")
    }

    fn live_matches(&self) -> impl Future<Output = Result<Vec<Fixture>>> + Send {
        self.provider_list("/api/live-epl")
    }

    /// First table of the first league, or empty when the provider has none.
    fn standings(&self) -> impl Future<Output = Result<Vec<StandingRow>>> + Send {
        async move {
            let entries: Vec<StandingsEntry> = self.provider_list("/api/standings").await?;
            Ok(entries
                .into_iter()
                .next()
                .and_then(|entry| entry.league.standings.into_iter().next())
                .unwrap_or_default())
        }
    }

    fn events(&self, fixture_id: u64) -> impl Future<Output = Result<Vec<MatchEvent>>> + Send {
        async move {
            let path = format!("/api/events/{fixture_id}");
            self.provider_list(&path).await
        }
    }

    fn statistics(
        &self,
        fixture_id: u64,
    ) -> impl Future<Output = Result<Vec<TeamStatistics>>> + Send {
        async move {
            let path = format!("/api/stats/{fixture_id}");
            self.provider_list(&path).await
        }
    }

    fn squad(&self, team_id: u64) -> impl Future<Output = Result<Vec<SquadPlayer>>> + Send {
        async move {
            let path = format!("/api/squad/{team_id}");
            let squads: Vec<Squad> = self.provider_list(&path).await?;
            Ok(squads
                .into_iter()
                .next()
                .map(|squad| squad.players)
                .unwrap_or_default())
        }
    }

    fn local_squad(&self, team_code: &str) -> impl Future<Output = Result<Vec<Player>>> + Send {
        async move {
            let path = api_path(&["api", "local-squad", team_code]);
            self.fetch(&path).await
        }
    }

    /// Sends a mutation and unwraps the `{ status, error? }` envelope.
    fn mutate(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> impl Future<Output = Result<MutationEnvelope>> + Send {
        async move {
            let value = self.send_json(method, path, body).await?;
            let envelope: MutationEnvelope = serde_json::from_value(value)?;
            if envelope.is_success() {
                Ok(envelope)
            } else {
                Err(ApiError::Rejected(
                    envelope
                        .error
                        .unwrap_or_else(|| "Request was not accepted".to_string()),
                ))
            }
        }
    }
}

/// Joins path segments into an absolute path, percent-encoding each one.
pub fn api_path(segments: &[&str]) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return format!("/{}", segments.join("/"));
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

pub struct DataClient {
    client: Client,
    base: Url,
}

impl DataClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Network(format!("bad request path {path}: {e}")))
    }
}

impl Backend for DataClient {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path)?;
        debug!(%url, "GET");
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let data = resp.json::<Value>().await?;
        Ok(data)
    }

    async fn send_json(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path)?;
        debug!(%method, %url, "mutate");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        serde_json::from_str(&text)
            .map_err(|_| ApiError::Parse(format!("HTTP {status} with a non-JSON body")))
    }
}
