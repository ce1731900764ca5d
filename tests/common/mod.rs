#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use epl_zone::data::Backend;
use epl_zone::error::{ApiError, Result};
use reqwest::Method;
use serde_json::{json, Value};

pub fn read_fixture(name: &str) -> Value {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid json")
}

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Fail(ApiError),
}

impl Reply {
    fn into_result(self) -> Result<Value> {
        match self {
            Reply::Json(v) => Ok(v),
            Reply::Fail(e) => Err(e),
        }
    }
}

#[derive(Debug, Clone)]
struct MutationReply {
    reply: Reply,
    /// GET routes replaced once the mutation has been answered.
    then: Vec<(String, Value)>,
}

/// In-memory backend. Unknown GET paths fail like an unreachable server.
#[derive(Default)]
pub struct FakeBackend {
    gets: Mutex<HashMap<String, Reply>>,
    mutations: Mutex<HashMap<String, MutationReply>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(self, path: &str, fixture: &str) -> Self {
        self.get_value(path, read_fixture(fixture))
    }

    pub fn get_value(self, path: &str, value: Value) -> Self {
        self.gets
            .lock()
            .unwrap()
            .insert(path.to_string(), Reply::Json(value));
        self
    }

    pub fn fail(self, path: &str, error: ApiError) -> Self {
        self.gets
            .lock()
            .unwrap()
            .insert(path.to_string(), Reply::Fail(error));
        self
    }

    /// Swaps the reply for a GET route on a backend already in use.
    pub fn serve(&self, path: &str, fixture: &str) {
        self.gets
            .lock()
            .unwrap()
            .insert(path.to_string(), Reply::Json(read_fixture(fixture)));
    }

    pub fn delay(self, path: &str, by: Duration) -> Self {
        self.delays.lock().unwrap().insert(path.to_string(), by);
        self
    }

    /// Answers `method path` with `{ "status": "success" }` and then serves
    /// `then` for the listed GET routes.
    pub fn accept(self, method: Method, path: &str, then: &[(&str, &str)]) -> Self {
        let then = then
            .iter()
            .map(|(p, f)| (p.to_string(), read_fixture(f)))
            .collect();
        self.mutation(method, path, Reply::Json(json!({ "status": "success" })), then)
    }

    pub fn reject(self, method: Method, path: &str, message: &str) -> Self {
        let body = json!({ "status": "error", "error": message });
        self.mutation(method, path, Reply::Json(body), Vec::new())
    }

    fn mutation(self, method: Method, path: &str, reply: Reply, then: Vec<(String, Value)>) -> Self {
        self.mutations
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), MutationReply { reply, then });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    /// Calls other than the ones listed.
    pub fn calls_except(&self, ignored: &[&str]) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !ignored.contains(&c.as_str()))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn delay_for(&self, path: &str) -> Option<Duration> {
        self.delays.lock().unwrap().get(path).copied()
    }
}

impl Backend for FakeBackend {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.record(format!("GET {path}"));
        if let Some(by) = self.delay_for(path) {
            tokio::time::sleep(by).await;
        }
        let reply = self.gets.lock().unwrap().get(path).cloned();
        reply
            .unwrap_or_else(|| Reply::Fail(ApiError::Network(format!("no route for {path}"))))
            .into_result()
    }

    async fn send_json(&self, method: Method, path: &str, _body: Option<Value>) -> Result<Value> {
        let key = format!("{method} {path}");
        self.record(key.clone());
        let answer = self.mutations.lock().unwrap().get(&key).cloned();
        let Some(MutationReply { reply, then }) = answer else {
            return Err(ApiError::Network(format!("no route for {key}")));
        };
        let mut gets = self.gets.lock().unwrap();
        for (path, value) in then {
            gets.insert(path, Reply::Json(value));
        }
        reply.into_result()
    }
}

/// Backend for a fully working site.
pub fn site() -> FakeBackend {
    FakeBackend::new()
        .get("/api/data", "data.json")
        .get("/api/live-epl", "live.json")
        .get("/api/fixtures", "fixtures.json")
        .get("/api/standings", "standings.json")
        .get("/api/external-news", "external_news.json")
        .get("/api/news", "local_news.json")
        .get("/api/local-squad/ARS", "local_squad.json")
        .get("/api/squad/42", "squad.json")
        .get("/api/events/1035100", "events.json")
        .get("/api/stats/1035100", "stats.json")
        .get("/api/events/1035037", "events.json")
}
