mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::site;
use epl_zone::error::ApiError;
use epl_zone::page::Slot;
use epl_zone::render::detail::{self, EventIcon};
use epl_zone::route::Route;
use epl_zone::{Command, Request, ViewRegistry};
use tokio::sync::mpsc;

const LIVE_ID: u64 = 1035100;
const PLAYED_ID: u64 = 1035037;
const POLL: Duration = Duration::from_secs(60);

async fn open(backend: common::FakeBackend, route: Route) -> ViewRegistry<common::FakeBackend> {
    let mut registry = ViewRegistry::new(backend, route, POLL);
    registry.activate().await;
    registry.backend().clear_calls();
    registry
}

async fn press(registry: &mut ViewRegistry<common::FakeBackend>, command: Command) {
    registry.handle(command, &mut |_: &str| false).await;
}

#[tokio::test]
async fn stats_panel_shows_possession_and_timeline() {
    let mut registry = open(site(), Route::Live).await;
    press(&mut registry, Command::ToggleStats(LIVE_ID)).await;

    let doc = registry.document();
    assert!(doc.is_visible(Slot::Stats(LIVE_ID)));
    let panel = doc.html(Slot::Stats(LIVE_ID)).unwrap();
    assert!(panel.contains("width:64%"));
    assert!(panel.contains("width:36%"));
    assert!(panel.contains("Mohamed Salah"));
    assert!(panel.contains(EventIcon::YellowCard.symbol()));
    assert!(panel.contains(EventIcon::Substitution.symbol()));
    assert_eq!(panel.matches(r#"class="stat-row""#).count(), detail::STAT_ROWS.len());
}

#[tokio::test]
async fn stats_failure_renders_single_message() {
    let backend = site().fail(
        &format!("/api/stats/{LIVE_ID}"),
        ApiError::Upstream("rate limited".into()),
    );
    let mut registry = open(backend, Route::Live).await;
    press(&mut registry, Command::ToggleStats(LIVE_ID)).await;

    let panel = registry.document().html(Slot::Stats(LIVE_ID)).unwrap().to_string();
    assert_eq!(panel.matches(detail::STATS_FAILED).count(), 1);
    assert!(!panel.contains("Mohamed Salah"));
    // both requests were still made
    assert_eq!(registry.backend().calls().len(), 2);
}

#[tokio::test]
async fn toggling_closes_and_refetches_on_reopen() {
    let mut registry = open(site(), Route::Live).await;
    let events = format!("GET /api/events/{LIVE_ID}");

    press(&mut registry, Command::ToggleStats(LIVE_ID)).await;
    press(&mut registry, Command::ToggleStats(LIVE_ID)).await;
    assert!(!registry.document().is_visible(Slot::Stats(LIVE_ID)));
    assert_eq!(registry.backend().count(&events), 1);

    press(&mut registry, Command::ToggleStats(LIVE_ID)).await;
    assert!(registry.document().is_visible(Slot::Stats(LIVE_ID)));
    assert_eq!(registry.backend().count(&events), 2);
}

#[tokio::test]
async fn scorers_list_marks_own_goals() {
    let mut registry = open(site(), Route::Results).await;
    press(&mut registry, Command::ToggleScorers(PLAYED_ID)).await;

    let panel = registry.document().html(Slot::Scorers(PLAYED_ID)).unwrap().to_string();
    assert!(panel.contains(EventIcon::Ball.symbol()));
    assert!(panel.contains(EventIcon::OwnGoal.symbol()));
    assert_ne!(EventIcon::Ball.symbol(), EventIcon::OwnGoal.symbol());
    // cards and substitutions are not goals
    assert!(!panel.contains("Murillo"));
    assert!(!panel.contains("Danilo"));
    assert_eq!(
        registry.backend().calls(),
        vec![format!("GET /api/events/{PLAYED_ID}")]
    );
}

#[tokio::test]
async fn scorers_failure_message() {
    let mut registry = open(site(), Route::Results).await;
    // no events route for this fixture
    press(&mut registry, Command::ToggleScorers(1035200)).await;
    let panel = registry.document().html(Slot::Scorers(1035200)).unwrap().to_string();
    assert!(panel.contains(detail::SCORERS_FAILED));
}

#[tokio::test]
async fn live_refresh_collapses_open_stats() {
    let mut registry = open(site(), Route::Live).await;
    press(&mut registry, Command::ToggleStats(LIVE_ID)).await;
    assert!(registry.document().is_visible(Slot::Stats(LIVE_ID)));

    registry.poll_live().await;
    assert!(!registry.document().is_visible(Slot::Stats(LIVE_ID)));
}

#[tokio::test]
async fn run_loop_loads_panels_in_background() {
    let backend = site().delay(&format!("/api/events/{PLAYED_ID}"), Duration::from_millis(50));
    let mut registry = ViewRegistry::new(backend, Route::Results, POLL);
    registry.activate().await;

    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);
    let (tx, rx) = mpsc::channel::<Request>(8);
    let page = tokio::spawn(registry.run(rx, move |doc| {
        if let Some(html) = doc.html(Slot::Scorers(PLAYED_ID)) {
            sink.lock().unwrap().push(html.to_string());
        }
    }));

    tx.send(Command::ToggleScorers(PLAYED_ID).into()).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if seen.lock().unwrap().iter().any(|h| h.contains("Mohamed Salah")) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("scorers should load");

    tx.send(Command::Quit.into()).await.unwrap();
    page.await.unwrap();

    let seen = seen.lock().unwrap();
    assert!(seen[0].contains("Loading..."));
}
