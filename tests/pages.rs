mod common;

use std::time::Duration;

use common::{site, FakeBackend};
use epl_zone::error::ApiError;
use epl_zone::page::Slot;
use epl_zone::poller::PollState;
use epl_zone::render::{admin as admin_view, fixtures, live, news, squad, standings};
use epl_zone::route::{Feature, FeatureSet, Route};
use epl_zone::{Command, ViewRegistry};

const POLL: Duration = Duration::from_secs(60);

async fn open(backend: FakeBackend, route: Route) -> ViewRegistry<FakeBackend> {
    let mut registry = ViewRegistry::new(backend, route, POLL);
    registry.activate().await;
    registry
}

fn html(registry: &ViewRegistry<FakeBackend>, slot: Slot) -> String {
    registry.document().html(slot).unwrap_or_default().to_string()
}

#[tokio::test]
async fn empty_live_list_renders_one_message() {
    let backend = site().get("/api/live-epl", "live_empty.json");
    let registry = open(backend, Route::Live).await;

    let out = html(&registry, Slot::LiveScores);
    assert_eq!(out.matches(live::EMPTY).count(), 1);
    assert!(!out.contains("match-card"));
    assert!(registry.document().hidden_cards().is_empty());
}

#[tokio::test]
async fn live_page_only_touches_live_endpoints() {
    let registry = open(site(), Route::Live).await;

    assert_eq!(
        registry.backend().calls(),
        vec!["GET /api/data", "GET /api/live-epl"]
    );
    let out = html(&registry, Slot::LiveScores);
    assert!(out.contains(r#"id="live-1035100""#));
    assert!(out.contains("🔴 LIVE 67&#39;"));
    // not kicked off goals render as zero on the live board
    assert!(out.contains("0 - 0"));
    assert!(registry.document().html(Slot::Matches).is_none());
    assert!(registry.document().html(Slot::StandingsBody).is_none());
    assert_eq!(registry.poller().state(), PollState::Polling { ticks: 1 });
}

#[tokio::test]
async fn live_upstream_error_shows_failure() {
    let backend = site().get("/api/live-epl", "upstream_error.json");
    let registry = open(backend, Route::Live).await;

    let out = html(&registry, Slot::LiveScores);
    assert!(out.contains(live::FAILED));
    assert!(!out.contains("match-card"));
}

#[tokio::test]
async fn failed_tick_recovers_on_the_next_one() {
    let backend = site().fail("/api/live-epl", ApiError::Network("timed out".into()));
    let mut registry = open(backend, Route::Live).await;
    assert!(html(&registry, Slot::LiveScores).contains(live::FAILED));

    registry.backend().serve("/api/live-epl", "live.json");
    registry.poll_live().await;

    let out = html(&registry, Slot::LiveScores);
    assert!(!out.contains(live::FAILED));
    assert!(out.contains(r#"id="live-1035100""#));
    assert_eq!(registry.poller().state(), PollState::Polling { ticks: 2 });
    assert_eq!(registry.backend().count("GET /api/live-epl"), 2);
}

#[tokio::test]
async fn results_page_orders_newest_first_and_shows_vs() {
    let registry = open(site(), Route::Results).await;

    let out = html(&registry, Slot::Matches);
    let upcoming = out.find(r#"id="match-1035200""#).expect("upcoming card");
    let played = out.find(r#"id="match-1035037""#).expect("played card");
    assert!(upcoming < played);
    assert!(out.contains(r#"<div class="score-badge">VS</div>"#));
    assert!(out.contains("2 - 1"));
    assert!(out.contains("tint-finished"));
    assert_eq!(
        registry.backend().calls(),
        vec!["GET /api/data", "GET /api/fixtures"]
    );
}

#[tokio::test]
async fn results_page_fixture_failure() {
    let backend = site().fail("/api/fixtures", ApiError::Network("connection refused".into()));
    let registry = open(backend, Route::Results).await;
    let out = html(&registry, Slot::Matches);
    assert!(out.contains(epl_zone::registry::FIXTURES_FAILED));
    assert!(!out.contains(fixtures::EMPTY));
}

#[tokio::test]
async fn search_hides_non_matching_cards() {
    let mut registry = open(site(), Route::Results).await;

    registry
        .handle(Command::Search("  ARSENAL ".into()), &mut |_: &str| true)
        .await;
    let doc = registry.document();
    assert!(doc.is_card_visible(1035200));
    assert!(!doc.is_card_visible(1035037));

    registry
        .handle(Command::Search(String::new()), &mut |_: &str| true)
        .await;
    assert!(registry.document().hidden_cards().is_empty());
}

#[tokio::test]
async fn standings_page_renders_table() {
    let registry = open(site(), Route::Standings).await;

    let out = html(&registry, Slot::StandingsBody);
    assert_eq!(out.matches("standings-row").count(), 3);
    assert!(out.contains(r#"data-href="/team/42""#));
    assert!(out.contains("+41"));
    assert!(out.contains("-48"));
    assert_eq!(
        registry.backend().calls(),
        vec!["GET /api/data", "GET /api/standings"]
    );
}

#[tokio::test]
async fn rate_limited_standings_show_empty_message() {
    let backend = site().get("/api/standings", "standings_rate_limited.json");
    let registry = open(backend, Route::Standings).await;

    let out = html(&registry, Slot::StandingsBody);
    assert!(out.contains(standings::EMPTY));
    assert!(!out.contains("standings-row"));
}

#[tokio::test]
async fn standings_failure_shows_message_row() {
    let backend = site().fail("/api/standings", ApiError::Network("connection reset".into()));
    let registry = open(backend, Route::Standings).await;

    let out = html(&registry, Slot::StandingsBody);
    assert!(out.starts_with("<tr>"));
    assert!(out.contains(epl_zone::registry::STANDINGS_FAILED));
}

#[tokio::test]
async fn news_page_falls_back_to_placeholder_image() {
    let registry = open(site(), Route::News).await;

    let out = html(&registry, Slot::News);
    assert!(out.contains("Title race goes to the wire"));
    assert!(out.contains("Read Full Story"));
    assert!(out.contains(epl_zone::render::PLACEHOLDER_LOGO));
    assert_eq!(registry.state().news().len(), 2);
}

#[tokio::test]
async fn news_failure_keeps_loading_placeholder() {
    let backend = site().fail("/api/external-news", ApiError::Upstream("quota".into()));
    let registry = open(backend, Route::News).await;
    assert!(html(&registry, Slot::News).contains(news::LOADING));
}

#[tokio::test]
async fn team_page_renders_squad() {
    let registry = open(site(), Route::Team(42)).await;

    let out = html(&registry, Slot::Squad);
    assert!(out.contains("David Raya"));
    assert!(out.contains("28 yrs"));
    assert_eq!(
        registry.backend().calls(),
        vec!["GET /api/data", "GET /api/squad/42"]
    );

    let registry = open(site(), Route::Team(7)).await;
    assert!(html(&registry, Slot::Squad).contains(squad::FAILED));
}

#[tokio::test]
async fn dashboard_merges_local_and_league_teams() {
    let registry = open(site(), Route::Dashboard).await;

    let picker = html(&registry, Slot::TeamPicker);
    assert!(picker.contains(r#"<option value="ARS">Arsenal</option>"#));
    assert!(picker.contains(r#"<option value="40">Liverpool</option>"#));
    // league Arsenal is the same club as the local one
    assert!(!picker.contains(r#"value="42""#));

    let teams = html(&registry, Slot::AdminTeams);
    let arsenal = teams.find("Arsenal").expect("arsenal row");
    let chelsea = teams.find("Chelsea").expect("chelsea row");
    assert!(arsenal < chelsea);
    assert!(html(&registry, Slot::AdminNews).contains("Academy graduates"));
}

#[tokio::test]
async fn dashboard_picker_errors_without_any_team() {
    let backend = FakeBackend::new()
        .get_value("/api/data", serde_json::json!({ "teams": [], "matches": [] }))
        .get("/api/news", "local_news.json");
    let registry = open(backend, Route::Dashboard).await;

    assert_eq!(html(&registry, Slot::TeamPicker), admin_view::team_options_failed());
    assert!(html(&registry, Slot::AdminTeams).contains(admin_view::NO_TEAMS));
}

#[tokio::test]
async fn dashboard_bootstrap_failure_is_not_an_empty_list() {
    let backend = site().fail("/api/data", ApiError::Network("connection refused".into()));
    let registry = open(backend, Route::Dashboard).await;

    let teams = html(&registry, Slot::AdminTeams);
    assert!(teams.contains(epl_zone::admin::TEAMS_FAILED));
    assert!(!teams.contains(admin_view::NO_TEAMS));
}

#[tokio::test]
async fn marker_pages_run_only_marked_features() {
    let features = FeatureSet::from_markers(["standings-body", "news-container"]);
    let mut registry = ViewRegistry::with_features(site(), features, POLL);
    registry.activate().await;

    assert!(registry.features().contains(Feature::News));
    assert_eq!(
        registry.backend().calls(),
        vec!["GET /api/data", "GET /api/external-news", "GET /api/standings"]
    );
    assert!(registry.document().html(Slot::LiveScores).is_none());
}

#[tokio::test]
async fn commands_for_absent_features_are_refused() {
    let mut registry = open(site(), Route::Standings).await;
    registry.backend().clear_calls();

    let outcome = registry
        .handle(Command::ToggleStats(1035100), &mut |_: &str| true)
        .await;
    assert!(outcome.is_none());
    assert!(registry.backend().calls().is_empty());
    assert!(registry.document().html(Slot::Stats(1035100)).is_none());
    assert_eq!(registry.document().notices().len(), 1);
}
