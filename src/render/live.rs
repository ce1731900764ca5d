use std::fmt::Write;

use crate::model::Fixture;
use crate::page::Slot;

use super::{escape, logo, message, short_date, Tint};

pub const EMPTY: &str = "No live matches currently.";
pub const FAILED: &str = "Unable to load live scores.";

/// Status codes that mean the ball is in play (or about to be again).
pub const IN_PLAY: [&str; 4] = ["1H", "2H", "HT", "ET"];

pub fn is_live(status: &str) -> bool {
    IN_PLAY.contains(&status)
}

pub fn status_label(f: &Fixture) -> String {
    if is_live(f.status_code()) {
        match f.fixture.status.elapsed {
            Some(min) => format!("🔴 LIVE {min}'"),
            None => "🔴 LIVE".to_string(),
        }
    } else {
        f.status_code().to_string()
    }
}

pub fn render(matches: &[Fixture]) -> String {
    if matches.is_empty() {
        return message(EMPTY, Tint::Neutral);
    }
    let mut html = String::new();
    for m in matches {
        let id = m.id();
        let tint = if is_live(m.status_code()) {
            Tint::Live
        } else {
            Tint::Neutral
        };
        let _ = write!(
            html,
            concat!(
                r#"<div class="match-card" id="live-{id}" data-fixture="{id}">"#,
                r#"<div class="match-header"><span>{date}</span><span class="status {tint}">{status}</span></div>"#,
                r#"<div class="match-content">"#,
                r#"<div class="team">{home_logo} {home}</div>"#,
                r#"<div class="score-badge {tint}">{home_goals} - {away_goals}</div>"#,
                r#"<div class="team away">{away} {away_logo}</div>"#,
                r#"</div>"#,
                r#"<div class="match-actions"><button class="btn-stats" data-action="toggle-stats" data-fixture="{id}">📊 Stats</button></div>"#,
                r#"<div id="{panel}" class="match-details" hidden></div>"#,
                r#"</div>"#,
            ),
            id = id,
            date = short_date(&m.kickoff()),
            tint = tint.class(),
            status = escape(&status_label(m)),
            home_logo = logo(m.teams.home.logo.as_deref()),
            home = escape(&m.teams.home.name),
            home_goals = m.goals.home.unwrap_or(0),
            away_goals = m.goals.away.unwrap_or(0),
            away = escape(&m.teams.away.name),
            away_logo = logo(m.teams.away.logo.as_deref()),
            panel = Slot::Stats(id).dom_id(),
        );
    }
    html
}
