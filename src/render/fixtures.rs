use std::cmp::Reverse;
use std::fmt::Write;

use crate::model::{Fixture, Goals};
use crate::page::Slot;

use super::{escape, logo, message, short_date, Tint};

pub const EMPTY: &str = "No fixtures found.";

/// Most recent kickoff first. Stable, so equal kickoffs keep API order.
pub fn newest_first(fixtures: &[Fixture]) -> Vec<&Fixture> {
    let mut sorted: Vec<&Fixture> = fixtures.iter().collect();
    sorted.sort_by_key(|f| Reverse(f.kickoff()));
    sorted
}

/// `"2 - 1"`, or `"VS"` while either side has no score yet.
pub fn score_text(goals: &Goals) -> String {
    match (goals.home, goals.away) {
        (Some(home), Some(away)) => format!("{home} - {away}"),
        _ => "VS".to_string(),
    }
}

/// Final whistle codes: full time, after extra time, after penalties.
pub const FINISHED: [&str; 3] = ["FT", "AET", "PEN"];

pub fn status_tint(status: &str) -> Tint {
    if FINISHED.contains(&status) {
        Tint::Finished
    } else {
        Tint::Neutral
    }
}

pub fn render(fixtures: &[Fixture]) -> String {
    if fixtures.is_empty() {
        return message(EMPTY, Tint::Neutral);
    }
    let mut html = String::new();
    for f in newest_first(fixtures) {
        let id = f.id();
        let home = &f.teams.home;
        let away = &f.teams.away;
        let _ = write!(
            html,
            concat!(
                r#"<div class="match-card" id="match-{id}" data-fixture="{id}">"#,
                r#"<div class="match-header"><span>{date}</span><span class="{tint}">{status}</span></div>"#,
                r#"<div class="match-content">"#,
                r#"<div class="team">{home_logo}<span>{home}</span></div>"#,
                r#"<div class="score-badge">{score}</div>"#,
                r#"<div class="team away"><span>{away}</span>{away_logo}</div>"#,
                r#"</div>"#,
                r#"<div class="match-actions">"#,
                r#"<button class="btn-scorers" data-action="toggle-scorers" data-fixture="{id}">⚽ Scorers</button>"#,
                r#"<div id="{panel}" class="match-scorers" hidden></div>"#,
                r#"</div></div>"#,
            ),
            id = id,
            date = short_date(&f.kickoff()),
            tint = status_tint(f.status_code()).class(),
            status = escape(f.status_code()),
            home_logo = logo(home.logo.as_deref()),
            home = escape(&home.name),
            score = score_text(&f.goals),
            away = escape(&away.name),
            away_logo = logo(away.logo.as_deref()),
            panel = Slot::Scorers(id).dom_id(),
        );
    }
    html
}
