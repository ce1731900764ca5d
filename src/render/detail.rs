use std::fmt::Write;

use crate::model::{MatchEvent, Statistic, TeamStatistics};

use super::{escape, message, Tint};

pub const STATS_FAILED: &str = "Error loading stats.";
pub const SCORERS_FAILED: &str = "Error loading data.";
pub const NO_GOALS: &str = "No goals scored.";
pub const NO_EVENTS: &str = "No events recorded.";
pub const NO_STATS: &str = "Statistics unavailable.";

pub const POSSESSION: &str = "Ball Possession";

/// Rows shown under the possession bar, in display order.
pub const STAT_ROWS: [&str; 6] = [
    "Shots on Goal",
    "Total Shots",
    "Corner Kicks",
    "Fouls",
    "Yellow Cards",
    "Red Cards",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventIcon {
    Ball,
    OwnGoal,
    YellowCard,
    RedCard,
    Substitution,
    Other,
}

impl EventIcon {
    pub fn classify(kind: &str, detail: &str) -> Self {
        let kind = kind.to_ascii_lowercase();
        let detail = detail.to_ascii_lowercase();
        match kind.as_str() {
            "goal" if detail == "own goal" => EventIcon::OwnGoal,
            "goal" => EventIcon::Ball,
            "card" if detail.starts_with("yellow") => EventIcon::YellowCard,
            "card" if detail.starts_with("red") || detail.starts_with("second yellow") => {
                EventIcon::RedCard
            }
            "subst" | "substitution" => EventIcon::Substitution,
            _ => EventIcon::Other,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            EventIcon::Ball => "⚽",
            EventIcon::OwnGoal => "🔴 OG",
            EventIcon::YellowCard => "🟨",
            EventIcon::RedCard => "🟥",
            EventIcon::Substitution => "🔄",
            EventIcon::Other => "•",
        }
    }
}

/// Integer value of a statistic, 0 when the type is absent or unreadable.
pub fn stat_value(stats: &[Statistic], kind: &str) -> i64 {
    stats
        .iter()
        .find(|s| s.kind == kind)
        .and_then(|s| s.value.as_ref())
        .and_then(|v| v.as_int())
        .unwrap_or(0)
}

fn possession_of(stats: &[Statistic]) -> Option<i64> {
    stats
        .iter()
        .find(|s| s.kind == POSSESSION)
        .and_then(|s| s.value.as_ref())
        .and_then(|v| v.as_int())
}

/// Home and away possession in percent, 50/50 unless both sides report it.
pub fn possession(home: &[Statistic], away: &[Statistic]) -> (i64, i64) {
    match (possession_of(home), possession_of(away)) {
        (Some(h), Some(a)) => (h, a),
        _ => (50, 50),
    }
}

fn minute(event: &MatchEvent) -> String {
    match (event.time.elapsed, event.time.extra) {
        (Some(min), Some(extra)) => format!("{min}+{extra}'"),
        (Some(min), None) => format!("{min}'"),
        _ => String::new(),
    }
}

fn event_row(event: &MatchEvent) -> String {
    let icon = EventIcon::classify(&event.kind, &event.detail);
    format!(
        concat!(
            r#"<div class="event-row" data-icon="{icon:?}">"#,
            r#"<span>{symbol} {player} ({minute})</span>"#,
            r#"<span class="tint-neutral">{team}</span>"#,
            "</div>",
        ),
        icon = icon,
        symbol = icon.symbol(),
        player = escape(event.player.name.as_deref().unwrap_or("Unknown")),
        minute = escape(&minute(event)),
        team = escape(&event.team.name),
    )
}

/// Goal events only, in the order the API returned them.
pub fn scorers(events: &[MatchEvent]) -> String {
    let rows: String = events.iter().filter(|e| e.is_goal()).map(event_row).collect();
    if rows.is_empty() {
        message(NO_GOALS, Tint::Neutral)
    } else {
        rows
    }
}

fn statistics(stats: &[TeamStatistics]) -> String {
    let [home, away] = stats else {
        return message(NO_STATS, Tint::Neutral);
    };
    let (home_pos, away_pos) = possession(&home.statistics, &away.statistics);
    let mut html = String::new();
    let _ = write!(
        html,
        concat!(
            r#"<div class="stat-header"><span>{home}</span><span>Possession</span><span>{away}</span></div>"#,
            r#"<div class="progress-bar">"#,
            r#"<div class="bar-home" style="width:{hp}%"></div>"#,
            r#"<div class="bar-away" style="width:{ap}%"></div>"#,
            "</div>",
            r#"<div class="stat-labels"><span>{hp}%</span><span>{ap}%</span></div>"#,
        ),
        home = escape(&home.team.name),
        away = escape(&away.team.name),
        hp = home_pos,
        ap = away_pos,
    );
    for kind in STAT_ROWS {
        let _ = write!(
            html,
            r#"<div class="stat-row"><span>{}</span><span>{}</span><span>{}</span></div>"#,
            stat_value(&home.statistics, kind),
            kind,
            stat_value(&away.statistics, kind),
        );
    }
    html
}

/// Stats panel: possession bar, stat rows, then the event timeline.
pub fn stats_panel(events: &[MatchEvent], stats: &[TeamStatistics]) -> String {
    let timeline: String = events.iter().map(event_row).collect();
    let timeline = if timeline.is_empty() {
        message(NO_EVENTS, Tint::Neutral)
    } else {
        timeline
    };
    format!(
        r#"<div class="detail-body">{}<div class="timeline">{}</div></div>"#,
        statistics(stats),
        timeline
    )
}
