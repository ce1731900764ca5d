use std::collections::HashSet;
use std::fmt::Write;

use crate::model::{LocalTeam, NewsItem, Player, TeamRef};

use super::{escape, message, Tint};

pub const NO_TEAMS: &str = "No teams registered.";
pub const NO_PLAYERS: &str = "No players registered.";
pub const NO_NEWS: &str = "No news posted yet.";

fn by_name<'a>(teams: impl IntoIterator<Item = &'a LocalTeam>) -> Vec<&'a LocalTeam> {
    let mut sorted: Vec<&LocalTeam> = teams.into_iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.key().cmp(&b.key())));
    sorted
}

/// Local teams store either an image URL or a bare emoji as their logo.
fn badge(logo: Option<&str>) -> String {
    match logo.filter(|l| !l.is_empty()) {
        Some(url) if url.starts_with("http") => {
            format!(r#"<img class="team-logo" src="{}" alt="" width="25">"#, escape(url))
        }
        Some(symbol) => format!(r#"<span class="team-logo">{}</span>"#, escape(symbol)),
        None => r#"<span class="team-logo">⚽</span>"#.to_string(),
    }
}

pub fn team_list<'a>(teams: impl IntoIterator<Item = &'a LocalTeam>) -> String {
    let teams = by_name(teams);
    if teams.is_empty() {
        return message(NO_TEAMS, Tint::Neutral);
    }
    let mut html = String::new();
    for team in teams {
        let code = team.key().unwrap_or_default();
        let _ = write!(
            html,
            concat!(
                r#"<div class="admin-row">"#,
                r#"<span>{badge} {name} <small>({code})</small></span>"#,
                r#"<button class="btn-delete" data-action="delete-team" data-code="{code}">Delete</button>"#,
                "</div>",
            ),
            badge = badge(team.logo.as_deref()),
            name = escape(&team.name),
            code = escape(code),
        );
    }
    html
}

pub fn team_options_loading() -> String {
    r#"<option value="" disabled selected>Loading Teams...</option>"#.to_string()
}

pub fn team_options_failed() -> String {
    "<option disabled>Error Loading</option>".to_string()
}

/// Player-team picker: local teams by code, then league teams by provider id
/// unless a local team already uses the same name.
pub fn team_options<'a>(
    local: impl IntoIterator<Item = &'a LocalTeam>,
    league: &[TeamRef],
) -> String {
    let mut html = String::from(r#"<option value="" disabled selected>Select Team</option>"#);
    let mut seen = HashSet::new();
    for team in by_name(local) {
        let Some(key) = team.key() else { continue };
        seen.insert(team.name.to_lowercase());
        let _ = write!(
            html,
            r#"<option value="{}">{}</option>"#,
            escape(key),
            escape(&team.name)
        );
    }
    let mut league: Vec<&TeamRef> = league.iter().collect();
    league.sort_by(|a, b| a.name.cmp(&b.name));
    for team in league {
        let Some(id) = team.id else { continue };
        if !seen.insert(team.name.to_lowercase()) {
            continue;
        }
        let _ = write!(
            html,
            r#"<option value="{id}">{}</option>"#,
            escape(&team.name)
        );
    }
    html
}

pub fn player_list(team_code: &str, players: &[Player]) -> String {
    if players.is_empty() {
        return message(NO_PLAYERS, Tint::Neutral);
    }
    let mut html = String::new();
    for player in players {
        let number = player
            .number
            .as_ref()
            .map(|n| format!("#{} ", escape(&n.to_string())))
            .unwrap_or_default();
        let _ = write!(
            html,
            concat!(
                r#"<div class="admin-row">"#,
                r#"<span>{number}{name} <small>{pos}</small></span>"#,
                r#"<button class="btn-delete" data-action="delete-player" data-team="{team}" data-name="{name}">Delete</button>"#,
                "</div>",
            ),
            number = number,
            name = escape(&player.name),
            pos = escape(player.pos.as_deref().unwrap_or("")),
            team = escape(team_code),
        );
    }
    html
}

/// Only items with a store id can be deleted.
pub fn news_list(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return message(NO_NEWS, Tint::Neutral);
    }
    let mut html = String::new();
    for item in items {
        let delete = item
            .id
            .as_deref()
            .map(|id| {
                format!(
                    r#"<button class="btn-delete" data-action="delete-news" data-id="{}">Delete</button>"#,
                    escape(id)
                )
            })
            .unwrap_or_default();
        let _ = write!(
            html,
            r#"<div class="admin-row"><span>{} <small>{}</small></span>{}</div>"#,
            escape(&item.title),
            escape(item.date.as_deref().unwrap_or("")),
            delete,
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Scalar;

    fn team(code: &str, name: &str) -> LocalTeam {
        LocalTeam {
            id: Some(format!("id-{code}")),
            code: Some(code.to_string()),
            name: name.to_string(),
            logo: Some("⚽".to_string()),
            players: Vec::new(),
        }
    }

    #[test]
    fn test_team_list_sorted_with_delete() {
        let teams = [team("TOT", "Tottenham"), team("ARS", "Arsenal")];
        let html = team_list(&teams);
        assert!(html.find("Arsenal").unwrap() < html.find("Tottenham").unwrap());
        assert!(html.contains(r#"data-action="delete-team" data-code="ARS""#));
    }

    #[test]
    fn test_options_prefer_local_names() {
        let local = [team("ARS", "Arsenal")];
        let league = vec![
            TeamRef { id: Some(42), name: "Arsenal".into(), logo: None },
            TeamRef { id: Some(40), name: "Liverpool".into(), logo: None },
        ];
        let html = team_options(&local, &league);
        assert!(html.contains(r#"<option value="ARS">Arsenal</option>"#));
        assert!(!html.contains(r#"value="42""#));
        assert!(html.contains(r#"<option value="40">Liverpool</option>"#));
    }

    #[test]
    fn test_player_rows() {
        let players = vec![Player {
            name: "Bukayo Saka".into(),
            number: Some(Scalar::Text("7".into())),
            pos: Some("FW".into()),
            is_local: Some(true),
        }];
        let html = player_list("ARS", &players);
        assert!(html.contains("#7 Bukayo Saka"));
        assert!(html.contains(r#"data-team="ARS" data-name="Bukayo Saka""#));
        assert!(player_list("ARS", &[]).contains(NO_PLAYERS));
    }

    #[test]
    fn test_external_news_has_no_delete() {
        let items = vec![
            NewsItem { id: Some("n1".into()), title: "Local".into(), ..Default::default() },
            NewsItem { title: "Wire".into(), ..Default::default() },
        ];
        let html = news_list(&items);
        assert_eq!(html.matches("delete-news").count(), 1);
        assert!(html.contains(r#"data-id="n1""#));
    }
}
