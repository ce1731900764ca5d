use std::fmt::Write;

use crate::model::SquadPlayer;

use super::{escape, message, Tint, PLACEHOLDER_LOGO};

pub const EMPTY: &str = "No squad data available.";
pub const FAILED: &str = "Error loading squad.";

pub fn render(players: &[SquadPlayer]) -> String {
    if players.is_empty() {
        return message(EMPTY, Tint::Neutral);
    }
    let mut html = String::new();
    for p in players {
        let number = p.number.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
        let age = p.age.map(|a| format!("{a} yrs")).unwrap_or_default();
        let _ = write!(
            html,
            concat!(
                r#"<div class="player-card">"#,
                r#"<img src="{photo}" onerror="this.onerror=null;this.src='{fallback}'" alt="" width="48">"#,
                r#"<span class="player-number">{number}</span>"#,
                r#"<span class="player-name">{name}</span>"#,
                r#"<small>{position} {age}</small>"#,
                "</div>",
            ),
            photo = escape(p.photo.as_deref().unwrap_or(PLACEHOLDER_LOGO)),
            fallback = PLACEHOLDER_LOGO,
            number = number,
            name = escape(&p.name),
            position = escape(p.position.as_deref().unwrap_or("")),
            age = age,
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squad_cards() {
        let players = vec![SquadPlayer {
            name: "Martin Ødegaard".into(),
            age: Some(25),
            number: Some(8),
            position: Some("Midfielder".into()),
            photo: None,
        }];
        let html = render(&players);
        assert!(html.contains(r#"<span class="player-number">8</span>"#));
        assert!(html.contains("Midfielder 25 yrs"));
        assert!(render(&[]).contains(EMPTY));
    }
}
