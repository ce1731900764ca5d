use std::fmt::Write;

use crate::model::StandingRow;

use super::{escape, logo, message, Tint};

pub fn form_tint(result: char) -> Tint {
    match result {
        'W' => Tint::Win,
        'L' => Tint::Loss,
        _ => Tint::Neutral,
    }
}

/// One badge per character of the form string.
pub fn form_badges(form: &str) -> String {
    form.chars()
        .map(|c| {
            format!(
                r#"<span class="form-badge {}">{}</span>"#,
                form_tint(c).class(),
                escape(&c.to_string())
            )
        })
        .collect()
}

fn goal_difference(diff: i32) -> (String, Tint) {
    match diff {
        d if d > 0 => (format!("+{d}"), Tint::Win),
        d if d < 0 => (d.to_string(), Tint::Loss),
        _ => ("0".to_string(), Tint::Neutral),
    }
}

pub const EMPTY: &str = "No standings available.";

const COLUMNS: usize = 9;

/// A status line spanning the whole table.
pub fn message_row(text: &str, tint: Tint) -> String {
    format!(
        r#"<tr><td colspan="{COLUMNS}">{}</td></tr>"#,
        message(text, tint)
    )
}

/// Table body rows. Clicking a row opens the team page.
pub fn render(rows: &[StandingRow]) -> String {
    if rows.is_empty() {
        return message_row(EMPTY, Tint::Neutral);
    }
    let mut html = String::new();
    for row in rows {
        let href = row
            .team
            .id
            .map(|id| {
                format!(r#" data-href="/team/{id}" onclick="window.location.href='/team/{id}'""#)
            })
            .unwrap_or_default();
        let (gd, gd_tint) = goal_difference(row.goals_diff);
        let _ = write!(
            html,
            concat!(
                r#"<tr class="standings-row"{href}>"#,
                r#"<td class="rank">{rank}</td>"#,
                r#"<td><div class="team-cell">{logo}<span>{name}</span></div></td>"#,
                "<td>{played}</td><td>{win}</td><td>{draw}</td><td>{lose}</td>",
                r#"<td class="{gd_tint}">{gd}</td>"#,
                r#"<td class="points-cell">{points}</td>"#,
                r#"<td class="form-cell">{form}</td>"#,
                "</tr>",
            ),
            href = href,
            rank = row.rank,
            logo = logo(row.team.logo.as_deref()),
            name = escape(&row.team.name),
            played = row.all.played,
            win = row.all.win,
            draw = row.all.draw,
            lose = row.all.lose,
            gd_tint = gd_tint.class(),
            gd = gd,
            points = row.points,
            form = form_badges(row.form.as_deref().unwrap_or("")),
        );
    }
    html
}
