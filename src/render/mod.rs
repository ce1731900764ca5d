//! Pure payload → markup functions.
//!
//! Renderers never touch the network or the document. Presentation lives in
//! the stylesheet: markup only carries semantic classes (`Tint`) and
//! `data-*` hooks, never inline colours. Output is a deterministic function of
//! the input so re-rendering the same payload yields the same fragment.

pub mod admin;
pub mod detail;
pub mod fixtures;
pub mod live;
pub mod news;
pub mod squad;
pub mod standings;

use chrono::{DateTime, Utc};

pub const PLACEHOLDER_LOGO: &str =
    "https://upload.wikimedia.org/wikipedia/en/f/f2/Premier_League_Logo.svg";

/// Semantic colour of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Win,
    Loss,
    Neutral,
    Live,
    Finished,
}

impl Tint {
    pub fn class(self) -> &'static str {
        match self {
            Tint::Win => "tint-win",
            Tint::Loss => "tint-loss",
            Tint::Neutral => "tint-neutral",
            Tint::Live => "tint-live",
            Tint::Finished => "tint-finished",
        }
    }
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Short calendar date, always UTC so output does not depend on the host.
pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// A single centred status line, used for empty and error states.
pub fn message(text: &str, tint: Tint) -> String {
    format!(
        r#"<p class="placeholder {}">{}</p>"#,
        tint.class(),
        escape(text)
    )
}

pub fn loading() -> String {
    message("Loading...", Tint::Neutral)
}

fn logo(url: Option<&str>) -> String {
    let src = url.filter(|u| !u.is_empty()).unwrap_or(PLACEHOLDER_LOGO);
    format!(r#"<img class="team-logo" src="{}" alt="" width="25">"#, escape(src))
}
