use std::fmt::Write;

use crate::model::NewsItem;

use super::{escape, message, Tint, PLACEHOLDER_LOGO};

pub const LOADING: &str = "Loading News...";

pub fn image_url(item: &NewsItem) -> &str {
    item.image
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(PLACEHOLDER_LOGO)
}

/// News grid. The image swaps itself for the placeholder if the primary URL
/// fails to load in the browser.
pub fn render(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return message(LOADING, Tint::Neutral);
    }
    let mut html = String::new();
    for item in items {
        let date = item
            .date
            .as_deref()
            .map(|d| format!(r#"<small class="news-date">📅 {}</small>"#, escape(d)))
            .unwrap_or_default();
        let content = item
            .content
            .as_deref()
            .map(|c| format!(r#"<p class="news-content clamp-3">{}</p>"#, escape(c)))
            .unwrap_or_default();
        let link = item
            .link
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|l| {
                format!(
                    r#"<a class="news-link" href="{}" target="_blank" rel="noopener">Read Full Story</a>"#,
                    escape(l)
                )
            })
            .unwrap_or_default();
        let _ = write!(
            html,
            concat!(
                r#"<div class="card news-card">"#,
                r#"<div class="news-image"><img src="{src}" onerror="this.onerror=null;this.src='{fallback}'" alt=""></div>"#,
                r#"<div class="news-body"><h3 class="news-title clamp-2">{title}</h3>{date}{content}{link}</div>"#,
                "</div>",
            ),
            src = escape(image_url(item)),
            fallback = PLACEHOLDER_LOGO,
            title = escape(&item.title),
            date = date,
            content = content,
            link = link,
        );
    }
    html
}
