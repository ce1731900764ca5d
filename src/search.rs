use crate::model::Fixture;
use crate::page::Card;
use crate::render::{fixtures, live, short_date};

/// Case-insensitive containment; an empty term matches everything.
/// `term` is expected to be lowercased already.
pub fn matches(text: &str, term: &str) -> bool {
    term.is_empty() || text.to_lowercase().contains(term)
}

fn card(f: &Fixture, status: String, score: String) -> Card {
    Card {
        fixture_id: f.id(),
        text: format!(
            "{} {} {} {} {}",
            short_date(&f.kickoff()),
            status,
            f.teams.home.name,
            score,
            f.teams.away.name
        ),
    }
}

pub fn fixture_cards(list: &[Fixture]) -> Vec<Card> {
    fixtures::newest_first(list)
        .into_iter()
        .map(|f| card(f, f.status_code().to_string(), fixtures::score_text(&f.goals)))
        .collect()
}

pub fn live_cards(list: &[Fixture]) -> Vec<Card> {
    list.iter()
        .map(|f| {
            let score = format!(
                "{} - {}",
                f.goals.home.unwrap_or(0),
                f.goals.away.unwrap_or(0)
            );
            card(f, live::status_label(f), score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Document, Slot};
    use serde_json::json;

    fn fixture(id: u64, home: &str, away: &str) -> Fixture {
        serde_json::from_value(json!({
            "fixture": { "id": id, "date": "2024-03-31T15:30:00+00:00", "status": { "short": "FT" } },
            "teams": { "home": { "name": home }, "away": { "name": away } },
            "goals": { "home": 0, "away": 0 }
        }))
        .expect("fixture json")
    }

    #[test]
    fn test_search_hides_non_matching_cards() {
        let list = vec![fixture(1, "Man City", "Arsenal"), fixture(2, "Brighton", "Fulham")];
        let mut doc = Document::new();
        doc.set_cards(Slot::Matches, fixture_cards(&list));

        doc.set_search("ARSENAL");
        assert!(doc.is_card_visible(1));
        assert!(!doc.is_card_visible(2));

        doc.set_search("");
        assert!(doc.hidden_cards().is_empty());
    }

    #[test]
    fn test_search_survives_rerender() {
        let mut doc = Document::new();
        doc.set_search("fulham");
        doc.set_cards(Slot::Matches, fixture_cards(&[fixture(3, "Wolves", "Luton")]));
        assert!(!doc.is_card_visible(3));
    }
}
