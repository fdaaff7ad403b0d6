//! Sample chat history: search and export.

mod export;
mod models;

pub use export::{export_history, export_transcript, render_transcript};
pub use models::{ChatHistoryEntry, sample_history};

/// Entries whose title or category contains `term`, ignoring case. A blank
/// term keeps everything.
pub fn filter_history<'a>(entries: &'a [ChatHistoryEntry], term: &str) -> Vec<&'a ChatHistoryEntry> {
    let term = term.trim().to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            term.is_empty()
                || entry.title.to_lowercase().contains(&term)
                || entry.category.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn titles<'a>(entries: &[&'a ChatHistoryEntry]) -> Vec<&'a str> {
        entries.iter().map(|entry| entry.title.as_str()).collect()
    }

    #[test]
    fn matches_title_or_category_case_insensitively() {
        let history = sample_history(Utc::now());

        assert_eq!(
            titles(&filter_history(&history, "DINING")),
            ["Campus Dining Options"]
        );
        assert_eq!(
            titles(&filter_history(&history, "academic")),
            ["Course Registration for Spring 2024"]
        );
    }

    #[test]
    fn blank_term_keeps_order() {
        let history = sample_history(Utc::now());
        let all = filter_history(&history, "  ");
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].id, "1");
        assert_eq!(all[4].id, "5");
    }

    #[test]
    fn no_match_is_empty() {
        let history = sample_history(Utc::now());
        assert!(filter_history(&history, "quantum").is_empty());
    }

    #[test]
    fn samples_are_aged_from_now() {
        let now = Utc::now();
        let history = sample_history(now);
        assert_eq!(now - history[0].timestamp, chrono::Duration::minutes(30));
        assert!(history.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }
}
