//! Data models for search result cards and extracted report rows.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`ArticleCard`]: one result card parsed from the search results markup,
//!   with its title, description, timestamp, and image source bound together
//!   at parse time
//! - [`PageScan`]: the outcome of scanning one page of cards against the
//!   recency window
//! - [`ResultRow`]: one finished spreadsheet row, including the derived
//!   phrase counts and money flag
//!
//! The derived fields are computed by [`phrase_token_count`] and
//! [`mentions_money`], which live here because they define what a row means,
//! not how a page is fetched.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a dollar sign, digits, an adjacent word, and an optional currency
/// word, e.g. `$4 million`, `$100 USD`. A presence test only; no amount is
/// extracted.
static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\$)(\d+)\s?(\b\w+\b)\s?(dollar|dollars|USD)?")
        .expect("money pattern is valid")
});

/// One article card as rendered on a search results page.
///
/// All fields for a card come from the same card element, so a page where
/// some cards lack an image cannot shift another card's fields onto the
/// wrong row.
#[derive(Debug, Clone)]
pub struct ArticleCard {
    /// The headline text, trimmed.
    pub title: String,
    /// The teaser/description text, trimmed.
    pub description: String,
    /// The human-readable timestamp exactly as displayed (not normalized).
    pub published_label: String,
    /// Publication time decoded from the card's epoch-millisecond attribute.
    pub published_at: DateTime<Utc>,
    /// Absolute URL of the card's image, when the card has one.
    pub image_url: Option<String>,
}

/// Outcome of scanning one page of cards against the recency window.
///
/// Results are sorted newest-first, so the first stale card means everything
/// after it is stale too. Scanning is therefore a two-state machine: it
/// collects until it sees one stale card, then stops for good.
#[derive(Debug)]
pub enum PageScan {
    /// Every card on the page was inside the recency window.
    Collected(Vec<ArticleCard>),
    /// A stale card ended the scan. Holds only the cards collected before
    /// it; the stale card and everything after it are discarded, and the
    /// run is finished.
    Stopped(Vec<ArticleCard>),
}

impl PageScan {
    /// Scan `cards` in page order, keeping each card younger than
    /// `max_age_days` whole days at `now`.
    ///
    /// The first card at or past the cutoff switches the scan to
    /// [`PageScan::Stopped`] unconditionally; a fresher card after it is
    /// not collected.
    pub fn scan(cards: Vec<ArticleCard>, now: DateTime<Utc>, max_age_days: i64) -> PageScan {
        let mut fresh = Vec::new();
        for card in cards {
            let age_days = now.signed_duration_since(card.published_at).num_days();
            if age_days >= max_age_days {
                return PageScan::Stopped(fresh);
            }
            fresh.push(card);
        }
        PageScan::Collected(fresh)
    }

    /// The cards kept by the scan, in page order.
    pub fn cards(&self) -> &[ArticleCard] {
        match self {
            PageScan::Collected(cards) | PageScan::Stopped(cards) => cards,
        }
    }

    /// Whether the scan hit a stale card and ended the run.
    pub fn is_stopped(&self) -> bool {
        matches!(self, PageScan::Stopped(_))
    }
}

/// One finished spreadsheet row.
///
/// Rows are immutable once built and are only ever appended to the report
/// table. `image_path` is the path the download *targeted*; when the
/// download failed the file will not exist, but the row keeps the path.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub title: String,
    pub description: String,
    pub published_label: String,
    pub image_path: String,
    pub title_phrase_count: u32,
    pub description_phrase_count: u32,
    pub contains_money: bool,
}

impl ResultRow {
    /// Build a row from a parsed card, computing the derived fields.
    pub fn from_card(card: &ArticleCard, phrase: &str, image_path: String) -> ResultRow {
        ResultRow {
            title: card.title.clone(),
            description: card.description.clone(),
            published_label: card.published_label.clone(),
            image_path,
            title_phrase_count: phrase_token_count(&card.title, phrase),
            description_phrase_count: phrase_token_count(&card.description, phrase),
            contains_money: mentions_money(&card.title, &card.description),
        }
    }
}

/// Count whitespace-delimited tokens of `text` exactly equal to `phrase`.
///
/// Case-sensitive, full-token matches only: phrase `"cat"` never counts the
/// token `"category"`. Returns 0 immediately when the phrase does not occur
/// in `text` even as a substring.
pub fn phrase_token_count(text: &str, phrase: &str) -> u32 {
    if !text.contains(phrase) {
        return 0;
    }
    text.split_whitespace().filter(|token| *token == phrase).count() as u32
}

/// Whether the title or description mentions a dollar amount.
pub fn mentions_money(title: &str, description: &str) -> bool {
    MONEY_PATTERN.is_match(title) || MONEY_PATTERN.is_match(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn card_aged(days: i64, now: DateTime<Utc>) -> ArticleCard {
        ArticleCard {
            title: format!("Card aged {days} days"),
            description: "A description".to_string(),
            published_label: "Aug. 1, 2026".to_string(),
            published_at: now - Duration::days(days),
            image_url: None,
        }
    }

    #[test]
    fn test_phrase_count_exact_tokens_only() {
        assert_eq!(phrase_token_count("the cat sat on the cat mat", "cat"), 2);
        assert_eq!(phrase_token_count("a category of catalogs", "cat"), 0);
        assert_eq!(phrase_token_count("cat", "cat"), 1);
    }

    #[test]
    fn test_phrase_count_non_matching_phrase() {
        assert_eq!(phrase_token_count("nothing to see here", "food"), 0);
        assert_eq!(phrase_token_count("", "food"), 0);
    }

    #[test]
    fn test_phrase_count_is_case_sensitive() {
        assert_eq!(phrase_token_count("Food prices rose again", "food"), 0);
        assert_eq!(phrase_token_count("food prices rose again", "food"), 1);
    }

    #[test]
    fn test_mentions_money_dollar_amounts() {
        assert!(mentions_money("Budget cut by $100 million", ""));
        assert!(mentions_money("", "They paid $5 dollars for it"));
        assert!(mentions_money("A $30 USD fee", ""));
    }

    #[test]
    fn test_mentions_money_requires_dollar_sign() {
        assert!(!mentions_money("100 million reasons", "fifty dollars"));
        assert!(!mentions_money("", ""));
    }

    #[test]
    fn test_mentions_money_either_field() {
        assert!(mentions_money("no money here", "raised $12 million in a week"));
        assert!(!mentions_money("no money here", "none there either"));
    }

    #[test]
    fn test_scan_all_fresh() {
        let now = Utc::now();
        let cards = vec![card_aged(1, now), card_aged(2, now)];
        let scan = PageScan::scan(cards, now, 5);
        assert!(!scan.is_stopped());
        assert_eq!(scan.cards().len(), 2);
    }

    #[test]
    fn test_scan_stops_at_first_stale_card() {
        // Ages [1, 2, 6, 3]: rows for 1 and 2 only. The age-3 card after the
        // stale one must not be collected.
        let now = Utc::now();
        let cards = vec![
            card_aged(1, now),
            card_aged(2, now),
            card_aged(6, now),
            card_aged(3, now),
        ];
        let scan = PageScan::scan(cards, now, 5);
        assert!(scan.is_stopped());
        let titles: Vec<&str> = scan.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Card aged 1 days", "Card aged 2 days"]);
    }

    #[test]
    fn test_scan_cutoff_is_inclusive() {
        let now = Utc::now();
        let scan = PageScan::scan(vec![card_aged(5, now)], now, 5);
        assert!(scan.is_stopped());
        assert!(scan.cards().is_empty());
    }

    #[test]
    fn test_scan_partial_days_are_fresh() {
        let now = Utc::now();
        let almost_five = ArticleCard {
            published_at: now - Duration::days(5) + Duration::hours(1),
            ..card_aged(0, now)
        };
        let scan = PageScan::scan(vec![almost_five], now, 5);
        assert!(!scan.is_stopped());
        assert_eq!(scan.cards().len(), 1);
    }

    #[test]
    fn test_scan_empty_page() {
        let scan = PageScan::scan(Vec::new(), Utc::now(), 5);
        assert!(!scan.is_stopped());
        assert!(scan.cards().is_empty());
    }

    #[test]
    fn test_row_from_card_derives_fields() {
        let now = Utc::now();
        let card = ArticleCard {
            title: "food trucks serve food downtown".to_string(),
            description: "A $3 taco draws a crowd of food lovers".to_string(),
            published_label: "Aug. 5, 2026".to_string(),
            published_at: now,
            image_url: Some("https://example.com/taco.jpg".to_string()),
        };
        let row = ResultRow::from_card(&card, "food", "output/images/abc123defg.jpg".to_string());

        assert_eq!(row.title_phrase_count, 2);
        assert_eq!(row.description_phrase_count, 1);
        assert!(row.contains_money);
        assert_eq!(row.published_label, "Aug. 5, 2026");
        assert_eq!(row.image_path, "output/images/abc123defg.jpg");
    }
}
