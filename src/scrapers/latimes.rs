//! Los Angeles Times search results scraper.
//!
//! The LA Times renders each search result as a `ps-promo` card carrying the
//! headline, teaser, a `data-timestamp` attribute in epoch milliseconds, and
//! the promo image. This module owns the site's selectors and turns the
//! rendered results-container markup into [`ArticleCard`]s.
//!
//! # Parsing
//!
//! Fields are bound per card: the timestamp, title, description, and image
//! are all selected *within* one card element. A card missing its timestamp
//! is skipped with a warning and cannot shift a neighbor's fields onto the
//! wrong row.

use crate::models::ArticleCard;
use chrono::DateTime;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

/// Landing page the session opens before searching.
pub const HOMEPAGE_URL: &str = "https://www.latimes.com/";

/// The magnifying-glass button that reveals the search box.
pub const SEARCH_BUTTON_CSS: &str =
    r"body > ps-header > header > div.flex.\[\@media_print\]\:hidden > button";

/// The search input, located by its `name` attribute.
pub const SEARCH_BOX_NAME: &str = "q";

/// The sort dropdown on the results page.
pub const SORT_SELECT_CSS: &str =
    "ps-search-filters div.search-results-module-sorts select";

/// Visible text of the newest-first sort option.
pub const SORT_NEWEST_LABEL: &str = "Newest";

/// Class of the element wrapping the list of result cards.
pub const RESULTS_MENU_CLASS: &str = "search-results-module-results-menu";

/// Class of the next-page control.
pub const NEXT_PAGE_CLASS: &str = "search-results-module-next-page";

/// Parse the results-container markup into cards, in page order.
///
/// Cards without a decodable `data-timestamp` are skipped: they cannot be
/// classified against the recency window. Missing title or description text
/// degrades to the empty string; a missing image leaves `image_url` unset.
#[instrument(level = "debug", skip_all)]
pub fn parse_result_cards(fragment: &str) -> Vec<ArticleCard> {
    let document = Html::parse_fragment(fragment);
    let card_selector = Selector::parse("ps-promo").unwrap();
    let timestamp_selector = Selector::parse("p.promo-timestamp").unwrap();
    let title_selector = Selector::parse("h3.promo-title").unwrap();
    let description_selector = Selector::parse("p.promo-description").unwrap();
    let image_selector = Selector::parse("div.promo-media img").unwrap();

    let mut cards = Vec::new();
    for card in document.select(&card_selector) {
        let Some(stamp) = card.select(&timestamp_selector).next() else {
            warn!("result card has no timestamp element; skipping card");
            continue;
        };
        let millis = stamp
            .value()
            .attr("data-timestamp")
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        let Some(millis) = millis else {
            warn!("result card timestamp is not epoch milliseconds; skipping card");
            continue;
        };
        let Some(published_at) = DateTime::from_timestamp_millis(millis) else {
            warn!(millis, "result card timestamp is out of range; skipping card");
            continue;
        };

        let title = card
            .select(&title_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let description = card
            .select(&description_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let image_url = card
            .select(&image_selector)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(absolute_image_url);

        cards.push(ArticleCard {
            title,
            description,
            published_label: element_text(stamp),
            published_at,
            image_url,
        });
    }

    debug!(count = cards.len(), "Parsed result cards");
    cards
}

/// Collect an element's text nodes into one whitespace-normalized string.
///
/// Search results highlight the query inside the headline, splitting it
/// across text nodes, so the pieces are rejoined with single spaces.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an image `src` to an absolute URL against the site base.
fn absolute_image_url(src: &str) -> Option<String> {
    match Url::parse(src) {
        Ok(url) => Some(url.to_string()),
        Err(_) => Url::parse(HOMEPAGE_URL)
            .ok()?
            .join(src)
            .ok()
            .map(|url| url.to_string()),
    }
}
