//! # Awful News Clipper
//!
//! Drives a real browser through a news site's search results, clips every
//! article published inside the recency window, downloads each article's
//! promo image, and exports the haul to a spreadsheet.
//!
//! ## Features
//!
//! - Searches the Los Angeles Times for a phrase supplied by a work item,
//!   the command line, or a built-in default
//! - Sorts results newest-first and walks result pages until the first
//!   stale article ends the run
//! - Counts exact search-phrase occurrences in each title and description
//!   and flags dollar-amount mentions
//! - Downloads promo images best-effort; a failed download never costs a row
//! - Writes a 1-indexed `news_scrape.xlsx` report, overwritten each run
//!
//! ## Usage
//!
//! ```sh
//! awful_news_clipper -o ./output -s "wildfires"
//! ```
//!
//! A WebDriver server (e.g. chromedriver) must be reachable at
//! `--webdriver-url`.
//!
//! ## Architecture
//!
//! The run is one sequential pipeline:
//! 1. **Resolve**: pick the search phrase (flag, work item, default)
//! 2. **Prepare**: verify the output directory, wipe and recreate the image
//!    directory
//! 3. **Clip**: search, sort newest, then extract page after page until the
//!    recency window or the pagination runs out
//! 4. **Report**: serialize every collected row to the spreadsheet

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use thirtyfour::error::WebDriverError;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod browser;
mod cli;
mod errors;
mod images;
mod models;
mod outputs;
mod scrapers;
mod utils;
mod workitem;

use browser::SearchSession;
use cli::Cli;
use errors::ScrapeError;
use images::ImageStore;
use models::{ArticleCard, PageScan, ResultRow};
use scrapers::latimes;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("awful_news_clipper starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, ?args.webdriver_url, "Parsed CLI arguments");

    let phrase = workitem::resolve_search_phrase(
        args.search_phrase.as_deref(),
        args.work_item.as_deref().map(Path::new),
    );

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let images_dir = Path::new(&args.output_dir).join("images");
    let images = match ImageStore::reset(&images_dir).await {
        Ok(store) => store,
        Err(e) => {
            error!(path = %images_dir.display(), error = %e, "Could not reset the image directory");
            return Err(e.into());
        }
    };

    let session = match SearchSession::open(&args.webdriver_url).await {
        Ok(session) => session,
        Err(e) => {
            error!(
                error = %e,
                url = %args.webdriver_url,
                "Could not open a browser session; is the WebDriver server running?"
            );
            return Ok(());
        }
    };

    // The session handle is scoped to this run: whatever the outcome below,
    // quit it before acting on the result.
    let outcome = run_search(&session, &phrase, &images, args.max_age_days).await;
    if let Err(e) = session.quit().await {
        warn!(error = %e, "Browser session did not shut down cleanly");
    }

    let rows = match outcome {
        Ok(rows) => rows,
        Err(e @ ScrapeError::NoResults { .. }) => {
            error!(error = %e, "Search produced nothing to clip; no report written");
            return Ok(());
        }
        Err(ScrapeError::Session(e)) => {
            error!(
                error = %e,
                "Browser session failed; check your connection to the site and the WebDriver server"
            );
            return Ok(());
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            return Ok(());
        }
    };

    let report_path = Path::new(&args.output_dir).join(outputs::xlsx::REPORT_FILENAME);
    if let Err(e) = outputs::xlsx::write_report(&rows, &report_path) {
        error!(
            error = %e,
            "Could not write the report; close the spreadsheet if it is open in another program"
        );
        return Ok(());
    }

    let elapsed = start_time.elapsed();
    info!(
        rows = rows.len(),
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}

/// Search, sort newest-first, then clip page after page.
///
/// Ends when the extractor reports the recency window exhausted, when the
/// next-page control is gone, or when a click on it is intercepted. Rows
/// collected before a graceful stop are returned for reporting.
#[instrument(level = "info", skip_all, fields(%phrase))]
async fn run_search(
    session: &SearchSession,
    phrase: &str,
    images: &ImageStore,
    max_age_days: i64,
) -> Result<Vec<ResultRow>, ScrapeError> {
    // A missing search control or results container means the phrase
    // matched nothing; anything else is a real session failure.
    let missing_means_no_results = |e: WebDriverError| -> ScrapeError {
        if browser::is_element_missing(&e) {
            ScrapeError::NoResults {
                phrase: phrase.to_string(),
            }
        } else {
            ScrapeError::Session(e)
        }
    };

    session
        .search(phrase)
        .await
        .map_err(&missing_means_no_results)?;
    session
        .sort_newest()
        .await
        .map_err(&missing_means_no_results)?;

    let (mut rows, mut stopped) = clip_current_page(session, phrase, images, max_age_days)
        .await
        .map_err(&missing_means_no_results)?;

    while !stopped {
        match session.next_page().await {
            Ok(()) => {}
            Err(e) if browser::is_click_intercepted(&e) => {
                warn!(
                    error = %e,
                    "Click intercepted on the next-page control; ending pagination"
                );
                break;
            }
            Err(e) if browser::is_element_missing(&e) => {
                info!("No further results page");
                break;
            }
            Err(e) => return Err(e.into()),
        }

        let (page_rows, page_stopped) =
            clip_current_page(session, phrase, images, max_age_days).await?;
        rows.extend(page_rows);
        stopped = page_stopped;
    }

    if stopped {
        info!("done");
    }
    Ok(rows)
}

/// Extract the currently loaded results page into finished rows.
///
/// Returns the rows and whether the recency scan stopped the run.
async fn clip_current_page(
    session: &SearchSession,
    phrase: &str,
    images: &ImageStore,
    max_age_days: i64,
) -> Result<(Vec<ResultRow>, bool), WebDriverError> {
    let markup = session.results_markup().await?;
    debug!(preview = %truncate_for_log(&markup, 300), "Results container markup");

    let cards = latimes::parse_result_cards(&markup);
    let scan = PageScan::scan(cards, Utc::now(), max_age_days);
    let stopped = scan.is_stopped();
    info!(
        kept = scan.cards().len(),
        stopped, "Scanned page against the recency window"
    );

    let mut rows = Vec::with_capacity(scan.cards().len());
    for card in scan.cards() {
        rows.push(build_row(card, phrase, images).await);
    }
    Ok((rows, stopped))
}

/// Pick an image target, download best-effort, and finish the row.
async fn build_row(card: &ArticleCard, phrase: &str, images: &ImageStore) -> ResultRow {
    let target = images.target_path();
    match card.image_url.as_deref() {
        Some(url) => images.download(url, &target).await,
        None => warn!(title = %card.title, "Card has no image source; row keeps the unused target path"),
    }
    ResultRow::from_card(card, phrase, target.display().to_string())
}
