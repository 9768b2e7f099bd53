//! Error taxonomy for a clipping run.
//!
//! Every failure that can end a run early is folded into [`ScrapeError`] so
//! that `main` can decide, per kind, whether anything collected so far is
//! still worth reporting. Image download failures never appear here: they
//! are logged where they happen and do not end the run.

use thirtyfour::error::WebDriverError;
use thiserror::Error;

/// Failures that terminate a clipping run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The search produced no results page to extract from.
    ///
    /// Raised before the pagination loop starts, so no partial report is
    /// written for this kind.
    #[error("no search results matched {phrase:?}")]
    NoResults { phrase: String },

    /// The browser session failed underneath us: transport errors, the
    /// WebDriver server going away, or an unexpected protocol error.
    #[error("browser session error: {0}")]
    Session(#[from] WebDriverError),

    /// The spreadsheet could not be written, most often because the file is
    /// open in another program.
    #[error("could not write report to {path}: {source}")]
    Report {
        path: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}
