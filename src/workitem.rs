//! Keyword source: resolve the search phrase for a run.
//!
//! The phrase comes from, in order of precedence:
//! 1. the `--search-phrase` flag,
//! 2. a work-item JSON file whose payload carries a `search_phrase` key,
//! 3. the built-in default, `"food"`.
//!
//! A missing, unreadable, or malformed work item is logged and falls back
//! to the default rather than failing the run.

use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tracing::{info, warn};

/// Phrase used when neither the CLI nor the work item supplies one.
pub const DEFAULT_SEARCH_PHRASE: &str = "food";

/// The payload of an externally supplied work item.
#[derive(Debug, Deserialize)]
struct WorkItemPayload {
    search_phrase: Option<String>,
}

/// Resolve the phrase to search for.
pub fn resolve_search_phrase(override_phrase: Option<&str>, work_item: Option<&Path>) -> String {
    if let Some(phrase) = non_empty(override_phrase) {
        info!(%phrase, "Using search phrase from the command line");
        return phrase;
    }

    if let Some(path) = work_item {
        match load_work_item_phrase(path) {
            Ok(Some(phrase)) => {
                info!(%phrase, path = %path.display(), "Using search phrase from work item");
                return phrase;
            }
            Ok(None) => {
                info!(path = %path.display(), "Work item has no search_phrase; using default");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read work item; using default");
            }
        }
    }

    DEFAULT_SEARCH_PHRASE.to_string()
}

fn load_work_item_phrase(path: &Path) -> Result<Option<String>, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let payload: WorkItemPayload = serde_json::from_str(&raw)?;
    Ok(payload.search_phrase.as_deref().and_then(|p| non_empty(Some(p))))
}

fn non_empty(phrase: Option<&str>) -> Option<String> {
    phrase
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}
