//! Command-line interface definitions for Awful News Clipper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Arguments with an env fallback can also be provided through the
//! environment, which is how container and RPA-style deployments usually
//! supply them.

use clap::Parser;

/// Command-line arguments for the Awful News Clipper application.
///
/// # Examples
///
/// ```sh
/// # Basic usage; search phrase comes from the default
/// awful_news_clipper -o ./output
///
/// # Against a remote chromedriver with a work item supplying the phrase
/// awful_news_clipper -o ./output -w http://chrome:9515 --work-item item.json
///
/// # Explicit phrase override
/// awful_news_clipper -o ./output -s "wildfires"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory receiving the spreadsheet report and the images subdirectory
    #[arg(short, long, default_value = "output")]
    pub output_dir: String,

    /// WebDriver server to drive the browser through
    #[arg(short, long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Path to a work-item JSON file whose payload supplies `search_phrase`
    #[arg(long, env = "WORK_ITEM_PATH")]
    pub work_item: Option<String>,

    /// Search phrase; overrides the work item payload
    #[arg(short, long)]
    pub search_phrase: Option<String>,

    /// Articles this many whole days old (or older) end the run
    #[arg(long, default_value_t = 5)]
    pub max_age_days: i64,
}
