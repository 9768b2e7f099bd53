//! Output generation for the clipped results.
//!
//! # Submodules
//!
//! - [`xlsx`]: Serializes the collected [`crate::models::ResultRow`]s to the
//!   spreadsheet report
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── news_scrape.xlsx   # the report, overwritten each run
//! └── images/            # downloaded promo images, wiped each run
//!     └── <slug>.jpg
//! ```

pub mod xlsx;
