//! Site-specific scraping for news search results.
//!
//! Each supported site gets one submodule holding its URLs, CSS selectors,
//! and the parser that turns its rendered results markup into
//! [`crate::models::ArticleCard`]s. The browser session and the pagination
//! loop stay site-agnostic; everything that would break when a site ships a
//! redesign lives here.
//!
//! # Supported Sites
//!
//! | Site | Module | Notes |
//! |------|--------|-------|
//! | Los Angeles Times | [`latimes`] | Search results rendered as `ps-promo` cards |

pub mod latimes;
