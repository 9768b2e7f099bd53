//! The browser session driving the news site.
//!
//! [`SearchSession`] wraps a WebDriver connection and exposes exactly the
//! moves the run needs: open the site and search, switch the sort order to
//! newest-first, read the rendered results container, and advance to the
//! next page. The handle is passed explicitly and must be closed with
//! [`SearchSession::quit`] on every exit path; dropping it leaks the remote
//! browser session.
//!
//! All waits are bounded. The results page lazy-loads its cards, so every
//! read settles for a fixed delay and forces a reload first.

use std::time::Duration;

use thirtyfour::components::SelectElement;
use thirtyfour::error::WebDriverError;
use thirtyfour::extensions::query::{ElementQueryable, ElementWaitable};
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, Key, WebDriver};
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::scrapers::latimes;

/// Wait bound for controls that must become clickable.
const CLICKABLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Wait bound for elements that only need to be present.
const PRESENCE_TIMEOUT: Duration = Duration::from_secs(15);

/// Poll interval for all bounded waits.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Fixed settle delay before reading a results page.
const SETTLE_DELAY: Duration = Duration::from_secs(5);

/// A live browser pointed at the news site.
pub struct SearchSession {
    driver: WebDriver,
}

impl SearchSession {
    /// Connect to the WebDriver server and start a Chrome session.
    #[instrument(level = "info", skip_all, fields(%webdriver_url))]
    pub async fn open(webdriver_url: &str) -> Result<SearchSession, WebDriverError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--disable-cache")?;

        let driver = WebDriver::new(webdriver_url, caps).await?;
        driver.maximize_window().await?;
        info!("Browser session open");

        Ok(SearchSession { driver })
    }

    /// Open the homepage and submit a search for `phrase`.
    #[instrument(level = "info", skip_all, fields(%phrase))]
    pub async fn search(&self, phrase: &str) -> Result<(), WebDriverError> {
        self.driver.goto(latimes::HOMEPAGE_URL).await?;

        let search_button = self
            .driver
            .query(By::Css(latimes::SEARCH_BUTTON_CSS))
            .wait(CLICKABLE_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        search_button
            .wait_until()
            .wait(CLICKABLE_TIMEOUT, POLL_INTERVAL)
            .clickable()
            .await?;
        search_button.click().await?;

        let search_box = self
            .driver
            .query(By::Name(latimes::SEARCH_BOX_NAME))
            .wait(PRESENCE_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        search_box.send_keys(phrase).await?;
        search_box.send_keys(Key::Enter + "").await?;
        info!("Search submitted");
        Ok(())
    }

    /// Switch the results to newest-first ordering.
    #[instrument(level = "info", skip_all)]
    pub async fn sort_newest(&self) -> Result<(), WebDriverError> {
        let dropdown = self
            .driver
            .query(By::Css(latimes::SORT_SELECT_CSS))
            .wait(CLICKABLE_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        let select = SelectElement::new(&dropdown).await?;
        select.select_by_exact_text(latimes::SORT_NEWEST_LABEL).await?;
        info!(order = latimes::SORT_NEWEST_LABEL, "Sort order applied");
        Ok(())
    }

    /// Settle, force a reload, and return the results container's rendered
    /// markup as one HTML fragment.
    #[instrument(level = "debug", skip_all)]
    pub async fn results_markup(&self) -> Result<String, WebDriverError> {
        sleep(SETTLE_DELAY).await;
        self.driver.refresh().await?;

        let container = self
            .driver
            .query(By::ClassName(latimes::RESULTS_MENU_CLASS))
            .wait(PRESENCE_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        let markup = container.outer_html().await?;
        debug!(bytes = markup.len(), "Read results container");
        Ok(markup)
    }

    /// Advance to the next results page.
    pub async fn next_page(&self) -> Result<(), WebDriverError> {
        let next = self
            .driver
            .query(By::ClassName(latimes::NEXT_PAGE_CLASS))
            .wait(CLICKABLE_TIMEOUT, POLL_INTERVAL)
            .first()
            .await?;
        next.wait_until()
            .wait(CLICKABLE_TIMEOUT, POLL_INTERVAL)
            .clickable()
            .await?;
        next.click().await
    }

    /// End the remote session. Must run on every exit path.
    pub async fn quit(self) -> Result<(), WebDriverError> {
        self.driver.quit().await
    }
}

/// The click on a control was intercepted by another element.
pub fn is_click_intercepted(e: &WebDriverError) -> bool {
    matches!(e, WebDriverError::ElementClickIntercepted(_))
}

/// An element never showed up inside its bounded wait.
pub fn is_element_missing(e: &WebDriverError) -> bool {
    matches!(
        e,
        WebDriverError::NoSuchElement(_) | WebDriverError::Timeout(_)
    )
}
