//! Generic page interactions shared by every page object.
//!
//! Required interactions (`find`, `click`, `type_text`, `read_text`,
//! `scroll_into_view`) fail with `WebDriverError::Timeout` when the element
//! never becomes visible. The checks (`is_visible`, `is_present`, `count`,
//! `url_contains`) never fail: a timeout or driver error is a negative answer.

use std::time::Duration;

use log::{error, info, warn};

use crate::error::{ErrorClass, WebDriverResult};
use crate::locator::Locator;
use crate::query::{conditions, SessionWaitable};
use crate::webdrivercommands::WebDriverCommands;
use crate::{WebDriverSession, WebElement};

const FORM_FIELDS: [&str; 3] = ["input", "textarea", "select"];

pub trait PageActions {
    fn session(&self) -> &WebDriverSession;

    /// Timeout for required interactions.
    fn timeout(&self) -> Duration {
        self.session().wait_timeout()
    }

    fn open(&self, url: &str) -> WebDriverResult<()> {
        info!("Navigating to: {}", url);
        self.session().get(url)
    }

    /// Wait until `locator` is visible and return it.
    fn find(&self, locator: &Locator) -> WebDriverResult<WebElement<'_>> {
        let outcome = self
            .session()
            .wait_until()
            .timeout(self.timeout())
            .desc(format!("visibility of {}", locator))
            .until(conditions::visibility_of(locator));

        match outcome.and_then(|o| o.required()) {
            Ok(elem) => {
                info!("Element found: {}", locator);
                Ok(elem)
            }
            Err(e) if e.is_timeout() => {
                error!("Timed out looking for element {}: {}", locator, e);
                Err(e)
            }
            Err(e) => {
                error!("Lookup of element {} failed: {}", locator, e);
                Err(e)
            }
        }
    }

    /// Wait until `locator` is in the DOM, visible or not.
    fn find_present(&self, locator: &Locator) -> WebDriverResult<WebElement<'_>> {
        let elem = self
            .session()
            .wait_until()
            .timeout(self.timeout())
            .desc(format!("presence of {}", locator))
            .until(conditions::presence_of(locator))?
            .required()?;
        info!("Element present: {}", locator);
        Ok(elem)
    }

    fn click(&self, locator: &Locator) -> WebDriverResult<()> {
        self.find(locator)?.click()?;
        info!("Clicked: {}", locator);
        Ok(())
    }

    /// Clear the field, then type `text` into it. Empty text leaves it empty.
    fn type_text(&self, locator: &Locator, text: &str) -> WebDriverResult<()> {
        let elem = self.find(locator)?;
        elem.clear()?;
        if !text.is_empty() {
            elem.send_keys(text)?;
        }
        info!("Typed '{}' into: {}", text, locator);
        Ok(())
    }

    /// Rendered text of the element. Form fields report their current value.
    fn read_text(&self, locator: &Locator) -> WebDriverResult<String> {
        let elem = self.find(locator)?;
        let mut text = elem.text()?;
        if text.is_empty() && FORM_FIELDS.contains(&elem.tag_name()?.to_lowercase().as_str()) {
            text = elem.value()?.unwrap_or_default();
        }
        info!("Text read from {}: {}", locator, text);
        Ok(text)
    }

    fn is_visible(&self, locator: &Locator, timeout: Duration) -> bool {
        let outcome = self
            .session()
            .wait_until()
            .timeout(timeout)
            .desc(format!("visibility of {}", locator))
            .until(conditions::visibility_of(locator));

        match outcome {
            Ok(o) => o.is_ready(),
            Err(e) => {
                warn!("Visibility check for {} failed: {}", locator, e);
                false
            }
        }
    }

    /// Single DOM lookup, no waiting.
    fn is_present(&self, locator: &Locator) -> bool {
        match self.session().find_element(locator) {
            Ok(_) => true,
            Err(e) if e.is_transient() => false,
            Err(e) => {
                warn!("Presence check for {} failed: {}", locator, e);
                false
            }
        }
    }

    /// Number of elements currently matching `locator`, no waiting.
    fn count(&self, locator: &Locator) -> usize {
        match self.session().find_elements(locator) {
            Ok(elems) => elems.len(),
            Err(e) => {
                error!("Failed to count {}: {}", locator, e);
                0
            }
        }
    }

    fn scroll_into_view(&self, locator: &Locator) -> WebDriverResult<()> {
        self.find(locator)?.scroll_into_view()?;
        info!("Scrolled to: {}", locator);
        Ok(())
    }

    fn current_url(&self) -> WebDriverResult<String> {
        let url = self.session().current_url()?;
        info!("Current URL: {}", url);
        Ok(url)
    }

    fn url_contains(&self, text: &str, timeout: Duration) -> bool {
        let outcome = self
            .session()
            .wait_until()
            .timeout(timeout)
            .desc(format!("URL containing '{}'", text))
            .until(conditions::url_contains(text));

        match outcome {
            Ok(o) => o.is_ready(),
            Err(e) => {
                warn!("URL check for '{}' failed: {}", text, e);
                false
            }
        }
    }
}

/// Page actions over a borrowed session, for pages without a page object.
#[derive(Debug, Clone, Copy)]
pub struct BasePage<'a> {
    session: &'a WebDriverSession,
    timeout: Option<Duration>,
}

impl<'a> BasePage<'a> {
    pub fn new<D>(driver: &'a D) -> Self
    where
        D: WebDriverCommands + ?Sized,
    {
        BasePage {
            session: driver.session(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl PageActions for BasePage<'_> {
    fn session(&self) -> &WebDriverSession {
        self.session
    }

    fn timeout(&self) -> Duration {
        match self.timeout {
            Some(t) => t,
            None => self.session.wait_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use thirtyfour::common::command::Command;

    use super::*;
    use crate::http::mockdriver_sync::{MockDriverSync, MockElement, MockHandle, MockPage};
    use crate::{DesiredCapabilities, GenericWebDriver};

    const URL: &str = "http://site/form";
    const EMAIL: Locator = Locator::name("email");
    const TITLE: Locator = Locator::css("h1");
    const LATE: Locator = Locator::id("late");
    const HIDDEN: Locator = Locator::id("hidden");
    const MISSING: Locator = Locator::id("missing");
    const SHORT: Duration = Duration::from_millis(150);

    fn setup() -> (GenericWebDriver<MockDriverSync>, MockHandle) {
        let mock = MockDriverSync::new().with_page(
            MockPage::new(URL)
                .element(MockElement::new("input").matching(&EMAIL).value("old"))
                .element(MockElement::new("h1").matching(&TITLE).text("Contacto"))
                .element(
                    MockElement::new("div")
                        .matching(&LATE)
                        .text("ready")
                        .shown_after(Duration::from_millis(60)),
                )
                .element(MockElement::new("div").matching(&HIDDEN).hidden()),
        );
        let handle = mock.handle();
        let driver = GenericWebDriver::from_connection(mock, DesiredCapabilities::chrome()).unwrap();
        driver.get(URL).unwrap();
        (driver, handle)
    }

    #[test]
    fn find_waits_for_visibility() {
        let (driver, _) = setup();
        let page = BasePage::new(&driver).with_timeout(Duration::from_secs(2));
        let elem = page.find(&LATE).unwrap();
        assert_eq!(elem.text().unwrap(), "ready");
    }

    #[test]
    fn find_times_out_not_before_deadline() {
        let (driver, _) = setup();
        let page = BasePage::new(&driver).with_timeout(SHORT);
        let start = Instant::now();
        let err = page.find(&HIDDEN).unwrap_err();
        assert!(err.is_timeout());
        assert!(start.elapsed() >= SHORT);
    }

    #[test]
    fn find_propagates_driver_errors_without_waiting() {
        let (driver, _) = setup();
        driver.cmd(Command::DeleteSession).unwrap();
        let page = BasePage::new(&driver).with_timeout(Duration::from_secs(5));
        let start = Instant::now();
        let err = page.find(&TITLE).unwrap_err();
        assert!(!err.is_timeout());
        assert!(!err.is_transient());
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn click_on_missing_element_times_out() {
        let (driver, handle) = setup();
        let page = BasePage::new(&driver).with_timeout(SHORT);
        assert!(page.click(&MISSING).unwrap_err().is_timeout());
        assert_eq!(handle.count("ElementClick"), 0);
    }

    #[test]
    fn type_replaces_field_content() {
        let (driver, handle) = setup();
        let page = BasePage::new(&driver);
        page.type_text(&EMAIL, "a@b.com").unwrap();
        assert_eq!(handle.value_of(&EMAIL).as_deref(), Some("a@b.com"));
        assert_eq!(page.read_text(&EMAIL).unwrap(), "a@b.com");

        page.type_text(&EMAIL, "").unwrap();
        assert_eq!(page.read_text(&EMAIL).unwrap(), "");
    }

    #[test]
    fn read_text_of_plain_element() {
        let (driver, _) = setup();
        assert_eq!(BasePage::new(&driver).read_text(&TITLE).unwrap(), "Contacto");
    }

    #[test]
    fn checks_convert_failures_to_false() {
        let (driver, _) = setup();
        let page = BasePage::new(&driver);
        assert!(page.is_visible(&TITLE, SHORT));
        assert!(!page.is_visible(&HIDDEN, SHORT));
        assert!(!page.is_visible(&MISSING, SHORT));
        assert!(page.is_present(&HIDDEN));
        assert_eq!(page.count(&TITLE), 1);
        assert_eq!(page.count(&MISSING), 0);
    }

    #[test]
    fn presence_check_does_not_wait() {
        let (driver, handle) = setup();
        let page = BasePage::new(&driver);
        let before = handle.count("FindElement");
        let start = Instant::now();
        assert!(!page.is_present(&MISSING));
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(handle.count("FindElement"), before + 1);
    }

    #[test]
    fn scroll_and_url() {
        let (driver, handle) = setup();
        let page = BasePage::new(&driver);
        page.scroll_into_view(&TITLE).unwrap();
        assert_eq!(handle.scroll_count(), 1);
        assert_eq!(page.current_url().unwrap(), URL);
        assert!(page.url_contains("form", SHORT));
        assert!(!page.url_contains("register", SHORT));
    }
}
