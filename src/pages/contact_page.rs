use std::time::Duration;

use log::{error, info, warn};

use crate::error::WebDriverResult;
use crate::locator::Locator;
use crate::pages::{BasePage, PageActions, DEFAULT_BASE_URL};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// Contact form section.
#[derive(Debug, Clone)]
pub struct ContactPage<'a> {
    page: BasePage<'a>,
    url: String,
}

impl<'a> ContactPage<'a> {
    pub const INPUT_NAME: Locator = Locator::name("name");
    pub const INPUT_EMAIL: Locator = Locator::name("email");
    pub const INPUT_MESSAGE: Locator = Locator::name("message");
    pub const SEND_BTN: Locator = Locator::xpath("//button[contains(text(), 'Enviar')]");
    pub const CONFIRMATION: Locator = Locator::css(".alert-success, .success-message");
    pub const ERROR: Locator = Locator::css(".alert-danger, .error-message");

    const FIELDS: [Locator; 3] = [Self::INPUT_NAME, Self::INPUT_EMAIL, Self::INPUT_MESSAGE];

    pub fn new<D>(driver: &'a D) -> Self
    where
        D: WebDriverCommands + ?Sized,
    {
        Self::with_url(driver, DEFAULT_BASE_URL)
    }

    pub fn with_url<D>(driver: &'a D, url: &str) -> Self
    where
        D: WebDriverCommands + ?Sized,
    {
        ContactPage {
            page: BasePage::new(driver),
            url: url.to_string(),
        }
    }

    pub fn load(&self) -> WebDriverResult<()> {
        self.open(&self.url)
    }

    pub fn fill_form(&self, name: &str, email: &str, message: &str) -> WebDriverResult<()> {
        info!("Filling contact form: name={}, email={}", name, email);
        let result = self
            .type_text(&Self::INPUT_NAME, name)
            .and_then(|_| self.type_text(&Self::INPUT_EMAIL, email))
            .and_then(|_| self.type_text(&Self::INPUT_MESSAGE, message));
        if let Err(e) = &result {
            error!("Could not fill contact form: {}", e);
        }
        result
    }

    pub fn submit(&self) -> WebDriverResult<()> {
        info!("Submitting contact form");
        self.click(&Self::SEND_BTN)
    }

    /// True if any of the three fields is empty. Lookups do not wait;
    /// a field that cannot be read makes the whole check false.
    pub fn fields_empty(&self) -> bool {
        let mut any_empty = false;
        for locator in Self::FIELDS.iter() {
            let value = self
                .session()
                .find_element(locator)
                .and_then(|elem| elem.get_attribute("value"));
            match value {
                Ok(v) => any_empty |= v.map_or(true, |s| s.is_empty()),
                Err(e) => {
                    error!("Could not read {}: {}", locator, e);
                    return false;
                }
            }
        }
        info!("Empty fields: {}", any_empty);
        any_empty
    }

    pub fn confirmation_message(&self) -> Option<String> {
        self.message(&Self::CONFIRMATION, "confirmation")
    }

    pub fn error_message(&self) -> Option<String> {
        self.message(&Self::ERROR, "error")
    }

    fn message(&self, locator: &Locator, kind: &str) -> Option<String> {
        match self.read_text(locator) {
            Ok(text) => {
                info!("Contact {} message: {}", kind, text);
                Some(text)
            }
            Err(_) => {
                warn!("No contact {} message shown", kind);
                None
            }
        }
    }

    /// True when the send button exists and is disabled.
    pub fn is_submit_blocked(&self) -> bool {
        let enabled = self
            .session()
            .find_element(&Self::SEND_BTN)
            .and_then(|btn| btn.is_enabled());
        match enabled {
            Ok(enabled) => {
                info!("Send button disabled: {}", !enabled);
                !enabled
            }
            Err(e) => {
                error!("Could not check send button: {}", e);
                false
            }
        }
    }
}

impl PageActions for ContactPage<'_> {
    fn session(&self) -> &WebDriverSession {
        self.page.session()
    }

    fn timeout(&self) -> Duration {
        self.page.timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mockdriver_sync::{MockDriverSync, MockElement, MockHandle, MockPage};
    use crate::query::ElementPoller;
    use crate::{DesiredCapabilities, GenericWebDriver};

    const CONTACT: &str = "http://talento.test/#contacto";
    const SENT: &str = "http://talento.test/enviado";

    fn driver(blocked: bool) -> (GenericWebDriver<MockDriverSync>, MockHandle) {
        let mut send = MockElement::new("button")
            .matching(&ContactPage::SEND_BTN)
            .text("Enviar")
            .navigates_to(SENT);
        if blocked {
            send = send.disabled();
        }
        let mock = MockDriverSync::new()
            .with_page(
                MockPage::new(CONTACT)
                    .element(MockElement::new("input").matching(&ContactPage::INPUT_NAME))
                    .element(MockElement::new("input").matching(&ContactPage::INPUT_EMAIL))
                    .element(MockElement::new("textarea").matching(&ContactPage::INPUT_MESSAGE))
                    .element(send),
            )
            .with_page(MockPage::new(SENT).element(
                MockElement::new("div")
                    .matching(&ContactPage::CONFIRMATION)
                    .text("Mensaje enviado"),
            ));
        let handle = mock.handle();
        let mut driver =
            GenericWebDriver::from_connection(mock, DesiredCapabilities::chrome()).unwrap();
        driver.set_query_poller(ElementPoller::TimeoutWithInterval(
            Duration::from_millis(100),
            Duration::from_millis(20),
        ));
        (driver, handle)
    }

    #[test]
    fn fields_empty_until_all_filled() {
        let (driver, handle) = driver(false);
        let page = ContactPage::with_url(&driver, CONTACT);
        page.load().unwrap();
        assert!(page.fields_empty());

        page.fill_form("Ana", "", "Hola").unwrap();
        assert!(page.fields_empty());

        page.fill_form("Ana", "ana@test.com", "Hola").unwrap();
        assert!(!page.fields_empty());
        assert_eq!(handle.value_of(&ContactPage::INPUT_MESSAGE).as_deref(), Some("Hola"));
    }

    #[test]
    fn submit_shows_confirmation() {
        let (driver, _) = driver(false);
        let page = ContactPage::with_url(&driver, CONTACT);
        page.load().unwrap();
        assert!(!page.is_submit_blocked());
        page.fill_form("Ana", "ana@test.com", "Hola").unwrap();
        page.submit().unwrap();
        assert_eq!(page.confirmation_message().as_deref(), Some("Mensaje enviado"));
        assert_eq!(page.error_message(), None);
    }

    #[test]
    fn blocked_button_detected() {
        let (driver, _) = driver(true);
        let page = ContactPage::with_url(&driver, CONTACT);
        page.load().unwrap();
        assert!(page.is_submit_blocked());
    }

    #[test]
    fn checks_are_false_off_page() {
        let (driver, _) = driver(false);
        let page = ContactPage::with_url(&driver, CONTACT);
        assert!(!page.fields_empty());
        assert!(!page.is_submit_blocked());
        assert_eq!(page.confirmation_message(), None);
    }
}
