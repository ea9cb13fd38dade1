use log::{error, info};

use crate::error::WebDriverResult;
use crate::locator::Locator;
use crate::pages::{BasePage, PageActions, DEFAULT_BASE_URL};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// Landing page: entry buttons, section anchors and the mobile menu.
#[derive(Debug, Clone)]
pub struct HomePage<'a> {
    page: BasePage<'a>,
    url: String,
}

impl<'a> HomePage<'a> {
    pub const BTN_REGISTER: Locator = Locator::link_text("Registrate");
    pub const BTN_UPLOAD_CV: Locator = Locator::link_text("Carga tu CV");
    pub const SERVICES_SECTION: Locator = Locator::xpath("//section[contains(@class, 'servicios')]");
    pub const CONTACT_SECTION: Locator = Locator::xpath("//section[contains(@id, 'contacto')]");
    pub const HAMBURGER_MENU: Locator = Locator::css(".navbar-toggler");

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
        HomePage {
            page: BasePage::new(driver),
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn load(&self) -> WebDriverResult<()> {
        self.open(&self.url)?;
        info!("Home page loaded");
        Ok(())
    }

    pub fn click_register(&self) -> WebDriverResult<()> {
        info!("Clicking 'Registrate'");
        self.click(&Self::BTN_REGISTER)
    }

    pub fn click_upload_cv(&self) -> WebDriverResult<()> {
        info!("Clicking 'Carga tu CV'");
        self.click(&Self::BTN_UPLOAD_CV)
    }

    pub fn scroll_to_services(&self) -> WebDriverResult<()> {
        info!("Scrolling to services section");
        self.scroll_into_view(&Self::SERVICES_SECTION)
    }

    pub fn scroll_to_contact(&self) -> WebDriverResult<()> {
        info!("Scrolling to contact section");
        self.scroll_into_view(&Self::CONTACT_SECTION)
    }

    /// The page counts as loaded once the register button is visible.
    pub fn is_page_loaded(&self) -> bool {
        match self.find(&Self::BTN_REGISTER) {
            Ok(_) => {
                info!("Home page verified");
                true
            }
            Err(e) => {
                error!("Home page did not load: {}", e);
                false
            }
        }
    }

    /// Only rendered on narrow viewports.
    pub fn is_menu_toggle_visible(&self) -> bool {
        self.is_visible(&Self::HAMBURGER_MENU, self.timeout())
    }

    pub fn toggle_menu(&self) -> WebDriverResult<()> {
        info!("Toggling navigation menu");
        self.click(&Self::HAMBURGER_MENU)
    }
}

impl PageActions for HomePage<'_> {
    fn session(&self) -> &WebDriverSession {
        self.page.session()
    }

    fn timeout(&self) -> std::time::Duration {
        self.page.timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use crate::http::mockdriver_sync::{MockDriverSync, MockElement, MockHandle, MockPage};
    use crate::{DesiredCapabilities, GenericWebDriver};

    const HOME: &str = "http://talento.test";

    fn driver(menu_visible: bool) -> (GenericWebDriver<MockDriverSync>, MockHandle) {
        let mut menu = MockElement::new("button").matching(&HomePage::HAMBURGER_MENU);
        if !menu_visible {
            menu = menu.hidden();
        }
        let mock = MockDriverSync::new()
            .with_page(
                MockPage::new(HOME)
                    .element(
                        MockElement::new("a")
                            .matching(&HomePage::BTN_REGISTER)
                            .text("Registrate")
                            .navigates_to("http://talento.test/register"),
                    )
                    .element(MockElement::new("section").matching(&HomePage::SERVICES_SECTION))
                    .element(MockElement::new("section").matching(&HomePage::CONTACT_SECTION))
                    .element(menu),
            )
            .with_page(MockPage::new("http://talento.test/register").title("Registro"));
        let handle = mock.handle();
        let mut driver =
            GenericWebDriver::from_connection(mock, DesiredCapabilities::chrome()).unwrap();
        driver.set_query_poller(crate::query::ElementPoller::TimeoutWithInterval(
            std::time::Duration::from_millis(100),
            std::time::Duration::from_millis(20),
        ));
        (driver, handle)
    }

    #[test]
    fn register_button_redirects() {
        let (driver, handle) = driver(false);
        let home = HomePage::with_url(&driver, "http://talento.test/");
        home.load().unwrap();
        assert!(home.is_page_loaded());
        home.click_register().unwrap();
        assert!(home.current_url().unwrap().contains("register"));
        assert_eq!(handle.current_url(), "http://talento.test/register");
        assert!(!home.is_page_loaded());
    }

    #[test]
    fn scrolls_to_sections() {
        let (driver, handle) = driver(false);
        let home = HomePage::with_url(&driver, HOME);
        home.load().unwrap();
        home.scroll_to_services().unwrap();
        home.scroll_to_contact().unwrap();
        assert_eq!(handle.scroll_count(), 2);
        assert!(!home.is_menu_toggle_visible());
        assert!(home.click_upload_cv().unwrap_err().is_timeout());
    }

    #[test]
    fn mobile_menu_toggle() {
        let (driver, handle) = driver(true);
        let home = HomePage::with_url(&driver, HOME);
        home.load().unwrap();
        assert!(home.is_menu_toggle_visible());
        home.toggle_menu().unwrap();
        assert_eq!(handle.count("ElementClick"), 1);
    }
}
