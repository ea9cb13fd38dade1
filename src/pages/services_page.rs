use std::time::Duration;

use log::{info, warn};

use crate::locator::Locator;
use crate::pages::{BasePage, PageActions};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// Services catalogue section of the home page.
#[derive(Debug, Clone)]
pub struct ServicesPage<'a> {
    page: BasePage<'a>,
}

impl<'a> ServicesPage<'a> {
    pub const TITLE: Locator = Locator::xpath("//h2[contains(text(), 'Servicios')]");
    pub const CARDS: Locator = Locator::css(".service-card, .card");

    /// Services the site is expected to offer.
    pub const SERVICES: [&'static str; 4] =
        ["Reclutamiento", "Headhunting", "Evaluación", "Consultoría"];

    pub fn new<D>(driver: &'a D) -> Self
    where
        D: WebDriverCommands + ?Sized,
    {
        ServicesPage {
            page: BasePage::new(driver),
        }
    }

    pub fn card_count(&self) -> usize {
        let n = self.count(&Self::CARDS);
        info!("Found {} service cards", n);
        n
    }

    pub fn service_exists(&self, name: &str) -> bool {
        match self.find(&Locator::containing_text(name)) {
            Ok(_) => {
                info!("Service '{}' found", name);
                true
            }
            Err(_) => {
                warn!("Service '{}' not found", name);
                false
            }
        }
    }

    /// The catalogue entries actually shown, in catalogue order.
    pub fn available_services(&self) -> Vec<&'static str> {
        Self::SERVICES.iter().copied().filter(|s| self.service_exists(s)).collect()
    }
}

impl PageActions for ServicesPage<'_> {
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
    use crate::http::mockdriver_sync::{MockDriverSync, MockElement, MockPage};
    use crate::query::ElementPoller;
    use crate::{DesiredCapabilities, GenericWebDriver};

    const HOME: &str = "http://talento.test/";

    fn card(name: &str) -> MockElement {
        MockElement::new("div")
            .matching(&ServicesPage::CARDS)
            .matching(&Locator::containing_text(name))
            .text(name)
    }

    #[test]
    fn lists_only_rendered_services() {
        let mock = MockDriverSync::new().with_page(
            MockPage::new(HOME)
                .element(MockElement::new("h2").matching(&ServicesPage::TITLE).text("Servicios"))
                .element(card("Reclutamiento"))
                .element(card("Headhunting"))
                .element(card("Consultoría")),
        );
        let mut driver =
            GenericWebDriver::from_connection(mock, DesiredCapabilities::chrome()).unwrap();
        driver.set_query_poller(ElementPoller::TimeoutWithInterval(
            Duration::from_millis(60),
            Duration::from_millis(20),
        ));
        driver.get(HOME).unwrap();

        let page = ServicesPage::new(&driver);
        assert_eq!(page.card_count(), 3);
        assert!(page.is_visible(&ServicesPage::TITLE, page.timeout()));
        assert!(page.service_exists("Headhunting"));
        assert!(!page.service_exists("Evaluación"));
        assert_eq!(page.available_services(), vec!["Reclutamiento", "Headhunting", "Consultoría"]);
    }
}
