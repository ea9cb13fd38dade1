use std::collections::BTreeMap;
use std::time::Duration;

use log::{error, info, warn};

use crate::locator::Locator;
use crate::pages::{BasePage, PageActions};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// "Nuestros clientes" section with the testimonial carousel.
#[derive(Debug, Clone)]
pub struct ClientsPage<'a> {
    page: BasePage<'a>,
}

impl<'a> ClientsPage<'a> {
    pub const SECTION: Locator = Locator::id("clientes");
    pub const TESTIMONIALS: Locator =
        Locator::css(".testimonials, #clientes .card, #clientes .testimonial");
    pub const CAROUSEL_NEXT: Locator = Locator::css(".carousel-control-next, .slick-next");

    pub const MAIN_CLIENTS: [&'static str; 3] = ["Ross", "Joey", "Phoebe"];

    pub fn new<D>(driver: &'a D) -> Self
    where
        D: WebDriverCommands + ?Sized,
    {
        ClientsPage {
            page: BasePage::new(driver),
        }
    }

    pub fn testimonial_count(&self) -> usize {
        let n = self.count(&Self::TESTIMONIALS);
        info!("Found {} testimonials", n);
        n
    }

    pub fn testimonial_exists(&self, name: &str) -> bool {
        match self.find(&Locator::containing_text(name)) {
            Ok(_) => {
                info!("Testimonial from {} found", name);
                true
            }
            Err(_) => {
                warn!("Testimonial from {} not found", name);
                false
            }
        }
    }

    /// Presence of each main client's testimonial, keyed by name.
    pub fn verify_main_testimonials(&self) -> BTreeMap<String, bool> {
        let results: BTreeMap<String, bool> = Self::MAIN_CLIENTS
            .iter()
            .map(|name| (name.to_string(), self.testimonial_exists(name)))
            .collect();
        info!("Testimonial check: {:?}", results);
        results
    }

    pub fn carousel_available(&self) -> bool {
        if self.is_present(&Self::CAROUSEL_NEXT) {
            info!("Carousel navigation found");
            true
        } else {
            error!("Carousel navigation not found");
            false
        }
    }
}

impl PageActions for ClientsPage<'_> {
    fn session(&self) -> &WebDriverSession {
        self.page.session()
    }

    fn timeout(&self) -> Duration {
        self.page.timeout()
    }
}
