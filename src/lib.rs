//! Browser and API acceptance checks for the Talento Lab recruitment site.
//!
//! The crate is layered:
//!
//! - a synchronous session layer ([`WebDriver`], [`WebElement`]) that sends
//!   `thirtyfour` commands to chromedriver or a Selenium server through
//!   `reqwest`;
//! - explicit waits ([`query`]) that poll a condition until it holds or the
//!   timeout runs out;
//! - page objects ([`pages`]) that name the site's elements once and expose
//!   its flows as methods;
//! - a JSON REST client ([`api`]) and scenario support ([`support`]):
//!   settings, logging, CSV/JSON test data and per-scenario drivers.
//!
//! The scenarios themselves live in `tests/`. Those that need a browser or
//! the network are ignored by default; run them with
//! `cargo test -- --ignored` once chromedriver is listening on
//! `WEBDRIVER_URL`.
//!
//! ### Example:
//!
//! ```ignore
//! use talentolab_e2e::prelude::*;
//! use talentolab_e2e::support::{fixture, Settings};
//!
//! fn main() -> WebDriverResult<()> {
//!     let settings = Settings::from_env();
//!     let driver = fixture::desktop_driver(&settings)?;
//!
//!     let home = HomePage::with_url(&driver, &settings.base_url);
//!     home.load()?;
//!     home.click_register()?;
//!
//!     let register = RegisterPage::with_url(&driver, &home.current_url()?);
//!     register.complete_form("Carlos Mendez", "carlos.test@talentolab.com", "Test123456")?;
//!     println!("{:?}", register.registration_message());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::needless_doctest_main)]

/// Re-export the thirtyfour protocol types the suite is built on.
pub use thirtyfour::common::{
    self,
    capabilities::{chrome::ChromeCapabilities, desiredcapabilities::*},
    command::By,
    types::{ElementId, SessionId},
};

pub use error::{ErrorClass, WebDriverError, WebDriverResult};
pub use locator::{Locator, Strategy};
pub use session::WebDriverSession;
pub use webdriver::GenericWebDriver;
pub use webdriver::WebDriver;
pub use webdrivercommands::WebDriverCommands;
pub use webelement::WebElement;

pub mod prelude {
    pub use crate::error::{ErrorClass, WebDriverError, WebDriverResult};
    pub use crate::locator::Locator;
    pub use crate::pages::{
        BasePage, ClientsPage, ContactPage, HomePage, PageActions, RegisterPage, ServicesPage,
    };
    pub use crate::query::{ElementPoller, SessionWaitable};
    pub use crate::webdriver::WebDriver;
    pub use crate::webdrivercommands::WebDriverCommands;
    pub use crate::webelement::WebElement;
    pub use thirtyfour::{By, DesiredCapabilities};
}

pub mod api;
pub mod error;
pub mod http;
pub mod locator;
pub mod pages;
pub mod query;
mod session;
pub mod support;
mod webdriver;
mod webdrivercommands;
mod webelement;
