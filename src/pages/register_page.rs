use std::path::Path;
use std::time::Duration;

use log::{info, warn};

use crate::error::{WebDriverError, WebDriverResult};
use crate::locator::Locator;
use crate::pages::{BasePage, PageActions, DEFAULT_BASE_URL};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// Candidate registration form, including the CV upload field.
#[derive(Debug, Clone)]
pub struct RegisterPage<'a> {
    page: BasePage<'a>,
    url: String,
}

impl<'a> RegisterPage<'a> {
    pub const NAME_INPUT: Locator = Locator::name("name");
    pub const EMAIL_INPUT: Locator = Locator::name("email");
    pub const PASSWORD_INPUT: Locator = Locator::name("password");
    pub const CV_INPUT: Locator = Locator::css("input[type='file']");
    pub const SUBMIT_BTN: Locator = Locator::xpath("//button[contains(text(), 'Registrarse')]");
    pub const SUCCESS_MSG: Locator = Locator::xpath("//h2[contains(text(), 'Bienvenido')]");

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
        RegisterPage {
            page: BasePage::new(driver),
            url: url.to_string(),
        }
    }

    pub fn load(&self) -> WebDriverResult<()> {
        self.open(&self.url)
    }

    pub fn fill_form(&self, name: &str, email: &str, password: &str) -> WebDriverResult<()> {
        info!("Filling registration form for {} <{}>", name, email);
        self.type_text(&Self::NAME_INPUT, name)?;
        self.type_text(&Self::EMAIL_INPUT, email)?;
        self.type_text(&Self::PASSWORD_INPUT, password)?;
        Ok(())
    }

    pub fn submit_form(&self) -> WebDriverResult<()> {
        info!("Submitting registration form");
        self.click(&Self::SUBMIT_BTN)
    }

    /// Fill every field and submit.
    pub fn complete_form(&self, name: &str, email: &str, password: &str) -> WebDriverResult<()> {
        self.fill_form(name, email, password)?;
        self.submit_form()
    }

    /// Attach a CV. The file input is often styled away, so only presence is required.
    pub fn upload_cv(&self, path: &Path) -> WebDriverResult<()> {
        let path_str = path.to_str().ok_or_else(|| {
            WebDriverError::CustomError(format!("non UTF-8 path: {}", path.display()))
        })?;
        self.find_present(&Self::CV_INPUT)?.send_keys(path_str)?;
        info!("CV attached: {}", path_str);
        Ok(())
    }

    /// The welcome message, if registration succeeded.
    pub fn registration_message(&self) -> Option<String> {
        match self.read_text(&Self::SUCCESS_MSG) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("No registration message: {}", e);
                None
            }
        }
    }
}

impl PageActions for RegisterPage<'_> {
    fn session(&self) -> &WebDriverSession {
        self.page.session()
    }

    fn timeout(&self) -> Duration {
        self.page.timeout()
    }
}
