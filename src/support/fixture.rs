//! Per-scenario browser sessions and failure screenshots.
//!
//! Each scenario builds its own driver through [`desktop_driver`] or
//! [`mobile_driver`]; the session is deleted when the driver is dropped.
//! A [`FailureCapture`] guard saves a screenshot of the page when the
//! scenario fails.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use chrono::{DateTime, Local, TimeZone};
use log::{error, info};
use serde_json::json;

use crate::error::{WebDriverError, WebDriverResult};
use crate::http::connection_sync::WebDriverHttpClientSync;
use crate::support::{logger, Settings};
use crate::webdrivercommands::WebDriverCommands;
use crate::{ChromeCapabilities, DesiredCapabilities, GenericWebDriver, WebDriver};

/// Pixel 5 on Android 11.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 11; Pixel 5) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/90.0.4430.91 Mobile Safari/537.36";
pub const MOBILE_WIDTH: u32 = 412;
pub const MOBILE_HEIGHT: u32 = 915;
pub const MOBILE_PIXEL_RATIO: f64 = 3.0;

pub fn desktop_capabilities(settings: &Settings) -> WebDriverResult<ChromeCapabilities> {
    let mut caps = DesiredCapabilities::chrome();
    caps.add_chrome_arg("--start-maximized")?;
    caps.add_chrome_arg("--disable-notifications")?;
    caps.add_chrome_arg("--disable-popup-blocking")?;
    if settings.headless {
        caps.set_headless()?;
    }
    Ok(caps)
}

pub fn mobile_capabilities(settings: &Settings) -> WebDriverResult<ChromeCapabilities> {
    let mut caps = DesiredCapabilities::chrome();
    caps.add_chrome_option(
        "mobileEmulation",
        json!({
            "deviceMetrics": {
                "width": MOBILE_WIDTH,
                "height": MOBILE_HEIGHT,
                "pixelRatio": MOBILE_PIXEL_RATIO,
            },
            "userAgent": MOBILE_USER_AGENT,
        }),
    )?;
    caps.add_chrome_arg("--disable-notifications")?;
    if settings.headless {
        caps.set_headless()?;
    }
    Ok(caps)
}

/// Full-size Chrome session against the configured WebDriver server.
pub fn desktop_driver(settings: &Settings) -> WebDriverResult<WebDriver> {
    logger::init_in(&settings.logs_dir());
    info!("Starting desktop session on {}", settings.webdriver_url);
    let driver = WebDriver::new(&settings.webdriver_url, desktop_capabilities(settings)?)?;
    Ok(with_settings(driver, settings))
}

/// Chrome session emulating a phone viewport.
pub fn mobile_driver(settings: &Settings) -> WebDriverResult<WebDriver> {
    logger::init_in(&settings.logs_dir());
    info!("Starting mobile session on {}", settings.webdriver_url);
    let driver = WebDriver::new(&settings.webdriver_url, mobile_capabilities(settings)?)?;
    Ok(with_settings(driver, settings))
}

/// Apply the configured wait timeout and delete the session on drop.
pub fn with_settings<T>(mut driver: GenericWebDriver<T>, settings: &Settings) -> GenericWebDriver<T>
where
    T: WebDriverHttpClientSync + 'static,
{
    driver.session.set_wait_timeout(settings.wait_timeout);
    driver.quit_on_drop(true)
}

/// `screenshot_<test>_<YYYY-MM-DD_HH-MM-SS>.png`, with spaces and brackets
/// in the test name replaced by underscores.
pub fn screenshot_file_name<Tz>(test_name: &str, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let name: String = test_name
        .chars()
        .map(|c| match c {
            ' ' | '[' | ']' => '_',
            c => c,
        })
        .collect();
    format!("screenshot_{}_{}.png", name, now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Saves a screenshot if the scenario fails while the guard is alive.
///
/// A failure is either an error passed through [`observe`](#method.observe)
/// or a panic unwinding past the guard. Capture problems are logged and
/// never change the scenario's outcome.
pub struct FailureCapture<'a> {
    driver: &'a dyn WebDriverCommands,
    test_name: String,
    dir: PathBuf,
    captured: bool,
}

impl<'a> FailureCapture<'a> {
    pub fn new<D>(driver: &'a D, test_name: &str, dir: &Path) -> Self
    where
        D: WebDriverCommands,
    {
        FailureCapture {
            driver,
            test_name: test_name.to_string(),
            dir: dir.to_path_buf(),
            captured: false,
        }
    }

    /// Capture on `Err`, then hand the result back unchanged.
    pub fn observe<T, E: Display>(&mut self, result: Result<T, E>) -> Result<T, E> {
        if let Err(e) = &result {
            error!("Scenario {} failed: {}", self.test_name, e);
            self.capture();
        }
        result
    }

    /// Save a screenshot now. Returns its path when it was written.
    pub fn capture(&mut self) -> Option<PathBuf> {
        self.captured = true;
        let path = self.dir.join(screenshot_file_name(&self.test_name, Local::now()));
        let saved = fs::create_dir_all(&self.dir)
            .map_err(WebDriverError::from)
            .and_then(|_| self.driver.screenshot(&path));
        match saved {
            Ok(()) => {
                info!("Screenshot saved to: {}", path.display());
                Some(path)
            }
            Err(e) => {
                error!("Failed to take screenshot: {}", e);
                None
            }
        }
    }
}

impl Drop for FailureCapture<'_> {
    fn drop(&mut self) {
        if thread::panicking() && !self.captured {
            self.capture();
        }
    }
}

/// Run `scenario` with a [`FailureCapture`] guard around it.
pub fn with_capture<D, T, E, F>(driver: &D, test_name: &str, dir: &Path, scenario: F) -> Result<T, E>
where
    D: WebDriverCommands,
    E: Display,
    F: FnOnce(&D) -> Result<T, E>,
{
    let mut guard = FailureCapture::new(driver, test_name, dir);
    let result = scenario(driver);
    guard.observe(result)
}
