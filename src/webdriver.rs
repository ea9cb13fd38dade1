use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use serde::Serialize;
use serde_json::Value;
use thirtyfour::common::command::Command;
use thirtyfour::common::config::WebDriverConfig;

use crate::error::WebDriverResult;
use crate::http::connection_sync::{HttpClientCreateParams, WebDriverHttpClientSync};
use crate::http::reqwest_sync::ReqwestDriverSync;
use crate::webdrivercommands::{start_session, WebDriverCommands};
use crate::{SessionId, WebDriverSession};

/// The WebDriver struct represents a browser session.
///
/// For full documentation of all WebDriver methods,
/// see the [WebDriverCommands](trait.WebDriverCommands.html) trait.
pub type WebDriver = GenericWebDriver<ReqwestDriverSync>;

/// **NOTE:** For WebDriver method documentation,
/// see the [WebDriverCommands](trait.WebDriverCommands.html) trait.
///
/// `GenericWebDriver` owns one synchronous browser session and is generic
/// over the connection used to reach the server. [`WebDriver`] wires it to
/// `reqwest`; tests can use [`MockDriverSync`](http/mockdriver_sync/struct.MockDriverSync.html)
/// through [`GenericWebDriver::from_connection`].
///
/// # Example:
/// ```ignore
/// use talentolab_e2e::prelude::*;
///
/// fn main() -> WebDriverResult<()> {
///     let caps = DesiredCapabilities::chrome();
///     let driver = WebDriver::new("http://localhost:4444", &caps)?;
///     driver.get("https://talentolab-test.netlify.app")?;
///     driver.quit()
/// }
/// ```
#[derive(Debug)]
pub struct GenericWebDriver<T: WebDriverHttpClientSync> {
    pub session: WebDriverSession,
    capabilities: Value,
    quit_on_drop: bool,
    phantom: PhantomData<T>,
}

impl<T: 'static> GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    /// Connect to the WebDriver server at `server_url` and start a session.
    pub fn new<C>(server_url: &str, capabilities: C) -> WebDriverResult<Self>
    where
        C: Serialize,
    {
        Self::new_with_timeout(server_url, capabilities, None)
    }

    /// Creates a new GenericWebDriver just like the `new` function. Allows a
    /// configurable timeout for all HTTP requests including the session creation.
    pub fn new_with_timeout<C>(
        server_url: &str,
        capabilities: C,
        timeout: Option<Duration>,
    ) -> WebDriverResult<Self>
    where
        C: Serialize,
    {
        let params = HttpClientCreateParams {
            server_url: server_url.to_string(),
            timeout,
        };
        let conn = T::create(params)?;
        Self::from_connection(conn, capabilities)
    }

    /// Start a session over an already constructed connection.
    pub fn from_connection<C>(conn: T, capabilities: C) -> WebDriverResult<Self>
    where
        C: Serialize,
    {
        let capabilities = serde_json::to_value(capabilities)?;
        let (session_id, session_capabilities) = start_session(&conn, &capabilities)?;
        debug!("started session {}", session_id);

        Ok(GenericWebDriver {
            session: WebDriverSession::new(session_id, Arc::new(conn)),
            capabilities: session_capabilities,
            quit_on_drop: false,
            phantom: PhantomData,
        })
    }

    /// Capabilities as returned by the server.
    pub fn capabilities(&self) -> &Value {
        &self.capabilities
    }

    pub fn session_id(&self) -> &SessionId {
        self.session.session_id()
    }

    pub fn config(&self) -> &WebDriverConfig {
        self.session.config()
    }

    pub fn config_mut(&mut self) -> &mut WebDriverConfig {
        self.session.config_mut()
    }

    /// Delete the session when this driver is dropped.
    pub fn quit_on_drop(mut self, enabled: bool) -> Self {
        self.quit_on_drop = enabled;
        self
    }

    /// End the webdriver session.
    pub fn quit(mut self) -> WebDriverResult<()> {
        self.quit_on_drop = false;
        self.cmd(Command::DeleteSession)?;
        Ok(())
    }
}

impl<T> WebDriverCommands for GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    fn session(&self) -> &WebDriverSession {
        &self.session
    }
}

impl<T> Drop for GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    /// Close the current session when the WebDriver struct goes out of scope.
    fn drop(&mut self) {
        if self.quit_on_drop && !(self.session.session_id()).is_empty() {
            if let Err(e) = self.cmd(Command::DeleteSession) {
                error!("Failed to close session: {:?}", e);
            }
        }
    }
}
