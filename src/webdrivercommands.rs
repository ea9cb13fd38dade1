use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thirtyfour::common::command::{Command, FormatRequestData};
use thirtyfour::common::connection_common::convert_json;

use crate::error::WebDriverResult;
use crate::http::connection_sync::WebDriverHttpClientSync;
use crate::locator::Locator;
use crate::webelement::{convert_element_sync, convert_elements_sync};
use crate::{SessionId, WebDriverSession, WebElement};

#[derive(Debug, Deserialize)]
struct NewSessionResponse {
    #[serde(rename = "sessionId")]
    session_id: String,
    #[serde(default)]
    capabilities: Value,
}

/// Start a new session and return its id plus the capabilities the server agreed to.
pub fn start_session<C>(conn: &C, capabilities: &Value) -> WebDriverResult<(SessionId, Value)>
where
    C: WebDriverHttpClientSync + ?Sized,
{
    let no_session = SessionId::from(String::new());
    let v = conn.execute(Command::NewSession(capabilities.clone()).format_request(&no_session))?;
    let resp: NewSessionResponse = convert_json(&v["value"])?;
    Ok((SessionId::from(resp.session_id), resp.capabilities))
}

/// All browser-level commands, shared by `GenericWebDriver` and `WebDriverSession`.
pub trait WebDriverCommands {
    fn session(&self) -> &WebDriverSession;

    /// Convenience wrapper for executing a WebDriver command.
    fn cmd(&self, command: Command) -> WebDriverResult<Value> {
        self.session().execute(command)
    }

    /// Navigate to the specified URL.
    fn get(&self, url: &str) -> WebDriverResult<()> {
        self.cmd(Command::NavigateTo(url.to_owned()))?;
        Ok(())
    }

    fn current_url(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::GetCurrentUrl)?;
        convert_json(&v["value"])
    }

    fn title(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::GetTitle)?;
        convert_json(&v["value"])
    }

    /// Find the first element matching `locator`, without waiting.
    ///
    /// Returns `WebDriverError::NoSuchElement` when nothing matches.
    fn find_element(&self, locator: &Locator) -> WebDriverResult<WebElement<'_>> {
        let v = self.cmd(Command::FindElement(locator.by().get_w3c_selector()))?;
        convert_element_sync(self.session(), &v["value"])
    }

    /// Find every element matching `locator`, without waiting.
    fn find_elements(&self, locator: &Locator) -> WebDriverResult<Vec<WebElement<'_>>> {
        let v = self.cmd(Command::FindElements(locator.by().get_w3c_selector()))?;
        convert_elements_sync(self.session(), &v["value"])
    }

    /// Run synchronous JavaScript and return its result.
    /// Elements can be passed in `args` via `serde_json::to_value(&elem)`.
    fn execute_script(&self, script: &str, args: Vec<Value>) -> WebDriverResult<Value> {
        let v = self.cmd(Command::ExecuteScript(script.to_owned(), args))?;
        Ok(v["value"].clone())
    }

    fn screenshot_as_base64(&self) -> WebDriverResult<String> {
        let v = self.cmd(Command::TakeScreenshot)?;
        convert_json(&v["value"])
    }

    fn screenshot_as_png(&self) -> WebDriverResult<Vec<u8>> {
        let s = self.screenshot_as_base64()?;
        Ok(base64::decode(&s)?)
    }

    /// Take a screenshot of the current window and write it to `path` as PNG.
    fn screenshot(&self, path: &Path) -> WebDriverResult<()> {
        let png = self.screenshot_as_png()?;
        let mut file = File::create(path)?;
        file.write_all(&png)?;
        Ok(())
    }
}
