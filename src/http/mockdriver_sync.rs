//! In-process WebDriver stand-in.
//!
//! `MockDriverSync` answers the HTTP requests thirtyfour formats for each
//! command from scripted [`MockPage`]s, so the wait and page layers can be
//! exercised without a browser. Elements are matched by the exact request
//! body a lookup of the locators registered on them would send.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use thirtyfour::common::command::{Command, FormatRequestData, MAGIC_ELEMENTID};
use thirtyfour::{RequestData, RequestMethod};

use crate::error::{w3c_error, WebDriverResult};
use crate::http::connection_sync::{HttpClientCreateParams, WebDriverHttpClientSync};
use crate::locator::Locator;
use crate::SessionId;

/// Bytes returned (base64 encoded) for screenshots.
pub const MOCK_SCREENSHOT: &[u8] = b"\x89PNG\r\n\x1a\nmock";

#[derive(Debug, Clone)]
pub struct MockElement {
    selectors: Vec<Value>,
    tag: String,
    text: String,
    value: String,
    displayed: bool,
    enabled: bool,
    shown_after: Option<Duration>,
    navigates_to: Option<String>,
}

impl MockElement {
    pub fn new(tag: &str) -> Self {
        MockElement {
            selectors: Vec::new(),
            tag: tag.to_string(),
            text: String::new(),
            value: String::new(),
            displayed: true,
            enabled: true,
            shown_after: None,
            navigates_to: None,
        }
    }

    /// Make this element answer to `locator`.
    pub fn matching(mut self, locator: &Locator) -> Self {
        self.selectors.push(lookup_body(locator));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Present in the DOM but never displayed.
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Present immediately, displayed only once `delay` has passed since the page loaded.
    pub fn shown_after(mut self, delay: Duration) -> Self {
        self.shown_after = Some(delay);
        self
    }

    /// Clicking this element loads `url`.
    pub fn navigates_to(mut self, url: &str) -> Self {
        self.navigates_to = Some(url.to_string());
        self
    }

    fn is_displayed(&self, loaded_at: Instant) -> bool {
        self.displayed && self.shown_after.map_or(true, |d| loaded_at.elapsed() >= d)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockPage {
    url: String,
    title: String,
    elements: Vec<MockElement>,
}

impl MockPage {
    pub fn new(url: &str) -> Self {
        MockPage {
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn element(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }
}

#[derive(Debug)]
struct MockState {
    pages: HashMap<String, MockPage>,
    current: MockPage,
    generation: u32,
    loaded_at: Instant,
    scrolled: Vec<String>,
    commands: Vec<String>,
    deleted: bool,
}

impl MockState {
    fn load(&mut self, url: &str) {
        self.current = self.pages.get(url).cloned().unwrap_or_else(|| MockPage::new(url));
        self.generation += 1;
        self.loaded_at = Instant::now();
    }

    fn element_id(&self, index: usize) -> String {
        format!("mock-{}-{}", self.generation, index)
    }

    fn element_ref(&self, index: usize) -> Value {
        json!({ MAGIC_ELEMENTID: self.element_id(index) })
    }

    fn matches(&self, selector: &Value) -> Vec<usize> {
        self.current
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.selectors.iter().any(|s| s == selector))
            .map(|(i, _)| i)
            .collect()
    }

    fn resolve(&self, id: &str) -> WebDriverResult<usize> {
        let stale = || w3c_error(404, "stale element reference", id);
        let mut parts = id.trim_start_matches("mock-").splitn(2, '-');
        let generation: u32 = parts.next().and_then(|g| g.parse().ok()).ok_or_else(stale)?;
        let index: usize = parts.next().and_then(|i| i.parse().ok()).ok_or_else(stale)?;
        if generation != self.generation || index >= self.current.elements.len() {
            return Err(stale());
        }
        Ok(index)
    }

    fn element_mut(&mut self, id: &str) -> WebDriverResult<&mut MockElement> {
        let index = self.resolve(id)?;
        Ok(&mut self.current.elements[index])
    }

    fn element(&self, id: &str) -> WebDriverResult<&MockElement> {
        let index = self.resolve(id)?;
        Ok(&self.current.elements[index])
    }
}

/// Inspect a mock connection after it has been moved into a driver.
#[derive(Debug, Clone)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn current_url(&self) -> String {
        self.state().current.url.clone()
    }

    /// The current `value` of the first element answering to `locator`.
    pub fn value_of(&self, locator: &Locator) -> Option<String> {
        let state = self.state();
        let index = *state.matches(&lookup_body(locator)).first()?;
        Some(state.current.elements[index].value.clone())
    }

    /// Number of scroll-into-view requests received.
    pub fn scroll_count(&self) -> usize {
        self.state().scrolled.len()
    }

    /// Number of `name` commands received, e.g. `"FindElement"`.
    pub fn count(&self, name: &str) -> usize {
        self.state().commands.iter().filter(|c| c.as_str() == name).count()
    }
}

#[derive(Debug)]
pub struct MockDriverSync {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockDriverSync {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriverSync {
    pub fn new() -> Self {
        MockDriverSync {
            state: Arc::new(Mutex::new(MockState {
                pages: HashMap::new(),
                current: MockPage::new("about:blank"),
                generation: 0,
                loaded_at: Instant::now(),
                scrolled: Vec::new(),
                commands: Vec::new(),
                deleted: false,
            })),
        }
    }

    /// Register a page, served whenever its URL is navigated to.
    pub fn with_page(self, page: MockPage) -> Self {
        self.lock().pages.insert(page.url.clone(), page);
        self
    }

    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// The body a lookup of `locator` sends, as thirtyfour formats it.
fn lookup_body(locator: &Locator) -> Value {
    let request = Command::FindElement(locator.by().get_w3c_selector())
        .format_request(&SessionId::from(String::new()));
    request.body.unwrap_or(Value::Null)
}

/// One request, decoded back into the command that produced it.
#[derive(Debug)]
enum Route<'a> {
    NewSession,
    DeleteSession,
    NavigateTo,
    GetCurrentUrl,
    GetTitle,
    FindElement,
    FindElements,
    ExecuteScript,
    TakeScreenshot,
    ElementClick(&'a str),
    ElementClear(&'a str),
    ElementSendKeys(&'a str),
    GetElementText(&'a str),
    GetElementTagName(&'a str),
    GetElementAttribute(&'a str, &'a str),
    IsElementEnabled(&'a str),
    IsElementDisplayed(&'a str),
}

impl<'a> Route<'a> {
    fn parse(method: &RequestMethod, url: &'a str) -> Option<Self> {
        let segments: Vec<&str> = url.trim_matches('/').split('/').collect();
        let rest = match segments.as_slice() {
            ["session"] => return Some(Route::NewSession),
            ["session", _, rest @ ..] => rest,
            _ => return None,
        };

        let route = match (method, rest) {
            (RequestMethod::Delete, []) => Route::DeleteSession,
            (RequestMethod::Post, ["url"]) => Route::NavigateTo,
            (RequestMethod::Get, ["url"]) => Route::GetCurrentUrl,
            (RequestMethod::Get, ["title"]) => Route::GetTitle,
            (RequestMethod::Post, ["element"]) => Route::FindElement,
            (RequestMethod::Post, ["elements"]) => Route::FindElements,
            (RequestMethod::Post, ["execute", "sync"]) => Route::ExecuteScript,
            (RequestMethod::Get, ["screenshot"]) => Route::TakeScreenshot,
            (RequestMethod::Post, ["element", id, "click"]) => Route::ElementClick(*id),
            (RequestMethod::Post, ["element", id, "clear"]) => Route::ElementClear(*id),
            (RequestMethod::Post, ["element", id, "value"]) => Route::ElementSendKeys(*id),
            (RequestMethod::Get, ["element", id, "text"]) => Route::GetElementText(*id),
            (RequestMethod::Get, ["element", id, "name"]) => Route::GetElementTagName(*id),
            (RequestMethod::Get, ["element", id, "attribute", name])
            | (RequestMethod::Get, ["element", id, "property", name]) => {
                Route::GetElementAttribute(*id, *name)
            }
            (RequestMethod::Get, ["element", id, "enabled"]) => Route::IsElementEnabled(*id),
            (RequestMethod::Get, ["element", id, "displayed"]) => Route::IsElementDisplayed(*id),
            _ => return None,
        };
        Some(route)
    }

    fn name(&self) -> &'static str {
        match self {
            Route::NewSession => "NewSession",
            Route::DeleteSession => "DeleteSession",
            Route::NavigateTo => "NavigateTo",
            Route::GetCurrentUrl => "GetCurrentUrl",
            Route::GetTitle => "GetTitle",
            Route::FindElement => "FindElement",
            Route::FindElements => "FindElements",
            Route::ExecuteScript => "ExecuteScript",
            Route::TakeScreenshot => "TakeScreenshot",
            Route::ElementClick(_) => "ElementClick",
            Route::ElementClear(_) => "ElementClear",
            Route::ElementSendKeys(_) => "ElementSendKeys",
            Route::GetElementText(_) => "GetElementText",
            Route::GetElementTagName(_) => "GetElementTagName",
            Route::GetElementAttribute(..) => "GetElementAttribute",
            Route::IsElementEnabled(_) => "IsElementEnabled",
            Route::IsElementDisplayed(_) => "IsElementDisplayed",
        }
    }
}

fn ok(value: Value) -> WebDriverResult<Value> {
    Ok(json!({ "value": value }))
}

fn body_str<'b>(body: &'b Value, key: &str) -> &'b str {
    body.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Capabilities as sent in a new session request, in either W3C or legacy form.
fn requested_capabilities(body: &Value) -> Value {
    [
        &body["capabilities"]["alwaysMatch"],
        &body["capabilities"]["firstMatch"][0],
        &body["desiredCapabilities"],
    ]
    .iter()
    .find(|v| v.is_object())
    .map_or_else(|| body.clone(), |v| (*v).clone())
}

/// Typed text of a send keys request: `text` if present, else the `value` characters.
fn typed_text(body: &Value) -> String {
    match body.get("text").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => body["value"]
            .as_array()
            .map(|chars| chars.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default(),
    }
}

impl WebDriverHttpClientSync for MockDriverSync {
    fn create(_params: HttpClientCreateParams) -> WebDriverResult<Self> {
        Ok(MockDriverSync::new())
    }

    fn execute(&self, request_data: RequestData) -> WebDriverResult<Value> {
        let route = Route::parse(&request_data.method, &request_data.url)
            .ok_or_else(|| w3c_error(404, "unknown command", &request_data.url))?;
        let body = request_data.body.unwrap_or(Value::Null);
        let mut state = self.lock();
        state.commands.push(route.name().to_string());
        if state.deleted {
            return Err(w3c_error(404, "invalid session id", "session deleted"));
        }

        match route {
            Route::NewSession => ok(json!({
                "sessionId": "mock-session",
                "capabilities": requested_capabilities(&body),
            })),
            Route::DeleteSession => {
                state.deleted = true;
                ok(Value::Null)
            }
            Route::NavigateTo => {
                state.load(body_str(&body, "url"));
                ok(Value::Null)
            }
            Route::GetCurrentUrl => ok(json!(state.current.url)),
            Route::GetTitle => ok(json!(state.current.title)),
            Route::FindElement => match state.matches(&body).first() {
                Some(&index) => ok(state.element_ref(index)),
                None => Err(w3c_error(404, "no such element", &body.to_string())),
            },
            Route::FindElements => {
                let refs: Vec<Value> =
                    state.matches(&body).into_iter().map(|i| state.element_ref(i)).collect();
                ok(json!(refs))
            }
            Route::ElementClick(id) => {
                let target = state.element(id)?.navigates_to.clone();
                if let Some(url) = target {
                    state.load(&url);
                }
                ok(Value::Null)
            }
            Route::ElementClear(id) => {
                state.element_mut(id)?.value.clear();
                ok(Value::Null)
            }
            Route::ElementSendKeys(id) => {
                state.element_mut(id)?.value.push_str(&typed_text(&body));
                ok(Value::Null)
            }
            Route::GetElementText(id) => {
                let loaded_at = state.loaded_at;
                let element = state.element(id)?;
                if element.is_displayed(loaded_at) {
                    ok(json!(element.text))
                } else {
                    ok(json!(""))
                }
            }
            Route::GetElementTagName(id) => ok(json!(state.element(id)?.tag)),
            Route::GetElementAttribute(id, name) => {
                let element = state.element(id)?;
                if name == "value" {
                    ok(json!(element.value))
                } else {
                    ok(Value::Null)
                }
            }
            Route::IsElementEnabled(id) => ok(json!(state.element(id)?.enabled)),
            Route::IsElementDisplayed(id) => {
                let loaded_at = state.loaded_at;
                ok(json!(state.element(id)?.is_displayed(loaded_at)))
            }
            Route::ExecuteScript => {
                if body_str(&body, "script").contains("scrollIntoView") {
                    let target = body["args"][0][MAGIC_ELEMENTID]
                        .as_str()
                        .ok_or_else(|| w3c_error(400, "invalid argument", "scroll without element"))?;
                    state.element(target)?;
                    state.scrolled.push(target.to_string());
                }
                ok(Value::Null)
            }
            Route::TakeScreenshot => ok(json!(base64::encode(MOCK_SCREENSHOT))),
        }
    }
}
