use std::sync::Arc;
use std::time::Duration;

use thirtyfour::common::command::{Command, FormatRequestData};
use thirtyfour::common::config::WebDriverConfig;

use crate::error::WebDriverResult;
use crate::http::connection_sync::WebDriverHttpClientSync;
use crate::query::{poller, ElementPoller, DEFAULT_INTERVAL, DEFAULT_TIMEOUT};
use crate::{SessionId, WebDriverCommands};

/// A live browser session: its id, the connection it talks through, and
/// the poller every wait in the session starts from.
///
/// New sessions wait up to [`DEFAULT_TIMEOUT`], checking every
/// [`DEFAULT_INTERVAL`], whatever thirtyfour's own default poller is.
#[derive(Debug)]
pub struct WebDriverSession {
    session_id: SessionId,
    conn: Arc<dyn WebDriverHttpClientSync>,
    config: WebDriverConfig,
}

impl WebDriverSession {
    pub fn new(session_id: SessionId, conn: Arc<dyn WebDriverHttpClientSync>) -> Self {
        let mut config = WebDriverConfig::new();
        config.query_poller = ElementPoller::TimeoutWithInterval(DEFAULT_TIMEOUT, DEFAULT_INTERVAL);
        Self {
            session_id,
            conn,
            config,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn config(&self) -> &WebDriverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WebDriverConfig {
        &mut self.config
    }

    /// How long a required page interaction may wait.
    pub fn wait_timeout(&self) -> Duration {
        poller::timeout_of(&self.config.query_poller).unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Change the wait timeout, keeping the poll interval.
    pub fn set_wait_timeout(&mut self, timeout: Duration) {
        self.config.query_poller = poller::with_timeout(&self.config.query_poller, timeout);
    }

    /// Format `command` for this session and send it.
    pub fn execute(&self, command: Command) -> WebDriverResult<serde_json::Value> {
        self.conn.execute(command.format_request(&self.session_id))
    }
}

impl WebDriverCommands for WebDriverSession {
    fn session(&self) -> &WebDriverSession {
        self
    }
}
