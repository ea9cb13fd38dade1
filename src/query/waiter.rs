use std::time::Duration;

use log::trace;

use crate::error::{timed_out, ErrorClass, WebDriverResult};
use crate::query::{poller, ElementPoller, ElementPollerTicker};
use crate::webdrivercommands::WebDriverCommands;
use crate::WebDriverSession;

/// Result of a wait: either the value the condition produced, or the
/// description of what was being waited for and how long it took to give up.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome<T> {
    Ready(T),
    TimedOut { description: String, elapsed: Duration },
}

impl<T> WaitOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, WaitOutcome::Ready(_))
    }

    /// Treat a timeout as an error.
    pub fn required(self) -> WebDriverResult<T> {
        match self {
            WaitOutcome::Ready(v) => Ok(v),
            WaitOutcome::TimedOut {
                description,
                elapsed,
            } => Err(timed_out(&description, elapsed)),
        }
    }

    /// Treat a timeout as a plain "not found".
    pub fn optional(self) -> Option<T> {
        match self {
            WaitOutcome::Ready(v) => Some(v),
            WaitOutcome::TimedOut { .. } => None,
        }
    }
}

/// Builder for an explicit wait against a session.
///
/// # Example:
/// ```ignore
/// # use talentolab_e2e::prelude::*;
/// # use talentolab_e2e::query::conditions;
/// let button = driver
///     .wait_until()
///     .desc("register button")
///     .timeout(Duration::from_secs(5))
///     .until(conditions::visibility_of(&Locator::link_text("Registrate")))?
///     .required()?;
/// ```
#[derive(Debug, Clone)]
pub struct Waiter<'a> {
    session: &'a WebDriverSession,
    poller: ElementPoller,
    description: String,
}

impl<'a> Waiter<'a> {
    pub fn new(session: &'a WebDriverSession, poller: ElementPoller) -> Self {
        Self {
            session,
            poller,
            description: String::from("condition"),
        }
    }

    /// Override the timeout, keeping the poll interval.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.poller = poller::with_timeout(&self.poller, timeout);
        self
    }

    /// Describe what is being waited for; it ends up in the timeout message.
    pub fn desc<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Poll `condition` until it yields a value or the poller gives up.
    ///
    /// `NoSuchElement` and `StaleElementReference` count as "not yet". Any
    /// other error ends the wait and is returned as is. The condition is not
    /// evaluated again once the timeout has passed.
    pub fn until<T, F>(self, condition: F) -> WebDriverResult<WaitOutcome<T>>
    where
        F: Fn(&'a WebDriverSession) -> WebDriverResult<Option<T>>,
    {
        let mut ticker = ElementPollerTicker::new(self.poller.clone());
        loop {
            match condition(self.session) {
                Ok(Some(value)) => return Ok(WaitOutcome::Ready(value)),
                Ok(None) => {}
                Err(e) if e.is_transient() => trace!("{}: {}", self.description, e),
                Err(e) => return Err(e),
            }

            if !ticker.tick() {
                return Ok(WaitOutcome::TimedOut {
                    description: self.description,
                    elapsed: ticker.elapsed(),
                });
            }
        }
    }
}

/// Trait for enabling the Waiter interface.
pub trait SessionWaitable {
    fn wait_until(&self) -> Waiter<'_>;
}

impl<C> SessionWaitable for C
where
    C: WebDriverCommands + ?Sized,
{
    /// Start a wait using the session's configured poller.
    fn wait_until(&self) -> Waiter<'_> {
        let session = self.session();
        Waiter::new(session, session.config().query_poller.clone())
    }
}
