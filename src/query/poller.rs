use std::thread;
use std::time::{Duration, Instant};

pub use thirtyfour::query::ElementPoller;

use crate::http::connection_sync::WebDriverHttpClientSync;
use crate::GenericWebDriver;

/// Default time a wait may take before it gives up.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default pause between two evaluations of a wait condition.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Timeout of `poller`, if it has one.
pub fn timeout_of(poller: &ElementPoller) -> Option<Duration> {
    match *poller {
        ElementPoller::TimeoutWithInterval(t, _)
        | ElementPoller::TimeoutWithIntervalAndMinTries(t, _, _) => Some(t),
        _ => None,
    }
}

pub fn interval_of(poller: &ElementPoller) -> Duration {
    match *poller {
        ElementPoller::NoWait => DEFAULT_INTERVAL,
        ElementPoller::TimeoutWithInterval(_, i)
        | ElementPoller::NumTriesWithInterval(_, i)
        | ElementPoller::TimeoutWithIntervalAndMinTries(_, i, _) => i,
    }
}

/// `poller` with its timeout replaced, keeping the interval.
pub fn with_timeout(poller: &ElementPoller, timeout: Duration) -> ElementPoller {
    match *poller {
        ElementPoller::TimeoutWithIntervalAndMinTries(_, interval, tries) => {
            ElementPoller::TimeoutWithIntervalAndMinTries(timeout, interval, tries)
        }
        _ => ElementPoller::TimeoutWithInterval(timeout, interval_of(poller)),
    }
}

pub struct ElementPollerTicker {
    timeout: Option<Duration>,
    interval: Option<Duration>,
    min_tries: u32,
    start: Instant,
    cur_tries: u32,
}

impl ElementPollerTicker {
    pub fn new(poller: ElementPoller) -> Self {
        let mut ticker = Self {
            timeout: None,
            interval: None,
            min_tries: 0,
            start: Instant::now(),
            cur_tries: 0,
        };

        match poller {
            ElementPoller::NoWait => {}
            ElementPoller::TimeoutWithInterval(timeout, interval) => {
                ticker.timeout = Some(timeout);
                ticker.interval = Some(interval);
            }
            ElementPoller::NumTriesWithInterval(num_tries, interval) => {
                ticker.interval = Some(interval);
                ticker.min_tries = num_tries;
            }
            ElementPoller::TimeoutWithIntervalAndMinTries(timeout, interval, num_tries) => {
                ticker.timeout = Some(timeout);
                ticker.interval = Some(interval);
                ticker.min_tries = num_tries
            }
        }

        ticker
    }

    /// Time since the first poll started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Record one evaluation. Returns `false` once polling is over, otherwise
    /// blocks until the next evaluation is due and returns `true`.
    pub fn tick(&mut self) -> bool {
        self.cur_tries += 1;

        if self.timeout.filter(|t| &self.start.elapsed() < t).is_none()
            && self.cur_tries >= self.min_tries
        {
            return false;
        }

        if let Some(i) = self.interval {
            // Next poll is due no earlier than this long after the first poll started.
            let mut minimum_elapsed = i * self.cur_tries;
            // The last poll lands on the deadline rather than past it.
            if let Some(t) = self.timeout.filter(|_| self.cur_tries >= self.min_tries) {
                minimum_elapsed = minimum_elapsed.min(t);
            }

            // But this much time has elapsed since the first poll started.
            let actual_elapsed = self.start.elapsed();

            if actual_elapsed < minimum_elapsed {
                // So we need to wait this much longer.
                thread::sleep(minimum_elapsed - actual_elapsed);
            }
        }

        true
    }
}

impl<T: 'static> GenericWebDriver<T>
where
    T: WebDriverHttpClientSync,
{
    /// Replace the poller used by every wait started from this driver.
    pub fn set_query_poller(&mut self, poller: ElementPoller) {
        self.config_mut().query_poller = poller;
    }
}
