//! Explicit waits.
//!
//! A wait polls a condition against the live session until it yields a
//! value or the poller's timeout runs out. The outcome is a [`WaitOutcome`]
//! so each caller decides whether a timeout is an error or just a "no".

pub mod conditions;
pub mod poller;
mod waiter;

pub use poller::{ElementPoller, ElementPollerTicker, DEFAULT_INTERVAL, DEFAULT_TIMEOUT};
pub use waiter::{SessionWaitable, WaitOutcome, Waiter};
