//! # Connection Guard
//!
//! Checks that the device is reachable before every device-facing
//! operation, reopening it a bounded number of times after a failed probe.
//!
//! ```text
//! probe ──ok──────────────────────────────▶ Reachable
//!   │
//!   fail
//!   ▼
//! open #1 ──ok──▶ Reachable
//!   │ fail
//!   ▼ (backoff)
//! open #2 ──ok──▶ Reachable
//!   │ fail
//!   ▼
//! Unreachable
//! ```
//!
//! The pause between attempts goes through a [`Sleeper`] so it can be
//! observed without blocking.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use super::diagnostics::Diagnostics;
use crate::printer::config::{DEFAULT_BACKOFF, DEFAULT_REOPEN_ATTEMPTS};
use crate::transport::Device;

/// Result of the last reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionHealth {
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

/// Blocks the calling thread between reopen attempts.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Records requested pauses without blocking. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    pauses: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}

pub struct ConnectionGuard {
    attempts: u32,
    backoff: Duration,
    health: ConnectionHealth,
    sleeper: Box<dyn Sleeper>,
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("attempts", &self.attempts)
            .field("backoff", &self.backoff)
            .field("health", &self.health)
            .finish_non_exhaustive()
    }
}

impl Default for ConnectionGuard {
    fn default() -> Self {
        Self::new(DEFAULT_REOPEN_ATTEMPTS, DEFAULT_BACKOFF)
    }
}

impl ConnectionGuard {
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self::with_sleeper(attempts, backoff, Box::new(ThreadSleeper))
    }

    pub fn with_sleeper(attempts: u32, backoff: Duration, sleeper: Box<dyn Sleeper>) -> Self {
        Self {
            attempts,
            backoff,
            health: ConnectionHealth::Unknown,
            sleeper,
        }
    }

    pub fn health(&self) -> ConnectionHealth {
        self.health
    }

    /// Probe `device`, reopening it up to `attempts` times on failure.
    ///
    /// Returns true iff the probe or one of the reopens succeeded.
    pub fn ensure_reachable<D: Device + ?Sized>(
        &mut self,
        device: &mut D,
        diagnostics: &dyn Diagnostics,
    ) -> bool {
        let reachable = self.check(device, diagnostics);
        self.health = if reachable {
            ConnectionHealth::Reachable
        } else {
            ConnectionHealth::Unreachable
        };
        reachable
    }

    fn check<D: Device + ?Sized>(&mut self, device: &mut D, diagnostics: &dyn Diagnostics) -> bool {
        let err = match device.probe() {
            Ok(()) => return true,
            Err(e) => e,
        };
        diagnostics.warn(&format!("Printer probe failed: {}", err));

        for attempt in 1..=self.attempts {
            match device.open() {
                Ok(()) => {
                    diagnostics.info(&format!(
                        "Printer reconnected (attempt {}/{})",
                        attempt, self.attempts
                    ));
                    return true;
                }
                Err(e) => {
                    diagnostics.warn(&format!(
                        "Reconnect attempt {}/{} failed: {}",
                        attempt, self.attempts, e
                    ));
                    if attempt < self.attempts {
                        self.sleeper.sleep(self.backoff);
                    }
                }
            }
        }
        false
    }
}

// ============================================================================
// TESTS
// ============================================================================
