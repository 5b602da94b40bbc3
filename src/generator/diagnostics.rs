//! # Diagnostics Sink
//!
//! Where the generator reports reconnects and skipped operations.
//! [`TracingDiagnostics`] forwards to `tracing`; [`MemoryDiagnostics`] keeps
//! the messages so tests can inspect them.
//!
//! ```
//! use escpos_generator::generator::diagnostics::{Diagnostics, Level, MemoryDiagnostics};
//!
//! let sink = MemoryDiagnostics::new();
//! let handle = sink.clone();
//! sink.warn("probe failed");
//!
//! assert_eq!(handle.records(), vec![(Level::Warn, "probe failed".to_string())]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

pub trait Diagnostics {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// Records messages in memory. Clones share the same record list.
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagnostics {
    records: Rc<RefCell<Vec<(Level, String)>>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Level::Info)
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn info(&self, message: &str) {
        self.records.borrow_mut().push((Level::Info, message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.records.borrow_mut().push((Level::Warn, message.to_string()));
    }
}
