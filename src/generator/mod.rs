//! # Print Generator
//!
//! [`Generator`] drives one printer session. It remembers the style the
//! printer was last put into and, for every content operation, sends only
//! what has to change.
//!
//! ## Reconciliation
//!
//! An operation may carry a style override. With `current` the session style:
//!
//! 1. `merge(requested, current, PreserveNull)` is sent. Fields the request
//!    repeats from the current style are left out.
//! 2. With `persist`, the session becomes
//!    `merge(requested, current, ForceConcrete)`.
//! 3. The content is emitted.
//! 4. Without `persist`, `merge(current, requested, PreserveNull)` is sent to
//!    put the printer back.
//!
//! Every device-facing call first goes through the [`ConnectionGuard`]. An
//! unreachable printer skips the operation entirely and reports
//! [`Outcome::Skipped`], or [`PosError::DeviceUnreachable`] in strict mode.
//!
//! ```
//! use escpos_generator::{Generator, GeneratorConfig, Outcome, Style};
//! use escpos_generator::protocol::EscPos;
//! use escpos_generator::transport::MemoryDevice;
//!
//! let printer = EscPos::new(MemoryDevice::new(), 372);
//! let mut generator = Generator::new(printer, GeneratorConfig::default());
//!
//! let outcome = generator.text("TOTAL", 1, Some(&Style::new().bold(true)), false)?;
//! assert_eq!(outcome, Outcome::Done);
//! assert_eq!(generator.current_style(), &Style::defaults());
//! # Ok::<(), escpos_generator::PosError>(())
//! ```

pub mod diagnostics;
pub mod guard;
pub mod layout;

use std::path::Path;

use crate::codes::{Barcode, QrCode};
use crate::error::PosError;
use crate::printer::{GeneratorConfig, column_capacity};
use crate::protocol::PrinterProtocol;
use crate::protocol::cp437;
use crate::protocol::text::{Alignment, Font};
use crate::style::{MergeMode, Style, merge};

use diagnostics::{Diagnostics, TracingDiagnostics};
use guard::{ConnectionGuard, ConnectionHealth, Sleeper, ThreadSleeper};

/// What happened to a guarded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Sent to the printer.
    Done,
    /// The printer was unreachable; nothing was sent and the session is
    /// unchanged.
    Skipped,
}

impl Outcome {
    pub fn is_done(self) -> bool {
        self == Outcome::Done
    }

    pub fn is_skipped(self) -> bool {
        self == Outcome::Skipped
    }
}

/// The style the printer is believed to be in. Always fully concrete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    current: Style,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current: Style::defaults(),
        }
    }
}

impl SessionState {
    pub fn style(&self) -> &Style {
        &self.current
    }
}

/// Style-aware print session over a [`PrinterProtocol`].
pub struct Generator<P> {
    printer: P,
    config: GeneratorConfig,
    session: SessionState,
    guard: ConnectionGuard,
    diagnostics: Box<dyn Diagnostics>,
}

impl<P: std::fmt::Debug> std::fmt::Debug for Generator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("printer", &self.printer)
            .field("config", &self.config)
            .field("session", &self.session)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl<P: PrinterProtocol> Generator<P> {
    /// A generator that sleeps on the calling thread between reopen attempts
    /// and logs through `tracing`.
    pub fn new(printer: P, config: GeneratorConfig) -> Self {
        Self::with_parts(
            printer,
            config,
            Box::new(ThreadSleeper),
            Box::new(TracingDiagnostics),
        )
    }

    pub fn with_parts(
        printer: P,
        config: GeneratorConfig,
        sleeper: Box<dyn Sleeper>,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Self {
        let guard = ConnectionGuard::with_sleeper(config.reopen_attempts, config.backoff, sleeper);
        Self {
            printer,
            config,
            session: SessionState::default(),
            guard,
            diagnostics,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Read-only view of the session style.
    pub fn current_style(&self) -> &Style {
        self.session.style()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Result of the most recent reachability check.
    pub fn health(&self) -> ConnectionHealth {
        self.guard.health()
    }

    pub fn printer(&self) -> &P {
        &self.printer
    }

    pub fn printer_mut(&mut self) -> &mut P {
        &mut self.printer
    }

    pub fn into_printer(self) -> P {
        self.printer
    }

    /// Columns per line for the paper and the session font.
    pub fn max_chars_per_line(&self) -> usize {
        let font = self.session.current.font.get().unwrap_or(Font::A);
        column_capacity(self.config.paper, font)
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Run `operation` with an optional style override.
    ///
    /// A transient override is reverted afterwards, even when the operation
    /// fails; a persisted one becomes the session style. If the revert
    /// itself cannot be sent, the session records the override as the
    /// printer's mode.
    pub fn apply<F>(
        &mut self,
        requested: Option<&Style>,
        persist: bool,
        operation: F,
    ) -> Result<Outcome, PosError>
    where
        F: FnOnce(&mut P) -> Result<(), PosError>,
    {
        self.guarded("apply", |generator| {
            generator.reconcile(requested, persist, operation)
        })
    }

    fn reconcile<F>(
        &mut self,
        requested: Option<&Style>,
        persist: bool,
        operation: F,
    ) -> Result<(), PosError>
    where
        F: FnOnce(&mut P) -> Result<(), PosError>,
    {
        let Some(requested) = requested else {
            return operation(&mut self.printer);
        };

        let current = self.session.current;
        let target = merge(requested, &current, MergeMode::ForceConcrete);
        let delta = merge(requested, &current, MergeMode::PreserveNull);
        self.printer.set_style(&delta.with_size_group_from(&target))?;

        if persist {
            self.session.current = target;
            return operation(&mut self.printer);
        }

        let result = operation(&mut self.printer);
        let restore = merge(&current, requested, MergeMode::PreserveNull);
        let restored = self
            .printer
            .set_style(&restore.with_size_group_from(&current));
        if restored.is_err() {
            self.diagnostics
                .warn("Style restore failed, session keeps the override");
            self.session.current = target;
        }
        result.and(restored)
    }

    /// Check the device, then run `operation` or report it skipped.
    fn guarded<F>(&mut self, name: &str, operation: F) -> Result<Outcome, PosError>
    where
        F: FnOnce(&mut Self) -> Result<(), PosError>,
    {
        let reachable = self
            .guard
            .ensure_reachable(self.printer.device(), self.diagnostics.as_ref());
        if !reachable {
            self.diagnostics
                .warn(&format!("Printer unreachable, skipping {}", name));
            if self.config.strict {
                return Err(PosError::DeviceUnreachable);
            }
            return Ok(Outcome::Skipped);
        }
        operation(self)?;
        Ok(Outcome::Done)
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Reset the printer and re-send the full session style.
    pub fn init(&mut self) -> Result<Outcome, PosError> {
        self.guarded("init", |generator| {
            generator.printer.reset()?;
            let current = generator.session.current;
            generator.printer.set_style(&current)
        })
    }

    /// Persistently change the session style without printing anything.
    pub fn set_style(&mut self, style: &Style) -> Result<Outcome, PosError> {
        self.apply(Some(style), true, |_| Ok(()))
    }

    /// Print `content` followed by `lines_after` line feeds.
    pub fn text(
        &mut self,
        content: &str,
        lines_after: u8,
        style: Option<&Style>,
        persist: bool,
    ) -> Result<Outcome, PosError> {
        let encoded = cp437::encode(content);
        self.apply(style, persist, |printer| {
            printer.write_text(&encoded)?;
            printer.feed(lines_after)
        })
    }

    /// Centered dash rule across the line, or half of it.
    pub fn rule(&mut self, half: bool) -> Result<Outcome, PosError> {
        let line = layout::rule_line(self.max_chars_per_line(), half);
        let centered = Style::new().align(Alignment::Center);
        self.text(&line, 1, Some(&centered), false)
    }

    pub fn qr(&mut self, code: &QrCode) -> Result<Outcome, PosError> {
        let centered = Style::new().align(Alignment::Center);
        self.apply(Some(&centered), false, |printer| printer.draw_qr(code))
    }

    pub fn barcode(&mut self, code: &Barcode) -> Result<Outcome, PosError> {
        let centered = Style::new().align(Alignment::Center);
        self.apply(Some(&centered), false, |printer| printer.draw_barcode(code))
    }

    /// Print an image file with the given justification.
    ///
    /// Only the alignment is sent beforehand, and the whole session style is
    /// sent afterwards rather than a delta.
    pub fn image(&mut self, path: &Path, align: Alignment) -> Result<Outcome, PosError> {
        self.guarded("image", |generator| {
            generator.printer.set_style(&Style::new().align(align))?;
            let drawn = generator.printer.draw_image(path);
            let current = generator.session.current;
            let restored = generator.printer.set_style(&current);
            if restored.is_err() {
                generator
                    .diagnostics
                    .warn("Style restore failed, session keeps the image alignment");
                generator.session.current = current.align(align);
            }
            drawn.and(restored)
        })
    }

    pub fn cut(&mut self) -> Result<Outcome, PosError> {
        self.guarded("cut", |generator| generator.printer.cut())
    }

    /// Feed `lines` blank lines. Zero lines does nothing.
    pub fn empty_lines(&mut self, lines: u8) -> Result<Outcome, PosError> {
        if lines == 0 {
            return Ok(Outcome::Done);
        }
        self.guarded("empty_lines", |generator| generator.printer.feed(lines))
    }

    /// Print the code-page grid and cut. The session style is not touched.
    pub fn test_page(&mut self) -> Result<Outcome, PosError> {
        self.guarded("test_page", |generator| {
            let printer = &mut generator.printer;
            printer.feed(1)?;
            printer.write_text(layout::TEST_PAGE_HEADER.as_bytes())?;
            printer.feed(1)?;
            printer.feed(1)?;
            for row in 0..16u8 {
                printer.write_text(&layout::test_page_row(row))?;
                printer.feed(1)?;
            }
            printer.cut()
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
