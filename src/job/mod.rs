//! # JSON Print Jobs
//!
//! Deserialize a JSON document into a sequence of generator operations.
//!
//! Every instruction is validated before anything is sent, so a job with a
//! bad barcode prints nothing at all. Instructions skipped because the
//! printer was unreachable do not stop the job; they are counted in the
//! [`JobReport`].
//!
//! ## Example
//!
//! ```
//! use escpos_generator::job::PrintJob;
//! use escpos_generator::protocol::EscPos;
//! use escpos_generator::transport::MemoryDevice;
//! use escpos_generator::{Generator, GeneratorConfig};
//!
//! let json = r#"{
//!     "instructions": [
//!         {"type": "text", "content": "HELLO", "style": {"bold": true, "align": "center"}},
//!         {"type": "rule"},
//!         {"type": "barcode", "format": "code39", "data": "ABC123"}
//!     ]
//! }"#;
//!
//! let job = PrintJob::from_json(json)?;
//! let mut generator = Generator::new(EscPos::new(MemoryDevice::new(), 372), GeneratorConfig::default());
//! let report = job.run(&mut generator)?;
//!
//! // Three instructions plus the closing cut.
//! assert_eq!(report.done, 4);
//! # Ok::<(), escpos_generator::PosError>(())
//! ```

mod convert;
mod schema;

pub use convert::Instruction;
pub use schema::{
    JsonBarcode, JsonFeed, JsonImage, JsonInstruction, JsonQr, JsonRule, JsonStyle, JsonText,
    PrintJob,
};

use tracing::debug;

use crate::error::PosError;
use crate::generator::{Generator, Outcome};
use crate::protocol::PrinterProtocol;

/// Counts of instructions sent and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobReport {
    pub done: usize,
    pub skipped: usize,
}

impl JobReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Done => self.done += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }
}

impl PrintJob {
    pub fn from_json(json: &str) -> Result<Self, PosError> {
        serde_json::from_str(json).map_err(|e| PosError::Job(e.to_string()))
    }

    /// Validate, then run every instruction and the closing cut.
    pub fn run<P: PrinterProtocol>(
        &self,
        generator: &mut Generator<P>,
    ) -> Result<JobReport, PosError> {
        let instructions = self.validate()?;
        let mut report = JobReport::default();

        for instruction in &instructions {
            debug!("running {:?}", instruction);
            report.record(instruction.run(generator)?);
        }
        if self.cut {
            report.record(generator.cut()?);
        }
        Ok(report)
    }
}

impl Instruction {
    pub fn run<P: PrinterProtocol>(&self, generator: &mut Generator<P>) -> Result<Outcome, PosError> {
        match self {
            Instruction::Text {
                content,
                lines_after,
                style,
                persist,
            } => generator.text(content, *lines_after, style.as_ref(), *persist),
            Instruction::Rule { half } => generator.rule(*half),
            Instruction::Qr(code) => generator.qr(code),
            Instruction::Barcode(code) => generator.barcode(code),
            Instruction::Image { path, align } => generator.image(path, *align),
            Instruction::Feed(lines) => generator.empty_lines(*lines),
            Instruction::Cut => generator.cut(),
            Instruction::SetStyle(style) => generator.set_style(style),
            Instruction::TestPage => generator.test_page(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeneratorConfig;
    use crate::generator::diagnostics::MemoryDiagnostics;
    use crate::generator::guard::RecordingSleeper;
    use crate::protocol::EscPos;
    use crate::style::Style;
    use crate::transport::MemoryDevice;
    use pretty_assertions::assert_eq;

    fn generator(device: MemoryDevice) -> Generator<EscPos<MemoryDevice>> {
        Generator::with_parts(
            EscPos::new(device, 372),
            GeneratorConfig::default(),
            Box::new(RecordingSleeper::new()),
            Box::new(MemoryDiagnostics::new()),
        )
    }

    #[test]
    fn test_report_counts_cut() {
        let job = PrintJob::from_json(r#"{"instructions": [{"type": "feed", "lines": 2}]}"#).unwrap();
        let mut g = generator(MemoryDevice::new());
        let report = job.run(&mut g).unwrap();
        assert_eq!(report, JobReport { done: 2, skipped: 0 });
        assert_eq!(
            g.printer().device_ref().bytes(),
            &[0x0A, 0x0A, 0x1D, 0x56, 0x41, 0x03]
        );
    }

    #[test]
    fn test_invalid_job_sends_nothing() {
        let job = PrintJob::from_json(
            r#"{"instructions": [
                {"type": "text", "content": "before"},
                {"type": "qr", "data": ""}
            ]}"#,
        )
        .unwrap();
        let mut g = generator(MemoryDevice::new());
        assert!(matches!(job.run(&mut g), Err(PosError::Validation(_))));
        assert!(g.printer().device_ref().bytes().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(PrintJob::from_json("{"), Err(PosError::Job(_))));
    }

    #[test]
    fn test_skipped_instructions_counted() {
        // First probe fails and both reopens fail; later probes succeed.
        let device = MemoryDevice::new().fail_probes(1).fail_opens(2);
        let job = PrintJob::from_json(
            r#"{"instructions": [
                {"type": "text", "content": "lost"},
                {"type": "text", "content": "kept"}
            ], "cut": false}"#,
        )
        .unwrap();
        let mut g = generator(device);
        let report = job.run(&mut g).unwrap();
        assert_eq!(report, JobReport { done: 1, skipped: 1 });
        assert_eq!(g.printer().device_ref().bytes(), b"kept\n");
    }

    #[test]
    fn test_style_instruction_persists() {
        let job = PrintJob::from_json(
            r#"{"instructions": [{"type": "style", "bold": true}], "cut": false}"#,
        )
        .unwrap();
        let mut g = generator(MemoryDevice::new());
        job.run(&mut g).unwrap();
        assert_eq!(g.current_style(), &Style::defaults().bold(true));
    }
}
