//! # posgen CLI
//!
//! Command-line interface for ESC/POS receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print the code-page test grid
//! posgen test-page
//!
//! # Print a line of text, bold and centered at double size
//! posgen text "HELLO" --bold --center --size 2x2
//!
//! # Run a JSON print job on an 80mm printer
//! posgen --paper 80mm print job.json
//!
//! # Encode into a file instead of printing
//! posgen --dry-run out.bin test-page
//!
//! # List connected USB printers
//! posgen devices
//! ```
//!
//! Settings not given on the command line come from `POS_PAPER`,
//! `POS_REOPEN_ATTEMPTS`, `POS_BACKOFF_MS` and `POS_STRICT`.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use escpos_generator::{
    Generator, GeneratorConfig, Outcome, PaperSize, PosError, Style,
    job::PrintJob,
    protocol::{EscPos, PrinterProtocol, text::Alignment},
    style::TextSize,
    transport::{Device, MemoryDevice, UsbTransport, usb},
};

/// posgen - ESC/POS thermal receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "posgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer device path
    #[arg(long, global = true, default_value = usb::DEFAULT_DEVICE)]
    device: PathBuf,

    /// Paper width: 58mm or 80mm (overrides POS_PAPER)
    #[arg(long, global = true)]
    paper: Option<PaperSize>,

    /// Fail instead of skipping when the printer is unreachable
    #[arg(long, global = true)]
    strict: bool,

    /// Write the encoded bytes to FILE instead of the printer
    #[arg(long, global = true, value_name = "FILE")]
    dry_run: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the code-page character grid
    TestPage,

    /// Print one line of text
    Text {
        content: String,

        #[arg(long)]
        bold: bool,

        #[arg(long)]
        center: bool,

        /// Character size as WxH, each 1-8
        #[arg(long, value_parser = parse_size)]
        size: Option<(TextSize, TextSize)>,

        /// Blank lines after the text
        #[arg(long, default_value_t = 1)]
        lines_after: u8,
    },

    /// Run a JSON print job
    Print {
        /// Job file
        job: PathBuf,
    },

    /// List USB printers under /dev/usb
    Devices,
}

fn parse_size(s: &str) -> Result<(TextSize, TextSize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let parse = |v: &str| -> Result<TextSize, String> {
        let n: u8 = v.trim().parse().map_err(|_| format!("invalid multiplier '{}'", v))?;
        TextSize::new(n).map_err(|e| e.to_string())
    };
    Ok((parse(w)?, parse(h)?))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PosError> {
    let cli = Cli::parse();

    if let Commands::Devices = cli.command {
        let devices = usb::list_devices();
        if devices.is_empty() {
            println!("No USB printers found under /dev/usb");
        }
        for device in devices {
            println!("{}", device.display());
        }
        return Ok(());
    }

    let mut config = GeneratorConfig::from_env()?;
    if let Some(paper) = cli.paper {
        config.paper = paper;
    }
    config.strict |= cli.strict;
    let width = config.paper.width_dots();

    match cli.dry_run {
        Some(ref out) => {
            let mut generator = Generator::new(EscPos::new(MemoryDevice::new(), width), config);
            execute(&mut generator, &cli.command)?;
            let bytes = generator.into_printer().into_device().take_bytes();
            fs::write(out, &bytes)?;
            println!("Wrote {} bytes to {}", bytes.len(), out.display());
        }
        None => {
            // Not opened here: the first guarded call opens it.
            let transport = UsbTransport::new(&cli.device);
            let mut generator = Generator::new(EscPos::new(transport, width), config);
            execute(&mut generator, &cli.command)?;
        }
    }
    Ok(())
}

fn execute<D: Device>(
    generator: &mut Generator<EscPos<D>>,
    command: &Commands,
) -> Result<(), PosError> {
    if generator.init()?.is_skipped() {
        eprintln!("Printer unreachable, nothing printed");
        return Ok(());
    }

    match command {
        Commands::TestPage => {
            report(generator.test_page()?);
        }
        Commands::Text {
            content,
            bold,
            center,
            size,
            lines_after,
        } => {
            let mut style = Style::new();
            if *bold {
                style = style.bold(true);
            }
            if *center {
                style = style.align(Alignment::Center);
            }
            if let Some((width, height)) = size {
                style = style.size(*width, *height);
            }
            report(print_line(generator, content, style, *lines_after)?);
        }
        Commands::Print { job } => {
            let json = fs::read_to_string(job)?;
            let report = PrintJob::from_json(&json)?.run(generator)?;
            info!("job {}: {} done, {} skipped", job.display(), report.done, report.skipped);
            println!(
                "Printed {} instructions ({} skipped)",
                report.done, report.skipped
            );
        }
        Commands::Devices => {}
    }
    Ok(())
}

/// Print one line and cut. A skipped line is not followed by a cut.
fn print_line<P: PrinterProtocol>(
    generator: &mut Generator<P>,
    content: &str,
    style: Style,
    lines_after: u8,
) -> Result<Outcome, PosError> {
    let style = (!style.is_empty()).then_some(style);
    let printed = generator.text(content, lines_after, style.as_ref(), false)?;
    if printed.is_skipped() {
        return Ok(printed);
    }
    generator.cut()
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Done => println!("Printed successfully!"),
        Outcome::Skipped => eprintln!("Printer unreachable, skipped"),
    }
}
