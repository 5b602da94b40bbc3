//! # Printer Transport Layer
//!
//! This module provides the byte-level connection to a printer.
//!
//! ## Available Transports
//!
//! - [`usb`]: Linux `usblp` character device (`/dev/usb/lp0`)
//! - [`memory`]: In-memory capture with scriptable failures, for tests and
//!   dry runs
//!
//! Both implement [`Device`], the capability the connection guard probes and
//! reopens and the ESC/POS encoder writes through.

pub mod memory;
pub mod usb;

use std::io;

pub use memory::MemoryDevice;
pub use usb::UsbTransport;

/// A reconnectable byte sink.
pub trait Device {
    /// Cheap liveness check that leaves the printer state untouched.
    fn probe(&mut self) -> io::Result<()>;

    /// (Re)open the connection, dropping any previous handle.
    fn open(&mut self) -> io::Result<()>;

    /// Write all of `data`.
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn probe(&mut self) -> io::Result<()> {
        (**self).probe()
    }

    fn open(&mut self) -> io::Result<()> {
        (**self).open()
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        (**self).write_all(data)
    }
}
