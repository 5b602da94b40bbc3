//! # In-Memory Transport
//!
//! A [`Device`] that records every byte written, with scriptable probe,
//! open and write failures. Used by tests and by the CLI's `--dry-run`.
//!
//! ```
//! use escpos_generator::transport::{Device, MemoryDevice};
//!
//! let mut device = MemoryDevice::new().fail_probes(1);
//! assert!(device.probe().is_err());
//! assert!(device.probe().is_ok());
//!
//! device.write_all(b"abc").unwrap();
//! assert_eq!(device.bytes(), b"abc");
//! ```

use std::io;

use super::Device;

#[derive(Debug, Clone, Default)]
pub struct MemoryDevice {
    written: Vec<u8>,
    probe_failures: u32,
    open_failures: u32,
    write_failures: u32,
    writes_before_failure: u32,
    probes: u32,
    opens: u32,
}

impl MemoryDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `n` probes.
    pub fn fail_probes(mut self, n: u32) -> Self {
        self.probe_failures = n;
        self
    }

    /// Fail the next `n` open attempts.
    pub fn fail_opens(mut self, n: u32) -> Self {
        self.open_failures = n;
        self
    }

    /// Fail the next `n` writes.
    pub fn fail_writes(mut self, n: u32) -> Self {
        self.write_failures = n;
        self
    }

    /// Let the next `ok` writes through, then fail `n`.
    pub fn fail_writes_after(mut self, ok: u32, n: u32) -> Self {
        self.writes_before_failure = ok;
        self.write_failures = n;
        self
    }

    /// Everything written so far (probes are not recorded).
    pub fn bytes(&self) -> &[u8] {
        &self.written
    }

    /// Take the captured bytes, leaving the buffer empty.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.written)
    }

    pub fn probe_count(&self) -> u32 {
        self.probes
    }

    pub fn open_count(&self) -> u32 {
        self.opens
    }
}

fn consume(counter: &mut u32) -> bool {
    if *counter > 0 {
        *counter -= 1;
        true
    } else {
        false
    }
}

impl Device for MemoryDevice {
    fn probe(&mut self) -> io::Result<()> {
        self.probes += 1;
        if consume(&mut self.probe_failures) {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "probe failed"));
        }
        Ok(())
    }

    fn open(&mut self) -> io::Result<()> {
        self.opens += 1;
        if consume(&mut self.open_failures) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "open failed"));
        }
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        if !consume(&mut self.writes_before_failure) && consume(&mut self.write_failures) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "write failed"));
        }
        self.written.extend_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_writes() {
        let mut device = MemoryDevice::new();
        device.write_all(b"ab").unwrap();
        device.write_all(b"c").unwrap();
        assert_eq!(device.bytes(), b"abc");
        assert_eq!(device.take_bytes(), b"abc");
        assert!(device.bytes().is_empty());
    }

    #[test]
    fn test_scripted_failures_are_consumed() {
        let mut device = MemoryDevice::new().fail_opens(2).fail_writes(1);
        assert!(device.open().is_err());
        assert!(device.open().is_err());
        assert!(device.open().is_ok());
        assert_eq!(device.open_count(), 3);

        assert!(device.write_all(b"lost").is_err());
        device.write_all(b"kept").unwrap();
        assert_eq!(device.bytes(), b"kept");
    }

    #[test]
    fn test_failures_after_successful_writes() {
        let mut device = MemoryDevice::new().fail_writes_after(1, 1);
        device.write_all(b"a").unwrap();
        assert!(device.write_all(b"b").is_err());
        device.write_all(b"c").unwrap();
        assert_eq!(device.bytes(), b"ac");
    }

    #[test]
    fn test_probe_counts() {
        let mut device = MemoryDevice::new().fail_probes(1);
        assert!(device.probe().is_err());
        assert!(device.probe().is_ok());
        assert_eq!(device.probe_count(), 2);
    }
}
