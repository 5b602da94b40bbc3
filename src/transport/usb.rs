//! # USB Line-Printer Transport
//!
//! Talks to a USB receipt printer through the Linux `usblp` driver, which
//! exposes each printer as a character device (`/dev/usb/lp0`, `lp1`, ...).
//!
//! ## Setup (Linux)
//!
//! ```bash
//! # The printer shows up once plugged in
//! $ ls /dev/usb/
//! lp0
//!
//! # Grant access without root (or add a udev rule)
//! $ sudo usermod -aG lp $USER
//! ```
//!
//! ## Reconnection
//!
//! A printer that is power-cycled or unplugged invalidates the open file
//! handle; writes then fail with `ENODEV` or `EIO`. [`UsbTransport::open`]
//! drops the stale handle and opens the device path again, which is what the
//! connection guard calls after a failed probe.
//!
//! ## Chunked Writes
//!
//! Large blocks (raster images) are written in chunks with a small delay
//! between them so the printer's receive buffer keeps up.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::Device;

/// Default usblp device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # USB Printer Transport
///
/// ## Example
///
/// ```no_run
/// use escpos_generator::transport::{Device, UsbTransport};
/// use escpos_generator::protocol::commands;
///
/// let mut transport = UsbTransport::open_path("/dev/usb/lp0")?;
/// transport.write_all(&commands::init())?;
///
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct UsbTransport {
    path: PathBuf,
    file: Option<File>,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl UsbTransport {
    /// Create a transport for `path` without opening it yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        }
    }

    /// Create and open a transport.
    ///
    /// ## Errors
    ///
    /// Returns an error if the device doesn't exist or permission is denied
    /// (the user may need to be in the `lp` group).
    pub fn open_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut transport = Self::new(path);
        transport.open()?;
        Ok(transport)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    fn file_mut(&mut self) -> io::Result<&mut File> {
        self.file.as_mut().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotConnected,
                format!("{} is not open", self.path.display()),
            )
        })
    }

    /// Run a write, dropping the handle if it fails so the next probe fails
    /// fast instead of reusing a dead descriptor.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let result = op(self.file_mut()?);
        if result.is_err() {
            self.file = None;
        }
        result
    }
}

impl Device for UsbTransport {
    fn probe(&mut self) -> io::Result<()> {
        self.guarded(|file| {
            file.write_all(&crate::protocol::commands::probe())?;
            file.flush()
        })
    }

    fn open(&mut self) -> io::Result<()> {
        self.file = None;
        let file = OpenOptions::new().write(true).open(&self.path).map_err(|e| {
            io::Error::new(e.kind(), format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        debug!("opened {}", self.path.display());
        self.file = Some(file);
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        let chunk_size = self.chunk_size;
        let chunk_delay = self.chunk_delay;
        self.guarded(|file| {
            if data.len() <= chunk_size {
                file.write_all(data)?;
            } else {
                for chunk in data.chunks(chunk_size) {
                    file.write_all(chunk)?;
                    if !chunk_delay.is_zero() {
                        thread::sleep(chunk_delay);
                    }
                }
            }
            file.flush()
        })
    }
}

/// List `usblp` devices present under `/dev/usb`, sorted by name.
pub fn list_devices() -> Vec<PathBuf> {
    list_devices_in(Path::new("/dev/usb"))
}

fn list_devices_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut devices: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("lp"))
        })
        .collect();
    devices.sort();
    devices
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("escpos-usb-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_default_device_path() {
        assert_eq!(DEFAULT_DEVICE, "/dev/usb/lp0");
    }

    #[test]
    fn test_unopened_transport_fails() {
        let mut transport = UsbTransport::new("/nonexistent/lp0");
        assert!(!transport.is_open());
        assert_eq!(transport.probe().unwrap_err().kind(), io::ErrorKind::NotConnected);
        assert!(transport.write_all(b"x").is_err());
    }

    #[test]
    fn test_open_missing_device_fails() {
        let mut transport = UsbTransport::new("/nonexistent/lp0");
        assert!(transport.open().is_err());
        assert!(!transport.is_open());
    }

    #[test]
    fn test_writes_reach_file() {
        let path = temp_path("writes");
        File::create(&path).unwrap();

        let mut transport = UsbTransport::open_path(&path).unwrap();
        transport.set_chunk_size(3);
        transport.set_chunk_delay(Duration::ZERO);
        transport.probe().unwrap();
        transport.write_all(b"hello world").unwrap();

        let written = fs::read(&path).unwrap();
        assert_eq!(written, b"\x00hello world");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_write_is_noop() {
        let mut transport = UsbTransport::new("/nonexistent/lp0");
        assert!(transport.write_all(&[]).is_ok());
    }

    #[test]
    fn test_list_devices_filters_and_sorts() {
        let dir = temp_path("devdir");
        fs::create_dir_all(&dir).unwrap();
        for name in ["lp1", "lp0", "hiddev0"] {
            File::create(dir.join(name)).unwrap();
        }

        let devices = list_devices_in(&dir);
        assert_eq!(devices, vec![dir.join("lp0"), dir.join("lp1")]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_devices_missing_dir() {
        assert!(list_devices_in(Path::new("/nonexistent/usb")).is_empty());
    }
}
