/*!
 * Marker Device
 * Write-only sink the records are delivered to
 *
 * The kernel marker file defines no terminator: each write call is one
 * record. Implementations must preserve that, one `write_record` per record.
 */

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A device accepting independent, unbuffered record writes
pub trait MarkerDevice: Send + Sync {
    /// Deliver one record with a single write call
    fn write_record(&self, record: &[u8]) -> io::Result<usize>;
}

impl MarkerDevice for File {
    #[inline]
    fn write_record(&self, record: &[u8]) -> io::Result<usize> {
        // `&File` is `Write`, so concurrent producers need no exclusive borrow
        (&*self).write(record)
    }
}

/// Opens marker devices on behalf of the sink
pub trait DeviceOpener: Send + Sync {
    /// Open a fresh handle to the device
    fn open(&self) -> io::Result<Box<dyn MarkerDevice>>;

    /// Where the device lives, for diagnostics
    fn path(&self) -> &Path;
}

/// Opens a marker file on disk, write-only
#[derive(Debug, Clone)]
pub struct MarkerFile {
    path: PathBuf,
}

impl MarkerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DeviceOpener for MarkerFile {
    fn open(&self) -> io::Result<Box<dyn MarkerDevice>> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        Ok(Box::new(file))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
