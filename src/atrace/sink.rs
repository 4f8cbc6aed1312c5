/*!
 * Atrace Sink
 * Lifecycle of the shared marker handle and enablement propagation
 *
 * # Locking
 *
 * Enable, disable and category-flag updates are serialized by one mutex.
 * The encode path never takes it: the handle lives in an `ArcSwapOption`
 * and producers do a single lock-free load. A disable racing with an encode
 * can at worst let that encode finish its writes on the handle it already
 * loaded; the file is closed once the last such in-flight write drops its
 * reference.
 */

use super::category::{Category, CategoryFlags, CategoryRegistry};
use super::device::{DeviceOpener, MarkerDevice, MarkerFile};
use super::encoder::write_event;
use super::event::{TraceArg, TraceEvent};
use super::format::ValueFormat;
use super::scoped::ScopedTrace;
use crate::core::config::AtraceConfig;
use crate::core::errors::{AtraceError, AtraceResult};
use crate::core::types::Pid;
use arc_swap::ArcSwapOption;
use parking_lot::{Mutex, MutexGuard};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

type DeviceHandle = Box<dyn MarkerDevice>;

/// Owner of the single write handle to the kernel marker device
///
/// Share it between producers as `Arc<AtraceSink>`. The handle exists between
/// a successful [`enable`](Self::enable) and the next
/// [`disable`](Self::disable); both are idempotent.
pub struct AtraceSink {
    handle: ArcSwapOption<DeviceHandle>,
    categories: Mutex<CategoryRegistry>,
    opener: Box<dyn DeviceOpener>,
    pid: Pid,
    format: ValueFormat,
}

impl AtraceSink {
    /// Create a closed sink writing to the configured marker file
    pub fn new(config: &AtraceConfig) -> Self {
        Self::with_opener(config, MarkerFile::new(config.marker_path.clone()))
    }

    /// Create a closed sink using a custom device opener
    pub fn with_opener(config: &AtraceConfig, opener: impl DeviceOpener + 'static) -> Self {
        Self {
            handle: ArcSwapOption::empty(),
            categories: Mutex::new(CategoryRegistry::new()),
            opener: Box::new(opener),
            pid: config.effective_pid(),
            format: config.value_format,
        }
    }

    /// Acquire the shared lock
    pub fn lock(&self) -> AtraceLock<'_> {
        AtraceLock {
            sink: self,
            categories: self.categories.lock(),
        }
    }

    /// Open the marker device if it is not open yet
    ///
    /// Failure is not fatal: it is logged as a warning, the sink stays closed
    /// and every encode is a no-op until a later enable succeeds.
    pub fn enable(&self) -> bool {
        match self.try_enable() {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    path = %self.opener.path().display(),
                    error = %e,
                    "Couldn't open trace marker, atrace output disabled"
                );
                false
            }
        }
    }

    /// Like [`enable`](Self::enable), but hands the open error to the caller
    pub fn try_enable(&self) -> AtraceResult<()> {
        self.lock().enable()
    }

    /// Close the marker device if it is open
    pub fn disable(&self) {
        self.lock().disable();
    }

    /// Whether the sink currently holds a handle (lock-free)
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.handle.load().is_some()
    }

    /// Pid written into every record
    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn value_format(&self) -> ValueFormat {
        self.format
    }

    pub fn marker_path(&self) -> &Path {
        self.opener.path()
    }

    /// Register a category, its ATRACE bit reflecting the current sink state
    pub fn register_category(&self, name: &str) -> Arc<Category> {
        self.lock().register_category(name)
    }

    /// Write `event` to the marker device
    ///
    /// Does not take the shared lock. A closed sink makes this a no-op, and
    /// write errors are ignored.
    #[inline]
    pub fn encode(&self, event: &TraceEvent<'_>) {
        let guard = self.handle.load();
        if let Some(device) = &*guard {
            write_event(&***device, self.pid, self.format, event);
        }
    }

    pub fn begin(&self, category: &str, name: &str, args: &[TraceArg<'_>]) {
        self.encode(&TraceEvent::begin(category, name).with_args(args));
    }

    pub fn end(&self, category: &str, name: &str) {
        self.encode(&TraceEvent::end(category, name));
    }

    pub fn instant(&self, category: &str, name: &str, args: &[TraceArg<'_>]) {
        self.encode(&TraceEvent::instant(category, name).with_args(args));
    }

    pub fn counter(&self, category: &str, name: &str, args: &[TraceArg<'_>]) {
        self.encode(&TraceEvent::counter(category, name).with_args(args));
    }

    /// Begin a span that ends when the returned guard drops
    pub fn scoped<'a>(&'a self, category: &'a str, name: &'a str) -> ScopedTrace<'a> {
        ScopedTrace::new(self, category, name, &[])
    }
}

impl std::fmt::Debug for AtraceSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtraceSink")
            .field("marker_path", &self.opener.path())
            .field("enabled", &self.is_enabled())
            .field("pid", &self.pid)
            .field("format", &self.format)
            .finish()
    }
}

/// The sink's shared lock, held
///
/// Operations that require the lock live here, so holding one of these is
/// the proof the precondition is met.
pub struct AtraceLock<'a> {
    sink: &'a AtraceSink,
    categories: MutexGuard<'a, CategoryRegistry>,
}

impl AtraceLock<'_> {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.sink.handle.load().is_some()
    }

    /// Set the ATRACE bit in `flags` when the sink is open, clear it otherwise
    #[inline]
    pub fn apply_enabled_flag(&self, flags: &mut CategoryFlags) {
        flags.set(CategoryFlags::ATRACE, self.is_open());
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn register_category(&mut self, name: &str) -> Arc<Category> {
        let mut initial = CategoryFlags::NONE;
        self.apply_enabled_flag(&mut initial);
        self.categories.get_or_insert(name, initial)
    }

    /// Open the device unless already open
    pub fn enable(&mut self) -> AtraceResult<()> {
        if self.is_open() {
            return Ok(());
        }

        let device = self
            .sink
            .opener
            .open()
            .map_err(|source| AtraceError::DeviceOpen {
                path: self.sink.opener.path().to_path_buf(),
                source,
            })?;
        self.sink.handle.store(Some(Arc::new(device)));
        self.propagate();

        debug!(path = %self.sink.opener.path().display(), "atrace enabled");
        Ok(())
    }

    /// Release the device handle unless already closed
    pub fn disable(&mut self) {
        if self.sink.handle.swap(None).is_some() {
            self.propagate();
            debug!(path = %self.sink.opener.path().display(), "atrace disabled");
        }
    }

    fn propagate(&self) {
        let open = self.is_open();
        self.categories
            .update_all(|flags| flags.set(CategoryFlags::ATRACE, open));
    }
}
