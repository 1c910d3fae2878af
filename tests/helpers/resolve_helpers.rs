//! Resolver setup over an in-memory file system.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use msbuild::hir::{ResolveContext, Resolver};
use msbuild::project::{FileSystem, MemoryFileSystem, RuntimeInformation};
use msbuild::syntax::XDocument;
use parking_lot::{Condvar, Mutex};
use tokio_util::sync::CancellationToken;

/// Where test projects live.
pub const PROJECT_DIR: &str = "/work/src";

/// Absolute path of `name` inside [`PROJECT_DIR`].
pub fn project_path(name: &str) -> String {
    format!("{PROJECT_DIR}/{name}")
}

/// An in-memory file system with the given files under [`PROJECT_DIR`].
pub fn memory_fs(files: &[(&str, &str)]) -> Arc<MemoryFileSystem> {
    let fs = Arc::new(MemoryFileSystem::new());
    for (name, text) in files {
        fs.write(project_path(name), *text);
    }
    fs
}

pub fn resolver_for(fs: &Arc<MemoryFileSystem>) -> Resolver {
    Resolver::new(fs.clone(), RuntimeInformation::default())
}

/// Resolve `text` as the project `name`.
pub fn resolve_text(
    resolver: &Resolver,
    name: &str,
    text: &str,
    previous: Option<&ResolveContext>,
) -> ResolveContext {
    let document = Arc::new(XDocument::parse(text));
    resolver
        .resolve(
            Path::new(&project_path(name)),
            document,
            previous,
            &CancellationToken::new(),
        )
        .expect("resolution should not be cancelled")
}

/// Resolve a single project with no other files.
pub fn resolve_single(text: &str) -> ResolveContext {
    let fs = memory_fs(&[]);
    resolve_text(&resolver_for(&fs), "test.proj", text, None)
}

// ============================================================================
// GATED FILE SYSTEM
// ============================================================================

#[derive(Default)]
struct Gate {
    open: bool,
    readers: usize,
    finished: usize,
}

/// Wraps a [`MemoryFileSystem`] so that reads block until [`GatedFileSystem::open`].
///
/// Lets a test hold a background resolution at a known point.
pub struct GatedFileSystem {
    inner: Arc<MemoryFileSystem>,
    gate: Mutex<Gate>,
    changed: Condvar,
}

impl GatedFileSystem {
    pub fn new(inner: Arc<MemoryFileSystem>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            gate: Mutex::new(Gate::default()),
            changed: Condvar::new(),
        })
    }

    /// Let every blocked and future read through.
    pub fn open(&self) {
        self.gate.lock().open = true;
        self.changed.notify_all();
    }

    /// Block until some read is waiting at the gate.
    pub fn wait_for_reader(&self, timeout: Duration) -> bool {
        self.wait_until(timeout, |gate| gate.readers > 0)
    }

    /// Block until `count` reads have returned.
    pub fn wait_for_finished(&self, count: usize, timeout: Duration) -> bool {
        self.wait_until(timeout, |gate| gate.finished >= count)
    }

    fn wait_until(&self, timeout: Duration, done: impl Fn(&Gate) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        let mut gate = self.gate.lock();
        while !done(&gate) {
            if self.changed.wait_until(&mut gate, deadline).timed_out() {
                return done(&gate);
            }
        }
        true
    }
}

impl FileSystem for GatedFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        self.inner.modified(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut gate = self.gate.lock();
        gate.readers += 1;
        self.changed.notify_all();
        while !gate.open {
            self.changed.wait(&mut gate);
        }
        drop(gate);

        let result = self.inner.read_to_string(path);
        self.gate.lock().finished += 1;
        self.changed.notify_all();
        result
    }
}
