//! DocumentHost: background resolution of one open document.
//!
//! The host keeps the last published [`ResolveContext`] readable while a new
//! generation resolves on the rayon pool. At most one resolution is in
//! flight; updates arriving meanwhile are dropped, and updates arriving
//! within the debounce interval of the last start are skipped. A cancelled
//! generation is never published.
//!
//! ## Usage
//!
//! ```ignore
//! let host = DocumentHost::new("/src/app.csproj", resolver);
//! host.update(text);
//! host.wait_idle(Duration::from_secs(1));
//! let items = host.current().map(|ctx| ctx.items());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::hir::{ResolveContext, ResolveError, Resolver};
use crate::syntax::XDocument;

/// What [`DocumentHost::update`] did with a new text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A background resolution was started.
    Started,
    /// A resolution is already in flight; this text was dropped.
    Coalesced,
    /// The last resolution started too recently; this text was dropped.
    Debounced,
    /// The host was closed.
    Closed,
}

#[derive(Default)]
struct HostState {
    published: Option<Arc<ResolveContext>>,
    /// Ticket and token of the resolution in flight.
    in_flight: Option<(u64, CancellationToken)>,
    next_ticket: u64,
    last_started: Option<Instant>,
    generation: u64,
    closed: bool,
}

impl HostState {
    /// Publish `context` if `ticket` is still the current in-flight run.
    fn finish(&mut self, ticket: u64, result: Result<ResolveContext, ResolveError>) {
        let Some((current, token)) = &self.in_flight else {
            return;
        };
        if *current != ticket {
            return;
        }
        let cancelled = token.is_cancelled();
        self.in_flight = None;

        match result {
            Ok(context) if !cancelled && !self.closed => self.publish(context),
            Ok(_) | Err(ResolveError::Cancelled) => {
                debug!(ticket, "discarding cancelled generation");
            }
        }
    }

    fn publish(&mut self, context: ResolveContext) {
        self.published = Some(Arc::new(context));
        self.generation += 1;
    }
}

#[derive(Default)]
struct Shared {
    state: Mutex<HostState>,
    idle: Condvar,
}

/// Owns the published generation of one document.
pub struct DocumentHost {
    file: PathBuf,
    resolver: Resolver,
    shared: Arc<Shared>,
}

impl DocumentHost {
    pub fn new(file: impl Into<PathBuf>, resolver: Resolver) -> Self {
        Self {
            file: file.into(),
            resolver,
            shared: Arc::new(Shared::default()),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Start resolving `text` in the background, unless a resolution is in
    /// flight or started within the debounce interval.
    pub fn update(&self, text: impl Into<String>) -> UpdateOutcome {
        let mut state = self.shared.state.lock();
        if state.closed {
            return UpdateOutcome::Closed;
        }
        if state.in_flight.is_some() {
            return UpdateOutcome::Coalesced;
        }
        let debounce = self.resolver.options().debounce;
        if state.last_started.is_some_and(|last| last.elapsed() < debounce) {
            return UpdateOutcome::Debounced;
        }

        let ticket = state.next_ticket;
        state.next_ticket += 1;
        let token = CancellationToken::new();
        state.in_flight = Some((ticket, token.clone()));
        state.last_started = Some(Instant::now());
        let previous = state.published.clone();
        drop(state);

        let text = text.into();
        let file = self.file.clone();
        let resolver = self.resolver.clone();
        let shared = Arc::clone(&self.shared);
        debug!(file = %file.display(), ticket, "starting background resolution");

        rayon::spawn(move || {
            let document = Arc::new(XDocument::parse(&text));
            let result = resolver.resolve(&file, document, previous.as_deref(), &token);

            let mut state = shared.state.lock();
            state.finish(ticket, result);
            drop(state);
            shared.idle.notify_all();
        });
        UpdateOutcome::Started
    }

    /// Resolve `text` on the calling thread and publish the result.
    pub fn resolve_now(&self, text: &str) -> Result<Arc<ResolveContext>, ResolveError> {
        let previous = {
            let state = self.shared.state.lock();
            if state.closed {
                return Err(ResolveError::Cancelled);
            }
            state.published.clone()
        };

        let document = Arc::new(XDocument::parse(text));
        let context = self.resolver.resolve(
            &self.file,
            document,
            previous.as_deref(),
            &CancellationToken::new(),
        )?;

        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(ResolveError::Cancelled);
        }
        state.publish(context);
        state
            .published
            .clone()
            .ok_or(ResolveError::Cancelled)
    }

    /// The last published generation.
    pub fn current(&self) -> Option<Arc<ResolveContext>> {
        self.shared.state.lock().published.clone()
    }

    /// Number of generations published so far.
    pub fn generation(&self) -> u64 {
        self.shared.state.lock().generation
    }

    pub fn is_resolving(&self) -> bool {
        self.shared.state.lock().in_flight.is_some()
    }

    /// Block until no resolution is in flight. Returns false on timeout.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        while state.in_flight.is_some() {
            if self.shared.idle.wait_until(&mut state, deadline).timed_out() {
                return state.in_flight.is_none();
            }
        }
        true
    }

    /// Cancel any in-flight resolution and drop the published generation.
    pub fn close(&self) {
        let mut state = self.shared.state.lock();
        state.closed = true;
        state.published = None;
        if let Some((ticket, token)) = state.in_flight.take() {
            debug!(ticket, "cancelling resolution on close");
            token.cancel();
        }
        drop(state);
        self.shared.idle.notify_all();
    }
}

impl Drop for DocumentHost {
    fn drop(&mut self) {
        if let Some((_, token)) = &self.shared.state.lock().in_flight {
            token.cancel();
        }
    }
}
