use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};

use crate::config::WatcherConfig;
use crate::results::PageContext;
use crate::snapshot::PageCapture;

/// Things that can happen to the watched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// The page finished loading
    Loaded,
    /// The host asked for a fresh context
    RequestContext,
    /// The document body changed
    Mutation,
}

/// Supplies the page as it currently is
pub trait PageSource {
    fn capture(&self) -> PageCapture;
}

/// Fire-and-forget destination for extracted contexts
pub trait ContextSink {
    fn emit(&mut self, context: PageContext);
}

impl PageSource for PageCapture {
    fn capture(&self) -> PageCapture {
        self.clone()
    }
}

impl ContextSink for mpsc::UnboundedSender<PageContext> {
    fn emit(&mut self, context: PageContext) {
        if self.send(context).is_err() {
            ::log::debug!("Context receiver is gone, dropping update");
        }
    }
}

/// Latest capture of a page, shared between the host that refreshes it and the watcher
#[derive(Debug, Clone, Default)]
pub struct SharedPage(Arc<Mutex<PageCapture>>);

impl SharedPage {
    pub fn new(capture: PageCapture) -> Self {
        Self(Arc::new(Mutex::new(capture)))
    }

    /// Stores a new capture, returning whether it differs from the previous one
    pub fn replace(&self, capture: PageCapture) -> bool {
        let mut current = self.0.lock().unwrap_or_else(|e| e.into_inner());
        if *current == capture {
            return false;
        }
        *current = capture;
        true
    }
}

impl PageSource for SharedPage {
    fn capture(&self) -> PageCapture {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    PendingEmit(Instant),
}

/// Trailing-edge debounce with a single pending deadline
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: DebounceState::Idle,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::PendingEmit(deadline) => Some(deadline),
        }
    }

    /// Arms the timer, replacing any pending deadline
    pub fn arm(&mut self, now: Instant) {
        self.state = DebounceState::PendingEmit(now + self.delay);
    }

    /// Returns to idle and reports true if a pending deadline has passed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.state {
            DebounceState::PendingEmit(deadline) if now >= deadline => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }
}

/// Re-runs extraction on load, on request, and after DOM changes settle
pub struct ChangeWatcher<S, K> {
    source: S,
    sink: K,
    debouncer: Debouncer,
}

impl<S: PageSource, K: ContextSink> ChangeWatcher<S, K> {
    pub fn new(source: S, sink: K, debounce: Duration) -> Self {
        Self {
            source,
            sink,
            debouncer: Debouncer::new(debounce),
        }
    }

    pub fn from_config(source: S, sink: K, config: &WatcherConfig) -> Self {
        Self::new(source, sink, config.debounce())
    }

    pub fn debounce_state(&self) -> DebounceState {
        self.debouncer.state()
    }

    /// Reacts to one event. Load and request events emit at once and leave any
    /// pending debounce armed.
    pub fn handle(&mut self, event: WatchEvent, now: Instant) {
        match event {
            WatchEvent::Loaded | WatchEvent::RequestContext => self.emit_now(event),
            WatchEvent::Mutation => {
                ::log::trace!("Mutation observed, re-arming debounce");
                self.debouncer.arm(now);
            }
        }
    }

    /// Emits if the debounce deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if self.debouncer.fire(now) {
            self.emit_now(WatchEvent::Mutation);
        }
    }

    fn emit_now(&mut self, cause: WatchEvent) {
        let capture = self.source.capture();
        let context = capture.context();
        if context.is_empty() {
            ::log::debug!("No token data found on {}", context.source_url);
        }
        ::log::info!(
            "Emitting context for {} ({:?}, {} signals)",
            context.source_url,
            cause,
            context.all_signals.len()
        );
        self.sink.emit(context);
    }

    /// Processes events until the channel closes. A debounce still pending at that
    /// point is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<WatchEvent>) {
        loop {
            let event = match self.debouncer.deadline() {
                None => events.recv().await,
                Some(deadline) => {
                    tokio::select! {
                        event = events.recv() => event,
                        _ = time::sleep_until(deadline) => {
                            self.tick(Instant::now());
                            continue;
                        }
                    }
                }
            };

            match event {
                Some(event) => self.handle(event, Instant::now()),
                None => {
                    ::log::debug!("Event channel closed, watcher stopping");
                    break;
                }
            }
        }
    }
}
