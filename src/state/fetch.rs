//! Fetch lifecycle shared by the screen controllers.
//!
//! A `FetchCell` owns one `FetchState`, broadcasts every transition to its
//! subscribers and runs at most one fetch cycle at a time. Each cycle is
//! tagged with a generation number so that a cancelled cycle can never write
//! its result over a newer state.

use crate::api::{ApiError, CharacterDataSource};
use crate::connectivity::ConnectivityProbe;
use crate::messages::{MessageProvider, NO_INTERNET};
use log::*;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Pause between entering Loading and checking connectivity.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(500);

const CHANNEL_CAPACITY: usize = 16;

/// Progress of a fetch as seen by the view.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState<T> {
    Initial,
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_initial(&self) -> bool {
        matches!(self, FetchState::Initial)
    }

    /// Whether the current cycle has ended, successfully or not.
    ///
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Success(_) | FetchState::Error(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Initial => "initial",
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Error(_) => "error",
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Initial
    }
}

/// Collaborators a controller needs to run a fetch cycle.
///
#[derive(Clone)]
pub struct FetchContext {
    pub source: Arc<dyn CharacterDataSource>,
    pub probe: Arc<dyn ConnectivityProbe>,
    pub messages: Arc<dyn MessageProvider>,
    pub delay: Duration,
}

impl FetchContext {
    pub fn new(
        source: Arc<dyn CharacterDataSource>,
        probe: Arc<dyn ConnectivityProbe>,
        messages: Arc<dyn MessageProvider>,
    ) -> Self {
        FetchContext {
            source,
            probe,
            messages,
            delay: DEFAULT_FETCH_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Stream of state transitions. Yields the state current at subscription
/// time first, then every later transition in order.
///
pub struct StateSubscription<T> {
    pending: Option<FetchState<T>>,
    receiver: broadcast::Receiver<FetchState<T>>,
}

impl<T: Clone> StateSubscription<T> {
    /// Wait for the next state. Returns `None` once the controller is gone.
    ///
    pub async fn next(&mut self) -> Option<FetchState<T>> {
        if let Some(state) = self.pending.take() {
            return Some(state);
        }
        loop {
            match self.receiver.recv().await {
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("State subscriber fell behind, skipped {} transitions", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

struct Inner<T> {
    state: FetchState<T>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

/// Aborts the wrapped task when dropped, so cancelling a cycle also cancels
/// the request it is waiting on.
///
struct AbortOnDrop<R>(JoinHandle<R>);

impl<R> Drop for AbortOnDrop<R> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Shared state cell behind a controller.
///
pub(crate) struct FetchCell<T> {
    label: &'static str,
    inner: Arc<Mutex<Inner<T>>>,
    notifier: broadcast::Sender<FetchState<T>>,
}

impl<T> Clone for FetchCell<T> {
    fn clone(&self) -> Self {
        FetchCell {
            label: self.label,
            inner: Arc::clone(&self.inner),
            notifier: self.notifier.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> FetchCell<T> {
    pub fn new(label: &'static str) -> Self {
        let (notifier, _) = broadcast::channel(CHANNEL_CAPACITY);
        FetchCell {
            label,
            inner: Arc::new(Mutex::new(Inner {
                state: FetchState::Initial,
                generation: 0,
                task: None,
            })),
            notifier,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, inner: &mut Inner<T>, next: FetchState<T>) {
        debug!(
            "{} state: {} -> {}",
            self.label,
            inner.state.name(),
            next.name()
        );
        inner.state = next.clone();
        // No subscribers is fine, the state is still readable.
        let _ = self.notifier.send(next);
    }

    pub fn state(&self) -> FetchState<T> {
        self.lock().state.clone()
    }

    pub fn subscribe(&self) -> StateSubscription<T> {
        let inner = self.lock();
        StateSubscription {
            pending: Some(inner.state.clone()),
            receiver: self.notifier.subscribe(),
        }
    }

    /// Begin a fetch cycle unless one has already run since the last reset.
    /// Enters Loading before returning; the rest of the cycle runs on a
    /// spawned task. Returns whether a cycle was started.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime, as `tokio::spawn` does.
    ///
    pub fn start<F, Fut>(&self, context: &FetchContext, failure_key: &'static str, fetch: F) -> bool
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let generation = {
            let mut inner = self.lock();
            if !inner.state.is_initial() {
                debug!(
                    "Ignoring {} fetch request while {}",
                    self.label,
                    inner.state.name()
                );
                return false;
            }
            inner.generation += 1;
            self.transition(&mut inner, FetchState::Loading);
            inner.generation
        };

        let cell = self.clone();
        let probe = Arc::clone(&context.probe);
        let messages = Arc::clone(&context.messages);
        let delay = context.delay;
        let handle = tokio::spawn(async move {
            let next = run_cycle(cell.label, delay, probe, &*messages, failure_key, fetch).await;
            cell.complete(generation, next);
        });

        let mut inner = self.lock();
        if inner.generation == generation {
            inner.task = Some(handle);
        } else {
            handle.abort();
        }
        true
    }

    fn complete(&self, generation: u64, next: FetchState<T>) {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!("Discarding stale {} fetch result", self.label);
            return;
        }
        inner.task = None;
        self.transition(&mut inner, next);
    }

    /// Cancel any running cycle and return to Initial.
    ///
    pub fn reset(&self) {
        let mut inner = self.lock();
        self.cancel_locked(&mut inner);
        if !inner.state.is_initial() {
            self.transition(&mut inner, FetchState::Initial);
        }
    }

    /// Cancel any running cycle, leaving the state as it is.
    ///
    pub fn cancel(&self) {
        let mut inner = self.lock();
        self.cancel_locked(&mut inner);
    }

    fn cancel_locked(&self, inner: &mut Inner<T>) {
        inner.generation += 1;
        if let Some(task) = inner.task.take() {
            debug!("Cancelling in-flight {} fetch", self.label);
            task.abort();
        }
    }
}

/// Delay, probe, then fetch. Every failure maps to an Error state carrying a
/// localized message; the cause is only logged.
///
async fn run_cycle<T, F, Fut>(
    label: &'static str,
    delay: Duration,
    probe: Arc<dyn ConnectivityProbe>,
    messages: &dyn MessageProvider,
    failure_key: &'static str,
    fetch: F,
) -> FetchState<T>
where
    T: Send + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let available = match tokio::task::spawn_blocking(move || probe.is_available()).await {
        Ok(available) => available,
        Err(e) => {
            warn!("Connectivity probe did not complete: {}", e);
            false
        }
    };
    if !available {
        warn!("No network connectivity, skipping {} fetch", label);
        return FetchState::Error(messages.localize(NO_INTERNET));
    }

    let mut request = AbortOnDrop(tokio::spawn(fetch()));
    match (&mut request.0).await {
        Ok(Ok(payload)) => {
            info!("Fetched {}.", label);
            FetchState::Success(payload)
        }
        Ok(Err(e)) => {
            error!("Failed to fetch {}: {}", label, e);
            FetchState::Error(messages.localize(failure_key))
        }
        Err(e) => {
            error!("{} request task failed: {}", label, e);
            FetchState::Error(messages.localize(failure_key))
        }
    }
}
