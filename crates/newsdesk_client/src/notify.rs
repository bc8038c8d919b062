//! Notification controller: at most one modal message on screen.
//!
//! The controller only renders and reports dismissal. Whether a message
//! should be shown at all while another one is up is decided by callers
//! holding a [`SingleFlight`] latch.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;

use desk_logging::{desk_debug, desk_trace};
use futures_util::FutureExt;
use newsdesk_core::{NotificationKind, NotificationState};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Length of the modal's exit animation before state is torn down.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(300);

/// How a notification went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The user pressed the acknowledge button.
    Acknowledged,
    /// The user clicked outside the modal.
    ClickedOutside,
    /// The user pressed the cancel key.
    CancelKey,
    /// Removed by `hide`, including replacement by a newer `show`.
    Hidden,
}

/// Completion signal returned by [`Notifier::show`].
#[must_use = "a dismissal does nothing unless awaited"]
pub struct Dismissal {
    rx: oneshot::Receiver<DismissReason>,
}

impl Dismissal {
    /// A dismissal and the handle that resolves it.
    pub fn channel() -> (DismissHandle, Dismissal) {
        let (tx, rx) = oneshot::channel();
        (DismissHandle { tx }, Dismissal { rx })
    }
}

impl Future for Dismissal {
    type Output = DismissReason;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A dropped handle means the notification was torn down without input.
        self.rx
            .poll_unpin(cx)
            .map(|reason| reason.unwrap_or(DismissReason::Hidden))
    }
}

#[derive(Debug)]
pub struct DismissHandle {
    tx: oneshot::Sender<DismissReason>,
}

impl DismissHandle {
    pub fn dismiss(self, reason: DismissReason) {
        let _ = self.tx.send(reason);
    }
}

/// Shows blocking messages. Injected into the HTTP pipeline.
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, kind: NotificationKind) -> Dismissal;
    fn hide(&self);
}

/// The UI surface that draws the modal.
pub trait NotificationPresenter: Send + Sync {
    fn render(&self, state: &NotificationState);
}

/// Process-wide boolean latch: only one holder at a time, released on drop.
#[derive(Debug, Default)]
pub struct SingleFlight {
    held: AtomicBool,
}

impl SingleFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Takes the latch, or returns `None` if someone already holds it.
    pub fn try_acquire(self: &Arc<Self>) -> Option<SingleFlightGuard> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SingleFlightGuard {
                latch: Arc::clone(self),
            })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct SingleFlightGuard {
    latch: Arc<SingleFlight>,
}

impl Drop for SingleFlightGuard {
    fn drop(&mut self) {
        self.latch.held.store(false, Ordering::Release);
    }
}

#[derive(Default)]
struct Slot {
    state: NotificationState,
    pending: Option<DismissHandle>,
    generation: u64,
    teardown: Option<JoinHandle<()>>,
}

/// Renders one notification at a time through a [`NotificationPresenter`].
#[derive(Clone)]
pub struct NotificationController {
    slot: Arc<Mutex<Slot>>,
    presenter: Arc<dyn NotificationPresenter>,
    latch: Arc<SingleFlight>,
    exit_delay: Duration,
}

impl NotificationController {
    pub fn new(presenter: Arc<dyn NotificationPresenter>, latch: Arc<SingleFlight>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            presenter,
            latch,
            exit_delay: DEFAULT_EXIT_DELAY,
        }
    }

    pub fn with_exit_delay(mut self, exit_delay: Duration) -> Self {
        self.exit_delay = exit_delay;
        self
    }

    /// Current modal state; `suppressed` reflects the shared latch.
    pub fn snapshot(&self) -> NotificationState {
        let mut state = self.lock().state.clone();
        state.suppressed = self.latch.is_held();
        state
    }

    /// User input closing the visible notification. No-op if none is pending.
    ///
    /// The completion signal resolves immediately; the state is reset after
    /// the exit delay unless a newer notification has been shown meanwhile.
    pub fn dismiss(&self, reason: DismissReason) {
        let mut slot = self.lock();
        let Some(pending) = slot.pending.take() else {
            return;
        };
        desk_debug!("Notification dismissed: {:?}", reason);
        pending.dismiss(reason);

        let generation = slot.generation;
        if self.exit_delay.is_zero() {
            self.teardown_locked(&mut slot);
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let controller = self.clone();
                let delay = self.exit_delay;
                slot.teardown = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let mut slot = controller.lock();
                    if slot.generation == generation {
                        slot.teardown = None;
                        controller.teardown_locked(&mut slot);
                    }
                }));
            }
            Err(_) => self.teardown_locked(&mut slot),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn teardown_locked(&self, slot: &mut Slot) {
        if slot.state.visible {
            slot.state = NotificationState::hidden();
            self.presenter.render(&slot.state);
        }
    }

    fn hide_locked(&self, slot: &mut Slot) {
        if let Some(teardown) = slot.teardown.take() {
            desk_trace!("Cancelling pending notification teardown");
            teardown.abort();
        }
        if let Some(pending) = slot.pending.take() {
            pending.dismiss(DismissReason::Hidden);
        }
        self.teardown_locked(slot);
    }
}

impl Notifier for NotificationController {
    fn show(&self, message: &str, kind: NotificationKind) -> Dismissal {
        let mut slot = self.lock();
        self.hide_locked(&mut slot);

        let (handle, dismissal) = Dismissal::channel();
        slot.generation = slot.generation.wrapping_add(1);
        slot.pending = Some(handle);
        slot.state = NotificationState::shown(message, kind);
        desk_debug!("Showing {} notification: {}", kind, message);
        self.presenter.render(&slot.state);
        dismissal
    }

    fn hide(&self) {
        let mut slot = self.lock();
        self.hide_locked(&mut slot);
    }
}
