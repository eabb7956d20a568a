use crate::handlers::messages::{Input, Listener};
use crate::state::toasts::{Admission, Eviction, Snapshot, ToastStore};
use std::{
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
    time::Duration,
    time::SystemTime,
};
use tokio::{
    sync::{
        broadcast,
        mpsc::{UnboundedReceiver, WeakUnboundedSender},
        watch,
    },
    task::JoinHandle,
    time::Instant,
};
use toaster_util::{CloseReason, ToastId, ToastPatch, ToasterConfig};
use tracing::{debug, error, trace};

/// Lifecycle notifications for observers that care about individual toasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The toast entered the visible set (on creation or promotion)
    Shown(ToastId),
    /// The visible set was full and the toast was queued
    Queued(ToastId),
    Updated(ToastId),
    Closed { id: ToastId, reason: CloseReason },
    ActionInvoked { id: ToastId, action: String },
}

/// A scheduled expiry. Dropping it cancels the sleeping task.
struct ExpiryTimer {
    handle: JoinHandle<()>,
    generation: u64,
    started: Instant,
    delay: Duration,
}

impl ExpiryTimer {
    fn remaining(&self) -> Duration {
        self.delay.saturating_sub(self.started.elapsed())
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Owner of the store and every expiry timer
///
/// Runs as a single task; each `Input` is handled to completion before the next
/// one is read, so requests and timer firings never interleave.
pub(crate) struct Lifecycle {
    config: ToasterConfig,
    store: ToastStore,
    timers: HashMap<ToastId, ExpiryTimer>,
    /// Remaining time of timers stopped by `Pause`
    paused: HashMap<ToastId, Duration>,
    next_generation: u64,
    listeners: Vec<(u64, Listener)>,
    events: broadcast::Sender<Event>,
    snapshots: watch::Sender<Snapshot>,
    tx: WeakUnboundedSender<Input>,
}

impl Lifecycle {
    pub(crate) fn new(
        config: ToasterConfig,
        events: broadcast::Sender<Event>,
        snapshots: watch::Sender<Snapshot>,
        tx: WeakUnboundedSender<Input>,
    ) -> Self {
        Self {
            store: ToastStore::new(config.max_visible),
            config,
            timers: HashMap::new(),
            paused: HashMap::new(),
            next_generation: 0,
            listeners: Vec::new(),
            events,
            snapshots,
            tx,
        }
    }

    pub(crate) async fn run(mut self, mut rx: UnboundedReceiver<Input>) {
        while let Some(input) = rx.recv().await {
            if self.handle(input) {
                self.publish();
            }
        }
        // The channel was closed, so we are done
        debug!(
            "toaster stopped with {} visible and {} queued toasts",
            self.store.visible().len(),
            self.store.queued_len()
        );
    }

    /// Apply one request. Returns true when the store changed.
    fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Create(mut toast) => {
                toast.created_at = SystemTime::now();
                let id = toast.id;
                let expires = toast.expires();
                let duration = toast.duration;
                match self.store.admit(toast) {
                    Admission::Visible => {
                        debug!("showing toast {id}");
                        if expires {
                            self.schedule(id, duration);
                        }
                        self.emit(Event::Shown(id));
                    }
                    Admission::Queued => {
                        debug!("queueing toast {id}, {} waiting", self.store.queued_len());
                        self.emit(Event::Queued(id));
                    }
                }
                true
            }
            Input::Update { id, patch } => self.update(id, patch),
            Input::Resolve { id, patch } => self.resolve(id, patch),
            Input::Remove { id, reason } => self.close(id, reason),
            Input::RemoveAll => self.clear(),
            Input::Timeout { id, generation } => {
                let live = self
                    .timers
                    .get(&id)
                    .is_some_and(|timer| timer.generation == generation);
                if !live {
                    trace!("ignoring stale expiry for toast {id}");
                    return false;
                }
                debug!("toast {id} expired");
                self.close(id, CloseReason::Expired)
            }
            Input::Pause(id) => {
                self.pause(id);
                false
            }
            Input::Resume(id) => {
                self.resume(id);
                false
            }
            Input::Activate { id, action } => {
                if !self.store.is_visible(id) {
                    trace!("action {action} for unknown toast {id}");
                    return false;
                }
                self.emit(Event::ActionInvoked { id, action });
                self.close(id, CloseReason::Dismissed)
            }
            Input::Subscribe { key, mut listener } => {
                if deliver(key, &mut listener, &self.store.snapshot()) {
                    self.listeners.push((key, listener));
                }
                false
            }
            Input::Unsubscribe(key) => {
                self.listeners.retain(|(k, _)| *k != key);
                false
            }
            Input::Snapshot { tx } => {
                if tx.send(self.store.snapshot()).is_err() {
                    trace!("snapshot requester went away");
                }
                false
            }
        }
    }

    fn update(&mut self, id: ToastId, patch: ToastPatch) -> bool {
        let Some(toast) = self.store.get_visible_mut(id) else {
            trace!("update for toast {id} that is not visible");
            return false;
        };
        patch.apply(toast);
        // A loading toast must not keep a timer around
        if toast.is_loading {
            self.timers.remove(&id);
            self.paused.remove(&id);
        }
        self.emit(Event::Updated(id));
        true
    }

    fn resolve(&mut self, id: ToastId, patch: ToastPatch) -> bool {
        let Some(toast) = self.store.get_visible_mut(id) else {
            trace!("resolve for toast {id} that is not visible");
            return false;
        };
        patch.loading(false).apply(toast);
        let expires = toast.expires();
        let duration = toast.duration;

        self.timers.remove(&id);
        self.paused.remove(&id);
        if expires {
            self.schedule(id, duration);
        }
        self.emit(Event::Updated(id));
        true
    }

    fn close(&mut self, id: ToastId, reason: CloseReason) -> bool {
        self.timers.remove(&id);
        self.paused.remove(&id);

        match self.store.evict(id) {
            Eviction::NotFound => {
                trace!("toast {id} already gone");
                false
            }
            Eviction::Pending { evicted } => {
                debug!("dropped queued toast {}", evicted.id);
                self.emit(Event::Closed { id, reason });
                true
            }
            Eviction::Visible { evicted, promoted } => {
                debug!("closed toast {} ({:?})", evicted.id, reason);
                self.emit(Event::Closed { id, reason });
                if let Some(next) = promoted {
                    debug!("promoting queued toast {}", next.id);
                    // The promoted toast gets its full duration from now
                    if next.expires() {
                        self.schedule(next.id, next.duration);
                    }
                    self.emit(Event::Shown(next.id));
                }
                true
            }
        }
    }

    fn clear(&mut self) -> bool {
        self.timers.clear();
        self.paused.clear();
        let ids = self.store.clear();
        debug!("cleared {} toasts", ids.len());
        for &id in &ids {
            self.emit(Event::Closed {
                id,
                reason: CloseReason::Cleared,
            });
        }
        !ids.is_empty()
    }

    fn pause(&mut self, id: ToastId) {
        let pausable = self
            .store
            .visible()
            .iter()
            .any(|t| t.id == id && t.pause_on_hover);
        if !pausable {
            return;
        }
        if let Some(timer) = self.timers.remove(&id) {
            let remaining = timer.remaining();
            trace!("pausing toast {id} with {remaining:?} left");
            self.paused.insert(id, remaining);
        }
    }

    fn resume(&mut self, id: ToastId) {
        let Some(remaining) = self.paused.remove(&id) else {
            return;
        };
        let still_expires = self
            .store
            .visible()
            .iter()
            .any(|t| t.id == id && t.expires());
        if still_expires {
            trace!("resuming toast {id} with {remaining:?} left");
            self.arm(id, remaining);
        }
    }

    /// Start the expiry timer for a toast that just became visible
    fn schedule(&mut self, id: ToastId, duration: Duration) {
        self.arm(id, duration.saturating_add(self.config.expiry_grace()));
    }

    fn arm(&mut self, id: ToastId, delay: Duration) {
        self.next_generation += 1;
        let generation = self.next_generation;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                _ = tx.send(Input::Timeout { id, generation });
            }
        });

        // Replacing an older timer drops it, which aborts its task
        self.timers.insert(
            id,
            ExpiryTimer {
                handle,
                generation,
                started: Instant::now(),
                delay,
            },
        );
    }

    fn emit(&self, event: Event) {
        // No receivers is fine; events are optional
        _ = self.events.send(event);
    }

    fn publish(&mut self) {
        let snapshot = self.store.snapshot();
        self.listeners
            .retain_mut(|(key, listener)| deliver(*key, listener, &snapshot));
        self.snapshots.send_replace(snapshot);
    }
}

/// Call a listener, reporting false if it panicked and must be dropped
fn deliver(key: u64, listener: &mut Listener, snapshot: &Snapshot) -> bool {
    let delivered = panic::catch_unwind(AssertUnwindSafe(|| (listener.0)(snapshot)));
    if delivered.is_err() {
        error!("listener {key} panicked, unsubscribing it");
    }
    delivered.is_ok()
}
