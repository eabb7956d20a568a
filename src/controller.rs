use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::error::Error;
use crate::handlers::messages::{Input, Listener};
use crate::state::toasts::Snapshot;
use crate::subscriptions::toasts::{Event, Lifecycle};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;
use tokio::sync::{
    broadcast,
    mpsc::{UnboundedSender, WeakUnboundedSender, unbounded_channel},
    oneshot, watch,
};
use toaster_util::{
    CloseReason, Content, Toast, ToastId, ToastKind, ToastOptions, ToastPatch, ToasterConfig,
};

/// Handle to a toast lifecycle controller
///
/// Cloning is cheap and every clone talks to the same controller. Requests are
/// queued and applied in order by a background task; they return immediately.
/// The background task stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct Toaster {
    tx: UnboundedSender<Input>,
    config: Arc<ToasterConfig>,
    next_id: Arc<AtomicU64>,
    next_listener: Arc<AtomicU64>,
    events: broadcast::Sender<Event>,
    snapshots: watch::Receiver<Snapshot>,
}

impl Toaster {
    /// Validate `config` and start the lifecycle loop on the current tokio runtime
    pub fn new(config: ToasterConfig) -> Result<Self, Error> {
        config.validate()?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| Error::NoRuntime)?;

        let (tx, rx) = unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (snapshot_tx, snapshots) = watch::channel(Snapshot::default());

        let lifecycle = Lifecycle::new(config.clone(), events.clone(), snapshot_tx, tx.downgrade());
        runtime.spawn(lifecycle.run(rx));

        Ok(Self {
            tx,
            config: Arc::new(config),
            next_id: Arc::new(AtomicU64::new(1)),
            next_listener: Arc::new(AtomicU64::new(1)),
            events,
            snapshots,
        })
    }

    pub fn config(&self) -> &ToasterConfig {
        &self.config
    }

    /// Queue a toast for display and return its id
    pub fn create(&self, content: impl Into<Content>, options: ToastOptions) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let toast = Toast::new(id, content.into(), options, &self.config);
        self.send(Input::Create(toast));
        id
    }

    pub fn success(&self, content: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create(content, options.kind(ToastKind::Success))
    }

    pub fn error(&self, content: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create(content, options.kind(ToastKind::Error))
    }

    pub fn warning(&self, content: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create(content, options.kind(ToastKind::Warning))
    }

    pub fn info(&self, content: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create(content, options.kind(ToastKind::Info))
    }

    /// A toast that stays until removed or resolved, without a close button
    pub fn loading(&self, content: impl Into<Content>, options: ToastOptions) -> ToastId {
        self.create(
            content,
            options
                .kind(ToastKind::Loading)
                .loading(true)
                .duration(Duration::ZERO)
                .dismissible(false),
        )
    }

    /// Remove a toast, promoting the next queued one if a slot frees up
    pub fn remove(&self, id: ToastId) {
        self.send(Input::Remove {
            id,
            reason: CloseReason::CloseToast,
        });
    }

    /// Remove a toast on behalf of the user (close button, swipe)
    pub fn dismiss(&self, id: ToastId) {
        self.send(Input::Remove {
            id,
            reason: CloseReason::Dismissed,
        });
    }

    pub fn remove_all(&self) {
        self.send(Input::RemoveAll);
    }

    /// Merge fields into a visible toast. Timers are not touched; see [`Toaster::resolve`].
    pub fn update(&self, id: ToastId, patch: ToastPatch) {
        self.send(Input::Update { id, patch });
    }

    /// Finish a loading toast: merge `patch`, clear the loading state and start
    /// a fresh expiry timer for the resulting duration.
    pub fn resolve(&self, id: ToastId, patch: ToastPatch) {
        self.send(Input::Resolve { id, patch });
    }

    /// Stop the expiry timer while the pointer hovers the toast
    pub fn pause(&self, id: ToastId) {
        self.send(Input::Pause(id));
    }

    /// Restart a paused timer with the time it had left
    pub fn resume(&self, id: ToastId) {
        self.send(Input::Resume(id));
    }

    /// Report an action button click. The toast is dismissed afterwards.
    pub fn activate(&self, id: ToastId, action: impl Into<String>) {
        self.send(Input::Activate {
            id,
            action: action.into(),
        });
    }

    /// Current state, after every request sent before this call has been applied
    pub async fn snapshot(&self) -> Result<Snapshot, Error> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(Input::Snapshot { tx })
            .map_err(|_| Error::Closed)?;
        rx.await.map_err(|_| Error::Closed)
    }

    /// Latest published snapshot, updated after every store mutation
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Call `listener` with the current snapshot now and after every store mutation
    ///
    /// The listener runs on the lifecycle task and must not block.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Snapshot) + Send + 'static,
    {
        let key = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.send(Input::Subscribe {
            key,
            listener: Listener(Box::new(listener)),
        });
        Subscription {
            key,
            tx: self.tx.downgrade(),
        }
    }

    fn send(&self, input: Input) {
        if let Err(err) = self.tx.send(input) {
            tracing::warn!("Toaster lifecycle loop has stopped, dropping {:?}", err.0);
        }
    }
}

/// Registration returned by [`Toaster::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
#[derive(Debug)]
pub struct Subscription {
    key: u64,
    tx: WeakUnboundedSender<Input>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.upgrade() {
            _ = tx.send(Input::Unsubscribe(self.key));
        }
    }
}
