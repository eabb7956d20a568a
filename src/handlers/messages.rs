use crate::state::toasts::Snapshot;
use std::fmt;
use toaster_util::{CloseReason, Toast, ToastId, ToastPatch};

/// Callback registered through `Toaster::subscribe`
pub(crate) struct Listener(pub Box<dyn FnMut(&Snapshot) + Send + 'static>);

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Listener")
    }
}

/// Requests processed one at a time by the lifecycle loop
#[derive(Debug)]
pub(crate) enum Input {
    /// Admit a freshly built toast
    Create(Toast),
    /// Merge fields into a visible toast, leaving timers alone
    Update { id: ToastId, patch: ToastPatch },
    /// Clear the loading state, merge fields and restart the expiry timer
    Resolve { id: ToastId, patch: ToastPatch },
    Remove { id: ToastId, reason: CloseReason },
    RemoveAll,
    /// Expiry timer fired
    Timeout { id: ToastId, generation: u64 },
    /// Pointer entered the toast
    Pause(ToastId),
    /// Pointer left the toast
    Resume(ToastId),
    /// Action button clicked (toast id, action id)
    Activate { id: ToastId, action: String },
    Subscribe { key: u64, listener: Listener },
    Unsubscribe(u64),
    Snapshot {
        tx: tokio::sync::oneshot::Sender<Snapshot>,
    },
}
