//! Toast notification lifecycle core
//!
//! A [`Toaster`] accepts toast requests, keeps at most `max_visible` of them on
//! screen, queues the rest in arrival order and expires each visible toast
//! after its duration. Rendering is left to the caller, which reads
//! [`Snapshot`]s through [`Toaster::subscribe`], [`Toaster::watch`] or
//! [`Toaster::snapshot`].

mod constants;
mod controller;
mod error;
mod handlers;
pub mod logging;
mod promise;
pub mod state;
mod subscriptions;

pub use controller::{Subscription, Toaster};
pub use error::Error;
pub use promise::{PromiseMessages, PromiseText};
pub use state::toasts::{Admission, Eviction, Snapshot, ToastStore};
pub use subscriptions::toasts::Event;
pub use toaster_config::{ConfigError, Position, ToasterConfig};
pub use toaster_util::{
    CloseReason, Content, RichContent, Toast, ToastAction, ToastGroup, ToastId, ToastKind,
    ToastOptions, ToastPatch,
};
