pub mod action;
pub mod kind;
pub mod rich_content;

pub use action::ToastAction;
pub use kind::{ToastKind, UnknownKind};
pub use rich_content::{Content, RichContent};
pub use toaster_config::{Position, ToasterConfig};

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, time::Duration, time::SystemTime};

/// Identifier handed out by a lifecycle controller. Never reused within one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub content: Content,
    pub kind: ToastKind,
    /// Zero keeps the toast until it is removed explicitly
    pub duration: Duration,
    pub position: Position,
    /// Suppresses auto-expiry regardless of `duration`
    pub is_loading: bool,
    /// Whether the presentation layer should offer a close button
    pub dismissible: bool,
    /// Whether hovering pauses the expiry timer
    pub pause_on_hover: bool,
    pub actions: Vec<ToastAction>,
    pub created_at: SystemTime,
}

impl Toast {
    /// Build a toast, filling unset options from the controller configuration
    pub fn new(id: ToastId, content: Content, options: ToastOptions, config: &ToasterConfig) -> Self {
        Toast {
            id,
            content,
            kind: options.kind.unwrap_or_default(),
            duration: options.duration.unwrap_or_else(|| config.default_duration()),
            position: options.position.unwrap_or(config.default_position),
            is_loading: options.is_loading.unwrap_or(false),
            dismissible: options.dismissible.unwrap_or(true),
            pause_on_hover: options.pause_on_hover.unwrap_or(true),
            actions: options.actions,
            created_at: SystemTime::now(),
        }
    }

    /// True when an expiry timer should run for this toast
    pub fn expires(&self) -> bool {
        !self.duration.is_zero() && !self.is_loading
    }
}

/// Per-request overrides. Unset fields use the controller defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToastOptions {
    pub kind: Option<ToastKind>,
    pub duration: Option<Duration>,
    pub position: Option<Position>,
    pub is_loading: Option<bool>,
    pub dismissible: Option<bool>,
    pub pause_on_hover: Option<bool>,
    #[serde(default)]
    pub actions: Vec<ToastAction>,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn duration_ms(self, ms: u64) -> Self {
        self.duration(Duration::from_millis(ms))
    }

    /// Keep the toast until it is removed explicitly
    pub fn persistent(self) -> Self {
        self.duration(Duration::ZERO)
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = Some(is_loading);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    pub fn pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = Some(pause_on_hover);
        self
    }

    pub fn action(mut self, action: ToastAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// Partial update merged into a visible toast. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToastPatch {
    pub content: Option<Content>,
    pub kind: Option<ToastKind>,
    pub duration: Option<Duration>,
    pub position: Option<Position>,
    pub is_loading: Option<bool>,
    pub dismissible: Option<bool>,
    pub actions: Option<Vec<ToastAction>>,
}

impl ToastPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = Some(is_loading);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = Some(dismissible);
        self
    }

    pub fn actions(mut self, actions: Vec<ToastAction>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `toast`. Id and creation time never change.
    pub fn apply(self, toast: &mut Toast) {
        if let Some(content) = self.content {
            toast.content = content;
        }
        if let Some(kind) = self.kind {
            toast.kind = kind;
        }
        if let Some(duration) = self.duration {
            toast.duration = duration;
        }
        if let Some(position) = self.position {
            toast.position = position;
        }
        if let Some(is_loading) = self.is_loading {
            toast.is_loading = is_loading;
        }
        if let Some(dismissible) = self.dismissible {
            toast.dismissible = dismissible;
        }
        if let Some(actions) = self.actions {
            toast.actions = actions;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseReason {
    /// The expiry timer fired
    Expired,
    /// The user dismissed the toast or picked one of its actions
    Dismissed,
    /// Removed through an explicit `remove` request
    CloseToast,
    /// Dropped by `remove_all`
    Cleared,
}

/// Toasts sharing a placement, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct ToastGroup<'a> {
    pub position: Position,
    pub toasts: Vec<&'a Toast>,
}

impl ToastGroup<'_> {
    pub fn count(&self) -> usize {
        self.toasts.len()
    }

    pub fn newest(&self) -> Option<&Toast> {
        self.toasts.last().copied()
    }
}

/// Group toasts by placement, preserving display order within each group
pub fn group_by_position(toasts: &[Toast]) -> Vec<ToastGroup<'_>> {
    let mut groups: BTreeMap<Position, Vec<&Toast>> = BTreeMap::new();
    for toast in toasts {
        groups.entry(toast.position).or_default().push(toast);
    }
    groups
        .into_iter()
        .map(|(position, toasts)| ToastGroup { position, toasts })
        .collect()
}
