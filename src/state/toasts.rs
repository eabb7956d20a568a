use std::collections::VecDeque;
use toaster_util::{Toast, ToastGroup, ToastId, group_by_position};

/// Where `admit` placed a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Visible,
    Queued,
}

/// Outcome of `evict`
#[derive(Debug, Clone, PartialEq)]
pub enum Eviction {
    /// Removed from the visible set. `promoted` is the former queue head, now visible.
    Visible {
        evicted: Toast,
        promoted: Option<Toast>,
    },
    /// Removed from the queue before it was ever shown
    Pending { evicted: Toast },
    NotFound,
}

/// Visible toasts plus the overflow queue
///
/// The visible set is kept in insertion order, which is also display order.
/// Overflow waits in a FIFO queue and is promoted one toast per freed slot.
#[derive(Debug)]
pub struct ToastStore {
    max_visible: usize,
    visible: Vec<Toast>,
    pending: VecDeque<Toast>,
}

impl ToastStore {
    /// `max_visible` is validated by the configuration before it reaches the store
    pub fn new(max_visible: usize) -> Self {
        Self {
            max_visible,
            visible: Vec::with_capacity(max_visible),
            pending: VecDeque::new(),
        }
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn admit(&mut self, toast: Toast) -> Admission {
        if self.visible.len() < self.max_visible {
            self.visible.push(toast);
            Admission::Visible
        } else {
            self.pending.push_back(toast);
            Admission::Queued
        }
    }

    /// Remove a toast by ID from the visible set or the queue
    ///
    /// Unknown ids are a no-op.
    pub fn evict(&mut self, id: ToastId) -> Eviction {
        if let Some(pos) = self.visible.iter().position(|t| t.id == id) {
            let evicted = self.visible.remove(pos);
            let promoted = self.pending.pop_front().map(|next| {
                self.visible.push(next.clone());
                next
            });
            return Eviction::Visible { evicted, promoted };
        }

        self.pending
            .iter()
            .position(|t| t.id == id)
            .and_then(|pos| self.pending.remove(pos))
            .map_or(Eviction::NotFound, |evicted| Eviction::Pending { evicted })
    }

    /// Drop everything, returning the ids that were visible or queued
    pub fn clear(&mut self) -> Vec<ToastId> {
        let ids = self
            .visible
            .drain(..)
            .chain(self.pending.drain(..))
            .map(|t| t.id)
            .collect();
        self.shrink_visible();
        ids
    }

    pub fn visible(&self) -> &[Toast] {
        &self.visible
    }

    pub fn pending(&self) -> &VecDeque<Toast> {
        &self.pending
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.visible
            .iter()
            .chain(self.pending.iter())
            .find(|t| t.id == id)
    }

    /// Only visible toasts can be updated in place
    pub(crate) fn get_visible_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.visible.iter_mut().find(|t| t.id == id)
    }

    pub fn is_visible(&self, id: ToastId) -> bool {
        self.visible.iter().any(|t| t.id == id)
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.get(id).is_some()
    }

    pub fn queued_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.pending.is_empty()
    }

    fn shrink_visible(&mut self) {
        if self.visible.is_empty() {
            self.visible.shrink_to(self.max_visible);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            visible: self.visible.clone(),
            queued: self.pending.len(),
        }
    }
}

/// What the presentation layer renders: the visible toasts and the queue length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub visible: Vec<Toast>,
    pub queued: usize,
}

impl Snapshot {
    pub fn ids(&self) -> Vec<ToastId> {
        self.visible.iter().map(|t| t.id).collect()
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.visible.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// One group per placement that currently holds toasts
    pub fn by_position(&self) -> Vec<ToastGroup<'_>> {
        group_by_position(&self.visible)
    }
}
