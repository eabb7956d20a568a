use serde::{Deserialize, Serialize};

/// Represents an action button the presentation layer may show on a toast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ToastAction {
    /// Identifier reported back through `activate`
    pub id: String,
    /// User-visible label for the action button
    pub label: String,
}

impl ToastAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
