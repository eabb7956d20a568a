// Constants module for toaster
// Centralizes magic numbers and default strings

// ============================================================================
// Channel and Buffer Constants
// ============================================================================

/// Buffer size for the lifecycle event broadcast channel
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 100;

// ============================================================================
// Promise Toast Text
// ============================================================================

/// Text of the loading toast shown while bound work is pending
pub(crate) const DEFAULT_LOADING_TEXT: &str = "Loading...";

/// Text of the toast shown when bound work succeeds
pub(crate) const DEFAULT_SUCCESS_TEXT: &str = "Success!";

/// Text of the toast shown when bound work fails
pub(crate) const DEFAULT_ERROR_TEXT: &str = "Something went wrong!";

// ============================================================================
// Logging Constants
// ============================================================================

/// Filter used when `RUST_LOG` is unset or invalid
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";
