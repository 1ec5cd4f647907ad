//! Pure transformations for HTTP fetching.
//!
//! Nothing in here performs I/O; the effect layer calls into these to decide
//! whether and when to try again.

mod retry;

pub use retry::{is_retryable_status, retry_delay};
