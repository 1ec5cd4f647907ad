//! Progress instrumentation for a single download.
//!
//! Picks a rendering strategy from the response's `Content-Length` and the
//! interactivity of the run, then turns byte counts into terminal output.
//! Rendering is best-effort: nothing in here can fail a download.

mod mode;
mod state;
mod tracker;

pub use mode::ProgressMode;
pub use state::{Cadence, ProgressState, format_clock};
pub use tracker::{Instrument, Tracker};

pub use indicatif::ProgressDrawTarget;
