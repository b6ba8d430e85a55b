//! Degradation tracking.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation, MAX_TRACKED_EVENTS};
