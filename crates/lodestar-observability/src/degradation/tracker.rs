//! Record every degradation event: component, failure mode, fallback used,
//! timestamp, recovery status.
//!
//! Shared by concurrent retrievals, so state sits behind a mutex. A poisoned
//! lock still yields the event list; tracking never fails a query. Only the
//! newest [`MAX_TRACKED_EVENTS`] events are kept.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use lodestar_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

use crate::tracing_setup::events;

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Oldest events are dropped past this many.
pub const MAX_TRACKED_EVENTS: usize = 256;

#[derive(Debug, Default)]
pub struct DegradationTracker {
    events: Mutex<VecDeque<TrackedDegradation>>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<TrackedDegradation>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a new degradation event and log it.
    pub fn record(&self, event: DegradationEvent) {
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        let mut events = self.lock();
        if events.len() == MAX_TRACKED_EVENTS {
            events.pop_front();
        }
        events.push_back(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered.
    /// Returns whether anything changed.
    pub fn mark_recovered(&self, component: &str) -> bool {
        let now = Utc::now();
        let mut changed = false;
        for tracked in self.lock().iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                changed = true;
            }
        }
        if changed {
            events::degradation_recovered(component);
        }
        changed
    }

    /// Snapshot of all tracked events, oldest first.
    pub fn events(&self) -> Vec<TrackedDegradation> {
        self.lock().iter().cloned().collect()
    }

    /// Active (unrecovered) degradations.
    pub fn active_degradations(&self) -> Vec<TrackedDegradation> {
        self.lock()
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .cloned()
            .collect()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.lock()
            .iter()
            .any(|t| t.event.component == component && t.recovery_status == RecoveryStatus::Active)
    }

    /// Remove and return every recorded event, oldest first.
    pub fn drain(&self) -> Vec<DegradationEvent> {
        self.lock().drain(..).map(|t| t.event).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
