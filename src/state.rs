use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::store::EventStore;

/// Source of the current wall-clock time used for event status.
pub type Clock = fn() -> NaiveDateTime;

/// Server-local time without zone, matching how event timestamps are stored.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    clock: Clock,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}
