//! Event sink trait and implementations.

use async_trait::async_trait;
use tracing::{debug, info, Level};

use super::ServiceEvent;

/// Trait for sinks that receive service events.
///
/// Sinks are used for observability, logging, and analytics.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits an event asynchronously.
    async fn emit(&self, event: ServiceEvent);

    /// Emits an event without blocking.
    ///
    /// This method never fails; delivery problems are logged and
    /// suppressed.
    fn try_emit(&self, event: ServiceEvent);
}

/// A no-op sink that discards all events.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: ServiceEvent) {
        // Intentionally empty - discards all events
    }

    fn try_emit(&self, _event: ServiceEvent) {
        // Intentionally empty - discards all events
    }
}

/// A sink that logs events through the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a logging sink at the given level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Creates an info-level logging sink.
    #[must_use]
    pub fn info() -> Self {
        Self::new(Level::INFO)
    }

    fn log_event(&self, event: &ServiceEvent) {
        match self.level {
            Level::DEBUG => {
                debug!(
                    service = %event.service,
                    event_data = ?event.data,
                    "Event: {}", event.event
                );
            }
            _ => {
                info!(
                    service = %event.service,
                    event_data = ?event.data,
                    "Event: {}", event.event
                );
            }
        }
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: ServiceEvent) {
        self.log_event(&event);
    }

    fn try_emit(&self, event: ServiceEvent) {
        self.log_event(&event);
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: parking_lot::RwLock<Vec<ServiceEvent>>,
}

impl CollectingEventSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<ServiceEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: ServiceEvent) {
        self.events.write().push(event);
    }

    fn try_emit(&self, event: ServiceEvent) {
        self.events.write().push(event);
    }
}
