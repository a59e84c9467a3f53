//! Service event records and sinks.

mod record;
mod sink;

pub use record::ServiceEvent;
pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
