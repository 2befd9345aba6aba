//! Observability for the phonebook service
//!
//! Structured JSON logging with typed events.
//!
//! # Usage
//!
//! ```ignore
//! use phonebook::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::PersonDeleted, &[("id", "…")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::StoreOpened);
        log_event(Event::ServerStopped);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ServerStarted, &[("addr", "127.0.0.1:3001")]);
    }
}
