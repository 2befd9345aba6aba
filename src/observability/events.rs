//! Observable events of the phonebook service
//!
//! Events are explicit and typed so that every log line can be found by
//! its event name.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Person store opened and ready
    StoreOpened,
    /// Listener bound, accepting requests
    ServerStarted,
    /// Graceful shutdown finished
    ServerStopped,
    /// Boot could not complete
    BootFailed,

    // Requests
    /// One HTTP request served
    HttpRequest,
    /// A request failed because of the store
    RequestFailed,

    // Person mutations
    PersonCreated,
    PersonUpdated,
    PersonDeleted,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreOpened => "STORE_OPENED",
            Event::ServerStarted => "SERVER_STARTED",
            Event::ServerStopped => "SERVER_STOPPED",
            Event::BootFailed => "BOOT_FAILED",
            Event::HttpRequest => "HTTP_REQUEST",
            Event::RequestFailed => "REQUEST_FAILED",
            Event::PersonCreated => "PERSON_CREATED",
            Event::PersonUpdated => "PERSON_UPDATED",
            Event::PersonDeleted => "PERSON_DELETED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::BootFailed => Severity::Fatal,
            Event::RequestFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
