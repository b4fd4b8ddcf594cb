//! Observability for declaration tooling
//!
//! Structured JSON logging with deterministic output. Logging is
//! read-only with respect to declarations: no event ever changes what
//! gets declared or emitted.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event with fields
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = match event {
        Event::ValidationFailed => Severity::Error,
        _ => Severity::Info,
    };
    Logger::log(severity, event.as_str(), fields);
}
