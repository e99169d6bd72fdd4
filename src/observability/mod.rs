//! Observability for the validator and loader
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events
//! - Begin/complete scopes around loads
//!
//! Observability is read-only: nothing here affects validation or loading.
//!
//! ```ignore
//! use doctype_creator::observability::{Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! Logger::event(Event::DoctypeInserted, &[("doctype", "Supplier")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;
