//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Validation
    /// Validation of a file begins
    ValidationBegin,
    /// Specification has no errors
    ValidationPassed,
    /// Specification has errors
    ValidationFailed,

    // Loading
    /// Specification parsed into a document
    SpecParsed,
    /// Target record type already exists and overwrite was not requested
    LoadConflict,
    /// Existing definition removed before re-creation
    DoctypeDeleted,
    /// Definition built from the specification
    DoctypeConverted,
    /// Definition persisted
    DoctypeInserted,

    // Store
    /// File store wrote a definition
    RecordWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",

            Event::SpecParsed => "SPEC_PARSED",
            Event::LoadConflict => "DOCTYPE_CONFLICT",
            Event::DoctypeDeleted => "DOCTYPE_DELETED",
            Event::DoctypeConverted => "DOCTYPE_CONVERTED",
            Event::DoctypeInserted => "DOCTYPE_INSERTED",

            Event::RecordWritten => "RECORD_WRITTEN",
        }
    }

    /// Severity the event is normally logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ValidationFailed | Event::LoadConflict | Event::DoctypeDeleted => {
                Severity::Warn
            }
            Event::RecordWritten | Event::SpecParsed => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
