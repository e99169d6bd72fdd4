//! doctype-creator - validate DocType YAML specifications and load them
//! into a record store
//!
//! Pipeline: specification file → [`spec::DocTypeValidator`] →
//! [`record::DocTypeRecord`] → [`store::RecordStore`], driven by
//! [`loader::DocTypeLoader`].

pub mod cli;
pub mod loader;
pub mod observability;
pub mod record;
pub mod spec;
pub mod store;
