//! Record definitions derived from specifications

mod convert;
mod types;

pub use types::{DocFieldRecord, DocPermRecord, DocTypeRecord, BY_FIELDNAME_MARKER, DOCTYPE_KIND};
