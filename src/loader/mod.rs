//! DocType loader: specification in, persisted record definition out

mod errors;
#[allow(clippy::module_inception)]
mod loader;
mod observer;

pub use errors::{LoadError, LoadPhase, LoadResult};
pub use loader::{DocTypeLoader, LoadReport, TOTAL_STEPS};
pub use observer::{ConsoleObserver, LoadObserver, SilentObserver};
