//! ReactRunner: builds the ReAct graph once and runs it per query.

mod error;
mod outcome;
#[allow(clippy::module_inception)]
mod runner;

pub use error::RunError;
pub use outcome::ReactOutcome;
pub use runner::ReactRunner;
