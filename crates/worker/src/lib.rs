//! Worker primitives for background work that must hand its results back to
//! the UI mutation context.
//!
//! Tasks are spawned onto the ambient tokio runtime (or a small shared
//! runtime when called from a plain thread). Completions are never applied
//! here; callers send them over a channel that the UI context drains.

mod class;
mod panic;
mod spawn;
mod token;

pub use class::TaskClass;
pub use panic::{join_error_panic_message, panic_payload_message};
pub use spawn::spawn;
pub use token::GenerationClock;
