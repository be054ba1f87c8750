//! Event templates, the catalog they are drawn from, and response timers.
//!
//! - `EventTemplate`: static description of one dare/quiz/swing
//! - `MovementEffect`: the tile movement a template applies when accepted
//! - `EventCatalog`: category -> pool mapping with the uniform draw rule
//! - `ResponseTimer`: cancellable countdown token for timed events

mod template;
mod catalog;
mod content;
mod timer;

pub use template::{EventTemplate, MovementEffect};
pub use catalog::EventCatalog;
pub use timer::{ResponseTimer, TimerStatus};
