pub mod feedback;
pub mod types;

pub use feedback::{CombatTextKind, EventFeedback, FeedbackSink, NullFeedback};
pub use types::{EventKind, GameEvent};
