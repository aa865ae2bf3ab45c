pub mod queue;
pub mod state;

pub use queue::{Action, InputEvent, InputQueue};
pub use state::{InputSnapshot, InputState};
