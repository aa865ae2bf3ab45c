pub mod api;
pub mod bridge;
pub mod config;
pub mod core;
pub mod enemies;
pub mod game;
pub mod input;
pub mod obstacles;
pub mod player;
pub mod weapons;
pub mod world;

// Re-export key types at crate root for convenience
pub use api::{CombatTextKind, EventFeedback, EventKind, FeedbackSink, GameEvent, NullFeedback};
pub use bridge::{EntityInstance, EntityKind, SnapshotBuffer};
pub use config::{ConfigError, GameConfig};
pub use self::core::{FrameClock, Rect, Rng};
pub use game::{Game, GameState};
pub use input::{Action, InputEvent, InputQueue, InputSnapshot, InputState};
