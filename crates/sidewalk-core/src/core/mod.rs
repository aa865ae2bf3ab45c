pub mod physics;
pub mod rng;
pub mod time;

pub use physics::{Collider, Rect};
pub use rng::Rng;
pub use time::FrameClock;
