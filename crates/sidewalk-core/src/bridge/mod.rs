pub mod protocol;
pub mod snapshot;

pub use protocol::{EntityInstance, EntityKind, FrameLayout, HUD_FLOATS, PROTOCOL_VERSION};
pub use snapshot::SnapshotBuffer;
