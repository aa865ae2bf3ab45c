use bytemuck::{Pod, Zeroable};

/// Event kinds carried in [`GameEvent::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventKind {
    /// a = score, b = dash charges.
    CoinCollected = 1,
    /// a = hp restored, b = hp after.
    HealthCollected = 2,
    /// a = x, b = y of the obstacle centre.
    ObstacleDestroyed = 3,
    /// a = damage dealt, b = 1 for a head-shot.
    EnemyHit = 4,
    /// a = score awarded, b = 1 for a head-shot.
    EnemyKilled = 5,
    /// a = damage taken, b = hp after.
    PlayerDamaged = 6,
    /// a = combo count.
    ComboIncremented = 7,
    /// Combat text: a = x, b = y, c = value.
    TextDamage = 8,
    TextHeadshot = 9,
    TextKill = 10,
    TextBonus = 11,
    /// a = intensity, b = duration.
    ScreenShake = 12,
    /// a = final score, b = high score.
    GameOver = 13,
    /// a = ammo after the reload.
    Reloaded = 14,
}

/// A game event communicated from Rust to the host through a flat buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: EventKind, a: f64, b: f64, c: f64) -> Self {
        Self {
            kind: kind as u32 as f32,
            a: a as f32,
            b: b as f32,
            c: c as f32,
        }
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.kind == kind as u32 as f32
    }
}
