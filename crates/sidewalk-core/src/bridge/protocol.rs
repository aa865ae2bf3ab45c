//! Flat frame layout shared with the JavaScript renderer.
//!
//! Layout (all values f32 / 4 bytes):
//! ```text
//! [HUD: 16 floats]
//! [Instances: instance_count × 12 floats]
//! ```
//!
//! Game events travel separately as `kind, a, b, c` quadruples.

use bytemuck::{Pod, Zeroable};

/// Number of floats in the HUD section.
pub const HUD_FLOATS: usize = 16;

/// HUD field indices.
pub const HUD_FRAME: usize = 0;
pub const HUD_HP: usize = 1;
pub const HUD_MAX_HP: usize = 2;
pub const HUD_SCORE: usize = 3;
pub const HUD_HIGH_SCORE: usize = 4;
pub const HUD_COINS: usize = 5;
pub const HUD_AMMO: usize = 6;
pub const HUD_MAX_AMMO: usize = 7;
pub const HUD_RELOAD_PERCENT: usize = 8;
pub const HUD_DASH_CHARGES: usize = 9;
pub const HUD_DASH_POWER: usize = 10;
pub const HUD_COMBO: usize = 11;
pub const HUD_GAME_OVER: usize = 12;
pub const HUD_PAUSED: usize = 13;
pub const HUD_CAMERA_X: usize = 14;
pub const HUD_SCROLL_SPEED: usize = 15;

/// Protocol version, bumped whenever the layout changes.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// What an [`EntityInstance`] depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EntityKind {
    /// variant = parallax index, x = wrapped offset.
    Layer = 1,
    Coin = 2,
    HealthPack = 3,
    /// variant = obstacle kind code.
    Obstacle = 4,
    Debris = 5,
    /// variant = enemy kind code, extra = health fraction.
    Enemy = 6,
    /// variant = animation state, extra = dash power fraction.
    Player = 7,
    /// rotation = aim angle, extra = recoil.
    Weapon = 8,
    /// extra = trail point count.
    Bullet = 9,
    Casing = 10,
}

/// Bits in [`EntityInstance::flags`].
pub mod flags {
    pub const INVINCIBLE: u32 = 1;
    pub const DASHING: u32 = 1 << 1;
    pub const ON_GROUND: u32 = 1 << 2;
    pub const HIT_FLASH: u32 = 1 << 3;
    pub const DYING: u32 = 1 << 4;
    pub const DESTROYING: u32 = 1 << 5;
    pub const MUZZLE_FLASH: u32 = 1 << 6;
    pub const RELOADING: u32 = 1 << 7;
}

/// One drawable, 12 floats = 48 bytes stride. Positions are top-left
/// corners in screen space.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EntityInstance {
    pub kind: f32,
    /// Sub-type within `kind` (obstacle kind, enemy kind, layer index).
    pub variant: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Radians.
    pub rotation: f32,
    /// Sprite-sheet frame.
    pub frame: f32,
    pub alpha: f32,
    /// +1 right, -1 left.
    pub facing: f32,
    pub flags: f32,
    /// Kind-specific payload.
    pub extra: f32,
}

impl EntityInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(kind: EntityKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind: kind as u32 as f32,
            x: x as f32,
            y: y as f32,
            width: width as f32,
            height: height as f32,
            alpha: 1.0,
            facing: 1.0,
            ..Self::default()
        }
    }

    pub fn variant(mut self, variant: u32) -> Self {
        self.variant = variant as f32;
        self
    }

    pub fn rotation(mut self, radians: f64) -> Self {
        self.rotation = radians as f32;
        self
    }

    pub fn frame(mut self, frame: u32) -> Self {
        self.frame = frame as f32;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha as f32;
        self
    }

    pub fn facing(mut self, facing: f64) -> Self {
        self.facing = facing as f32;
        self
    }

    pub fn flags(mut self, bits: u32) -> Self {
        self.flags = bits as f32;
        self
    }

    pub fn extra(mut self, value: f64) -> Self {
        self.extra = value as f32;
        self
    }

    pub fn is(&self, kind: EntityKind) -> bool {
        self.kind == kind as u32 as f32
    }
}

/// Sizes of a full frame buffer for a given instance count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub instance_count: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_offset: usize,
    pub total_floats: usize,
}

impl FrameLayout {
    pub fn new(instance_count: usize) -> Self {
        let instance_offset = HUD_FLOATS;
        Self {
            instance_count,
            instance_offset,
            total_floats: instance_offset + instance_count * EntityInstance::FLOATS,
        }
    }

    pub fn total_bytes(&self) -> usize {
        self.total_floats * 4
    }
}
