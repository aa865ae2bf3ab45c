use super::protocol::*;
use crate::api::FeedbackSink;
use crate::game::Game;

/// Seconds per frame for looping actor sheets (enemies, obstacles).
const ACTOR_FRAME_TIME: f64 = 0.1;
const ACTOR_SHEET_FRAMES: u32 = 8;

fn loop_frame(timer: f64) -> u32 {
    (timer / ACTOR_FRAME_TIME) as u32 % ACTOR_SHEET_FRAMES
}

/// Per-frame HUD plus draw list, rebuilt from a [`Game`] after each tick.
///
/// Instances are emitted back to front: parallax layers, pickups, obstacles
/// with their debris, enemies, the player, the weapon, then projectiles.
pub struct SnapshotBuffer {
    pub hud: [f32; HUD_FLOATS],
    pub instances: Vec<EntityInstance>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self {
            hud: [0.0; HUD_FLOATS],
            instances: Vec::with_capacity(256),
        }
    }

    pub fn build<F: FeedbackSink>(&mut self, game: &Game<F>) {
        self.write_hud(game);
        self.instances.clear();
        self.push_world(game);
        self.push_actors(game);
        self.push_weapon(game);
    }

    fn write_hud<F: FeedbackSink>(&mut self, game: &Game<F>) {
        let player = game.player();
        let weapons = game.weapons();
        let world = game.world();
        let hud = &mut self.hud;

        hud[HUD_FRAME] = game.clock().frame_count() as f32;
        hud[HUD_HP] = game.hp() as f32;
        hud[HUD_MAX_HP] = game.max_hp() as f32;
        hud[HUD_SCORE] = game.score() as f32;
        hud[HUD_HIGH_SCORE] = game.high_score() as f32;
        hud[HUD_COINS] = game.coins_collected() as f32;
        hud[HUD_AMMO] = weapons.ammo() as f32;
        hud[HUD_MAX_AMMO] = weapons.max_ammo() as f32;
        hud[HUD_RELOAD_PERCENT] = weapons.reload_percent() as f32;
        hud[HUD_DASH_CHARGES] = player.dash_charges as f32;
        hud[HUD_DASH_POWER] = player.dash_power_percent() as f32;
        hud[HUD_COMBO] = game.feedback().combo() as f32;
        hud[HUD_GAME_OVER] = if game.is_game_over() { 1.0 } else { 0.0 };
        hud[HUD_PAUSED] = if game.is_paused() { 1.0 } else { 0.0 };
        hud[HUD_CAMERA_X] = world.camera.camera_x as f32;
        hud[HUD_SCROLL_SPEED] = world.scroll_speed() as f32;
    }

    fn push_world<F: FeedbackSink>(&mut self, game: &Game<F>) {
        let world = game.world();

        for (i, layer) in world.layers().iter().enumerate() {
            let tile = layer.tile_width * layer.scale;
            self.instances.push(
                EntityInstance::new(EntityKind::Layer, -layer.offset(), 0.0, tile, world.height())
                    .variant(i as u32)
                    .extra(layer.scale),
            );
        }

        for coin in world.coins().iter().filter(|c| !c.collected) {
            self.instances.push(
                EntityInstance::new(EntityKind::Coin, coin.pos.x, coin.pos.y, coin.size, coin.size)
                    .rotation(coin.rotation.to_radians()),
            );
        }
        for pack in world.health_packs().iter().filter(|p| !p.collected) {
            self.instances.push(EntityInstance::new(
                EntityKind::HealthPack,
                pack.pos.x,
                pack.pos.y,
                pack.size,
                pack.size,
            ));
        }

        for obstacle in world.obstacles().obstacles().iter().filter(|o| o.active) {
            let mut bits = 0;
            if obstacle.destroying {
                bits |= flags::DESTROYING;
            }
            let alpha = obstacle.destruction_alpha();
            self.instances.push(
                EntityInstance::new(
                    EntityKind::Obstacle,
                    obstacle.pos.x,
                    obstacle.pos.y,
                    obstacle.width,
                    obstacle.height,
                )
                .variant(obstacle.kind.code())
                .frame(loop_frame(obstacle.anim_timer))
                .alpha(alpha)
                .flags(bits),
            );
            for chunk in &obstacle.debris {
                let half = chunk.size * 0.5;
                self.instances.push(
                    EntityInstance::new(
                        EntityKind::Debris,
                        chunk.position.x - half,
                        chunk.position.y - half,
                        chunk.size,
                        chunk.size,
                    )
                    .variant(obstacle.kind.code())
                    .rotation(chunk.rotation)
                    .alpha(alpha),
                );
            }
        }
    }

    fn push_actors<F: FeedbackSink>(&mut self, game: &Game<F>) {
        for enemy in game.enemies().enemies().iter().filter(|e| e.active) {
            let mut bits = 0;
            if enemy.hit_flash > 0.0 {
                bits |= flags::HIT_FLASH;
            }
            if enemy.is_dying() {
                bits |= flags::DYING;
            }
            if enemy.on_ground {
                bits |= flags::ON_GROUND;
            }
            let health = if enemy.max_health > 0 {
                enemy.health as f64 / enemy.max_health as f64
            } else {
                0.0
            };
            self.instances.push(
                EntityInstance::new(EntityKind::Enemy, enemy.pos.x, enemy.pos.y, enemy.width, enemy.height)
                    .variant(enemy.kind.code())
                    .frame(loop_frame(enemy.anim_timer))
                    .facing(enemy.facing)
                    .flags(bits)
                    .extra(health),
            );
        }

        let player = game.player();
        let mut bits = 0;
        if player.is_invincible {
            bits |= flags::INVINCIBLE;
        }
        if player.is_dashing {
            bits |= flags::DASHING;
        }
        if player.on_ground {
            bits |= flags::ON_GROUND;
        }
        self.instances.push(
            EntityInstance::new(EntityKind::Player, player.pos.x, player.pos.y, player.width, player.height)
                .variant(player.animation as u32)
                .frame(player.animation_frame)
                .rotation(player.flip_rotation)
                .facing(player.facing)
                .flags(bits)
                .extra(player.dash_power_percent()),
        );
    }

    fn push_weapon<F: FeedbackSink>(&mut self, game: &Game<F>) {
        let weapons = game.weapons();
        let player = game.player();

        if weapons.is_visible() {
            let barrel = crate::weapons::WeaponSystem::barrel_position(player);
            let mut bits = 0;
            if weapons.muzzle_flash_active() {
                bits |= flags::MUZZLE_FLASH;
            }
            if weapons.is_reloading() {
                bits |= flags::RELOADING;
            }
            self.instances.push(
                EntityInstance::new(EntityKind::Weapon, barrel.x, barrel.y, 0.0, 0.0)
                    .rotation(weapons.aim_angle())
                    .facing(player.facing)
                    .flags(bits)
                    .extra(weapons.recoil()),
            );
        }

        for bullet in weapons.bullets().iter().filter(|b| b.active) {
            self.instances.push(
                EntityInstance::new(EntityKind::Bullet, bullet.pos.x, bullet.pos.y, 0.0, 0.0)
                    .rotation(bullet.dir.y.atan2(bullet.dir.x))
                    .extra(bullet.trail.len() as f64),
            );
        }

        for casing in weapons.casings().iter().filter(|c| c.active) {
            self.instances.push(
                EntityInstance::new(EntityKind::Casing, casing.pos.x, casing.pos.y, 0.0, 0.0)
                    .rotation(casing.rotation)
                    .alpha(casing.alpha()),
            );
        }
    }

    pub fn hud_ptr(&self) -> *const f32 {
        self.hud.as_ptr()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Raw pointer to instance data for the host to read in place.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn layout(&self) -> FrameLayout {
        FrameLayout::new(self.instances.len())
    }

    pub fn count_of(&self, kind: EntityKind) -> usize {
        self.instances.iter().filter(|i| i.is(kind)).count()
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}
