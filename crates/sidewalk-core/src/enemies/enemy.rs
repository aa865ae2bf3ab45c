use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::{CombatTextKind, FeedbackSink};
use crate::core::{Collider, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

/// Fixed per-kind properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: u32,
    pub base_speed: f64,
    pub width: f64,
    pub height: f64,
    pub detection_range: f64,
    pub attack_range: f64,
    pub attack_cooldown: f64,
    /// Longest continuous chase before giving up.
    pub chase_timeout: f64,
    pub contact_damage: f64,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Tank];

    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                health: 2,
                base_speed: 80.0,
                width: 65.0,
                height: 105.0,
                detection_range: 200.0,
                attack_range: 50.0,
                attack_cooldown: 2.0,
                chase_timeout: 8.0,
                contact_damage: 15.0,
            },
            EnemyKind::Fast => EnemyStats {
                health: 2,
                base_speed: 140.0,
                width: 60.0,
                height: 100.0,
                detection_range: 250.0,
                attack_range: 50.0,
                attack_cooldown: 1.5,
                chase_timeout: 6.0,
                contact_damage: 10.0,
            },
            EnemyKind::Tank => EnemyStats {
                health: 5,
                base_speed: 50.0,
                width: 80.0,
                height: 120.0,
                detection_range: 180.0,
                attack_range: 60.0,
                attack_cooldown: 2.5,
                chase_timeout: 10.0,
                contact_damage: 25.0,
            },
        }
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Patrol,
    Chase,
    Attack,
    Dying,
}

/// Outcome of [`Enemy::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageResult {
    pub killed: bool,
    pub headshot: bool,
    pub damage: u32,
}

pub const GRAVITY: f64 = 980.0;
pub const DEATH_DURATION: f64 = 1.0;
const PATROL_TURN_TIME: f64 = 3.0;
const CHASE_SPEED_FACTOR: f64 = 3.0;
const CHASE_GIVE_UP_FACTOR: f64 = 2.5;
const ATTACK_HOLD_TIME: f64 = 0.5;
const ATTACK_RECHASE_FACTOR: f64 = 2.0;
/// Top share of the body that counts as the head.
const HEAD_ZONE: f64 = 0.3;
const HIT_FLASH_TIME: f64 = 0.2;
const DEATH_BOUNCE: f64 = -200.0;
const KILL_TEXT_SCORE: f64 = 100.0;
const HEADSHOT_KILL_TEXT_BONUS: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: DVec2,
    pub vel: DVec2,
    pub width: f64,
    pub height: f64,
    pub health: u32,
    pub max_health: u32,
    pub speed: f64,
    /// Patrol heading, ±1.
    pub direction: f64,
    pub facing: f64,
    pub state: AiState,
    pub ai_timer: f64,
    pub chase_timer: f64,
    pub attack_timer: f64,
    /// Strikes performed while attacking.
    pub strikes: u32,
    pub on_ground: bool,
    pub active: bool,
    pub death_timer: f64,
    pub hit_flash: f64,
    pub anim_timer: f64,
}

impl Enemy {
    pub fn new(kind: EnemyKind, x: f64, y: f64) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            pos: DVec2::new(x, y),
            vel: DVec2::ZERO,
            width: stats.width,
            height: stats.height,
            health: stats.health,
            max_health: stats.health,
            speed: stats.base_speed,
            direction: -1.0,
            facing: -1.0,
            state: AiState::Patrol,
            ai_timer: 0.0,
            chase_timer: 0.0,
            attack_timer: 0.0,
            strikes: 0,
            on_ground: false,
            active: true,
            death_timer: 0.0,
            hit_flash: 0.0,
            anim_timer: 0.0,
        }
    }

    pub fn stats(&self) -> EnemyStats {
        self.kind.stats()
    }

    pub fn is_dying(&self) -> bool {
        self.state == AiState::Dying
    }

    /// Active and not in its death animation.
    pub fn is_alive(&self) -> bool {
        self.active && !self.is_dying()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> DVec2 {
        self.rect().center()
    }

    pub fn update(&mut self, dt: f64, player_x: f64, ground_y: f64) {
        if !self.active {
            return;
        }
        if self.hit_flash > 0.0 {
            self.hit_flash = (self.hit_flash - dt).max(0.0);
        }
        if self.is_dying() {
            self.death_timer -= dt;
            if self.death_timer <= 0.0 {
                self.active = false;
                return;
            }
        } else {
            self.update_ai(dt, player_x);
        }
        self.apply_physics(dt, ground_y);
        self.anim_timer += dt;
    }

    fn update_ai(&mut self, dt: f64, player_x: f64) {
        let stats = self.stats();
        self.ai_timer += dt;
        if self.attack_timer > 0.0 {
            self.attack_timer -= dt;
        }

        let distance = (player_x - self.pos.x).abs();
        let toward_player = if player_x > self.pos.x { 1.0 } else { -1.0 };

        match self.state {
            AiState::Patrol => {
                self.vel.x = self.direction * self.speed;
                if self.ai_timer > PATROL_TURN_TIME {
                    self.direction = -self.direction;
                    self.facing = self.direction;
                    self.ai_timer = 0.0;
                }
                if distance < stats.detection_range {
                    self.state = AiState::Chase;
                    self.ai_timer = 0.0;
                    self.chase_timer = 0.0;
                }
            }
            AiState::Chase => {
                self.chase_timer += dt;
                self.direction = toward_player;
                self.facing = toward_player;
                self.vel.x = self.direction * self.speed * CHASE_SPEED_FACTOR;
                if distance < stats.attack_range {
                    self.state = AiState::Attack;
                    self.ai_timer = 0.0;
                } else if distance > stats.detection_range * CHASE_GIVE_UP_FACTOR
                    || self.chase_timer > stats.chase_timeout
                {
                    self.state = AiState::Patrol;
                    self.ai_timer = 0.0;
                }
            }
            AiState::Attack => {
                self.vel.x = 0.0;
                if self.attack_timer <= 0.0 {
                    self.strikes += 1;
                    self.attack_timer = stats.attack_cooldown;
                    log::debug!("{:?} enemy strikes", self.kind);
                }
                if self.ai_timer > ATTACK_HOLD_TIME {
                    self.state = if distance < stats.detection_range * ATTACK_RECHASE_FACTOR {
                        AiState::Chase
                    } else {
                        AiState::Patrol
                    };
                    self.ai_timer = 0.0;
                }
            }
            AiState::Dying => {}
        }
    }

    fn apply_physics(&mut self, dt: f64, ground_y: f64) {
        if !self.on_ground {
            self.vel.y += GRAVITY * dt;
        }
        self.pos += self.vel * dt;

        if self.pos.y + self.height >= ground_y {
            self.pos.y = ground_y - self.height;
            self.vel.y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }
    }

    /// Apply a hit. `impact_y` enables head-shot detection.
    ///
    /// Returns a zero result once the enemy is already dying.
    pub fn take_damage(
        &mut self,
        amount: u32,
        impact_y: Option<f64>,
        mut feedback: Option<&mut dyn FeedbackSink>,
    ) -> DamageResult {
        if !self.is_alive() {
            return DamageResult::default();
        }

        let headshot = impact_y.is_some_and(|y| y <= self.pos.y + self.height * HEAD_ZONE);
        let damage = if headshot { amount * 2 } else { amount };
        self.health = self.health.saturating_sub(damage);

        let text_pos = DVec2::new(self.pos.x + self.width / 2.0, self.pos.y);
        if let Some(fb) = feedback.as_deref_mut() {
            let kind = if headshot {
                CombatTextKind::Headshot
            } else {
                CombatTextKind::Damage
            };
            fb.combat_text(text_pos, damage as f64, kind);
        }

        if self.health == 0 {
            self.die();
            if let Some(fb) = feedback {
                let mut score = KILL_TEXT_SCORE;
                if headshot {
                    score += HEADSHOT_KILL_TEXT_BONUS;
                }
                fb.combat_text(text_pos, score, CombatTextKind::Kill);
                fb.add_kill_to_combo();
            }
            return DamageResult {
                killed: true,
                headshot,
                damage,
            };
        }

        self.hit_flash = HIT_FLASH_TIME;
        DamageResult {
            killed: false,
            headshot,
            damage,
        }
    }

    fn die(&mut self) {
        self.state = AiState::Dying;
        self.death_timer = DEATH_DURATION;
        self.vel = DVec2::new(0.0, DEATH_BOUNCE);
        self.on_ground = false;
        log::info!("{:?} enemy died", self.kind);
    }

    /// Camera compensation.
    pub fn shift_by(&mut self, dx: f64) {
        self.pos.x -= dx;
    }
}

impl Collider for Enemy {
    fn bounds(&self) -> Rect {
        self.rect()
    }

    fn is_hittable(&self) -> bool {
        self.is_alive()
    }
}
