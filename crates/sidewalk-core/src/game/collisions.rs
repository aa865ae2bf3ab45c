use glam::DVec2;

use super::Game;
use crate::api::{CombatTextKind, EventKind, FeedbackSink, GameEvent};

const COIN_SCORE: u32 = 10;
/// Dash power per coin. Three coins make a charge.
const COIN_DASH_POWER: f64 = 33.34;
const HEALTH_PACK_HEAL: f64 = 30.0;
const HEALTH_PACK_SCORE: u32 = 25;
const DASH_SMASH_SCORE: u32 = 5;
const SHOT_OBSTACLE_SCORE: u32 = 25;
const KILL_SCORE: u32 = 50;
const HEADSHOT_KILL_BONUS: u32 = 25;
const HIT_SCORE: u32 = 10;
const HEADSHOT_HIT_BONUS: u32 = 5;
/// Screen shake (intensity, seconds) when an enemy lands a hit.
const ENEMY_SHAKE: (f64, f64) = (10.0, 0.3);
const OBSTACLE_SHAKE: (f64, f64) = (15.0, 0.4);

impl<F: FeedbackSink> Game<F> {
    /// Resolve this frame's contacts in a fixed order: pickups, obstacles,
    /// bullets against obstacles, bullets against enemies, enemy contact.
    pub(super) fn resolve_collisions(&mut self) {
        self.collect_pickups();
        self.obstacle_contact();
        self.bullets_vs_obstacles();
        self.bullets_vs_enemies();
        self.enemy_contact();
    }

    fn collect_pickups(&mut self) {
        let rect = self.player.rect();

        for _ in self.world.collect_coins(&rect) {
            self.coins_collected += 1;
            self.score += COIN_SCORE;
            self.player.add_dash_power(COIN_DASH_POWER);
            self.feedback.notify(GameEvent::new(
                EventKind::CoinCollected,
                self.score as f64,
                self.player.dash_charges as f64,
                0.0,
            ));
        }

        for _ in self.world.collect_health_packs(&rect) {
            let before = self.hp;
            self.hp = (self.hp + HEALTH_PACK_HEAL).min(self.config.max_health);
            let healed = self.hp - before;
            self.score += HEALTH_PACK_SCORE;
            if healed > 0.0 {
                let above = DVec2::new(rect.center().x, rect.top() - 10.0);
                self.feedback
                    .combat_text(above, healed, CombatTextKind::Bonus);
            }
            self.feedback.notify(GameEvent::new(
                EventKind::HealthCollected,
                healed,
                self.hp,
                0.0,
            ));
        }
    }

    /// Only the first overlapping obstacle counts each frame.
    fn obstacle_contact(&mut self) {
        let rect = self.player.rect();
        let Some(index) = self
            .world
            .obstacles()
            .check_player_collisions(&rect)
            .first()
            .copied()
        else {
            return;
        };
        let Some(obstacle) = self.world.obstacles().get(index) else {
            return;
        };
        let stats = obstacle.stats();
        let kind = obstacle.kind;
        let center = obstacle.center();

        if !stats.damages_player {
            return;
        }

        if self.player.is_dashing && stats.dash_smashable {
            if self.world.obstacles_mut().destroy(index) {
                self.score += DASH_SMASH_SCORE;
                self.obstacle_destroyed(center);
                log::debug!("dash smashed {:?}", kind);
            }
            return;
        }

        if !self.player.is_vulnerable() {
            return;
        }

        if self.world.obstacles_mut().destroy(index) {
            self.obstacle_destroyed(center);
        }
        let damage = self.player.take_damage(stats.contact_damage);
        self.damage_player(damage, OBSTACLE_SHAKE);
    }

    fn bullets_vs_obstacles(&mut self) {
        let hits = self
            .weapons
            .check_bullet_collisions(self.world.obstacles().obstacles());
        for hit in hits {
            let Some(center) = self.world.obstacles().get(hit.target).map(|o| o.center()) else {
                continue;
            };
            if self.world.obstacles_mut().destroy(hit.target) {
                self.score += SHOT_OBSTACLE_SCORE;
                self.obstacle_destroyed(center);
            }
        }
    }

    fn bullets_vs_enemies(&mut self) {
        let hits = self.weapons.check_bullet_collisions(self.enemies.enemies());
        for hit in hits {
            let Some(result) = self.enemies.damage(
                hit.target,
                hit.damage,
                Some(hit.impact_y),
                Some(&mut self.feedback),
            ) else {
                continue;
            };
            if result.damage == 0 {
                continue;
            }

            let headshot = if result.headshot { 1.0 } else { 0.0 };
            if result.killed {
                let mut award = KILL_SCORE;
                if result.headshot {
                    award += HEADSHOT_KILL_BONUS;
                }
                self.score += award;
                self.feedback.notify(GameEvent::new(
                    EventKind::EnemyKilled,
                    award as f64,
                    headshot,
                    0.0,
                ));
            } else {
                let mut award = HIT_SCORE;
                if result.headshot {
                    award += HEADSHOT_HIT_BONUS;
                }
                self.score += award;
            }
            self.feedback.notify(GameEvent::new(
                EventKind::EnemyHit,
                result.damage as f64,
                headshot,
                0.0,
            ));
        }
    }

    /// Only the first touching enemy counts each frame.
    fn enemy_contact(&mut self) {
        let rect = self.player.rect();
        let Some(index) = self.enemies.check_player_collisions(&rect).first().copied() else {
            return;
        };
        let Some(enemy) = self.enemies.enemies().get(index) else {
            return;
        };
        let contact = enemy.stats().contact_damage;
        let damage = self.player.take_damage(contact);
        self.damage_player(damage, ENEMY_SHAKE);
    }

    fn obstacle_destroyed(&mut self, center: DVec2) {
        self.feedback.notify(GameEvent::new(
            EventKind::ObstacleDestroyed,
            center.x,
            center.y,
            0.0,
        ));
    }
}

