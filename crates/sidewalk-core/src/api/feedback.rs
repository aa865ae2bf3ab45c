//! Outbound hooks from the simulation to the presentation layer.
//!
//! The core never draws text or shakes the screen itself. It reports what
//! happened through a [`FeedbackSink`] and the host decides how to show it.

use glam::DVec2;

use super::types::{EventKind, GameEvent};

/// Style of a floating combat number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatTextKind {
    Damage,
    Headshot,
    Kill,
    Bonus,
}

impl CombatTextKind {
    fn event_kind(self) -> EventKind {
        match self {
            CombatTextKind::Damage => EventKind::TextDamage,
            CombatTextKind::Headshot => EventKind::TextHeadshot,
            CombatTextKind::Kill => EventKind::TextKill,
            CombatTextKind::Bonus => EventKind::TextBonus,
        }
    }
}

/// Receiver for gameplay feedback. Every hook defaults to a no-op.
pub trait FeedbackSink {
    fn combat_text(&mut self, _pos: DVec2, _value: f64, _kind: CombatTextKind) {}

    fn add_kill_to_combo(&mut self) {}

    fn screen_shake(&mut self, _intensity: f64, _duration: f64) {}

    /// Generic notification channel for everything else.
    fn notify(&mut self, _event: GameEvent) {}

    /// Advance any timers the sink owns.
    fn tick(&mut self, _dt: f64) {}

    /// Current kill streak, for sinks that keep one.
    fn combo(&self) -> u32 {
        0
    }
}

/// Swallows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {}

/// Seconds without a kill before the combo resets.
pub const COMBO_RESET_TIME: f64 = 2.0;

/// Records feedback as [`GameEvent`]s for the host and keeps the combo counter.
#[derive(Debug, Clone, Default)]
pub struct EventFeedback {
    events: Vec<GameEvent>,
    combo: u32,
    combo_timer: f64,
}

impl EventFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn reset(&mut self) {
        self.events.clear();
        self.combo = 0;
        self.combo_timer = 0.0;
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn count_of(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.is(kind)).count()
    }
}

impl FeedbackSink for EventFeedback {
    fn combat_text(&mut self, pos: DVec2, value: f64, kind: CombatTextKind) {
        self.events
            .push(GameEvent::new(kind.event_kind(), pos.x, pos.y, value));
    }

    fn add_kill_to_combo(&mut self) {
        self.combo += 1;
        self.combo_timer = COMBO_RESET_TIME;
        self.events.push(GameEvent::new(
            EventKind::ComboIncremented,
            self.combo as f64,
            0.0,
            0.0,
        ));
    }

    fn screen_shake(&mut self, intensity: f64, duration: f64) {
        self.events
            .push(GameEvent::new(EventKind::ScreenShake, intensity, duration, 0.0));
    }

    fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn combo(&self) -> u32 {
        self.combo
    }

    fn tick(&mut self, dt: f64) {
        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo = 0;
                self.combo_timer = 0.0;
            }
        }
    }
}
