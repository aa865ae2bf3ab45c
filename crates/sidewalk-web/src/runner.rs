use sidewalk_core::bridge::{FrameLayout, HUD_FLOATS, PROTOCOL_VERSION};
use sidewalk_core::{
    EventFeedback, Game, GameConfig, GameEvent, InputEvent, InputQueue, InputState,
    SnapshotBuffer,
};

/// Wires the simulation core to the host loop.
///
/// The browser pushes input events between frames, calls [`GameRunner::tick`]
/// once per animation frame, then reads the HUD, instance, and event buffers
/// in place through the pointer accessors. The buffers stay valid until the
/// next `tick`.
pub struct GameRunner {
    game: Game<EventFeedback>,
    input: InputQueue,
    input_state: InputState,
    snapshot: SnapshotBuffer,
}

impl GameRunner {
    pub fn new(config: GameConfig) -> Self {
        let game = Game::new(config);
        let mut snapshot = SnapshotBuffer::new();
        snapshot.build(&game);
        Self {
            game,
            input: InputQueue::new(),
            input_state: InputState::new(),
            snapshot,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one host frame: apply queued input, step the game, rebuild the
    /// snapshot. Returns true when the simulation advanced.
    pub fn tick(&mut self, dt: f64) -> bool {
        // Events from the previous frame have been read by now
        self.game.feedback_mut().clear_events();

        self.input_state.apply_all(self.input.drain());
        let snapshot = self.input_state.snapshot();
        let advanced = self.game.tick(dt, &snapshot);

        self.snapshot.build(&self.game);
        advanced
    }

    pub fn pause(&mut self) {
        self.game.pause();
        self.input_state.apply(InputEvent::ReleaseAll);
        self.snapshot.build(&self.game);
    }

    pub fn resume(&mut self) {
        self.game.resume();
        self.snapshot.build(&self.game);
    }

    pub fn reset(&mut self) {
        self.game.reset();
        self.input_state.apply(InputEvent::ReleaseAll);
        self.snapshot.build(&self.game);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.game.resize(width, height);
        self.snapshot.build(&self.game);
    }

    pub fn set_high_score(&mut self, high_score: u32) {
        self.game.set_high_score(high_score);
        self.snapshot.build(&self.game);
    }

    pub fn game(&self) -> &Game<EventFeedback> {
        &self.game
    }

    // ---- Pointer accessors for in-place reads from the host ----

    pub fn hud_ptr(&self) -> *const f32 {
        self.snapshot.hud_ptr()
    }

    pub fn hud_len(&self) -> u32 {
        HUD_FLOATS as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.snapshot.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.snapshot.instance_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.game.feedback().events_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.game.feedback().events().len() as u32
    }

    pub fn game_events(&self) -> &[GameEvent] {
        self.game.feedback().events()
    }

    pub fn world_width(&self) -> f32 {
        self.game.world().width() as f32
    }

    pub fn world_height(&self) -> f32 {
        self.game.world().height() as f32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        FrameLayout::new(self.snapshot.instance_count()).total_floats as u32
    }

    pub fn protocol_version(&self) -> f32 {
        PROTOCOL_VERSION
    }

    pub fn hud(&self) -> &[f32; HUD_FLOATS] {
        &self.snapshot.hud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidewalk_core::bridge::protocol::{HUD_FRAME, HUD_PAUSED, HUD_SCORE};
    use sidewalk_core::{Action, EventKind, FeedbackSink};

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn tick_advances_and_refreshes_hud() {
        let mut runner = GameRunner::new(GameConfig::default());
        assert!(runner.tick(DT));
        assert!(runner.tick(DT));
        assert_eq!(runner.hud()[HUD_FRAME], 2.0);
        assert!(runner.instance_count() > 0);
    }

    #[test]
    fn queued_input_reaches_the_game() {
        let mut runner = GameRunner::new(GameConfig::default());
        runner.push_input(InputEvent::Press(Action::Shoot));
        runner.tick(DT);
        let max = runner.game().weapons().max_ammo();
        assert_eq!(runner.game().weapons().ammo(), max - 1);

        // Held until released
        runner.push_input(InputEvent::Release(Action::Shoot));
        for _ in 0..30 {
            runner.tick(DT);
        }
        assert_eq!(runner.game().weapons().ammo(), max - 1);
    }

    #[test]
    fn events_last_one_frame() {
        let mut runner = GameRunner::new(GameConfig::default());
        runner.tick(DT);
        runner
            .game
            .feedback_mut()
            .notify(GameEvent::new(EventKind::ComboIncremented, 1.0, 0.0, 0.0));
        assert!(runner.game_events_len() >= 1);
        runner.tick(DT);
        assert!(!runner
            .game_events()
            .iter()
            .any(|e| e.is(EventKind::ComboIncremented)));
    }

    #[test]
    fn pause_freezes_the_run() {
        let mut runner = GameRunner::new(GameConfig::default());
        runner.tick(DT);
        runner.pause();
        assert!(!runner.tick(DT));
        assert_eq!(runner.hud()[HUD_PAUSED], 1.0);
        assert_eq!(runner.hud()[HUD_FRAME], 1.0);
        runner.resume();
        assert!(runner.tick(DT));
    }

    #[test]
    fn reset_clears_score() {
        let mut runner = GameRunner::new(GameConfig::default());
        runner.tick(DT);
        runner.reset();
        assert_eq!(runner.hud()[HUD_SCORE], 0.0);
        assert_eq!(runner.hud()[HUD_FRAME], 0.0);
    }
}
