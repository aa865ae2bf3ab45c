/// Logical controls, independent of the device that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Action {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
    Jump = 4,
    Dash = 5,
    Shoot = 6,
    Reload = 7,
}

impl Action {
    pub const COUNT: usize = 8;

    pub const ALL: [Action; Action::COUNT] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Dash,
        Action::Shoot,
        Action::Reload,
    ];

    /// Decode the numeric id sent by the host.
    pub fn from_code(code: u32) -> Option<Action> {
        Action::ALL.get(code as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Input events the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A control became held.
    Press(Action),
    /// A control was let go.
    Release(Action),
    /// Relative vertical mouse motion in pixels since the last event.
    AimDelta { dy: f64 },
    /// Current vertical deflection of the aim stick in [-1, 1].
    AimStick { y: f64 },
    /// Every control released (focus lost, pause menu opened).
    ReleaseAll,
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
