/// Variable-step frame clock.
///
/// The simulation integrates with the real frame delta, clamped so a stalled
/// tab does not tunnel entities through each other on resume.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Upper bound for a single simulated step.
    max_dt: f64,
    paused: bool,
    /// Simulated seconds since start (excludes paused time).
    elapsed: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self {
            max_dt,
            paused: false,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Convert a raw frame delta into the step to simulate.
    /// Returns `None` while paused or for a non-positive delta.
    pub fn step(&mut self, frame_dt: f64) -> Option<f64> {
        if self.paused || frame_dt.is_nan() || frame_dt <= 0.0 {
            return None;
        }
        let dt = if frame_dt > self.max_dt {
            log::warn!("frame delta {:.3}s clamped to {:.3}s", frame_dt, self.max_dt);
            self.max_dt
        } else {
            frame_dt
        };
        self.elapsed += dt;
        self.frames += 1;
        Some(dt)
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.frames = 0;
        self.paused = false;
    }
}
