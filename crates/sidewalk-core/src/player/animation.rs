//! Sprite-sheet state and frame selection. Presentation only: nothing here
//! feeds back into movement.

/// Which sheet the renderer should draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum AnimationState {
    #[default]
    Idle = 0,
    Running = 1,
    Jumping = 2,
    Dashing = 3,
    Flipping = 4,
    Shooting = 5,
    ShootingFlip = 6,
}

/// Gun handling phase: draw (frames 0-2) then a looping fire cycle (3-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShootPhase {
    #[default]
    Holstered,
    Draw,
    Fire,
}

/// Frames in the run cycle and flip sheet.
pub const SHEET_FRAMES: u32 = 8;
/// Seconds per run-cycle frame.
pub const RUN_FRAME_TIME: f64 = 0.1;
/// Horizontal speed above which the player counts as running.
pub const RUN_SPEED_THRESHOLD: f64 = 10.0;
/// Frames in one fire loop.
pub const FIRE_LOOP_FRAMES: u32 = 5;

/// Pose flags that decide the animation, highest priority first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pose {
    pub shooting: bool,
    pub flipping: bool,
    pub dashing: bool,
    pub on_ground: bool,
    pub speed_x: f64,
}

pub fn select_state(pose: &Pose) -> AnimationState {
    if pose.shooting && pose.flipping {
        AnimationState::ShootingFlip
    } else if pose.shooting {
        AnimationState::Shooting
    } else if pose.flipping {
        AnimationState::Flipping
    } else if pose.dashing {
        AnimationState::Dashing
    } else if !pose.on_ground {
        AnimationState::Jumping
    } else if pose.speed_x.abs() > RUN_SPEED_THRESHOLD {
        AnimationState::Running
    } else {
        AnimationState::Idle
    }
}

/// Frame `0..frames` for a progress value in [0, 1].
fn spread(progress: f64, frames: u32) -> u32 {
    let p = progress.clamp(0.0, 1.0);
    ((p * (frames as f64 - 0.01)).floor() as u32).min(frames - 1)
}

pub fn flip_frame(progress: f64) -> u32 {
    spread(progress, SHEET_FRAMES)
}

pub fn draw_frame(progress: f64) -> u32 {
    spread(progress, 3)
}

pub fn fire_frame(progress: f64) -> u32 {
    3 + spread(progress, FIRE_LOOP_FRAMES)
}

pub fn run_frame(timer: f64) -> u32 {
    ((timer.max(0.0) / RUN_FRAME_TIME).floor() as u64 % SHEET_FRAMES as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order() {
        let mut pose = Pose {
            shooting: true,
            flipping: true,
            dashing: true,
            on_ground: false,
            speed_x: 300.0,
        };
        assert_eq!(select_state(&pose), AnimationState::ShootingFlip);
        pose.flipping = false;
        assert_eq!(select_state(&pose), AnimationState::Shooting);
        pose.shooting = false;
        assert_eq!(select_state(&pose), AnimationState::Dashing);
        pose.dashing = false;
        assert_eq!(select_state(&pose), AnimationState::Jumping);
        pose.on_ground = true;
        assert_eq!(select_state(&pose), AnimationState::Running);
        pose.speed_x = 5.0;
        assert_eq!(select_state(&pose), AnimationState::Idle);
    }

    #[test]
    fn frame_ranges() {
        assert_eq!(flip_frame(0.0), 0);
        assert_eq!(flip_frame(1.0), 7);
        assert_eq!(draw_frame(1.0), 2);
        assert_eq!(fire_frame(0.0), 3);
        assert_eq!(fire_frame(1.0), 7);
        assert_eq!(fire_frame(-3.0), 3);
    }

    #[test]
    fn run_cycle_wraps() {
        assert_eq!(run_frame(0.05), 0);
        assert_eq!(run_frame(0.25), 2);
        assert_eq!(run_frame(0.85), 0);
    }
}
