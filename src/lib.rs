//! Rect Platformer - a rectangle-only 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, session state)
//! - `tuning`: Data-driven movement and session balance
//! - `clock`: Frame clock supplying capped `dt` and session timestamps

pub mod clock;
pub mod sim;
pub mod tuning;

pub use clock::{FrameClock, FrameTime};
pub use tuning::{PlayerTuning, SessionTuning, Tuning};

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    /// Playable arena width
    pub const ARENA_WIDTH: f32 = 960.0;
    /// Playable arena height
    pub const ARENA_HEIGHT: f32 = 540.0;

    /// Target frame rate of the pacing source
    pub const TARGET_FPS: u32 = 60;
    /// Nominal frame duration at the target rate
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;
    /// Largest dt handed to the simulation after a stall
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// How far below the arena the player's top edge may drop before the run ends
    pub const FALL_MARGIN: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 36.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Negative: screen y grows downward
    pub const PLAYER_JUMP_FORCE: f32 = -460.0;
    pub const PLAYER_GRAVITY: f32 = 1100.0;
    pub const PLAYER_MAX_FALL_SPEED: f32 = 900.0;
    /// Exponential smoothing rate for horizontal velocity (1/s)
    pub const PLAYER_RESPONSIVENESS: f32 = 12.0;
    /// Extra downward acceleration while fast-fall is held
    pub const PLAYER_FAST_FALL_ACCEL: f32 = 800.0;

    /// Grace window after leaving ground in which a jump still counts
    pub const COYOTE_TIME: f32 = 0.1;
    /// Window in which an early jump press is remembered
    pub const JUMP_BUFFER_TIME: f32 = 0.15;
}

/// Presentation colors carried on entities
pub mod palette {
    use serde::{Deserialize, Serialize};

    /// 8-bit RGB color
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Color {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Color {
        pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
            Self { r, g, b }
        }
    }

    pub const FLOOR: Color = Color::rgb(50, 60, 80);
    pub const LEDGE: Color = Color::rgb(60, 200, 120);
    pub const SLIDER: Color = Color::rgb(255, 150, 60);
    pub const LIFT: Color = Color::rgb(250, 210, 70);
    pub const ADVERSARY: Color = Color::rgb(230, 60, 60);
    pub const PLAYER: Color = Color::rgb(60, 120, 230);
}

/// Format an elapsed duration as `MM:SS` (whole seconds, minutes unbounded)
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
