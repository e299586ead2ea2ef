//! Movement and session tuning
//!
//! Loaded from an optional JSON file; every field falls back to the
//! built-in default so partial files are fine.

use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player actor tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Target horizontal speed when a direction is held
    pub speed: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_force: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Smoothing rate toward the target horizontal velocity
    pub responsiveness: f32,
    pub fast_fall_accel: f32,
    pub coyote_time: f32,
    pub jump_buffer: f32,
}

impl PlayerTuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        positive("player.width", self.width)?;
        positive("player.height", self.height)?;
        finite("player.speed", self.speed)?;
        finite("player.jump_force", self.jump_force)?;
        finite("player.gravity", self.gravity)?;
        non_negative("player.max_fall_speed", self.max_fall_speed)?;
        non_negative("player.responsiveness", self.responsiveness)?;
        non_negative("player.fast_fall_accel", self.fast_fall_accel)?;
        non_negative("player.coyote_time", self.coyote_time)?;
        non_negative("player.jump_buffer", self.jump_buffer)
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            jump_force: PLAYER_JUMP_FORCE,
            gravity: PLAYER_GRAVITY,
            max_fall_speed: PLAYER_MAX_FALL_SPEED,
            responsiveness: PLAYER_RESPONSIVENESS,
            fast_fall_accel: PLAYER_FAST_FALL_ACCEL,
            coyote_time: COYOTE_TIME,
            jump_buffer: JUMP_BUFFER_TIME,
        }
    }
}

/// Session-level tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Distance below the arena at which a falling player is lost
    pub fall_margin: f32,
    /// Upper bound on a single frame's dt
    pub max_frame_dt: f32,
}

impl SessionTuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        non_negative("session.fall_margin", self.fall_margin)?;
        non_negative("session.max_frame_dt", self.max_frame_dt)
    }
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            fall_margin: FALL_MARGIN,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// All tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub session: SessionTuning,
}

impl Tuning {
    /// Environment variable naming the tuning file
    pub const PATH_ENV: &'static str = "RECT_PLATFORMER_TUNING";
    /// File read when the environment variable is unset
    const DEFAULT_PATH: &'static str = "tuning.json";

    /// Parse tuning from JSON. Well-formed JSON holding values that fail
    /// [`Tuning::validate`] is an error too.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate().map_err(serde_json::Error::custom)?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.player.validate()?;
        self.session.validate()
    }

    /// Serialize the effective tuning
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from disk. Falls back to defaults if the file is missing,
    /// unparseable or out of range.
    pub fn load() -> Self {
        let path =
            std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load tuning from `path` with the same fallbacks as [`Tuning::load`]
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Rejected {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

fn finite(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} must be finite, got {value}"))
    }
}

fn positive(name: &str, value: f32) -> Result<(), String> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be positive, got {value}"))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), String> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must not be negative, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player": { "speed": 300.0 } }"#).unwrap();
        assert_eq!(tuning.player.speed, 300.0);
        assert_eq!(tuning.player.jump_force, PLAYER_JUMP_FORCE);
        assert_eq!(tuning.session, SessionTuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut tuning = Tuning::default();
        tuning.session.fall_margin = 120.0;
        let json = tuning.to_json_pretty().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ player: ").is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let rejected = [
            r#"{ "session": { "max_frame_dt": -1.0 } }"#,
            r#"{ "session": { "fall_margin": -5.0 } }"#,
            r#"{ "player": { "width": 0.0 } }"#,
            r#"{ "player": { "width": -36.0 } }"#,
            r#"{ "player": { "height": 0.0 } }"#,
            r#"{ "player": { "max_fall_speed": -1.0 } }"#,
            r#"{ "player": { "responsiveness": -12.0 } }"#,
            r#"{ "player": { "fast_fall_accel": -800.0 } }"#,
            r#"{ "player": { "coyote_time": -0.1 } }"#,
            r#"{ "player": { "jump_buffer": -0.15 } }"#,
        ];
        for json in rejected {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(err.to_string().contains("must"), "{json}: {err}");
        }
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let mut tuning = Tuning::default();
        tuning.session.max_frame_dt = f32::NAN;
        assert!(tuning.validate().unwrap_err().contains("session.max_frame_dt"));

        let mut tuning = Tuning::default();
        tuning.player.speed = f32::INFINITY;
        assert!(tuning.validate().unwrap_err().contains("player.speed"));

        let mut tuning = Tuning::default();
        tuning.player.gravity = f32::NEG_INFINITY;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.player.jump_force = f32::NAN;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_zero_frame_cap_and_margin_accepted() {
        let tuning =
            Tuning::from_json(r#"{ "session": { "max_frame_dt": 0.0, "fall_margin": 0.0 } }"#)
                .unwrap();
        assert_eq!(tuning.session.max_frame_dt, 0.0);
    }

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_from_falls_back_on_invalid_values() {
        let path = temp_file("bad-tuning.json", r#"{ "player": { "width": 0.0 } }"#);
        assert_eq!(Tuning::load_from(&path), Tuning::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_reads_valid_file() {
        let path = temp_file("good-tuning.json", r#"{ "player": { "speed": 300.0 } }"#);
        assert_eq!(Tuning::load_from(&path).player.speed, 300.0);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("rect-platformer-no-such-tuning.json");
        assert_eq!(Tuning::load_from(&path), Tuning::default());
    }

    #[test]
    fn test_loaded_tuning_survives_running_tick() {
        use crate::clock::FrameTime;
        use crate::sim::{Session, SessionControl, SessionPhase, TickInput, tick};
        use std::time::Duration;

        let path = temp_file("negative-dt-tuning.json", r#"{ "session": { "max_frame_dt": -1.0 } }"#);
        let mut session = Session::new(Tuning::load_from(&path));
        std::fs::remove_file(&path).unwrap();

        let start = TickInput {
            control: Some(SessionControl::Start),
            ..Default::default()
        };
        tick(&mut session, &start, FrameTime::fixed(FRAME_DT, Duration::ZERO));
        tick(
            &mut session,
            &TickInput::default(),
            FrameTime::fixed(FRAME_DT, Duration::from_millis(16)),
        );
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.ticks(), 1);
    }
}
