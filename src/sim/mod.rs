//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives through `FrameTime`
//! - No randomness
//! - Stable iteration order (level insertion order)
//! - No rendering or device dependencies

pub mod adversary;
pub mod body;
pub mod level;
pub mod platform;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use adversary::Adversary;
pub use body::{KinematicBody, Span};
pub use level::{Level, build_level};
pub use platform::{Platform, PlatformMotion};
pub use player::{Intent, Player, StepReport};
pub use rect::Rect;
pub use state::{EndCause, Session, SessionEvent, SessionPhase, Snapshot, World};
pub use tick::{SessionControl, TickInput, tick};
