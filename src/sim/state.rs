//! Session state and lifecycle
//!
//! A session is either idle (menu), running a level, or ended with a
//! recorded survival time. The level and player only exist while a run is
//! active or just ended.

use std::time::Duration;

use serde::Serialize;

use super::adversary::Adversary;
use super::level::{Level, build_level};
use super::platform::Platform;
use super::player::Player;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// Menu; no simulation
    Idle,
    /// Active run
    Running,
    /// Run over, waiting for restart or return to menu
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndCause {
    /// Touched the adversary at this index
    AdversaryContact { index: usize },
    /// Dropped below the arena
    FellOut,
}

/// Things that happened during a tick, for presentation and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionEvent {
    Started,
    Restarted,
    ReturnedToMenu,
    Jumped,
    Landed,
    Ended { cause: EndCause, elapsed: Duration },
    QuitRequested,
}

/// The level and player of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    pub level: Level,
    pub player: Player,
}

impl World {
    /// Fresh level with a player at its spawn point
    pub fn new(tuning: &Tuning) -> Self {
        let level = build_level();
        let player = Player::new(level.spawn, tuning.player.clone());
        Self { level, player }
    }
}

/// Read-only view of the session for presentation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: SessionPhase,
    pub elapsed: Duration,
    pub ticks: u64,
    pub player: Option<&'a Player>,
    pub platforms: &'a [Platform],
    pub adversaries: &'a [Adversary],
    pub end_cause: Option<EndCause>,
}

/// Owns everything that survives between ticks
#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    phase: SessionPhase,
    world: Option<World>,
    /// Timestamp of the current run's start
    started_at: Duration,
    /// Survival time frozen when the run ended
    recorded: Duration,
    end_cause: Option<EndCause>,
    /// Simulated frames in the current run
    ticks: u64,
    quit_requested: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl Session {
    /// A session sitting at the menu
    ///
    /// # Panics
    ///
    /// Panics if `tuning` fails [`Tuning::validate`]. `Tuning::load` only
    /// returns tunings that pass.
    pub fn new(tuning: Tuning) -> Self {
        if let Err(e) = tuning.validate() {
            panic!("invalid tuning: {e}");
        }
        Self {
            tuning,
            phase: SessionPhase::Idle,
            world: None,
            started_at: Duration::ZERO,
            recorded: Duration::ZERO,
            end_cause: None,
            ticks: 0,
            quit_requested: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Set once a quit signal arrives; the driver should stop ticking
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Survival time: live while running, frozen once ended, zero at the menu
    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.phase {
            SessionPhase::Idle => Duration::ZERO,
            SessionPhase::Running => now.saturating_sub(self.started_at),
            SessionPhase::Ended => self.recorded,
        }
    }

    pub fn snapshot(&self, now: Duration) -> Snapshot<'_> {
        let (player, platforms, adversaries) = match &self.world {
            Some(world) => (
                Some(&world.player),
                world.level.platforms.as_slice(),
                world.level.adversaries.as_slice(),
            ),
            None => (None, &[][..], &[][..]),
        };
        Snapshot {
            phase: self.phase,
            elapsed: self.elapsed(now),
            ticks: self.ticks,
            player,
            platforms,
            adversaries,
            end_cause: self.end_cause,
        }
    }

    /// Build a fresh world and enter Running
    pub(crate) fn begin_run(&mut self, now: Duration) {
        self.world = Some(World::new(&self.tuning));
        self.phase = SessionPhase::Running;
        self.started_at = now;
        self.recorded = Duration::ZERO;
        self.end_cause = None;
        self.ticks = 0;
        log::info!("Run started");
    }

    /// Freeze the survival time and enter Ended
    pub(crate) fn end_run(&mut self, cause: EndCause, now: Duration) -> SessionEvent {
        self.recorded = now.saturating_sub(self.started_at);
        self.end_cause = Some(cause);
        self.phase = SessionPhase::Ended;
        log::info!(
            "Run ended ({cause:?}) after {}",
            crate::format_elapsed(self.recorded)
        );
        SessionEvent::Ended {
            cause,
            elapsed: self.recorded,
        }
    }

    /// Drop the world and go back to the menu
    pub(crate) fn return_to_menu(&mut self) {
        self.world = None;
        self.phase = SessionPhase::Idle;
        self.end_cause = None;
        self.recorded = Duration::ZERO;
        self.ticks = 0;
        log::info!("Returned to menu");
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit_requested = true;
        log::info!("Quit requested");
    }

    pub(crate) fn count_tick(&mut self) {
        self.ticks += 1;
    }
}
