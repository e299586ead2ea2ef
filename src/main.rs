//! Rect Platformer entry point
//!
//! Headless driver: runs one autopiloted session and logs the outcome.
//! Frames come from a synthetic 60 Hz clock, or from the wall clock with
//! `--realtime`. Window, input devices and rendering are supplied by a
//! frontend, not this binary.

use std::time::Duration;

use rect_platformer::consts::{FRAME_DT, TARGET_FPS};
use rect_platformer::sim::{
    Intent, Session, SessionControl, SessionEvent, SessionPhase, TickInput, World, tick,
};
use rect_platformer::{FrameClock, FrameTime, Tuning, format_elapsed};

/// Give up after this much simulated time
const MAX_RUN: Duration = Duration::from_secs(120);

/// Driver state holding the session and the pending input
struct Game {
    session: Session,
    input: TickInput,
    /// Wall clock; `None` runs on synthetic frames
    clock: Option<FrameClock>,
    now: Duration,
    frames: u64,
}

impl Game {
    fn new(tuning: Tuning, realtime: bool) -> Self {
        let clock = realtime.then(|| FrameClock::for_session(&tuning.session));
        Self {
            session: Session::new(tuning),
            input: TickInput::default(),
            clock,
            now: Duration::ZERO,
            frames: 0,
        }
    }

    /// Run one frame
    fn update(&mut self) -> Vec<SessionEvent> {
        self.frames += 1;
        let frame = match &mut self.clock {
            Some(clock) => clock.tick(),
            None => FrameTime::fixed(
                FRAME_DT,
                Duration::from_secs_f64(self.frames as f64 / f64::from(TARGET_FPS)),
            ),
        };
        self.now = frame.now;

        if let Some(world) = self.session.world() {
            self.input.intent = autopilot(world, self.frames);
        }
        let events = tick(&mut self.session, &self.input, frame);

        // Clear one-shot inputs after processing
        self.input.control = None;
        events
    }
}

/// Keep away from the nearest adversary; hop when one gets close
fn autopilot(world: &World, frame: u64) -> Intent {
    let player = world.player.rect().center();
    let nearest = world
        .level
        .adversaries
        .iter()
        .map(|a| a.rect().center())
        .min_by(|a, b| {
            a.distance_squared(player)
                .partial_cmp(&b.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(threat) = nearest else {
        return Intent::default();
    };
    let dx = player.x - threat.x;
    let close = player.distance(threat) < 120.0;
    Intent {
        left: dx < 0.0,
        right: dx >= 0.0,
        jump: close || frame % 90 == 0,
        fast_fall: false,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rect Platformer (headless) starting...");

    let tuning = Tuning::load();
    match tuning.to_json_pretty() {
        Ok(json) => log::debug!("Effective tuning:\n{json}"),
        Err(e) => log::warn!("Could not serialize tuning: {e}"),
    }

    let realtime = std::env::args().skip(1).any(|arg| arg == "--realtime");
    let mut game = Game::new(tuning, realtime);
    game.input.control = Some(SessionControl::Start);

    while !game.session.quit_requested() {
        for event in game.update() {
            match event {
                SessionEvent::Ended { cause, elapsed } => {
                    log::info!("Survived {} ({cause:?})", format_elapsed(elapsed));
                    game.input.control = Some(SessionControl::Quit);
                }
                SessionEvent::Jumped | SessionEvent::Landed => log::trace!("{event:?}"),
                other => log::debug!("{other:?}"),
            }
        }

        if game.session.phase() == SessionPhase::Running
            && game.session.elapsed(game.now) >= MAX_RUN
        {
            log::info!("Still alive after {}, stopping", format_elapsed(MAX_RUN));
            game.input.control = Some(SessionControl::Quit);
        }

        if realtime {
            std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
        }
    }

    match serde_json::to_string(&game.session.snapshot(game.now)) {
        Ok(json) => log::debug!("Final snapshot: {json}"),
        Err(e) => log::warn!("Could not serialize snapshot: {e}"),
    }
    log::info!("Simulated {} frames", game.frames);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser frontends drive the simulation through the library
}
