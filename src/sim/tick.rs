//! Per-frame simulation tick
//!
//! Dispatches session-control signals, then, while running, advances the
//! level, moves the player and checks the termination conditions.

use serde::{Deserialize, Serialize};

use super::player::Intent;
use super::state::{EndCause, Session, SessionEvent, SessionPhase};
use crate::clock::FrameTime;

/// Edge-triggered session signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionControl {
    /// Leave the menu and begin a run
    Start,
    /// Begin a fresh run after the previous one ended
    Restart,
    /// Leave the ended screen for the menu
    ReturnToMenu,
    /// Stop the session entirely
    Quit,
}

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub intent: Intent,
    /// At most one control signal per tick
    pub control: Option<SessionControl>,
}

/// Advance the session by one frame.
///
/// An accepted control signal consumes the tick: a run entered this frame
/// is shown as built and starts simulating on the next tick.
pub fn tick(session: &mut Session, input: &TickInput, frame: FrameTime) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    if let Some(control) = input.control
        && apply_control(session, control, frame, &mut events)
    {
        return events;
    }

    if session.phase() != SessionPhase::Running {
        return events;
    }

    let dt = frame.dt.min(session.tuning().session.max_frame_dt).max(0.0);
    let fall_margin = session.tuning().session.fall_margin;

    let Some(world) = session.world_mut() else {
        return events;
    };

    world.level.advance(dt);

    let player = &mut world.player;
    let was_on_ground = player.on_ground;
    if player.apply_intent(&input.intent, dt) {
        events.push(SessionEvent::Jumped);
    }
    let report = player.resolve_physics(&world.level.platforms, world.level.width(), dt);
    if report.landed && !was_on_ground {
        events.push(SessionEvent::Landed);
    }
    if report.jumped {
        events.push(SessionEvent::Jumped);
    }
    if report.bonked {
        log::trace!("Head bonk at {:?}", player.rect());
    }

    let cause = if let Some(index) = world.level.adversary_hit(player.rect()) {
        Some(EndCause::AdversaryContact { index })
    } else if player.rect().top() > world.level.height() + fall_margin {
        Some(EndCause::FellOut)
    } else {
        None
    };

    session.count_tick();
    if let Some(cause) = cause {
        events.push(session.end_run(cause, frame.now));
    }

    events
}

/// Apply a control signal. Returns true if it was accepted.
fn apply_control(
    session: &mut Session,
    control: SessionControl,
    frame: FrameTime,
    events: &mut Vec<SessionEvent>,
) -> bool {
    match (control, session.phase()) {
        (SessionControl::Quit, _) => {
            session.request_quit();
            events.push(SessionEvent::QuitRequested);
        }
        (SessionControl::Start, SessionPhase::Idle) => {
            session.begin_run(frame.now);
            events.push(SessionEvent::Started);
        }
        (SessionControl::Restart, SessionPhase::Ended) => {
            session.begin_run(frame.now);
            events.push(SessionEvent::Restarted);
        }
        (SessionControl::ReturnToMenu, SessionPhase::Ended) => {
            session.return_to_menu();
            events.push(SessionEvent::ReturnedToMenu);
        }
        (control, phase) => {
            log::debug!("Ignoring {control:?} while {phase:?}");
            return false;
        }
    }
    true
}
