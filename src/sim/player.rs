//! The player-controlled actor
//!
//! Movement is split in two phases per frame: `apply_intent` turns the
//! directional/action record into velocity changes and jump timers, then
//! `resolve_physics` integrates gravity and resolves collisions one axis
//! at a time against every platform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::platform::Platform;
use super::rect::Rect;
use crate::palette::{self, Color};
use crate::tuning::PlayerTuning;

/// Already-merged directional/action intent for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    /// Jump held this frame
    pub jump: bool,
    /// Fast-fall held this frame
    pub fast_fall: bool,
}

impl Intent {
    /// Horizontal axis in {-1, 0, 1}
    pub fn axis(&self) -> f32 {
        f32::from(u8::from(self.right)) - f32::from(u8::from(self.left))
    }
}

/// What happened during a physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Came to rest on a platform this frame
    pub landed: bool,
    /// Hit a platform's underside while rising
    pub bonked: bool,
    /// A buffered jump fired on landing
    pub jumped: bool,
}

/// The controllable actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    pub color: Color,
    pub tuning: PlayerTuning,
    pub on_ground: bool,
    /// Seconds left in which a jump is honored after leaving ground
    pub coyote_timer: f32,
    /// Seconds left in which a pressed jump is honored once grounded
    pub jump_buffer_timer: f32,
    /// Horizontal displacement inherited from platforms this frame
    pub carry_dx: f32,
}

impl Player {
    /// Create a player with its top-left corner at `spawn`
    pub fn new(spawn: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            body: KinematicBody::new(
                Rect::new(spawn.x, spawn.y, tuning.width, tuning.height),
                Vec2::ZERO,
            ),
            color: palette::PLAYER,
            tuning,
            on_ground: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            carry_dx: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    /// Consume this frame's intent. Call once per frame before physics.
    ///
    /// Returns true if a jump launched.
    pub fn apply_intent(&mut self, intent: &Intent, dt: f32) -> bool {
        let target_vx = intent.axis() * self.tuning.speed;
        let blend = (self.tuning.responsiveness * dt).clamp(0.0, 1.0);
        self.body.vel.x = (1.0 - blend) * self.body.vel.x + blend * target_vx;

        if intent.jump {
            self.jump_buffer_timer = self.tuning.jump_buffer;
        } else {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }

        let jumped = self.try_jump();

        if intent.fast_fall && self.body.vel.y > 0.0 {
            self.body.vel.y =
                (self.body.vel.y + self.tuning.fast_fall_accel * dt).min(self.tuning.max_fall_speed);
        }

        jumped
    }

    /// Launch if both the coyote and buffer windows are open; consumes both.
    fn try_jump(&mut self) -> bool {
        if self.coyote_timer > 0.0 && self.jump_buffer_timer > 0.0 {
            self.body.vel.y = self.tuning.jump_force;
            self.on_ground = false;
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Integrate gravity and resolve collisions against `platforms`, x then y.
    ///
    /// Overlaps are corrected one platform at a time in slice order; when
    /// two corrections disagree the last one wins.
    pub fn resolve_physics(&mut self, platforms: &[Platform], play_width: f32, dt: f32) -> StepReport {
        let mut report = StepReport::default();
        self.carry_dx = 0.0;

        let vel = &mut self.body.vel;
        let rect = &mut self.body.rect;

        vel.y = (vel.y + self.tuning.gravity * dt).min(self.tuning.max_fall_speed);

        // X axis
        rect.x += vel.x * dt;
        for platform in platforms {
            let other = platform.rect();
            if !rect.intersects(other) {
                continue;
            }
            if vel.x > 0.0 {
                rect.set_right(other.left());
            } else if vel.x < 0.0 {
                rect.set_left(other.right());
            }
        }

        // Y axis
        rect.y += vel.y * dt;
        let mut grounded = false;
        for platform in platforms {
            let other = platform.rect();
            if !rect.intersects(other) {
                continue;
            }
            if vel.y > 0.0 {
                rect.set_bottom(other.top());
                vel.y = 0.0;
                grounded = true;
                self.carry_dx += platform.vel().x * dt;
            } else if vel.y < 0.0 {
                rect.set_top(other.bottom());
                vel.y = 0.0;
                report.bonked = true;
            }
        }

        if grounded {
            rect.x += self.carry_dx;
        }

        if grounded {
            self.on_ground = true;
            self.coyote_timer = self.tuning.coyote_time;
            report.landed = true;
            // Early press remembered by the buffer fires on the landing frame
            report.jumped = self.try_jump();
        } else if self.on_ground {
            self.on_ground = false;
            self.coyote_timer = self.tuning.coyote_time;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }

        let max_x = (play_width - self.body.rect.width).max(0.0);
        self.body.rect.x = self.body.rect.x.min(max_x).max(0.0);

        report
    }
}
