//! Patrolling adversaries

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{KinematicBody, Span};
use super::rect::Rect;
use crate::palette::{self, Color};

/// Walks back and forth along x; touching one ends the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub body: KinematicBody,
    pub color: Color,
    pub patrol: Span,
}

impl Adversary {
    /// # Panics
    ///
    /// Panics if the patrol span can't hold the rectangle or the rectangle
    /// starts outside it.
    pub fn new(rect: Rect, vx: f32, patrol: Span) -> Self {
        assert!(
            patrol.length() >= rect.width,
            "patrol {patrol:?} narrower than adversary width {}",
            rect.width
        );
        assert!(
            patrol.contains(rect.x, rect.width),
            "adversary starts outside its patrol {patrol:?}"
        );
        Self {
            body: KinematicBody::new(rect, Vec2::new(vx, 0.0)),
            color: palette::ADVERSARY,
            patrol,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    /// Advance along the patrol by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.body.bounce_x(self.patrol, dt);
    }
}
