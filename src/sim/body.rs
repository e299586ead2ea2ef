//! Kinematic body shared by every moving entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Closed interval an entity's extent must stay inside along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn new(min: f32, max: f32) -> Self {
        assert!(min <= max, "span min {min} exceeds max {max}");
        Self { min, max }
    }

    pub fn length(&self) -> f32 {
        self.max - self.min
    }

    /// Largest start for which `start + extent` still fits under `max`.
    ///
    /// `max - extent` can round so that adding `extent` back lands past
    /// `max`; step down until it doesn't.
    pub fn max_start(&self, extent: f32) -> f32 {
        let mut start = self.max - extent;
        while start > self.min && start + extent > self.max {
            start = start.next_down();
        }
        start.max(self.min)
    }

    /// True if `[start, start + extent]` lies inside the span
    pub fn contains(&self, start: f32, extent: f32) -> bool {
        start >= self.min && start + extent <= self.max
    }
}

/// Rectangle plus velocity (units/s)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub rect: Rect,
    pub vel: Vec2,
}

impl KinematicBody {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self { rect, vel }
    }

    /// Move along x, clamping into `span` and reversing on violation
    pub fn bounce_x(&mut self, span: Span, dt: f32) {
        bounce_axis(&mut self.rect.x, &mut self.vel.x, self.rect.width, span, dt);
    }

    /// Move along y, clamping into `span` and reversing on violation
    pub fn bounce_y(&mut self, span: Span, dt: f32) {
        bounce_axis(&mut self.rect.y, &mut self.vel.y, self.rect.height, span, dt);
    }
}

/// Clamp-and-reverse integration on a single axis.
///
/// `span.length() >= extent` must hold; constructors check it.
fn bounce_axis(pos: &mut f32, vel: &mut f32, extent: f32, span: Span, dt: f32) {
    if *vel == 0.0 {
        return;
    }
    let next = *pos + *vel * dt;
    if next < span.min || next + extent > span.max {
        *pos = next.clamp(span.min, span.max_start(extent));
        *vel = -*vel;
    } else {
        *pos = next;
    }
}
