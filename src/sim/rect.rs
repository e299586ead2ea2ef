//! Axis-aligned rectangle
//!
//! Screen-space convention: `y` grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// # Panics
    ///
    /// Panics if `width` or `height` is not strictly positive.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "rect extents must be positive, got {width}x{height}"
        );
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// True if the rectangles share interior area (touching edges don't count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let floor = Rect::new(0.0, 100.0, 200.0, 20.0);
        let mut standing = Rect::new(50.0, 0.0, 10.0, 10.0);
        standing.set_bottom(floor.top());
        assert!(!standing.intersects(&floor));

        standing.y += 0.01;
        assert!(standing.intersects(&floor));
    }

    #[test]
    fn test_edge_setters() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 5.0);
        r.set_right(100.0);
        assert_eq!(r.left(), 90.0);
        r.set_bottom(50.0);
        assert_eq!(r.top(), 45.0);
    }

    #[test]
    #[should_panic]
    fn test_zero_width_rejected() {
        let _ = Rect::new(0.0, 0.0, 0.0, 10.0);
    }
}
