//! Solid platforms, static or oscillating

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{KinematicBody, Span};
use super::rect::Rect;
use crate::palette::Color;

/// How a platform moves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlatformMotion {
    /// Never moves
    Static,
    /// Bounces between per-axis spans; an axis without a span stays put
    Oscillating { x: Option<Span>, y: Option<Span> },
}

/// A solid rectangle the player can stand on and collide with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub body: KinematicBody,
    pub color: Color,
    pub motion: PlatformMotion,
}

impl Platform {
    /// A platform that never moves
    pub fn fixed(rect: Rect, color: Color) -> Self {
        Self {
            body: KinematicBody::new(rect, Vec2::ZERO),
            color,
            motion: PlatformMotion::Static,
        }
    }

    /// A platform bouncing between `x_span` edges at `vx`
    pub fn horizontal(rect: Rect, color: Color, vx: f32, x_span: Span) -> Self {
        Self::oscillating(rect, color, Vec2::new(vx, 0.0), Some(x_span), None)
    }

    /// A platform bouncing between `y_span` edges at `vy`
    pub fn vertical(rect: Rect, color: Color, vy: f32, y_span: Span) -> Self {
        Self::oscillating(rect, color, Vec2::new(0.0, vy), None, Some(y_span))
    }

    /// A platform oscillating on either or both axes.
    ///
    /// # Panics
    ///
    /// Panics if a span is narrower than the rectangle, the rectangle starts
    /// outside a span, or an axis has velocity but no span.
    pub fn oscillating(
        rect: Rect,
        color: Color,
        vel: Vec2,
        x: Option<Span>,
        y: Option<Span>,
    ) -> Self {
        check_axis("x", rect.x, rect.width, vel.x, x);
        check_axis("y", rect.y, rect.height, vel.y, y);
        Self {
            body: KinematicBody::new(rect, vel),
            color,
            motion: PlatformMotion::Oscillating { x, y },
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

    pub fn is_static(&self) -> bool {
        matches!(self.motion, PlatformMotion::Static)
    }

    /// Effective bounds on each axis; an unbounded axis is pinned to the
    /// rectangle's current extent.
    pub fn bounds(&self) -> (Span, Span) {
        let rect = &self.body.rect;
        let pinned_x = Span::new(rect.left(), rect.right());
        let pinned_y = Span::new(rect.top(), rect.bottom());
        match self.motion {
            PlatformMotion::Static => (pinned_x, pinned_y),
            PlatformMotion::Oscillating { x, y } => (x.unwrap_or(pinned_x), y.unwrap_or(pinned_y)),
        }
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if let PlatformMotion::Oscillating { x, y } = self.motion {
            if let Some(span) = x {
                self.body.bounce_x(span, dt);
            }
            if let Some(span) = y {
                self.body.bounce_y(span, dt);
            }
        }
    }
}

fn check_axis(axis: &str, start: f32, extent: f32, vel: f32, span: Option<Span>) {
    match span {
        Some(span) => {
            assert!(
                span.length() >= extent,
                "{axis} span {span:?} narrower than platform extent {extent}"
            );
            assert!(
                span.contains(start, extent),
                "platform starts outside its {axis} span {span:?}"
            );
        }
        None => assert!(vel == 0.0, "platform has {axis} velocity but no {axis} span"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    fn slider() -> Platform {
        Platform::horizontal(
            Rect::new(120.0, 240.0, 140.0, 18.0),
            palette::SLIDER,
            140.0,
            Span::new(80.0, 320.0),
        )
    }

    #[test]
    fn test_static_platform_never_moves() {
        let mut p = Platform::fixed(Rect::new(60.0, 400.0, 160.0, 20.0), palette::LEDGE);
        let before = *p.rect();
        for _ in 0..100 {
            p.advance(1.0 / 60.0);
        }
        assert_eq!(*p.rect(), before);
        assert!(p.is_static());
    }

    #[test]
    fn test_reverses_exactly_at_max_edge() {
        let mut p = slider();
        // 60 units of travel before the right edge meets max_x = 320
        let dt = 0.01;
        let mut steps = 0;
        while p.vel().x > 0.0 {
            p.advance(dt);
            steps += 1;
            assert!(steps < 1000, "platform never reversed");
        }
        assert_eq!(p.vel().x, -140.0);
        assert_eq!(p.rect().right(), 320.0);
        assert_eq!(p.rect().x, 180.0);
    }

    #[test]
    fn test_reversal_happens_on_first_overshoot() {
        let mut p = slider();
        // one step short of the edge: still moving right
        p.body.rect.x = 179.0;
        p.advance(0.005); // 0.7 units
        assert_eq!(p.vel().x, 140.0);
        p.advance(0.005); // would reach 180.4 + 140 > 320
        assert_eq!(p.vel().x, -140.0);
        assert_eq!(p.rect().x, 180.0);
    }

    #[test]
    fn test_vertical_oscillation() {
        let mut p = Platform::vertical(
            Rect::new(820.0, 340.0, 100.0, 18.0),
            palette::LIFT,
            -140.0,
            Span::new(260.0, 420.0),
        );
        let mut flips = 0;
        let mut last = p.vel().y;
        for _ in 0..600 {
            p.advance(1.0 / 60.0);
            if p.vel().y != last {
                flips += 1;
                last = p.vel().y;
            }
            assert!(p.rect().top() >= 260.0 && p.rect().bottom() <= 420.0);
            assert_eq!(p.rect().x, 820.0);
        }
        assert!(flips >= 2);
    }

    #[test]
    fn test_two_axis_oscillation() {
        let mut p = Platform::oscillating(
            Rect::new(10.0, 10.0, 10.0, 10.0),
            palette::SLIDER,
            Vec2::new(50.0, 30.0),
            Some(Span::new(0.0, 60.0)),
            Some(Span::new(0.0, 40.0)),
        );
        for _ in 0..300 {
            p.advance(1.0 / 30.0);
            let (xs, ys) = p.bounds();
            assert!(xs.contains(p.rect().x, p.rect().width));
            assert!(ys.contains(p.rect().y, p.rect().height));
        }
    }

    #[test]
    #[should_panic]
    fn test_span_narrower_than_platform_rejected() {
        let _ = Platform::horizontal(
            Rect::new(0.0, 0.0, 100.0, 10.0),
            palette::SLIDER,
            10.0,
            Span::new(0.0, 50.0),
        );
    }

    #[test]
    #[should_panic]
    fn test_velocity_without_span_rejected() {
        let _ = Platform::oscillating(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            palette::SLIDER,
            Vec2::new(0.0, 5.0),
            Some(Span::new(0.0, 50.0)),
            None,
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bounds_never_violated(
                start in 0.0f32..=1.0,
                min_x in -1000.0f32..1000.0,
                min_y in -1000.0f32..1000.0,
                width in 0.5f32..300.0,
                height in 0.5f32..300.0,
                slack_x in 0.0f32..500.0,
                slack_y in 0.0f32..500.0,
                vx in -400.0f32..400.0,
                vy in -400.0f32..400.0,
                dts in proptest::collection::vec(0.0f32..0.1, 1..200)
            ) {
                let x_span = Span::new(min_x, min_x + width + slack_x);
                let y_span = Span::new(min_y, min_y + height + slack_y);
                prop_assume!(x_span.length() >= width && y_span.length() >= height);
                let x = (x_span.min + start * (x_span.max_start(width) - x_span.min))
                    .min(x_span.max_start(width));
                let y = (y_span.min + start * (y_span.max_start(height) - y_span.min))
                    .min(y_span.max_start(height));
                prop_assume!(x_span.contains(x, width) && y_span.contains(y, height));

                let mut p = Platform::oscillating(
                    Rect::new(x, y, width, height),
                    palette::SLIDER,
                    Vec2::new(vx, vy),
                    Some(x_span),
                    Some(y_span),
                );
                for dt in dts {
                    p.advance(dt);
                    let r = p.rect();
                    prop_assert!(r.left() >= x_span.min && r.right() <= x_span.max);
                    prop_assert!(r.top() >= y_span.min && r.bottom() <= y_span.max);
                }
            }
        }
    }
}
