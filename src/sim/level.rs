//! Fixed level layout
//!
//! The arena is a single screen: a floor, three static ledges, two
//! horizontal sliders, one vertical lift and three patrolling adversaries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::adversary::Adversary;
use super::body::Span;
use super::platform::Platform;
use super::rect::Rect;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::palette;

/// Platforms, adversaries and the player spawn point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Playable area (width, height)
    pub size: Vec2,
    /// Floor first, then static ledges, then moving platforms
    pub platforms: Vec<Platform>,
    pub adversaries: Vec<Adversary>,
    /// Top-left corner of the player on spawn
    pub spawn: Vec2,
}

impl Level {
    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Advance every moving entity by `dt`
    pub fn advance(&mut self, dt: f32) {
        for platform in &mut self.platforms {
            platform.advance(dt);
        }
        for adversary in &mut self.adversaries {
            adversary.advance(dt);
        }
    }

    /// Index of the first adversary overlapping `rect`
    pub fn adversary_hit(&self, rect: &Rect) -> Option<usize> {
        self.adversaries.iter().position(|a| a.rect().intersects(rect))
    }
}

/// Build the fixed arena layout
pub fn build_level() -> Level {
    let (w, h) = (ARENA_WIDTH, ARENA_HEIGHT);

    let platforms = vec![
        // Floor
        Platform::fixed(Rect::new(0.0, h - 40.0, w, 40.0), palette::FLOOR),
        // Static ledges
        Platform::fixed(Rect::new(60.0, h - 140.0, 160.0, 20.0), palette::LEDGE),
        Platform::fixed(Rect::new(360.0, h - 220.0, 150.0, 20.0), palette::LEDGE),
        Platform::fixed(Rect::new(650.0, h - 300.0, 180.0, 20.0), palette::LEDGE),
        // Horizontal sliders
        Platform::horizontal(
            Rect::new(120.0, h - 300.0, 140.0, 18.0),
            palette::SLIDER,
            140.0,
            Span::new(80.0, 320.0),
        ),
        Platform::horizontal(
            Rect::new(520.0, h - 160.0, 120.0, 18.0),
            palette::SLIDER,
            -160.0,
            Span::new(420.0, 720.0),
        ),
        // Vertical lift
        Platform::vertical(
            Rect::new(820.0, h - 200.0, 100.0, 18.0),
            palette::LIFT,
            -140.0,
            Span::new(h - 280.0, h - 120.0),
        ),
    ];

    let adversaries = vec![
        Adversary::new(Rect::new(80.0, h - 70.0, 36.0, 30.0), 130.0, Span::new(40.0, 320.0)),
        Adversary::new(Rect::new(370.0, h - 250.0, 36.0, 30.0), 110.0, Span::new(360.0, 510.0)),
        Adversary::new(Rect::new(660.0, h - 330.0, 36.0, 30.0), 150.0, Span::new(650.0, 830.0)),
    ];

    let level = Level {
        size: Vec2::new(w, h),
        platforms,
        adversaries,
        spawn: Vec2::new(40.0, h - 120.0),
    };
    log::debug!(
        "Built level: {} platforms, {} adversaries, spawn {:?}",
        level.platforms.len(),
        level.adversaries.len(),
        level.spawn
    );
    level
}
