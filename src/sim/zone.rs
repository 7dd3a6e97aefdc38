//! Play-field regions
//!
//! The world is split into a rolling zone (left half), where snowballs spawn
//! and grow, and a building zone (right half), where they are placed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, half-open: `min` inclusive, `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x < self.max.x
            && point.y >= self.min.y
            && point.y < self.max.y
    }

    /// True if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// Where a snowball may be spawned and where it may be placed
pub trait ZoneGate {
    fn point_in_rolling_zone(&self, point: Vec2) -> bool;
    fn point_in_building_zone(&self, point: Vec2) -> bool;
}

/// Two-zone play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub rolling_zone: Rect,
    pub building_zone: Rect,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        let half = (width / 2.0).floor();
        Self {
            width,
            height,
            rolling_zone: Rect::new(0.0, 0.0, half, height),
            building_zone: Rect::new(half, 0.0, width - half, height),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl ZoneGate for World {
    fn point_in_rolling_zone(&self, point: Vec2) -> bool {
        self.rolling_zone.contains(point)
    }

    fn point_in_building_zone(&self, point: Vec2) -> bool {
        self.building_zone.contains(point)
    }
}
