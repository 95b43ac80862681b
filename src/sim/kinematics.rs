//! Leaf kinematics: fixed-step integration and AABB overlap
//!
//! Every hit test in the game goes through [`Aabb::overlaps`]; there is no
//! pixel-perfect or rotated collision anywhere.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle. Origin is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Half-open interval overlap on both axes. Rectangles that merely share
    /// an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// One fixed-step integration: gravity accelerates vertical velocity, then
/// position advances by the updated velocity. No substepping.
pub fn integrate(pos: Vec2, vel: Vec2, gravity: f32) -> (Vec2, Vec2) {
    let vel = Vec2::new(vel.x, vel.y + gravity);
    (pos + vel, vel)
}
