//! Data-driven session balance
//!
//! Roster composition and spawn placement live here rather than in code so
//! tests can build reduced sessions and balance can be tweaked without
//! touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Roster and spawn-band parameters for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Patrol opponents per session
    pub patrol_count: u32,
    /// FastPatrol opponents per session
    pub fast_patrol_count: u32,
    /// Melee opponents per session
    pub melee_count: u32,
    /// Horizontal spawn range
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    /// Maximum height above standing-on-ground that an opponent may spawn
    pub spawn_drop: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            patrol_count: 3,
            fast_patrol_count: 2,
            melee_count: 1,
            spawn_x_min: 200.0,
            spawn_x_max: ARENA_WIDTH - 100.0,
            spawn_drop: 200.0,
        }
    }
}

impl Tuning {
    /// Total opponents a fresh session starts with
    pub fn roster_size(&self) -> u32 {
        self.patrol_count + self.fast_patrol_count + self.melee_count
    }
}
