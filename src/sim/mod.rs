//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies
//!
//! The one exception to pure frame-counting is the avatar's reload timer,
//! which runs on monotonic clock seconds supplied by the caller each frame.

pub mod ai;
pub mod collision;
pub mod kinematics;
pub mod state;
pub mod tick;

pub use collision::resolve_collisions;
pub use kinematics::{integrate, Aabb};
pub use state::{Archetype, Avatar, Opponent, Projectile, SessionPhase, SessionState};
pub use tick::{tick, FrameIntent};
