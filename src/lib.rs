//! Groundfire - a side-view arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, entities, AI, collisions)
//! - `session`: Frame loop, collaborator seams, auto-restart
//! - `autopilot`: Scripted input source that plays the avatar
//! - `tuning`: Data-driven session balance

pub mod autopilot;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{Clock, FrameSnapshot, InputSource, Presenter, SessionController};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Distances are pixels, velocities are pixels per simulation frame at the
/// fixed 60 Hz step. Only the reload timer runs on wall-clock seconds.
pub mod consts {
    /// Fixed simulation rate (frames per second)
    pub const FRAME_RATE: u32 = 60;
    /// Fixed frame duration in seconds
    pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Height of the ground band at the bottom of the arena
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Y coordinate of the ground line (top of the ground band)
    pub const GROUND_Y: f32 = ARENA_HEIGHT - GROUND_HEIGHT;

    /// Combatant dimensions (avatar and opponents share a footprint)
    pub const COMBATANT_WIDTH: f32 = 64.0;
    pub const COMBATANT_HEIGHT: f32 = 64.0;

    /// Avatar movement
    pub const RUN_SPEED: f32 = 5.0;
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Downward acceleration applied every frame
    pub const GRAVITY: f32 = 0.8;

    /// Avatar weapon
    pub const AMMO_MAX: u32 = 14;
    /// Reload duration in wall-clock seconds
    pub const RELOAD_SECS: f64 = 5.0;

    /// Projectile dimensions and flight
    pub const SHOT_WIDTH: f32 = 16.0;
    pub const SHOT_HEIGHT: f32 = 18.0;
    /// Projectile speed magnitude, avatar and opponent alike
    pub const SHOT_SPEED: f32 = 50.0;
    /// Travel-distance budget before a projectile expires
    pub const SHOT_RANGE: f32 = 100.0;
    /// Floor on aim distance so normalization never divides by zero
    pub const AIM_MIN_DISTANCE: f32 = 1.0;

    /// Opponent fire policy
    pub const SIGHT_BAND: f32 = 100.0;
    /// Per-frame chance of an unaligned stray shot
    pub const STRAY_SHOT_CHANCE: f32 = 0.01;
    pub const COOLDOWN_MIN: i32 = 60;
    pub const COOLDOWN_MAX: i32 = 120;

    /// Opponent movement baseline (archetypes scale this)
    pub const OPPONENT_BASE_SPEED: f32 = 2.0;
}
