//! Session state and entity types
//!
//! Everything the simulation mutates lives here. Entity collections are
//! plain `Vec`s in spawn order; removal always goes through `retain` or an
//! index found before mutation, never removal mid-iteration.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::kinematics::{integrate, Aabb};
use super::tick::FrameIntent;
use crate::consts::*;
use crate::tuning::Tuning;

/// Phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Simulation is running
    Active,
    /// Every opponent has been eliminated. Transient: observed for one
    /// frame, then the controller builds a fresh session.
    Won,
    /// The avatar died. Transient like `Won`.
    Lost,
}

/// A projectile in flight
///
/// Avatar shots fly level (+x); opponent shots carry an aim-and-forget
/// velocity fixed at launch. Both expire the frame their traveled distance
/// reaches the range budget, whether or not they hit anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub max_range: f32,
    pub traveled: f32,
}

impl Projectile {
    /// A level shot traveling along +x at `speed`
    pub fn level(origin: Vec2, speed: f32, max_range: f32) -> Self {
        Self::aimed(origin, Vec2::new(speed, 0.0), max_range)
    }

    /// A shot with a fixed launch velocity
    pub fn aimed(origin: Vec2, vel: Vec2, max_range: f32) -> Self {
        Self {
            pos: origin,
            vel,
            max_range,
            traveled: 0.0,
        }
    }

    /// Advance one frame along the launch velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.traveled += self.vel.length();
    }

    /// True once the travel budget is spent
    pub fn spent(&self) -> bool {
        self.traveled >= self.max_range
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(SHOT_WIDTH, SHOT_HEIGHT))
    }
}

/// The player-controlled combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    pub alive: bool,
    pub score: u32,
    /// Rounds remaining, always in `[0, AMMO_MAX]`
    pub ammo: u32,
    pub reloading: bool,
    /// Monotonic clock reading when the current reload began
    pub reload_started: f64,
    /// Shots this avatar has fired and still owns
    pub shots: Vec<Projectile>,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            pos: Vec2::new(100.0, GROUND_Y - COMBATANT_HEIGHT),
            vel: Vec2::ZERO,
            grounded: true,
            alive: true,
            score: 0,
            ammo: AMMO_MAX,
            reloading: false,
            reload_started: 0.0,
            shots: Vec::new(),
        }
    }
}

impl Avatar {
    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(COMBATANT_WIDTH, COMBATANT_HEIGHT))
    }

    /// Muzzle point: the avatar's center
    pub fn muzzle(&self) -> Vec2 {
        self.rect().center()
    }

    /// Apply one frame of movement intent, then integrate and clamp.
    ///
    /// Horizontal velocity is set outright each frame, never accumulated;
    /// simultaneous left and right intents cancel to zero. Jump is honored
    /// only while grounded. Gravity applies unconditionally. A dead avatar
    /// ignores all intent.
    pub fn apply_input(&mut self, intent: &FrameIntent) {
        if !self.alive {
            return;
        }

        let mut dir = 0.0;
        if intent.move_left {
            dir -= 1.0;
        }
        if intent.move_right {
            dir += 1.0;
        }
        self.vel.x = dir * RUN_SPEED;

        if intent.jump && self.grounded {
            self.vel.y = JUMP_IMPULSE;
            self.grounded = false;
        }

        let (pos, vel) = integrate(self.pos, self.vel, GRAVITY);
        self.pos = pos;
        self.vel = vel;

        self.pos.x = self.pos.x.clamp(0.0, ARENA_WIDTH - COMBATANT_WIDTH);

        let floor = GROUND_Y - COMBATANT_HEIGHT;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.grounded = true;
        }
    }

    /// Spawn one level shot from the muzzle and spend a round.
    ///
    /// Guarded no-op while dead, reloading, or out of ammo.
    pub fn fire(&mut self) {
        if !self.alive || self.reloading || self.ammo == 0 {
            return;
        }
        let origin = self.muzzle();
        self.shots
            .push(Projectile::level(origin, SHOT_SPEED, SHOT_RANGE));
        self.ammo -= 1;
    }

    /// Begin a reload at clock time `now`.
    ///
    /// Guarded no-op while dead, already reloading, or at full ammo.
    pub fn start_reload(&mut self, now: f64) {
        if !self.alive || self.reloading || self.ammo == AMMO_MAX {
            return;
        }
        self.reloading = true;
        self.reload_started = now;
    }

    /// Complete the reload once `RELOAD_SECS` of clock time have elapsed
    pub fn tick_reload(&mut self, now: f64) {
        if self.reloading && now - self.reload_started >= RELOAD_SECS {
            self.ammo = AMMO_MAX;
            self.reloading = false;
        }
    }

    /// Seconds left on the current reload, zero when not reloading
    pub fn reload_remaining(&self, now: f64) -> f64 {
        if self.reloading {
            (RELOAD_SECS - (now - self.reload_started)).max(0.0)
        } else {
            0.0
        }
    }

    /// Advance every owned shot and drop the ones past their range budget
    pub fn tick_shots(&mut self) {
        for shot in &mut self.shots {
            shot.advance();
        }
        self.shots.retain(|s| !s.spent());
    }
}

/// Opponent behavior class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    /// Walks the arena, fires at the avatar
    Patrol,
    /// Patrol at double speed, worth fewer points
    FastPatrol,
    /// Slow pursuer; kills on contact, never fires
    Melee,
}

impl Archetype {
    /// Movement speed in pixels per frame
    pub fn speed(self) -> f32 {
        match self {
            Archetype::Patrol => OPPONENT_BASE_SPEED,
            Archetype::FastPatrol => OPPONENT_BASE_SPEED * 2.0,
            Archetype::Melee => OPPONENT_BASE_SPEED * 0.5,
        }
    }

    /// Score credited for eliminating this archetype
    pub fn points(self) -> u32 {
        match self {
            Archetype::Patrol => 100,
            Archetype::FastPatrol => 75,
            Archetype::Melee => 200,
        }
    }
}

/// An autonomous combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opponent {
    pub pos: Vec2,
    pub archetype: Archetype,
    /// Facing direction, -1.0 or +1.0
    pub facing: f32,
    /// Frames until the next shot is allowed (patrol archetypes only)
    pub cooldown: i32,
    /// Shots this opponent has fired and still owns
    pub shots: Vec<Projectile>,
}

impl Opponent {
    pub fn new(pos: Vec2, archetype: Archetype, facing: f32) -> Self {
        Self {
            pos,
            archetype,
            facing,
            cooldown: 0,
            shots: Vec::new(),
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(COMBATANT_WIDTH, COMBATANT_HEIGHT))
    }

    pub fn muzzle(&self) -> Vec2 {
        self.rect().center()
    }

    /// Advance every owned shot and drop the ones past their range budget
    pub fn tick_shots(&mut self) {
        for shot in &mut self.shots {
            shot.advance();
        }
        self.shots.retain(|s| !s.spent());
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Seed for reproducibility
    pub seed: u64,
    /// Session RNG; every random draw in the simulation goes through here
    pub rng: Pcg32,
    /// Frame counter
    pub frame: u64,
    pub phase: SessionPhase,
    pub avatar: Avatar,
    /// Live opponents in spawn order
    pub opponents: Vec<Opponent>,
}

impl SessionState {
    /// A fresh session with the default roster
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, &Tuning::default())
    }

    /// A fresh session with an explicit roster and spawn band
    pub fn with_tuning(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut opponents = Vec::new();

        let roster = [
            (Archetype::Patrol, tuning.patrol_count),
            (Archetype::FastPatrol, tuning.fast_patrol_count),
            (Archetype::Melee, tuning.melee_count),
        ];
        for (archetype, count) in roster {
            for _ in 0..count {
                let pos = spawn_point(&mut rng, tuning);
                let facing = if rng.random::<f32>() > 0.5 { 1.0 } else { -1.0 };
                opponents.push(Opponent::new(pos, archetype, facing));
            }
        }

        Self {
            seed,
            rng,
            frame: 0,
            phase: SessionPhase::Active,
            avatar: Avatar::default(),
            opponents,
        }
    }

    /// Count of live opponents
    pub fn remaining(&self) -> usize {
        self.opponents.len()
    }

    /// True once the win or lose condition has been met
    pub fn is_terminal(&self) -> bool {
        self.phase != SessionPhase::Active
    }
}

/// Randomized spawn position inside the spawn band: anywhere in the tuned
/// horizontal range, between standing on the ground and `spawn_drop` above it.
fn spawn_point(rng: &mut Pcg32, tuning: &Tuning) -> Vec2 {
    let x = rng.random_range(tuning.spawn_x_min..=tuning.spawn_x_max);
    let lift = rng.random_range(0.0..=tuning.spawn_drop);
    Vec2::new(x, GROUND_Y - COMBATANT_HEIGHT - lift)
}
