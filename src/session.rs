//! Session controller and collaborator seams
//!
//! The controller owns the frame loop: poll input, tick the simulation,
//! hand the presenter a read-only snapshot, hold the 60 Hz cadence. When a
//! session goes terminal the terminal frame is presented exactly once and a
//! fresh session is constructed in a loop, never by recursion, so arbitrarily
//! long play cannot grow the stack.

use std::time::{Duration, Instant};

use glam::Vec2;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::{tick, Archetype, FrameIntent, SessionPhase, SessionState};
use crate::tuning::Tuning;

/// Monotonic time source and frame pacer
pub trait Clock {
    /// Monotonic seconds since an arbitrary epoch
    fn now(&self) -> f64;
    /// Block until the next frame is due
    fn pace(&mut self);
}

/// Supplies one input snapshot per frame
pub trait InputSource {
    /// The view is the frame the player (or script) is reacting to.
    fn poll(&mut self, view: &FrameSnapshot) -> FrameIntent;
}

/// Consumes one read-only frame snapshot per frame
pub trait Presenter {
    fn present(&mut self, frame: &FrameSnapshot);
}

/// Read-only avatar view for presentation
#[derive(Debug, Clone)]
pub struct AvatarView {
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub ammo: u32,
    pub reloading: bool,
    /// Seconds left on the current reload, zero when idle
    pub reload_remaining: f64,
    pub score: u32,
}

/// Read-only opponent view for presentation
#[derive(Debug, Clone)]
pub struct OpponentView {
    pub pos: Vec2,
    pub size: Vec2,
    pub archetype: Archetype,
    pub facing: f32,
}

/// Read-only projectile view for presentation
#[derive(Debug, Clone)]
pub struct ShotView {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything a renderer needs for one frame, detached from the live state
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub phase: SessionPhase,
    pub frame: u64,
    pub avatar: AvatarView,
    pub opponents: Vec<OpponentView>,
    /// All live projectiles, avatar's and opponents' alike
    pub shots: Vec<ShotView>,
    pub remaining: usize,
}

impl FrameSnapshot {
    pub fn capture(state: &SessionState, now: f64) -> Self {
        let combatant = Vec2::new(COMBATANT_WIDTH, COMBATANT_HEIGHT);
        let shot_size = Vec2::new(SHOT_WIDTH, SHOT_HEIGHT);

        let mut shots: Vec<ShotView> = state
            .avatar
            .shots
            .iter()
            .map(|s| ShotView {
                pos: s.pos,
                size: shot_size,
            })
            .collect();
        for op in &state.opponents {
            shots.extend(op.shots.iter().map(|s| ShotView {
                pos: s.pos,
                size: shot_size,
            }));
        }

        Self {
            phase: state.phase,
            frame: state.frame,
            avatar: AvatarView {
                pos: state.avatar.pos,
                size: combatant,
                alive: state.avatar.alive,
                ammo: state.avatar.ammo,
                reloading: state.avatar.reloading,
                reload_remaining: state.avatar.reload_remaining(now),
                score: state.avatar.score,
            },
            opponents: state
                .opponents
                .iter()
                .map(|op| OpponentView {
                    pos: op.pos,
                    size: combatant,
                    archetype: op.archetype,
                    facing: op.facing,
                })
                .collect(),
            shots,
            remaining: state.remaining(),
        }
    }
}

/// Owns the collaborators and runs sessions back to back until quit
pub struct SessionController<C, I, P> {
    clock: C,
    input: I,
    presenter: P,
    tuning: Tuning,
    /// Seeds each session's RNG stream
    master_rng: Pcg32,
}

impl<C: Clock, I: InputSource, P: Presenter> SessionController<C, I, P> {
    pub fn new(seed: u64, clock: C, input: I, presenter: P) -> Self {
        Self::with_tuning(seed, clock, input, presenter, Tuning::default())
    }

    pub fn with_tuning(seed: u64, clock: C, input: I, presenter: P, tuning: Tuning) -> Self {
        Self {
            clock,
            input,
            presenter,
            tuning,
            master_rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Run sessions until the input source signals quit.
    ///
    /// Returns the number of completed (terminal) sessions.
    pub fn run(&mut self) -> u64 {
        let mut completed = 0;
        'sessions: loop {
            let seed: u64 = self.master_rng.random();
            let mut state = SessionState::with_tuning(seed, &self.tuning);
            info!(
                "session start: seed={} opponents={}",
                seed,
                state.remaining()
            );

            loop {
                let now = self.clock.now();
                let view = FrameSnapshot::capture(&state, now);
                let intent = self.input.poll(&view);
                if intent.quit {
                    info!("quit requested after {completed} completed sessions");
                    break 'sessions;
                }

                tick(&mut state, &intent, now);
                self.presenter
                    .present(&FrameSnapshot::capture(&state, now));
                self.clock.pace();

                if state.is_terminal() {
                    // The terminal frame was just presented once; restart.
                    let outcome = if state.phase == SessionPhase::Won {
                        "won"
                    } else {
                        "lost"
                    };
                    info!("session {}: score={}", outcome, state.avatar.score);
                    completed += 1;
                    break;
                }
                debug!(
                    "frame={} remaining={} score={}",
                    state.frame,
                    state.remaining(),
                    state.avatar.score
                );
            }
        }
        completed
    }
}

/// Wall-clock [`Clock`] that paces frames to the fixed rate
pub struct SystemClock {
    epoch: Instant,
    next_frame: Instant,
    frame_duration: Duration,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        let frame_duration = Duration::from_secs_f64(FRAME_DT);
        Self {
            epoch: now,
            next_frame: now + frame_duration,
            frame_duration,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn pace(&mut self) {
        let now = Instant::now();
        if self.next_frame > now {
            std::thread::sleep(self.next_frame - now);
            self.next_frame += self.frame_duration;
        } else {
            // Fell behind; re-anchor instead of sprinting to catch up.
            self.next_frame = now + self.frame_duration;
        }
    }
}
