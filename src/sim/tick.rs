//! Fixed timestep frame orchestration
//!
//! One call to [`tick`] is one frame. The update order is fixed: avatar
//! input, reload timer, avatar projectile aging, per-opponent AI plus its
//! own projectile aging, collision resolution, terminal check. No entity
//! state changes outside this sequence.

use super::ai::update_opponent;
use super::collision::resolve_collisions;
use super::state::{SessionPhase, SessionState};

/// Input snapshot for a single frame
///
/// Movement and jump are held states; fire and reload are edge-triggered
/// single presses. `quit` is read by the session controller between frames
/// and ignored by the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire: bool,
    pub reload: bool,
    pub quit: bool,
}

/// Advance the session by one fixed-step frame.
///
/// `now` is the monotonic clock in seconds, read once per frame by the
/// caller; it drives only the reload timer. A terminal session does not
/// advance.
pub fn tick(state: &mut SessionState, intent: &FrameIntent, now: f64) {
    if state.phase != SessionPhase::Active {
        return;
    }
    state.frame += 1;

    // Edge-triggered weapon actions land before movement, so a shot leaves
    // from the pre-move muzzle.
    if intent.fire {
        state.avatar.fire();
    }
    if intent.reload {
        state.avatar.start_reload(now);
    }

    state.avatar.apply_input(intent);
    state.avatar.tick_reload(now);
    state.avatar.tick_shots();

    let SessionState {
        avatar,
        opponents,
        rng,
        ..
    } = state;
    for op in opponents.iter_mut() {
        update_opponent(op, avatar, rng);
        op.tick_shots();
    }

    resolve_collisions(state);

    if !state.avatar.alive {
        state.phase = SessionPhase::Lost;
    } else if state.opponents.is_empty() {
        state.phase = SessionPhase::Won;
    }
}
