//! Scripted input source that plays the avatar
//!
//! Drives the binary's demo mode and doubles as a stress driver in tests.
//! The policy is deliberately simple: keep distance from the melee pursuer,
//! line up so a shootable opponent sits to the right inside weapon reach,
//! fire on alignment, reload when dry, and hop when an incoming shot is
//! about to cross our box.

use crate::consts::*;
use crate::session::{FrameSnapshot, InputSource};
use crate::sim::{Archetype, FrameIntent, SessionPhase};

/// How close an incoming shot may get before the autopilot jumps
const DODGE_RADIUS: f32 = 80.0;
/// Horizontal reach inside which firing is worthwhile (muzzle to target)
const WEAPON_REACH: f32 = SHOT_RANGE + COMBATANT_WIDTH;
/// Keep at least this much distance from a melee pursuer
const MELEE_BUBBLE: f32 = 140.0;

/// Input source that plays sessions by itself and quits after a budget
pub struct Autopilot {
    sessions_left: u64,
    mid_session: bool,
}

impl Autopilot {
    /// Play `sessions` sessions to completion, then signal quit.
    pub fn new(sessions: u64) -> Self {
        Self {
            sessions_left: sessions,
            mid_session: false,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, view: &FrameSnapshot) -> FrameIntent {
        // The controller polls on the pre-tick view, so a terminal frame is
        // never polled; a restart shows up as the frame counter resetting.
        if view.frame == 0 {
            if self.mid_session {
                self.sessions_left = self.sessions_left.saturating_sub(1);
                self.mid_session = false;
            }
        } else {
            self.mid_session = true;
        }
        if self.sessions_left == 0 || view.phase != SessionPhase::Active {
            return FrameIntent {
                quit: true,
                ..FrameIntent::default()
            };
        }

        let mut intent = FrameIntent::default();
        let me = &view.avatar;

        if me.ammo == 0 && !me.reloading {
            intent.reload = true;
        }

        // Flee the nearest melee pursuer before anything else.
        let pursuer = view
            .opponents
            .iter()
            .filter(|op| op.archetype == Archetype::Melee)
            .min_by(|a, b| {
                let da = (a.pos - me.pos).length_squared();
                let db = (b.pos - me.pos).length_squared();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(pursuer) = pursuer {
            if (pursuer.pos - me.pos).length() < MELEE_BUBBLE {
                if pursuer.pos.x > me.pos.x {
                    intent.move_left = true;
                } else {
                    intent.move_right = true;
                }
            }
        }

        // Shots only travel rightward, so a target is anything to the right
        // roughly on our row and inside reach.
        let target_in_reach = view.opponents.iter().any(|op| {
            let dx = op.pos.x - me.pos.x;
            dx > 0.0 && dx < WEAPON_REACH && (op.pos.y - me.pos.y).abs() < COMBATANT_HEIGHT
        });
        if target_in_reach && !me.reloading && me.ammo > 0 {
            intent.fire = true;
        } else if !intent.move_left && !intent.move_right {
            // Drift toward the leftmost opponent's column to get them on
            // our right-hand side.
            if let Some(leftmost) = view
                .opponents
                .iter()
                .min_by(|a, b| a.pos.x.partial_cmp(&b.pos.x).unwrap_or(std::cmp::Ordering::Equal))
            {
                if leftmost.pos.x < me.pos.x {
                    intent.move_left = true;
                } else if leftmost.pos.x > me.pos.x + WEAPON_REACH {
                    intent.move_right = true;
                }
            }
        }

        // Hop over shots closing in on our box. Shots still inside our own
        // column were just fired by us; skip them.
        let incoming = view.shots.iter().any(|shot| {
            let in_own_column = shot.pos.x > me.pos.x && shot.pos.x < me.pos.x + me.size.x;
            !in_own_column && (shot.pos - me.pos).length() < DODGE_RADIUS
        });
        if incoming {
            intent.jump = true;
        }

        intent
    }
}
