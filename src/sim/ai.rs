//! Opponent decision policies
//!
//! One update function per archetype, dispatched exhaustively. Patrol
//! archetypes walk the arena and shoot; the melee archetype pursues and
//! kills on contact. All randomness comes from the session RNG.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Archetype, Avatar, Opponent, Projectile};
use crate::consts::*;

/// Run one frame of an opponent's policy against the avatar
pub fn update_opponent(op: &mut Opponent, avatar: &mut Avatar, rng: &mut Pcg32) {
    match op.archetype {
        Archetype::Patrol | Archetype::FastPatrol => patrol_step(op, avatar, rng),
        Archetype::Melee => melee_step(op, avatar),
    }
}

/// Walk back and forth, reversing at the arena edges; fire when off cooldown
/// and the avatar is in the sight band on the faced side, or by a small
/// stray-shot chance regardless of alignment.
fn patrol_step(op: &mut Opponent, avatar: &Avatar, rng: &mut Pcg32) {
    op.pos.x += op.archetype.speed() * op.facing;
    if op.pos.x <= 0.0 || op.pos.x >= ARENA_WIDTH - COMBATANT_WIDTH {
        op.facing = -op.facing;
    }

    if op.cooldown <= 0 {
        let in_band = (op.pos.y - avatar.pos.y).abs() < SIGHT_BAND;
        let ahead = (op.facing > 0.0 && op.pos.x < avatar.pos.x)
            || (op.facing < 0.0 && op.pos.x > avatar.pos.x);
        if (in_band && ahead) || rng.random::<f32>() < STRAY_SHOT_CHANCE {
            fire_at(op, avatar);
            op.cooldown = rng.random_range(COOLDOWN_MIN..=COOLDOWN_MAX);
        }
    } else {
        op.cooldown -= 1;
    }
}

/// Step toward the avatar by the full per-frame speed on each axis
/// independently. Diagonal closing is therefore faster than axis-aligned
/// closing; that asymmetry is deliberate. Contact with the avatar's bounding
/// box is an instant kill.
fn melee_step(op: &mut Opponent, avatar: &mut Avatar) {
    let speed = op.archetype.speed();
    if op.pos.x < avatar.pos.x {
        op.pos.x += speed;
        op.facing = 1.0;
    } else if op.pos.x > avatar.pos.x {
        op.pos.x -= speed;
        op.facing = -1.0;
    }
    if op.pos.y < avatar.pos.y {
        op.pos.y += speed;
    } else if op.pos.y > avatar.pos.y {
        op.pos.y -= speed;
    }

    if op.rect().overlaps(&avatar.rect()) {
        avatar.alive = false;
    }
}

/// Launch an aim-and-forget shot toward the avatar's current position.
/// The aim vector is normalized with a 1-unit distance floor so two
/// coincident combatants never divide by zero.
fn fire_at(op: &mut Opponent, avatar: &Avatar) {
    let delta = avatar.pos - op.pos;
    let distance = delta.length().max(AIM_MIN_DISTANCE);
    let vel = delta / distance * SHOT_SPEED;
    let origin = op.muzzle();
    op.shots.push(Projectile::aimed(origin, vel, SHOT_RANGE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1)
    }

    fn patrol_at(x: f32, y: f32, facing: f32) -> Opponent {
        Opponent::new(Vec2::new(x, y), Archetype::Patrol, facing)
    }

    #[test]
    fn test_patrol_reverses_at_right_edge() {
        let mut op = patrol_at(ARENA_WIDTH - COMBATANT_WIDTH - 1.0, 400.0, 1.0);
        let mut avatar = Avatar::default();
        avatar.pos = Vec2::new(0.0, 0.0); // far away, out of band
        update_opponent(&mut op, &mut avatar, &mut rng());
        assert_eq!(op.facing, -1.0);
    }

    #[test]
    fn test_patrol_reverses_at_left_edge() {
        let mut op = patrol_at(1.0, 400.0, -1.0);
        let mut avatar = Avatar::default();
        avatar.pos = Vec2::new(700.0, 0.0);
        update_opponent(&mut op, &mut avatar, &mut rng());
        assert_eq!(op.facing, 1.0);
    }

    #[test]
    fn test_patrol_fires_when_aligned_and_ahead() {
        let mut avatar = Avatar::default(); // at (100, 486)
        let mut op = patrol_at(300.0, avatar.pos.y - 50.0, -1.0); // facing the avatar
        update_opponent(&mut op, &mut avatar, &mut rng());
        assert_eq!(op.shots.len(), 1);
        assert!(op.cooldown >= COOLDOWN_MIN && op.cooldown <= COOLDOWN_MAX);
        // Aimed left and slightly down, toward the avatar
        assert!(op.shots[0].vel.x < 0.0);
        assert!((op.shots[0].vel.length() - SHOT_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_patrol_holds_fire_when_facing_away() {
        // Avatar is behind: opponent faces +1 but avatar is to its left, so
        // only the 1% stray chance can fire. Across many seeds the common
        // case is holding fire.
        let mut held = 0;
        for seed in 0..10 {
            let mut avatar = Avatar::default();
            let mut op = patrol_at(500.0, avatar.pos.y, 1.0);
            update_opponent(&mut op, &mut avatar, &mut Pcg32::seed_from_u64(seed));
            if op.shots.is_empty() {
                held += 1;
            }
        }
        assert!(held > 0);
    }

    #[test]
    fn test_patrol_cooldown_counts_down_without_firing() {
        let mut avatar = Avatar::default();
        let mut op = patrol_at(300.0, avatar.pos.y, -1.0);
        op.cooldown = 3;
        update_opponent(&mut op, &mut avatar, &mut rng());
        assert_eq!(op.cooldown, 2);
        assert!(op.shots.is_empty());
    }

    #[test]
    fn test_aim_floor_at_point_blank() {
        let avatar = Avatar::default();
        let mut op = patrol_at(avatar.pos.x, avatar.pos.y, 1.0);
        fire_at(&mut op, &avatar);
        let shot = &op.shots[0];
        assert!(shot.vel.x.is_finite() && shot.vel.y.is_finite());
        assert_eq!(shot.vel, Vec2::ZERO); // zero delta over the 1-unit floor
    }

    #[test]
    fn test_melee_closes_on_both_axes() {
        let mut avatar = Avatar::default();
        avatar.pos = Vec2::new(400.0, 300.0);
        let mut op = Opponent::new(Vec2::new(200.0, 100.0), Archetype::Melee, -1.0);
        update_opponent(&mut op, &mut avatar, &mut rng());
        assert_eq!(op.pos, Vec2::new(201.0, 101.0));
        assert_eq!(op.facing, 1.0);
        assert!(avatar.alive);
    }

    #[test]
    fn test_melee_contact_kills() {
        let mut avatar = Avatar::default();
        let mut op = Opponent::new(avatar.pos + Vec2::new(10.0, 0.0), Archetype::Melee, 1.0);
        update_opponent(&mut op, &mut avatar, &mut rng());
        assert!(!avatar.alive);
    }

    #[test]
    fn test_melee_never_fires() {
        let mut avatar = Avatar::default();
        avatar.pos = Vec2::new(700.0, 200.0);
        let mut op = Opponent::new(Vec2::new(100.0, 480.0), Archetype::Melee, 1.0);
        for _ in 0..200 {
            update_opponent(&mut op, &mut avatar, &mut rng());
        }
        assert!(op.shots.is_empty());
    }
}
