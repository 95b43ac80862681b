//! Cross-entity collision resolution
//!
//! Two passes per frame, both on the shared AABB test: avatar shots against
//! opponents, then opponent shots against the avatar. There is no friendly
//! fire in either direction.

use super::state::{Avatar, SessionState};

/// Resolve all projectile hits for the current frame.
///
/// Pass 1: each avatar shot is tested against live opponents in spawn order;
/// the first overlap wins, the opponent is removed, its point value credited,
/// and the shot consumed. A shot never hits twice.
///
/// Pass 2: each opponent shot is tested against the avatar; an overlap
/// consumes the shot and kills the avatar. Death is idempotent, so
/// simultaneous hits are harmless.
pub fn resolve_collisions(state: &mut SessionState) {
    let avatar_rect = state.avatar.rect();
    let SessionState {
        avatar, opponents, ..
    } = state;
    let Avatar { shots, score, .. } = avatar;

    shots.retain(|shot| {
        let rect = shot.rect();
        match opponents.iter().position(|op| rect.overlaps(&op.rect())) {
            Some(i) => {
                *score += opponents[i].archetype.points();
                opponents.remove(i);
                false
            }
            None => true,
        }
    });

    for op in opponents.iter_mut() {
        op.shots.retain(|shot| {
            if shot.rect().overlaps(&avatar_rect) {
                avatar.alive = false;
                false
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Archetype, Opponent, Projectile, SessionPhase};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn empty_state() -> SessionState {
        SessionState {
            seed: 0,
            rng: Pcg32::seed_from_u64(0),
            frame: 0,
            phase: SessionPhase::Active,
            avatar: Avatar::default(),
            opponents: Vec::new(),
        }
    }

    #[test]
    fn test_avatar_shot_removes_opponent_and_scores() {
        let mut state = empty_state();
        let target = Opponent::new(Vec2::new(400.0, 300.0), Archetype::Patrol, 1.0);
        state.avatar.shots.push(Projectile::level(
            Vec2::new(410.0, 310.0),
            SHOT_SPEED,
            SHOT_RANGE,
        ));
        state.opponents.push(target);

        resolve_collisions(&mut state);

        assert!(state.opponents.is_empty());
        assert!(state.avatar.shots.is_empty());
        assert_eq!(state.avatar.score, 100);
    }

    #[test]
    fn test_shot_hits_first_opponent_in_order_only() {
        let mut state = empty_state();
        // Two opponents stacked on the same spot; the earlier spawn wins.
        state
            .opponents
            .push(Opponent::new(Vec2::new(400.0, 300.0), Archetype::FastPatrol, 1.0));
        state
            .opponents
            .push(Opponent::new(Vec2::new(400.0, 300.0), Archetype::Melee, 1.0));
        state.avatar.shots.push(Projectile::level(
            Vec2::new(410.0, 310.0),
            SHOT_SPEED,
            SHOT_RANGE,
        ));

        resolve_collisions(&mut state);

        assert_eq!(state.avatar.score, 75); // FastPatrol credited, not Melee
        assert_eq!(state.opponents.len(), 1);
        assert_eq!(state.opponents[0].archetype, Archetype::Melee);
    }

    #[test]
    fn test_two_shots_two_opponents() {
        let mut state = empty_state();
        state
            .opponents
            .push(Opponent::new(Vec2::new(300.0, 300.0), Archetype::Patrol, 1.0));
        state
            .opponents
            .push(Opponent::new(Vec2::new(600.0, 300.0), Archetype::Melee, 1.0));
        state.avatar.shots.push(Projectile::level(
            Vec2::new(310.0, 310.0),
            SHOT_SPEED,
            SHOT_RANGE,
        ));
        state.avatar.shots.push(Projectile::level(
            Vec2::new(610.0, 310.0),
            SHOT_SPEED,
            SHOT_RANGE,
        ));

        resolve_collisions(&mut state);

        assert!(state.opponents.is_empty());
        assert_eq!(state.avatar.score, 300);
    }

    #[test]
    fn test_miss_leaves_everything_alone() {
        let mut state = empty_state();
        state
            .opponents
            .push(Opponent::new(Vec2::new(600.0, 100.0), Archetype::Patrol, 1.0));
        state.avatar.shots.push(Projectile::level(
            Vec2::new(100.0, 400.0),
            SHOT_SPEED,
            SHOT_RANGE,
        ));

        resolve_collisions(&mut state);

        assert_eq!(state.opponents.len(), 1);
        assert_eq!(state.avatar.shots.len(), 1);
        assert_eq!(state.avatar.score, 0);
    }

    #[test]
    fn test_opponent_shot_kills_avatar() {
        let mut state = empty_state();
        let mut op = Opponent::new(Vec2::new(600.0, 300.0), Archetype::Patrol, -1.0);
        op.shots.push(Projectile::aimed(
            state.avatar.muzzle(),
            Vec2::new(-50.0, 0.0),
            SHOT_RANGE,
        ));
        state.opponents.push(op);

        resolve_collisions(&mut state);

        assert!(!state.avatar.alive);
        assert!(state.opponents[0].shots.is_empty());
    }

    #[test]
    fn test_simultaneous_opponent_hits_are_idempotent() {
        let mut state = empty_state();
        for x in [500.0, 600.0] {
            let mut op = Opponent::new(Vec2::new(x, 300.0), Archetype::Patrol, -1.0);
            op.shots.push(Projectile::aimed(
                state.avatar.muzzle(),
                Vec2::new(-50.0, 0.0),
                SHOT_RANGE,
            ));
            state.opponents.push(op);
        }

        resolve_collisions(&mut state);

        assert!(!state.avatar.alive);
        for op in &state.opponents {
            assert!(op.shots.is_empty());
        }
    }

    #[test]
    fn test_no_friendly_fire() {
        let mut state = empty_state();
        // An avatar shot sitting on the avatar itself does nothing.
        state.avatar.shots.push(Projectile::level(
            state.avatar.muzzle(),
            SHOT_SPEED,
            SHOT_RANGE,
        ));
        // An opponent shot sitting on another opponent does nothing.
        let mut shooter = Opponent::new(Vec2::new(600.0, 300.0), Archetype::Patrol, 1.0);
        shooter.shots.push(Projectile::aimed(
            Vec2::new(600.0, 300.0),
            Vec2::new(10.0, 0.0),
            SHOT_RANGE,
        ));
        state.opponents.push(shooter);

        resolve_collisions(&mut state);

        assert!(state.avatar.alive);
        assert_eq!(state.opponents.len(), 1);
        assert_eq!(state.avatar.shots.len(), 1);
        assert_eq!(state.opponents[0].shots.len(), 1);
    }
}
