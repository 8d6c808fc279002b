//! Pursuer steering and movement
//!
//! Pursuers turn toward the player at a bounded rate while the player is
//! inside their follow radius, and fly straight otherwise.

use glam::Vec2;

use super::state::{GameEvent, GameState, Pursuer, Viewport};
use crate::{heading_to_dir, heading_toward, signed_degrees, wrap_degrees};

/// Turn a pursuer toward the player if it is within follow range.
/// Returns true if the pursuer was in range.
pub fn steer(pursuer: &mut Pursuer, player: Vec2) -> bool {
    let dist_sq = pursuer.pos.distance_squared(player);
    if dist_sq >= pursuer.follow_radius * pursuer.follow_radius {
        return false;
    }

    pursuer.target_heading = heading_toward(pursuer.pos, player);
    let diff = signed_degrees(pursuer.target_heading - pursuer.heading);

    if diff.abs() < pursuer.turn_speed {
        pursuer.heading = pursuer.target_heading;
    } else {
        pursuer.heading = wrap_degrees(pursuer.heading + diff.signum() * pursuer.turn_speed);
    }
    true
}

/// Derive velocity from heading and speed, then take one Euler step
pub fn integrate(pursuer: &mut Pursuer) {
    pursuer.vel = heading_to_dir(pursuer.heading) * pursuer.speed;
    pursuer.pos += pursuer.vel;
}

/// Outside the viewport extended by twice the pursuer's size
pub fn is_out_of_bounds(pursuer: &Pursuer, viewport: &Viewport) -> bool {
    let margin = pursuer.size * 2.0;
    pursuer.pos.x < -margin
        || pursuer.pos.x > viewport.width + margin
        || pursuer.pos.y < -margin
        || pursuer.pos.y > viewport.height + margin
}

/// Steer, move and cull every active pursuer
pub fn step_pursuers(state: &mut GameState) {
    let player = state.player.pos;
    let viewport = state.viewport;

    let mut i = state.pursuers.len();
    while i > 0 {
        i -= 1;
        let pursuer = &mut state.pursuers[i];
        steer(pursuer, player);
        integrate(pursuer);

        if is_out_of_bounds(pursuer, &viewport) {
            let culled = state.pursuers.swap_remove(i);
            state.pool.release(culled.slot);
            state.events.push(GameEvent::Culled { slot: culled.slot });
            log::debug!("Culled {} pursuer from slot {:?}", culled.kind.as_str(), culled.slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::EntityPool;
    use crate::sim::state::PursuerKind;
    use proptest::prelude::*;

    fn pursuer_at(kind: PursuerKind, pos: Vec2, heading: f32, speed: f32) -> Pursuer {
        let mut pool = EntityPool::new(1);
        let slot = pool.acquire().unwrap();
        Pursuer::new(slot, kind, pos, heading, speed)
    }

    #[test]
    fn test_out_of_range_keeps_heading() {
        let mut p = pursuer_at(PursuerKind::Small, Vec2::new(0.0, 0.0), 45.0, 2.0);
        // 300 > follow radius 280
        assert!(!steer(&mut p, Vec2::new(300.0, 0.0)));
        assert_eq!(p.heading, 45.0);
    }

    #[test]
    fn test_in_range_turns_by_turn_speed() {
        // Heading up, player directly to the right (desired 90)
        let mut p = pursuer_at(PursuerKind::Small, Vec2::ZERO, 0.0, 2.0);
        assert!(steer(&mut p, Vec2::new(100.0, 0.0)));
        assert!((p.heading - 3.5).abs() < 1e-4);
        assert!((p.target_heading - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_turns_the_short_way_across_zero() {
        // Heading 10, player up-left (desired 315): shortest turn is negative
        let mut p = pursuer_at(PursuerKind::Big, Vec2::ZERO, 10.0, 1.0);
        steer(&mut p, Vec2::new(-50.0, -50.0));
        assert!((p.heading - 8.5).abs() < 1e-4);

        let mut p = pursuer_at(PursuerKind::Big, Vec2::ZERO, 1.0, 1.0);
        steer(&mut p, Vec2::new(-50.0, -50.0));
        assert!((p.heading - 359.5).abs() < 1e-3);
    }

    #[test]
    fn test_snaps_when_close_to_desired() {
        let mut p = pursuer_at(PursuerKind::Small, Vec2::ZERO, 88.0, 2.0);
        steer(&mut p, Vec2::new(100.0, 0.0));
        assert!((p.heading - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_integrate_moves_along_heading() {
        let mut p = pursuer_at(PursuerKind::Small, Vec2::new(10.0, 10.0), 180.0, 2.0);
        integrate(&mut p);
        assert!(p.vel.x.abs() < 1e-5);
        assert!((p.vel.y - 2.0).abs() < 1e-5);
        assert!((p.pos.y - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounds_margin_is_twice_size() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut p = pursuer_at(PursuerKind::Small, Vec2::new(-39.0, 300.0), 0.0, 1.0);
        assert!(!is_out_of_bounds(&p, &viewport));
        p.pos.x = -41.0;
        assert!(is_out_of_bounds(&p, &viewport));
        p.pos = Vec2::new(400.0, 641.0);
        assert!(is_out_of_bounds(&p, &viewport));
    }

    #[test]
    fn test_straight_line_until_culled() {
        // Player far away: pursuer heads right in a straight line and gets culled
        let mut state = GameState::new(7, 4, Viewport::new(800.0, 600.0));
        state.player.recenter(Vec2::new(400.0, 590.0));
        let slot = state.pool.acquire().unwrap();
        state.pursuers.push(Pursuer::new(
            slot,
            PursuerKind::Small,
            Vec2::new(-20.0, 10.0),
            90.0,
            2.0,
        ));

        let mut ticks = 0;
        while !state.pursuers.is_empty() {
            let p = &state.pursuers[0];
            assert_eq!(p.heading, 90.0);
            assert!((p.pos.y - 10.0).abs() < 1e-3);
            step_pursuers(&mut state);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(state.pool.free_count(), 4);
        assert_eq!(state.drain_events(), vec![GameEvent::Culled { slot }]);
    }

    proptest! {
        #[test]
        fn prop_heading_change_bounded(
            heading in 0.0f32..360.0,
            px in -500.0f32..500.0,
            py in -500.0f32..500.0,
            big in any::<bool>(),
        ) {
            let kind = if big { PursuerKind::Big } else { PursuerKind::Small };
            let mut p = pursuer_at(kind, Vec2::ZERO, heading, 1.0);
            let before = p.heading;
            let in_range = steer(&mut p, Vec2::new(px, py));
            let change = signed_degrees(p.heading - before).abs();

            prop_assert!(p.heading >= 0.0 && p.heading < 360.0);
            if !in_range {
                prop_assert_eq!(p.heading, before);
            } else if p.heading != p.target_heading {
                prop_assert!((change - p.turn_speed).abs() < 1e-3);
            } else {
                prop_assert!(change <= p.turn_speed + 1e-3);
            }
        }
    }
}
