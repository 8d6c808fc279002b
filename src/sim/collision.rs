//! Player vs pursuer collision detection
//!
//! Both shapes are treated as circles; comparisons use squared distances.

use glam::Vec2;

use super::pool::SlotHandle;
use super::state::Pursuer;

/// Whether the player circle overlaps a pursuer
#[inline]
pub fn player_hits(player_pos: Vec2, player_radius: f32, pursuer: &Pursuer) -> bool {
    let reach = player_radius + pursuer.radius();
    player_pos.distance_squared(pursuer.pos) < reach * reach
}

/// First pursuer touching the player, if any. Which one is reported when
/// several overlap is unspecified.
pub fn first_collision(
    player_pos: Vec2,
    player_radius: f32,
    pursuers: &[Pursuer],
) -> Option<SlotHandle> {
    pursuers
        .iter()
        .find(|p| player_hits(player_pos, player_radius, p))
        .map(|p| p.slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::EntityPool;
    use crate::sim::state::PursuerKind;

    fn pursuers(kinds_and_pos: &[(PursuerKind, Vec2)]) -> Vec<Pursuer> {
        let mut pool = EntityPool::new(kinds_and_pos.len());
        kinds_and_pos
            .iter()
            .map(|&(kind, pos)| Pursuer::new(pool.acquire().unwrap(), kind, pos, 0.0, 1.0))
            .collect()
    }

    #[test]
    fn test_small_pursuer_threshold() {
        // 15 + 10 = 25
        let list = pursuers(&[
            (PursuerKind::Small, Vec2::new(24.9, 0.0)),
            (PursuerKind::Small, Vec2::new(25.0, 0.0)),
        ]);
        assert!(player_hits(Vec2::ZERO, 15.0, &list[0]));
        assert!(!player_hits(Vec2::ZERO, 15.0, &list[1]));
    }

    #[test]
    fn test_big_pursuer_threshold() {
        // 15 + 30 = 45
        let list = pursuers(&[
            (PursuerKind::Big, Vec2::new(30.0, 30.0)),
            (PursuerKind::Big, Vec2::new(40.0, 40.0)),
        ]);
        assert!(player_hits(Vec2::ZERO, 15.0, &list[0]));
        assert!(!player_hits(Vec2::ZERO, 15.0, &list[1]));
    }

    #[test]
    fn test_first_collision() {
        let list = pursuers(&[
            (PursuerKind::Small, Vec2::new(200.0, 0.0)),
            (PursuerKind::Big, Vec2::new(0.0, 10.0)),
            (PursuerKind::Small, Vec2::new(300.0, 300.0)),
        ]);
        assert_eq!(first_collision(Vec2::ZERO, 15.0, &list), Some(list[1].slot));
        assert_eq!(first_collision(Vec2::new(-500.0, -500.0), 15.0, &list), None);
        assert_eq!(first_collision(Vec2::ZERO, 15.0, &[]), None);
    }
}
