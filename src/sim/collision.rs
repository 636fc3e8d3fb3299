//! Circle collision and proximity queries
//!
//! Everything in the arena is a circle, so overlap is a sum-of-radii test.
//! Entity counts stay small enough that linear scans are fine; the scans
//! keep collection order so ties always go to the earlier entity.

use glam::Vec2;

use super::state::Enemy;

/// Circle-circle overlap (strictly closer than the sum of radii)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// True if `pos` is more than `margin` outside the `width` x `height` arena
#[inline]
pub fn out_of_bounds(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    pos.x < -margin || pos.x > width + margin || pos.y < -margin || pos.y > height + margin
}

/// Index of the first enemy a circle at `pos` overlaps, in iteration order
pub fn first_overlapping(enemies: &[Enemy], pos: Vec2, radius: f32) -> Option<usize> {
    enemies
        .iter()
        .position(|e| circles_overlap(pos, radius, e.pos, e.radius))
}

/// Index of the enemy nearest to `from`, skipping ids in `exclude` and, if
/// given, anything not strictly closer than `max_distance`.
/// Equal distances keep the earlier enemy.
pub fn nearest_enemy(
    enemies: &[Enemy],
    from: Vec2,
    exclude: &[u32],
    max_distance: Option<f32>,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, enemy) in enemies.iter().enumerate() {
        if exclude.contains(&enemy.id) {
            continue;
        }
        let d = from.distance(enemy.pos);
        if max_distance.is_some_and(|max| d >= max) {
            continue;
        }
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Enemy indices sorted by ascending distance to `from` (stable on ties)
pub fn enemies_by_distance(enemies: &[Enemy], from: Vec2) -> Vec<usize> {
    let mut order: Vec<(usize, f32)> = enemies
        .iter()
        .enumerate()
        .map(|(i, e)| (i, from.distance(e.pos)))
        .collect();
    order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    order.into_iter().map(|(i, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyType;

    fn enemy(id: u32, x: f32, y: f32) -> Enemy {
        Enemy {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: 15.0,
            color: 0,
            health: 10.0,
            max_health: 10.0,
            speed: 1.0,
            kind: EnemyType::Normal,
        }
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.9, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }

    #[test]
    fn test_bounds_margin() {
        assert!(!out_of_bounds(Vec2::new(-100.0, 50.0), 800.0, 600.0, 100.0));
        assert!(out_of_bounds(Vec2::new(-100.1, 50.0), 800.0, 600.0, 100.0));
        assert!(out_of_bounds(Vec2::new(400.0, 700.5), 800.0, 600.0, 100.0));
    }

    #[test]
    fn test_nearest_with_exclusion_and_range() {
        let enemies = vec![enemy(1, 100.0, 0.0), enemy(2, 50.0, 0.0), enemy(3, 400.0, 0.0)];
        assert_eq!(nearest_enemy(&enemies, Vec2::ZERO, &[], None), Some(1));
        assert_eq!(nearest_enemy(&enemies, Vec2::ZERO, &[2], None), Some(0));
        assert_eq!(nearest_enemy(&enemies, Vec2::ZERO, &[1, 2], Some(300.0)), None);
        assert_eq!(nearest_enemy(&[], Vec2::ZERO, &[], None), None);
    }

    #[test]
    fn test_distance_order_is_stable_on_ties() {
        let enemies = vec![enemy(1, 0.0, 50.0), enemy(2, 50.0, 0.0), enemy(3, 10.0, 0.0)];
        assert_eq!(enemies_by_distance(&enemies, Vec2::ZERO), vec![2, 0, 1]);
    }

    #[test]
    fn test_first_overlapping_uses_iteration_order() {
        let enemies = vec![enemy(1, 10.0, 0.0), enemy(2, 5.0, 0.0)];
        assert_eq!(first_overlapping(&enemies, Vec2::ZERO, 4.0), Some(0));
    }
}
