//! Random helpers and batch enemy spawning

use glam::Vec2;
use rand::Rng;

use super::state::{ENEMY_COLORS, Enemy};
use crate::consts::*;

/// Uniform integer in `[min, max)`. Returns `min` when the range is empty.
pub fn random(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..max)
}

/// Append `count` enemies as a staggered grid.
///
/// Every time the collection length reaches a multiple of four, later
/// enemies start one row lower. The row counter restarts at the top for each
/// call, so a refill overlaps the rows of survivors.
pub fn add_enemies(rng: &mut impl Rng, enemies: &mut Vec<Enemy>, count: u32, viewport_width: f32) {
    let mut start_y = WAVE_START_Y;
    let max_x = viewport_width as i32 - WAVE_RIGHT_MARGIN;

    for _ in 0..count {
        let x = random(rng, WAVE_LEFT_MARGIN, max_x) as f32;
        let speed = random(rng, ENEMY_MIN_SPEED, ENEMY_MAX_SPEED) as f32;
        let vel_x = if rng.random_bool(0.5) { speed } else { -speed };
        let color = ENEMY_COLORS[random(rng, 0, ENEMY_COLORS.len() as i32) as usize];
        let variant = random(rng, ENEMY_VARIANTS.0, ENEMY_VARIANTS.1) as u8;

        enemies.push(Enemy::new(Vec2::new(x, start_y), vel_x, color, variant));

        if enemies.len() % WAVE_ROW_SIZE == 0 {
            start_y += WAVE_ROW_STEP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn random_respects_half_open_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..10_000 {
            let v = random(&mut rng, 3, 7);
            assert!((3..7).contains(&v));
        }
    }

    #[test]
    fn random_empty_range_yields_min() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(random(&mut rng, 5, 5), 5);
        assert_eq!(random(&mut rng, 9, 2), 9);
    }

    #[test]
    fn wave_is_staggered_in_rows_of_four() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemies = Vec::new();
        add_enemies(&mut rng, &mut enemies, 12, 1024.0);
        assert_eq!(enemies.len(), 12);

        let rows: Vec<f32> = enemies.iter().map(|e| e.pos().y).collect();
        assert_eq!(&rows[0..4], &[20.0; 4]);
        assert_eq!(&rows[4..8], &[120.0; 4]);
        assert_eq!(&rows[8..12], &[220.0; 4]);
    }

    #[test]
    fn wave_respects_margins_speed_and_colors() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut enemies = Vec::new();
        add_enemies(&mut rng, &mut enemies, 200, 800.0);
        for enemy in &enemies {
            let x = enemy.pos().x;
            assert!((50.0..700.0).contains(&x), "x {x} outside band");
            let speed = enemy.ship.vel_x.abs();
            assert!((1.0..10.0).contains(&speed));
            assert!(ENEMY_COLORS.contains(&enemy.ship.color));
            assert!((1..5).contains(&enemy.ship.variant));
        }
        assert!(enemies.iter().any(|e| e.ship.vel_x < 0.0));
        assert!(enemies.iter().any(|e| e.ship.vel_x > 0.0));
    }

    #[test]
    fn row_stepping_follows_total_length() {
        // Two survivors + 4 new: rows step when the length hits 4 (after 2 adds)
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemies = Vec::new();
        add_enemies(&mut rng, &mut enemies, 2, 800.0);
        add_enemies(&mut rng, &mut enemies, 4, 800.0);
        let rows: Vec<f32> = enemies[2..].iter().map(|e| e.pos().y).collect();
        assert_eq!(rows, vec![20.0, 20.0, 120.0, 120.0]);
    }
}
