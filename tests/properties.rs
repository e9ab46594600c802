//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use star_shooter::Settings;
use star_shooter::settings::SpriteSize;
use star_shooter::sim::{
    GameState, InputEvent, ShipColor, Spaceship, TickInput, Viewport, player_hits, random, tick,
};

fn input_from(code: u8) -> TickInput {
    match code % 5 {
        0 => TickInput::default(),
        1 => TickInput::new(vec![InputEvent::MoveLeft]),
        2 => TickInput::new(vec![InputEvent::MoveRight]),
        3 => TickInput::new(vec![InputEvent::Fire]),
        _ => TickInput::new(vec![InputEvent::MoveRight, InputEvent::Fire]),
    }
}

proptest! {
    #[test]
    fn random_stays_in_half_open_range(seed in any::<u64>(), min in -1000i32..1000, span in 1i32..2000) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let max = min + span;
        let v = random(&mut rng, min, max);
        prop_assert!(v >= min && v < max);
    }

    #[test]
    fn player_hit_is_symmetric(
        ax in -500.0f32..2000.0, ay in -500.0f32..2000.0,
        bx in -500.0f32..2000.0, by in -500.0f32..2000.0,
        ah in 1.0f32..200.0, bh in 1.0f32..200.0,
    ) {
        let a = Vec2::new(ax, ay);
        let b = Vec2::new(bx, by);
        prop_assert_eq!(player_hits(a, ah, b, bh), player_hits(b, bh, a, ah));
    }

    #[test]
    fn ship_flips_velocity_at_most_once(
        x in -50.0f32..1500.0,
        width in 100.0f32..1500.0,
        speed in 1.0f32..10.0,
        rightward in any::<bool>(),
    ) {
        let size = SpriteSize::new(64.0, 48.0);
        let vel_x = if rightward { speed } else { -speed };
        let mut ship = Spaceship {
            pos: Vec2::new(x, 100.0),
            vel_x,
            color: ShipColor::Red,
            variant: 1,
        };
        let crossing = x + size.width >= width || x <= 0.0;
        ship.update(width, size);
        let expected = if crossing { -vel_x } else { vel_x };
        prop_assert_eq!(ship.vel_x, expected);
        prop_assert_eq!(ship.pos.x, x + expected);
    }

    #[test]
    fn score_never_decreases(seed in any::<u64>(), codes in prop::collection::vec(any::<u8>(), 1..200)) {
        let viewport = Viewport::new(1024.0, 768.0).unwrap();
        let mut state = GameState::new(Settings::default(), viewport, seed).unwrap();
        let mut last = state.score;
        for code in codes {
            let frame = tick(&mut state, &input_from(code));
            prop_assert_eq!(frame.score, last);
            prop_assert!(state.score >= last);
            last = state.score;
            if !state.is_running() {
                break;
            }
        }
    }

    #[test]
    fn stars_land_inside_the_viewport(seed in any::<u64>(), w in 200.0f32..2000.0, h in 200.0f32..2000.0) {
        let viewport = Viewport::new(w, h).unwrap();
        let mut state = GameState::new(Settings::default(), viewport, seed).unwrap();
        let frame = tick(&mut state, &TickInput::default());
        for star in frame.stars() {
            prop_assert!(star.pos.x >= 1.0 && star.pos.x < w);
            prop_assert!(star.pos.y >= 1.0 && star.pos.y < h);
            prop_assert!(star.radius >= 1.0 && star.radius < 5.0);
        }
    }
}
