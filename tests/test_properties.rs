use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use asteroid_blaster::config::GameConfig;
use asteroid_blaster::entities::{AsteroidVariant, GameStatus};
use asteroid_blaster::events::GameEvent;
use asteroid_blaster::pool::EntityPool;
use asteroid_blaster::{Game, InputState, UiTrigger};

fn frames() -> impl Strategy<Value = Vec<(bool, bool, bool, u64)>> {
    prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), 1u64..60), 1..600)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn score_is_monotonic_multiple_of_reward(seed in any::<u64>(), frames in frames()) {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.trigger(UiTrigger::Start);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut last = 0;

        for (left, right, fire, ms) in frames {
            let input = InputState { left, right, fire };
            game.tick(&input, Duration::from_millis(ms), &mut rng);
            let score = game.session.score;
            prop_assert!(score >= last);
            prop_assert_eq!(score % 10, 0);
            last = score;
        }
    }

    #[test]
    fn win_iff_threshold_and_one_ending_per_tick(
        seed in any::<u64>(),
        win_score in prop::sample::select(vec![10u32, 20, 30]),
        frames in frames(),
    ) {
        let mut config = GameConfig::default();
        config.scoring.win_score = win_score;
        let mut game = Game::new(config).unwrap();
        game.trigger(UiTrigger::Start);
        let mut rng = StdRng::seed_from_u64(seed);

        for (left, right, fire, ms) in frames {
            let was_playing = game.status == GameStatus::Playing;
            let events = game.tick(&InputState { left, right, fire }, Duration::from_millis(ms), &mut rng);

            let endings = events
                .iter()
                .filter(|e| matches!(e, GameEvent::Won { .. } | GameEvent::PlayerHit { .. }))
                .count();
            prop_assert!(endings <= 1);

            match game.status {
                GameStatus::Win => prop_assert!(game.session.score >= win_score),
                GameStatus::Playing => prop_assert!(game.session.score < win_score),
                GameStatus::GameOver => prop_assert!(game.session.is_over),
                GameStatus::Menu => prop_assert!(false, "tick must never return to the menu"),
            }
            if !was_playing {
                prop_assert!(events.is_empty());
            }
        }
    }

    #[test]
    fn obstacle_hitbox_always_centered(scale in 0.05f32..2.0, rock2 in any::<bool>()) {
        let mut pool = EntityPool::new(&GameConfig::default());
        let variant = if rock2 { AsteroidVariant::Rock2 } else { AsteroidVariant::Rock1 };
        let id = pool.spawn_obstacle(400.0, variant, scale, 0.0, 0.0);
        let a = &pool.obstacles[&id];
        let b = a.bounds();

        prop_assert!(a.hitbox.width < a.width && a.hitbox.height < a.height);
        prop_assert!(((b.left + b.right) / 2.0 - a.x).abs() < 1e-3);
        prop_assert!(((b.top + b.bottom) / 2.0 - a.y).abs() < 1e-3);
    }
}
