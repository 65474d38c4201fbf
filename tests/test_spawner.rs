use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use asteroid_blaster::config::GameConfig;
use asteroid_blaster::entities::*;
use asteroid_blaster::pool::EntityPool;
use asteroid_blaster::spawner::Spawner;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn setup() -> (Spawner, EntityPool) {
    let config = GameConfig::default();
    (Spawner::new(&config), EntityPool::new(&config))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── Periodic cadence ──────────────────────────────────────────────────────────

#[test]
fn nothing_spawns_before_first_interval() {
    let (mut spawner, mut pool) = setup();
    let spawned = spawner.advance(ms(1199), &mut pool, &mut seeded_rng());
    assert!(spawned.is_empty());
    assert!(pool.obstacles.is_empty());
}

#[test]
fn spawns_exactly_on_interval() {
    let (mut spawner, mut pool) = setup();
    let mut rng = seeded_rng();
    spawner.advance(ms(1199), &mut pool, &mut rng);
    let spawned = spawner.advance(ms(1), &mut pool, &mut rng);
    assert_eq!(spawned.len(), 1);
    assert_eq!(pool.obstacles.len(), 1);
    assert_eq!(spawner.time_until_next(), ms(1200));
}

#[test]
fn long_step_spawns_once_per_interval() {
    let (mut spawner, mut pool) = setup();
    let spawned = spawner.advance(ms(3700), &mut pool, &mut seeded_rng());
    assert_eq!(spawned.len(), 3);
    assert_eq!(spawner.time_until_next(), ms(1100));
}

#[test]
fn small_steps_accumulate() {
    let (mut spawner, mut pool) = setup();
    let mut rng = seeded_rng();
    let mut total = 0;
    // 16 ms frames for 2.4 s → two spawns
    for _ in 0..150 {
        total += spawner.advance(ms(16), &mut pool, &mut rng).len();
    }
    assert_eq!(total, 2);
}

#[test]
fn reset_restarts_timer() {
    let (mut spawner, mut pool) = setup();
    let mut rng = seeded_rng();
    spawner.advance(ms(1000), &mut pool, &mut rng);
    spawner.reset();
    assert_eq!(spawner.time_until_next(), spawner.interval());
    assert!(spawner.advance(ms(1000), &mut pool, &mut rng).is_empty());
}

// ── Spawn parameters ──────────────────────────────────────────────────────────

#[test]
fn spawn_parameters_stay_in_range() {
    let (spawner, mut pool) = setup();
    let mut rng = seeded_rng();
    for _ in 0..300 {
        spawner.spawn_asteroid(&mut pool, &mut rng);
    }
    for a in pool.obstacles.values() {
        assert!((50.0..=750.0).contains(&a.x), "x = {}", a.x);
        assert_eq!(a.y, -50.0);
        assert!(a.scale >= 0.2 && a.scale < 0.3, "scale = {}", a.scale);
        assert!((150.0..=250.0).contains(&a.vy), "vy = {}", a.vy);
        assert!((-100.0..=100.0).contains(&a.angular_velocity));
        assert_eq!(a.vx, 0.0);
    }
}

#[test]
fn spawned_hitboxes_are_centered_and_smaller() {
    let (spawner, mut pool) = setup();
    let mut rng = seeded_rng();
    for _ in 0..100 {
        spawner.spawn_asteroid(&mut pool, &mut rng);
    }
    for a in pool.obstacles.values() {
        assert!(a.hitbox.width < a.width);
        assert!(a.hitbox.height < a.height);
        assert!((a.hitbox.width - 20.0 * a.scale).abs() < 1e-4);
        assert!((a.hitbox.height - 40.0 * a.scale).abs() < 1e-4);
        // Equal margins on both sides
        assert!((2.0 * a.hitbox.offset_x + a.hitbox.width - a.width).abs() < 1e-3);
        assert!((2.0 * a.hitbox.offset_y + a.hitbox.height - a.height).abs() < 1e-3);
    }
}

#[test]
fn both_variants_appear() {
    let (spawner, mut pool) = setup();
    let mut rng = seeded_rng();
    for _ in 0..100 {
        spawner.spawn_asteroid(&mut pool, &mut rng);
    }
    for variant in AsteroidVariant::ALL {
        assert!(pool
            .obstacles
            .values()
            .any(|a| a.kind == EntityKind::Asteroid(variant)));
    }
}

#[test]
fn same_seed_same_sequence() {
    let (spawner, mut pool_a) = setup();
    let (_, mut pool_b) = setup();
    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        spawner.spawn_asteroid(&mut pool_a, &mut rng_a);
        spawner.spawn_asteroid(&mut pool_b, &mut rng_b);
    }
    let a: Vec<_> = pool_a.obstacles.values().collect();
    let b: Vec<_> = pool_b.obstacles.values().collect();
    assert_eq!(a, b);
}

// ── Replacement ───────────────────────────────────────────────────────────────

#[test]
fn replace_spawns_one_per_fallen() {
    let (spawner, mut pool) = setup();
    let fallen = [EntityId(90), EntityId(91), EntityId(92)];
    let new_ids = spawner.replace(&fallen, &mut pool, &mut seeded_rng());
    assert_eq!(new_ids.len(), 3);
    assert_eq!(pool.obstacles.len(), 3);
    for id in new_ids {
        assert!(pool.obstacles.contains_key(&id));
    }
}

#[test]
fn replace_nothing_spawns_nothing() {
    let (spawner, mut pool) = setup();
    assert!(spawner.replace(&[], &mut pool, &mut seeded_rng()).is_empty());
    assert!(pool.is_empty());
}
