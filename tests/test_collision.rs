use asteroid_blaster::collision::*;
use asteroid_blaster::compute::spawn_player;
use asteroid_blaster::config::GameConfig;
use asteroid_blaster::entities::*;
use asteroid_blaster::pool::EntityPool;

fn make_pool() -> EntityPool {
    EntityPool::new(&GameConfig::default())
}

/// Stationary asteroid (scale 0.25 → 5×10 hitbox) centred on (x, y).
fn rock_at(pool: &mut EntityPool, x: f32, y: f32) -> EntityId {
    let id = pool.spawn_obstacle(x, AsteroidVariant::Rock1, 0.25, 0.0, 0.0);
    pool.get_mut(id).unwrap().y = y;
    id
}

/// Projectile (6×16) centred on (x, y).
fn shot_at(pool: &mut EntityPool, x: f32, y: f32) -> EntityId {
    pool.spawn_projectile((x, y + 20.0)).unwrap()
}

// ── Projectile ↔ asteroid ─────────────────────────────────────────────────────

#[test]
fn overlapping_projectile_destroys_asteroid() {
    let mut pool = make_pool();
    let rock = rock_at(&mut pool, 400.0, 100.0);
    let shot = shot_at(&mut pool, 400.0, 100.0);

    let hits = resolve_projectile_hits(&mut pool);
    assert_eq!(
        hits,
        vec![Hit {
            projectile: shot,
            asteroid: rock
        }]
    );
    assert!(pool.is_empty());
}

#[test]
fn near_miss_leaves_both() {
    let mut pool = make_pool();
    rock_at(&mut pool, 400.0, 100.0);
    // Half widths 2.5 + 3 → must be more than 5.5 apart
    shot_at(&mut pool, 406.0, 100.0);

    assert!(resolve_projectile_hits(&mut pool).is_empty());
    assert_eq!(pool.len(), 2);
}

#[test]
fn projectile_inside_sprite_but_outside_hitbox_misses() {
    let mut pool = make_pool();
    rock_at(&mut pool, 400.0, 100.0);
    // 64-px sprite spans 368..432, hitbox only 397.5..402.5
    shot_at(&mut pool, 420.0, 100.0);
    assert!(resolve_projectile_hits(&mut pool).is_empty());
}

#[test]
fn one_projectile_consumes_only_one_asteroid() {
    let mut pool = make_pool();
    let first = rock_at(&mut pool, 400.0, 100.0);
    let second = rock_at(&mut pool, 401.0, 102.0);
    let shot = shot_at(&mut pool, 400.0, 100.0);

    let hits = resolve_projectile_hits(&mut pool);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].asteroid, first);
    assert!(!pool.contains(shot));
    assert!(pool.contains(second));
}

#[test]
fn asteroid_is_consumed_only_once() {
    let mut pool = make_pool();
    let rock = rock_at(&mut pool, 400.0, 100.0);
    let a = shot_at(&mut pool, 400.0, 100.0);
    let b = shot_at(&mut pool, 401.0, 98.0);

    let hits = resolve_projectile_hits(&mut pool);
    assert_eq!(hits, vec![Hit { projectile: a, asteroid: rock }]);
    assert!(pool.contains(b));
}

#[test]
fn independent_pairs_all_resolve() {
    let mut pool = make_pool();
    rock_at(&mut pool, 100.0, 100.0);
    rock_at(&mut pool, 300.0, 200.0);
    shot_at(&mut pool, 100.0, 100.0);
    shot_at(&mut pool, 300.0, 200.0);

    assert_eq!(resolve_projectile_hits(&mut pool).len(), 2);
    assert!(pool.is_empty());
}

// ── Ship ↔ asteroid ───────────────────────────────────────────────────────────

#[test]
fn asteroid_on_ship_is_a_hit() {
    let config = GameConfig::default();
    let player = spawn_player(&config); // (400, 500), 64×64
    let mut pool = make_pool();
    let rock = rock_at(&mut pool, 410.0, 480.0);
    assert_eq!(player_hit(&player, &pool), Some(rock));
}

#[test]
fn asteroid_above_ship_is_not_a_hit() {
    let config = GameConfig::default();
    let player = spawn_player(&config);
    let mut pool = make_pool();
    // Ship top edge at 468, asteroid hitbox bottom at 405
    rock_at(&mut pool, 400.0, 400.0);
    assert_eq!(player_hit(&player, &pool), None);
}

#[test]
fn projectiles_never_hit_the_ship() {
    let config = GameConfig::default();
    let player = spawn_player(&config);
    let mut pool = make_pool();
    shot_at(&mut pool, 400.0, 500.0);
    assert_eq!(player_hit(&player, &pool), None);
}
