// Host-side tests for particle motion, recycling and bursts.

use glam::Vec2;
use header_glow::core::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn assert_sane(p: &Particle) {
    assert!(p.opacity >= 0.0 && p.opacity <= 1.0, "opacity {}", p.opacity);
    assert!(p.size >= PARTICLE_MIN_SIZE, "size {}", p.size);
    assert!(p.glow_size >= p.size, "glow {} < size {}", p.glow_size, p.size);
    assert!(p.life < p.max_life, "life {} >= max {}", p.life, p.max_life);
    assert!(
        p.speed() <= PARTICLE_MAX_SPEED + 1e-4,
        "speed {} over limit",
        p.speed()
    );
    assert!(p.pos.is_finite() && p.vel.is_finite());
}

#[test]
fn state_stays_in_range_over_long_runs() {
    let mut r = rng(7);
    let pointer = Pointer::default();
    let mut particles: Vec<Particle> = (0..20)
        .map(|_| Particle::spawn(BOUNDS, None, &mut r))
        .collect();
    let mut time = 0.0;
    for _ in 0..10_000 {
        time += TIME_STEP;
        for p in &mut particles {
            p.update(time, BOUNDS, &pointer, &mut r);
            assert_sane(p);
        }
    }
}

#[test]
fn state_stays_in_range_with_pointer_inside() {
    let mut r = rng(11);
    let mut pointer = Pointer::default();
    pointer.enter();
    pointer.move_to(Vec2::new(400.0, 300.0));
    let mut particles: Vec<Particle> = (0..20)
        .map(|_| Particle::spawn(BOUNDS, Some(Vec2::new(405.0, 305.0)), &mut r))
        .collect();
    let mut time = 0.0;
    for _ in 0..2_000 {
        time += TIME_STEP;
        for p in &mut particles {
            p.update(time, BOUNDS, &pointer, &mut r);
            assert_sane(p);
        }
    }
}

#[test]
fn spawn_starts_faint_and_young() {
    let mut r = rng(1);
    for _ in 0..100 {
        let p = Particle::spawn(BOUNDS, None, &mut r);
        assert_eq!(p.life, 0.0);
        assert_eq!(p.opacity, PARTICLE_SPAWN_OPACITY);
        assert!(p.pos.x >= 0.0 && p.pos.x <= BOUNDS.x);
        assert!(p.pos.y >= 0.0 && p.pos.y <= BOUNDS.y);
        assert!(p.max_life >= PARTICLE_MAX_LIFE_MIN);
        assert!(p.max_life < PARTICLE_MAX_LIFE_MIN + PARTICLE_MAX_LIFE_SPAN);
    }
}

#[test]
fn reset_restarts_life_outside_left_margin() {
    let mut r = rng(3);
    let mut p = Particle::spawn(BOUNDS, None, &mut r);
    for _ in 0..1_000 {
        p.life = 123.0;
        p.opacity = 0.9;
        p.reset(BOUNDS, &mut r);
        assert_eq!(p.life, 0.0);
        assert_eq!(p.opacity, PARTICLE_SPAWN_OPACITY);
        assert!(p.pos.x >= 0.0, "respawned at x={}", p.pos.x);
        assert!(p.vel.x.abs() >= RESPAWN_MIN_SPEED_X - 1e-6);
        assert!(p.glow_size >= p.size);
    }
}

#[test]
fn reset_on_narrow_surface_never_lands_left_of_zero() {
    // Narrow enough that top and interior spawns can land left of zero.
    let narrow = Vec2::new(10.0, 200.0);
    let mut r = rng(5);
    let mut p = Particle::spawn(narrow, None, &mut r);
    for _ in 0..1_000 {
        p.reset(narrow, &mut r);
        assert!(p.pos.x >= 0.0);
    }
}

#[test]
fn reset_mostly_enters_from_edges() {
    let mut r = rng(9);
    let mut p = Particle::spawn(BOUNDS, None, &mut r);
    let mut outside = 0;
    let n = 2_000;
    for _ in 0..n {
        p.reset(BOUNDS, &mut r);
        if p.pos.y < 0.0 || p.pos.y > BOUNDS.y || p.pos.x > BOUNDS.x {
            outside += 1;
        }
    }
    // Main zones plus the diagonal half of the remainder.
    let expected = MAIN_ZONE_CHANCE + (1.0 - MAIN_ZONE_CHANCE) * (1.0 - SPECIAL_INTERIOR_CHANCE);
    let share = outside as f32 / n as f32;
    assert!((share - expected).abs() < 0.03, "edge share {share}");
}

#[test]
fn expired_particle_is_recycled() {
    let mut r = rng(13);
    let mut p = Particle::spawn(BOUNDS, Some(Vec2::new(400.0, 300.0)), &mut r);
    p.life = p.max_life;
    p.update(1.0, BOUNDS, &Pointer::default(), &mut r);
    assert_eq!(p.life, 0.0);
    assert_eq!(p.opacity, PARTICLE_SPAWN_OPACITY);
}

#[test]
fn envelope_fades_in_and_out() {
    let mut r = rng(17);
    let mut p = Particle::spawn(BOUNDS, None, &mut r);
    p.max_life = 300.0;
    p.life = 0.0;
    assert_eq!(p.envelope(), 0.0);
    p.life = 20.0;
    assert!((p.envelope() - 0.35).abs() < 1e-5);
    p.life = 150.0;
    let mid = p.envelope();
    assert!(mid >= 0.6 - 1e-5 && mid <= 0.7 + 1e-5);
    p.life = 270.0;
    assert!((p.envelope() - 0.35).abs() < 1e-5);
    p.life = 300.0;
    assert_eq!(p.envelope(), 0.0);
}

#[test]
fn pointer_pushes_particles_away() {
    let mut r = rng(19);
    let center = Vec2::new(400.0, 300.0);
    let mut pointer = Pointer::default();
    pointer.enter();
    pointer.move_to(center);

    let mut pushed = 0;
    for _ in 0..200 {
        let start = center + Vec2::new(40.0, 0.0);
        let mut p = Particle::spawn(BOUNDS, Some(start), &mut r);
        p.vel = Vec2::ZERO;
        p.life = 100.0;
        p.max_life = 300.0;
        p.update(1.0, BOUNDS, &pointer, &mut r);
        if p.vel.x > 0.0 {
            pushed += 1;
        }
    }
    assert!(pushed > 190, "only {pushed}/200 pushed outward");
}

#[test]
fn inactive_pointer_has_no_influence() {
    let mut pointer = Pointer::default();
    pointer.move_to(Vec2::new(10.0, 10.0));
    assert!(pointer.influence(Vec2::new(12.0, 10.0)).is_none());
    pointer.enter();
    let inf = pointer.influence(Vec2::new(12.0, 10.0)).unwrap();
    assert!((inf.distance - 2.0).abs() < 1e-5);
    assert!(inf.falloff > 0.98 && inf.falloff <= 1.0);
    assert!(pointer.influence(Vec2::new(10.0, 10.0 + POINTER_RADIUS)).is_none());
    pointer.leave();
    assert!(pointer.position.is_none());
    assert!(pointer.influence(Vec2::new(12.0, 10.0)).is_none());
}

#[test]
fn burst_is_bright_and_short_lived() {
    let mut r = rng(23);
    let at = Vec2::new(120.0, 80.0);
    for _ in 0..200 {
        let p = Particle::burst(at, &mut r);
        assert_eq!(p.pos, at);
        assert_eq!(p.opacity, EXPLOSION_OPACITY);
        assert_eq!(p.life, 0.0);
        assert!(p.max_life >= EXPLOSION_MAX_LIFE_MIN);
        assert!(p.max_life < EXPLOSION_MAX_LIFE_MIN + EXPLOSION_MAX_LIFE_SPAN);
        assert!(p.speed() <= PARTICLE_MAX_SPEED);
    }
}

#[test]
fn slot_distribution_follows_weights() {
    let mut r = rng(29);
    let mut counts = [0usize; 3];
    let n = 20_000;
    for _ in 0..n {
        counts[PaletteSlot::pick(r.gen(), PARTICLE_SLOT_THRESHOLDS).index()] += 1;
    }
    let share = |i: usize| counts[i] as f32 / n as f32;
    assert!((share(0) - 0.6).abs() < 0.02);
    assert!((share(1) - 0.3).abs() < 0.02);
    assert!((share(2) - 0.1).abs() < 0.02);
}
