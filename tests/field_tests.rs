// Host-side tests for the field driver: staggered init, frame gating,
// interaction, resize and draw order.

use glam::Vec2;
use header_glow::core::*;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear(Vec2),
    Circle { radius: f32, blend: Blend },
    Triangle,
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Surface for Recorder {
    fn clear(&mut self, size: Vec2) {
        self.ops.push(Op::Clear(size));
    }

    fn fill_circle(&mut self, _center: Vec2, radius: f32, _paint: &Paint, style: DrawStyle) {
        self.ops.push(Op::Circle {
            radius,
            blend: style.blend,
        });
    }

    fn fill_triangle(&mut self, _points: [Vec2; 3], _paint: &Paint, _style: DrawStyle) {
        self.ops.push(Op::Triangle);
    }
}

fn make_field(seed: u64) -> Field {
    Field::new(
        FieldConfig::default(),
        Palette::for_theme(Theme::Dark),
        Vec2::new(800.0, 600.0),
        seed,
    )
}

#[test]
fn init_arrives_in_batches() {
    let mut field = make_field(1);
    field.begin_init();
    assert_eq!(field.beams().len(), BEAM_COUNT);
    assert!(field.particles().is_empty());
    assert!(field.orbs().is_empty());
    assert!((ORB_COUNT_MIN..=ORB_COUNT_MAX).contains(&field.orb_target()));

    let mut batches = 0;
    loop {
        let more = field.spawn_particle_batch();
        batches += 1;
        assert_eq!(field.particles().len(), batches * PARTICLE_BATCH_SIZE);
        if !more {
            break;
        }
    }
    assert_eq!(batches, MAX_PARTICLES / PARTICLE_BATCH_SIZE);
    assert_eq!(field.particles().len(), MAX_PARTICLES);
    assert!(!field.spawn_particle_batch());
    assert_eq!(field.particles().len(), MAX_PARTICLES);

    let mut orbs = 0;
    while field.spawn_orb() {
        orbs += 1;
        assert_eq!(field.orbs().len(), orbs);
    }
    assert_eq!(field.orbs().len(), field.orb_target());
}

#[test]
fn seeded_particles_avoid_left_edge_and_start_partly_faded() {
    let mut field = make_field(2);
    field.init_all();
    for p in field.particles() {
        assert!(p.pos.x >= INIT_LEFT_CLEARANCE, "seeded at x={}", p.pos.x);
        assert!(p.life < INIT_MAX_AGE as f32);
        assert!(p.opacity <= INIT_OPACITY_SCALE);
    }
}

#[test]
fn advance_skips_frames_that_come_too_soon() {
    let config = FieldConfig {
        frame_interval_ms: 16.0,
        ..FieldConfig::default()
    };
    let mut field = Field::new(config, Palette::default(), Vec2::new(800.0, 600.0), 3);
    field.init_all();
    assert!(field.advance(96.0));
    let t = field.time();
    let before = field.particles().to_vec();
    assert!(!field.advance(105.0));
    assert_eq!(field.time(), t);
    assert_eq!(field.particles(), &before[..]);
    assert!(field.advance(112.0));
    assert!((field.time() - (t + TIME_STEP)).abs() < 1e-6);
}

#[test]
fn pacer_carries_leftover_time() {
    let mut pacer = FramePacer::new(10.0);
    assert!(pacer.ready(10.0));
    assert!(!pacer.ready(19.0));
    // 5ms late: the next frame is still due at 30.
    assert!(pacer.ready(25.0));
    assert!(!pacer.ready(29.0));
    assert!(pacer.ready(30.0));
}

#[test]
fn click_adds_an_explosion_at_the_point() {
    let mut field = make_field(4);
    field.init_all();
    let before = field.particles().len();
    let at = Vec2::new(321.0, 123.0);
    field.click(at);
    let ps = field.particles();
    assert_eq!(ps.len(), before + EXPLOSION_COUNT);
    for p in &ps[before..] {
        assert_eq!(p.pos, at);
        assert_eq!(p.opacity, EXPLOSION_OPACITY);
        assert!(p.max_life >= 60.0 && p.max_life < 90.0);
    }
}

#[test]
fn explosions_grow_pool_until_capacity() {
    let mut field = make_field(5);
    field.init_all();
    let clicks = (PARTICLE_POOL_CAPACITY - MAX_PARTICLES) / EXPLOSION_COUNT;
    for i in 0..clicks {
        let before = field.particles().len();
        field.create_explosion(Vec2::new(i as f32, 10.0), EXPLOSION_COUNT);
        assert_eq!(field.particles().len(), before + EXPLOSION_COUNT);
    }
    assert_eq!(field.particles().len(), PARTICLE_POOL_CAPACITY);
}

#[test]
fn full_pool_replaces_faintest_particles() {
    let mut field = make_field(5);
    field.init_all();
    for i in 0..100 {
        field.create_explosion(Vec2::new(i as f32, 10.0), EXPLOSION_COUNT);
    }
    assert_eq!(field.particles().len(), PARTICLE_POOL_CAPACITY);

    // Every 20th slot is nearly invisible; everything else is bright.
    let faint = |i: usize| i % 20 == 7;
    for (i, p) in field.particles_mut().enumerate() {
        p.opacity = if faint(i) { 0.01 } else { 0.65 };
    }
    let at = Vec2::new(555.0, 444.0);
    field.click(at);

    let ps = field.particles();
    assert_eq!(ps.len(), PARTICLE_POOL_CAPACITY);
    assert_eq!(ps.iter().filter(|p| p.pos == at).count(), EXPLOSION_COUNT);
    for (i, p) in ps.iter().enumerate() {
        if p.pos == at {
            assert!(faint(i), "bright slot {i} was replaced");
        } else {
            assert_eq!(p.opacity, 0.65, "slot {i} changed");
        }
    }
    for _ in 0..10 {
        field.step();
    }
    assert_eq!(field.particles().len(), PARTICLE_POOL_CAPACITY);
}

#[test]
fn touch_follows_then_releases_pointer() {
    let mut field = make_field(6);
    field.init_all();
    let before = field.particles().len();
    field.touch_start(Vec2::new(50.0, 60.0));
    assert!(field.pointer().active);
    assert_eq!(field.pointer().position, Some(Vec2::new(50.0, 60.0)));
    assert_eq!(field.particles().len(), before + EXPLOSION_COUNT);

    field.touch_move(Vec2::new(70.0, 80.0));
    assert_eq!(field.pointer().position, Some(Vec2::new(70.0, 80.0)));
    field.touch_end();
    assert!(!field.pointer().active);
    assert!(field.pointer().position.is_none());
}

#[test]
fn mouse_enter_move_leave() {
    let mut field = make_field(7);
    field.pointer_move(Vec2::new(1.0, 2.0));
    assert!(!field.pointer().active);
    field.pointer_enter();
    assert!(field.pointer().influence(Vec2::new(1.0, 3.0)).is_some());
    field.pointer_leave();
    assert!(field.pointer().influence(Vec2::new(1.0, 3.0)).is_none());
}

#[test]
fn resize_rebuilds_beams_and_orbs_and_pulls_particles_in() {
    let mut field = make_field(8);
    field.init_all();
    for p in field.particles_mut() {
        p.pos = Vec2::new(700.0, 500.0);
    }
    let size = Vec2::new(400.0, 300.0);
    field.handle_resize(size);
    assert_eq!(field.bounds(), size);
    assert_eq!(field.beams().len(), BEAM_COUNT);
    assert!((ORB_COUNT_MIN..=ORB_COUNT_MAX).contains(&field.orbs().len()));
    for b in field.beams() {
        assert!(b.origin.x >= 0.0 && b.origin.x <= size.x);
        assert!((b.length - size.y * BEAM_LENGTH_SCALE).abs() < 1e-3);
    }
    for o in field.orbs() {
        assert!(o.pos.x <= size.x && o.pos.y <= size.y);
    }
    for p in field.particles() {
        assert!(p.pos.x <= size.x && p.pos.y <= size.y);
    }
    assert_eq!(field.particles().len(), MAX_PARTICLES);
}

#[test]
fn zero_size_is_clamped() {
    let mut field = Field::new(FieldConfig::default(), Palette::default(), Vec2::ZERO, 9);
    field.init_all();
    assert_eq!(field.bounds(), Vec2::ONE);
    for _ in 0..200 {
        field.step();
    }
    for p in field.particles() {
        assert!(p.pos.is_finite());
    }
}

#[test]
fn draw_layers_beams_then_orbs_then_particles() {
    let mut field = make_field(10);
    field.init_all();
    let mut rec = Recorder::default();
    field.draw(&mut rec);

    let beams = field.beams().len();
    let orbs = field.orbs().len();
    let particles = field.particles().len();
    assert_eq!(rec.ops.len(), 1 + beams + orbs * 2 + particles * 2);
    assert_eq!(rec.ops[0], Op::Clear(field.bounds()));
    assert!(rec.ops[1..=beams].iter().all(|op| *op == Op::Triangle));

    let orb_ops = &rec.ops[1 + beams..1 + beams + orbs * 2];
    for op in orb_ops {
        assert!(matches!(op, Op::Circle { blend: Blend::Screen, .. }));
    }
    let particle_ops = &rec.ops[1 + beams + orbs * 2..];
    for pair in particle_ops.chunks(2) {
        match pair {
            [Op::Circle {
                radius: glow,
                blend: Blend::Normal,
            }, Op::Circle {
                radius: core,
                blend: Blend::Normal,
            }] => assert!(glow >= core),
            other => panic!("unexpected particle ops {other:?}"),
        }
    }
}

#[test]
fn draw_does_not_change_state() {
    let mut field = make_field(11);
    field.init_all();
    field.step();
    let before: Vec<Particle> = field.particles().to_vec();
    let mut rec = Recorder::default();
    field.draw(&mut rec);
    field.draw(&mut rec);
    assert_eq!(field.particles(), &before[..]);
}

#[test]
fn same_seed_same_simulation() {
    let mut a = make_field(12);
    let mut b = make_field(12);
    a.init_all();
    b.init_all();
    for _ in 0..300 {
        a.step();
        b.step();
    }
    assert_eq!(a.particles(), b.particles());
    assert_eq!(a.orbs(), b.orbs());
    assert_eq!(a.beams(), b.beams());
}
