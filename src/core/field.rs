//! The simulation driver.
//!
//! A [`Field`] owns every entity pool plus the pointer state for one mounted
//! animation. Hosts call [`Field::advance`] once per display refresh and
//! [`Field::draw`] whenever it returns true; layering is fixed as beams, then
//! orbs, then particles.

use super::beam::Beam;
use super::color::Palette;
use super::config::FieldConfig;
use super::constants::*;
use super::orb::Orb;
use super::pacing::FramePacer;
use super::particle::Particle;
use super::pointer::Pointer;
use super::pool::Pool;
use super::surface::Surface;
use glam::Vec2;
use rand::prelude::*;

// Pool eviction rank: the least visible particle goes first.
#[inline]
fn visibility(p: &Particle) -> f32 {
    p.opacity
}

pub struct Field {
    pub config: FieldConfig,
    palette: Palette,
    bounds: Vec2,
    rng: StdRng,
    time: f32,
    pacer: FramePacer,
    particles: Pool<Particle>,
    beams: Vec<Beam>,
    orbs: Vec<Orb>,
    pointer: Pointer,
    // Staggered init progress
    particles_seeded: usize,
    orb_target: usize,
}

impl Field {
    pub fn new(config: FieldConfig, palette: Palette, size: Vec2, seed: u64) -> Self {
        Self {
            pacer: FramePacer::new(config.frame_interval_ms),
            pointer: Pointer::new(config.pointer_radius),
            particles: Pool::with_capacity(config.particle_capacity),
            beams: Vec::with_capacity(config.beam_count),
            orbs: Vec::with_capacity(config.orb_count_max),
            config,
            palette,
            bounds: size.max(Vec2::ONE),
            rng: StdRng::seed_from_u64(seed),
            time: 0.0,
            particles_seeded: 0,
            orb_target: 0,
        }
    }

    // ---------------- Accessors ----------------
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    /// Mutable particle access for hosts that restyle or inspect the field.
    #[inline]
    pub fn particles_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    #[inline]
    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    #[inline]
    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    #[inline]
    pub fn orb_target(&self) -> usize {
        self.orb_target
    }

    // ---------------- Lifecycle ----------------

    /// Clear every pool, build the beams and plan the staggered spawns.
    /// Particles and orbs then arrive through [`Field::spawn_particle_batch`]
    /// and [`Field::spawn_orb`].
    pub fn begin_init(&mut self) {
        self.particles.clear();
        self.particles_seeded = 0;
        self.build_beams();
        self.orbs.clear();
        self.orb_target = self.roll_orb_count();
        log::info!(
            "[field] init {}x{} particles={} beams={} orbs={}",
            self.bounds.x,
            self.bounds.y,
            self.particle_target(),
            self.beams.len(),
            self.orb_target
        );
    }

    /// Everything at once, for hosts without timers.
    pub fn init_all(&mut self) {
        self.begin_init();
        while self.spawn_particle_batch() {}
        while self.spawn_orb() {}
    }

    #[inline]
    fn particle_target(&self) -> usize {
        self.config.max_particles.min(self.particles.capacity())
    }

    fn roll_orb_count(&mut self) -> usize {
        let lo = self.config.orb_count_min;
        let hi = self.config.orb_count_max.max(lo);
        self.rng.gen_range(lo..=hi)
    }

    /// Add the next batch of ambient particles. Returns whether more batches
    /// remain.
    pub fn spawn_particle_batch(&mut self) -> bool {
        let target = self.particle_target();
        if self.particles_seeded >= target {
            return false;
        }
        let n = self
            .config
            .particle_batch_size
            .max(1)
            .min(target - self.particles_seeded);
        for _ in 0..n {
            let p = self.seed_particle();
            self.particles.insert_by(p, visibility);
        }
        self.particles_seeded += n;
        self.particles_seeded < target
    }

    // Initial particles sit in the top, right or bottom third, clear of the
    // left edge, with a random head start on their fade-in.
    fn seed_particle(&mut self) -> Particle {
        let (w, h) = (self.bounds.x, self.bounds.y);
        let rng = &mut self.rng;
        let mut p = Particle::spawn(self.bounds, None, rng);
        p.life = rng.gen_range(0..INIT_MAX_AGE) as f32;
        p.opacity = p.life / INIT_MAX_AGE as f32 * INIT_OPACITY_SCALE;

        let edge = rng.gen::<f32>();
        p.pos = if edge < 0.33 {
            Vec2::new(rng.gen::<f32>() * w, rng.gen::<f32>() * (h / 3.0))
        } else if edge < 0.66 {
            Vec2::new(
                rng.gen::<f32>() * (w / 3.0) + w * 2.0 / 3.0,
                rng.gen::<f32>() * h,
            )
        } else {
            Vec2::new(
                rng.gen::<f32>() * w,
                rng.gen::<f32>() * (h / 3.0) + h * 2.0 / 3.0,
            )
        };
        if p.pos.x < INIT_LEFT_CLEARANCE {
            p.pos.x = rng.gen::<f32>() * (w - 2.0 * INIT_LEFT_CLEARANCE) + INIT_LEFT_CLEARANCE;
        }
        p
    }

    /// Add one orb with a staggered starting age. Returns whether more orbs
    /// remain.
    pub fn spawn_orb(&mut self) -> bool {
        if self.orbs.len() >= self.orb_target {
            return false;
        }
        let orb = Orb::staggered(self.bounds, &mut self.rng);
        self.orbs.push(orb);
        self.orbs.len() < self.orb_target
    }

    fn build_beams(&mut self) {
        self.beams.clear();
        for _ in 0..self.config.beam_count {
            let beam = Beam::spawn(self.bounds, &mut self.rng);
            self.beams.push(beam);
        }
    }

    fn rebuild_orbs(&mut self) {
        self.orbs.clear();
        self.orb_target = self.roll_orb_count();
        while self.spawn_orb() {}
    }

    /// New surface size: beams and orbs are rebuilt, particles outside the
    /// new bounds are pulled back in.
    pub fn handle_resize(&mut self, size: Vec2) {
        self.bounds = size.max(Vec2::ONE);
        let (w, h) = (self.bounds.x, self.bounds.y);
        self.build_beams();
        self.rebuild_orbs();
        for p in self.particles.iter_mut() {
            if p.pos.x > w {
                p.pos.x = self.rng.gen::<f32>() * w;
            }
            if p.pos.y > h {
                p.pos.y = self.rng.gen::<f32>() * h;
            }
        }
        log::info!("[field] resized to {}x{}", w, h);
    }

    // ---------------- Frame ----------------

    /// Frame gate plus update. Returns false, touching nothing but the pacer,
    /// when called sooner than one frame interval after the last frame.
    pub fn advance(&mut self, timestamp_ms: f64) -> bool {
        if !self.pacer.ready(timestamp_ms) {
            return false;
        }
        self.step();
        true
    }

    /// One ungated simulation tick.
    pub fn step(&mut self) {
        self.time += self.config.time_step;
        let (time, bounds, pointer) = (self.time, self.bounds, self.pointer);
        for beam in &mut self.beams {
            beam.update(time, bounds, &mut self.rng);
        }
        for orb in &mut self.orbs {
            orb.update(time, bounds, &mut self.rng);
        }
        for p in self.particles.iter_mut() {
            p.update(time, bounds, &pointer, &mut self.rng);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.bounds);
        for beam in &self.beams {
            beam.draw(&self.palette, surface);
        }
        for orb in &self.orbs {
            orb.draw(&self.palette, surface);
        }
        for p in self.particles.iter() {
            p.draw(&self.palette, surface);
        }
    }

    // ---------------- Interaction ----------------

    /// Burst of `count` fast particles at `at`. Once the pool is at capacity
    /// each new particle takes the slot of the faintest existing one.
    pub fn create_explosion(&mut self, at: Vec2, count: usize) {
        if self.particles.is_full() {
            log::debug!("[field] pool full, burst replaces faintest particles");
        }
        for _ in 0..count {
            let p = Particle::burst(at, &mut self.rng);
            self.particles.insert_by(p, visibility);
        }
    }

    #[inline]
    pub fn pointer_move(&mut self, at: Vec2) {
        self.pointer.move_to(at);
    }

    #[inline]
    pub fn pointer_enter(&mut self) {
        self.pointer.enter();
    }

    #[inline]
    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    pub fn click(&mut self, at: Vec2) {
        self.create_explosion(at, self.config.explosion_count);
    }

    /// A touch both starts pointer-follow and bursts at the touch point.
    pub fn touch_start(&mut self, at: Vec2) {
        self.pointer.enter();
        self.pointer.move_to(at);
        self.click(at);
    }

    #[inline]
    pub fn touch_move(&mut self, at: Vec2) {
        self.pointer.move_to(at);
    }

    #[inline]
    pub fn touch_end(&mut self) {
        self.pointer.leave();
    }
}
