//! Short-lived glowing points.
//!
//! Particles are pooled: once spawned they are only ever recycled in place by
//! [`Particle::reset`]. Each tick runs two motion phases, a slow envelope-driven
//! steer with edge fading and a faster drift with a rightward bias near the
//! left edge, then resizes for age and applies the pointer push.

use super::centered;
use super::color::{Palette, PaletteSlot};
use super::constants::*;
use super::pointer::Pointer;
use super::surface::{DrawStyle, Paint, Surface};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub base_size: f32,
    pub size: f32,
    pub glow_size: f32,
    pub slot: PaletteSlot,
    /// Age in ticks; fractional because the drift phase adds `fade_speed`.
    pub life: f32,
    pub max_life: f32,
    pub fade_speed: f32,
    pub individual_time: f32,
    pub opacity: f32,
    pub seed: f32,
}

#[inline]
fn ease_out_quint(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(5)
}

// Cheap periodic stand-in for a noise field.
#[inline]
fn field_noise(a: f32, b: f32) -> f32 {
    (a * 0.1).sin() * (b * 0.1).cos() * 2.0
}

impl Particle {
    /// Fresh particle at `at`, or anywhere inside `bounds` when `None`.
    pub fn spawn<R: Rng + ?Sized>(bounds: Vec2, at: Option<Vec2>, rng: &mut R) -> Self {
        let pos = match at {
            Some(p) => p,
            None => Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y),
        };
        let base_size = rng.gen::<f32>() * 2.0 + 0.8;
        let vel = Vec2::new(centered(rng) * 0.3, centered(rng) * 0.3);
        let slot = PaletteSlot::pick(rng.gen(), PARTICLE_SLOT_THRESHOLDS);
        Self {
            pos,
            vel,
            base_size,
            size: base_size,
            glow_size: base_size * 4.0,
            slot,
            life: 0.0,
            max_life: PARTICLE_MAX_LIFE_MIN + rng.gen::<f32>() * PARTICLE_MAX_LIFE_SPAN,
            fade_speed: 0.007 + rng.gen::<f32>() * 0.007,
            individual_time: 0.0,
            opacity: PARTICLE_SPAWN_OPACITY,
            seed: rng.gen(),
        }
    }

    /// Fast, large, short-lived particle for click/tap feedback.
    pub fn burst<R: Rng + ?Sized>(at: Vec2, rng: &mut R) -> Self {
        let mut p = Self::spawn(Vec2::ZERO, Some(at), rng);
        p.vel = Vec2::new(centered(rng) * 2.0, centered(rng) * 2.0);
        p.base_size = rng.gen::<f32>() * 3.0 + 1.5;
        p.size = p.base_size;
        p.glow_size = p.size * 4.0;
        p.life = 0.0;
        p.max_life = EXPLOSION_MAX_LIFE_MIN + rng.gen::<f32>() * EXPLOSION_MAX_LIFE_SPAN;
        p.opacity = EXPLOSION_OPACITY;
        p
    }

    /// Opacity for the current age: fade in, gentle wobble, fade out.
    pub fn envelope(&self) -> f32 {
        let o = if self.life < PARTICLE_FADE_IN_TICKS {
            self.life / PARTICLE_FADE_IN_TICKS * PARTICLE_PEAK_OPACITY
        } else if self.life > self.max_life - PARTICLE_FADE_OUT_TICKS {
            (self.max_life - self.life) / PARTICLE_FADE_OUT_TICKS * PARTICLE_PEAK_OPACITY
        } else {
            PARTICLE_STEADY_OPACITY + (self.life * 0.02).sin() * PARTICLE_STEADY_WOBBLE
        };
        o.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        time: f32,
        bounds: Vec2,
        pointer: &Pointer,
        rng: &mut R,
    ) {
        self.life += 1.0;
        self.individual_time += 0.003 + rng.gen::<f32>() * 0.001;
        let in_left = self.pos.x < LEFT_ZONE;

        self.opacity = self.envelope();
        if self.life >= self.max_life {
            self.reset(bounds, rng);
            return;
        }

        // Stalled near the left edge: start fading rather than pile up.
        if in_left && self.vel.x.abs() < STALL_SPEED && self.vel.y.abs() < STALL_SPEED {
            self.enter_fade_out();
        }

        self.steer(time, in_left, rng);
        if self.cross_edges(self.pos + self.vel * 0.7, bounds, rng) {
            return;
        }
        if !self.drift(bounds, rng) {
            return;
        }

        self.life += self.fade_speed * (0.9 + rng.gen::<f32>() * 0.2);
        if self.life >= self.max_life {
            self.reset(bounds, rng);
            return;
        }

        self.resize_for_age(rng);
        self.push_from(pointer, rng);

        self.vel = self.vel.clamp_length_max(PARTICLE_MAX_SPEED);
        self.size = self.size.max(PARTICLE_MIN_SIZE);
        self.glow_size = self.glow_size.max(self.size);
    }

    #[inline]
    fn enter_fade_out(&mut self) {
        self.life = self.life.max(self.max_life - PARTICLE_FADE_OUT_TICKS);
    }

    #[inline]
    fn revive(&mut self) {
        self.opacity = PARTICLE_SPAWN_OPACITY;
        self.life = 0.0;
    }

    fn steer<R: Rng + ?Sized>(&mut self, time: f32, in_left: bool, rng: &mut R) {
        let it = self.individual_time;
        let global = (time * 0.0005).sin() * 0.003;
        let noise = Vec2::new(
            (it * 0.6 + self.seed).sin() * 0.01 + global,
            (it * 0.8 + self.seed * 2.0).sin() * 0.01 + global,
        );
        let factor = Vec2::new(
            1.0 + (it * 1.2).sin() * 0.08,
            1.0 + (it * 1.5).sin() * 0.08,
        );

        self.vel.x += noise.x * if in_left { 0.3 } else { 0.7 };
        self.vel.y += noise.y * 0.7;

        // Weaker drag near the left edge so particles can leave it.
        let resistance_x = if in_left {
            0.0008
        } else {
            0.003 + rng.gen::<f32>() * 0.001
        };
        self.vel.x *= 1.0 - resistance_x * 1.5;
        self.vel.y *= 1.0 - 0.003 * 1.5;
        self.vel *= factor;
    }

    /// Edge handling for the slow phase. Visible particles keep drifting out
    /// while they fade; nearly invisible ones are wrapped, bounced or reset.
    /// Returns true when the particle was reset.
    fn cross_edges<R: Rng + ?Sized>(&mut self, next: Vec2, bounds: Vec2, rng: &mut R) -> bool {
        let visible = self.opacity > PARTICLE_RECYCLE_OPACITY;
        let leaving = next.x > bounds.x + RIGHT_EXIT_MARGIN
            || next.x < -EDGE_EXIT_MARGIN
            || next.y < -EDGE_EXIT_MARGIN
            || next.y > bounds.y + EDGE_EXIT_MARGIN;
        if !leaving {
            self.pos = next;
            return false;
        }
        if visible {
            self.enter_fade_out();
            if next.x < -EDGE_EXIT_MARGIN {
                self.vel.x *= 1.1;
            }
            self.pos = next;
            return false;
        }

        if next.x > bounds.x + RIGHT_EXIT_MARGIN {
            // Right edge teleports to the left with a rightward push.
            self.pos.x = -10.0;
            if rng.gen::<f32>() < RIGHT_EDGE_RESCATTER_CHANCE {
                self.pos.y = rng.gen::<f32>() * bounds.y;
            }
            self.vel.x = 0.15 + rng.gen::<f32>() * 0.25;
            self.vel.y += centered(rng) * 0.1;
            self.revive();
            log::debug!(
                "[particle] wrapped right->left at ({:.1},{:.1}) v=({:.2},{:.2})",
                self.pos.x,
                self.pos.y,
                self.vel.x,
                self.vel.y
            );
            false
        } else if next.x < -EDGE_EXIT_MARGIN {
            if rng.gen::<f32>() < LEFT_EDGE_RESET_CHANCE {
                self.reset(bounds, rng);
                return true;
            }
            self.vel.x = 0.2 + rng.gen::<f32>() * 0.2;
            self.pos.y += centered(rng) * 5.0;
            self.revive();
            false
        } else {
            let top = next.y < -EDGE_EXIT_MARGIN;
            if rng.gen::<f32>() < VERTICAL_BOUNCE_CHANCE {
                if top {
                    self.vel.y = self.vel.y.abs() * 0.5;
                    self.pos.y = 0.0;
                } else {
                    self.vel.y = -self.vel.y.abs() * 0.5;
                    self.pos.y = bounds.y;
                }
                self.vel.x += centered(rng) * 0.1;
                self.revive();
                false
            } else {
                self.reset(bounds, rng);
                true
            }
        }
    }

    /// Fast phase: zone-dependent drag, random impulses, hard wraps.
    /// Returns false when the particle was reset.
    fn drift<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) -> bool {
        let it = self.individual_time;
        let scale = 0.003 + (it * 0.001).sin() * 0.0005;
        let nx = field_noise(self.pos.x * scale, it * 0.003) * 0.7;
        let ny = field_noise(it * 0.004, self.pos.y * scale) * 0.7;
        let pulse = (it * 0.02).sin() * rng.gen::<f32>() * 0.03;

        if self.pos.x < LEFT_ZONE {
            if self.vel.x <= 0.0 {
                self.vel.x = 0.3 + rng.gen::<f32>() * 0.4;
            } else {
                self.vel.x += nx.abs() * 0.03 + pulse;
                self.vel.x *= 0.98;
            }
        } else if self.pos.x < NEAR_LEFT_ZONE {
            self.vel.x += nx * 0.07 + pulse;
            if self.vel.x.abs() < 0.1 {
                self.vel.x += rng.gen::<f32>() * 0.2 - 0.05;
            }
            self.vel.x *= 0.97;
        } else {
            self.vel.x += nx * 0.1 + pulse;
            if rng.gen::<f32>() < DRIFT_KICK_X_CHANCE {
                self.vel.x += centered(rng) * 0.3;
            }
            self.vel.x *= 0.96;
        }

        self.vel.y += ny * 0.1;
        if rng.gen::<f32>() < DRIFT_KICK_Y_CHANCE {
            self.vel.y += centered(rng) * 0.25;
        }
        self.vel.y *= 0.96;
        self.vel = self.vel.clamp_length_max(PARTICLE_MAX_SPEED);

        let next = self.pos + self.vel;
        if next.x > bounds.x + EDGE_EXIT_MARGIN {
            self.pos.x = -5.0;
            self.vel.x = 0.7 + rng.gen::<f32>() * 0.7;
            self.pos.y += self.vel.y + centered(rng) * 5.0;
            self.vel.y += centered(rng) * 0.2;
        } else if next.x < -EDGE_EXIT_MARGIN {
            self.reset(bounds, rng);
            return false;
        } else {
            self.pos = next;
        }

        if self.pos.y < -EDGE_EXIT_MARGIN {
            self.pos.y = bounds.y + rng.gen::<f32>() * 10.0;
            self.vel.x += centered(rng) * 0.3;
        }
        if self.pos.y > bounds.y + EDGE_EXIT_MARGIN {
            self.pos.y = -5.0 - rng.gen::<f32>() * 10.0;
            self.vel.x += centered(rng) * 0.3;
        }
        true
    }

    fn resize_for_age<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let it = self.individual_time;
        let ratio = self.life / self.max_life;
        let variation = (it * 0.05).sin() * 0.15;
        if ratio < 0.2 {
            self.size = self.base_size * ease_out_quint(ratio * 5.0) * (1.0 + variation);
            self.glow_size = self.size * (6.0 + rng.gen::<f32>() * 0.5);
        } else if ratio > 0.8 {
            self.size = self.base_size * ease_out_quint((1.0 - ratio) * 5.0) * (1.0 + variation);
            self.glow_size = self.size * (6.0 + rng.gen::<f32>() * 0.5);
        } else {
            self.size = self.base_size * (1.0 + variation);
            self.glow_size = self.size * (6.0 + (it * 0.03).sin() * 0.8);
        }
    }

    /// Push away from the pointer with a slight swirl, and swell.
    fn push_from<R: Rng + ?Sized>(&mut self, pointer: &Pointer, rng: &mut R) {
        let Some(inf) = pointer.influence(self.pos) else {
            return;
        };
        let force = inf.falloff * (0.2 + rng.gen::<f32>() * 0.05);
        let (sin, cos) = inf.offset.y.atan2(inf.offset.x).sin_cos();
        let d = inf.offset;
        self.vel.x += (d.x * cos - d.y * sin * POINTER_ROTATION) * force;
        self.vel.y += (d.y * cos + d.x * sin * POINTER_ROTATION) * force;
        self.size += self.base_size * force * (1.0 + rng.gen::<f32>() * 0.3);
        self.glow_size = self.size * (6.0 + rng.gen::<f32>());
    }

    /// Recycle in place at an entry zone, heading back into view.
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) {
        let (w, h) = (bounds.x, bounds.y);
        let (pos, mut vel) = if rng.gen::<f32>() < MAIN_ZONE_CHANCE {
            match rng.gen_range(0..3u8) {
                0 => {
                    // top, slightly center-weighted
                    let x = 20.0 + rng.gen::<f32>().powf(0.8) * (w - 40.0);
                    let y = -10.0 - rng.gen::<f32>() * 15.0;
                    let vy = 0.3 + rng.gen::<f32>() * 0.7;
                    let vx = centered(rng) * 1.2;
                    (Vec2::new(x, y), Vec2::new(vx, vy))
                }
                1 => {
                    // right
                    let x = w + 5.0 + rng.gen::<f32>() * 15.0;
                    let center_bias = (rng.gen::<f32>() + rng.gen::<f32>()) / 2.0;
                    let vx = -(0.4 + rng.gen::<f32>() * 0.8);
                    let mut vy = centered(rng) * 0.9;
                    if rng.gen::<f32>() < 0.1 {
                        vy *= 2.0;
                    }
                    (Vec2::new(x, center_bias * h), Vec2::new(vx, vy))
                }
                _ => {
                    // bottom
                    let x = w * (0.1 + 0.8 * rng.gen::<f32>());
                    let y = h + 5.0 + rng.gen::<f32>() * 15.0;
                    let vy = -(0.3 + rng.gen::<f32>() * 0.7);
                    let vx = centered(rng) * 1.2;
                    (Vec2::new(x, y), Vec2::new(vx, vy))
                }
            }
        } else if rng.gen::<f32>() < SPECIAL_INTERIOR_CHANCE {
            let x = SPECIAL_INTERIOR_MIN_X + rng.gen::<f32>() * (w - 120.0);
            let y = rng.gen::<f32>() * h;
            let angle = rng.gen::<f32>() * TAU;
            let speed = 0.2 + rng.gen::<f32>() * 0.5;
            (Vec2::new(x, y), Vec2::from_angle(angle) * speed)
        } else {
            // diagonal, right-top or right-bottom
            let from_top = rng.gen::<f32>() < 0.5;
            let x = w * (0.7 + 0.3 * rng.gen::<f32>());
            let y = if from_top {
                -10.0 - rng.gen::<f32>() * 10.0
            } else {
                h + 10.0 + rng.gen::<f32>() * 10.0
            };
            let vx = -(0.2 + rng.gen::<f32>() * 0.4);
            let vy = 0.3 + rng.gen::<f32>() * 0.5;
            (Vec2::new(x, y), Vec2::new(vx, if from_top { vy } else { -vy }))
        };

        if vel.x.abs() < RESPAWN_MIN_SPEED_X {
            let sign = if vel.x == 0.0 { 1.0 } else { vel.x.signum() };
            vel.x = sign * (0.2 + rng.gen::<f32>() * 0.2);
        }

        let mut pos = pos;
        // Never respawn inside the left margin.
        if pos.x < 0.0 {
            pos.x = w * 0.7 + rng.gen::<f32>() * (w * 0.3);
            vel.x = -(0.3 + rng.gen::<f32>() * 0.5);
        }

        self.pos = pos;
        self.vel = vel;
        self.base_size = 0.8 + rng.gen::<f32>() * 2.5;
        self.life = 0.0;
        self.max_life = PARTICLE_MAX_LIFE_MIN + rng.gen::<f32>() * PARTICLE_MAX_LIFE_SPAN;
        self.fade_speed = 0.007 + rng.gen::<f32>() * 0.007;
        self.size = self.base_size * 0.5;
        self.glow_size = self.base_size * 2.0;
        self.opacity = PARTICLE_SPAWN_OPACITY;

        log::debug!(
            "[particle] reset at ({:.1},{:.1}) v=({:.2},{:.2})",
            self.pos.x,
            self.pos.y,
            self.vel.x,
            self.vel.y
        );
    }

    /// Soft glow disc, then the brighter core.
    pub fn draw<S: Surface + ?Sized>(&self, palette: &Palette, surface: &mut S) {
        let glow = Paint::Solid(palette.rgba(self.slot, palette.particle_glow_alpha));
        surface.fill_circle(
            self.pos,
            self.glow_size,
            &glow,
            DrawStyle::normal(self.opacity * 0.4),
        );
        let core = Paint::Solid(palette.rgba(self.slot, 1.0));
        surface.fill_circle(self.pos, self.size, &core, DrawStyle::normal(self.opacity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn at<R: Rng>(rng: &mut R, pos: Vec2, vel: Vec2, opacity: f32) -> Particle {
        let mut p = Particle::spawn(BOUNDS, Some(pos), rng);
        p.vel = vel;
        p.opacity = opacity;
        p.life = 100.0;
        p.max_life = 300.0;
        p
    }

    #[test]
    fn right_exit_uses_narrower_margin() {
        let mut rng = StdRng::seed_from_u64(1);
        let inside = Vec2::new(BOUNDS.x + RIGHT_EXIT_MARGIN - 1.0, 300.0);
        let mut p = at(&mut rng, Vec2::new(810.0, 300.0), Vec2::X, 0.1);
        assert!(!p.cross_edges(inside, BOUNDS, &mut rng));
        assert_eq!(p.pos, inside);
        assert_eq!(p.life, 100.0);
    }

    #[test]
    fn faint_particle_leaving_right_wraps_to_left() {
        let mut rng = StdRng::seed_from_u64(2);
        let next = Vec2::new(BOUNDS.x + RIGHT_EXIT_MARGIN + 5.0, 300.0);
        for _ in 0..200 {
            let mut p = at(&mut rng, Vec2::new(820.0, 300.0), Vec2::new(1.0, 0.0), 0.1);
            assert!(!p.cross_edges(next, BOUNDS, &mut rng));
            assert_eq!(p.pos.x, -10.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= BOUNDS.y);
            assert!(p.vel.x >= 0.15 && p.vel.x < 0.4, "vx {}", p.vel.x);
            assert_eq!(p.life, 0.0);
            assert_eq!(p.opacity, PARTICLE_SPAWN_OPACITY);
        }
    }

    #[test]
    fn faint_particle_leaving_left_mostly_resets() {
        let mut rng = StdRng::seed_from_u64(3);
        let next = Vec2::new(-EDGE_EXIT_MARGIN - 5.0, 300.0);
        let n = 2_000;
        let mut resets = 0;
        for _ in 0..n {
            let mut p = at(&mut rng, Vec2::new(-20.0, 300.0), Vec2::new(-1.0, 0.0), 0.1);
            let reset = p.cross_edges(next, BOUNDS, &mut rng);
            assert_eq!(p.life, 0.0);
            if reset {
                resets += 1;
                assert!(p.pos.x >= 0.0);
            } else {
                // Kicked back to the right in place.
                assert_eq!(p.pos.x, -20.0);
                assert!((p.pos.y - 300.0).abs() <= 2.5);
                assert!(p.vel.x >= 0.2 && p.vel.x < 0.4, "vx {}", p.vel.x);
                assert_eq!(p.opacity, PARTICLE_SPAWN_OPACITY);
            }
        }
        let share = resets as f32 / n as f32;
        assert!((share - LEFT_EDGE_RESET_CHANCE).abs() < 0.05, "reset share {share}");
    }

    #[test]
    fn faint_particle_leaving_top_or_bottom_bounces_or_resets() {
        let mut rng = StdRng::seed_from_u64(4);
        let n = 2_000;
        let mut bounces = 0;
        for i in 0..n {
            let top = i % 2 == 0;
            let (pos, vel, next) = if top {
                (Vec2::new(400.0, -20.0), Vec2::new(0.0, -0.8), Vec2::new(400.0, -35.0))
            } else {
                (Vec2::new(400.0, 620.0), Vec2::new(0.0, 0.8), Vec2::new(400.0, 635.0))
            };
            let mut p = at(&mut rng, pos, vel, 0.1);
            let reset = p.cross_edges(next, BOUNDS, &mut rng);
            assert_eq!(p.life, 0.0);
            if reset {
                continue;
            }
            bounces += 1;
            if top {
                assert_eq!(p.pos.y, 0.0);
                assert!((p.vel.y - 0.4).abs() < 1e-6);
            } else {
                assert_eq!(p.pos.y, BOUNDS.y);
                assert!((p.vel.y + 0.4).abs() < 1e-6);
            }
            assert!(p.vel.x.abs() <= 0.05);
        }
        let share = bounces as f32 / n as f32;
        assert!((share - VERTICAL_BOUNCE_CHANCE).abs() < 0.05, "bounce share {share}");
    }

    #[test]
    fn visible_particle_drifts_out_while_fading() {
        let mut rng = StdRng::seed_from_u64(5);
        let next = Vec2::new(-EDGE_EXIT_MARGIN - 5.0, 300.0);
        let mut p = at(&mut rng, Vec2::new(-20.0, 300.0), Vec2::new(-1.0, 0.0), 0.5);
        assert!(!p.cross_edges(next, BOUNDS, &mut rng));
        assert_eq!(p.pos, next);
        assert_eq!(p.life, p.max_life - PARTICLE_FADE_OUT_TICKS);
        assert!((p.vel.x + 1.1).abs() < 1e-6);

        // Already fading: age is not pulled back.
        let mut q = at(&mut rng, Vec2::new(400.0, -20.0), Vec2::new(0.0, -1.0), 0.5);
        q.life = 280.0;
        assert!(!q.cross_edges(Vec2::new(400.0, -35.0), BOUNDS, &mut rng));
        assert_eq!(q.life, 280.0);
        assert_eq!(q.vel, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn stalled_particle_near_left_edge_starts_fading() {
        let mut rng = StdRng::seed_from_u64(6);
        let pointer = Pointer::default();
        let slow = STALL_SPEED / 3.0;
        let mut p = at(&mut rng, Vec2::new(10.0, 300.0), Vec2::new(slow, -slow), 0.5);
        p.life = 50.0;
        p.update(1.0, BOUNDS, &pointer, &mut rng);
        assert!(p.life >= p.max_life - PARTICLE_FADE_OUT_TICKS, "life {}", p.life);
        assert!(p.life < p.max_life);

        let mut q = at(&mut rng, Vec2::new(10.0, 300.0), Vec2::new(0.5, 0.0), 0.5);
        q.life = 50.0;
        q.update(1.0, BOUNDS, &pointer, &mut rng);
        assert!(q.life < 60.0, "life {}", q.life);
    }
}
