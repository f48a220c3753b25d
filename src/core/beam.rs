//! Translucent light wedges hanging from above the surface.

use super::centered;
use super::color::{Palette, PaletteSlot, Rgba};
use super::constants::*;
use super::surface::{ColorStop, DrawStyle, Paint, Surface};
use glam::Vec2;
use rand::prelude::*;

/// Translucent light wedge hanging down from above the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub origin: Vec2,
    pub target: Vec2,
    pub width: f32,
    pub length: f32,
    pub angle: f32,
    pub speed: f32,
    pub slot: PaletteSlot,
}

impl Beam {
    pub fn spawn<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        let mut beam = Self {
            origin: Vec2::ZERO,
            target: Vec2::ZERO,
            width: 0.0,
            length: 0.0,
            angle: BEAM_BASE_ANGLE,
            speed: 0.0,
            slot: PaletteSlot::Primary,
        };
        beam.reset(bounds, rng);
        beam
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) {
        self.origin = Vec2::new(rng.gen::<f32>() * bounds.x, -BEAM_OFFSCREEN);
        self.target = Vec2::new(rng.gen::<f32>() * bounds.x, bounds.y + BEAM_OFFSCREEN);
        self.width = 20.0 + rng.gen::<f32>() * 30.0;
        self.length = bounds.y * BEAM_LENGTH_SCALE;
        self.slot = PaletteSlot::pick(rng.gen(), PARTICLE_SLOT_THRESHOLDS);
        self.angle = BEAM_BASE_ANGLE + centered(rng) * BEAM_ANGLE_JITTER;
        self.speed = 0.0005 + rng.gen::<f32>() * 0.0008;
    }

    pub fn update<R: Rng + ?Sized>(&mut self, time: f32, bounds: Vec2, rng: &mut R) {
        self.origin.x += (time * self.speed * 0.5).sin() * 0.3;
        self.angle = BEAM_BASE_ANGLE + (time * self.speed * 0.3).sin() * BEAM_ANGLE_SWAY;
        if rng.gen::<f32>() < BEAM_RESET_CHANCE {
            self.reset(bounds, rng);
        }
    }

    /// Unit vector the beam points along.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Apex at the origin, widening to `width` at `length` along `angle`.
    pub fn wedge(&self) -> [Vec2; 3] {
        let dir = self.direction();
        let across = dir.perp() * (self.width / 2.0);
        let far = self.origin + dir * self.length;
        [self.origin, far - across, far + across]
    }

    pub fn draw<S: Surface + ?Sized>(&self, palette: &Palette, surface: &mut S) {
        let paint = Paint::Linear {
            from: self.origin,
            to: self.origin + self.direction() * self.length,
            stops: [
                ColorStop::new(0.0, palette.rgba(self.slot, palette.beam_base_alpha)),
                ColorStop::new(0.4, palette.rgba(self.slot, palette.beam_glow_alpha)),
                ColorStop::new(1.0, Rgba::TRANSPARENT_WHITE),
            ],
        };
        surface.fill_triangle(self.wedge(), &paint, DrawStyle::screen(1.0));
    }
}
