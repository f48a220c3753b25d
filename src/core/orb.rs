//! Slow-drifting orbs of light that pulse while they live.

use super::centered;
use super::color::{Palette, PaletteSlot, Rgb, Rgba};
use super::constants::*;
use super::surface::{ColorStop, DrawStyle, Paint, Surface};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Orb visibility phase. Only ever advances, except that a faded-out orb is
/// reset back to `FadingIn`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeState {
    FadingIn,
    Steady,
    FadingOut,
}

/// Slow-drifting pulsing light source.
#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub slot: PaletteSlot,
    pub base_glow_size: f32,
    pub glow_size: f32,
    pub pulse_speed: f32,
    pub pulse_phase: f32,
    pub fade: FadeState,
    pub life: u32,
    pub max_life: u32,
    pub opacity: f32,
}

impl Orb {
    pub fn spawn<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        let mut orb = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 0.0,
            slot: PaletteSlot::Primary,
            base_glow_size: 0.0,
            glow_size: 0.0,
            pulse_speed: 0.0,
            pulse_phase: 0.0,
            fade: FadeState::FadingIn,
            life: 0,
            max_life: 0,
            opacity: 0.0,
        };
        orb.reroll(bounds, rng);
        orb.glow_size = orb.base_glow_size * 0.7;
        orb
    }

    /// Spawn with a random head start so a group doesn't fade in lockstep.
    pub fn staggered<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        let mut orb = Self::spawn(bounds, rng);
        orb.life = rng.gen_range(0..ORB_STAGGER_MAX_AGE);
        orb.opacity = ORB_STAGGER_OPACITY_CAP.min(orb.life as f32 / ORB_FADE_IN_TICKS);
        orb.fade = if orb.opacity >= ORB_STAGGER_OPACITY_CAP {
            FadeState::Steady
        } else {
            FadeState::FadingIn
        };
        orb
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) {
        self.reroll(bounds, rng);
        self.glow_size = self.base_glow_size * 0.6;
    }

    fn reroll<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) {
        self.pos = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        self.life = 0;
        self.max_life = rng.gen_range(500..1000);
        self.fade = FadeState::FadingIn;
        self.opacity = 0.1;
        self.slot = PaletteSlot::pick(rng.gen(), ORB_SLOT_THRESHOLDS);
        self.size = 2.0 + rng.gen::<f32>() * 3.0;
        self.base_glow_size = self.size * 6.0;
        self.vel = Vec2::new(centered(rng) * 0.1, centered(rng) * 0.1);
        self.pulse_speed = 0.01 + rng.gen::<f32>() * 0.01;
        self.pulse_phase = rng.gen::<f32>() * TAU;
    }

    pub fn update<R: Rng + ?Sized>(&mut self, time: f32, bounds: Vec2, rng: &mut R) {
        self.life += 1;
        let age = self.life as f32;

        match self.fade {
            FadeState::FadingIn => {
                self.opacity = ORB_MAX_OPACITY.min(age / ORB_FADE_IN_TICKS);
                if self.opacity >= ORB_MAX_OPACITY {
                    self.fade = FadeState::Steady;
                }
            }
            FadeState::Steady => {
                // Pulses within [max - depth, max].
                let wave = 0.5 + 0.5 * (time * 0.0008 + self.pulse_phase).sin();
                self.opacity = ORB_MAX_OPACITY - wave * ORB_PULSE_DEPTH;
                if age > self.max_life as f32 - ORB_FADE_OUT_TICKS {
                    self.fade = FadeState::FadingOut;
                }
            }
            FadeState::FadingOut => {
                self.opacity = ((self.max_life as f32 - age) / ORB_FADE_OUT_TICKS)
                    .clamp(0.0, ORB_MAX_OPACITY);
                if self.opacity <= ORB_RESET_OPACITY {
                    self.reset(bounds, rng);
                    return;
                }
            }
        }

        let target = self.base_glow_size
            * (0.8 + (time * self.pulse_speed * 0.5 + self.pulse_phase).sin() * 0.15);
        self.glow_size =
            self.glow_size * ORB_GLOW_SMOOTHING + target * (1.0 - ORB_GLOW_SMOOTHING);

        let wobble = Vec2::new(
            (time * 0.0005 + self.pulse_phase).sin(),
            (time * 0.0005 + self.pulse_phase).cos(),
        );
        self.pos += self.vel * 0.5 + wobble * 0.1;
        self.wrap(bounds);
    }

    /// Toroidal wrap with a glow-sized margin so the halo leaves fully first.
    fn wrap(&mut self, bounds: Vec2) {
        let m = self.glow_size;
        if self.pos.x < -m {
            self.pos.x = bounds.x + m;
        }
        if self.pos.x > bounds.x + m {
            self.pos.x = -m;
        }
        if self.pos.y < -m {
            self.pos.y = bounds.y + m;
        }
        if self.pos.y > bounds.y + m {
            self.pos.y = -m;
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, palette: &Palette, surface: &mut S) {
        let style = DrawStyle::screen(self.opacity);
        let halo = Paint::Radial {
            center: self.pos,
            radius: self.glow_size,
            stops: [
                ColorStop::new(0.0, palette.rgba(self.slot, palette.orb_center_alpha)),
                ColorStop::new(0.3, palette.rgba(self.slot, palette.orb_mid_alpha)),
                ColorStop::new(1.0, Rgba::TRANSPARENT_WHITE),
            ],
        };
        surface.fill_circle(self.pos, self.glow_size, &halo, style);
        let core = Paint::Solid(Rgb::WHITE.with_alpha(1.0));
        surface.fill_circle(self.pos, self.size, &core, style);
    }
}
