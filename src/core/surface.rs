//! Drawing seam between the simulation and whatever displays it.
//!
//! Entities only read their own state when drawing; the browser binding
//! implements [`Surface`] over a 2D canvas context and tests implement it with
//! a recorder.

use super::color::Rgba;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Blend {
    #[default]
    Normal,
    /// Lightens overlapping draws ("screen" composite).
    Screen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: [ColorStop; 3],
    },
    Radial {
        center: Vec2,
        radius: f32,
        stops: [ColorStop; 3],
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawStyle {
    pub alpha: f32,
    pub blend: Blend,
}

impl DrawStyle {
    #[inline]
    pub const fn normal(alpha: f32) -> Self {
        Self {
            alpha,
            blend: Blend::Normal,
        }
    }

    #[inline]
    pub const fn screen(alpha: f32) -> Self {
        Self {
            alpha,
            blend: Blend::Screen,
        }
    }
}

pub trait Surface {
    /// Wipe the whole drawable area.
    fn clear(&mut self, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, style: DrawStyle);
    fn fill_triangle(&mut self, points: [Vec2; 3], paint: &Paint, style: DrawStyle);
}
