use super::constants::POINTER_RADIUS;
use glam::Vec2;

/// Pointer/touch state fed by the host's input events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub position: Option<Vec2>,
    pub active: bool,
    pub radius: f32,
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new(POINTER_RADIUS)
    }
}

/// How strongly the pointer acts on a point inside its radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Influence {
    /// Vector from the pointer to the point.
    pub offset: Vec2,
    pub distance: f32,
    /// `1 - distance / radius`, in (0, 1].
    pub falloff: f32,
}

impl Pointer {
    pub fn new(radius: f32) -> Self {
        Self {
            position: None,
            active: false,
            radius,
        }
    }

    #[inline]
    pub fn move_to(&mut self, at: Vec2) {
        self.position = Some(at);
    }

    #[inline]
    pub fn enter(&mut self) {
        self.active = true;
    }

    /// Leaving the surface clears both the flag and the last position.
    #[inline]
    pub fn leave(&mut self) {
        self.active = false;
        self.position = None;
    }

    pub fn influence(&self, at: Vec2) -> Option<Influence> {
        if !self.active {
            return None;
        }
        let offset = at - self.position?;
        let distance = offset.length();
        if distance >= self.radius {
            return None;
        }
        Some(Influence {
            offset,
            distance,
            falloff: 1.0 - distance / self.radius,
        })
    }
}
