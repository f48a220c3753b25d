pub mod beam;
pub mod color;
pub mod config;
pub mod constants;
pub mod field;
pub mod orb;
pub mod pacing;
pub mod particle;
pub mod pointer;
pub mod pool;
pub mod surface;

pub use beam::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use field::*;
pub use orb::*;
pub use pacing::*;
pub use particle::*;
pub use pointer::*;
pub use pool::*;
pub use surface::*;

use rand::Rng;

/// Uniform sample in [-0.5, 0.5).
#[inline]
pub(crate) fn centered<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() - 0.5
}
