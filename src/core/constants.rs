//! Simulation tuning constants. Fade envelopes, palette weights and reset
//! probabilities all key off these.

use std::f32::consts::FRAC_PI_2;

// ---------------- Palette weights ----------------
// Cumulative thresholds for a uniform roll. Particles and beams split
// 60/30/10 across primary/secondary/tertiary, orbs 50/35/15.
pub const PARTICLE_SLOT_THRESHOLDS: [f32; 2] = [0.6, 0.9];
pub const ORB_SLOT_THRESHOLDS: [f32; 2] = [0.5, 0.85];

// Glow alpha levels shared by both themes
pub const PARTICLE_GLOW_ALPHA: f32 = 0.3;
pub const BEAM_GLOW_ALPHA: f32 = 0.15;
pub const BEAM_BASE_ALPHA: f32 = 0.8;
pub const ORB_CENTER_ALPHA: f32 = 0.7;
pub const ORB_MID_ALPHA: f32 = 0.2;

// ---------------- Particle ----------------
pub const PARTICLE_MAX_SPEED: f32 = 2.0;
pub const PARTICLE_MIN_SIZE: f32 = 0.1;
pub const PARTICLE_SPAWN_OPACITY: f32 = 0.1;

// Lifetime range (ticks)
pub const PARTICLE_MAX_LIFE_MIN: f32 = 150.0;
pub const PARTICLE_MAX_LIFE_SPAN: f32 = 200.0;

// Fade envelope
pub const PARTICLE_FADE_IN_TICKS: f32 = 40.0;
pub const PARTICLE_FADE_OUT_TICKS: f32 = 60.0;
pub const PARTICLE_PEAK_OPACITY: f32 = 0.7;
pub const PARTICLE_STEADY_OPACITY: f32 = 0.65;
pub const PARTICLE_STEADY_WOBBLE: f32 = 0.05;

// Anything with opacity at or below this may be recycled at an edge
pub const PARTICLE_RECYCLE_OPACITY: f32 = 0.2;

// Horizontal zones, measured from the left edge (px)
pub const LEFT_ZONE: f32 = 50.0;
pub const NEAR_LEFT_ZONE: f32 = 100.0;
pub const STALL_SPEED: f32 = 0.03;

// Boundary margins (px)
pub const RIGHT_EXIT_MARGIN: f32 = 20.0;
pub const EDGE_EXIT_MARGIN: f32 = 30.0;

// Edge recycling odds
pub const LEFT_EDGE_RESET_CHANCE: f32 = 0.7;
pub const VERTICAL_BOUNCE_CHANCE: f32 = 0.5;
pub const RIGHT_EDGE_RESCATTER_CHANCE: f32 = 0.2;

// Respawn zones
pub const MAIN_ZONE_CHANCE: f32 = 0.8;
pub const SPECIAL_INTERIOR_CHANCE: f32 = 0.5;
pub const SPECIAL_INTERIOR_MIN_X: f32 = 100.0;
pub const RESPAWN_MIN_SPEED_X: f32 = 0.2;

// Drift phase impulses
pub const DRIFT_KICK_X_CHANCE: f32 = 0.01;
pub const DRIFT_KICK_Y_CHANCE: f32 = 0.02;

// Pointer push
pub const POINTER_ROTATION: f32 = 0.2;

// ---------------- Explosion ----------------
pub const EXPLOSION_COUNT: usize = 15;
pub const EXPLOSION_OPACITY: f32 = 0.6;
pub const EXPLOSION_MAX_LIFE_MIN: f32 = 60.0;
pub const EXPLOSION_MAX_LIFE_SPAN: f32 = 30.0;

// ---------------- Beam ----------------
pub const BEAM_COUNT: usize = 3;
pub const BEAM_RESET_CHANCE: f32 = 0.001;
pub const BEAM_BASE_ANGLE: f32 = FRAC_PI_2;
pub const BEAM_ANGLE_JITTER: f32 = 0.4;
pub const BEAM_ANGLE_SWAY: f32 = 0.1;
pub const BEAM_OFFSCREEN: f32 = 100.0;
pub const BEAM_LENGTH_SCALE: f32 = 1.5;

// ---------------- Orb ----------------
pub const ORB_COUNT_MIN: usize = 5;
pub const ORB_COUNT_MAX: usize = 7;
pub const ORB_MAX_OPACITY: f32 = 0.85;
pub const ORB_PULSE_DEPTH: f32 = 0.05;
pub const ORB_FADE_IN_TICKS: f32 = 80.0;
pub const ORB_FADE_OUT_TICKS: f32 = 100.0;
pub const ORB_RESET_OPACITY: f32 = 0.05;
pub const ORB_GLOW_SMOOTHING: f32 = 0.8; // new = 0.8 * old + 0.2 * target
pub const ORB_STAGGER_MAX_AGE: u32 = 200;
pub const ORB_STAGGER_OPACITY_CAP: f32 = 0.5;

// ---------------- Driver ----------------
pub const MAX_PARTICLES: usize = 100;
pub const PARTICLE_POOL_CAPACITY: usize = 400;
pub const PARTICLE_BATCH_SIZE: usize = 10;
pub const PARTICLE_BATCH_DELAY_MS: u32 = 100;
pub const ORB_SPAWN_DELAY_MS: u32 = 300;
pub const POINTER_RADIUS: f32 = 150.0;
pub const TARGET_FPS: f64 = 60.0;
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / TARGET_FPS;
pub const TIME_STEP: f32 = 0.2;

// Initial spread: staggered starting ages so batches don't peak together
pub const INIT_MAX_AGE: u32 = 30;
pub const INIT_OPACITY_SCALE: f32 = 0.6;
pub const INIT_LEFT_CLEARANCE: f32 = 20.0;
