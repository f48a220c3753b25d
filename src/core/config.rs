use super::constants::*;

/// Runtime knobs for a [`Field`](super::Field). Defaults reproduce the header
/// animation as shipped.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub max_particles: usize,
    /// Upper bound on live particles including explosion debris.
    pub particle_capacity: usize,
    pub particle_batch_size: usize,
    pub particle_batch_delay_ms: u32,
    pub orb_spawn_delay_ms: u32,
    pub beam_count: usize,
    pub orb_count_min: usize,
    pub orb_count_max: usize,
    pub pointer_radius: f32,
    pub explosion_count: usize,
    pub frame_interval_ms: f64,
    /// Fixed animation-time increment per rendered frame.
    pub time_step: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
            particle_capacity: PARTICLE_POOL_CAPACITY,
            particle_batch_size: PARTICLE_BATCH_SIZE,
            particle_batch_delay_ms: PARTICLE_BATCH_DELAY_MS,
            orb_spawn_delay_ms: ORB_SPAWN_DELAY_MS,
            beam_count: BEAM_COUNT,
            orb_count_min: ORB_COUNT_MIN,
            orb_count_max: ORB_COUNT_MAX,
            pointer_radius: POINTER_RADIUS,
            explosion_count: EXPLOSION_COUNT,
            frame_interval_ms: FRAME_INTERVAL_MS,
            time_step: TIME_STEP,
        }
    }
}
