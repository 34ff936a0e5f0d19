//! Seeded random initial-state generation.
//!
//! Spawns a body cloud within the configured bounds using a caller-owned
//! [`ChaChaRng`], so identical seeds reproduce identical systems.

use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::body::Spin;
use crate::config::{Bounds, SimConfig};
use crate::error::{Error, Result};
use crate::state::SystemState;

/// Attempts per body before giving up on a non-overlapping placement.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Log-uniform sample within bounds. The spawn ranges span several
/// decades, so a uniform draw would almost never produce small bodies.
fn sample_log_uniform(bounds: Bounds, rng: &mut ChaChaRng) -> f64 {
    if bounds.min == bounds.max {
        return bounds.min;
    }
    let log_min = bounds.min.ln();
    let log_max = bounds.max.ln();
    (log_min + rng.random::<f64>() * (log_max - log_min)).exp()
}

/// Uniform sample in `[-limit, +limit]` for one axis.
fn sample_axis(limit: f64, rng: &mut ChaChaRng) -> f64 {
    if limit == 0.0 {
        0.0
    } else {
        rng.random_range(-limit..=limit)
    }
}

/// Spawn `count` random bodies within the configured bounds.
///
/// Positions and velocities are sampled per axis (rectangular bounds),
/// radii and masses log-uniformly within their ranges. Placement rejects
/// positions that would overlap an already-placed body, so the returned
/// state never starts with coincident or intersecting bodies.
///
/// # Errors
///
/// [`Error::InvalidConfig`] when a non-overlapping placement cannot be
/// found, typically because the spawn volume is too crowded.
///
/// # Examples
///
/// ```
/// use accretion::config::SimConfig;
/// use accretion::generation::spawn_system;
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let mut rng = ChaChaRng::seed_from_u64(42);
/// let state = spawn_system(&SimConfig::default(), 10, &mut rng).unwrap();
///
/// assert_eq!(state.body_count(), 10);
/// ```
pub fn spawn_system(config: &SimConfig, count: usize, rng: &mut ChaChaRng) -> Result<SystemState> {
    let mut state = SystemState::new();

    for n in 0..count {
        let radius = sample_log_uniform(config.init_radius, rng);
        let mass = sample_log_uniform(config.init_mass, rng);

        let mut attempts = 0;
        let position = loop {
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                return Err(Error::InvalidConfig(format!(
                    "failed to place body {n} without overlap; \
                     reduce the body count or radii, or grow init_max_position"
                )));
            }
            attempts += 1;

            let candidate = Point3::new(
                sample_axis(config.init_max_position, rng),
                sample_axis(config.init_max_position, rng),
                sample_axis(config.init_max_position, rng),
            );
            let clear = state
                .bodies
                .iter()
                .all(|other| (candidate - other.position).magnitude() > radius + other.radius);
            if clear {
                break candidate;
            }
        };

        let velocity = Vector3::new(
            sample_axis(config.init_max_velocity, rng),
            sample_axis(config.init_max_velocity, rng),
            sample_axis(config.init_max_velocity, rng),
        );

        let id = state.add_body(mass, radius, position, velocity);
        if config.spin_rate.max > 0.0 {
            let spin = Spin {
                angle: rng.random::<f64>() * TAU,
                rate: config.spin_rate.sample(rng),
            };
            if let Some(body) = state.get_body_mut(id) {
                body.spin = Some(spin);
            }
        }
    }

    Ok(state)
}
