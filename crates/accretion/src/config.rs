//! Immutable simulation configuration.
//!
//! Every physical constant, bound, and toggle lives in [`SimConfig`],
//! handed to the simulation at initialization. Nothing here is
//! process-wide state: independent instances can run side by side with
//! different parameters, and a config never changes after validation.

use rand::Rng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive `[min, max]` bounds for a sampled quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample within the bounds.
    pub fn sample(&self, rng: &mut ChaChaRng) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidConfig(format!("{name} bounds must be finite")));
        }
        if self.min > self.max {
            return Err(Error::InvalidConfig(format!(
                "{name} bounds inverted: {} > {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// What a step does when integration produces a non-finite value despite
/// the distance and velocity clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstabilityPolicy {
    /// Reject the step; the previously committed state stays visible.
    Halt,
    /// Restore the offending bodies' pre-step kinematics and keep going.
    ClampAndContinue,
}

/// Immutable parameters for one simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Universal gravitational constant, m³ kg⁻¹ s⁻².
    pub g_constant: f64,
    /// Fixed timestep in seconds.
    pub dt: f64,
    /// When false, positions and velocities stay frozen each step while
    /// the collision pass still runs.
    pub updates_enabled: bool,
    /// When false, bodies may overlap without consequence; the detector
    /// and resolver are skipped entirely.
    pub collisions_enabled: bool,
    /// Tint a merge product as recently collided.
    pub color_on_impact: bool,
    /// Surface-to-surface distance that still counts as a collision, and
    /// the separation floor applied in the force pass. Negative values
    /// demand genuine overlap before a merge.
    pub max_proximity: f64,
    /// Speed ceiling in m/s; faster velocities are rescaled onto it.
    pub max_velocity: f64,
    /// Cosmetic spin rate range, rad/s.
    pub spin_rate: Bounds,
    /// Spawn radius range, metres.
    pub init_radius: Bounds,
    /// Spawn mass range, kilograms.
    pub init_mass: Bounds,
    /// Farthest per-axis spawn distance from the origin, metres.
    pub init_max_position: f64,
    /// Fastest per-axis spawn speed, m/s.
    pub init_max_velocity: f64,
    /// Failure behavior for non-finite steps.
    pub instability_policy: InstabilityPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            g_constant: 6.67408e-11,
            dt: 150.0,
            updates_enabled: true,
            collisions_enabled: true,
            color_on_impact: false,
            max_proximity: 0.0,
            max_velocity: 670_560.0,
            spin_rate: Bounds::new(0.0, 0.0),
            init_radius: Bounds::new(1.0e6, 1.0e9),
            init_mass: Bounds::new(1.0e23, 1.0e30),
            init_max_position: 2.5e10,
            init_max_velocity: 1000.0,
            instability_policy: InstabilityPolicy::Halt,
        }
    }
}

impl SimConfig {
    /// Check every parameter before any state is built.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] naming the first offending field. No
    /// partially initialized simulation ever exists: this runs before any
    /// body is created.
    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if !self.g_constant.is_finite() || self.g_constant < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "g_constant must be non-negative and finite, got {}",
                self.g_constant
            )));
        }
        if !self.max_velocity.is_finite() || self.max_velocity <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_velocity must be positive and finite, got {}",
                self.max_velocity
            )));
        }
        if !self.max_proximity.is_finite() {
            return Err(Error::InvalidConfig(
                "max_proximity must be finite".to_string(),
            ));
        }

        self.init_radius.validate("init_radius")?;
        if self.init_radius.min <= 0.0 {
            return Err(Error::InvalidConfig(
                "init_radius bounds must be positive".to_string(),
            ));
        }
        self.init_mass.validate("init_mass")?;
        if self.init_mass.min <= 0.0 {
            return Err(Error::InvalidConfig(
                "init_mass bounds must be positive".to_string(),
            ));
        }
        self.spin_rate.validate("spin_rate")?;

        if !self.init_max_position.is_finite() || self.init_max_position < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "init_max_position must be non-negative and finite, got {}",
                self.init_max_position
            )));
        }
        if !self.init_max_velocity.is_finite() || self.init_max_velocity < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "init_max_velocity must be non-negative and finite, got {}",
                self.init_max_velocity
            )));
        }

        Ok(())
    }
}
