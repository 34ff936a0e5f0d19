//! The simulation loop.
//!
//! One [`Simulation`] owns its configuration and body set and advances
//! them one fixed timestep at a time: accumulate forces, integrate,
//! detect collisions, merge, publish a snapshot. Steps are atomic; a
//! failed step leaves the committed state exactly as it was.

use std::f64::consts::TAU;

use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::collisions::{resolve_collisions, CollisionDetector, DirectDetector};
use crate::config::{InstabilityPolicy, SimConfig};
use crate::error::{Error, Result};
use crate::forces::DirectGravity;
use crate::generation::spawn_system;
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::snapshot::Snapshot;
use crate::state::SystemState;

/// A self-contained simulation instance.
///
/// Single-threaded and strictly sequential: step `t+1` never begins
/// before step `t` has fully committed, and a run is deterministic given
/// the same configuration and seed.
///
/// # Examples
///
/// ```
/// use accretion::config::SimConfig;
/// use accretion::sim::Simulation;
///
/// let mut sim = Simulation::new(SimConfig::default(), 8, 42).unwrap();
/// let snapshot = sim.step().unwrap();
///
/// assert_eq!(snapshot.step, 1);
/// assert!(snapshot.time > 0.0);
/// ```
pub struct Simulation {
    config: SimConfig,
    state: SystemState,
    force: DirectGravity,
    integrator: SemiImplicitEuler,
    detector: DirectDetector,
    steps_taken: u64,
}

impl Simulation {
    /// Initialize with `body_count` randomly generated bodies.
    ///
    /// The configuration is validated before any state is built; `seed`
    /// makes the spawn, and therefore the whole run, reproducible.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] for a rejected configuration or an
    /// impossible placement. No partially initialized simulation is ever
    /// returned.
    pub fn new(config: SimConfig, body_count: usize, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let state = spawn_system(&config, body_count, &mut rng)?;
        Ok(Self::assemble(config, state))
    }

    /// Initialize from an explicitly assembled body set.
    ///
    /// Enforces the same invariants the spawner guarantees: positive
    /// finite mass and radius, finite kinematics, no coincident
    /// positions.
    pub fn from_state(config: SimConfig, state: SystemState) -> Result<Self> {
        config.validate()?;
        validate_bodies(&state)?;
        Ok(Self::assemble(config, state))
    }

    fn assemble(config: SimConfig, state: SystemState) -> Self {
        let force = DirectGravity::new(config.g_constant, config.max_proximity);
        let integrator = SemiImplicitEuler::with_speed_limit(config.max_velocity);
        Self {
            config,
            state,
            force,
            integrator,
            detector: DirectDetector,
            steps_taken: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Elapsed simulated seconds.
    pub fn time(&self) -> f64 {
        self.state.time
    }

    /// Steps committed so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Read-only view of the current body set.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.steps_taken)
    }

    /// Advance one timestep and return the committed snapshot.
    ///
    /// Phases run in a fixed order: force accumulation from the pre-step
    /// position snapshot, semi-implicit integration with the velocity
    /// ceiling, cosmetic spin advance, collision detection, merge
    /// resolution. With `updates_enabled` off, positions and velocities
    /// stay frozen while time and the collision pass still run; with
    /// `collisions_enabled` off, bodies may overlap without consequence.
    ///
    /// # Errors
    ///
    /// [`Error::NumericInstability`] when integration produced a
    /// non-finite position or velocity and the policy is
    /// [`InstabilityPolicy::Halt`]. The committed state is unchanged; the
    /// caller may adjust parameters and step again, or stop. The loop
    /// never auto-retries.
    pub fn step(&mut self) -> Result<Snapshot> {
        let dt = self.config.dt;

        // Work on a copy so a rejected step never leaks partial state.
        let mut working = self.state.clone();

        for body in working.bodies.iter_mut() {
            body.flash = false;
        }

        if self.config.updates_enabled {
            self.integrator.step(&mut working, dt, &self.force);

            if let Some(detail) = first_non_finite(&working) {
                match self.config.instability_policy {
                    InstabilityPolicy::Halt => {
                        return Err(Error::NumericInstability {
                            step: self.steps_taken + 1,
                            detail,
                        });
                    }
                    InstabilityPolicy::ClampAndContinue => {
                        restore_non_finite(&mut working, &self.state);
                    }
                }
            }
        } else {
            working.time += dt;
        }

        for body in working.bodies.iter_mut() {
            if let Some(spin) = body.spin.as_mut() {
                spin.angle = (spin.angle + spin.rate * dt) % TAU;
            }
        }

        if self.config.collisions_enabled {
            let events = self.detector.detect(&working, self.config.max_proximity);
            resolve_collisions(&mut working, events, self.config.color_on_impact);
        }

        self.state = working;
        self.steps_taken += 1;
        Ok(Snapshot::capture(&self.state, self.steps_taken))
    }
}

fn body_is_finite(body: &crate::body::Body) -> bool {
    body.position.coords.iter().all(|c| c.is_finite())
        && body.velocity.iter().all(|c| c.is_finite())
}

fn first_non_finite(state: &SystemState) -> Option<String> {
    state.bodies.iter().find_map(|body| {
        if body_is_finite(body) {
            None
        } else {
            Some(format!(
                "body {} has a non-finite position or velocity",
                body.id.0
            ))
        }
    })
}

/// Put every non-finite body back on its pre-step kinematics. Integration
/// changes neither the body count nor the order, so index pairing is
/// safe here.
fn restore_non_finite(working: &mut SystemState, committed: &SystemState) {
    for (body, prev) in working.bodies.iter_mut().zip(committed.bodies.iter()) {
        if !body_is_finite(body) {
            body.position = prev.position;
            body.velocity = prev.velocity;
        }
    }
}

fn validate_bodies(state: &SystemState) -> Result<()> {
    for body in &state.bodies {
        if !body.mass.is_finite() || body.mass <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "body {} mass must be positive and finite",
                body.id.0
            )));
        }
        if !body.radius.is_finite() || body.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "body {} radius must be positive and finite",
                body.id.0
            )));
        }
        if !body_is_finite(body) {
            return Err(Error::InvalidConfig(format!(
                "body {} position and velocity must be finite",
                body.id.0
            )));
        }
    }

    let n = state.bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            if state.bodies[i].position == state.bodies[j].position {
                return Err(Error::InvalidConfig(format!(
                    "bodies {} and {} occupy the same position",
                    state.bodies[i].id.0, state.bodies[j].id.0
                )));
            }
        }
    }

    Ok(())
}
