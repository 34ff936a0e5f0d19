//! Read-only snapshots for external consumers.
//!
//! Renderers, telemetry, and persistence layers consume the body set
//! through these value copies; nothing here can mutate the simulation.

use serde::Serialize;

use crate::body::Body;
use crate::state::SystemState;

/// One body's state, flattened for interop.
#[derive(Clone, Debug, Serialize)]
pub struct BodySnapshot {
    pub id: u32,
    /// Mass in kilograms.
    pub mass: f64,
    /// Radius in metres.
    pub radius: f64,
    /// Position in metres, origin-centred.
    pub position: [f64; 3],
    /// Velocity in m/s.
    pub velocity: [f64; 3],
    /// Cosmetic spin angle in radians, when the body carries spin.
    pub spin_angle: Option<f64>,
    /// True when the body merged this step and impact tinting is on.
    pub flash: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id.0,
            mass: body.mass,
            radius: body.radius,
            position: [body.position.x, body.position.y, body.position.z],
            velocity: [body.velocity.x, body.velocity.y, body.velocity.z],
            spin_angle: body.spin.map(|s| s.angle),
            flash: body.flash,
        }
    }
}

/// Full state of the simulation after a committed step.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    /// Elapsed simulated seconds.
    pub time: f64,
    /// Steps committed so far.
    pub step: u64,
    pub bodies: Vec<BodySnapshot>,
    /// Total mass in kilograms; conserved across merges.
    pub total_mass: f64,
    /// Total kinetic energy in joules.
    pub kinetic_energy: f64,
}

impl Snapshot {
    /// Capture the given state as a value copy.
    pub fn capture(state: &SystemState, step: u64) -> Self {
        Self {
            time: state.time,
            step,
            bodies: state.bodies.iter().map(BodySnapshot::from).collect(),
            total_mass: state.total_mass(),
            kinetic_energy: state.kinetic_energy(),
        }
    }
}
