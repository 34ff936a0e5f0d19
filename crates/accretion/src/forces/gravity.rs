//! Direct pairwise Newtonian gravity.

use nalgebra::Vector3;

use crate::body::Body;
use crate::forces::ForceModel;
use crate::state::SystemState;

/// Absolute floor on the separation used in the force law, metres. Only
/// relevant when the configured surface floor comes out non-positive.
const MIN_SEPARATION: f64 = 1.0e-6;

/// O(N²) Newtonian gravity with a proximity-clamped separation.
///
/// The acceleration on body `i` from body `j` has magnitude
/// `g · m_j / d²` along the line of centres, where `d` is the real
/// separation clamped from below to
/// `radius_i + radius_j + proximity_floor`. The clamp keeps close
/// encounters from producing force spikes the integrator cannot absorb.
/// Exactly coincident centres have no usable direction and fall back to
/// the canonical +x axis, so even a degenerate pair resolves
/// deterministically.
///
/// # Examples
///
/// ```
/// use accretion::forces::{DirectGravity, ForceModel};
/// use accretion::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut state = SystemState::new();
/// state.add_body(1.0e24, 1.0e6, Point3::origin(), Vector3::zeros());
/// state.add_body(1.0e24, 1.0e6, Point3::new(1.0e9, 0.0, 0.0), Vector3::zeros());
///
/// let gravity = DirectGravity::new(6.67408e-11, 0.0);
/// let accel = gravity.acceleration(0, &state);
/// assert!(accel.x > 0.0); // pulled toward the other body
/// ```
pub struct DirectGravity {
    /// Gravitational constant, m³ kg⁻¹ s⁻².
    pub g: f64,
    /// Surface-to-surface floor added to the radii sum when clamping, m.
    pub proximity_floor: f64,
}

impl DirectGravity {
    pub fn new(g: f64, proximity_floor: f64) -> Self {
        Self { g, proximity_floor }
    }

    /// Smallest separation a pair is allowed to have in the force law.
    fn floor_for(&self, a: &Body, b: &Body) -> f64 {
        (a.radius + b.radius + self.proximity_floor).max(MIN_SEPARATION)
    }
}

impl ForceModel for DirectGravity {
    fn acceleration(&self, idx: usize, state: &SystemState) -> Vector3<f64> {
        let body = &state.bodies[idx];

        state
            .bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, other)| {
                let dr = other.position - body.position;
                let dist2 = dr.magnitude_squared();
                let dir = if dist2 > 0.0 {
                    dr / dist2.sqrt()
                } else {
                    // Coincident centres: canonical fallback direction.
                    Vector3::x()
                };
                let d = dist2.sqrt().max(self.floor_for(body, other));
                dir * (self.g * other.mass / (d * d))
            })
            .fold(Vector3::zeros(), |acc, a| acc + a)
    }
}
