//! Force models.
//!
//! [`ForceModel`] is the seam between the body set and whatever computes
//! per-body accelerations; [`DirectGravity`] is the O(N²) pairwise
//! implementation. A spatially partitioned or approximate method would
//! implement the same trait without touching the callers.

use nalgebra::Vector3;

use crate::state::SystemState;

pub mod gravity;


pub use gravity::DirectGravity;

/// A source of acceleration on bodies.
pub trait ForceModel: Send + Sync {
    /// Acceleration on the body at `idx` in m/s², computed from the given
    /// state only. Implementations must not mutate anything: every body
    /// in one pass sees the same position snapshot.
    fn acceleration(&self, idx: usize, state: &SystemState) -> Vector3<f64>;

    /// Accelerations for the whole body set against one consistent
    /// snapshot, one output slot per body.
    fn accelerations(&self, state: &SystemState) -> Vec<Vector3<f64>> {
        (0..state.bodies.len())
            .map(|i| self.acceleration(i, state))
            .collect()
    }
}
