//! Collision detection over the live body set.

use crate::body::{Body, BodyId};
use crate::state::SystemState;

/// A detected collision between two bodies.
#[derive(Debug, Clone)]
pub struct CollisionEvent {
    /// Lower-indexed body of the pair.
    pub body_a: BodyId,
    /// Higher-indexed body of the pair.
    pub body_b: BodyId,
    /// Centre-to-centre separation at detection, metres.
    pub separation: f64,
    /// Threshold the pair fell inside, metres.
    pub threshold: f64,
}

/// Finds colliding pairs in the post-integration body set.
///
/// Implementations must report pairs in a stable, reproducible order:
/// when one body touches two others in the same step, the resolution
/// order (and therefore the outcome) must be identical across runs with
/// the same initial state.
pub trait CollisionDetector: Send + Sync {
    /// All colliding pairs for the current state.
    ///
    /// `max_proximity` widens (or, when negative, narrows) the contact
    /// threshold: a pair collides when
    /// `separation < radius_a + radius_b + max_proximity`. The comparison
    /// is strict: exact boundary contact is touching, not colliding.
    fn detect(&self, state: &SystemState, max_proximity: f64) -> Vec<CollisionEvent>;
}

fn check_pair(a: &Body, b: &Body, max_proximity: f64) -> Option<CollisionEvent> {
    let separation = a.distance_to(b);
    let threshold = a.radius + b.radius + max_proximity;

    if separation < threshold {
        Some(CollisionEvent {
            body_a: a.id,
            body_b: b.id,
            separation,
            threshold,
        })
    } else {
        None
    }
}

/// Direct O(N²) collision detector.
///
/// Checks every unordered pair `(i, j)` with `i < j` in ascending index
/// order, which is also the order of the returned events. Exact and
/// deterministic; the dominant cost at the body counts this crate
/// targets. A partitioned detector would implement the same trait.
///
/// # Examples
///
/// ```
/// use accretion::collisions::{CollisionDetector, DirectDetector};
/// use accretion::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut state = SystemState::new();
/// state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
/// state.add_body(20.0, 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::zeros());
///
/// let events = DirectDetector.detect(&state, 0.0);
/// assert_eq!(events.len(), 1);
/// assert!(events[0].separation < events[0].threshold);
/// ```
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn detect(&self, state: &SystemState, max_proximity: f64) -> Vec<CollisionEvent> {
        let n = state.bodies.len();

        (0..n)
            .flat_map(|i| {
                ((i + 1)..n).filter_map(move |j| {
                    check_pair(&state.bodies[i], &state.bodies[j], max_proximity)
                })
            })
            .collect()
    }
}
