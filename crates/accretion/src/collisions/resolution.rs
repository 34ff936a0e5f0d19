//! Merge resolution for colliding pairs.
//!
//! Colliding bodies merge into a single replacement that conserves:
//! - total mass
//! - total momentum (perfectly inelastic collision)
//! - total volume at constant density

use std::collections::HashSet;

use crate::body::{Body, BodyId};
use crate::collisions::CollisionEvent;
use crate::state::SystemState;

/// Merge two bodies into their replacement.
///
/// The dominant body is the heavier one, ties broken by lower id. The
/// product:
/// - `mass = mass_a + mass_b`
/// - `velocity = (p_a + p_b) / mass`
/// - `position = dominant.position`: the smaller body is swallowed, not
///   averaged into a centre of mass
/// - `radius = (r_a³ + r_b³)^(1/3)`: combined volume at constant density
///
/// The product keeps the dominant body's id and cosmetic spin.
///
/// # Examples
///
/// ```
/// use accretion::body::{Body, BodyId};
/// use accretion::collisions::merge_bodies;
/// use nalgebra::{Point3, Vector3};
///
/// let a = Body {
///     id: BodyId(0),
///     mass: 10.0,
///     radius: 1.0,
///     position: Point3::origin(),
///     velocity: Vector3::zeros(),
///     spin: None,
///     flash: false,
/// };
/// let b = Body {
///     id: BodyId(1),
///     mass: 20.0,
///     radius: 1.0,
///     position: Point3::new(0.5, 0.0, 0.0),
///     velocity: Vector3::zeros(),
///     spin: None,
///     flash: false,
/// };
///
/// let merged = merge_bodies(&a, &b);
/// assert_eq!(merged.mass, 30.0);
/// assert_eq!(merged.position, b.position); // heavier body swallows
/// assert!((merged.radius - 2.0_f64.cbrt()).abs() < 1e-12);
/// ```
pub fn merge_bodies(a: &Body, b: &Body) -> Body {
    let (dominant, minor) = if a.mass > b.mass {
        (a, b)
    } else if b.mass > a.mass {
        (b, a)
    } else if a.id.0 <= b.id.0 {
        (a, b)
    } else {
        (b, a)
    };

    let mass = dominant.mass + minor.mass;

    Body {
        id: dominant.id,
        mass,
        radius: (dominant.radius.powi(3) + minor.radius.powi(3)).cbrt(),
        position: dominant.position,
        velocity: (dominant.momentum() + minor.momentum()) / mass,
        spin: dominant.spin,
        flash: dominant.flash,
    }
}

/// Apply merge events to the state.
///
/// Events are processed in the order the detector produced them. Any
/// event touching a body consumed earlier in the same pass is skipped,
/// which makes chained multi-way contacts safe: each body merges at most
/// once per step. The merge product re-enters under the dominant body's
/// id, and both input ids stay excluded for the rest of the pass.
///
/// Returns the number of merges performed.
///
/// # Examples
///
/// ```
/// use accretion::collisions::{CollisionDetector, DirectDetector, resolve_collisions};
/// use accretion::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut state = SystemState::new();
/// state.add_body(10.0, 1.0, Point3::origin(), Vector3::zeros());
/// state.add_body(20.0, 1.0, Point3::new(0.5, 0.0, 0.0), Vector3::zeros());
///
/// let events = DirectDetector.detect(&state, 0.0);
/// let merges = resolve_collisions(&mut state, events, false);
///
/// assert_eq!(merges, 1);
/// assert_eq!(state.body_count(), 1);
/// assert_eq!(state.total_mass(), 30.0);
/// ```
pub fn resolve_collisions(
    state: &mut SystemState,
    events: Vec<CollisionEvent>,
    color_on_impact: bool,
) -> usize {
    let mut consumed: HashSet<BodyId> = HashSet::new();
    let mut merges = 0;

    for event in events {
        if consumed.contains(&event.body_a) || consumed.contains(&event.body_b) {
            continue;
        }

        let a = state.get_body(event.body_a).copied();
        let b = state.get_body(event.body_b).copied();

        if let (Some(a), Some(b)) = (a, b) {
            state.remove_body(event.body_a);
            state.remove_body(event.body_b);

            let mut merged = merge_bodies(&a, &b);
            if color_on_impact {
                merged.flash = true;
            }
            state.bodies.push(merged);

            consumed.insert(event.body_a);
            consumed.insert(event.body_b);
            merges += 1;
        }
    }

    merges
}
