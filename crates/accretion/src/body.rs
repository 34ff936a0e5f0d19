use nalgebra::{Point3, Vector3};

/// Stable handle for a body. Unique among live bodies; minted
/// monotonically by [`SystemState`](crate::state::SystemState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// Cosmetic rotation state. Never read by the physics passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    /// Current angle in radians, wrapped to `[0, τ)`.
    pub angle: f64,
    /// Angular rate in radians per second.
    pub rate: f64,
}

/// A simulated planet.
///
/// Positions are metres in an origin-centred frame, velocities m/s,
/// masses kg, radii metres. `spin` and `flash` are presentation state
/// carried alongside the physical fields so renderers need no side
/// tables; the force, integration, and collision passes ignore them.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: BodyId,
    pub mass: f64,
    pub radius: f64,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    /// Cosmetic rotation, if the scenario assigns one.
    pub spin: Option<Spin>,
    /// Set on a merge product when impact tinting is enabled; cleared at
    /// the start of the next step.
    pub flash: bool,
}

impl Body {
    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Centre-to-centre distance to another body.
    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Surface-to-surface distance; negative when the bodies overlap.
    pub fn surface_distance_to(&self, other: &Body) -> f64 {
        self.distance_to(other) - (self.radius + other.radius)
    }
}
