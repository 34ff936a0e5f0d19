use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId};

/// Complete state of the body set at a given time.
///
/// The simulation owns this exclusively; external consumers read it
/// through [`Snapshot`](crate::snapshot::Snapshot) copies. The `bodies`
/// vector keeps stable insertion order, which is the deterministic
/// pair-iteration order used by the collision detector.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Elapsed simulation time in seconds.
    pub time: f64,
    /// Live bodies, in stable insertion order.
    pub bodies: Vec<Body>,
    next_id: u32,
}

impl SystemState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body with default cosmetic state and returns its id.
    ///
    /// # Examples
    ///
    /// ```
    /// use accretion::state::SystemState;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let mut state = SystemState::new();
    /// let id = state.add_body(1.0e24, 1.0e6, Point3::origin(), Vector3::zeros());
    ///
    /// assert_eq!(state.body_count(), 1);
    /// assert!(state.get_body(id).is_some());
    /// ```
    pub fn add_body(
        &mut self,
        mass: f64,
        radius: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            mass,
            radius,
            position,
            velocity,
            spin: None,
            flash: false,
        });
        id
    }

    /// Removes a body, returning it if it was live.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Total mass of all live bodies; conserved across merges.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Total momentum of all live bodies; conserved across merges and,
    /// with no external forces, across integration (useful for checking
    /// numerical drift).
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}
