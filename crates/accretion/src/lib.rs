//! Newtonian gravity and accretion simulation core.
//!
//! Simulates the motion and mutual gravitation of a set of planets over
//! fixed timesteps, merging bodies that collide. This crate is the
//! physics core only: the body model, the force and integration step,
//! and collision detection/resolution. Rendering, input handling, and
//! persistence are external consumers of [`snapshot::Snapshot`].

pub mod body;
pub mod collisions;
pub mod config;
pub mod error;
pub mod forces;
pub mod generation;
pub mod integrator;
pub mod sim;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod sim_test;
