//! Collision detection and merge resolution.
//!
//! Detection scans the post-integration body set for overlapping pairs in
//! a stable order; resolution replaces each colliding pair with a single
//! body conserving mass, momentum, and volume.

pub mod detection;
pub mod resolution;


pub use detection::{CollisionDetector, CollisionEvent, DirectDetector};
pub use resolution::{merge_bodies, resolve_collisions};
