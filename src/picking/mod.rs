//! CPU ray picking against scene graph shapes.
//!
//! [`Raycaster`] casts a world-space ray through the graph and returns every
//! hit nearest first. [`RaycasterHelper`] wraps it for pointer input:
//! it converts a pointer position to a camera ray and returns the nearest
//! hit that is not flagged to be ignored (editor gizmos, typically).

mod helper;
mod ray;
mod raycaster;

pub use helper::{PickTargets, PointerPosition, RaycasterHelper};
pub use ray::Ray;
pub use raycaster::{Intersection, Raycaster};
