//! Perspective camera bound to a scene graph node.
//!
//! The camera's pose is the world transform of its node, so anything that
//! moves or reparents the node (the controls, the host) moves the view.

mod core;

pub use self::core::Camera;
