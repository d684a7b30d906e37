// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Pointer-driven look, orbit and dolly controls for a 3D camera.
//!
//! Alt-clicking an object turns the camera toward the picked point, then
//! hangs it from a pivot rig at that point so that dragging orbits and
//! dollies around it. Escape releases the rig and eases the camera back to
//! its starting pose. Plain left and right clicks on objects are reported
//! to the host.
//!
//! # Key entry points
//!
//! - [`ViewControls`] - the controls: feed it [`InputEvent`]s, apply the
//!   returned [`Response`], call [`ViewControls::update`] once per frame
//! - [`Stage`] - a scene graph and its controls under one owner
//! - [`scene::SceneGraph`] - the node hierarchy the controls manipulate
//! - [`picking::RaycasterHelper`] - pointer picking against node shapes
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Hosts
//!
//! The `viewer` feature adds a winit `Viewer` window; the `web` feature
//! adds `web::DomBinding`, which wires the controls to DOM listeners.

pub mod camera;
pub mod controls;
pub mod error;
pub mod input;
pub mod options;
pub mod picking;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(feature = "web")]
pub mod web;

pub use camera::Camera;
pub use controls::{
    Animation, ControlEvent, PointerLock, Response, Stage, ViewControls,
};
pub use error::ViewError;
pub use input::{InputEvent, KeyAction, Modifiers, MouseButton};
pub use options::Options;
pub use picking::{Intersection, PointerPosition, RaycasterHelper};
pub use scene::{NodeFlags, NodeId, SceneGraph, Shape, Transform};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
