//! Frame-polled camera animations.
//!
//! Neither animation owns a timer. Each call to
//! [`ViewControls::update`](super::ViewControls::update) advances the active
//! one by a single step; a step either finishes the animation (clearing it)
//! or leaves it armed for the next frame.

use glam::{Quat, Vec3};

use super::ViewControls;
use crate::error::ViewError;
use crate::scene::SceneGraph;
use crate::util::NearlyEqual;

/// The animation currently armed on the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Turning the camera toward a picked point before orbiting it.
    Focus {
        /// World-space point being focused.
        target: Vec3,
    },
    /// Easing the camera back to its home pose.
    Reset {
        /// Home position in the home parent's space.
        translation: Vec3,
        /// Home orientation in the home parent's space.
        rotation: Quat,
    },
}

impl ViewControls {
    /// One step of the focus turn.
    ///
    /// Slerps the camera toward the focus rotation by a factor that grows
    /// each frame. Once the rotation converges, or the frame budget runs
    /// out, the pivot is moved to `target`, the outer node is turned to
    /// face the camera, and the camera is attached to it so that pivot
    /// rotations orbit the camera around the point.
    pub fn pan_to_object(
        &mut self,
        graph: &mut SceneGraph,
        target: Vec3,
    ) -> Result<(), ViewError> {
        let camera = self.camera.node;
        let transform = &mut graph.node_mut(camera)?.transform;
        transform.rotation = transform
            .rotation
            .slerp(self.focus_rotation, self.focus_increment)
            .normalize();
        let rotation = transform.rotation;
        self.focus_increment += self.options.focus.speed;
        self.focus_iterations += 1;

        let converged =
            rotation.nearly_equal(&self.focus_rotation, self.options.focus.tolerance);
        if converged || self.focus_iterations > self.options.focus.max_iterations {
            self.focused = true;
            self.focus_increment = 0.0;
            graph.set_world_position(self.pivot, target)?;
            let eye = graph.world_position(camera)?;
            graph.look_at(self.outer, eye)?;
            graph.attach(self.outer, camera)?;
            self.animation = None;
            log::debug!(
                "focused on {target} after {} frames (converged: {converged})",
                self.focus_iterations
            );
        } else {
            log::trace!("focus step {}", self.focus_iterations);
            self.animation = Some(Animation::Focus { target });
        }
        Ok(())
    }

    /// One step of the return to `translation`/`rotation` (in the home
    /// parent's space).
    ///
    /// Snaps into place once the position is within tolerance; otherwise
    /// closes a fixed fraction of the remaining gap and stays armed.
    pub fn reset_camera(
        &mut self,
        graph: &mut SceneGraph,
        translation: Vec3,
        rotation: Quat,
    ) -> Result<(), ViewError> {
        let factor = self.options.reset.lerp_factor;
        let tolerance = self.options.reset.tolerance;
        let transform = &mut graph.node_mut(self.camera.node)?.transform;

        if transform.translation.nearly_equal(&translation, tolerance) {
            transform.translation = translation;
            transform.rotation = rotation;
            self.animation = None;
            log::debug!("camera back home at {translation}");
        } else {
            self.animation = Some(Animation::Reset {
                translation,
                rotation,
            });
            transform.translation = transform.translation.lerp(translation, factor);
            transform.rotation =
                transform.rotation.slerp(rotation, factor).normalize();
        }
        Ok(())
    }
}
