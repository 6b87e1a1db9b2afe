/// Camera - low-level passive data container.
///
/// The Camera computes nothing beyond trivial combinations of its matrices.
/// The caller (game engine) computes and sets the view and projection
/// matrices; the scene renderer publishes them to every scene pass.

use glam::{Mat4, Vec3, Vec4};

/// Low-level camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    /// Create a new camera from its view and projection matrices
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    /// Create a right-handed camera looking from `eye` at `target`
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, projection: Mat4) -> Self {
        Self::new(Mat4::look_at_rh(eye, target, up), projection)
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Camera position in world space (w = 1).
    pub fn world_position(&self) -> Vec4 {
        world_position(&self.view_matrix)
    }

    // ===== SETTERS =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

/// World-space eye position of a view matrix
pub(crate) fn world_position(view: &Mat4) -> Vec4 {
    view.inverse().w_axis.truncate().extend(1.0)
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
