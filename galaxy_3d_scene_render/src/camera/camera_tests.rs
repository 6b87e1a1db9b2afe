use glam::{Mat4, Vec3, Vec4};
use super::*;

fn perspective() -> Mat4 {
    Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let proj = perspective();

    let camera = Camera::new(view, proj);

    assert_eq!(*camera.view_matrix(), view);
    assert_eq!(*camera.projection_matrix(), proj);
}

#[test]
fn test_camera_default_is_identity() {
    let camera = Camera::default();
    assert_eq!(*camera.view_matrix(), Mat4::IDENTITY);
    assert_eq!(*camera.projection_matrix(), Mat4::IDENTITY);
}

#[test]
fn test_camera_look_at() {
    let eye = Vec3::new(1.0, 2.0, 3.0);
    let camera = Camera::look_at(eye, Vec3::ZERO, Vec3::Y, perspective());
    assert_eq!(*camera.view_matrix(), Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y));
}

// ============================================================================
// Derived values
// ============================================================================

#[test]
fn test_view_projection_matrix() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let proj = perspective();

    let camera = Camera::new(view, proj);

    assert_eq!(camera.view_projection_matrix(), proj * view);
}

#[test]
fn test_world_position() {
    let eye = Vec3::new(4.0, -2.0, 7.0);
    let camera = Camera::look_at(eye, Vec3::ZERO, Vec3::Y, perspective());

    let position = camera.world_position();
    assert!((position - Vec4::new(4.0, -2.0, 7.0, 1.0)).length() < 1e-4);
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_set_view() {
    let mut camera = Camera::default();
    let new_view = Mat4::look_at_rh(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
    camera.set_view(new_view);
    assert_eq!(*camera.view_matrix(), new_view);
}

#[test]
fn test_set_projection() {
    let mut camera = Camera::default();
    let proj = perspective();
    camera.set_projection(proj);
    assert_eq!(*camera.projection_matrix(), proj);
}
