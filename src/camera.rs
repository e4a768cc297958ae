use crate::matrix::Matrix4x4;
use crate::vector::Vector3;

/// A look-at camera with a reversed-Z perspective lens.
///
/// Produces the view and projection halves of a world-view-projection
/// transform. Defaults match a small scene viewed from slightly above:
/// eye at `(0, 1, 3)`, looking at the origin, 90° field of view, clip planes
/// at 0.1 and 100.
///
/// # Example
/// ```
/// use wvpkit::{Camera, Matrix4x4, Vector3};
///
/// let camera = Camera::new()
///     .eye(0.0, 2.0, 5.0)
///     .looking_at(0.0, 0.0, 0.0)
///     .with_fov(45.0);
///
/// let vp = camera.view_projection(16.0 / 9.0);
/// let wvp = Matrix4x4::rotation_y(0.5) * vp;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vector3,
    pub at: Vector3,
    pub up: Vector3,
    pub fov: f32, // radians
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vector3::new(0.0, 1.0, 3.0),
            at: Vector3::ZERO,
            up: Vector3::Y,
            fov: std::f32::consts::FRAC_PI_2, // 90 degrees
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eye(mut self, x: f32, y: f32, z: f32) -> Self {
        self.eye = Vector3::new(x, y, z);
        self
    }

    pub fn looking_at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.at = Vector3::new(x, y, z);
        self
    }

    pub fn up(mut self, up: Vector3) -> Self {
        self.up = up;
        self
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = crate::deg_to_rad(fov_degrees);
        self
    }

    pub fn with_fov_radians(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn view_matrix(&self) -> Matrix4x4 {
        Matrix4x4::look_at_rh(self.eye, self.at, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4x4 {
        Matrix4x4::perspective_fov_rh(self.fov, aspect, self.near, self.far)
    }

    /// `view * projection`, ready to be prefixed with a world matrix.
    pub fn view_projection(&self, aspect: f32) -> Matrix4x4 {
        self.view_matrix() * self.projection_matrix(aspect)
    }

    /// Unit vector from the origin toward the eye, as used for specular lighting.
    pub fn eye_direction(&self) -> Vector3 {
        self.eye.normalize()
    }
}
