//! # wvpkit
//!
//! **World, view and projection matrices, packed the way WebGPU wants them.**
//!
//! A small value-type kernel for building a world-view-projection transform and
//! writing it, byte for byte, into a uniform buffer.
//!
//! ## Quick Start
//!
//! ```
//! use wvpkit::*;
//!
//! let camera = Camera::new().eye(0.0, 1.0, 3.0).looking_at(0.0, 0.0, 0.0).with_fov(90.0);
//! let world = Matrix4x4::rotation_y(deg_to_rad(30.0));
//! let wvp = world * camera.view_projection(1.0);
//!
//! // v' = v * M, then divide by w
//! let clip = Vector4::new(0.0, 1.0, 0.0, 1.0) * wvp;
//! assert!(clip.w > 0.0);
//!
//! // 64 bytes, column-major, native endian
//! let mut uniforms = [0u8; 128];
//! UniformWriter::new(&mut uniforms).write_matrix(64, &wvp)?;
//! # Ok::<(), LayoutError>(())
//! ```
//!
//! ## Conventions
//!
//! - **Right-handed**: cameras look down -Z.
//! - **Row vectors**: `v * world * view * projection`, so composition reads in
//!   application order. Shaders multiply `position * wvp`.
//! - **Column-major storage**: element (row `r`, col `c`) is float `c * 4 + r`.
//! - **Reversed-Z**: the near plane maps to depth 1.0, the far plane to 0.0.
//! - **No validation**: degenerate input (`eye == at`, normalizing zero)
//!   propagates NaN/Inf. Only [`UniformWriter`] reports errors.

mod camera;
mod matrix;
mod uniforms;
mod vector;

pub use camera::Camera;
pub use matrix::Matrix4x4;
pub use uniforms::{
    LayoutError, ModelUniforms, SCALAR_ALIGN, SceneUniforms, UniformWriter, VEC4_ALIGN,
    ViewUniforms, uniform_buffer_descriptor,
};
pub use vector::{Vector3, Vector4};

/// Converts degrees to radians (`degrees * π / 180`).
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_to_radians() {
        assert_eq!(deg_to_rad(0.0), 0.0);
        assert!((deg_to_rad(90.0) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((deg_to_rad(-180.0) + std::f32::consts::PI).abs() < 1e-6);
    }
}
