//! 4×4 transform matrices for world, view and projection.
//!
//! # Conventions
//!
//! [`Matrix4x4`] follows the row-vector convention: a point is transformed as
//! `v' = v * M`, so a composite transform reads left to right in the order the
//! transforms are applied:
//!
//! ```
//! use wvpkit::{Matrix4x4, Vector3};
//!
//! let world = Matrix4x4::rotation_y(0.5) * Matrix4x4::translation(Vector3::new(1.0, 0.0, 0.0));
//! let view = Matrix4x4::look_at_rh(Vector3::new(0.0, 1.0, 3.0), Vector3::ZERO, Vector3::Y);
//! let projection = Matrix4x4::perspective_fov_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
//!
//! let wvp = world * view * projection;
//! assert_eq!(wvp.byte_length(), 64);
//! ```
//!
//! Shaders consume the result as `position * wvp`.
//!
//! # Storage
//!
//! Constructors are written row-major (`m[row][col]`, the way the formulas read)
//! and stored column-major: element (row `r`, column `c`) lives at `storage[c * 4 + r]`.
//! That conversion happens in exactly one place, [`Matrix4x4::from_rows`]. The
//! stored order is what [`Matrix4x4::as_bytes`] hands to the GPU.
//!
//! # Depth
//!
//! [`Matrix4x4::perspective_fov_rh`] produces a reversed-Z projection: the near
//! plane lands on depth 1.0 and the far plane on depth 0.0.

use std::ops::Mul;

use crate::vector::{Vector3, Vector4};

/// A 4×4 `f32` transform stored column-major.
///
/// Immutable value type: every operation returns a new matrix.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4x4([f32; 16]);

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4x4 {
    /// Size of the GPU representation: 16 × `f32`.
    pub const BYTE_LENGTH: usize = std::mem::size_of::<Self>();

    /// Builds a matrix from rows written in reading order.
    ///
    /// This is the row-major → column-major conversion: `rows[r][c]` is stored
    /// at index `c * 4 + r`.
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let [
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ] = rows;
        Self([
            m00, m10, m20, m30, //
            m01, m11, m21, m31, //
            m02, m12, m22, m32, //
            m03, m13, m23, m33, //
        ])
    }

    /// Wraps raw column-major storage as-is.
    pub const fn from_cols_array(storage: [f32; 16]) -> Self {
        Self(storage)
    }

    /// Raw column-major storage.
    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.0
    }

    pub fn as_slice(&self) -> &[f32; 16] {
        &self.0
    }

    /// Element at `row`, `col`. Panics if either index is not in `0..4`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < 4 && col < 4, "matrix index ({row}, {col}) out of range");
        self.0[col * 4 + row]
    }

    pub const fn identity() -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation lives in row 3.
    pub fn translation(t: Vector3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [t.x, t.y, t.z, 1.0],
        ])
    }

    pub fn scale(s: Vector3) -> Self {
        Self::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +X by `rad` radians.
    pub fn rotation_x(rad: f32) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +Y by `rad` radians.
    pub fn rotation_y(rad: f32) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_rows([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +Z by `rad` radians.
    pub fn rotation_z(rad: f32) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_rows([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about an arbitrary axis (Rodrigues' formula).
    ///
    /// The axis is normalized first. The cross terms carry `+axis * s` above the
    /// diagonal and `-axis * s` below it, the same sign layout as
    /// [`rotation_x`](Self::rotation_x), [`rotation_y`](Self::rotation_y) and
    /// [`rotation_z`](Self::rotation_z), so `rotation_axis(Vector3::X, a)` equals
    /// `rotation_x(a)`.
    pub fn rotation_axis(axis: Vector3, rad: f32) -> Self {
        let a = axis.normalize();
        let (s, c) = rad.sin_cos();
        let t = 1.0 - c;
        let xx = a.x * a.x;
        let xy = a.x * a.y;
        let xz = a.x * a.z;
        let yy = a.y * a.y;
        let yz = a.y * a.z;
        let zz = a.z * a.z;

        Self::from_rows([
            [xx * t + c, xy * t + a.z * s, xz * t - a.y * s, 0.0],
            [xy * t - a.z * s, yy * t + c, yz * t + a.x * s, 0.0],
            [xz * t + a.y * s, yz * t - a.x * s, zz * t + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed view matrix looking from `eye` toward `at`.
    ///
    /// The camera looks down its local -Z. `eye == at`, or `up` parallel to the
    /// view direction, yields NaN.
    pub fn look_at_rh(eye: Vector3, at: Vector3, up: Vector3) -> Self {
        let z = (eye - at).normalize();
        let x = up.cross(z).normalize();
        let y = z.cross(x);

        Self::from_rows([
            [x.x, y.x, z.x, 0.0],
            [x.y, y.y, z.y, 0.0],
            [x.z, y.z, z.z, 0.0],
            [-x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0],
        ])
    }

    /// Right-handed perspective projection with reversed-Z depth.
    ///
    /// `fov` is the vertical field of view in radians and `aspect` is
    /// width / height. View-space `z = -near` maps to depth 1.0 and `z = -far`
    /// to depth 0.0 after the perspective divide, so pair it with a
    /// `Greater` depth compare and a depth clear value of 0.0.
    pub fn perspective_fov_rh(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let scale_y = 1.0 / (fov * 0.5).tan();
        let scale_x = scale_y / aspect;
        let scale_z = near / (far - near);
        let trans_z = near * far / (far - near);

        Self::from_rows([
            [scale_x, 0.0, 0.0, 0.0],
            [0.0, scale_y, 0.0, 0.0],
            [0.0, 0.0, scale_z, -1.0],
            [0.0, 0.0, trans_z, 0.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        let m = &self.0;
        Self::from_rows([
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ])
    }

    /// The upper-left 3×3 block with translation and projection terms cleared.
    ///
    /// Assumes the matrix holds no scale. For a pure rotation the transpose of
    /// this block is its inverse, which is how per-object lighting directions
    /// are moved into object space:
    ///
    /// ```
    /// use wvpkit::{Matrix4x4, Vector3};
    ///
    /// let world = Matrix4x4::rotation_y(0.3) * Matrix4x4::translation(Vector3::new(2.0, 0.0, 0.0));
    /// let inverse_world = world.rotation().transpose();
    /// assert!((world.rotation() * inverse_world).approx_eq(&Matrix4x4::identity(), 1e-6));
    /// ```
    pub fn rotation(&self) -> Self {
        let m = &self.0;
        Self::from_rows([
            [m[0], m[4], m[8], 0.0],
            [m[1], m[5], m[9], 0.0],
            [m[2], m[6], m[10], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Applies the matrix to a row vector: `v * self`.
    pub fn transform(&self, v: Vector4) -> Vector4 {
        let m = &self.0;
        let column =
            |c: usize| v.x * m[c * 4] + v.y * m[c * 4 + 1] + v.z * m[c * 4 + 2] + v.w * m[c * 4 + 3];
        Vector4::new(column(0), column(1), column(2), column(3))
    }

    /// Elementwise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }

    pub fn byte_length(&self) -> usize {
        Self::BYTE_LENGTH
    }

    /// The 16 column-major floats as native-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Copies [`as_bytes`](Self::as_bytes) into `dst` starting at `offset`.
    ///
    /// Only `dst[offset..offset + 64]` is written. Panics if that range does
    /// not fit; use [`UniformWriter`](crate::UniformWriter) for a checked,
    /// alignment-aware variant.
    pub fn write_to(&self, dst: &mut [u8], offset: usize) {
        dst[offset..offset + Self::BYTE_LENGTH].copy_from_slice(self.as_bytes());
    }

    /// Uploads the matrix into `buffer` at `offset` through the queue.
    pub fn upload(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer, offset: wgpu::BufferAddress) {
        queue.write_buffer(buffer, offset, self.as_bytes());
    }
}

/// The product `self * m`: applying the result equals applying `self`, then `m`.
impl Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, m: Matrix4x4) -> Matrix4x4 {
        let a = &self.0;
        let b = &m.0;
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = a[row] * b[col * 4]
                    + a[4 + row] * b[col * 4 + 1]
                    + a[8 + row] * b[col * 4 + 2]
                    + a[12 + row] * b[col * 4 + 3];
            }
        }
        Matrix4x4(out)
    }
}

impl From<glam::Mat4> for Matrix4x4 {
    fn from(m: glam::Mat4) -> Self {
        Self(m.to_cols_array())
    }
}

impl From<Matrix4x4> for glam::Mat4 {
    fn from(m: Matrix4x4) -> Self {
        glam::Mat4::from_cols_array(&m.0)
    }
}
