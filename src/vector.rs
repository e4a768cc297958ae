//! Small fixed-size vectors used to build and apply transforms.
//!
//! - [`Vector3`]: positions and directions (camera eye/at/up, light and eye directions)
//! - [`Vector4`]: homogeneous row vectors and packed shader `vec4<f32>` values
//!
//! Both are plain `Copy` values. Every operation returns a new value and none of
//! them validate their input: normalizing the zero vector yields NaN components,
//! exactly as IEEE-754 arithmetic dictates.

use std::ops::{Add, Mul, Neg, Sub};

use crate::matrix::Matrix4x4;

/// A 3-component vector of `f32`.
///
/// # Example
///
/// ```
/// use wvpkit::Vector3;
///
/// let x = Vector3::new(1.0, 0.0, 0.0);
/// let y = Vector3::new(0.0, 1.0, 0.0);
/// assert_eq!(x.cross(y), Vector3::new(0.0, 0.0, 1.0));
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn dot(self, v: Self) -> f32 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scales the vector to unit length.
    ///
    /// There is no zero-length guard: the result is `scale(1 / length)`, so a
    /// zero vector produces NaN components.
    pub fn normalize(self) -> Self {
        self.scale(1.0 / self.length())
    }

    /// Right-handed cross product.
    pub fn cross(self, v: Self) -> Self {
        Self::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    /// Extends to a [`Vector4`] with the given `w`.
    ///
    /// Use `w = 1.0` for points and `w = 0.0` for directions.
    pub fn extend(self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, v: Self) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, v: Self) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        self.scale(s)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// A homogeneous 4-component row vector.
///
/// Transforms apply from the right: `v * m` (see [`Matrix4x4`] for the
/// convention). Also the packed form of a WGSL `vec4<f32>` uniform member.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const BYTE_LENGTH: usize = std::mem::size_of::<Self>();

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Drops `w` without dividing.
    pub fn truncate(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Perspective divide. `w == 0` yields infinities or NaN.
    pub fn project(self) -> Vector3 {
        Vector3::new(self.x / self.w, self.y / self.w, self.z / self.w)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Native-endian bytes, as uploaded to a uniform buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Mul<Matrix4x4> for Vector4 {
    type Output = Vector4;

    fn mul(self, m: Matrix4x4) -> Vector4 {
        m.transform(self)
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Vector4> for [f32; 4] {
    fn from(v: Vector4) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec4> for Vector4 {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn componentwise_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-4.0, 0.5, 2.0);

        assert_eq!(a + b, Vector3::new(-3.0, 2.5, 5.0));
        assert_eq!(a - b, Vector3::new(5.0, 1.5, 1.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(b), -4.0 + 1.0 + 6.0);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        assert_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z);
        assert_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X);
        assert_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y);
        assert_eq!(Vector3::Y.cross(Vector3::X), -Vector3::Z);
    }

    #[test]
    fn cross_with_self_is_zero() {
        for v in [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.25, 7.5, 0.0),
            Vector3::new(1e3, -1e-3, 42.0),
        ] {
            assert_eq!(v.cross(v), Vector3::ZERO);
        }
    }

    #[test]
    fn normalize_gives_unit_length() {
        for v in [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(0.0, 1.0, 3.0),
            Vector3::new(-0.5, 0.5, 0.5),
            Vector3::new(1e-3, 2e-3, -5e-4),
        ] {
            assert!((v.normalize().length() - 1.0).abs() < EPS);
        }
        assert_eq!(Vector3::new(3.0, 4.0, 0.0).length(), 5.0);
    }

    #[test]
    fn normalize_zero_propagates_nan() {
        let n = Vector3::ZERO.normalize();
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn vector4_divide_by_w() {
        let p = Vector4::new(2.0, -4.0, 1.0, 2.0).project();
        assert_eq!(p, Vector3::new(1.0, -2.0, 0.5));
        assert_eq!(Vector3::new(1.0, 2.0, 3.0).extend(0.0).w, 0.0);
    }

    #[test]
    fn glam_conversions_preserve_components() {
        let v = Vector3::new(1.0, -2.0, 3.5);
        let g: glam::Vec3 = v.into();
        assert_eq!(Vector3::from(g), v);

        let h = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let gh: glam::Vec4 = h.into();
        assert_eq!(Vector4::from(gh), h);
    }
}
