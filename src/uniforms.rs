//! Uniform-buffer layouts and byte packing.
//!
//! WGSL places a `vec4<f32>` or `mat4x4<f32>` member at a 16-byte boundary, so
//! every block here is a sequence of 64-byte matrices followed by 16-byte
//! vectors with nothing in between. The structs mirror these shader blocks:
//!
//! ```wgsl
//! struct Scene {
//!     wvp : mat4x4<f32>,
//!     iw : mat4x4<f32>,
//!     lightDir : vec4<f32>,
//!     eyeDir : vec4<f32>,
//!     ambientColor : vec4<f32>,
//! };
//! ```
//!
//! [`UniformWriter`] covers the other path: packing values one at a time into a
//! caller-owned byte buffer at explicit offsets, checking alignment and bounds.

use crate::matrix::Matrix4x4;
use crate::vector::{Vector3, Vector4};

/// Alignment of `vec4<f32>` and `mat4x4<f32>` in a WGSL uniform block.
pub const VEC4_ALIGN: usize = 16;

/// Alignment of a scalar `f32`.
pub const SCALAR_ALIGN: usize = 4;

/// Errors from [`UniformWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The write would run past the end of the destination.
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },
    /// The offset violates the member's alignment.
    Misaligned { offset: usize, align: usize },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::OutOfBounds {
                offset,
                len,
                capacity,
            } => write!(
                f,
                "write of {} bytes at offset {} exceeds buffer of {} bytes",
                len, offset, capacity
            ),
            LayoutError::Misaligned { offset, align } => {
                write!(f, "offset {} is not a multiple of {}", offset, align)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Builds a `UNIFORM | COPY_DST` buffer descriptor of `size` bytes.
pub fn uniform_buffer_descriptor(label: Option<&str>, size: u64) -> wgpu::BufferDescriptor<'_> {
    wgpu::BufferDescriptor {
        label,
        size,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }
}

/// Per-object scene block: transform plus lighting inputs.
///
/// The light and eye directions are given in world space; the shader moves
/// them into object space with `dir * iw`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    /// `world * view * projection`.
    pub wvp: Matrix4x4,
    /// Inverse of the world rotation, for directions.
    pub inverse_world: Matrix4x4,
    pub light_dir: Vector4,
    pub eye_dir: Vector4,
    pub ambient_color: Vector4,
}

impl SceneUniforms {
    pub const SIZE: usize = std::mem::size_of::<Self>();
    pub const INVERSE_WORLD_OFFSET: usize = std::mem::offset_of!(Self, inverse_world);
    pub const LIGHT_DIR_OFFSET: usize = std::mem::offset_of!(Self, light_dir);
    pub const EYE_DIR_OFFSET: usize = std::mem::offset_of!(Self, eye_dir);
    pub const AMBIENT_COLOR_OFFSET: usize = std::mem::offset_of!(Self, ambient_color);

    /// Composes `world * view_projection` and derives the inverse world rotation.
    ///
    /// `world` must not contain scale; see [`Matrix4x4::rotation`].
    pub fn new(
        world: &Matrix4x4,
        view_projection: &Matrix4x4,
        light_dir: Vector3,
        eye_dir: Vector3,
        ambient_color: Vector3,
    ) -> Self {
        Self {
            wvp: *world * *view_projection,
            inverse_world: world.rotation().transpose(),
            light_dir: light_dir.extend(0.0),
            eye_dir: eye_dir.extend(0.0),
            ambient_color: ambient_color.extend(0.0),
        }
    }

    /// Recomputes the per-frame part, keeping the lighting inputs.
    pub fn with_world(self, world: &Matrix4x4, view_projection: &Matrix4x4) -> Self {
        Self {
            wvp: *world * *view_projection,
            inverse_world: world.rotation().transpose(),
            ..self
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn buffer_descriptor(label: Option<&str>) -> wgpu::BufferDescriptor<'_> {
        uniform_buffer_descriptor(label, Self::SIZE as u64)
    }

    pub fn upload(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, self.as_bytes());
    }
}

/// Shared view block for scenes that keep per-object transforms separate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewUniforms {
    /// `view * projection`.
    pub view_projection: Matrix4x4,
    pub light_dir: Vector4,
    pub eye_dir: Vector4,
    pub ambient_color: Vector4,
}

impl ViewUniforms {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn new(
        view_projection: &Matrix4x4,
        light_dir: Vector3,
        eye_dir: Vector3,
        ambient_color: Vector3,
    ) -> Self {
        Self {
            view_projection: *view_projection,
            light_dir: light_dir.extend(0.0),
            eye_dir: eye_dir.extend(0.0),
            ambient_color: ambient_color.extend(0.0),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn buffer_descriptor(label: Option<&str>) -> wgpu::BufferDescriptor<'_> {
        uniform_buffer_descriptor(label, Self::SIZE as u64)
    }

    pub fn upload(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, self.as_bytes());
    }
}

/// Per-object block paired with [`ViewUniforms`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub world: Matrix4x4,
    pub inverse_world: Matrix4x4,
}

impl ModelUniforms {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn new(world: &Matrix4x4) -> Self {
        Self {
            world: *world,
            inverse_world: world.rotation().transpose(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn buffer_descriptor(label: Option<&str>) -> wgpu::BufferDescriptor<'_> {
        uniform_buffer_descriptor(label, Self::SIZE as u64)
    }

    pub fn upload(&self, queue: &wgpu::Queue, buffer: &wgpu::Buffer) {
        queue.write_buffer(buffer, 0, self.as_bytes());
    }
}

/// Packs values into an externally owned byte buffer at explicit offsets.
///
/// Each write touches only `offset..offset + len`. The writer holds the
/// borrow for its own lifetime and nothing beyond it.
///
/// # Example
/// ```
/// use wvpkit::{Matrix4x4, UniformWriter, Vector3};
///
/// let mut block = [0u8; 176];
/// let mut writer = UniformWriter::new(&mut block);
/// writer.write_matrix(0, &Matrix4x4::identity())?;
/// writer.write_matrix(64, &Matrix4x4::identity())?;
/// writer.write_vec3(128, Vector3::new(-0.5, 0.5, 0.5).normalize())?;
/// # Ok::<(), wvpkit::LayoutError>(())
/// ```
pub struct UniformWriter<'a> {
    buf: &'a mut [u8],
}

impl<'a> UniformWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn write_matrix(&mut self, offset: usize, m: &Matrix4x4) -> Result<(), LayoutError> {
        self.write_bytes(offset, m.as_bytes(), VEC4_ALIGN)
    }

    pub fn write_vec4(&mut self, offset: usize, v: Vector4) -> Result<(), LayoutError> {
        self.write_bytes(offset, v.as_bytes(), VEC4_ALIGN)
    }

    /// Writes `v` as a `vec4` with `w = 0`.
    pub fn write_vec3(&mut self, offset: usize, v: Vector3) -> Result<(), LayoutError> {
        self.write_vec4(offset, v.extend(0.0))
    }

    pub fn write_scalar(&mut self, offset: usize, value: f32) -> Result<(), LayoutError> {
        self.write_bytes(offset, bytemuck::bytes_of(&value), SCALAR_ALIGN)
    }

    /// Writes a whole uniform block such as [`SceneUniforms`].
    pub fn write_block<T: bytemuck::Pod>(
        &mut self,
        offset: usize,
        block: &T,
    ) -> Result<(), LayoutError> {
        self.write_bytes(offset, bytemuck::bytes_of(block), VEC4_ALIGN)
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8], align: usize) -> Result<(), LayoutError> {
        if offset % align != 0 {
            return Err(LayoutError::Misaligned { offset, align });
        }
        let out_of_bounds = LayoutError::OutOfBounds {
            offset,
            len: bytes.len(),
            capacity: self.buf.len(),
        };
        let end = offset.checked_add(bytes.len()).ok_or(out_of_bounds)?;
        let dst = self.buf.get_mut(offset..end).ok_or(out_of_bounds)?;
        dst.copy_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn block_sizes_and_offsets() {
        assert_eq!(SceneUniforms::SIZE, 176);
        assert_eq!(SceneUniforms::INVERSE_WORLD_OFFSET, 64);
        assert_eq!(SceneUniforms::LIGHT_DIR_OFFSET, 128);
        assert_eq!(SceneUniforms::EYE_DIR_OFFSET, 144);
        assert_eq!(SceneUniforms::AMBIENT_COLOR_OFFSET, 160);
        assert_eq!(ViewUniforms::SIZE, 112);
        assert_eq!(ModelUniforms::SIZE, 128);

        for offset in [
            SceneUniforms::INVERSE_WORLD_OFFSET,
            SceneUniforms::LIGHT_DIR_OFFSET,
            SceneUniforms::EYE_DIR_OFFSET,
            SceneUniforms::AMBIENT_COLOR_OFFSET,
        ] {
            assert_eq!(offset % VEC4_ALIGN, 0);
        }
    }

    #[test]
    fn scene_uniforms_pack_like_offset_writes() {
        let world = Matrix4x4::rotation_y(0.8) * Matrix4x4::translation(Vector3::new(1.0, 0.0, -2.0));
        let vp = Matrix4x4::look_at_rh(Vector3::new(0.0, 1.0, 3.0), Vector3::ZERO, Vector3::Y)
            * Matrix4x4::perspective_fov_rh(0.8, 1.0, 0.1, 100.0);
        let light = Vector3::new(-0.5, 0.5, 0.5).normalize();
        let eye = Vector3::new(0.0, 1.0, 3.0).normalize();
        let ambient = Vector3::new(0.1, 0.1, 0.1);

        let scene = SceneUniforms::new(&world, &vp, light, eye, ambient);

        let mut manual = [0u8; 176];
        let wvp = world * vp;
        let iw = world.rotation().transpose();
        let mut writer = UniformWriter::new(&mut manual);
        writer.write_matrix(0, &wvp).unwrap();
        writer.write_matrix(wvp.byte_length(), &iw).unwrap();
        writer.write_vec3(128, light).unwrap();
        writer.write_vec3(144, eye).unwrap();
        writer.write_vec3(160, ambient).unwrap();

        assert_eq!(scene.as_bytes(), &manual[..]);

        let f = floats(scene.as_bytes());
        assert_eq!(f[32..36], [light.x, light.y, light.z, 0.0]);
        assert_eq!(f[40..44], [ambient.x, ambient.y, ambient.z, 0.0]);
    }

    #[test]
    fn with_world_keeps_lighting() {
        let vp = Matrix4x4::perspective_fov_rh(1.0, 1.0, 0.1, 10.0);
        let scene = SceneUniforms::new(
            &Matrix4x4::identity(),
            &vp,
            Vector3::X,
            Vector3::Y,
            Vector3::new(0.2, 0.2, 0.2),
        );
        let world = Matrix4x4::rotation_x(1.2);
        let next = scene.with_world(&world, &vp);

        assert_eq!(next.wvp, world * vp);
        assert_eq!(next.inverse_world, world.rotation().transpose());
        assert_eq!(next.light_dir, scene.light_dir);
        assert_eq!(next.ambient_color, scene.ambient_color);
    }

    #[test]
    fn model_uniforms_invert_rotation() {
        let world = Matrix4x4::rotation_axis(Vector3::new(1.0, 2.0, 0.5), 0.7)
            * Matrix4x4::translation(Vector3::new(0.0, 3.0, 0.0));
        let model = ModelUniforms::new(&world);
        let product = world.rotation() * model.inverse_world;
        assert!(product.approx_eq(&Matrix4x4::identity(), 1e-5));
        assert_eq!(&model.as_bytes()[..64], world.as_bytes());
    }

    #[test]
    fn view_uniforms_layout() {
        let vp = Matrix4x4::scale(Vector3::new(1.0, 2.0, 3.0));
        let view = ViewUniforms::new(&vp, Vector3::X, Vector3::Y, Vector3::Z);
        let f = floats(view.as_bytes());
        assert_eq!(f[..16], vp.to_cols_array());
        assert_eq!(f[16..20], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(f[24..28], [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn writer_rejects_misaligned_vectors() {
        let mut buf = [0u8; 64];
        let mut writer = UniformWriter::new(&mut buf);
        assert_eq!(
            writer.write_vec4(8, Vector4::new(1.0, 2.0, 3.0, 4.0)),
            Err(LayoutError::Misaligned {
                offset: 8,
                align: 16
            })
        );
        assert_eq!(
            writer.write_matrix(4, &Matrix4x4::identity()),
            Err(LayoutError::Misaligned {
                offset: 4,
                align: 16
            })
        );
        assert!(writer.write_scalar(4, 1.0).is_ok());
        assert!(writer.write_scalar(6, 1.0).is_err());
    }

    #[test]
    fn writer_rejects_out_of_bounds_without_writing() {
        let mut buf = [0x55u8; 96];
        {
            let mut writer = UniformWriter::new(&mut buf);
            assert_eq!(writer.capacity(), 96);
            assert_eq!(
                writer.write_matrix(48, &Matrix4x4::identity()),
                Err(LayoutError::OutOfBounds {
                    offset: 48,
                    len: 64,
                    capacity: 96
                })
            );
            assert!(writer.write_vec4(usize::MAX - 15, Vector4::default()).is_err());
        }
        assert!(buf.iter().all(|&b| b == 0x55));
    }

    #[test]
    fn writer_leaves_neighbours_untouched() {
        let mut buf = [0xEEu8; 64];
        UniformWriter::new(&mut buf)
            .write_vec4(16, Vector4::new(1.0, 2.0, 3.0, 4.0))
            .unwrap();

        assert!(buf[..16].iter().all(|&b| b == 0xEE));
        assert_eq!(floats(&buf[16..32]), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(buf[32..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn writer_packs_whole_blocks() {
        let model = ModelUniforms::new(&Matrix4x4::rotation_z(0.3));
        let mut buf = vec![0u8; 256];
        UniformWriter::new(&mut buf).write_block(128, &model).unwrap();
        assert_eq!(&buf[128..256], model.as_bytes());
        assert!(buf[..128].iter().all(|&b| b == 0));
    }

    #[test]
    fn descriptor_is_uniform_copy_dst() {
        let desc = SceneUniforms::buffer_descriptor(Some("scene"));
        assert_eq!(desc.size, 176);
        assert_eq!(desc.label, Some("scene"));
        assert!(desc.usage.contains(wgpu::BufferUsages::UNIFORM));
        assert!(desc.usage.contains(wgpu::BufferUsages::COPY_DST));
        assert!(!desc.mapped_at_creation);
    }

    #[test]
    fn error_messages() {
        let e = LayoutError::Misaligned {
            offset: 8,
            align: 16,
        };
        assert_eq!(e.to_string(), "offset 8 is not a multiple of 16");
        let e = LayoutError::OutOfBounds {
            offset: 48,
            len: 64,
            capacity: 96,
        };
        assert_eq!(
            e.to_string(),
            "write of 64 bytes at offset 48 exceeds buffer of 96 bytes"
        );
    }
}
