//! Builds a per-frame scene block for a rotating object and uploads it to a
//! uniform buffer on a headless device.
//!
//! ```sh
//! cargo run --example headless_upload
//! ```

use wvpkit::*;

const FRAMES: u32 = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: None,
        force_fallback_adapter: false,
    }))?;
    eprintln!("[wvp] Using adapter: {}", adapter.get_info().name);

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("wvpkit Device"),
        ..Default::default()
    }))?;

    let (width, height) = (640.0f32, 480.0f32);
    let camera = Camera::new().eye(0.0, 0.0, 10.0).with_fov(45.0);
    let vp = camera.view_projection(width / height);

    let light_dir = Vector3::new(-0.5, 0.5, 0.5).normalize();
    let ambient = Vector3::new(0.1, 0.1, 0.1);
    let mut scene = SceneUniforms::new(
        &Matrix4x4::identity(),
        &vp,
        light_dir,
        camera.eye_direction(),
        ambient,
    );

    let buffer = device.create_buffer(&SceneUniforms::buffer_descriptor(Some("Scene Uniforms")));

    for frame in 0..FRAMES {
        let rad = deg_to_rad((frame % 360) as f32);
        let world = Matrix4x4::rotation_axis(Vector3::new(0.0, 1.0, 1.0), rad);
        scene = scene.with_world(&world, &vp);
        scene.upload(&queue, &buffer);

        let clip = Vector4::new(0.0, 1.0, 0.0, 1.0) * scene.wvp;
        let ndc = clip.project();
        eprintln!(
            "[wvp] frame {}: vertex (0, 1, 0) -> ndc ({:.4}, {:.4}, depth {:.6})",
            frame, ndc.x, ndc.y, ndc.z
        );
    }

    queue.submit(std::iter::empty());
    eprintln!(
        "[wvp] Uploaded {} bytes per frame ({} frames)",
        SceneUniforms::SIZE,
        FRAMES
    );
    Ok(())
}
