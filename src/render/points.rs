use super::helpers;
use crate::constants::INITIAL_INSTANCE_CAPACITY;
use glam::Vec3;
use scene_core::{PointVertex, RenderCamera};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
}

impl Globals {
    pub fn from_camera(camera: &RenderCamera) -> Self {
        let (right, up) = camera.billboard_axes();
        let pad = |v: Vec3| [v.x, v.y, v.z, 0.0];
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            cam_right: pad(right),
            cam_up: pad(up),
        }
    }
}

/// One instance buffer of billboards; grows by doubling when outgrown.
pub struct PointBatch {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl PointBatch {
    pub fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: helpers::create_instance_buffer(device, label, INITIAL_INSTANCE_CAPACITY),
            capacity: INITIAL_INSTANCE_CAPACITY,
            count: 0,
        }
    }

    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, points: &[PointVertex]) {
        if points.len() > self.capacity {
            let mut capacity = self.capacity.max(1);
            while capacity < points.len() {
                capacity *= 2;
            }
            log::info!("[render] growing {} to {} points", self.label, capacity);
            self.buffer = helpers::create_instance_buffer(device, self.label, capacity);
            self.capacity = capacity;
        }
        if !points.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(points));
        }
        self.count = points.len() as u32;
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        rpass.set_vertex_buffer(0, self.buffer.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
