use glam::Vec3;

/// One billboard point as uploaded to the GPU instance buffer.
///
/// Layout is `position.xyz, size, color.rgba` (32 bytes) and must stay in
/// sync with the vertex attributes declared by the web renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl PointVertex {
    #[inline]
    pub fn new(position: Vec3, size: f32, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            size,
            color,
        }
    }

    #[inline]
    pub fn rgb(position: Vec3, size: f32, rgb: [f32; 3]) -> Self {
        Self::new(position, size, [rgb[0], rgb[1], rgb[2], 1.0])
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}
