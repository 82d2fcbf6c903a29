/// Interleaved mesh vertex as uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    /// xyz = tangent along +u, w = bitangent handedness
    pub tangent: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-frame scene uniforms (camera and lights)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalsUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub _pad0: f32,
    pub ambient: [f32; 3],
    pub _pad1: f32,
    /// Direction towards the sun, world space
    pub sun_direction: [f32; 3],
    pub _pad2: f32,
    pub sun_color: [f32; 3],
    pub _pad3: f32,
}

pub const SHADING_PHONG: u32 = 0;
pub const SHADING_LAMBERT: u32 = 1;
pub const SHADING_BASIC: u32 = 2;

pub const FLAG_COLOR_MAP: u32 = 1 << 0;
pub const FLAG_NORMAL_MAP: u32 = 1 << 1;
pub const FLAG_SPECULAR_MAP: u32 = 1 << 2;

/// Per-mesh uniforms: transform plus material state
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb = base color (linear), a = opacity
    pub color: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub shading: u32,
    pub flags: u32,
    pub _pad: [u32; 2],
}
