use std::sync::Arc;
use wgpu::util::DeviceExt;

use crate::scene::{MapSlot, Mesh, Node, Shading, TextureState};
use crate::textures::{ColorSpace, TextureData};
use crate::types::{
    MeshUniform, FLAG_COLOR_MAP, FLAG_NORMAL_MAP, FLAG_SPECULAR_MAP, SHADING_BASIC,
    SHADING_LAMBERT, SHADING_PHONG,
};

const SLOTS: [MapSlot; 3] = [MapSlot::Color, MapSlot::Normal, MapSlot::Specular];

pub fn texture_format(color_space: ColorSpace) -> wgpu::TextureFormat {
    match color_space {
        ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
    }
}

/// Upload RGBA8 texels into a sampled 2D texture
pub fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data: &TextureData,
    label: &str,
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: data.width.max(1),
        height: data.height.max(1),
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: texture_format(data.color_space),
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * size.width),
            rows_per_image: Some(size.height),
        },
        size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// 1x1 white stand-ins bound while a slot has no decoded texture
pub struct FallbackTextures {
    srgb: wgpu::TextureView,
    linear: wgpu::TextureView,
}

impl FallbackTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let white = |color_space| TextureData {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
            color_space,
        };
        Self {
            srgb: upload_texture(device, queue, &white(ColorSpace::Srgb), "Fallback sRGB"),
            linear: upload_texture(device, queue, &white(ColorSpace::Linear), "Fallback Linear"),
        }
    }

    fn for_slot(&self, slot: MapSlot) -> &wgpu::TextureView {
        match slot {
            MapSlot::Color => &self.srgb,
            MapSlot::Normal | MapSlot::Specular => &self.linear,
        }
    }
}

/// Shared state needed to (re)build a mesh's material bind group
pub struct MaterialBinding<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub layout: &'a wgpu::BindGroupLayout,
    pub sampler: &'a wgpu::Sampler,
    pub fallback: &'a FallbackTextures,
}

/// GPU buffers and bind group for one mesh node
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    bound: [Option<Arc<TextureData>>; 3],
    views: [Option<wgpu::TextureView>; 3],
}

impl GpuMesh {
    pub fn new(binding: &MaterialBinding, name: &str, mesh: &Mesh) -> Self {
        let data = mesh.geometry.tessellate();

        let vertex_buffer = binding.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} vertices", name)),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = binding.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} indices", name)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = binding.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} uniforms", name)),
            size: std::mem::size_of::<MeshUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let views: [Option<wgpu::TextureView>; 3] = [None, None, None];
        let bind_group = Self::create_bind_group(binding, &uniform_buffer, &views);

        let mut gpu_mesh = Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
            uniform_buffer,
            bind_group,
            bound: [None, None, None],
            views,
        };
        gpu_mesh.sync_textures(binding, mesh);
        gpu_mesh
    }

    fn create_bind_group(
        binding: &MaterialBinding,
        uniform_buffer: &wgpu::Buffer,
        views: &[Option<wgpu::TextureView>; 3],
    ) -> wgpu::BindGroup {
        let view = |i: usize| view_or_fallback(views, binding.fallback, i);

        binding.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: binding.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view(0)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(view(1)),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(view(2)),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(binding.sampler),
                },
            ],
            label: Some("material_bind_group"),
        })
    }

    /// Upload textures that resolved since the last call and rebuild the bind group
    pub fn sync_textures(&mut self, binding: &MaterialBinding, mesh: &Mesh) {
        let mut changed = false;

        for (i, slot) in SLOTS.iter().enumerate() {
            let ready = mesh.material.slot(*slot).ready();
            let same = match (ready, &self.bound[i]) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            if same {
                continue;
            }

            self.views[i] = ready.map(|data| {
                upload_texture(binding.device, binding.queue, data, &format!("{:?} map", slot))
            });
            self.bound[i] = ready.cloned();
            changed = true;
        }

        if changed {
            self.bind_group = Self::create_bind_group(binding, &self.uniform_buffer, &self.views);
        }
    }

    pub fn write_uniform(&self, queue: &wgpu::Queue, node: &Node, mesh: &Mesh) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[mesh_uniform(node, mesh)]),
        );
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn view_or_fallback<'a>(
    views: &'a [Option<wgpu::TextureView>; 3],
    fallback: &'a FallbackTextures,
    i: usize,
) -> &'a wgpu::TextureView {
    views[i].as_ref().unwrap_or(fallback.for_slot(SLOTS[i]))
}

pub fn mesh_uniform(node: &Node, mesh: &Mesh) -> MeshUniform {
    let model = node.transform.matrix();
    let material = &mesh.material;

    let (shading, specular, shininess) = match material.shading {
        Shading::Phong { specular, shininess } => (SHADING_PHONG, specular, shininess),
        Shading::Lambert => (SHADING_LAMBERT, [0.0; 3], 1.0),
        Shading::Basic => (SHADING_BASIC, [0.0; 3], 1.0),
    };

    let mut flags = 0;
    if matches!(material.map, TextureState::Ready(_)) {
        flags |= FLAG_COLOR_MAP;
    }
    if matches!(material.normal_map, TextureState::Ready(_)) {
        flags |= FLAG_NORMAL_MAP;
    }
    if matches!(material.specular_map, TextureState::Ready(_)) {
        flags |= FLAG_SPECULAR_MAP;
    }

    let [r, g, b] = material.color;
    let opacity = if material.transparent { material.opacity } else { 1.0 };

    MeshUniform {
        model: model.to_cols_array_2d(),
        normal_matrix: model.inverse().transpose().to_cols_array_2d(),
        color: [r, g, b, opacity],
        specular,
        shininess,
        shading,
        flags,
        _pad: [0; 2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Material, NodeKind};

    fn mesh_node(material: Material) -> Node {
        Node::mesh("test", Geometry::sphere(1.0, 8, 8), material)
    }

    fn uniform_for(node: &Node) -> MeshUniform {
        match &node.kind {
            NodeKind::Mesh(mesh) => mesh_uniform(node, mesh),
            _ => unreachable!(),
        }
    }

    #[test]
    fn pending_maps_set_no_flags() {
        let mut material = Material::phong([0.1; 3], 15.0);
        material.map = TextureState::Pending;
        material.normal_map = TextureState::Failed;

        let uniform = uniform_for(&mesh_node(material));
        assert_eq!(uniform.flags, 0);
        assert_eq!(uniform.shading, SHADING_PHONG);
        assert_eq!(uniform.shininess, 15.0);
    }

    #[test]
    fn ready_color_map_sets_flag() {
        let mut material = Material::lambert();
        material.map = TextureState::Ready(Arc::new(TextureData {
            width: 1,
            height: 1,
            rgba: vec![255; 4],
            color_space: ColorSpace::Srgb,
        }));

        let uniform = uniform_for(&mesh_node(material));
        assert_eq!(uniform.flags, FLAG_COLOR_MAP);
    }

    #[test]
    fn opaque_materials_ignore_opacity() {
        let mut material = Material::basic();
        material.opacity = 0.2;
        assert_eq!(uniform_for(&mesh_node(material)).color[3], 1.0);

        let material = Material::basic().with_opacity(0.2);
        assert_eq!(uniform_for(&mesh_node(material)).color[3], 0.2);
    }

    #[test]
    fn texture_formats_follow_color_space() {
        assert_eq!(texture_format(ColorSpace::Srgb), wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(texture_format(ColorSpace::Linear), wgpu::TextureFormat::Rgba8Unorm);
    }
}
