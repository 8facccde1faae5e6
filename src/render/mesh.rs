use super::helpers;
use glam::Mat4;
use hero_core::{MeshPart, TextureImage};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    flags: [f32; 4],
}

impl ObjectUniforms {
    pub(crate) fn new(model: Mat4, color: [f32; 4], receive_shadow: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color,
            flags: [if receive_shadow { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// Per-object bind group layout: uniforms, base-colour texture and its
/// sampler. Untextured parts bind a 1x1 white texture.
pub(crate) struct ObjectBindings {
    pub(crate) layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: wgpu::TextureView,
}

impl ObjectBindings {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[
                helpers::uniform_layout_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("base_color_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white = upload_texture(
            device,
            queue,
            "white",
            &TextureImage {
                width: 1,
                height: 1,
                rgba: vec![255; 4],
            },
        );
        Self {
            layout,
            sampler,
            white,
        }
    }

    fn bind_group(
        &self,
        device: &wgpu::Device,
        uniforms: &wgpu::Buffer,
        texture: Option<&wgpu::TextureView>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture.unwrap_or(&self.white)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    image: &TextureImage,
) -> wgpu::TextureView {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &image.rgba,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Uploaded geometry plus its per-object uniform slot.
pub(crate) struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    // Keeps the base-colour texture alive alongside its bind group.
    _texture: Option<wgpu::TextureView>,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) local: Mat4,
    pub(crate) color: [f32; 4],
    pub(crate) cast_shadow: bool,
    pub(crate) receive_shadow: bool,
}

impl GpuMesh {
    pub(crate) fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bindings: &ObjectBindings,
        part: &MeshPart,
    ) -> Self {
        let mesh = &part.mesh;
        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .zip(mesh.normals.iter())
            .enumerate()
            .map(|(i, (p, n))| Vertex {
                position: *p,
                normal: *n,
                uv: mesh.uvs.get(i).copied().unwrap_or_default(),
            })
            .collect();
        let label = part.name.as_deref().unwrap_or("mesh");
        let max_dim = device.limits().max_texture_dimension_2d;
        let texture = part.base_color_texture.as_ref().and_then(|image| {
            if image.width > max_dim || image.height > max_dim {
                log::warn!(
                    "[render] {} texture {}x{} exceeds device limit {}, using base colour",
                    label,
                    image.width,
                    image.height,
                    max_dim
                );
                return None;
            }
            Some(upload_texture(device, queue, label, image))
        });
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&part.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = helpers::uniform_buffer::<ObjectUniforms>(device, "object_uniforms");
        let bind_group = bindings.bind_group(device, &uniform_buffer, texture.as_ref());
        Self {
            vertex_buffer,
            index_buffer,
            index_count: part.mesh.indices.len() as u32,
            uniform_buffer,
            _texture: texture,
            bind_group,
            local: part.local,
            color: part.base_color,
            cast_shadow: part.cast_shadow,
            receive_shadow: part.receive_shadow,
        }
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, parent: Mat4) {
        let u = ObjectUniforms::new(parent * self.local, self.color, self.receive_shadow);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, group: u32) {
        pass.set_bind_group(group, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
