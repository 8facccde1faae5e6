use glam::Mat4;
use hero_core::{fit_within, Model, PerspectiveCamera, Scene, ViewportState, MSAA_SAMPLES};
use web_sys as web;

mod helpers;
mod mesh;
mod targets;

use mesh::{GpuMesh, ObjectBindings, Vertex};
use targets::{RenderTargets, ShadowMaps};

const MAX_LIGHTS: usize = 3;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightPacked {
    dir_intensity: [f32; 4],
    color_layer: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    lights: [LightPacked; MAX_LIGHTS],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ShadowUniforms {
    light_view_proj: [[f32; 4]; 4],
}

fn pack_globals(camera: &PerspectiveCamera, scene: &Scene, shadow_size: u32) -> Globals {
    let mut lights = [LightPacked::default(); MAX_LIGHTS];
    let mut layer = 0.0_f32;
    for (slot, light) in lights.iter_mut().zip(scene.lights.iter()) {
        let d = light.direction();
        let (layer_index, view_proj) = match light.shadow_view_projection() {
            Some(vp) => {
                let l = layer;
                layer += 1.0;
                (l, vp)
            }
            None => (-1.0, Mat4::IDENTITY),
        };
        *slot = LightPacked {
            dir_intensity: [d.x, d.y, d.z, light.intensity],
            color_layer: [light.color.x, light.color.y, light.color.z, layer_index],
            view_proj: view_proj.to_cols_array_2d(),
        };
    }
    let p = camera.position;
    Globals {
        view_proj: camera.view_projection().to_cols_array_2d(),
        camera_pos: [p.x, p.y, p.z, 1.0],
        lights,
        params: [
            shadow_size as f32,
            scene.lights.len().min(MAX_LIGHTS) as f32,
            0.0,
            0.0,
        ],
    }
}

struct ShadowPass {
    layer: usize,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    max_dimension: u32,
    sample_count: u32,
    targets: RenderTargets,
    shadow_maps: ShadowMaps,

    scene_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    objects: ObjectBindings,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    shadow_sample_bind_group: wgpu::BindGroup,
    shadow_passes: Vec<ShadowPass>,

    ground: GpuMesh,
    subject: Vec<GpuMesh>,
}

impl GpuState {
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        viewport: &ViewportState,
        scene: &Scene,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits avoid passing unknown fields to older WebGPU impls.
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let max_dimension = device.limits().max_texture_dimension_2d;
        let (width, height) = viewport.physical_size();
        let (width, height) = fit_within(width, height, max_dimension);
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: helpers::pick_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sample_count = MSAA_SAMPLES;
        let targets = RenderTargets::new(&device, format, width, height, sample_count);

        let casters: Vec<_> = scene.shadow_casters().collect();
        let shadow_size = casters
            .iter()
            .filter_map(|l| l.shadow.map(|s| s.map_size))
            .max()
            .unwrap_or(1)
            .min(max_dimension);
        let shadow_maps = ShadowMaps::new(&device, shadow_size, casters.len() as u32);

        // Bind group layouts
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let shadow_sample_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_sample_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2Array,
                        sample_type: wgpu::TextureSampleType::Depth,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let objects = ObjectBindings::new(&device, &queue);
        let light_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("light_bgl"),
            entries: &[helpers::uniform_layout_entry(0, wgpu::ShaderStages::VERTEX)],
        });

        // Uniforms and bind groups
        let globals_buffer = helpers::uniform_buffer::<Globals>(&device, "globals");
        let globals_bind_group =
            helpers::single_buffer_bind_group(&device, "globals_bg", &globals_bgl, &globals_buffer);
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let shadow_sample_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_sample_bg"),
            layout: &shadow_sample_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&shadow_maps.array_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        // Lights never move, so each caster's light-space matrix is written once.
        let shadow_passes = casters
            .iter()
            .enumerate()
            .filter_map(|(layer, light)| {
                let vp = light.shadow_view_projection()?;
                let buffer = helpers::uniform_buffer::<ShadowUniforms>(&device, "shadow_light");
                queue.write_buffer(
                    &buffer,
                    0,
                    bytemuck::bytes_of(&ShadowUniforms {
                        light_view_proj: vp.to_cols_array_2d(),
                    }),
                );
                let bind_group = helpers::single_buffer_bind_group(
                    &device,
                    "shadow_light_bg",
                    &light_bgl,
                    &buffer,
                );
                Some(ShadowPass { layer, bind_group })
            })
            .collect();

        // Pipelines
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(hero_core::SCENE_WGSL.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(hero_core::SHADOW_WGSL.into()),
        });
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &shadow_sample_bgl, &objects.layout],
            push_constant_ranges: &[],
        });
        let shadow_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pl"),
            bind_group_layouts: &[&light_bgl, &objects.layout],
            push_constant_ranges: &[],
        });
        let primitive = wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            ..Default::default()
        };
        let scene_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&scene_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive,
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&shadow_pl),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_shadow"),
                buffers: &[Vertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive,
            depth_stencil: Some(wgpu::DepthStencilState {
                format: helpers::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: None,
            cache: None,
            multiview: None,
        });

        let ground = GpuMesh::upload(&device, &queue, &objects, &scene.ground);
        log::info!(
            "[render] {}x{} format={:?} shadows={}x{}@{}",
            width,
            height,
            format,
            casters.len(),
            shadow_size,
            shadow_size
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            max_dimension,
            sample_count,
            targets,
            shadow_maps,
            scene_pipeline,
            shadow_pipeline,
            objects,
            globals_buffer,
            globals_bind_group,
            shadow_sample_bind_group,
            shadow_passes,
            ground,
            subject: Vec::new(),
        })
    }

    /// Upload the loaded model. Replaces any previous subject geometry.
    pub fn set_subject(&mut self, model: &Model) {
        self.subject = model
            .parts
            .iter()
            .map(|part| GpuMesh::upload(&self.device, &self.queue, &self.objects, part))
            .collect();
    }

    /// Reconfigure for a new backing size, scaled down to the device's
    /// texture limit. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let (width, height) = fit_within(width, height, self.max_dimension);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.targets.recreate(
            &self.device,
            self.config.format,
            width,
            height,
            self.sample_count,
        );
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame. Lost/outdated surfaces are reconfigured and the frame
    /// is skipped.
    pub fn render(&mut self, camera: &PerspectiveCamera, scene: &Scene) -> anyhow::Result<()> {
        match self.draw(camera, scene) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("render error: {:?}", e)),
        }
    }

    fn draw(
        &mut self,
        camera: &PerspectiveCamera,
        scene: &Scene,
    ) -> Result<(), wgpu::SurfaceError> {
        let globals = pack_globals(camera, scene, self.shadow_maps.size);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.ground.write_uniforms(&self.queue, Mat4::IDENTITY);
        let subject_root = scene.subject().map(|m| m.root.matrix());
        if let Some(root) = subject_root {
            for mesh in &self.subject {
                mesh.write_uniforms(&self.queue, root);
            }
        }
        let subject: &[GpuMesh] = if subject_root.is_some() {
            &self.subject
        } else {
            &[]
        };

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        for sp in &self.shadow_passes {
            let Some(layer_view) = self.shadow_maps.layer_views.get(sp.layer) else {
                continue;
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: layer_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.shadow_pipeline);
            pass.set_bind_group(0, &sp.bind_group, &[]);
            for mesh in std::iter::once(&self.ground)
                .chain(subject.iter())
                .filter(|m| m.cast_shadow)
            {
                mesh.draw(&mut pass, 1);
            }
        }

        {
            let (color_view, resolve_target) = if self.sample_count > 1 {
                (&self.targets.color_view, Some(&view))
            } else {
                (&view, None)
            };
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.scene_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_bind_group(1, &self.shadow_sample_bind_group, &[]);
            for mesh in std::iter::once(&self.ground).chain(subject.iter()) {
                mesh.draw(&mut pass, 2);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
