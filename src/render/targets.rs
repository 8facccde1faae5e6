use super::helpers;
use wgpu;

/// Size-dependent attachments for the scene pass.
///
/// - `color_*` is the multisampled colour buffer resolved into the swapchain.
/// - `depth_*` matches its sample count.
pub(crate) struct RenderTargets {
    pub(crate) color_tex: wgpu::Texture,
    pub(crate) color_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let color_tex = helpers::create_texture(
            device,
            "msaa_color",
            width,
            height,
            1,
            sample_count,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let depth_tex = helpers::create_texture(
            device,
            "scene_depth",
            width,
            height,
            1,
            sample_count,
            helpers::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let color_view = color_tex.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth_tex.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            color_tex,
            color_view,
            depth_tex,
            depth_view,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) {
        self.color_tex.destroy();
        self.depth_tex.destroy();
        *self = Self::new(device, format, width, height, sample_count);
    }
}

/// One depth layer per shadow-casting light, sampled as a 2D array.
pub(crate) struct ShadowMaps {
    pub(crate) size: u32,
    pub(crate) layer_views: Vec<wgpu::TextureView>,
    pub(crate) array_view: wgpu::TextureView,
    _tex: wgpu::Texture,
}

impl ShadowMaps {
    pub(crate) fn new(device: &wgpu::Device, size: u32, layers: u32) -> Self {
        let layers = layers.max(1);
        let tex = helpers::create_texture(
            device,
            "shadow_maps",
            size,
            size,
            layers,
            1,
            helpers::DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let layer_views = (0..layers)
            .map(|i| {
                tex.create_view(&wgpu::TextureViewDescriptor {
                    label: Some("shadow_layer"),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    base_array_layer: i,
                    array_layer_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();
        let array_view = tex.create_view(&wgpu::TextureViewDescriptor {
            label: Some("shadow_array"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });
        Self {
            size,
            layer_views,
            array_view,
            _tex: tex,
        }
    }
}
