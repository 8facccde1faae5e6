//! Binary glTF import flattened into drawable mesh parts.

use crate::error::LoadError;
use crate::state::Transform;
use glam::{Mat4, Vec3};

/// Triangle-list geometry. `uvs` is empty or one entry per position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Decoded base-colour texture, tightly packed RGBA8 (sRGB encoded).
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// Expand a decoded glTF image to RGBA8. 16-bit and float images are
    /// not supported and yield `None`.
    pub fn from_gltf(image: &gltf::image::Data) -> Option<Self> {
        use gltf::image::Format;
        let px = image.width as usize * image.height as usize;
        let rgba: Vec<u8> = match image.format {
            Format::R8G8B8A8 => image.pixels.clone(),
            Format::R8G8B8 => image
                .pixels
                .chunks_exact(3)
                .flat_map(|c| [c[0], c[1], c[2], 255])
                .collect(),
            Format::R8G8 => image
                .pixels
                .chunks_exact(2)
                .flat_map(|c| [c[0], c[0], c[0], c[1]])
                .collect(),
            Format::R8 => image.pixels.iter().flat_map(|&l| [l, l, l, 255]).collect(),
            other => {
                log::warn!("[model] unsupported texture format {:?}", other);
                return None;
            }
        };
        (rgba.len() == px * 4).then_some(TextureImage {
            width: image.width,
            height: image.height,
            rgba,
        })
    }
}

/// One drawable primitive with its transform relative to the model root.
#[derive(Clone, Debug)]
pub struct MeshPart {
    pub name: Option<String>,
    pub local: Mat4,
    pub mesh: MeshData,
    pub base_color: [f32; 4],
    pub base_color_texture: Option<TextureImage>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// A loaded node hierarchy. `root` is the transform animated by the scene.
#[derive(Clone, Debug)]
pub struct Model {
    pub root: Transform,
    pub parts: Vec<MeshPart>,
}

impl Model {
    /// Parse a self-contained `.glb` (or embedded `.gltf`) byte slice.
    pub fn from_glb(bytes: &[u8]) -> Result<Model, LoadError> {
        let (doc, buffers, images) = gltf::import_slice(bytes)?;
        let scene = doc
            .default_scene()
            .or_else(|| doc.scenes().next())
            .ok_or(LoadError::NoScene)?;

        let mut parts = Vec::new();
        for node in scene.nodes() {
            collect_parts(&node, Mat4::IDENTITY, &buffers, &images, &mut parts);
        }
        if parts.is_empty() {
            return Err(LoadError::NoMeshes);
        }
        log::info!("[model] parsed {} mesh parts", parts.len());
        Ok(Model {
            root: Transform::default(),
            parts,
        })
    }

    /// Visit every part in the hierarchy.
    pub fn traverse_mut(&mut self, mut f: impl FnMut(&mut MeshPart)) {
        for part in &mut self.parts {
            f(part);
        }
    }

    pub fn set_shadows(&mut self, cast: bool, receive: bool) {
        self.traverse_mut(|p| {
            p.cast_shadow = cast;
            p.receive_shadow = receive;
        });
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.indices.len() / 3).sum()
    }
}

fn collect_parts(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    out: &mut Vec<MeshPart>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("[model] skipping non-triangle primitive {:?}", prim.mode());
                continue;
            }
            let reader = prim.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None if positions.len() % 3 == 0 => (0..positions.len() as u32).collect(),
                None => continue,
            };
            if indices.is_empty() {
                continue;
            }
            let normals = match reader.read_normals() {
                Some(n) => n.collect(),
                None => generate_normals(&positions, &indices),
            };
            let pbr = prim.material().pbr_metallic_roughness();
            let texture_info = pbr.base_color_texture();
            let uv_set = texture_info.as_ref().map(|t| t.tex_coord()).unwrap_or(0);
            let uvs: Vec<[f32; 2]> = reader
                .read_tex_coords(uv_set)
                .map(|t| t.into_f32().collect())
                .filter(|uvs: &Vec<[f32; 2]>| uvs.len() == positions.len())
                .unwrap_or_default();
            let base_color_texture = texture_info
                .filter(|_| !uvs.is_empty())
                .and_then(|t| images.get(t.texture().source().index()))
                .and_then(TextureImage::from_gltf);
            out.push(MeshPart {
                name: node.name().map(str::to_string),
                local: world,
                mesh: MeshData {
                    positions,
                    normals,
                    uvs,
                    indices,
                },
                base_color: pbr.base_color_factor(),
                base_color_texture,
                cast_shadow: false,
                receive_shadow: false,
            });
        }
    }
    for child in node.children() {
        collect_parts(&child, world, buffers, images, out);
    }
}

/// Smooth vertex normals for meshes exported without them: each vertex gets
/// the area-weighted sum of its adjacent face normals.
pub fn generate_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        let n = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z).to_array())
        .collect()
}
