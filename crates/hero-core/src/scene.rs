use crate::constants::*;
use crate::model::{MeshData, MeshPart, Model};
use glam::{Mat4, Vec3};

/// Orthographic shadow frustum attached to a directional light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowCamera {
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
    pub map_size: u32,
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self {
            half_extent: SHADOW_HALF_EXTENT,
            near: SHADOW_NEAR,
            far: SHADOW_FAR,
            map_size: SHADOW_MAP_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub shadow: Option<ShadowCamera>,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene origin towards the light.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }

    #[inline]
    pub fn casts_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// Light-space transform used to render and sample the shadow map.
    /// The light looks from its position at the origin.
    pub fn shadow_view_projection(&self) -> Option<Mat4> {
        let shadow = self.shadow?;
        let up = if self.direction().abs_diff_eq(Vec3::Y, 1e-4) {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, up);
        let e = shadow.half_extent;
        let proj = Mat4::orthographic_rh(-e, e, -e, e, shadow.near, shadow.far);
        Some(proj * view)
    }
}

/// The fixed three-light rig. Lights whose index is listed in
/// [`SHADOW_CASTER_INDICES`] get a shadow camera.
pub fn default_lights() -> Vec<DirectionalLight> {
    LIGHTS
        .iter()
        .enumerate()
        .map(|(i, l)| DirectionalLight {
            position: Vec3::new(l[0], l[1], l[2]),
            color: Vec3::ONE,
            intensity: l[3],
            shadow: SHADOW_CASTER_INDICES
                .contains(&i)
                .then(ShadowCamera::default),
        })
        .collect()
}

/// Square plane in the XY plane facing +Z, centred on the origin.
pub fn plane_mesh(size: f32) -> MeshData {
    let h = size * 0.5;
    MeshData {
        positions: vec![[-h, -h, 0.0], [h, -h, 0.0], [h, h, 0.0], [-h, h, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        uvs: vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

pub fn ground_plane() -> MeshPart {
    MeshPart {
        name: Some("ground".to_string()),
        local: Mat4::from_translation(Vec3::new(0.0, 0.0, GROUND_Z)),
        mesh: plane_mesh(GROUND_SIZE),
        base_color: [GROUND_COLOR[0], GROUND_COLOR[1], GROUND_COLOR[2], 1.0],
        base_color_texture: None,
        cast_shadow: true,
        receive_shadow: true,
    }
}

/// Everything drawn in the hero scene.
#[derive(Clone, Debug)]
pub struct Scene {
    pub lights: Vec<DirectionalLight>,
    pub ground: MeshPart,
    subject: Option<Model>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            lights: default_lights(),
            ground: ground_plane(),
            subject: None,
        }
    }

    #[inline]
    pub fn subject(&self) -> Option<&Model> {
        self.subject.as_ref()
    }

    #[inline]
    pub fn subject_mut(&mut self) -> Option<&mut Model> {
        self.subject.as_mut()
    }

    /// Attach the subject. Returns `false` if one is already attached; the
    /// scene holds exactly one.
    pub fn attach_subject(&mut self, model: Model) -> bool {
        if self.subject.is_some() {
            return false;
        }
        self.subject = Some(model);
        true
    }

    pub fn shadow_casters(&self) -> impl Iterator<Item = &DirectionalLight> {
        self.lights.iter().filter(|l| l.casts_shadow())
    }
}
