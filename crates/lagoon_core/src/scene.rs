//! Scene types for Lagoon.
//!
//! A [`Scene`] is built once by the world loader and is read-only afterwards.
//! Materials are referenced from objects by name and resolved at draw time,
//! so a dangling name only surfaces through [`Scene::material`] or
//! [`Scene::draw_list`].

use lagoon_math::{Aabb, Vec3, Vec4};
use serde::Serialize;
use thiserror::Error;

use crate::mesh::Mesh;

/// Texture name meaning "this material has no texture".
pub const NO_TEXTURE: &str = "EMPTY";

/// Semantic errors raised while assembling or resolving a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Only one point light is supported")]
    DuplicatePointLight,

    #[error("Material \"{0}\" is declared more than once")]
    DuplicateMaterial(String),

    #[error("Material \"{0}\" not found")]
    MaterialNotFound(String),

    #[error("Texture \"{0}\" not found")]
    TextureNotFound(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// The single point light of a scene.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,

    /// Constant, linear and quadratic attenuation factors
    pub attenuation: Vec3,
}

/// A named bundle of shading parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Material {
    /// Unique material name
    pub name: String,

    /// Texture file name, or [`NO_TEXTURE`]
    pub texture_name: String,

    pub emission: Vec4,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Material {
    /// Texture file name, `None` for the `"EMPTY"` sentinel.
    pub fn texture(&self) -> Option<&str> {
        if self.texture_name == NO_TEXTURE {
            None
        } else {
            Some(&self.texture_name)
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture().is_some()
    }
}

/// A texture referenced by at least one material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextureRef {
    /// Sequential id in first-seen order
    pub id: usize,

    /// File name as written in the material
    pub name: String,
}

/// Shape a world object was generated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PrimitiveKind {
    Square,
    HorizontalMesh,
    Cube,
    OpenCube,
}

/// One generated primitive and the material it is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldObject {
    pub material_name: String,
    pub kind: PrimitiveKind,
    pub mesh: Mesh,
}

impl WorldObject {
    pub fn new(material_name: impl Into<String>, kind: PrimitiveKind, mesh: Mesh) -> Self {
        Self {
            material_name: material_name.into(),
            kind,
            mesh,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.mesh.indices.len()
    }
}

/// An object with its material and texture resolved, ready to draw.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem<'a> {
    pub object: &'a WorldObject,
    pub material: &'a Material,
    pub texture: Option<&'a TextureRef>,
}

/// A complete scene: light, materials, objects and referenced textures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    pub point_light: Option<PointLight>,

    /// Materials in declaration order
    pub materials: Vec<Material>,

    /// Objects in declaration order (draw order)
    pub objects: Vec<WorldObject>,

    /// Distinct texture names in first-seen order
    pub textures: Vec<TextureRef>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the point light; a scene holds at most one.
    pub fn set_point_light(&mut self, light: PointLight) -> SceneResult<()> {
        if self.point_light.is_some() {
            return Err(SceneError::DuplicatePointLight);
        }
        self.point_light = Some(light);
        Ok(())
    }

    /// Add a material and register its texture. Returns the material index.
    pub fn add_material(&mut self, material: Material) -> SceneResult<usize> {
        if self.materials.iter().any(|m| m.name == material.name) {
            return Err(SceneError::DuplicateMaterial(material.name));
        }

        if let Some(texture) = material.texture() {
            self.register_texture(texture);
        }

        let id = self.materials.len();
        self.materials.push(material);
        Ok(id)
    }

    /// Register a texture name, returning its id. Known names keep their id.
    pub fn register_texture(&mut self, name: &str) -> usize {
        if let Some(existing) = self.textures.iter().find(|t| t.name == name) {
            return existing.id;
        }

        let id = self.textures.len();
        log::debug!("Registered texture {} as #{}", name, id);
        self.textures.push(TextureRef {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Add an object and return its index.
    pub fn add_object(&mut self, object: WorldObject) -> usize {
        let id = self.objects.len();
        self.objects.push(object);
        id
    }

    /// Look a material up by name.
    pub fn material(&self, name: &str) -> SceneResult<&Material> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| SceneError::MaterialNotFound(name.to_string()))
    }

    /// Look a texture entry up by file name.
    pub fn texture(&self, name: &str) -> Option<&TextureRef> {
        self.textures.iter().find(|t| t.name == name)
    }

    /// Resolve every object's material and texture, in draw order.
    ///
    /// Fails on the first object whose material (or that material's texture)
    /// cannot be resolved.
    pub fn draw_list(&self) -> SceneResult<Vec<DrawItem<'_>>> {
        self.objects
            .iter()
            .map(|object| {
                let material = self.material(&object.material_name)?;
                let texture = match material.texture() {
                    Some(name) => Some(
                        self.texture(name)
                            .ok_or_else(|| SceneError::TextureNotFound(name.to_string()))?,
                    ),
                    None => None,
                };
                Ok(DrawItem {
                    object,
                    material,
                    texture,
                })
            })
            .collect()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Get total triangle count across all objects.
    pub fn total_triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }

    /// Get total vertex count across all objects.
    pub fn total_vertex_count(&self) -> usize {
        self.objects.iter().map(|o| o.vertex_count()).sum()
    }

    /// Bounding box of every object in the scene.
    pub fn world_bounds(&self) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::empty(), |acc, o| acc.union(&o.mesh.bounds))
    }
}
