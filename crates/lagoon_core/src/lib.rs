//! Lagoon Core - world file loading and scene geometry.
//!
//! This crate provides:
//!
//! - **World files**: lexing, attribute parsing and scene assembly
//! - **Scene types**: `Scene`, `PointLight`, `Material`, `WorldObject`
//! - **Geometry**: procedural quads, grids and boxes as `Mesh` buffers
//! - **Textures**: decoding referenced texture files to RGBA
//!
//! # Example
//!
//! ```ignore
//! use lagoon_core::world::load_world;
//! use lagoon_core::texture::TextureCache;
//!
//! let scene = load_world("assets/pool.world")?;
//! let mut textures = TextureCache::with_base_dir("assets");
//! textures.load_scene(&scene)?;
//!
//! for item in scene.draw_list()? {
//!     println!("{:?} with {}", item.object.kind, item.material.name);
//! }
//! ```

pub mod geometry;
pub mod mesh;
pub mod scene;
pub mod texture;
pub mod world;

// Re-export commonly used types
pub use mesh::{Mesh, Vertex};
pub use scene::{
    DrawItem, Material, PointLight, PrimitiveKind, Scene, SceneError, TextureRef, WorldObject,
};
pub use texture::{TextureCache, TextureError, TextureImage};
pub use world::{load_world, load_world_from_string, LoadError, ParseError};
