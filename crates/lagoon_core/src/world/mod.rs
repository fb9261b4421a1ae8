//! World file support for Lagoon.
//!
//! A world file is a flat sequence of blocks. Each block starts with a
//! keyword, material blocks add a bare name token, and every block carries a
//! `{ ... }` body of typed attribute declarations:
//!
//! ```text
//! // comments run to end of line
//! Material tiles {
//!     string texture = "tiles.tga"
//!     vec4 diffuse = { 0.8 0.8 0.8 1 }
//!     GLfloat shininess = 16
//!     ...
//! }
//!
//! Square {
//!     string material = "tiles"
//!     vec3 corners[4] = { 0 0 0  1 0 0  0 1 0  1 1 0 }
//!     ...
//! }
//! ```
//!
//! ## Supported blocks
//!
//! - `PointLight`: the single scene light
//! - `Material <name>`: shading parameters and an optional texture
//! - `Square`, `HorizMesh`, `Cube`, `OpenCube`: geometry primitives
//!
//! ## Attribute types
//!
//! `GLfloat`, `GLint`, `string`, `vec2`, `vec3`, `vec4`. Vector attributes
//! take an optional `[n]` count and `n` brace-enclosed groups of floats.
//!
//! # Example
//!
//! ```ignore
//! use lagoon_core::world::load_world;
//!
//! let scene = load_world("assets/pool.world")?;
//! println!("Loaded {} materials, {} objects",
//!     scene.material_count(),
//!     scene.object_count());
//! ```

pub mod builders;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod types;

pub use lexer::{Lexer, Token, MAX_TOKEN_LEN};
pub use loader::{load_world, load_world_from_string, LoadError, LoadResult};
pub use parser::{ParseError, ParseResult, WorldParser};
pub use types::{Attribute, AttributeSet, AttributeType, AttributeValue, BlockKind};
