//! High-level world file loading.
//!
//! This module provides the main entry points for reading a world file and
//! assembling it into a [`Scene`]. Loading is all-or-nothing: the first
//! error aborts and no partial scene is returned.

use std::path::Path;

use thiserror::Error;

use crate::scene::{Scene, SceneError};
use crate::texture::TextureError;

use super::builders;
use super::parser::{ParseError, WorldParser};
use super::types::BlockKind;

/// Errors that can occur while loading a world.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a world file and return a Scene.
///
/// The scene is named after the file stem.
///
/// # Example
///
/// ```ignore
/// use lagoon_core::world::load_world;
///
/// let scene = load_world("assets/pool.world")?;
/// println!("Loaded {} objects", scene.object_count());
/// ```
pub fn load_world<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    load_world_from_string(&content, name)
}

/// Load a world from an in-memory string.
pub fn load_world_from_string(content: &str, name: &str) -> LoadResult<Scene> {
    let mut assembler = SceneAssembler::new(content, name);
    while assembler.step()? {}
    assembler.finish()
}

/// Drives the block-by-block scan and accumulates the scene.
struct SceneAssembler<'a> {
    parser: WorldParser<'a>,
    scene: Scene,
    blocks: usize,
}

impl<'a> SceneAssembler<'a> {
    fn new(content: &'a str, name: &str) -> Self {
        Self {
            parser: WorldParser::new(content),
            scene: Scene::new(name),
            blocks: 0,
        }
    }

    /// Process one block. Returns `false` at end of input.
    fn step(&mut self) -> LoadResult<bool> {
        let (kind, line) = match self.parser.next_block()? {
            Some(block) => block,
            None => return Ok(false),
        };

        log::debug!("Parsing {} block at line {}", kind, line);

        match kind {
            BlockKind::PointLight => self.process_point_light()?,
            BlockKind::Material => self.process_material()?,
            _ => self.process_object(kind)?,
        }

        self.blocks += 1;
        Ok(true)
    }

    fn process_point_light(&mut self) -> LoadResult<()> {
        let set = self.parser.parse_attribute_set()?;
        let light = builders::point_light(&set)?;
        self.scene.set_point_light(light)?;
        Ok(())
    }

    fn process_material(&mut self) -> LoadResult<()> {
        let name = self.parser.parse_name()?;
        let set = self.parser.parse_attribute_set()?;
        let material = builders::material(name, &set)?;
        self.scene.add_material(material)?;
        Ok(())
    }

    fn process_object(&mut self, kind: BlockKind) -> LoadResult<()> {
        let set = self.parser.parse_attribute_set()?;
        if let Some(object) = builders::object(kind, &set)? {
            log::debug!(
                "Built {:?} with {} vertices, {} indices",
                object.kind,
                object.vertex_count(),
                object.index_count()
            );
            self.scene.add_object(object);
        }
        Ok(())
    }

    fn finish(self) -> LoadResult<Scene> {
        let scene = self.scene;
        log::info!(
            "Loaded world '{}': {} blocks, {} materials, {} objects, {} textures, {} triangles",
            scene.name,
            self.blocks,
            scene.material_count(),
            scene.object_count(),
            scene.texture_count(),
            scene.total_triangle_count()
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PrimitiveKind;

    const LIGHT: &str = r#"
PointLight {
    vec3 position = { 0 0 10 }
    vec4 ambient = { 0.2 0.2 0.2 1 }
    vec4 diffuse = { 1 1 1 1 }
    vec4 specular = { 1 1 1 1 }
    vec3 attenuation = { 1 0 0 }
}
"#;

    fn material_block(name: &str, texture: &str) -> String {
        format!(
            r#"
Material {} {{
    string texture = "{}"
    vec4 emission = {{ 0 0 0 1 }}
    vec4 ambient = {{ 0.2 0.2 0.2 1 }}
    vec4 diffuse = {{ 0.8 0.8 0.8 1 }}
    vec4 specular = {{ 0 0 0 1 }}
    GLfloat shininess = 1
}}
"#,
            name, texture
        )
    }

    const SQUARE: &str = r#"
// floor tile
Square {
    string material = "tiles"
    vec3 corners[4] = { 0 0 0  1 0 0  0 1 0  1 1 0 }
    vec3 normal = { 0 0 1 }
    vec2 texture_coords[4] = { 0 0  1 0  0 1  1 1 }
}
"#;

    fn test_asset_path(relative: &str) -> std::path::PathBuf {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../..")
            .join(relative)
    }

    #[test]
    fn test_load_minimal_world() {
        let text = format!("{}{}{}", LIGHT, material_block("tiles", "tiles.tga"), SQUARE);
        let scene = load_world_from_string(&text, "test").unwrap();

        assert_eq!(scene.name, "test");
        assert!(scene.point_light.is_some());
        assert_eq!(scene.material_count(), 1);
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.objects[0].kind, PrimitiveKind::Square);
        assert_eq!(scene.objects[0].mesh.indices, vec![0, 1, 2, 1, 3, 2]);
        assert_eq!(scene.draw_list().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let scene = load_world_from_string("  // only a comment\n", "empty").unwrap();
        assert!(scene.point_light.is_none());
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_second_point_light_fails() {
        let text = format!("{}{}{}", LIGHT, SQUARE, LIGHT);
        assert!(matches!(
            load_world_from_string(&text, "test"),
            Err(LoadError::Scene(SceneError::DuplicatePointLight))
        ));
    }

    #[test]
    fn test_unknown_block_fails() {
        let text = format!("{}Sphere {{ }}", LIGHT);
        let err = load_world_from_string(&text, "test").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse(ParseError::UnknownBlock { ref keyword, line: 9 }) if keyword == "Sphere"
        ));
    }

    #[test]
    fn test_truncated_block_fails() {
        let text = "PointLight { vec3 position = { 0 0";
        assert!(matches!(
            load_world_from_string(text, "test"),
            Err(LoadError::Parse(ParseError::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn test_texture_deduplication() {
        let text = format!(
            "{}{}{}{}",
            material_block("a", "water.tga"),
            material_block("b", "EMPTY"),
            material_block("c", "tiles.tga"),
            material_block("d", "water.tga"),
        );
        let scene = load_world_from_string(&text, "test").unwrap();

        let names: Vec<&str> = scene.textures.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["water.tga", "tiles.tga"]);
    }

    #[test]
    fn test_duplicate_material_fails() {
        let text = format!("{}{}", material_block("a", "EMPTY"), material_block("a", "EMPTY"));
        assert!(matches!(
            load_world_from_string(&text, "test"),
            Err(LoadError::Scene(SceneError::DuplicateMaterial(_)))
        ));
    }

    #[test]
    fn test_dangling_material_loads_but_fails_to_draw() {
        let scene = load_world_from_string(SQUARE, "test").unwrap();
        assert!(matches!(
            scene.draw_list(),
            Err(SceneError::MaterialNotFound(ref name)) if name == "tiles"
        ));
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let text = std::fs::read_to_string(test_asset_path("assets/pool.world")).unwrap();
        let first = load_world_from_string(&text, "pool").unwrap();
        let second = load_world_from_string(&text, "pool").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_pool_asset() {
        let _ = env_logger::builder().is_test(true).try_init();

        let scene = load_world(test_asset_path("assets/pool.world")).unwrap();

        assert_eq!(scene.name, "pool");
        assert!(scene.point_light.is_some());
        assert_eq!(scene.material_count(), 4);
        assert_eq!(scene.texture_count(), 2);

        let kinds: Vec<PrimitiveKind> = scene.objects.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PrimitiveKind::Square,
                PrimitiveKind::OpenCube,
                PrimitiveKind::HorizontalMesh,
                PrimitiveKind::Cube,
            ]
        );

        let items = scene.draw_list().unwrap();
        assert_eq!(items.len(), 4);
        assert!(scene.objects.iter().all(|o| o.mesh.is_consistent()));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_world(test_asset_path("assets/does_not_exist.world")),
            Err(LoadError::Io(_))
        ));
    }
}
