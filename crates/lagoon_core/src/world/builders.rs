//! Entity builders: turn a parsed [`AttributeSet`] into scene types.
//!
//! Each builder pulls its attributes by exact type, name and count. Any
//! missing or mismatched attribute aborts the build; attributes a builder
//! does not ask for are ignored.

use lagoon_math::{Vec2, Vec3};

use crate::geometry::{
    self, GridSpec, CUBE_INDEX_COUNT, CUBE_VERTEX_COUNT, OPEN_CUBE_INDEX_COUNT,
    OPEN_CUBE_VERTEX_COUNT,
};
use crate::mesh::Mesh;
use crate::scene::{Material, PointLight, PrimitiveKind, WorldObject};

use super::parser::{ParseError, ParseResult};
use super::types::{AttributeSet, BlockKind};

/// Build the scene's point light.
pub fn point_light(set: &AttributeSet) -> ParseResult<PointLight> {
    Ok(PointLight {
        position: set.vec3("position")?,
        ambient: set.vec4("ambient")?,
        diffuse: set.vec4("diffuse")?,
        specular: set.vec4("specular")?,
        attenuation: set.vec3("attenuation")?,
    })
}

/// Build a material. The name is the bare token preceding the block.
pub fn material(name: impl Into<String>, set: &AttributeSet) -> ParseResult<Material> {
    Ok(Material {
        name: name.into(),
        texture_name: set.string("texture")?.to_string(),
        emission: set.vec4("emission")?,
        ambient: set.vec4("ambient")?,
        diffuse: set.vec4("diffuse")?,
        specular: set.vec4("specular")?,
        shininess: set.float("shininess")?,
    })
}

/// Build any geometry block. Returns `None` for non-geometry kinds.
pub fn object(kind: BlockKind, set: &AttributeSet) -> ParseResult<Option<WorldObject>> {
    let object = match kind {
        BlockKind::Square => square(set)?,
        BlockKind::HorizMesh => horiz_mesh(set)?,
        BlockKind::Cube => cube(set)?,
        BlockKind::OpenCube => open_cube(set)?,
        BlockKind::PointLight | BlockKind::Material => return Ok(None),
    };
    Ok(Some(object))
}

/// A single quad with one shared normal.
pub fn square(set: &AttributeSet) -> ParseResult<WorldObject> {
    let material = set.string("material")?;
    let corners = set.vec3_array::<4>("corners")?;
    let normal = set.vec3("normal")?;
    let tex_coords = set.vec2_array::<4>("texture_coords")?;

    let mesh = Mesh::new(
        corners.to_vec(),
        vec![normal; 4],
        tex_coords.to_vec(),
        geometry::quad_indices(1),
    );

    Ok(WorldObject::new(material, PrimitiveKind::Square, mesh))
}

/// A regular `w x h` vertex grid at constant height.
pub fn horiz_mesh(set: &AttributeSet) -> ParseResult<WorldObject> {
    let material = set.string("material")?;
    let w = set.int("w")?;
    let h = set.int("h")?;
    if w < 2 || h < 2 {
        return Err(ParseError::DegenerateGrid { w, h });
    }

    let spec = GridSpec {
        w: w as u32,
        h: h as u32,
        first_x: set.float("firstX")?,
        last_x: set.float("lastX")?,
        first_y: set.float("firstY")?,
        last_y: set.float("lastY")?,
        z: set.float("z")?,
    };
    let normal = set.vec3("normal")?;
    let [from, to] = set.vec2_array::<2>("texture_coords_from_to")?;

    let (positions, indices) = geometry::generate_grid(&spec);
    let normals = vec![normal; spec.vertex_count()];
    let tex_coords = geometry::grid_tex_coords(spec.w, spec.h, from, to);

    let mesh = Mesh::new(positions, normals, tex_coords, indices);
    Ok(WorldObject::new(material, PrimitiveKind::HorizontalMesh, mesh))
}

/// A closed box: six independent quads.
pub fn cube(set: &AttributeSet) -> ParseResult<WorldObject> {
    let material = set.string("material")?;
    let top = set.vec3_array::<4>("top")?;
    let bottom = set.vec3_array::<4>("bottom")?;
    let normals: &[Vec3] = set.vec3s("normal", 6)?;
    let tex_coords = set.vec2_array::<4>("texture_coords")?;

    let mesh = Mesh::new(
        geometry::cube_positions(&top, &bottom),
        geometry::repeat_each(normals, 4),
        geometry::repeat_block(&tex_coords, 6),
        geometry::quad_indices(6),
    );
    debug_assert_eq!(mesh.vertex_count(), CUBE_VERTEX_COUNT);
    debug_assert_eq!(mesh.indices.len(), CUBE_INDEX_COUNT);

    Ok(WorldObject::new(material, PrimitiveKind::Cube, mesh))
}

/// A box without its top face: bottom plus four sides.
pub fn open_cube(set: &AttributeSet) -> ParseResult<WorldObject> {
    let material = set.string("material")?;
    let top = set.vec3_array::<4>("top")?;
    let bottom = set.vec3_array::<4>("bottom")?;
    let normals: &[Vec3] = set.vec3s("normal", 5)?;
    let side_coords = set.vec2_array::<4>("texture_coords")?;
    let bottom_coords = set.vec2_array::<4>("texture_coords_bottom")?;

    let mut tex_coords: Vec<Vec2> = Vec::with_capacity(OPEN_CUBE_VERTEX_COUNT);
    tex_coords.extend_from_slice(&bottom_coords);
    tex_coords.extend(geometry::repeat_block(&side_coords, 4));

    let mesh = Mesh::new(
        geometry::open_cube_positions(&top, &bottom),
        geometry::repeat_each(normals, 4),
        tex_coords,
        geometry::quad_indices(5),
    );
    debug_assert_eq!(mesh.vertex_count(), OPEN_CUBE_VERTEX_COUNT);
    debug_assert_eq!(mesh.indices.len(), OPEN_CUBE_INDEX_COUNT);

    Ok(WorldObject::new(material, PrimitiveKind::OpenCube, mesh))
}
