//! Procedural geometry for the built-in primitive kinds.
//!
//! All generators are pure functions of their inputs. They never check that
//! the corners they are given form a planar or convex shape.
//!
//! Quads are stored as four vertices `(a, b, c, d)` laid out as
//!
//! ```text
//! a --- b
//! |     |
//! c --- d
//! ```
//!
//! and triangulated as `(a, b, c)`, `(b, d, c)`.

use lagoon_math::{Vec2, Vec3};

/// Index pattern for one quad; the second triangle ends on `c`, not `d`.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 3, 2];

/// Vertices and indices of a closed box (six faces).
pub const CUBE_VERTEX_COUNT: usize = 24;
pub const CUBE_INDEX_COUNT: usize = 36;

/// Vertices and indices of an open-topped box (five faces).
pub const OPEN_CUBE_VERTEX_COUNT: usize = 20;
pub const OPEN_CUBE_INDEX_COUNT: usize = 30;

/// Repeat [`QUAD_INDICES`] for `faces` consecutive quads, offsetting each face
/// by four vertices.
pub fn quad_indices(faces: usize) -> Vec<u32> {
    (0..faces as u32)
        .flat_map(|face| QUAD_INDICES.iter().map(move |&i| i + 4 * face))
        .collect()
}

/// Repeat every element of `items` `times` times in place: `[a, b]` x2 is
/// `[a, a, b, b]`.
pub fn repeat_each<T: Copy>(items: &[T], times: usize) -> Vec<T> {
    items
        .iter()
        .flat_map(|&item| std::iter::repeat(item).take(times))
        .collect()
}

/// Repeat the whole of `block` `times` times: `[a, b]` x2 is `[a, b, a, b]`.
pub fn repeat_block<T: Copy>(block: &[T], times: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(block.len() * times);
    for _ in 0..times {
        out.extend_from_slice(block);
    }
    out
}

/// Parameters of a horizontal grid mesh.
///
/// `w` and `h` count vertices per row/column, so a grid has `(w-1)*(h-1)`
/// cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub w: u32,
    pub h: u32,
    pub first_x: f32,
    pub last_x: f32,
    pub first_y: f32,
    pub last_y: f32,
    pub z: f32,
}

impl GridSpec {
    pub fn vertex_count(&self) -> usize {
        self.w as usize * self.h as usize
    }

    pub fn index_count(&self) -> usize {
        6 * (self.w as usize - 1) * (self.h as usize - 1)
    }

    /// Whether the step computation is well defined (`w >= 2 && h >= 2`).
    pub fn is_valid(&self) -> bool {
        self.w >= 2 && self.h >= 2
    }
}

/// Generate grid positions (row-major, `y * w + x`) and triangle indices.
///
/// Callers must reject grids with `w < 2` or `h < 2`.
pub fn generate_grid(spec: &GridSpec) -> (Vec<Vec3>, Vec<u32>) {
    debug_assert!(spec.is_valid(), "degenerate grid {}x{}", spec.w, spec.h);

    let (w, h) = (spec.w, spec.h);
    let step_x = (spec.last_x - spec.first_x) / (w - 1) as f32;
    let step_y = (spec.last_y - spec.first_y) / (h - 1) as f32;

    let mut positions = Vec::with_capacity(spec.vertex_count());
    for y in 0..h {
        for x in 0..w {
            positions.push(Vec3::new(
                spec.first_x + x as f32 * step_x,
                spec.first_y + y as f32 * step_y,
                spec.z,
            ));
        }
    }

    let mut indices = Vec::with_capacity(spec.index_count());
    for y in 0..h - 1 {
        for x in 0..w - 1 {
            let a = y * w + x;
            let b = a + 1;
            let c = a + w;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }

    (positions, indices)
}

/// Spread the texture rectangle `from..to` over a `w x h` grid, one
/// coordinate per vertex in the same order as [`generate_grid`].
pub fn grid_tex_coords(w: u32, h: u32, from: Vec2, to: Vec2) -> Vec<Vec2> {
    let span = to - from;
    let mut coords = Vec::with_capacity(w as usize * h as usize);
    for y in 0..h {
        for x in 0..w {
            let fx = x as f32 / (w - 1) as f32;
            let fy = y as f32 / (h - 1) as f32;
            coords.push(from + span * Vec2::new(fx, fy));
        }
    }
    coords
}

// Corner indices of each side face as (top, top, bottom, bottom) pairs:
// left, right, back, forward.
const SIDE_FACES: [[usize; 2]; 4] = [[0, 1], [2, 3], [1, 3], [0, 2]];

fn push_sides(positions: &mut Vec<Vec3>, top: &[Vec3; 4], bottom: &[Vec3; 4]) {
    for [i, j] in SIDE_FACES {
        positions.extend_from_slice(&[top[i], top[j], bottom[i], bottom[j]]);
    }
}

/// Positions of a closed box: faces top, bottom, left, right, back, forward.
pub fn cube_positions(top: &[Vec3; 4], bottom: &[Vec3; 4]) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(CUBE_VERTEX_COUNT);
    positions.extend_from_slice(top);
    positions.extend_from_slice(bottom);
    push_sides(&mut positions, top, bottom);
    positions
}

/// Positions of an open-topped box: faces bottom, left, right, back, forward.
pub fn open_cube_positions(top: &[Vec3; 4], bottom: &[Vec3; 4]) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(OPEN_CUBE_VERTEX_COUNT);
    positions.extend_from_slice(bottom);
    push_sides(&mut positions, top, bottom);
    positions
}
