//! Procedural mesh sources: axis gizmo, tile blocks, actor pyramids and a
//! growing plant.
//!
//! All geometry is in world units with z up; tile `(x, y)` covers
//! `[x, x+1) * tile_size` by `[y, y+1) * tile_size`.

use glam::{IVec2, Vec3, Vec4};
use rand::Rng;

use super::mesh::{MeshBuilder, MeshObject};
use super::source::MeshSource;

const AXIS_COLORS: [Vec4; 3] = [
    Vec4::new(1.0, 0.0, 0.0, 1.0),
    Vec4::new(0.0, 0.0, 1.0, 1.0),
    Vec4::new(0.0, 1.0, 0.0, 1.0),
];

/// Three thin double-sided triangles along +x (red), +y (blue) and +z
/// (green), each `length * scale` long and `width * scale` wide.
#[must_use]
pub fn axis_gizmo(scale: f32, length: f32, width: f32) -> MeshObject {
    let l = length * scale;
    let w = width * scale;
    // (tip, width offset, front normal) per axis
    let axes = [
        (Vec3::new(l, 0.0, 0.0), Vec3::new(0.0, -w, 0.0), Vec3::Z),
        (Vec3::new(0.0, l, 0.0), Vec3::new(0.0, 0.0, -w), Vec3::NEG_X),
        (Vec3::new(0.0, 0.0, l), Vec3::new(-w, 0.0, 0.0), Vec3::NEG_Y),
    ];

    let mut b = MeshBuilder::default();
    for ((tip, side, normal), color) in axes.into_iter().zip(AXIS_COLORS) {
        let front = b.vertex(Vec3::ZERO, color, normal);
        let _ = b.vertex(side, color, normal);
        let _ = b.vertex(tip, color, normal);
        let back = b.vertex(Vec3::ZERO, color, -normal);
        let _ = b.vertex(side, color, -normal);
        let _ = b.vertex(tip, color, -normal);
        b.triangles(front, &[[0, 1, 2]]);
        b.triangles(back, &[[2, 1, 0]]);
    }
    b.build()
}

const BLOCK_TRIANGLES: [[u32; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [0, 4, 7],
    [0, 7, 3],
    [3, 7, 6],
    [3, 6, 2],
    [2, 6, 5],
    [2, 5, 1],
    [1, 5, 4],
    [1, 4, 0],
    [4, 5, 6],
    [4, 6, 7],
];

/// A box over one map tile: tile-high when `blocked`, flat otherwise.
#[must_use]
pub fn tile_block(
    tile: IVec2,
    tile_size: f32,
    blocked: bool,
    color: Vec3,
) -> MeshObject {
    let mut b = MeshBuilder::default();
    append_tile_block(&mut b, tile, tile_size, blocked, color);
    b.build()
}

/// All tiles of a `width` x `height` map in one mesh object.
///
/// `tile_at` returns whether the tile is blocked and its color.
pub fn tile_map(
    width: u32,
    height: u32,
    tile_size: f32,
    mut tile_at: impl FnMut(IVec2) -> (bool, Vec3),
) -> MeshObject {
    let mut b = MeshBuilder::default();
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let tile = IVec2::new(x, y);
            let (blocked, color) = tile_at(tile);
            append_tile_block(&mut b, tile, tile_size, blocked, color);
        }
    }
    b.build()
}

fn append_tile_block(
    b: &mut MeshBuilder,
    tile: IVec2,
    tile_size: f32,
    blocked: bool,
    color: Vec3,
) {
    let height = if blocked { tile_size } else { 0.0 };
    let origin = tile.as_vec2() * tile_size;
    let corners = [
        (origin.x, origin.y, -1.0, -1.0),
        (origin.x, origin.y + tile_size, -1.0, 1.0),
        (origin.x + tile_size, origin.y + tile_size, 1.0, 1.0),
        (origin.x + tile_size, origin.y, 1.0, -1.0),
    ];
    let color = color.extend(1.0);

    let base = b.vertex_count() as u32;
    for (z, nz) in [(0.0, -0.01), (height, -1.0)] {
        for &(x, y, nx, ny) in &corners {
            let _ = b.vertex(Vec3::new(x, y, z), color, Vec3::new(nx, ny, nz));
        }
    }
    b.triangles(base, &BLOCK_TRIANGLES);
}

/// Height of a dead actor's flattened pyramid.
pub const DEAD_ACTOR_HEIGHT: f32 = 0.05;

/// A square pyramid standing on `tile`, inset by `(1 - scale) / 2` of a
/// tile on every side. Dead actors are flattened.
#[must_use]
pub fn actor_pyramid(
    tile: IVec2,
    tile_size: f32,
    scale: f32,
    alive: bool,
    color: Vec3,
) -> MeshObject {
    let inset = (1.0 - scale) / 2.0 * tile_size;
    let height = if alive {
        tile_size - 2.0 * inset
    } else {
        DEAD_ACTOR_HEIGHT
    };
    let lo = tile.as_vec2() * tile_size + inset;
    let hi = tile.as_vec2() * tile_size + (tile_size - inset);
    let apex = tile.as_vec2() * tile_size + tile_size / 2.0;
    let color = color.extend(1.0);

    let base_corners = [
        (Vec3::new(lo.x, lo.y, 0.0), Vec3::new(-1.0, 1.0, -0.2)),
        (Vec3::new(lo.x, hi.y, 0.0), Vec3::new(1.0, 1.0, -0.2)),
        (Vec3::new(hi.x, hi.y, 0.0), Vec3::new(1.0, -1.0, -0.2)),
        (Vec3::new(hi.x, lo.y, 0.0), Vec3::new(-1.0, -1.0, -0.2)),
    ];

    let mut b = MeshBuilder::default();
    let base = b.vertex_count() as u32;
    for (p, n) in base_corners {
        let _ = b.vertex(p, color, n);
    }
    let _ = b.vertex(apex.extend(height), color, Vec3::NEG_Z);
    b.triangles(
        base,
        &[[0, 2, 1], [0, 3, 2], [0, 4, 3], [3, 4, 2], [2, 4, 1], [1, 4, 0]],
    );
    b.build()
}

const PLANT_COLOR: Vec4 = Vec4::new(1.0, 0.5, 0.3, 1.0);

/// A plant made of tetrahedral parts. Each part opens three new roots at
/// its top; [`grow`](Self::grow) adds a part on a random open root.
#[derive(Debug, Clone)]
pub struct Plant {
    part_size: f32,
    parts: usize,
    future_roots: Vec<Vec3>,
    mesh: MeshObject,
    /// Four corners per part: three top corners, then the root.
    part_vertices: Vec<Vec3>,
}

impl Plant {
    /// A plant with a single part at the origin.
    #[must_use]
    pub fn new(part_size: f32) -> Self {
        let mut plant = Self {
            part_size,
            parts: 0,
            future_roots: Vec::new(),
            mesh: MeshObject::default(),
            part_vertices: Vec::new(),
        };
        plant.add_part(Vec3::ZERO);
        plant
    }

    /// Number of parts grown so far.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts
    }

    /// Roots a future part may grow from.
    #[must_use]
    pub fn future_roots(&self) -> &[Vec3] {
        &self.future_roots
    }

    /// Add a part on a random open root. Returns `false` when there is no
    /// root left.
    pub fn grow<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.future_roots.is_empty() {
            return false;
        }
        let pick = rng.random_range(0..self.future_roots.len());
        let root = self.future_roots.swap_remove(pick);
        self.add_part(root);
        true
    }

    fn add_part(&mut self, root: Vec3) {
        let offset = self.part_size / 3.0;
        let height = self.part_size * 3.0;
        let top = [
            root + Vec3::new(offset, 0.0, height),
            root + Vec3::new(offset, offset, height),
            root + Vec3::new(0.0, offset, height),
        ];
        self.part_vertices.extend(top);
        self.part_vertices.push(root);
        self.future_roots.extend(top);
        self.parts += 1;
        self.mesh = self.rebuild();
    }

    fn rebuild(&self) -> MeshObject {
        let normals = [
            Vec3::new(-1.0, 1.0, -0.2),
            Vec3::new(1.0, 1.0, -0.2),
            Vec3::new(1.0, -1.0, -0.2),
            Vec3::Z,
        ];
        let mut b = MeshBuilder::default();
        for part in self.part_vertices.chunks_exact(4) {
            let base = b.vertex_count() as u32;
            for (&p, &n) in part.iter().zip(&normals) {
                let _ = b.vertex(p, PLANT_COLOR, n);
            }
            b.triangles(base, &[[1, 2, 0], [2, 3, 0], [0, 3, 1], [1, 3, 2]]);
        }
        b.build()
    }
}

impl MeshSource for Plant {
    fn mesh(&self) -> &MeshObject {
        &self.mesh
    }
}
