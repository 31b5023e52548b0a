use cgmath::{Vector2, Vector3};
use mesh_buffers::{Aabb, MeshSink, VertexSemantic};
use serde::{Deserialize, Serialize};
use tracing::{span, Level};

use crate::{GridAddress, PixelRect, SpriteMeshError, TextureExtent};

/// Inset applied to grid-cell texture coordinates so samples stay off the
/// edge shared with the neighboring cell.
pub const DEFAULT_UV_INSET: f32 = 0.001;

/// Triangle list for the quad face, counter-clockwise winding.
const QUAD_INDICES: [u16; 6] = [2, 0, 1, 1, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteDescription {
    pub uv_inset: f32,
}

impl Default for SpriteDescription {
    fn default() -> Self {
        Self {
            uv_inset: DEFAULT_UV_INSET,
        }
    }
}

/// A flat, origin-centered quad carrying the texture coordinates of one
/// sprite. Vertex order is {bottom-left, bottom-right, top-left, top-right};
/// positions, normals and indices are fixed at construction, only the
/// texture coordinates can change afterwards (via the flip operations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteMesh {
    width: f32,
    height: f32,
    grid: Option<GridAddress>,
    tex_coords: [Vector2<f32>; 4],
    vertices: [Vector3<f32>; 4],
    normals: [Vector3<f32>; 4],
    indices: [u16; 6],
}

impl SpriteMesh {
    /// Quad mapped to the whole texture.
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_grid(width, height, GridAddress::full())
    }

    /// Quad mapped to one cell of a sprite sheet. Performs no validation;
    /// degenerate grids produce degenerate texture coordinates, see
    /// [`SpriteMesh::try_from_grid`] for the checked form.
    pub fn from_grid(width: f32, height: f32, grid: GridAddress) -> Self {
        Self::from_grid_with(SpriteDescription::default(), width, height, grid)
    }

    pub fn from_grid_with(
        desc: SpriteDescription,
        width: f32,
        height: f32,
        grid: GridAddress,
    ) -> Self {
        let tex_coords = grid_tex_coords(desc, grid);
        Self::from_parts(width, height, Some(grid), tex_coords)
    }

    pub fn try_from_grid(
        width: f32,
        height: f32,
        grid: GridAddress,
    ) -> Result<Self, SpriteMeshError> {
        Self::try_from_grid_with(SpriteDescription::default(), width, height, grid)
    }

    pub fn try_from_grid_with(
        desc: SpriteDescription,
        width: f32,
        height: f32,
        grid: GridAddress,
    ) -> Result<Self, SpriteMeshError> {
        grid.validate()?;
        Ok(Self::from_grid_with(desc, width, height, grid))
    }

    /// Quad mapped to a pixel rectangle within a texture. No inset is
    /// applied in this mode. Performs no validation; a zero extent divides
    /// through as infinity, see [`SpriteMesh::try_from_pixel_rect`] for the
    /// checked form.
    pub fn from_pixel_rect(
        width: f32,
        height: f32,
        rect: PixelRect,
        extent: TextureExtent,
    ) -> Self {
        let tex_coords = pixel_rect_tex_coords(rect, extent);
        Self::from_parts(width, height, None, tex_coords)
    }

    pub fn try_from_pixel_rect(
        width: f32,
        height: f32,
        rect: PixelRect,
        extent: TextureExtent,
    ) -> Result<Self, SpriteMeshError> {
        extent.validate()?;
        Ok(Self::from_pixel_rect(width, height, rect, extent))
    }

    fn from_parts(
        width: f32,
        height: f32,
        grid: Option<GridAddress>,
        tex_coords: [Vector2<f32>; 4],
    ) -> Self {
        let half_width = width * 0.5;
        let half_height = height * 0.5;
        let vertices = [
            Vector3::new(-half_width, -half_height, 0.0),
            Vector3::new(half_width, -half_height, 0.0),
            Vector3::new(-half_width, half_height, 0.0),
            Vector3::new(half_width, half_height, 0.0),
        ];

        Self {
            width,
            height,
            grid,
            tex_coords,
            vertices,
            normals: [Vector3::unit_z(); 4],
            indices: QUAD_INDICES,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Sheet address this mesh was built from, if grid mode was used.
    pub fn grid(&self) -> Option<GridAddress> {
        self.grid
    }

    pub fn tex_coords(&self) -> &[Vector2<f32>; 4] {
        &self.tex_coords
    }

    pub fn vertices(&self) -> &[Vector3<f32>; 4] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vector3<f32>; 4] {
        &self.normals
    }

    pub fn indices(&self) -> &[u16; 6] {
        &self.indices
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| [v.x, v.y, v.z]))
    }

    /// Writes all four buffers plus bounds to the sink as one mesh build.
    pub fn upload<S: MeshSink>(&self, sink: &mut S) {
        let span = span!(
            Level::DEBUG,
            "upload_sprite_mesh",
            width = self.width,
            height = self.height
        );
        let _enter = span.enter();

        sink.set_vertex_buffer(VertexSemantic::Position, &flatten3(&self.vertices));
        sink.set_vertex_buffer(VertexSemantic::TexCoord, &flatten2(&self.tex_coords));
        sink.set_vertex_buffer(VertexSemantic::Normal, &flatten3(&self.normals));
        sink.set_index_buffer(&self.indices);
        sink.update_bounds(self.bounds());
    }

    /// Re-writes only the texcoord buffer; used after a flip.
    pub fn sync_tex_coords<S: MeshSink>(&self, sink: &mut S) {
        sink.set_vertex_buffer(VertexSemantic::TexCoord, &flatten2(&self.tex_coords));
    }

    /// Mirrors the texture along the vertical axis by swapping the left and
    /// right texture coordinates.
    pub fn flip_x(&mut self) {
        self.tex_coords.swap(0, 1);
        self.tex_coords.swap(2, 3);
    }

    /// Mirrors the texture along the horizontal axis by swapping the bottom
    /// and top texture coordinates.
    pub fn flip_y(&mut self) {
        self.tex_coords.swap(0, 2);
        self.tex_coords.swap(1, 3);
    }

    pub fn flip_x_into<S: MeshSink>(&mut self, sink: &mut S) {
        self.flip_x();
        self.sync_tex_coords(sink);
    }

    pub fn flip_y_into<S: MeshSink>(&mut self, sink: &mut S) {
        self.flip_y();
        self.sync_tex_coords(sink);
    }
}

fn grid_tex_coords(desc: SpriteDescription, grid: GridAddress) -> [Vector2<f32>; 4] {
    let col_size = 1.0 / grid.columns as f32;
    let row_size = 1.0 / grid.rows as f32;
    let inset = desc.uv_inset;

    let u = col_size * grid.column as f32;
    let v = row_size * grid.row as f32;

    [
        Vector2::new(u + inset, v + row_size - inset),
        Vector2::new(u + col_size - inset, v + row_size - inset),
        Vector2::new(u + inset, v + inset),
        Vector2::new(u + col_size - inset, v + inset),
    ]
}

fn pixel_rect_tex_coords(rect: PixelRect, extent: TextureExtent) -> [Vector2<f32>; 4] {
    let tex_width = extent.width as f32;
    let tex_height = extent.height as f32;

    let left = rect.x as f32 / tex_width;
    let right = (rect.x + rect.width) as f32 / tex_width;
    let top = rect.y as f32 / tex_height;
    let bottom = (rect.y + rect.height) as f32 / tex_height;

    [
        Vector2::new(left, bottom),
        Vector2::new(right, bottom),
        Vector2::new(left, top),
        Vector2::new(right, top),
    ]
}

fn flatten3(vectors: &[Vector3<f32>; 4]) -> [f32; 12] {
    let mut data = [0.0; 12];
    for (i, v) in vectors.iter().enumerate() {
        data[i * 3] = v.x;
        data[i * 3 + 1] = v.y;
        data[i * 3 + 2] = v.z;
    }
    data
}

fn flatten2(vectors: &[Vector2<f32>; 4]) -> [f32; 8] {
    let mut data = [0.0; 8];
    for (i, v) in vectors.iter().enumerate() {
        data[i * 2] = v.x;
        data[i * 2 + 1] = v.y;
    }
    data
}
