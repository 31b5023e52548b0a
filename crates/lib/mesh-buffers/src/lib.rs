use serde::{Deserialize, Serialize};

/// Identifies one per-vertex attribute stream of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexSemantic {
    Position,
    TexCoord,
    Normal,
}

impl VertexSemantic {
    /// Floats per vertex for this attribute.
    pub fn components(&self) -> usize {
        match self {
            VertexSemantic::Position | VertexSemantic::Normal => 3,
            VertexSemantic::TexCoord => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn from_points(points: impl IntoIterator<Item = [f32; 3]>) -> Self {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];

        for point in points {
            for i in 0..3 {
                min[i] = f32::min(min[i], point[i]);
                max[i] = f32::max(max[i], point[i]);
            }
        }

        Self { min, max }
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for i in 0..3 {
            min[i] = f32::min(self.min[i], other.min[i]);
            max[i] = f32::max(self.max[i], other.max[i]);
        }
        Self { min, max }
    }
}

/// Sink for mesh buffer writes. The host renderer implements this to map
/// uploads onto whatever vertex/index buffer objects it manages; each call
/// replaces the full contents of the addressed buffer.
pub trait MeshSink {
    fn set_vertex_buffer(&mut self, semantic: VertexSemantic, data: &[f32]);
    fn set_index_buffer(&mut self, indices: &[u16]);
    fn update_bounds(&mut self, bounds: Aabb);
}

/// Write counters per buffer, incremented on every sink call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteCounts {
    pub position: u32,
    pub tex_coord: u32,
    pub normal: u32,
    pub index: u32,
    pub bounds: u32,
}

/// Vec-backed [`MeshSink`]. Doubles as the reference adapter and as a test
/// harness: the recorded write counts make partial re-uploads observable.
#[derive(Debug, Default, Clone)]
pub struct CpuMeshBuffers {
    positions: Vec<f32>,
    tex_coords: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u16>,
    bounds: Option<Aabb>,
    writes: WriteCounts,
}

impl CpuMeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn writes(&self) -> WriteCounts {
        self.writes
    }
}

impl MeshSink for CpuMeshBuffers {
    fn set_vertex_buffer(&mut self, semantic: VertexSemantic, data: &[f32]) {
        debug_assert!(
            data.len() % semantic.components() == 0,
            "buffer of {} floats is not divisible into {}-component vertices",
            data.len(),
            semantic.components()
        );
        let buffer = match semantic {
            VertexSemantic::Position => {
                self.writes.position += 1;
                &mut self.positions
            }
            VertexSemantic::TexCoord => {
                self.writes.tex_coord += 1;
                &mut self.tex_coords
            }
            VertexSemantic::Normal => {
                self.writes.normal += 1;
                &mut self.normals
            }
        };
        buffer.clear();
        buffer.extend_from_slice(data);
    }

    fn set_index_buffer(&mut self, indices: &[u16]) {
        self.writes.index += 1;
        self.indices.clear();
        self.indices.extend_from_slice(indices);
    }

    fn update_bounds(&mut self, bounds: Aabb) {
        self.writes.bounds += 1;
        self.bounds = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_points_spans_extremes() {
        let aabb = Aabb::from_points([
            [-1.0, -2.0, 0.0],
            [1.0, -2.0, 0.0],
            [-1.0, 2.0, 0.0],
            [1.0, 2.0, 0.0],
        ]);
        assert_eq!(aabb.min, [-1.0, -2.0, 0.0]);
        assert_eq!(aabb.max, [1.0, 2.0, 0.0]);
    }

    #[test]
    fn aabb_union_covers_both_boxes() {
        let a = Aabb {
            min: [-1.0, 0.0, 0.0],
            max: [0.0, 1.0, 0.0],
        };
        let b = Aabb {
            min: [0.0, -3.0, -1.0],
            max: [2.0, 0.5, 0.0],
        };
        let joined = a.union(&b);
        assert_eq!(joined.min, [-1.0, -3.0, -1.0]);
        assert_eq!(joined.max, [2.0, 1.0, 0.0]);
    }

    #[test]
    fn vertex_buffer_writes_replace_contents() {
        let mut sink = CpuMeshBuffers::new();
        sink.set_vertex_buffer(VertexSemantic::TexCoord, &[0.0, 0.0, 1.0, 1.0]);
        sink.set_vertex_buffer(VertexSemantic::TexCoord, &[0.5, 0.5]);

        assert_eq!(sink.tex_coords(), &[0.5, 0.5]);
        assert_eq!(sink.writes().tex_coord, 2);
        assert_eq!(sink.writes().position, 0);
    }

    #[test]
    fn index_and_bounds_writes_are_counted() {
        let mut sink = CpuMeshBuffers::new();
        sink.set_index_buffer(&[2, 0, 1, 1, 3, 2]);
        sink.update_bounds(Aabb::from_points([[0.0, 0.0, 0.0]]));

        assert_eq!(sink.indices(), &[2, 0, 1, 1, 3, 2]);
        assert!(sink.bounds().is_some());
        assert_eq!(sink.writes().index, 1);
        assert_eq!(sink.writes().bounds, 1);
    }
}
