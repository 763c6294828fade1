//! Triangle meshes produced by isosurface extraction.

#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;
use std::io::Write;

use glam::Vec3;

use crate::error::Result;

/// Unindexed triangle list, as emitted by marching cubes.
///
/// Each triangle carries its own three vertex positions; crossings shared by
/// neighboring cubes are duplicated. Use [`TriangleMesh::weld`] to obtain
/// shared-vertex topology and normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    triangles: Vec<[Vec3; 3]>,
}

impl TriangleMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a triangle, keeping its vertex order.
    pub fn push(&mut self, triangle: [Vec3; 3]) {
        self.triangles.push(triangle);
    }

    /// Moves all triangles of `other` to the end of this mesh.
    pub fn append(&mut self, other: &mut TriangleMesh) {
        self.triangles.append(&mut other.triangles);
    }

    /// Returns the triangles in emission order.
    #[must_use]
    pub fn triangles(&self) -> &[[Vec3; 3]] {
        &self.triangles
    }

    /// Consumes the mesh and returns its triangles.
    #[must_use]
    pub fn into_triangles(self) -> Vec<[Vec3; 3]> {
        self.triangles
    }

    /// Returns the number of triangles in the mesh.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterates every vertex position, three per triangle.
    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.triangles.iter().flatten().copied()
    }

    /// Returns the axis-aligned bounds of the mesh, or `None` if it is empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in self.vertices() {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Merges bit-identical vertices and computes area-weighted vertex normals.
    ///
    /// Marching cubes interpolates every shared edge identically from both
    /// sides, so exact matching is enough to recover the connectivity.
    #[must_use]
    pub fn weld(&self) -> IndexedMesh {
        let mut lookup: HashMap<[u32; 3], u32> = HashMap::new();
        let mut mesh = IndexedMesh {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::with_capacity(self.triangles.len() * 3),
        };

        for v in self.vertices() {
            // Fold -0.0 into 0.0 so both spellings share a key.
            let v = v + Vec3::ZERO;
            let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
            let idx = *lookup.entry(key).or_insert_with(|| {
                mesh.vertices.push(v);
                mesh.normals.push(Vec3::ZERO);
                (mesh.vertices.len() - 1) as u32
            });
            mesh.indices.push(idx);
        }

        mesh.compute_normals();
        mesh
    }
}

impl From<Vec<[Vec3; 3]>> for TriangleMesh {
    fn from(triangles: Vec<[Vec3; 3]>) -> Self {
        Self { triangles }
    }
}

/// Indexed triangle mesh with per-vertex normals.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    /// Unique vertex positions.
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals (accumulated from adjacent face normals, then normalized).
    pub normals: Vec<Vec3>,
    /// Triangle indices (every 3 consecutive indices form a triangle).
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    /// Returns the number of triangles in the mesh.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    fn compute_normals(&mut self) {
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let ab = self.vertices[a] - self.vertices[b];
            let cb = self.vertices[c] - self.vertices[b];
            // Unnormalized cross product weights each face by its area.
            let n = cb.cross(ab);
            self.normals[a] += n;
            self.normals[b] += n;
            self.normals[c] += n;
        }
        for normal in &mut self.normals {
            let len = normal.length();
            if len > 1e-10 {
                *normal /= len;
            }
        }
    }

    /// Counts how many triangles use each undirected edge.
    fn edge_valences(&self) -> HashMap<(u32, u32), u32> {
        let mut valences = HashMap::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                *valences.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        valences
    }

    /// Returns true if every edge is shared by exactly two triangles.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.edge_valences().values().all(|&count| count == 2)
    }

    /// Returns the number of edges used by a single triangle.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_valences()
            .values()
            .filter(|&&count| count == 1)
            .count()
    }

    /// Labels every vertex with the index of its edge-connected surface piece.
    ///
    /// Labels are dense and numbered in order of first appearance by vertex index.
    #[must_use]
    pub fn component_labels(&self) -> Vec<usize> {
        let mut parent: Vec<usize> = (0..self.vertices.len()).collect();
        for tri in self.indices.chunks_exact(3) {
            let root = find_root(&mut parent, tri[0] as usize);
            for &v in &tri[1..] {
                let other = find_root(&mut parent, v as usize);
                parent[other] = root;
            }
        }

        let mut labels = Vec::with_capacity(parent.len());
        let mut roots: HashMap<usize, usize> = HashMap::new();
        for v in 0..parent.len() {
            let root = find_root(&mut parent, v);
            let next = roots.len();
            labels.push(*roots.entry(root).or_insert(next));
        }
        labels
    }

    /// Returns the number of edge-connected surface pieces.
    ///
    /// Vertices not referenced by any triangle are ignored.
    #[must_use]
    pub fn num_components(&self) -> usize {
        let labels = self.component_labels();
        let mut used: Vec<usize> = self.indices.iter().map(|&v| labels[v as usize]).collect();
        used.sort_unstable();
        used.dedup();
        used.len()
    }

    /// Returns interleaved position/normal vertices ready for upload.
    #[must_use]
    pub fn vertex_buffer(&self) -> Vec<MeshVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Returns [`IndexedMesh::vertex_buffer`] as raw bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertex_buffer()).to_vec()
    }

    /// Writes the mesh as Wavefront OBJ (positions, normals, faces).
    pub fn write_obj<W: Write>(&self, mut writer: W) -> Result<()> {
        for v in &self.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for n in &self.normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Union-find root lookup with path halving.
fn find_root(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

/// GPU-compatible mesh vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit vertex normal.
    pub normal: [f32; 3],
}
