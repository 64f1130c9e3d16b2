//! Edge-face adjacency for quad meshes.
//!
//! [`EdgeTable`] is an arena of undirected edges in first-seen order. Every
//! other stage refers to edges by their index in this arena; nothing re-hashes
//! edge endpoints after construction.

use std::collections::HashMap;

use crate::error::{MeshError, Result};
use crate::mesh::{validate_quads, QuadMesh};

/// An undirected edge and the faces incident to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Endpoints in the order first encountered.
    pub vertices: [usize; 2],
    faces: [usize; 2],
    num_faces: u8,
}

impl Edge {
    fn new(v0: usize, v1: usize, face: usize) -> Self {
        Self {
            vertices: [v0, v1],
            faces: [face, usize::MAX],
            num_faces: 1,
        }
    }

    /// Incident face indices (one for a boundary edge, two otherwise).
    #[inline]
    pub fn faces(&self) -> &[usize] {
        &self.faces[..self.num_faces as usize]
    }

    /// Returns true if exactly one face touches this edge.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.num_faces == 1
    }

    /// The endpoint opposite `v`.
    #[inline]
    pub fn other(&self, v: usize) -> usize {
        if self.vertices[0] == v {
            self.vertices[1]
        } else {
            self.vertices[0]
        }
    }
}

#[inline]
fn edge_key(v0: usize, v1: usize) -> (usize, usize) {
    if v0 < v1 {
        (v0, v1)
    } else {
        (v1, v0)
    }
}

/// Read-only edge adjacency derived from a quad mesh.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    edges: Vec<Edge>,
    lookup: HashMap<(usize, usize), usize>,
    /// `face_edges[f][i]` is the edge joining corner `i` to corner `i + 1`.
    face_edges: Vec<[usize; 4]>,
    /// Incident edge indices per vertex, in first-seen order.
    vertex_edges: Vec<Vec<usize>>,
}

impl EdgeTable {
    /// Validate `mesh` and index its edges.
    ///
    /// Fails with [`MeshError::DegenerateFace`] or
    /// [`MeshError::InvalidVertexIndex`] for malformed faces, and with
    /// [`MeshError::NonManifoldEdge`] if a third face lands on an edge.
    pub fn build(mesh: &QuadMesh) -> Result<Self> {
        validate_quads(mesh.num_vertices(), &mesh.faces)?;

        // Closed quad meshes have 2 edges per face; open ones slightly more.
        let estimate = mesh.num_faces() * 2 + 4;
        let mut table = EdgeTable {
            edges: Vec::with_capacity(estimate),
            lookup: HashMap::with_capacity(estimate),
            face_edges: Vec::with_capacity(mesh.num_faces()),
            vertex_edges: vec![Vec::new(); mesh.num_vertices()],
        };

        for (face_idx, face) in mesh.faces.iter().enumerate() {
            let mut ids = [0usize; 4];
            for i in 0..4 {
                ids[i] = table.insert(face[i], face[(i + 1) % 4], face_idx)?;
            }
            table.face_edges.push(ids);
        }

        Ok(table)
    }

    fn insert(&mut self, v0: usize, v1: usize, face: usize) -> Result<usize> {
        let key = edge_key(v0, v1);
        if let Some(&id) = self.lookup.get(&key) {
            let edge = &mut self.edges[id];
            // A quad lists each of its edges once, so a repeat is always a new face.
            if edge.num_faces >= 2 {
                return Err(MeshError::NonManifoldEdge { v0: key.0, v1: key.1 });
            }
            edge.faces[1] = face;
            edge.num_faces = 2;
            return Ok(id);
        }

        let id = self.edges.len();
        self.edges.push(Edge::new(v0, v1, face));
        self.lookup.insert(key, id);
        self.vertex_edges[v0].push(id);
        self.vertex_edges[v1].push(id);
        Ok(id)
    }

    /// Number of distinct edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if there are no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// All edges in first-seen order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge at index `e`.
    #[inline]
    pub fn edge(&self, e: usize) -> &Edge {
        &self.edges[e]
    }

    /// Index of the undirected edge between `a` and `b`, if any.
    pub fn find(&self, a: usize, b: usize) -> Option<usize> {
        self.lookup.get(&edge_key(a, b)).copied()
    }

    /// Edge indices of face `f` in cyclic order.
    #[inline]
    pub fn face_edges(&self, f: usize) -> [usize; 4] {
        self.face_edges[f]
    }

    /// Edge indices incident to vertex `v`.
    #[inline]
    pub fn vertex_edges(&self, v: usize) -> &[usize] {
        &self.vertex_edges[v]
    }

    /// Number of edges touching vertex `v`.
    #[inline]
    pub fn valence(&self, v: usize) -> usize {
        self.vertex_edges[v].len()
    }

    /// Returns true if any edge at `v` is a boundary edge.
    pub fn is_boundary_vertex(&self, v: usize) -> bool {
        self.vertex_edges[v].iter().any(|&e| self.edges[e].is_boundary())
    }

    /// Number of edges with a single incident face.
    pub fn num_boundary_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }
}
