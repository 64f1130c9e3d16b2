//! The three derived point families of a Catmull-Clark pass.
//!
//! Each family is index-aligned with its source: face points with faces, edge
//! points with the [`EdgeTable`] arena, vertex points with input vertices.
//! Entries depend only on frozen inputs, so every family can be computed in
//! parallel without locking.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::edges::EdgeTable;
use super::BoundaryRule;
use crate::error::{MeshError, Result};
use crate::mesh::{Point, QuadMesh};

/// Face points: the centroid of each face, in face order.
pub fn face_points(mesh: &QuadMesh, parallel: bool) -> Vec<Point> {
    let centroid = |f: usize| mesh.face_centroid(f);
    if parallel {
        (0..mesh.num_faces()).into_par_iter().map(centroid).collect()
    } else {
        (0..mesh.num_faces()).map(centroid).collect()
    }
}

/// Edge points, in edge-table order.
///
/// Interior edges average both endpoints with both adjacent face points.
/// Boundary edges average both endpoints with their single face point under
/// [`BoundaryRule::Uniform`], or sit at the edge midpoint under
/// [`BoundaryRule::Crease`].
pub fn edge_points(
    mesh: &QuadMesh,
    edges: &EdgeTable,
    face_points: &[Point],
    rule: BoundaryRule,
    parallel: bool,
) -> Vec<Point> {
    let compute = |e: usize| {
        let edge = edges.edge(e);
        let [a, b] = edge.vertices;
        let ends = mesh.vertices[a].coords + mesh.vertices[b].coords;

        match (edge.faces(), rule) {
            (&[f1, f2], _) => {
                Point3::from((ends + face_points[f1].coords + face_points[f2].coords) / 4.0)
            }
            (&[f1], BoundaryRule::Uniform) => Point3::from((ends + face_points[f1].coords) / 3.0),
            (_, _) => Point3::from(ends * 0.5),
        }
    };

    if parallel {
        (0..edges.len()).into_par_iter().map(compute).collect()
    } else {
        (0..edges.len()).map(compute).collect()
    }
}

/// Recomputed positions of the original vertices, in vertex order.
///
/// Applies `(F + 2R + (n - 3) P) / n` where `n` is the valence, `F` the average
/// of the incident face points, `R` the average of incident edge midpoints
/// (original positions), and `P` the original position. Vertices touched by no
/// face keep their position.
///
/// Fails with [`MeshError::ValenceMismatch`] if an interior vertex gathers a
/// different number of faces than it has edges.
pub fn vertex_points(
    mesh: &QuadMesh,
    edges: &EdgeTable,
    face_points: &[Point],
    rule: BoundaryRule,
    parallel: bool,
) -> Result<Vec<Point>> {
    let compute = |v: usize| match rule {
        BoundaryRule::Crease if edges.is_boundary_vertex(v) => Ok(crease_vertex_point(mesh, edges, v)),
        _ => smooth_vertex_point(mesh, edges, face_points, v),
    };

    if parallel {
        (0..mesh.num_vertices()).into_par_iter().map(compute).collect()
    } else {
        (0..mesh.num_vertices()).map(compute).collect()
    }
}

fn smooth_vertex_point(
    mesh: &QuadMesh,
    edges: &EdgeTable,
    face_points: &[Point],
    v: usize,
) -> Result<Point> {
    let position = mesh.vertices[v];
    let incident = edges.vertex_edges(v);
    let valence = incident.len();
    if valence == 0 {
        return Ok(position);
    }

    let mut faces: Vec<usize> = Vec::with_capacity(valence);
    let mut interior = true;
    for &e in incident {
        let edge = edges.edge(e);
        interior &= !edge.is_boundary();
        for &f in edge.faces() {
            if !faces.contains(&f) {
                faces.push(f);
            }
        }
    }

    // Unreachable for tables from `EdgeTable::build`; guards the formula's `n`
    if interior && faces.len() != valence {
        return Err(MeshError::ValenceMismatch {
            vertex: v,
            valence,
            faces: faces.len(),
        });
    }

    // F = average of incident face points
    let f_avg: Vector3<f64> =
        faces.iter().map(|&f| face_points[f].coords).sum::<Vector3<f64>>() / faces.len() as f64;

    // R = average of incident edge midpoints
    let r_avg: Vector3<f64> = incident
        .iter()
        .map(|&e| {
            let [a, b] = edges.edge(e).vertices;
            (mesh.vertices[a].coords + mesh.vertices[b].coords) * 0.5
        })
        .sum::<Vector3<f64>>()
        / valence as f64;

    let n = valence as f64;
    Ok(Point3::from((f_avg + r_avg * 2.0 + position.coords * (n - 3.0)) / n))
}

fn crease_vertex_point(mesh: &QuadMesh, edges: &EdgeTable, v: usize) -> Point {
    let position = mesh.vertices[v];
    if edges.valence(v) == 2 {
        // Corner of a single face
        return position;
    }

    let neighbors: Vec<usize> = edges
        .vertex_edges(v)
        .iter()
        .map(|&e| edges.edge(e))
        .filter(|edge| edge.is_boundary())
        .map(|edge| edge.other(v))
        .collect();

    match neighbors.as_slice() {
        // Regular boundary vertex: 1/8 * (left + right) + 3/4 * v
        &[left, right] => Point3::from(
            (mesh.vertices[left].coords + mesh.vertices[right].coords) * (1.0 / 8.0)
                + position.coords * (3.0 / 4.0),
        ),
        // Pinched boundary: keep position
        _ => position,
    }
}
