//! Mesh construction utilities.
//!
//! Checked constructors for [`QuadMesh`] from face-vertex lists, plus a couple
//! of primitive control meshes used by the CLI, benches, and tests.

use nalgebra::Point3;

use super::quad::{Point, Quad, QuadMesh};
use crate::error::{MeshError, Result};

/// Check that every face references 4 distinct, in-range vertex indices.
///
/// This is the shared validation pass run before any subdivision work.
pub fn validate_quads(num_vertices: usize, faces: &[Quad]) -> Result<()> {
    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= num_vertices {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
        if face[0] == face[1]
            || face[1] == face[2]
            || face[2] == face[3]
            || face[3] == face[0]
            || face[0] == face[2]
            || face[1] == face[3]
        {
            return Err(MeshError::DegenerateFace { face: fi });
        }
    }
    Ok(())
}

/// Build a quad mesh from vertices and quad faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of quad faces, each as [v0, v1, v2, v3] indices (counter-clockwise)
///
/// # Example
/// ```
/// use catmull::mesh::build_from_quads;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_quads(vertices: &[Point], faces: &[Quad]) -> Result<QuadMesh> {
    validate_quads(vertices.len(), faces)?;
    Ok(QuadMesh::from_parts(vertices.to_vec(), faces.to_vec()))
}

/// Build a quad mesh from arbitrary polygon index lists.
///
/// Mesh sources sometimes hand over generic polygons. Anything that is not a
/// 4-gon is rejected with [`MeshError::DegenerateFace`] rather than coerced.
pub fn build_from_polygons(vertices: &[Point], polygons: &[Vec<usize>]) -> Result<QuadMesh> {
    let faces = polygons
        .iter()
        .enumerate()
        .map(|(fi, poly)| {
            <[usize; 4]>::try_from(poly.as_slice()).map_err(|_| MeshError::DegenerateFace { face: fi })
        })
        .collect::<Result<Vec<Quad>>>()?;
    build_from_quads(vertices, &faces)
}

/// The unit cube `[0, 1]^3` with 8 corners and 6 outward-wound faces.
pub fn unit_cube() -> QuadMesh {
    let vertices = vec![
        // Bottom (z = 0)
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        // Top (z = 1)
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ];
    let faces = vec![
        [0, 3, 2, 1], // Bottom
        [4, 5, 6, 7], // Top
        [0, 1, 5, 4], // Front
        [2, 3, 7, 6], // Back
        [0, 4, 7, 3], // Left
        [1, 2, 6, 5], // Right
    ];
    QuadMesh::from_parts(vertices, faces)
}

/// An open planar patch of `nx` by `ny` unit quads in the z = 0 plane.
///
/// Faces are counter-clockwise seen from +Z.
pub fn grid(nx: usize, ny: usize) -> Result<QuadMesh> {
    if nx == 0 {
        return Err(MeshError::invalid_param("nx", nx, "grid needs at least one column"));
    }
    if ny == 0 {
        return Err(MeshError::invalid_param("ny", ny, "grid needs at least one row"));
    }

    let mut mesh = QuadMesh::with_capacity((nx + 1) * (ny + 1), nx * ny);
    for j in 0..=ny {
        for i in 0..=nx {
            mesh.vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }
    for j in 0..ny {
        for i in 0..nx {
            let v00 = j * (nx + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (nx + 1);
            let v11 = v01 + 1;
            mesh.faces.push([v00, v10, v11, v01]);
        }
    }
    Ok(mesh)
}
