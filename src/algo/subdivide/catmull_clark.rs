//! Catmull-Clark subdivision for quad meshes.

use log::{debug, trace};

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{Point, QuadMesh};

use super::edges::EdgeTable;
use super::points::{edge_points, face_points, vertex_points};
use super::SubdivideOptions;

/// Performs one pass of Catmull-Clark subdivision with default options.
///
/// Returns a new mesh with `F + E + V` vertices and `4F` faces. The input is
/// never modified.
///
/// # Example
///
/// ```
/// use catmull::algo::subdivide::subdivide;
/// use catmull::mesh::unit_cube;
///
/// let cube = unit_cube();
/// let refined = subdivide(&cube).unwrap();
///
/// assert_eq!(refined.num_vertices(), 6 + 12 + 8);
/// assert_eq!(refined.num_faces(), 24);
/// ```
pub fn subdivide(mesh: &QuadMesh) -> Result<QuadMesh> {
    subdivide_with_options(mesh, &SubdivideOptions::default())
}

/// Performs one pass of Catmull-Clark subdivision.
///
/// `options.iterations` is ignored; see [`catmull_clark_subdivide`] for
/// repeated passes.
///
/// # Algorithm
///
/// 1. Validate faces and index edges (fails before any averaging)
/// 2. Compute face points (centroid of each face)
/// 3. Compute edge points (endpoints averaged with adjacent face points)
/// 4. Recompute original vertices: (F + 2R + (n-3)P) / n
/// 5. Split each quad into 4 quads
///
/// The output vertex list is laid out as face points `[0, F)`, edge points
/// `[F, F+E)`, then vertex points `[F+E, F+E+V)`.
pub fn subdivide_with_options(mesh: &QuadMesh, options: &SubdivideOptions) -> Result<QuadMesh> {
    subdivide_pass(mesh, options, &Progress::none(), 0, STAGES)
}

/// Stages reported per pass: face, edge, and vertex points, then reassembly.
const STAGES: usize = 4;

/// One pass, reporting its stages as steps `first..first + STAGES` of `total`.
fn subdivide_pass(
    mesh: &QuadMesh,
    options: &SubdivideOptions,
    progress: &Progress,
    first: usize,
    total: usize,
) -> Result<QuadMesh> {
    let edges = EdgeTable::build(mesh)?;

    if mesh.is_empty() {
        return Ok(QuadMesh::new());
    }

    debug!(
        "Catmull-Clark pass: {} vertices, {} edges ({} boundary), {} faces",
        mesh.num_vertices(),
        edges.len(),
        edges.num_boundary_edges(),
        mesh.num_faces()
    );

    trace!("computing face points");
    progress.report(first, total, "Computing face points");
    let fps = face_points(mesh, options.parallel);

    trace!("computing edge points");
    progress.report(first + 1, total, "Computing edge points");
    let eps = edge_points(mesh, &edges, &fps, options.boundary_rule, options.parallel);

    trace!("computing vertex points");
    progress.report(first + 2, total, "Computing vertex points");
    let vps = vertex_points(mesh, &edges, &fps, options.boundary_rule, options.parallel)?;

    trace!("reassembling quads");
    progress.report(first + 3, total, "Reassembling quads");
    let refined = reassemble(mesh, &edges, fps, eps, vps);

    debug!(
        "Catmull-Clark result: {} vertices, {} faces",
        refined.num_vertices(),
        refined.num_faces()
    );

    Ok(refined)
}

/// Performs `options.iterations` passes of Catmull-Clark subdivision.
///
/// Each pass feeds the previous output back in. Zero iterations returns a copy
/// of the input.
///
/// Fails with [`MeshError::InvalidParameter`] if the projected face count
/// exceeds `options.max_faces`.
pub fn catmull_clark_subdivide(mesh: &QuadMesh, options: &SubdivideOptions) -> Result<QuadMesh> {
    catmull_clark_subdivide_with_progress(mesh, options, &Progress::none())
}

/// Catmull-Clark subdivision with progress reporting.
///
/// Each pass reports four stages (face points, edge points, vertex points,
/// reassembly) as consecutive steps out of `4 * iterations`, followed by one
/// final report at `total / total`.
pub fn catmull_clark_subdivide_with_progress(
    mesh: &QuadMesh,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<QuadMesh> {
    check_face_budget(mesh.num_faces(), options)?;

    let total = options.iterations * STAGES;
    let mut current = mesh.clone();
    for iter in 0..options.iterations {
        current = subdivide_pass(&current, options, progress, iter * STAGES, total)?;
    }
    progress.report(total, total, "Catmull-Clark subdivision");

    Ok(current)
}

fn check_face_budget(num_faces: usize, options: &SubdivideOptions) -> Result<()> {
    let projected = options.expected_faces(num_faces);
    match projected {
        Some(faces) if faces <= options.max_faces => Ok(()),
        _ => Err(MeshError::invalid_param(
            "iterations",
            options.iterations,
            "projected face count exceeds max_faces",
        )),
    }
}

/// Build the refined quad mesh from the three point families.
///
/// For face `f` with corners `c0..c3` and cyclic edges `e0..e3` (`ei` joins
/// `ci` to `ci+1`), corner `i` becomes the quad
/// `[vertex(ci), edge(ei), face(f), edge(ei-1)]`, which keeps the parent's
/// winding.
fn reassemble(
    mesh: &QuadMesh,
    edges: &EdgeTable,
    face_points: Vec<Point>,
    edge_points: Vec<Point>,
    vertex_points: Vec<Point>,
) -> QuadMesh {
    let num_faces = face_points.len();
    let edge_base = num_faces;
    let vertex_base = num_faces + edge_points.len();

    let mut vertices = face_points;
    vertices.extend(edge_points);
    vertices.extend(vertex_points);

    let mut faces = Vec::with_capacity(mesh.num_faces() * 4);
    for (f, face) in mesh.faces.iter().enumerate() {
        let face_edges = edges.face_edges(f);
        for i in 0..4 {
            let next = face_edges[i];
            let prev = face_edges[(i + 3) % 4];
            faces.push([vertex_base + face[i], edge_base + next, f, edge_base + prev]);
        }
    }

    QuadMesh::from_parts(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::subdivide::BoundaryRule;
    use crate::mesh::{grid, unit_cube};
    use nalgebra::{Point3, Vector3};
    use std::sync::{Arc, Mutex};

    fn create_single_quad() -> QuadMesh {
        QuadMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2, 3]],
        )
    }

    fn create_two_quads() -> QuadMesh {
        // Two quads sharing an edge
        QuadMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2, 3], [1, 4, 5, 2]],
        )
    }

    fn num_edges(mesh: &QuadMesh) -> usize {
        EdgeTable::build(mesh).unwrap().len()
    }

    #[test]
    fn test_catmull_clark_single_quad() {
        let mesh = create_single_quad();
        let refined = subdivide(&mesh).unwrap();

        // 1 face point + 4 edge points + 4 vertex points
        assert_eq!(refined.num_vertices(), 9);
        assert_eq!(refined.num_faces(), 4);
    }

    #[test]
    fn test_catmull_clark_two_quads() {
        let refined = subdivide(&create_two_quads()).unwrap();

        // 2 face points + 7 edge points + 6 vertex points
        assert_eq!(refined.num_vertices(), 15);
        assert_eq!(refined.num_faces(), 8);
    }

    #[test]
    fn test_cube_cardinality() {
        let cube = unit_cube();
        let refined = subdivide(&cube).unwrap();

        assert_eq!(refined.num_vertices(), 26);
        assert_eq!(refined.num_faces(), 24);
        assert_eq!(num_edges(&refined), 48);
    }

    #[test]
    fn test_cube_two_iterations() {
        let options = SubdivideOptions::new(2);
        let refined = catmull_clark_subdivide(&unit_cube(), &options).unwrap();

        // Pass 2 input: F = 24, E = 48, V = 26
        assert_eq!(refined.num_vertices(), 24 + 48 + 26);
        assert_eq!(refined.num_faces(), 96);
    }

    #[test]
    fn test_catmull_clark_preserves_euler() {
        let cube = unit_cube();
        let original_euler = cube.euler_characteristic(num_edges(&cube));

        let refined = subdivide(&cube).unwrap();
        let new_euler = refined.euler_characteristic(num_edges(&refined));

        assert_eq!(original_euler, 2);
        assert_eq!(original_euler, new_euler, "Euler characteristic should be preserved");
    }

    #[test]
    fn test_open_grid_preserves_euler() {
        let mesh = grid(3, 2).unwrap();
        let refined = subdivide(&mesh).unwrap();
        assert_eq!(mesh.euler_characteristic(num_edges(&mesh)), 1);
        assert_eq!(refined.euler_characteristic(num_edges(&refined)), 1);
    }

    #[test]
    fn test_winding_preserved_on_cube() {
        let cube = unit_cube();
        let refined = subdivide(&cube).unwrap();

        for f in 0..cube.num_faces() {
            let parent = cube.face_normal(f);
            for child in 4 * f..4 * f + 4 {
                let normal = refined.face_normal(child);
                assert!(
                    normal.dot(&parent) > 0.0,
                    "child {} of face {} is flipped",
                    child,
                    f
                );
            }
        }
    }

    #[test]
    fn test_vertex_layout() {
        let cube = unit_cube();
        let refined = subdivide(&cube).unwrap();

        // Face points occupy [0, 6)
        for f in 0..6 {
            assert!((refined.vertices[f] - cube.face_centroid(f)).norm() < 1e-10);
        }
        // Every child quad has its face point in slot 2 and its vertex point in slot 0
        for (child, quad) in refined.faces.iter().enumerate() {
            assert_eq!(quad[2], child / 4);
            assert!(quad[0] >= 6 + 12);
            assert!((6..18).contains(&quad[1]));
            assert!((6..18).contains(&quad[3]));
        }
    }

    #[test]
    fn test_cube_shrinks_toward_center() {
        let refined = subdivide(&unit_cube()).unwrap();
        let center = Point3::new(0.5, 0.5, 0.5);
        let corner_distance = (Point3::new(0.0, 0.0, 0.0) - center).norm();

        for p in &refined.vertices[18..] {
            assert!((p - center).norm() < corner_distance);
        }

        let centroid: Vector3<f64> =
            refined.vertices.iter().map(|p| p.coords).sum::<Vector3<f64>>() / refined.num_vertices() as f64;
        assert!((centroid - center.coords).norm() < 1e-10);
    }

    #[test]
    fn test_shared_edge_point() {
        let refined = subdivide(&create_two_quads()).unwrap();

        // Edge (1, 2) is edge 1; the edge block starts after 2 face points
        let expected = Point3::new(1.0, 0.5, 0.0);
        assert!((refined.vertices[2 + 1] - expected).norm() < 1e-10);
    }

    #[test]
    fn test_input_not_mutated() {
        let cube = unit_cube();
        let snapshot = cube.clone();
        let _ = subdivide(&cube).unwrap();
        assert_eq!(cube, snapshot);
    }

    #[test]
    fn test_empty_mesh() {
        let refined = subdivide(&QuadMesh::new()).unwrap();
        assert_eq!(refined.num_vertices(), 0);
        assert_eq!(refined.num_faces(), 0);
    }

    #[test]
    fn test_zero_iterations() {
        let cube = unit_cube();
        let refined = catmull_clark_subdivide(&cube, &SubdivideOptions::new(0)).unwrap();
        assert_eq!(refined, cube);
    }

    #[test]
    fn test_degenerate_face_fails() {
        let mut mesh = create_two_quads();
        mesh.faces[1] = [1, 4, 4, 2];
        assert!(matches!(
            subdivide(&mesh),
            Err(MeshError::DegenerateFace { face: 1 })
        ));
    }

    #[test]
    fn test_non_manifold_fails() {
        let mut mesh = create_two_quads();
        mesh.vertices.push(Point3::new(1.0, 0.0, 1.0));
        mesh.vertices.push(Point3::new(1.0, 1.0, 1.0));
        // Third face on edge (1, 2)
        mesh.faces.push([2, 1, 6, 7]);
        assert!(matches!(
            subdivide(&mesh),
            Err(MeshError::NonManifoldEdge { v0: 1, v1: 2 })
        ));
    }

    #[test]
    fn test_face_budget() {
        let options = SubdivideOptions::new(3).with_max_faces(100);
        let result = catmull_clark_subdivide(&unit_cube(), &options);
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));

        let options = SubdivideOptions::new(2).with_max_faces(100);
        assert!(catmull_clark_subdivide(&unit_cube(), &options).is_ok());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mesh = grid(5, 4).unwrap();
        let seq = catmull_clark_subdivide(&mesh, &SubdivideOptions::new(2).sequential()).unwrap();
        let par = catmull_clark_subdivide(&mesh, &SubdivideOptions::new(2)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_crease_keeps_quad_corners() {
        let mesh = create_single_quad();
        let options = SubdivideOptions::default().with_boundary_rule(BoundaryRule::Crease);
        let refined = subdivide_with_options(&mesh, &options).unwrap();

        // Vertex points follow 1 face point and 4 edge points
        for v in 0..4 {
            assert!((refined.vertices[5 + v] - mesh.vertices[v]).norm() < 1e-10);
        }
        // Boundary edge points sit on midpoints
        assert!((refined.vertices[1] - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_uniform_corner_collapses_onto_face_point() {
        let mesh = grid(3, 3).unwrap();
        let refined = subdivide(&mesh).unwrap();

        // Child 0 sits at the valence-2 corner (0,0,0) of face 0
        let child = refined.faces[0];
        assert!((refined.vertices[child[0]] - refined.vertices[child[2]]).norm() < 1e-10);
        assert!((refined.vertices[child[0]] - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-10);
        assert!(refined.face_normal(0).norm() < 1e-10);

        // Child 2 sits at interior vertex 5 = (1,1,0) and keeps its area
        assert!(refined.face_normal(2).z > 0.0);

        let crease = SubdivideOptions::default().with_boundary_rule(BoundaryRule::Crease);
        let refined = subdivide_with_options(&mesh, &crease).unwrap();
        assert!(refined.face_normal(0).z > 0.0);
    }

    #[test]
    fn test_progress_reports_each_stage() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |current, total, message| {
            sink.lock().unwrap().push((current, total, message.to_string()));
        });

        let options = SubdivideOptions::new(1);
        catmull_clark_subdivide_with_progress(&unit_cube(), &options, &progress).unwrap();

        let expected: Vec<(usize, usize, String)> = [
            (0, 4, "Computing face points"),
            (1, 4, "Computing edge points"),
            (2, 4, "Computing vertex points"),
            (3, 4, "Reassembling quads"),
            (4, 4, "Catmull-Clark subdivision"),
        ]
        .iter()
        .map(|&(current, total, message)| (current, total, message.to_string()))
        .collect();
        assert_eq!(*seen.lock().unwrap(), expected);
    }

    #[test]
    fn test_progress_spans_iterations() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let progress = Progress::new(move |current, total, _| {
            sink.lock().unwrap().push((current, total));
        });

        let options = SubdivideOptions::new(2);
        catmull_clark_subdivide_with_progress(&unit_cube(), &options, &progress).unwrap();

        // Four stages per pass, steps advance monotonically, then the final report
        let steps: Vec<(usize, usize)> = (0..=8).map(|step| (step, 8)).collect();
        assert_eq!(*seen.lock().unwrap(), steps);
    }
}
