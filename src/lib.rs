//! # Catmull
//!
//! One-pass Catmull-Clark subdivision for quad meshes.
//!
//! Given a control mesh of points and quad faces, [`subdivide`] returns a new
//! quad mesh with four times the faces that approximates the smooth limit
//! surface. The transform is pure: the input is never modified and no state is
//! kept between calls, so refining further is just feeding the output back in.
//!
//! ## Features
//!
//! - **Edge-index table**: undirected edges and their incident faces in an arena
//! - **Fail-fast validation**: degenerate faces and non-manifold edges are
//!   rejected before any point is computed
//! - **Parallel stages**: face, edge, and vertex points computed with rayon
//! - **Boundary rules**: uniform interior rule (default) or sharp creases
//!
//! ## Quick Start
//!
//! ```
//! use catmull::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2, 3]];
//!
//! let mesh: QuadMesh = build_from_quads(&vertices, &faces).unwrap();
//! let refined = subdivide(&mesh).unwrap();
//!
//! // 1 face point + 4 edge points + 4 vertex points
//! assert_eq!(refined.num_vertices(), 9);
//! assert_eq!(refined.num_faces(), 4);
//! ```
//!
//! ## Repeated Refinement
//!
//! ```
//! use catmull::prelude::*;
//!
//! let cube = unit_cube();
//! let once = subdivide(&cube).unwrap();
//! let twice = subdivide(&once).unwrap();
//!
//! assert_eq!(twice.num_vertices(), 24 + 48 + 26);
//! assert_eq!(twice.num_faces(), 96);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

pub use algo::subdivide::subdivide;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use catmull::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{
        catmull_clark_subdivide, subdivide, BoundaryRule, EdgeTable, SubdivideOptions,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{build_from_quads, grid, unit_cube, Point, Quad, QuadMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_cube_end_to_end() {
        let cube = unit_cube();
        let refined = subdivide(&cube).unwrap();

        assert_eq!(refined.num_vertices(), 26);
        assert_eq!(refined.num_faces(), 24);

        // Every child quad references valid, distinct vertices
        let table = EdgeTable::build(&refined).unwrap();
        assert_eq!(table.num_boundary_edges(), 0);
    }

    #[test]
    fn test_triangle_rejected() {
        let vertices = unit_cube().vertices;
        let polygons = vec![vec![0, 1, 2]];
        let result = crate::mesh::build_from_polygons(&vertices, &polygons);
        assert!(matches!(result, Err(MeshError::DegenerateFace { face: 0 })));
    }
}
