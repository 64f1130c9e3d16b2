//! Core mesh data structures.
//!
//! The primary type is [`QuadMesh`], a plain indexed mesh whose faces all have
//! four corners. It is the input and output of subdivision.
//!
//! # Construction
//!
//! ```
//! use catmull::mesh::{build_from_quads, QuadMesh};
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
//! ```

mod builder;
mod quad;

pub use builder::{build_from_polygons, build_from_quads, grid, unit_cube, validate_quads};
pub use quad::{Point, Quad, QuadMesh};
