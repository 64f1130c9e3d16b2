//! Mesh processing algorithms.
//!
//! - **Subdivision**: Catmull-Clark subdivision of quad meshes
//! - **Progress**: callback hook for long-running passes

mod progress;
pub mod subdivide;

pub use progress::Progress;
