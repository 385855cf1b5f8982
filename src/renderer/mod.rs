//! Rendering module
//!
//! `scene` projects the world into a triangle list; `pipeline` draws it with
//! WebGPU. The renderer only ever borrows the world immutably.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, arena_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
