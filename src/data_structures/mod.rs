//! Engine data structures: textures, materials and quad buffers.
//!
//! - `texture` contains the GPU texture wrapper and creation utilities
//! - `material` pairs a texture with the bind group the pipelines sample it through
//! - `quad` holds vertex/index buffers for batches of textured quads

pub mod material;
pub mod quad;
pub mod texture;
