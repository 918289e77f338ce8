//! quad-flow
//!
//! Two small keyboard-driven 3D demos built from textured quads: an arena
//! shooter where enemies walk toward the player, and a skateboarding demo with
//! ollies, manuals and combo scoring. They run on a minimal cross-platform flow
//! engine (winit + wgpu) that works natively and on the web.
//!
//! High-level modules
//! - `camera`: camera pose, projection and the view-projection uniform
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: textures, materials and quad buffers
//! - `flow`: flow trait and the event loop driving ticks, updates and rendering
//! - `flows`: the demo games expressed as flows
//! - `game`: GPU-free simulation (scenes, input, scoring, geometry)
//! - `pipelines`: the world, sprite and GUI render pipelines
//! - `resources`: helpers to load textures and sprite sheets
//! - `render`: render composition for pipeline batching
//! - `text`: screen text overlay (`ui` feature)
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod flows;
pub mod game;
pub mod pipelines;
pub mod render;
pub mod resources;
#[cfg(feature = "ui")]
pub mod text;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Point3, Vector2, Vector3};
pub use winit::event::WindowEvent;
