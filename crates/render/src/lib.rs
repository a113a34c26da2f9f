//! Rendering Adapter: renderer-agnostic interface over world snapshots.
//!
//! # Invariants
//! - Renderers consume owned [`WorldView`](slamsim_common::WorldView)
//!   snapshots and cannot mutate the world.
//! - Render output derives only from the snapshot and renderer settings.

mod renderer;

pub use renderer::{Renderer, TextGridRenderer};
