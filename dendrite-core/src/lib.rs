//! Force-directed graph visualization engine with a pseudo-3D depth
//! illusion.
//!
//! Main components:
//! - [`node`] — the graph data model callers feed in.
//! - [`config`] — tunables, their documented defaults, override merging.
//! - [`sim`] — the force simulation owning all kinematic state.
//! - [`parallax`] — pointer-driven parallax offsets.
//! - [`visual`] — depth-derived paint parameters and paint order.
//! - [`interaction`] — hover/click/drag state machine and events.
//! - [`types`] — shared small types.

pub mod config;
pub mod interaction;
pub mod node;
pub mod parallax;
pub mod sim;
pub mod types;
pub mod visual;
