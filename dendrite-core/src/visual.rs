//! Depth-derived paint parameters.
//!
//! The simulation works in a flat plane plus a `z` coordinate; this
//! module turns that `z` into everything the painter needs for the depth
//! illusion: paint order, per-node scale and opacity, and the final
//! screen position including the parallax offset.

use crate::config::{PhysicsConfig, VisualConfig};
use crate::parallax::Parallax;
use crate::sim::SimNode;
use glam::Vec2;

/// Paint parameters derived for one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisual<'a> {
    /// Diameter in pixels, after depth scaling.
    pub size: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Node color override if set, otherwise the status color.
    pub color: &'a str,
}

/// Normalized depth of `z` inside `[min_z, max_z]`: 0 at the far plane,
/// 1 at the near plane. A zero range degrades to the far plane.
#[inline]
pub fn normalized_depth(z: f32, min_z: f32, max_z: f32) -> f32 {
    let range = max_z - min_z;
    let range = if range == 0.0 { 1.0 } else { range };
    (z - min_z) / range
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Paint order for the nodes: far (lowest z) first, near last.
///
/// The sort is stable, so nodes at identical depth keep their input
/// order and the paint order is deterministic frame to frame.
pub fn depth_order(nodes: &[SimNode]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| nodes[a].pos.z.total_cmp(&nodes[b].pos.z));
    order
}

/// Derives size, scale, opacity and color for one node at its current
/// depth.
pub fn node_visual<'a>(
    node: &'a SimNode,
    physics: &PhysicsConfig,
    visual: &'a VisualConfig,
) -> NodeVisual<'a> {
    let t = normalized_depth(node.pos.z, physics.min_z, physics.max_z);
    let scale = lerp(visual.min_scale, visual.max_scale, t);
    let opacity = lerp(visual.min_opacity, visual.max_opacity, t);
    let base = visual.node_sizes.for_size(node.node.size);
    let color = node
        .node
        .color
        .as_deref()
        .unwrap_or_else(|| visual.status_colors.for_status(node.node.status));
    NodeVisual {
        size: base * scale,
        scale,
        opacity,
        color,
    }
}

/// Final screen position of a node: the simulated position plus the
/// depth-scaled parallax offset.
pub fn screen_position(node: &SimNode, parallax: &Parallax, physics: &PhysicsConfig) -> Vec2 {
    node.pos.truncate() + parallax.node_offset(node.pos.z, physics.min_z, physics.max_z)
}
