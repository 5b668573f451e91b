//! Force-directed simulation over the graph nodes.
//!
//! One [`Simulation::step`] runs a fixed pipeline:
//! 1. center pull — every node is attracted toward the container center.
//! 2. repulsion — node pairs push apart, with the depth axis damped.
//! 3. links — springs pull linked pairs toward a rest length.
//! 4. float — phase-shifted sinusoids keep settled nodes drifting.
//! 5. integrate — positions advance, velocity decays, bounds clamp.
//!
//! The simulation exclusively owns all kinematic state. Callers feed it
//! graph data via [`Simulation::sync_graph`], read it back through the
//! [`Simulation::nodes`] slice, and nudge individual nodes with
//! [`Simulation::set_node_position`] / [`Simulation::apply_force`] while
//! dragging.

use crate::config::PhysicsConfig;
use crate::node::{GraphData, GraphNode};
use crate::types::Bounds;
use glam::Vec3;
use rand::Rng;
use std::collections::HashMap;
use std::f32::consts::TAU;
use tracing::debug;

/// Inner margin nodes are kept away from the container edges, in pixels.
const EDGE_PADDING: f32 = 50.0;
/// Fraction of the container width/height that spawn positions scatter over.
const SPAWN_SPREAD: f32 = 0.6;
/// Softening added to the squared distance in the repulsion denominator.
const REPEL_SOFTENING: f32 = 50.0;
/// Weight of the depth axis in the repulsion distance metric.
const DEPTH_WEIGHT: f32 = 0.1;
/// Share of the repulsion magnitude applied along the depth axis.
const DEPTH_PUSH: f32 = 0.3;
/// Rest length of link springs, in pixels.
const LINK_REST_LENGTH: f32 = 120.0;
/// Damping applied to the spring displacement.
const LINK_DAMPING: f32 = 0.5;
/// Gain applied to the float sinusoids before they enter velocity.
const FLOAT_GAIN: f32 = 0.1;

/// Live simulation state for one graph node.
#[derive(Clone, Debug)]
pub struct SimNode {
    /// Caller-provided data, refreshed on [`Simulation::sync_graph`].
    pub node: GraphNode,
    /// Position in container space; `z` is the pseudo-depth.
    pub pos: Vec3,
    pub vel: Vec3,
    /// Per-node offset into the float sinusoids.
    pub phase: f32,
}

/// A link with both endpoints resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLink {
    pub source: usize,
    pub target: usize,
    /// Explicit strength; `None` falls back to
    /// [`PhysicsConfig::link_force`] at force time.
    pub strength: Option<f32>,
}

/// Owner of the live node set and the tick pipeline.
#[derive(Debug)]
pub struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<ResolvedLink>,
    pub physics: PhysicsConfig,
    bounds: Bounds,
    running: bool,
}

impl Simulation {
    pub fn new(physics: PhysicsConfig, bounds: Bounds) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            physics,
            bounds,
            running: false,
        }
    }

    /// Rebuilds the node set from `data`, discarding all kinematic state.
    ///
    /// Seed coordinates are honored per axis; missing axes are randomized
    /// (x/y across the central region of the container, z across the full
    /// depth range). Every node starts at rest with a random float phase.
    ///
    /// ### Parameters
    /// - `data` - The graph to load.
    /// - `rng` - Randomness source for spawn positions and phases.
    pub fn initialize(&mut self, data: &GraphData, rng: &mut impl Rng) {
        let center = self.bounds.center();
        let width = self.bounds.width;
        let height = self.bounds.height;
        let depth_range = self.physics.max_z - self.physics.min_z;

        self.nodes = data
            .nodes
            .iter()
            .map(|node| {
                let x = node
                    .x
                    .unwrap_or_else(|| center.x + (rng.random::<f32>() - 0.5) * width * SPAWN_SPREAD);
                let y = node
                    .y
                    .unwrap_or_else(|| center.y + (rng.random::<f32>() - 0.5) * height * SPAWN_SPREAD);
                let z = node
                    .z
                    .unwrap_or_else(|| (rng.random::<f32>() - 0.5) * depth_range);
                SimNode {
                    node: node.clone(),
                    pos: Vec3::new(x, y, z),
                    vel: Vec3::ZERO,
                    phase: rng.random_range(0.0..TAU),
                }
            })
            .collect();
        self.links = resolve_links(data, &self.nodes);
    }

    /// Feeds a new version of the graph into the simulation.
    ///
    /// A changed node count re-initializes the whole set. An unchanged
    /// count refreshes node metadata in place while positions, velocities
    /// and phases survive, so e.g. a status change recolors a node without
    /// a layout reset. Links are re-resolved either way.
    pub fn sync_graph(&mut self, data: &GraphData, rng: &mut impl Rng) {
        if data.nodes.len() != self.nodes.len() {
            self.initialize(data, rng);
            return;
        }
        for (sim, node) in self.nodes.iter_mut().zip(&data.nodes) {
            sim.node = node.clone();
        }
        self.links = resolve_links(data, &self.nodes);
    }

    /// Advances the simulation by one tick.
    ///
    /// Forces are applied in a fixed order (center, repulsion, links,
    /// float), then positions integrate, velocity decays and positions
    /// clamp to the padded container.
    ///
    /// ### Parameters
    /// - `time_ms` - Monotonic timestamp in milliseconds. It only drives
    ///   the float sinusoids; the tick itself is the integration unit.
    pub fn step(&mut self, time_ms: f64) {
        if self.nodes.is_empty() {
            return;
        }
        self.apply_center_pull();
        self.apply_repulsion();
        self.apply_link_springs();
        self.apply_float(time_ms);
        self.integrate();
    }

    fn apply_center_pull(&mut self) {
        let center = self.bounds.center();
        for n in &mut self.nodes {
            let to_center = center - n.pos.truncate();
            n.vel.x += to_center.x * self.physics.center_force;
            n.vel.y += to_center.y * self.physics.center_force;
        }
    }

    fn apply_repulsion(&mut self) {
        for i in 0..self.nodes.len() {
            // Split so both endpoints of a pair can be mutated in one pass.
            let (head, tail) = self.nodes.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                let d = b.pos - a.pos;
                let dist_sq = d.x * d.x + d.y * d.y + d.z * d.z * DEPTH_WEIGHT;
                let dist = dist_sq.sqrt();
                let dist = if dist == 0.0 { 1.0 } else { dist };
                if dist < self.physics.repel_radius {
                    let force = self.physics.repel_force / (dist_sq + REPEL_SOFTENING);
                    let push = Vec3::new(
                        d.x / dist * force,
                        d.y / dist * force,
                        d.z / dist * force * DEPTH_PUSH,
                    );
                    a.vel -= push;
                    b.vel += push;
                }
            }
        }
    }

    fn apply_link_springs(&mut self) {
        for link in &self.links {
            if link.source == link.target {
                continue;
            }
            let strength = link.strength.unwrap_or(self.physics.link_force);
            let (a, b) = pair_mut(&mut self.nodes, link.source, link.target);

            // Springs act in the plane only; depth is left to repulsion
            // and drift.
            let d = b.pos.truncate() - a.pos.truncate();
            let dist = d.length();
            let dist = if dist == 0.0 { 1.0 } else { dist };
            let stretch = dist - LINK_REST_LENGTH;
            let pull = d / dist * stretch * strength * LINK_DAMPING;

            a.vel.x += pull.x;
            a.vel.y += pull.y;
            b.vel.x -= pull.x;
            b.vel.y -= pull.y;
        }
    }

    fn apply_float(&mut self, time_ms: f64) {
        let speed = f64::from(self.physics.float_speed);
        let amplitude = self.physics.float_amplitude;
        let drift = self.physics.z_drift;
        for n in &mut self.nodes {
            let phase = f64::from(n.phase);
            let fx = (time_ms * speed + phase).sin() as f32 * amplitude;
            let fy = (time_ms * speed * 0.7 + phase * 1.3).cos() as f32 * amplitude;
            let fz = (time_ms * speed * 0.5 + phase * 0.7).sin() as f32 * drift;
            n.vel += Vec3::new(fx, fy, fz) * FLOAT_GAIN;
        }
    }

    fn integrate(&mut self) {
        let decay = self.physics.velocity_decay;
        let max_x = self.bounds.width - EDGE_PADDING;
        let max_y = self.bounds.height - EDGE_PADDING;
        for n in &mut self.nodes {
            n.pos += n.vel;
            n.vel *= decay;
            // Ordered min/max instead of clamp: stays total when the
            // container is narrower than twice the padding.
            n.pos.x = n.pos.x.min(max_x).max(EDGE_PADDING);
            n.pos.y = n.pos.y.min(max_y).max(EDGE_PADDING);
            n.pos.z = n.pos.z.min(self.physics.max_z).max(self.physics.min_z);
        }
    }

    /// Pins the planar position of a node and zeroes its planar velocity.
    /// Depth and depth velocity are untouched. Unknown ids are ignored.
    pub fn set_node_position(&mut self, id: &str, x: f32, y: f32) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.node.id == id) {
            n.pos.x = x;
            n.pos.y = y;
            n.vel.x = 0.0;
            n.vel.y = 0.0;
        }
    }

    /// Adds a planar impulse to a node. Unknown ids are ignored.
    pub fn apply_force(&mut self, id: &str, fx: f32, fy: f32) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.node.id == id) {
            n.vel.x += fx;
            n.vel.y += fy;
        }
    }

    /// Marks the simulation as running. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Marks the simulation as stopped. Kinematic state stays. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Updates the container size. Positions re-clamp on the next tick;
    /// nothing is re-initialized.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current nodes, in input order. This borrow is the per-frame
    /// snapshot readers paint from; mutation waits until it is released.
    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Resolved links; dangling ones were already dropped at sync time.
    pub fn links(&self) -> &[ResolvedLink] {
        &self.links
    }

    /// Index of the node with the given id, if present.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.node.id == id)
    }
}

/// Resolves link endpoint ids to node indices, dropping links whose ids
/// are unknown. The dropped count is logged once per resolution.
fn resolve_links(data: &GraphData, nodes: &[SimNode]) -> Vec<ResolvedLink> {
    let index_of: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.node.id.as_str(), i))
        .collect();

    let mut dropped = 0usize;
    let links: Vec<ResolvedLink> = data
        .links
        .iter()
        .filter_map(|link| {
            match (
                index_of.get(link.source.as_str()),
                index_of.get(link.target.as_str()),
            ) {
                (Some(&source), Some(&target)) => Some(ResolvedLink {
                    source,
                    target,
                    strength: link.strength,
                }),
                _ => {
                    dropped += 1;
                    None
                }
            }
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, "skipped links referencing unknown node ids");
    }
    links
}

/// Mutably borrows two distinct nodes at once.
fn pair_mut(nodes: &mut [SimNode], i: usize, j: usize) -> (&mut SimNode, &mut SimNode) {
    if i < j {
        let (head, tail) = nodes.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = nodes.split_at_mut(i);
        let (b, a) = (&mut head[j], &mut tail[0]);
        (a, b)
    }
}
