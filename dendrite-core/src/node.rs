//! Graph data model handed to the engine by callers.
//!
//! Everything here is plain data. Kinematic state (position, velocity,
//! float phase) is owned by [`crate::sim::Simulation`]; the one exception
//! is the optional seed coordinates on [`GraphNode`], which are honored
//! per axis when the simulation initializes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visual size category of a node. The pixel diameter each category maps
/// to lives in [`crate::config::NodeSizes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeSize {
    Large,
    Medium,
    Small,
}

/// Progress state of a node, driving its default color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeStatus {
    Pending,
    InProgress,
    Completed,
    Blocked,
    NotStarted,
}

/// One node of the input graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GraphNode {
    /// Stable identifier; links reference nodes by it.
    pub id: String,
    pub label: String,
    pub size: NodeSize,
    pub status: NodeStatus,
    /// Optional grouping hint; the engine itself does not interpret it.
    pub parent_id: Option<String>,
    /// Completion percentage in `0..=100`, if the node tracks one.
    pub progress: Option<f32>,
    /// Hex color override; when absent the status color applies.
    pub color: Option<String>,
    /// Single glyph (usually an emoji) drawn inside the node.
    pub icon: Option<String>,
    /// Seed coordinates. Missing axes are randomized at initialization;
    /// present ones pass through unchanged.
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl GraphNode {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        size: NodeSize,
        status: NodeStatus,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            size,
            status,
            parent_id: None,
            progress: None,
            color: None,
            icon: None,
            x: None,
            y: None,
            z: None,
        }
    }
}

/// An edge between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    /// Spring strength; `None` falls back to
    /// [`crate::config::PhysicsConfig::link_force`].
    pub strength: Option<f32>,
}

impl GraphLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            strength: None,
        }
    }
}

/// A complete graph: the unit callers feed to
/// [`crate::sim::Simulation::sync_graph`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}
