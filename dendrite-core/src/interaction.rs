//! Hover, click and drag handling.
//!
//! The host feeds pointer positions in container coordinates; this layer
//! resolves them against the painted graph (paint order, parallax
//! offsets, depth-scaled sizes) and queues [`GraphEvent`]s for the
//! application to drain once per frame.

use crate::config::{PhysicsConfig, VisualConfig};
use crate::node::GraphNode;
use crate::parallax::Parallax;
use crate::sim::{SimNode, Simulation};
use crate::visual::{depth_order, node_visual, screen_position};
use glam::Vec2;
use tracing::trace;

/// Blend factor for the pointer velocity estimate kept during drags.
const DRAG_VELOCITY_SMOOTHING: f32 = 0.3;

/// Events the interaction layer reports back to the application.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
    /// The node under the pointer changed; `None` means open space.
    HoverChanged(Option<GraphNode>),
    /// A primary click landed on a node.
    NodeClicked(GraphNode),
}

/// Finds the node under the pointer, if any.
///
/// Nodes are tested against their painted circles, so the parallax
/// offset and the depth-scaled diameter both count. Scanning follows
/// paint order and keeps the last hit, which makes the frontmost node
/// win overlaps; among nodes at identical depth the one painted last
/// wins.
///
/// ### Returns
/// Index of the hit node in the simulation's node slice.
pub fn hit_test(
    nodes: &[SimNode],
    pointer: Vec2,
    parallax: &Parallax,
    physics: &PhysicsConfig,
    visual: &VisualConfig,
) -> Option<usize> {
    let mut hit = None;
    for &i in &depth_order(nodes) {
        let n = &nodes[i];
        let v = node_visual(n, physics, visual);
        let center = screen_position(n, parallax, physics);
        if pointer.distance(center) < v.size * 0.5 {
            hit = Some(i);
        }
    }
    hit
}

#[derive(Clone, Debug)]
struct DragState {
    id: String,
    /// Pointer position minus node center at grab time; keeps the node
    /// from snapping to the cursor.
    grab_offset: Vec2,
    last_pointer: Vec2,
    /// Smoothed pointer velocity, handed to the simulation on release.
    velocity: Vec2,
}

/// Pointer state machine: tracks the hovered node and at most one
/// in-flight drag, and queues the resulting [`GraphEvent`]s.
#[derive(Debug, Default)]
pub struct Interaction {
    hovered: Option<String>,
    drag: Option<DragState>,
    events: Vec<GraphEvent>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the currently hovered node, if any.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Updates the hover state from the pointer position; `None` means
    /// the pointer left the container. Emits
    /// [`GraphEvent::HoverChanged`] only on actual changes, and is
    /// frozen while a drag is in flight.
    pub fn hover(
        &mut self,
        pointer: Option<Vec2>,
        sim: &Simulation,
        parallax: &Parallax,
        visual: &VisualConfig,
    ) {
        if self.drag.is_some() {
            return;
        }
        let hit = pointer.and_then(|p| hit_test(sim.nodes(), p, parallax, &sim.physics, visual));
        let id = hit.map(|i| sim.nodes()[i].node.id.clone());
        if id != self.hovered {
            self.hovered = id;
            self.events
                .push(GraphEvent::HoverChanged(hit.map(|i| sim.nodes()[i].node.clone())));
        }
    }

    /// Starts dragging the node under the pointer, if there is one.
    /// The grabbed node also becomes the hovered node.
    pub fn drag_started(
        &mut self,
        pointer: Vec2,
        sim: &Simulation,
        parallax: &Parallax,
        visual: &VisualConfig,
    ) {
        let Some(i) = hit_test(sim.nodes(), pointer, parallax, &sim.physics, visual) else {
            return;
        };
        let n = &sim.nodes()[i];
        let center = screen_position(n, parallax, &sim.physics);
        trace!(id = %n.node.id, "drag start");
        self.drag = Some(DragState {
            id: n.node.id.clone(),
            grab_offset: pointer - center,
            last_pointer: pointer,
            velocity: Vec2::ZERO,
        });
        if self.hovered.as_deref() != Some(n.node.id.as_str()) {
            self.hovered = Some(n.node.id.clone());
            self.events
                .push(GraphEvent::HoverChanged(Some(n.node.clone())));
        }
    }

    /// Moves the dragged node to follow the pointer, honoring the grab
    /// offset and compensating the node's own parallax offset. Also
    /// refreshes the pointer velocity estimate.
    pub fn drag_moved(&mut self, pointer: Vec2, sim: &mut Simulation, parallax: &Parallax) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let step = pointer - drag.last_pointer;
        drag.velocity = drag.velocity.lerp(step, DRAG_VELOCITY_SMOOTHING);
        drag.last_pointer = pointer;
        let grab_offset = drag.grab_offset;
        let id = drag.id.clone();

        let Some(i) = sim.node_index(&id) else {
            // The node vanished in a graph resync; abandon the drag.
            self.drag = None;
            return;
        };
        let z = sim.nodes()[i].pos.z;
        let offset = parallax.node_offset(z, sim.physics.min_z, sim.physics.max_z);
        let target = pointer - grab_offset - offset;
        sim.set_node_position(&id, target.x, target.y);
    }

    /// Ends the drag, handing the smoothed pointer velocity to the
    /// simulation as release momentum.
    pub fn drag_stopped(&mut self, sim: &mut Simulation) {
        if let Some(drag) = self.drag.take() {
            trace!(id = %drag.id, velocity = ?drag.velocity, "drag end");
            sim.apply_force(&drag.id, drag.velocity.x, drag.velocity.y);
        }
    }

    /// Reports a primary click. Emits [`GraphEvent::NodeClicked`] when a
    /// node is currently hovered; clicks on open space are dropped.
    pub fn clicked(&mut self, sim: &Simulation) {
        if let Some(id) = self.hovered.as_deref()
            && let Some(i) = sim.node_index(id)
        {
            self.events
                .push(GraphEvent::NodeClicked(sim.nodes()[i].node.clone()));
        }
    }

    /// Drains the queued events in emission order.
    pub fn take_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParallaxConfig;
    use crate::node::{GraphData, GraphLink, GraphNode, NodeSize, NodeStatus};
    use crate::types::Bounds;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn node_at(id: &str, x: f32, y: f32, z: f32, size: NodeSize) -> GraphNode {
        GraphNode {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            ..GraphNode::new(id, id, size, NodeStatus::Pending)
        }
    }

    fn sim_with(nodes: Vec<GraphNode>) -> Simulation {
        let mut sim = Simulation::new(PhysicsConfig::default(), Bounds::new(800.0, 600.0));
        let data = GraphData {
            nodes,
            links: vec![],
        };
        sim.initialize(&data, &mut StdRng::seed_from_u64(1));
        sim
    }

    fn mapper() -> Parallax {
        Parallax::new(ParallaxConfig::default())
    }

    #[test]
    fn hit_test_respects_the_depth_scaled_radius() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        // Near plane: medium node paints at full 40 px diameter.
        let sim = sim_with(vec![node_at("near", 100.0, 100.0, 500.0, NodeSize::Medium)]);

        let hit = |x: f32| {
            hit_test(
                sim.nodes(),
                Vec2::new(x, 100.0),
                &parallax,
                &sim.physics,
                &visual,
            )
        };
        assert_eq!(hit(110.0), Some(0));
        assert_eq!(hit(125.0), None);

        // Far plane: the same node shrinks to 16 px, so 10 px off misses.
        let far = sim_with(vec![node_at("far", 100.0, 100.0, -500.0, NodeSize::Medium)]);
        let hit_far = hit_test(
            far.nodes(),
            Vec2::new(110.0, 100.0),
            &parallax,
            &far.physics,
            &visual,
        );
        assert_eq!(hit_far, None);
    }

    #[test]
    fn hit_test_prefers_the_frontmost_node() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let sim = sim_with(vec![
            node_at("back", 100.0, 100.0, 300.0, NodeSize::Large),
            node_at("front", 100.0, 100.0, 400.0, NodeSize::Large),
        ]);

        let hit = hit_test(
            sim.nodes(),
            Vec2::new(100.0, 100.0),
            &parallax,
            &sim.physics,
            &visual,
        )
        .unwrap();
        assert_eq!(sim.nodes()[hit].node.id, "front");
    }

    #[test]
    fn hit_test_tie_breaks_equal_depth_by_paint_order() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let sim = sim_with(vec![
            node_at("first", 100.0, 100.0, 0.0, NodeSize::Large),
            node_at("second", 100.0, 100.0, 0.0, NodeSize::Large),
        ]);

        // Equal depth keeps input order, so "second" paints last and wins.
        let hit = hit_test(
            sim.nodes(),
            Vec2::new(100.0, 100.0),
            &parallax,
            &sim.physics,
            &visual,
        )
        .unwrap();
        assert_eq!(sim.nodes()[hit].node.id, "second");
    }

    #[test]
    fn hover_emits_events_only_on_change() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let sim = sim_with(vec![node_at("a", 100.0, 100.0, 500.0, NodeSize::Medium)]);
        let mut interaction = Interaction::new();

        interaction.hover(Some(Vec2::new(100.0, 100.0)), &sim, &parallax, &visual);
        let events = interaction.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GraphEvent::HoverChanged(Some(n)) if n.id == "a"));

        // Same node again: no event.
        interaction.hover(Some(Vec2::new(105.0, 100.0)), &sim, &parallax, &visual);
        assert!(interaction.take_events().is_empty());

        // Off into open space: one None event.
        interaction.hover(Some(Vec2::new(400.0, 400.0)), &sim, &parallax, &visual);
        let events = interaction.take_events();
        assert_eq!(events, vec![GraphEvent::HoverChanged(None)]);

        // Pointer leaves the container entirely: still nothing hovered.
        interaction.hover(None, &sim, &parallax, &visual);
        assert!(interaction.take_events().is_empty());
        assert_eq!(interaction.hovered(), None);
    }

    #[test]
    fn hover_is_frozen_while_dragging() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let sim = sim_with(vec![
            node_at("a", 100.0, 100.0, 500.0, NodeSize::Medium),
            node_at("b", 300.0, 100.0, 500.0, NodeSize::Medium),
        ]);
        let mut interaction = Interaction::new();

        interaction.drag_started(Vec2::new(100.0, 100.0), &sim, &parallax, &visual);
        assert!(interaction.is_dragging());
        interaction.take_events();

        interaction.hover(Some(Vec2::new(300.0, 100.0)), &sim, &parallax, &visual);
        assert!(interaction.take_events().is_empty());
        assert_eq!(interaction.hovered(), Some("a"));
    }

    #[test]
    fn drag_moves_the_node_with_the_grab_offset() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let mut sim = sim_with(vec![node_at("a", 100.0, 100.0, 500.0, NodeSize::Medium)]);
        let mut interaction = Interaction::new();

        // Grab 10 px right and 5 px below the center.
        interaction.drag_started(Vec2::new(110.0, 105.0), &sim, &parallax, &visual);
        interaction.drag_moved(Vec2::new(150.0, 140.0), &mut sim, &parallax);

        let n = &sim.nodes()[0];
        assert_eq!(n.pos.x, 140.0);
        assert_eq!(n.pos.y, 135.0);
        // Pinned while dragged.
        assert_eq!(n.vel.x, 0.0);
        assert_eq!(n.vel.y, 0.0);
    }

    #[test]
    fn drag_release_applies_momentum() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let mut sim = sim_with(vec![node_at("a", 100.0, 100.0, 500.0, NodeSize::Medium)]);
        let mut interaction = Interaction::new();

        interaction.drag_started(Vec2::new(100.0, 100.0), &sim, &parallax, &visual);
        interaction.drag_moved(Vec2::new(120.0, 110.0), &mut sim, &parallax);
        interaction.drag_stopped(&mut sim);

        assert!(!interaction.is_dragging());
        // One 20/10 px pointer step blended at 0.3 becomes the impulse.
        let n = &sim.nodes()[0];
        assert!((n.vel.x - 6.0).abs() < 1e-4);
        assert!((n.vel.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn drag_on_open_space_is_ignored() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let mut sim = sim_with(vec![node_at("a", 100.0, 100.0, 500.0, NodeSize::Medium)]);
        let mut interaction = Interaction::new();

        interaction.drag_started(Vec2::new(500.0, 500.0), &sim, &parallax, &visual);
        assert!(!interaction.is_dragging());
        // Subsequent move/stop calls are harmless no-ops.
        interaction.drag_moved(Vec2::new(510.0, 500.0), &mut sim, &parallax);
        interaction.drag_stopped(&mut sim);
        assert!(interaction.take_events().is_empty());
    }

    #[test]
    fn click_requires_a_hovered_node() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let sim = sim_with(vec![node_at("a", 100.0, 100.0, 500.0, NodeSize::Medium)]);
        let mut interaction = Interaction::new();

        interaction.clicked(&sim);
        assert!(interaction.take_events().is_empty());

        interaction.hover(Some(Vec2::new(100.0, 100.0)), &sim, &parallax, &visual);
        interaction.take_events();
        interaction.clicked(&sim);
        let events = interaction.take_events();
        assert!(matches!(&events[0], GraphEvent::NodeClicked(n) if n.id == "a"));
    }

    #[test]
    fn node_vanishing_mid_drag_abandons_the_drag() {
        let visual = VisualConfig::default();
        let parallax = mapper();
        let mut sim = sim_with(vec![node_at("a", 100.0, 100.0, 500.0, NodeSize::Medium)]);
        let mut interaction = Interaction::new();

        interaction.drag_started(Vec2::new(100.0, 100.0), &sim, &parallax, &visual);
        assert!(interaction.is_dragging());

        // The graph is replaced under the drag.
        let replacement = GraphData {
            nodes: vec![
                node_at("x", 200.0, 200.0, 0.0, NodeSize::Small),
                node_at("y", 400.0, 200.0, 0.0, NodeSize::Small),
            ],
            links: vec![GraphLink::new("x", "y")],
        };
        sim.sync_graph(&replacement, &mut StdRng::seed_from_u64(2));

        interaction.drag_moved(Vec2::new(150.0, 150.0), &mut sim, &parallax);
        assert!(!interaction.is_dragging());
    }
}
