//! Built-in demo graphs for the viewer.
//!
//! [`study_plan`] is a small hand-written curriculum graph that shows
//! every status and size; [`random_graph`] generates an arbitrarily
//! sized tree with a few cross links for stress runs.

use dendrite_core::node::{GraphData, GraphLink, GraphNode, NodeSize, NodeStatus};
use rand::Rng;

/// Adds a node and, when `parent` is set, the link that attaches it.
fn push_node(
    data: &mut GraphData,
    mut node: GraphNode,
    parent: Option<&str>,
    strength: Option<f32>,
) {
    if let Some(parent) = parent {
        node.parent_id = Some(parent.to_owned());
        let mut link = GraphLink::new(parent, node.id.clone());
        link.strength = strength;
        data.links.push(link);
    }
    data.nodes.push(node);
}

/// The built-in demo: one study-plan hub, a ring of subjects and their
/// subtopics, with mixed statuses and progress.
pub fn study_plan() -> GraphData {
    let mut data = GraphData::default();

    let mut hub = GraphNode::new("plan", "Study Plan", NodeSize::Large, NodeStatus::InProgress);
    hub.progress = Some(45.0);
    hub.icon = Some("🎯".to_owned());
    push_node(&mut data, hub, None, None);

    // Subjects hang off the hub with a softer spring so the ring can
    // spread out.
    let mut constitution = GraphNode::new(
        "constitution",
        "Constitutional Law",
        NodeSize::Medium,
        NodeStatus::Completed,
    );
    constitution.progress = Some(100.0);
    constitution.icon = Some("⚖".to_owned());
    push_node(&mut data, constitution, Some("plan"), Some(0.15));

    let mut admin = GraphNode::new(
        "admin-law",
        "Administrative Law",
        NodeSize::Medium,
        NodeStatus::InProgress,
    );
    admin.progress = Some(55.0);
    admin.icon = Some("📋".to_owned());
    push_node(&mut data, admin, Some("plan"), Some(0.15));

    let mut eu = GraphNode::new(
        "eu-institutions",
        "EU Institutions",
        NodeSize::Medium,
        NodeStatus::InProgress,
    );
    eu.progress = Some(30.0);
    eu.icon = Some("🏛".to_owned());
    push_node(&mut data, eu, Some("plan"), Some(0.15));

    let mut finance = GraphNode::new(
        "public-finance",
        "Public Finance",
        NodeSize::Medium,
        NodeStatus::Pending,
    );
    finance.icon = Some("💰".to_owned());
    push_node(&mut data, finance, Some("plan"), Some(0.15));

    let mut statute = GraphNode::new(
        "civil-service",
        "Civil Service Statute",
        NodeSize::Medium,
        NodeStatus::NotStarted,
    );
    statute.icon = Some("📖".to_owned());
    push_node(&mut data, statute, Some("plan"), Some(0.15));

    // Subtopics use the default spring strength.
    let mut rights = GraphNode::new(
        "fundamental-rights",
        "Fundamental Rights",
        NodeSize::Small,
        NodeStatus::Completed,
    );
    rights.progress = Some(100.0);
    push_node(&mut data, rights, Some("constitution"), None);

    let mut state_org = GraphNode::new(
        "state-organization",
        "State Organization",
        NodeSize::Small,
        NodeStatus::Completed,
    );
    state_org.progress = Some(100.0);
    push_node(&mut data, state_org, Some("constitution"), None);

    let mut procedure = GraphNode::new(
        "admin-procedure",
        "Administrative Procedure",
        NodeSize::Small,
        NodeStatus::InProgress,
    );
    procedure.progress = Some(60.0);
    push_node(&mut data, procedure, Some("admin-law"), None);

    let mut contracts = GraphNode::new(
        "public-contracts",
        "Public Contracts",
        NodeSize::Small,
        NodeStatus::Blocked,
    );
    contracts.color = Some("#F97316".to_owned());
    push_node(&mut data, contracts, Some("admin-law"), None);

    let sources = GraphNode::new(
        "eu-law-sources",
        "Sources of EU Law",
        NodeSize::Small,
        NodeStatus::Pending,
    );
    push_node(&mut data, sources, Some("eu-institutions"), None);

    data
}

/// Generates a random connected graph: every node after the first links
/// back to an earlier one, plus a handful of extra cross links.
pub fn random_graph(count: usize, rng: &mut impl Rng) -> GraphData {
    if count == 0 {
        return GraphData::default();
    }

    let statuses = [
        NodeStatus::Pending,
        NodeStatus::InProgress,
        NodeStatus::Completed,
        NodeStatus::Blocked,
        NodeStatus::NotStarted,
    ];
    let mut data = GraphData::default();
    for i in 0..count {
        let status = statuses[rng.random_range(0..statuses.len())];
        let size = match i {
            0 => NodeSize::Large,
            _ if i % 4 == 0 => NodeSize::Medium,
            _ => NodeSize::Small,
        };
        let mut node = GraphNode::new(format!("node-{i}"), format!("Node {i}"), size, status);
        if status == NodeStatus::InProgress {
            node.progress = Some(rng.random_range(0.0..100.0));
        }
        let parent = (i > 0).then(|| format!("node-{}", rng.random_range(0..i)));
        push_node(&mut data, node, parent.as_deref(), None);
    }

    // Cross links knot the tree into clusters.
    for _ in 0..count / 5 {
        let a = rng.random_range(0..count);
        let b = rng.random_range(0..count);
        if a != b {
            data.links
                .push(GraphLink::new(format!("node-{a}"), format!("node-{b}")));
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn assert_links_resolve(data: &GraphData) {
        let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), data.nodes.len(), "duplicate node ids");
        for link in &data.links {
            assert!(ids.contains(link.source.as_str()), "{}", link.source);
            assert!(ids.contains(link.target.as_str()), "{}", link.target);
        }
        for node in &data.nodes {
            if let Some(parent) = &node.parent_id {
                assert!(ids.contains(parent.as_str()), "{parent}");
            }
        }
    }

    #[test]
    fn study_plan_links_reference_existing_nodes() {
        assert_links_resolve(&study_plan());
    }

    #[test]
    fn study_plan_covers_every_status() {
        let data = study_plan();
        for status in [
            NodeStatus::Pending,
            NodeStatus::InProgress,
            NodeStatus::Completed,
            NodeStatus::Blocked,
            NodeStatus::NotStarted,
        ] {
            assert!(
                data.nodes.iter().any(|n| n.status == status),
                "missing {status:?}"
            );
        }
    }

    #[test]
    fn study_plan_progress_stays_in_range() {
        for node in &study_plan().nodes {
            if let Some(p) = node.progress {
                assert!((0.0..=100.0).contains(&p), "{}: {p}", node.id);
            }
        }
    }

    #[test]
    fn random_graph_is_connected_and_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = random_graph(40, &mut rng);
        assert_eq!(data.nodes.len(), 40);
        // Tree edges alone already connect everything.
        assert!(data.links.len() >= 39);
        assert_links_resolve(&data);
    }

    #[test]
    fn random_graph_handles_tiny_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_graph(0, &mut rng), GraphData::default());
        let single = random_graph(1, &mut rng);
        assert_eq!(single.nodes.len(), 1);
        assert!(single.links.is_empty());
    }
}
