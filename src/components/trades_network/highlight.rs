//! Hover highlighting and tooltip content.
//!
//! Hover state is a tagged variant driving a pure closure computation over
//! the view graph; the render pass projects it to per-element opacity. No
//! flags live on render elements, so the logic tests without a canvas.
//!
//! Team hover walks two hops: the directly-traded players, then the other
//! teams those players moved between. Player hover stays at one hop. Edge
//! hover shows a tooltip but never dims the graph.

use std::collections::HashSet;

use super::filter::ViewGraph;
use super::graph::{Edge, Node, NodeId, NodeKind};

/// Opacity applied to everything outside the hover closure.
pub const DIMMED_OPACITY: f64 = 0.1;

/// The interaction controller's hover state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
	#[default]
	Idle,
	Node(NodeId),
}

/// The set of elements kept at full opacity while a hover is active.
/// Edge members are indices into the view's edge list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightSet {
	pub nodes: HashSet<NodeId>,
	pub edges: HashSet<usize>,
}

/// Compute the hover closure for the current hover state.
///
/// `None` means no hover is active and nothing is dimmed. A hovered id that
/// is no longer present in the view also yields an empty-but-active
/// highlight of just itself, which dims the rest of the graph until the
/// pointer moves on.
pub fn hover_closure(view: &ViewGraph, hover: &HoverState) -> Option<HighlightSet> {
	let id = match hover {
		HoverState::Idle => return None,
		HoverState::Node(id) => id,
	};
	let mut set = HighlightSet::default();
	set.nodes.insert(id.clone());

	match id.kind() {
		NodeKind::Team => {
			// First hop: players this team traded for or away.
			for (index, edge) in view.edges.iter().enumerate() {
				if let Some(other) = edge.other_endpoint(id) {
					if other.kind() == NodeKind::Player {
						set.nodes.insert(other.clone());
						set.edges.insert(index);
					}
				}
			}
			// Second hop: other teams those players moved between.
			let players: Vec<NodeId> = set
				.nodes
				.iter()
				.filter(|n| n.kind() == NodeKind::Player)
				.cloned()
				.collect();
			for (index, edge) in view.edges.iter().enumerate() {
				for player in &players {
					if let Some(other) = edge.other_endpoint(player) {
						if other.kind() == NodeKind::Team && other != id {
							set.nodes.insert(other.clone());
							set.edges.insert(index);
						}
					}
				}
			}
		}
		NodeKind::Player => {
			for (index, edge) in view.edges.iter().enumerate() {
				if let Some(other) = edge.other_endpoint(id) {
					set.nodes.insert(other.clone());
					set.edges.insert(index);
				}
			}
		}
	}
	Some(set)
}

/// Opacity for a node under the current highlight.
pub fn node_opacity(highlight: Option<&HighlightSet>, id: &NodeId) -> f64 {
	match highlight {
		Some(set) if !set.nodes.contains(id) => DIMMED_OPACITY,
		_ => 1.0,
	}
}

/// Opacity for an edge (by view index) under the current highlight.
pub fn edge_opacity(highlight: Option<&HighlightSet>, index: usize) -> f64 {
	match highlight {
		Some(set) if !set.edges.contains(&index) => DIMMED_OPACITY,
		_ => 1.0,
	}
}

/// What the tooltip shows for the current hover target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TooltipContent {
	Team(String),
	Player(String),
	/// The owning transaction's adds, as `(player, team)` pairs.
	Trade(Vec<(String, String)>),
}

impl TooltipContent {
	pub fn for_node(node: &Node) -> Self {
		match node.kind() {
			NodeKind::Team => Self::Team(node.label.clone()),
			NodeKind::Player => Self::Player(node.label.clone()),
		}
	}

	pub fn for_edge(edge: &Edge) -> Self {
		Self::Trade(edge.summary.adds.clone())
	}

	/// Leading caption, rendered bold by the tooltip view.
	pub fn caption(&self) -> &'static str {
		match self {
			Self::Team(_) => "Team:",
			Self::Player(_) => "Player:",
			Self::Trade(_) => "Trade:",
		}
	}

	/// Body text following the caption.
	pub fn body(&self) -> String {
		match self {
			Self::Team(label) | Self::Player(label) => label.clone(),
			Self::Trade(adds) => adds
				.iter()
				.map(|(player, team)| format!("{player} to {team}"))
				.collect::<Vec<_>>()
				.join(", "),
		}
	}
}
