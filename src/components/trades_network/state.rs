//! Interaction state for the trades network canvas.
//!
//! Owns the filtered view, its running force simulation, the pan/zoom
//! transform, and the transient drag/hover state. Rebuilt from scratch
//! whenever the league data or the filter options change; the old
//! simulation (and any in-progress drag) goes down with the old state.

use super::filter::{FilterOptions, ViewGraph};
use super::graph::{NodeId, NodeKind, TradeGraph};
use super::highlight::{self, HighlightSet, HoverState, TooltipContent};
use super::scale::ScaledValues;
use super::simulation::{ForceConfig, SimNode, Simulation};

/// Zoom bounds applied by the wheel handler.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;

/// Alpha target held while a drag is active, keeping the layout live.
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor, clamped to [`MIN_ZOOM`]..[`MAX_ZOOM`].
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_index: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Core state combining the view graph, physics simulation, and interaction
/// tracking. Created per (data, filter) combination, then mutated each frame
/// by the animation loop and the pointer handlers.
pub struct TradesNetworkState {
	pub view: ViewGraph,
	pub simulation: Simulation,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	highlight: Option<HighlightSet>,
	pub width: f64,
	pub height: f64,
}

impl TradesNetworkState {
	pub fn new(graph: &TradeGraph, options: &FilterOptions, width: f64, height: f64) -> Self {
		let view = options.view_of(graph);
		let simulation = Simulation::new(&view, width, height, ForceConfig::default());
		Self {
			view,
			simulation,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::Idle,
			highlight: None,
			width,
			height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the given screen position, using per-kind hit
	/// radii (team nodes render far larger than player nodes).
	pub fn node_at_position(&self, sx: f64, sy: f64, scale: &ScaledValues) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for (index, (node, sim)) in self.view.nodes.iter().zip(self.simulation.nodes()).enumerate()
		{
			let hit_radius = match node.kind() {
				NodeKind::Team => scale.team_hit_radius,
				NodeKind::Player => scale.player_hit_radius,
			};
			let (dx, dy) = (sim.x - gx, sim.y - gy);
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(index);
			}
		}
		found
	}

	/// Topmost edge under the given screen position, by distance to the
	/// edge's chord. Curved edges use their chord as an approximation.
	pub fn edge_at_position(&self, sx: f64, sy: f64, scale: &ScaledValues) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let nodes = self.simulation.nodes();
		let mut found = None;
		for (index, &(s, t)) in self.view.edge_endpoints().iter().enumerate() {
			let (a, b) = (&nodes[s], &nodes[t]);
			if segment_distance(gx, gy, a, b) < scale.edge_hit_distance {
				found = Some(index);
			}
		}
		found
	}

	/// Update the hover target, recomputing the highlight closure on actual
	/// transitions. A new hover supersedes the previous one; `None` returns
	/// every element to full opacity.
	pub fn set_hover(&mut self, node_index: Option<usize>) {
		let next = match node_index.and_then(|i| self.view.nodes.get(i)) {
			Some(node) => HoverState::Node(node.id.clone()),
			None => HoverState::Idle,
		};
		if next == self.hover {
			return;
		}
		self.hover = next;
		self.highlight = highlight::hover_closure(&self.view, &self.hover);
	}

	pub fn highlight(&self) -> Option<&HighlightSet> {
		self.highlight.as_ref()
	}

	pub fn node_opacity(&self, id: &NodeId) -> f64 {
		highlight::node_opacity(self.highlight(), id)
	}

	pub fn edge_opacity(&self, index: usize) -> f64 {
		highlight::edge_opacity(self.highlight(), index)
	}

	/// Start dragging the node under the pointer: pin it where it stands
	/// and keep the simulation hot until release.
	pub fn begin_drag(&mut self, node_index: usize, sx: f64, sy: f64) {
		let Some((nx, ny)) = self.simulation.nodes().get(node_index).map(|n| (n.x, n.y))
		else {
			return;
		};
		self.drag = DragState {
			active: true,
			node_index: Some(node_index),
			start_x: sx,
			start_y: sy,
			node_start_x: nx,
			node_start_y: ny,
		};
		self.simulation.pin(node_index, nx, ny);
		self.simulation.set_alpha_target(DRAG_ALPHA_TARGET);
	}

	/// Follow the pointer with the pinned node.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			return;
		}
		if let Some(index) = self.drag.node_index {
			let (dx, dy) = (
				(sx - self.drag.start_x) / self.transform.k,
				(sy - self.drag.start_y) / self.transform.k,
			);
			self.simulation
				.pin(index, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
		}
	}

	/// Release the drag: the node unpins and re-enters free simulation.
	pub fn end_drag(&mut self) {
		if let Some(index) = self.drag.node_index.take() {
			self.simulation.unpin(index);
			self.simulation.set_alpha_target(0.0);
		}
		self.drag.active = false;
	}

	pub fn tooltip_for_node(&self, index: usize) -> Option<TooltipContent> {
		self.view.nodes.get(index).map(TooltipContent::for_node)
	}

	pub fn tooltip_for_edge(&self, index: usize) -> Option<TooltipContent> {
		self.view.edges.get(index).map(TooltipContent::for_edge)
	}

	/// Advance the simulation one frame. Returns whether it is still live.
	pub fn tick(&mut self) -> bool {
		self.simulation.step()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.set_center(width, height);
	}
}

/// Distance from a point to the segment between two simulation nodes.
fn segment_distance(px: f64, py: f64, a: &SimNode, b: &SimNode) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len2 = dx * dx + dy * dy;
	let t = if len2 == 0.0 {
		0.0
	} else {
		(((px - a.x) * dx + (py - a.y) * dy) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.x + t * dx, a.y + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::trades_network::graph::tests::{three_team_league, two_team_league};
	use crate::components::trades_network::names::PlayerNames;
	use crate::components::trades_network::scale::ScaleConfig;

	fn state() -> TradesNetworkState {
		let graph = TradeGraph::build(&two_team_league(), &PlayerNames::default());
		TradesNetworkState::new(&graph, &FilterOptions::default(), 1200.0, 1200.0)
	}

	#[test]
	fn hit_testing_respects_the_view_transform() {
		let mut state = state();
		let scale = ScaledValues::new(&ScaleConfig::default(), state.transform.k);
		let target = &state.simulation.nodes()[0];
		let (x, y) = (target.x, target.y);
		assert_eq!(state.node_at_position(x, y, &scale), Some(0));

		// Shift the viewport; the old screen position no longer hits.
		state.transform.x = 500.0;
		assert_eq!(state.node_at_position(x, y, &scale), None);
		assert_eq!(state.node_at_position(x + 500.0, y, &scale), Some(0));
	}

	#[test]
	fn edge_hit_testing_finds_the_chord() {
		let state = state();
		let scale = ScaledValues::new(&ScaleConfig::default(), state.transform.k);
		let endpoints = state.view.edge_endpoints();
		let (s, t) = endpoints[0];
		let (a, b) = (&state.simulation.nodes()[s], &state.simulation.nodes()[t]);
		let (mx, my) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
		assert_eq!(state.edge_at_position(mx, my, &scale), Some(0));
		assert_eq!(state.edge_at_position(mx + 200.0, my + 200.0, &scale), None);
	}

	#[test]
	fn hover_transitions_swap_the_highlight() {
		let graph = TradeGraph::build(&three_team_league(), &PlayerNames::default());
		let mut state =
			TradesNetworkState::new(&graph, &FilterOptions::default(), 1200.0, 1200.0);
		assert!(state.highlight().is_none());

		// Nodes are teams first, then players: T1 T2 T3 P7 P8.
		state.set_hover(Some(0));
		assert_eq!(state.hover, HoverState::Node(NodeId::Team(1)));
		let first = state.highlight().cloned().unwrap();
		assert!(!first.nodes.contains(&NodeId::Team(3)));

		// A new hover supersedes, it does not stack.
		state.set_hover(Some(4));
		let second = state.highlight().cloned().unwrap();
		assert_ne!(first, second);
		assert!(second.nodes.contains(&NodeId::Team(3)));

		state.set_hover(None);
		assert_eq!(state.hover, HoverState::Idle);
		assert!(state.highlight().is_none());
	}

	#[test]
	fn drag_pins_then_release_unpins() {
		let mut state = state();
		state.begin_drag(0, 100.0, 100.0);
		assert!(state.simulation.nodes()[0].is_pinned());

		state.drag_to(150.0, 130.0);
		let node = &state.simulation.nodes()[0];
		assert_eq!(node.x, state.drag.node_start_x + 50.0);
		assert_eq!(node.y, state.drag.node_start_y + 30.0);

		state.end_drag();
		assert!(!state.simulation.nodes()[0].is_pinned());
		assert!(!state.drag.active);
	}

	#[test]
	fn drag_accounts_for_zoom() {
		let mut state = state();
		state.transform.k = 2.0;
		state.begin_drag(0, 0.0, 0.0);
		state.drag_to(100.0, 0.0);
		// 100 screen pixels at 2x zoom is 50 graph units.
		assert_eq!(
			state.simulation.nodes()[0].x,
			state.drag.node_start_x + 50.0
		);
	}

	#[test]
	fn tooltips_resolve_per_element() {
		let state = state();
		assert_eq!(
			state.tooltip_for_node(0),
			Some(TooltipContent::Team("Alpha".into()))
		);
		assert_eq!(
			state.tooltip_for_edge(0),
			Some(TooltipContent::Trade(vec![(
				"Player P7".into(),
				"Beta".into()
			)]))
		);
		assert_eq!(state.tooltip_for_node(99), None);
	}
}
