//! View filtering: transaction-kind selection and degree pruning.
//!
//! The filter projects the full trade graph into the [`ViewGraph`] handed to
//! layout and rendering. It is a pure function of its inputs and is rebuilt
//! wholesale whenever the data or the filter options change; league-season
//! inputs are small enough that incremental updates would buy nothing.

use std::collections::{HashMap, HashSet};

use super::graph::{Edge, Node, NodeId, NodeKind, TradeGraph};
use super::types::TransactionKind;

/// Which transaction kinds contribute edges to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindSelection {
	pub trade: bool,
	pub waiver: bool,
	pub free_agent: bool,
}

impl KindSelection {
	pub fn contains(&self, kind: TransactionKind) -> bool {
		match kind {
			TransactionKind::Trade => self.trade,
			TransactionKind::Waiver => self.waiver,
			TransactionKind::FreeAgent => self.free_agent,
			TransactionKind::Other => false,
		}
	}
}

impl Default for KindSelection {
	/// Trades only.
	fn default() -> Self {
		Self {
			trade: true,
			waiver: false,
			free_agent: false,
		}
	}
}

/// Filter parameters exposed to the UI shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
	pub kinds: KindSelection,
	/// When set, prune nodes touched by at most one surviving edge.
	pub degree_filter: bool,
}

impl FilterOptions {
	/// Apply kind and degree filtering to a node/edge set.
	///
	/// Surviving edges always have both endpoints in the surviving node set.
	/// With the degree filter off, team nodes pass through even when
	/// orphaned, while player nodes require at least one surviving edge
	/// (players only exist by way of their transactions).
	pub fn apply(&self, nodes: &[Node], edges: &[Edge]) -> ViewGraph {
		let node_ids: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
		let kind_filtered: Vec<&Edge> = edges
			.iter()
			.filter(|e| {
				self.kinds.contains(e.kind)
					&& node_ids.contains(&e.source)
					&& node_ids.contains(&e.target)
			})
			.collect();

		let (nodes, edges) = if self.degree_filter {
			// Prune to a fixpoint: dropping an edge lowers its endpoints'
			// degrees, which can expose further single-link nodes. The
			// fixpoint makes re-filtering the identity.
			let mut kept = kind_filtered;
			loop {
				let degrees = degree_map(&kept);
				let degree = |id: &NodeId| degrees.get(id).copied().unwrap_or(0);
				let next: Vec<&Edge> = kept
					.iter()
					.filter(|e| degree(&e.source) > 1 && degree(&e.target) > 1)
					.copied()
					.collect();
				if next.len() == kept.len() {
					break;
				}
				kept = next;
			}
			let degrees = degree_map(&kept);
			(
				nodes
					.iter()
					.filter(|n| degrees.get(&n.id).copied().unwrap_or(0) > 1)
					.cloned()
					.collect(),
				kept.iter().map(|e| (*e).clone()).collect(),
			)
		} else {
			let degrees = degree_map(&kind_filtered);
			(
				nodes
					.iter()
					.filter(|n| {
						n.kind() == NodeKind::Team
							|| degrees.get(&n.id).copied().unwrap_or(0) > 0
					})
					.cloned()
					.collect(),
				kind_filtered.iter().map(|e| (*e).clone()).collect(),
			)
		};

		ViewGraph::new(nodes, edges)
	}

	/// Convenience wrapper over [`FilterOptions::apply`] for the full graph.
	pub fn view_of(&self, graph: &TradeGraph) -> ViewGraph {
		self.apply(&graph.nodes, &graph.edges)
	}
}

fn degree_map<'a>(edges: &[&'a Edge]) -> HashMap<&'a NodeId, usize> {
	let mut degrees = HashMap::new();
	for edge in edges {
		*degrees.entry(&edge.source).or_insert(0) += 1;
		*degrees.entry(&edge.target).or_insert(0) += 1;
	}
	degrees
}

/// Curve assignment for one edge of the view.
///
/// Parallel edges between the same unordered node pair alternate sweep
/// direction by their insertion-order position within that pair, so two
/// parallel edges always bow apart. Lone edges render straight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeCurve {
	Straight,
	Arc { clockwise: bool },
}

/// The filtered graph fed to layout and rendering.
#[derive(Clone, Debug, Default)]
pub struct ViewGraph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	/// Curve assignment per edge, parallel to `edges`.
	pub curves: Vec<EdgeCurve>,
	index: HashMap<NodeId, usize>,
}

impl ViewGraph {
	fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		let index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		let curves = edge_curves(&edges);
		Self {
			nodes,
			edges,
			curves,
			index,
		}
	}

	/// Index of a node in `nodes` by id.
	pub fn index_of(&self, id: &NodeId) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Resolved `(source, target)` node indices per edge, in edge order.
	/// Infallible on a well-formed view: the filter never emits an edge with
	/// a missing endpoint.
	pub fn edge_endpoints(&self) -> Vec<(usize, usize)> {
		self.edges
			.iter()
			.filter_map(|e| Some((self.index_of(&e.source)?, self.index_of(&e.target)?)))
			.collect()
	}
}

fn pair_key(edge: &Edge) -> (NodeId, NodeId) {
	let (a, b) = (edge.source.clone(), edge.target.clone());
	if a <= b { (a, b) } else { (b, a) }
}

fn edge_curves(edges: &[Edge]) -> Vec<EdgeCurve> {
	let mut pair_counts: HashMap<(NodeId, NodeId), usize> = HashMap::new();
	for edge in edges {
		*pair_counts.entry(pair_key(edge)).or_insert(0) += 1;
	}

	let mut seen: HashMap<(NodeId, NodeId), usize> = HashMap::new();
	edges
		.iter()
		.map(|edge| {
			let key = pair_key(edge);
			if pair_counts[&key] > 1 {
				let position = seen.entry(key).or_insert(0);
				let clockwise = *position % 2 == 0;
				*position += 1;
				EdgeCurve::Arc { clockwise }
			} else {
				EdgeCurve::Straight
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::trades_network::graph::tests::{
		roster, transaction, two_team_league, user,
	};
	use crate::components::trades_network::names::PlayerNames;
	use crate::components::trades_network::types::LeagueData;

	fn build(data: &LeagueData) -> TradeGraph {
		TradeGraph::build(data, &PlayerNames::default())
	}

	#[test]
	fn kind_filter_drops_excluded_edges_and_their_players() {
		let data = LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2")],
			users: vec![user("u1", "Alpha"), user("u2", "Beta")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2)], &[("P7", 1)]),
				transaction(TransactionKind::Waiver, &[("P9", 1)], &[]),
			],
		};
		let graph = build(&data);
		assert_eq!(graph.edges.len(), 3);

		let view = FilterOptions::default().view_of(&graph);
		assert!(view.edges.iter().all(|e| e.kind == TransactionKind::Trade));
		// The waiver-only player contributes nothing to the view.
		assert!(view.index_of(&NodeId::Player("P9".into())).is_none());
		// Teams stay visible even if orphaned.
		assert_eq!(
			view.nodes.iter().filter(|n| n.kind() == NodeKind::Team).count(),
			2
		);
	}

	#[test]
	fn degree_filter_prunes_single_endpoint_nodes() {
		let graph = build(&two_team_league());
		let options = FilterOptions {
			degree_filter: true,
			..Default::default()
		};
		let view = options.view_of(&graph);
		// Degrees start at T1=1, T2=1, P7=2; pruning the teams strands P7,
		// so the cascade empties the view.
		assert!(view.nodes.is_empty());
		assert!(view.edges.is_empty());
	}

	#[test]
	fn degree_filter_keeps_a_stable_trade_cycle() {
		// P7 and P8 swapped between T1 and T2: every node keeps degree 2.
		let data = LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2")],
			users: vec![user("u1", "A"), user("u2", "B")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2)], &[("P7", 1)]),
				transaction(TransactionKind::Trade, &[("P8", 1)], &[("P8", 2)]),
			],
		};
		let graph = build(&data);
		let options = FilterOptions {
			degree_filter: true,
			..Default::default()
		};
		let view = options.view_of(&graph);
		assert_eq!(view.nodes.len(), 4);
		assert_eq!(view.edges.len(), 4);
	}

	#[test]
	fn degree_filter_never_leaves_dangling_edges() {
		let data = LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2"), roster(3, "u3")],
			users: vec![user("u1", "A"), user("u2", "B"), user("u3", "C")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2)], &[("P7", 1)]),
				transaction(TransactionKind::Trade, &[("P8", 1)], &[("P8", 2)]),
				transaction(TransactionKind::Trade, &[("P9", 3)], &[]),
			],
		};
		let graph = build(&data);
		let options = FilterOptions {
			degree_filter: true,
			..Default::default()
		};
		let view = options.view_of(&graph);
		for edge in &view.edges {
			assert!(view.index_of(&edge.source).is_some());
			assert!(view.index_of(&edge.target).is_some());
		}
		// The single-link T3/P9 pair is pruned.
		assert!(view.index_of(&NodeId::Team(3)).is_none());
		assert!(view.index_of(&NodeId::Player("P9".into())).is_none());
	}

	#[test]
	fn filtering_is_idempotent() {
		let data = LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2")],
			users: vec![user("u1", "A"), user("u2", "B")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2)], &[("P7", 1)]),
				transaction(TransactionKind::FreeAgent, &[("P2", 1)], &[]),
			],
		};
		let graph = build(&data);
		for options in [
			FilterOptions::default(),
			FilterOptions {
				degree_filter: true,
				..Default::default()
			},
		] {
			let once = options.view_of(&graph);
			let twice = options.apply(&once.nodes, &once.edges);
			assert_eq!(once.nodes, twice.nodes);
			assert_eq!(once.edges.len(), twice.edges.len());
			assert_eq!(once.curves, twice.curves);
		}
	}

	#[test]
	fn unfiltered_view_matches_builder_output() {
		// 2 teams, one trade: adds {P7: T2}, drops {P7: T1}.
		let graph = build(&two_team_league());
		let view = FilterOptions::default().view_of(&graph);
		assert_eq!(view.nodes.len(), 3);
		assert_eq!(view.edges.len(), 2);
	}

	#[test]
	fn parallel_edges_curve_in_opposite_directions() {
		// P7 added to T2 and later dropped by T2: same unordered pair.
		let data = LeagueData {
			rosters: vec![roster(2, "u2")],
			users: vec![user("u2", "Beta")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2)], &[]),
				transaction(TransactionKind::Trade, &[], &[("P7", 2)]),
			],
		};
		let view = FilterOptions::default().view_of(&build(&data));
		assert_eq!(
			view.curves,
			vec![
				EdgeCurve::Arc { clockwise: true },
				EdgeCurve::Arc { clockwise: false }
			]
		);
	}

	#[test]
	fn lone_edges_render_straight() {
		let view = FilterOptions::default().view_of(&build(&two_team_league()));
		assert_eq!(view.curves, vec![EdgeCurve::Straight, EdgeCurve::Straight]);
	}
}
