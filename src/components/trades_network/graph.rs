//! Trade graph construction.
//!
//! Turns the raw league payload into a typed node/edge graph: one team node
//! per roster (created eagerly), one player node per distinct player touched
//! by an eligible transaction (created lazily), and one directed edge per
//! add/drop entry. Construction never fails; missing lookups degrade to
//! fallback labels.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use super::names::PlayerNames;
use super::types::{LeagueData, TransactionKind};

/// Node identity, tagged by kind-space: team ids derive from roster ids,
/// player ids from player ids. The two spaces can never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
	Team(u64),
	Player(String),
}

impl NodeId {
	pub fn kind(&self) -> NodeKind {
		match self {
			NodeId::Team(_) => NodeKind::Team,
			NodeId::Player(_) => NodeKind::Player,
		}
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Team(id) => write!(f, "team:{id}"),
			NodeId::Player(id) => write!(f, "player:{id}"),
		}
	}
}

/// Vertex kind: a roster/franchise or an individual player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	Team,
	Player,
}

/// A graph vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	pub id: NodeId,
	pub label: String,
}

impl Node {
	pub fn kind(&self) -> NodeKind {
		self.id.kind()
	}
}

/// Which side of a transaction an edge records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeDirection {
	/// Player acquired by a team; the edge runs player -> team.
	Add,
	/// Player released by a team; the edge runs team -> player.
	Drop,
}

/// Tooltip annotation shared by every edge spawned from one transaction:
/// `(player label, team label)` pairs for its adds and drops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TradeSummary {
	pub adds: Vec<(String, String)>,
	pub drops: Vec<(String, String)>,
}

/// A directed edge. Parallel edges between the same pair of nodes are kept
/// as distinct entities, never merged.
#[derive(Clone, Debug)]
pub struct Edge {
	pub source: NodeId,
	pub target: NodeId,
	pub kind: TransactionKind,
	pub direction: EdgeDirection,
	pub summary: Rc<TradeSummary>,
}

impl Edge {
	/// The endpoint opposite to `id`, if `id` is an endpoint.
	pub fn other_endpoint(&self, id: &NodeId) -> Option<&NodeId> {
		if self.source == *id {
			Some(&self.target)
		} else if self.target == *id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// The full (unfiltered) trade graph.
#[derive(Clone, Debug, Default)]
pub struct TradeGraph {
	/// Team nodes in roster order, then player nodes in first-reference order.
	pub nodes: Vec<Node>,
	/// Edges in transaction order; within one transaction, adds before drops.
	pub edges: Vec<Edge>,
}

impl TradeGraph {
	/// Build the graph from the league payload and name table.
	///
	/// Deterministic: identical input yields identical node and edge
	/// sequences. Malformed per-entry data (roster without a user, player
	/// without a name, add/drop referencing an unknown roster) substitutes
	/// fallback labels rather than failing.
	pub fn build(data: &LeagueData, names: &PlayerNames) -> Self {
		let mut team_labels: HashMap<u64, String> = HashMap::new();
		let mut nodes = Vec::new();
		let mut edges = Vec::new();

		for (index, roster) in data.rosters.iter().enumerate() {
			let label = roster
				.owner_id
				.as_ref()
				.and_then(|owner| data.users.iter().find(|u| &u.user_id == owner))
				.map(|u| u.display_name.clone())
				.unwrap_or_else(|| format!("Team {}", index + 1));
			team_labels.insert(roster.roster_id, label.clone());
			nodes.push(Node {
				id: NodeId::Team(roster.roster_id),
				label,
			});
		}

		let team_label = |team_id: u64| -> String {
			team_labels
				.get(&team_id)
				.cloned()
				.unwrap_or_else(|| format!("Team {team_id}"))
		};

		let mut player_seen: HashSet<String> = HashSet::new();
		for txn in data.transactions.iter().filter(|t| t.is_eligible()) {
			let summary = Rc::new(TradeSummary {
				adds: txn
					.adds()
					.map(|(player_id, &team_id)| (names.label(player_id), team_label(team_id)))
					.collect(),
				drops: txn
					.drops()
					.map(|(player_id, &team_id)| (names.label(player_id), team_label(team_id)))
					.collect(),
			});

			let entries = txn
				.adds()
				.map(|e| (e, EdgeDirection::Add))
				.chain(txn.drops().map(|e| (e, EdgeDirection::Drop)));

			for ((player_id, &team_id), direction) in entries {
				if player_seen.insert(player_id.clone()) {
					nodes.push(Node {
						id: NodeId::Player(player_id.clone()),
						label: names.label(player_id),
					});
				}

				let player = NodeId::Player(player_id.clone());
				let team = NodeId::Team(team_id);
				let (source, target) = match direction {
					EdgeDirection::Add => (player, team),
					EdgeDirection::Drop => (team, player),
				};
				edges.push(Edge {
					source,
					target,
					kind: txn.kind,
					direction,
					summary: Rc::clone(&summary),
				});
			}
		}

		Self { nodes, edges }
	}
}

#[cfg(test)]
pub(super) mod tests {
	use super::*;
	use crate::components::trades_network::types::{
		RosterRecord, TransactionRecord, TransactionStatus, UserRecord,
	};
	use std::collections::BTreeMap;

	pub fn roster(roster_id: u64, owner_id: &str) -> RosterRecord {
		RosterRecord {
			roster_id,
			owner_id: Some(owner_id.to_string()),
		}
	}

	pub fn user(user_id: &str, display_name: &str) -> UserRecord {
		UserRecord {
			user_id: user_id.to_string(),
			display_name: display_name.to_string(),
		}
	}

	pub fn transaction(
		kind: TransactionKind,
		adds: &[(&str, u64)],
		drops: &[(&str, u64)],
	) -> TransactionRecord {
		let to_map = |entries: &[(&str, u64)]| -> Option<BTreeMap<String, u64>> {
			Some(
				entries
					.iter()
					.map(|&(p, t)| (p.to_string(), t))
					.collect(),
			)
		};
		TransactionRecord {
			status: TransactionStatus::Complete,
			kind,
			consenter_ids: Some(vec![1]),
			adds: to_map(adds),
			drops: to_map(drops),
		}
	}

	/// Two teams, one completed trade moving P7 from T1 to T2.
	pub fn two_team_league() -> LeagueData {
		LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2")],
			users: vec![user("u1", "Alpha"), user("u2", "Beta")],
			transactions: vec![transaction(
				TransactionKind::Trade,
				&[("P7", 2)],
				&[("P7", 1)],
			)],
		}
	}

	/// A trade chain: T1 sends P7 to T2, T2 sends P8 to T3.
	pub fn three_team_league() -> LeagueData {
		LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2"), roster(3, "u3")],
			users: vec![user("u1", "A"), user("u2", "B"), user("u3", "C")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2)], &[("P7", 1)]),
				transaction(TransactionKind::Trade, &[("P8", 3)], &[("P8", 2)]),
			],
		}
	}

	#[test]
	fn builds_team_nodes_eagerly_and_player_nodes_lazily() {
		let graph = TradeGraph::build(&two_team_league(), &PlayerNames::default());

		let ids: Vec<&NodeId> = graph.nodes.iter().map(|n| &n.id).collect();
		assert_eq!(
			ids,
			vec![
				&NodeId::Team(1),
				&NodeId::Team(2),
				&NodeId::Player("P7".into())
			]
		);
		assert_eq!(graph.nodes[0].label, "Alpha");
		assert_eq!(graph.nodes[2].label, "Player P7");
	}

	#[test]
	fn edge_direction_convention_and_ordering() {
		let graph = TradeGraph::build(&two_team_league(), &PlayerNames::default());

		assert_eq!(graph.edges.len(), 2);
		// Add first: player -> acquiring team.
		assert_eq!(graph.edges[0].source, NodeId::Player("P7".into()));
		assert_eq!(graph.edges[0].target, NodeId::Team(2));
		assert_eq!(graph.edges[0].direction, EdgeDirection::Add);
		// Drop second: releasing team -> player.
		assert_eq!(graph.edges[1].source, NodeId::Team(1));
		assert_eq!(graph.edges[1].target, NodeId::Player("P7".into()));
		assert_eq!(graph.edges[1].direction, EdgeDirection::Drop);
	}

	#[test]
	fn trade_summary_shared_across_edges_of_one_transaction() {
		let graph = TradeGraph::build(&two_team_league(), &PlayerNames::default());
		assert!(Rc::ptr_eq(&graph.edges[0].summary, &graph.edges[1].summary));
		assert_eq!(
			graph.edges[0].summary.adds,
			vec![("Player P7".to_string(), "Beta".to_string())]
		);
		assert_eq!(
			graph.edges[0].summary.drops,
			vec![("Player P7".to_string(), "Alpha".to_string())]
		);
	}

	#[test]
	fn ineligible_transactions_contribute_nothing() {
		let mut data = two_team_league();
		data.transactions[0].status = TransactionStatus::Other;
		let graph = TradeGraph::build(&data, &PlayerNames::default());
		assert_eq!(graph.nodes.len(), 2);
		assert!(graph.edges.is_empty());

		let mut data = two_team_league();
		data.transactions[0].consenter_ids = Some(vec![]);
		let graph = TradeGraph::build(&data, &PlayerNames::default());
		assert!(graph.edges.is_empty());

		let mut data = two_team_league();
		data.transactions[0].kind = TransactionKind::Other;
		let graph = TradeGraph::build(&data, &PlayerNames::default());
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn roster_without_user_gets_positional_fallback() {
		let data = LeagueData {
			rosters: vec![
				RosterRecord {
					roster_id: 9,
					owner_id: None,
				},
				roster(4, "unknown-user"),
			],
			users: vec![],
			transactions: vec![],
		};
		let graph = TradeGraph::build(&data, &PlayerNames::default());
		assert_eq!(graph.nodes[0].label, "Team 1");
		assert_eq!(graph.nodes[1].label, "Team 2");
	}

	#[test]
	fn summary_falls_back_for_unknown_roster_id() {
		let data = LeagueData {
			rosters: vec![roster(1, "u1")],
			users: vec![user("u1", "Alpha")],
			transactions: vec![transaction(TransactionKind::Trade, &[("P1", 42)], &[])],
		};
		let graph = TradeGraph::build(&data, &PlayerNames::default());
		assert_eq!(
			graph.edges[0].summary.adds,
			vec![("Player P1".to_string(), "Team 42".to_string())]
		);
	}

	#[test]
	fn rebuild_is_deterministic() {
		let data = LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2")],
			users: vec![user("u1", "Alpha"), user("u2", "Beta")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2), ("P3", 1)], &[("P7", 1)]),
				transaction(TransactionKind::Waiver, &[("P9", 1)], &[]),
			],
		};
		let names: PlayerNames = [("P7".to_string(), "Seven".to_string())]
			.into_iter()
			.collect();

		let a = TradeGraph::build(&data, &names);
		let b = TradeGraph::build(&data, &names);
		assert_eq!(a.nodes, b.nodes);
		let endpoints = |g: &TradeGraph| -> Vec<(NodeId, NodeId)> {
			g.edges
				.iter()
				.map(|e| (e.source.clone(), e.target.clone()))
				.collect()
		};
		assert_eq!(endpoints(&a), endpoints(&b));
	}

	#[test]
	fn player_nodes_cover_exactly_the_referenced_players() {
		let data = LeagueData {
			rosters: vec![roster(1, "u1"), roster(2, "u2")],
			users: vec![user("u1", "Alpha"), user("u2", "Beta")],
			transactions: vec![
				transaction(TransactionKind::Trade, &[("P7", 2)], &[("P7", 1)]),
				transaction(TransactionKind::FreeAgent, &[("P2", 1)], &[]),
			],
		};
		let graph = TradeGraph::build(&data, &PlayerNames::default());
		let players: Vec<&NodeId> = graph
			.nodes
			.iter()
			.filter(|n| n.kind() == NodeKind::Player)
			.map(|n| &n.id)
			.collect();
		assert_eq!(
			players,
			vec![&NodeId::Player("P7".into()), &NodeId::Player("P2".into())]
		);
	}
}
