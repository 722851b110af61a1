//! Wire types for the league payload consumed by the trades network.
//!
//! The data-acquisition layer hands us three already-materialized record
//! sequences (rosters, users, transactions) as JSON. Decoding is tolerant:
//! unknown transaction kinds and statuses collapse into catch-all variants
//! so one odd record never sinks the whole payload.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A league roster (franchise) entry.
#[derive(Clone, Debug, Deserialize)]
pub struct RosterRecord {
	/// Roster slot identifier, referenced by transaction `adds`/`drops`.
	pub roster_id: u64,
	/// Owning user id; `None` for orphaned rosters.
	pub owner_id: Option<String>,
}

/// A league member.
#[derive(Clone, Debug, Deserialize)]
pub struct UserRecord {
	pub user_id: String,
	pub display_name: String,
}

/// Lifecycle status of a transaction. Only completed transactions enter the
/// graph; everything else (pending, failed, vetoed, ...) is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
	Complete,
	/// Any status other than `complete`.
	#[serde(other)]
	Other,
}

/// Categorical tag on a roster move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
	Trade,
	Waiver,
	FreeAgent,
	/// Kinds the visualization does not model (e.g. commissioner moves).
	/// Never eligible and never selectable.
	#[serde(other)]
	Other,
}

/// One roster-move event: players added to and dropped from rosters.
///
/// `adds` and `drops` map player id to the roster id gaining or losing the
/// player. `BTreeMap` pins a deterministic traversal order, which the graph
/// builder relies on for stable edge ordering.
#[derive(Clone, Debug, Deserialize)]
pub struct TransactionRecord {
	pub status: TransactionStatus,
	#[serde(rename = "type")]
	pub kind: TransactionKind,
	/// Roster ids that consented to the move; absent or empty marks a
	/// malformed record.
	pub consenter_ids: Option<Vec<u64>>,
	#[serde(default)]
	pub adds: Option<BTreeMap<String, u64>>,
	#[serde(default)]
	pub drops: Option<BTreeMap<String, u64>>,
}

impl TransactionRecord {
	/// Whether this record may contribute nodes and edges to the graph:
	/// a well-formed consenter list, completed, and of a known kind.
	pub fn is_eligible(&self) -> bool {
		self.consenter_ids
			.as_ref()
			.is_some_and(|ids| !ids.is_empty())
			&& self.status == TransactionStatus::Complete
			&& self.kind != TransactionKind::Other
	}

	/// The add mapping, with a missing/null field reading as empty.
	pub fn adds(&self) -> impl Iterator<Item = (&String, &u64)> {
		self.adds.iter().flatten()
	}

	/// The drop mapping, with a missing/null field reading as empty.
	pub fn drops(&self) -> impl Iterator<Item = (&String, &u64)> {
		self.drops.iter().flatten()
	}
}

/// Complete league payload: rosters, users, and the season's transactions.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LeagueData {
	pub rosters: Vec<RosterRecord>,
	pub users: Vec<UserRecord>,
	/// Accepts the legacy payload field name `trades`.
	#[serde(alias = "trades")]
	pub transactions: Vec<TransactionRecord>,
}
