//! Static player-name lookup.
//!
//! Player ids on the wire are opaque; display names come from a static table
//! generated offline from the league platform's player dump. An unresolved id
//! degrades to a synthesized `"Player <id>"` label.

use std::collections::HashMap;

use log::warn;
use serde::Deserialize;

/// Mapping from opaque player id to display name.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlayerNames(HashMap<String, String>);

impl PlayerNames {
	/// Parse the lookup table from its JSON form (`{"4034": "C. McCaffrey"}`).
	/// A malformed table degrades to an empty one; every player then renders
	/// with the fallback label.
	pub fn from_json(json: &str) -> Self {
		match serde_json::from_str(json) {
			Ok(names) => names,
			Err(e) => {
				warn!("trades-graph: failed to parse player names: {e}");
				Self::default()
			}
		}
	}

	pub fn resolve(&self, player_id: &str) -> Option<&str> {
		self.0.get(player_id).map(String::as_str)
	}

	/// Resolved name, or the `"Player <id>"` fallback.
	pub fn label(&self, player_id: &str) -> String {
		self.resolve(player_id)
			.map(str::to_owned)
			.unwrap_or_else(|| format!("Player {player_id}"))
	}
}

impl FromIterator<(String, String)> for PlayerNames {
	fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}
