//! trades-graph: Interactive visualization of a fantasy league's trade network.
//!
//! This crate provides a WASM-based component that renders a league's trade
//! history as a force-directed node-link graph: teams and players are nodes,
//! roster adds/drops are directed edges. Hovering a team lights up its trade
//! partners; filters narrow the view by transaction kind and connectivity.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::trades_network::{
	FilterOptions, KindSelection, LeagueData, NodeId, NodeKind, PlayerNames, TradeGraph,
	TradesNetwork,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("trades-graph: logging initialized");
}

fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the league payload from a script element with id="league-data".
/// Expected format: JSON with { rosters: [...], users: [...], transactions: [...] }
fn load_league_data() -> Option<LeagueData> {
	let json_text = script_text("league-data")?;

	match serde_json::from_str::<LeagueData>(&json_text) {
		Ok(data) => {
			info!(
				"trades-graph: loaded {} rosters, {} users, {} transactions",
				data.rosters.len(),
				data.users.len(),
				data.transactions.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("trades-graph: failed to parse league data: {}", e);
			None
		}
	}
}

/// Load the player-name table from a script element with id="player-names".
/// A missing table is fine; players then render with fallback labels.
fn load_player_names() -> PlayerNames {
	match script_text("player-names") {
		Some(json) => PlayerNames::from_json(&json),
		None => PlayerNames::default(),
	}
}

/// Main application component.
///
/// Loads the league payload and player names from the DOM and renders the
/// trade network. Until a valid payload is present nothing is mounted; the
/// visualization never runs on partial input.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let league_data = load_league_data();
	let names = load_player_names();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="League Trades Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{match league_data {
			Some(data) => {
				let data_signal = Signal::derive(move || data.clone());
				view! {
					<div class="fullscreen-graph">
						<TradesNetwork data=data_signal names=names fullscreen=true />
						<div class="graph-overlay">
							<h1>"League Trades"</h1>
							<p class="subtitle">
								"Hover a team to trace its trades. Drag nodes to reposition. Scroll to zoom."
							</p>
						</div>
					</div>
				}
					.into_any()
			}
			None => {
				view! {
					<div class="fullscreen-graph">
						<p class="subtitle">"Waiting for league data."</p>
					</div>
				}
					.into_any()
			}
		}}
	}
}
