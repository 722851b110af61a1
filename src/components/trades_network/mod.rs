//! Interactive trade-network visualization component.
//!
//! Turns a league's roster/user/transaction records into a typed node-link
//! graph and renders it on an HTML canvas with:
//! - Physics-based layout (link springs, charge repulsion, centering,
//!   per-kind collision radii)
//! - Transaction-kind and degree filtering driven by the control panel
//! - Hover highlighting of the traded subgraph, with tooltips
//! - Pan, zoom, and drag-to-pin interactions
//!
//! # Example
//!
//! ```ignore
//! use trades_graph::{LeagueData, PlayerNames, TradesNetwork};
//!
//! let data: LeagueData = serde_json::from_str(payload)?;
//! let names = PlayerNames::from_json(names_json);
//!
//! view! { <TradesNetwork data=data.into() names=names fullscreen=true /> }
//! ```

mod component;
pub mod filter;
pub mod graph;
pub mod highlight;
mod names;
mod render;
pub mod scale;
pub mod simulation;
mod state;
pub mod theme;
mod types;

pub use component::TradesNetwork;
pub use filter::{FilterOptions, KindSelection, ViewGraph};
pub use graph::{NodeId, NodeKind, TradeGraph};
pub use names::PlayerNames;
pub use theme::Theme;
pub use types::{LeagueData, RosterRecord, TransactionKind, TransactionRecord, UserRecord};
