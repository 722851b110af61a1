//! Zoom-dependent scaling for the trades network visuals.
//!
//! Team and player nodes render at very different sizes, so every
//! zoom-dependent parameter (radii, hit radii, arrowheads, label font,
//! line width) is centralized here.
//!
//! World-space values scale with the canvas transform; screen-space values
//! divide by the zoom factor `k` to stay a constant pixel size; clamped
//! values scale but never shrink below a screen-size floor.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Team node radius in world units.
	pub team_radius: f64,
	/// Player node radius in world units.
	pub player_radius: f64,
	/// How node radii scale with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Extra hit-test slack beyond the rendered radius, in world units.
	pub hit_slack: f64,
	/// Team label font size in screen pixels.
	pub label_size: f64,
	/// Minimum zoom level for label font scaling.
	pub label_min_k: f64,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in screen pixels.
	pub line_width: f64,
	/// Hover hit distance from the edge chord, in world units.
	pub hit_distance: f64,
	/// Arrowhead size in world units.
	pub arrow_size: f64,
	/// How arrowhead size scales with zoom.
	pub arrow_behavior: ScaleBehavior,
	/// Zoom level below which arrowheads are culled entirely.
	pub arrow_min_k: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				team_radius: 25.0,
				player_radius: 6.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 3.0,
					max_screen: f64::INFINITY,
				},
				hit_slack: 4.0,
				label_size: 10.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig {
				line_width: 2.0,
				hit_distance: 6.0,
				arrow_size: 6.0,
				arrow_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 18.0,
				},
				arrow_min_k: 0.25,
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level. Created once per
/// frame; all sizes are world-space, ready to use after the canvas
/// transform.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	pub team_radius: f64,
	pub player_radius: f64,
	pub team_hit_radius: f64,
	pub player_hit_radius: f64,
	/// Label font string (e.g. "10px sans-serif").
	pub label_font: String,
	pub edge_line_width: f64,
	pub edge_hit_distance: f64,
	pub arrow_size: f64,
	/// Whether to skip drawing arrowheads at this zoom level.
	pub cull_arrows: bool,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let team_radius = config.node.radius_behavior.apply(config.node.team_radius, k);
		let player_radius = config
			.node
			.radius_behavior
			.apply(config.node.player_radius, k);
		let label_font_size = config.node.label_size / k.max(config.node.label_min_k);

		Self {
			k,
			team_radius,
			player_radius,
			team_hit_radius: team_radius + config.node.hit_slack,
			player_hit_radius: player_radius + config.node.hit_slack,
			label_font: format!("{label_font_size}px sans-serif"),
			edge_line_width: config.edge.line_width / k,
			edge_hit_distance: config.edge.hit_distance / k.min(1.0),
			arrow_size: config.edge.arrow_behavior.apply(config.edge.arrow_size, k),
			cull_arrows: k < config.edge.arrow_min_k,
		}
	}

	/// Rendered radius for a node of the given kind.
	pub fn radius_for(&self, team: bool) -> f64 {
		if team { self.team_radius } else { self.player_radius }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn screen_behavior_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		assert_eq!(ScaleBehavior::World.apply(10.0, 2.0), 10.0);
	}

	#[test]
	fn clamped_behavior_enforces_screen_floor() {
		let b = ScaleBehavior::Clamped {
			min_screen: 3.0,
			max_screen: f64::INFINITY,
		};
		// At 10% zoom a 6-unit player node would cover 0.6px; the floor
		// holds it at 3px on screen (30 world units).
		assert_eq!(b.apply(6.0, 0.1), 30.0);
		assert_eq!(b.apply(6.0, 1.0), 6.0);
	}

	#[test]
	fn team_and_player_radii_stay_distinct() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert!(scale.team_radius > scale.player_radius);
		assert!(scale.team_hit_radius > scale.team_radius);
		assert!(!scale.cull_arrows);

		let zoomed_out = ScaledValues::new(&ScaleConfig::default(), 0.1);
		assert!(zoomed_out.cull_arrows);
	}
}
