//! Visual theming for the trades network.
//!
//! Edge color encodes the transaction kind (the same encoding the legend
//! checkboxes use); team nodes draw from a 10-color categorical palette
//! keyed by roster ordinal, players share one color.

use super::types::TransactionKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Background styling.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	pub color_secondary: Color,
	pub use_gradient: bool,
}

/// Node styling: the team palette and the shared player color.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Categorical palette assigned to teams by roster ordinal.
	pub team_palette: Vec<Color>,
	pub player_color: Color,
	pub use_gradient: bool,
	pub label_color: Color,
}

/// Edge styling: one color per transaction kind.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub trade: Color,
	pub waiver: Color,
	pub free_agent: Color,
	/// Kinds outside the model, should they ever be drawn.
	pub fallback: Color,
}

/// Complete theme for the trades network canvas.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
}

impl Theme {
	/// Color for a team node by its roster ordinal.
	pub fn team_color(&self, ordinal: usize) -> Color {
		self.node.team_palette[ordinal % self.node.team_palette.len()]
	}

	/// Color for an edge of the given transaction kind.
	pub fn edge_color(&self, kind: TransactionKind) -> Color {
		match kind {
			TransactionKind::Trade => self.edge.trade,
			TransactionKind::Waiver => self.edge.waiver,
			TransactionKind::FreeAgent => self.edge.free_agent,
			TransactionKind::Other => self.edge.fallback,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(13, 17, 23),
				color_secondary: Color::rgb(22, 27, 34),
				use_gradient: true,
			},
			node: NodeStyle {
				// The classic 10-color categorical scheme.
				team_palette: vec![
					Color::rgb(0x1f, 0x77, 0xb4),
					Color::rgb(0xff, 0x7f, 0x0e),
					Color::rgb(0x2c, 0xa0, 0x2c),
					Color::rgb(0xd6, 0x27, 0x28),
					Color::rgb(0x94, 0x67, 0xbd),
					Color::rgb(0x8c, 0x56, 0x4b),
					Color::rgb(0xe3, 0x77, 0xc2),
					Color::rgb(0x7f, 0x7f, 0x7f),
					Color::rgb(0xbc, 0xbd, 0x22),
					Color::rgb(0x17, 0xbe, 0xcf),
				],
				player_color: Color::rgb(0xad, 0xd8, 0xe6), // lightblue
				use_gradient: true,
				label_color: Color::rgb(255, 255, 255),
			},
			edge: EdgeStyle {
				trade: Color::rgb(0x00, 0x00, 0xff),
				waiver: Color::rgb(0xff, 0xa5, 0x00),
				free_agent: Color::rgb(0x00, 0xff, 0x00),
				fallback: Color::rgb(0xaa, 0xaa, 0xaa),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_colors_follow_transaction_kind() {
		let theme = Theme::default();
		assert_eq!(theme.edge_color(TransactionKind::Trade).to_css(), "#0000ff");
		assert_eq!(theme.edge_color(TransactionKind::Waiver).to_css(), "#ffa500");
		assert_eq!(
			theme.edge_color(TransactionKind::FreeAgent).to_css(),
			"#00ff00"
		);
	}

	#[test]
	fn team_palette_wraps_by_ordinal() {
		let theme = Theme::default();
		let first = theme.team_color(0).to_css();
		assert_eq!(theme.team_color(10).to_css(), first);
	}

	#[test]
	fn css_formatting_switches_on_alpha() {
		assert_eq!(Color::rgb(255, 0, 0).to_css(), "#ff0000");
		assert_eq!(
			Color::rgba(255, 0, 0, 0.5).to_css(),
			"rgba(255, 0, 0, 0.5)"
		);
	}
}
