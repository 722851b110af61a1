//! Canvas rendering for the trades network.
//!
//! Redraws the whole scene every simulation tick: background, then edges
//! (colored by transaction kind, with arrowheads and multi-edge curvature),
//! then nodes (teams as large labelled discs, players as small dots).
//! Hover dimming applies per element via the state's opacity projection.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::filter::EdgeCurve;
use super::graph::NodeKind;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::TradesNetworkState;
use super::theme::Theme;

/// Renders the complete scene to the canvas.
pub fn render(
	state: &TradesNetworkState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &scale, theme);
	draw_nodes(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_background(state: &TradesNetworkState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				(state.width.max(state.height)) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(
	state: &TradesNetworkState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let nodes = state.simulation.nodes();
	for (index, &(s, t)) in state.view.edge_endpoints().iter().enumerate() {
		let edge = &state.view.edges[index];
		let (x1, y1) = (nodes[s].x, nodes[s].y);
		let (x2, y2) = (nodes[t].x, nodes[t].y);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		let source_radius = scale.radius_for(state.view.nodes[s].kind() == NodeKind::Team);
		let target_radius = scale.radius_for(state.view.nodes[t].kind() == NodeKind::Team);
		// Trim the line at the node rims, leaving room for the arrowhead.
		let (start_x, start_y) = (x1 + ux * source_radius, y1 + uy * source_radius);
		let trim = target_radius + if scale.cull_arrows { 0.0 } else { scale.arrow_size };
		let (end_x, end_y) = (x2 - ux * trim, y2 - uy * trim);

		let opacity = state.edge_opacity(index);
		let color = theme.edge_color(edge.kind);
		ctx.set_global_alpha(opacity);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(scale.edge_line_width);

		ctx.begin_path();
		ctx.move_to(start_x, start_y);
		match state.view.curves[index] {
			EdgeCurve::Straight => ctx.line_to(end_x, end_y),
			EdgeCurve::Arc { clockwise } => {
				// Parallel edges bow to opposite sides of the chord.
				let bend = dist * 0.25 * if clockwise { 1.0 } else { -1.0 };
				let (mid_x, mid_y) = (
					(start_x + end_x) / 2.0 - uy * bend,
					(start_y + end_y) / 2.0 + ux * bend,
				);
				let _ = ctx.quadratic_curve_to(mid_x, mid_y, end_x, end_y);
			}
		}
		ctx.stroke();

		if !scale.cull_arrows {
			draw_arrowhead(ctx, end_x, end_y, ux, uy, scale.arrow_size, &color.to_css());
		}
	}
	ctx.set_global_alpha(1.0);
}

/// Filled triangle pointing along the edge direction.
fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	x: f64,
	y: f64,
	ux: f64,
	uy: f64,
	size: f64,
	css_color: &str,
) {
	let (tip_x, tip_y) = (x + ux * size, y + uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.set_fill_style_str(css_color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(x + px, y + py);
	ctx.line_to(x - px, y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &TradesNetworkState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let sim_nodes = state.simulation.nodes();
	let mut team_ordinal = 0;
	for (index, node) in state.view.nodes.iter().enumerate() {
		let (x, y) = (sim_nodes[index].x, sim_nodes[index].y);
		let opacity = state.node_opacity(&node.id);
		let is_team = node.kind() == NodeKind::Team;
		let radius = scale.radius_for(is_team);
		let color = if is_team {
			let c = theme.team_color(team_ordinal);
			team_ordinal += 1;
			c
		} else {
			theme.node.player_color
		};

		ctx.set_global_alpha(opacity);

		if theme.node.use_gradient {
			let gradient = ctx
				.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.unwrap();
			gradient
				.add_color_stop(0.0, &color.lighten(0.4).to_css())
				.unwrap();
			gradient.add_color_stop(0.7, &color.to_css()).unwrap();
			gradient
				.add_color_stop(1.0, &color.darken(0.2).to_css())
				.unwrap();

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		} else {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&color.to_css());
			ctx.fill();
		}

		// Only team nodes carry a visible label, centered in the disc.
		if is_team {
			ctx.set_fill_style_str(&theme.node.label_color.with_alpha(opacity).to_css());
			ctx.set_font(&scale.label_font);
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&node.label, x, y);
		}
	}
	ctx.set_global_alpha(1.0);
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
}
