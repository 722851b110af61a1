//! Leptos component wrapping the trades network canvas.
//!
//! The component renders the filter controls, an HTML canvas, and a
//! pointer-following tooltip. Mouse handlers drive node dragging, hover
//! highlighting, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, advancing the physics simulation and redrawing
//! each frame. Changing the league data or the filter options rebuilds the
//! whole pipeline (graph, view, simulation), abandoning any drag in flight.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::filter::FilterOptions;
use super::graph::TradeGraph;
use super::highlight::TooltipContent;
use super::names::PlayerNames;
use super::render;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{MAX_ZOOM, MIN_ZOOM, TradesNetworkState};
use super::theme::Theme;
use super::types::LeagueData;

/// Offset of the tooltip from the pointer, in pixels.
const TOOLTIP_OFFSET: (f64, f64) = (10.0, -10.0);

/// Bundles interaction state with visual configuration.
struct GraphContext {
	state: TradesNetworkState,
	scale: ScaleConfig,
	theme: Theme,
}

/// Renders the interactive trade network on a canvas element.
///
/// Pass the league payload via the reactive `data` signal and the static
/// player-name table via `names`. The component sizes itself to its parent
/// container by default; set `fullscreen = true` to fill the viewport and
/// resize with the window. Explicit `width`/`height` override automatic
/// sizing.
#[component]
pub fn TradesNetwork(
	#[prop(into)] data: Signal<LeagueData>,
	#[prop(optional)] names: PlayerNames,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let options = RwSignal::new(FilterOptions::default());
	let tooltip = RwSignal::new(None::<(TooltipContent, f64, f64)>);

	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		// Read both up front so data and filter changes both re-run this.
		let league = data.get();
		let opts = options.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let graph = TradeGraph::build(&league, &names);

		// Later runs replace the pipeline but keep the canvas, transform,
		// and animation loop. An in-progress drag dies with the old state.
		if let Some(ref mut c) = *context_init.borrow_mut() {
			let (w, h) = (c.state.width, c.state.height);
			let transform = c.state.transform.clone();
			c.state = TradesNetworkState::new(&graph, &opts, w, h);
			c.state.transform = transform;
			return;
		}

		let window: Window = web_sys::window().unwrap();
		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(GraphContext {
			state: TradesNetworkState::new(&graph, &opts, w, h),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick();
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			let scale = ScaledValues::new(&c.scale, c.state.transform.k);
			if let Some(index) = c.state.node_at_position(x, y, &scale) {
				c.state.begin_drag(index, x, y);
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.transform.x;
				c.state.pan.transform_start_y = c.state.transform.y;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				c.state.drag_to(x, y);
				return;
			}
			if c.state.pan.active {
				c.state.transform.x = c.state.pan.transform_start_x + (x - c.state.pan.start_x);
				c.state.transform.y = c.state.pan.transform_start_y + (y - c.state.pan.start_y);
				return;
			}

			// Hover: nodes take precedence; a bare edge hit only raises the
			// tooltip without dimming the graph.
			let scale = ScaledValues::new(&c.scale, c.state.transform.k);
			let node_hit = c.state.node_at_position(x, y, &scale);
			c.state.set_hover(node_hit);
			let content = node_hit
				.and_then(|i| c.state.tooltip_for_node(i))
				.or_else(|| {
					c.state
						.edge_at_position(x, y, &scale)
						.and_then(|i| c.state.tooltip_for_edge(i))
				});
			tooltip.set(content.map(|t| (t, x + TOOLTIP_OFFSET.0, y + TOOLTIP_OFFSET.1)));
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.end_drag();
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.end_drag();
			c.state.pan.active = false;
			c.state.set_hover(None);
		}
		tooltip.set(None);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (c.state.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
			let ratio = new_k / c.state.transform.k;
			c.state.transform.x = x - (x - c.state.transform.x) * ratio;
			c.state.transform.y = y - (y - c.state.transform.y) * ratio;
			c.state.transform.k = new_k;
		}
	};

	view! {
		<div class="trades-network-container" style="position: relative;">
			<div class="controls">
				<button
					class="filter-button"
					class:active=move || options.get().degree_filter
					on:click=move |_| options.update(|o| o.degree_filter = !o.degree_filter)
				>
					{move || {
						if options.get().degree_filter {
							"Show All Nodes"
						} else {
							"Hide Single-Link Nodes"
						}
					}}
				</button>
				<div class="trade-type-selector">
					<label>
						<input
							type="checkbox"
							prop:checked=move || options.get().kinds.trade
							on:change=move |_| options.update(|o| o.kinds.trade = !o.kinds.trade)
						/>
						"Trade"
					</label>
					<label>
						<input
							type="checkbox"
							prop:checked=move || options.get().kinds.waiver
							on:change=move |_| options.update(|o| o.kinds.waiver = !o.kinds.waiver)
						/>
						"Waiver"
					</label>
					<label>
						<input
							type="checkbox"
							prop:checked=move || options.get().kinds.free_agent
							on:change=move |_| {
								options.update(|o| o.kinds.free_agent = !o.kinds.free_agent)
							}
						/>
						"Free Agent"
					</label>
				</div>
			</div>
			<canvas
				node_ref=canvas_ref
				class="trades-network-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{move || {
				tooltip
					.get()
					.map(|(content, x, y)| {
						view! {
							<div
								class="graph-tooltip"
								style=format!(
									"position: absolute; left: {x}px; top: {y}px; padding: 8px; \
									background-color: rgba(0,0,0,0.7); border-radius: 4px; \
									color: #fff; font-size: 12px; pointer-events: none;",
								)
							>
								<strong>{content.caption()}</strong>
								" "
								{content.body()}
							</div>
						}
					})
			}}
		</div>
	}
}
