//! Force-directed layout simulation.
//!
//! A velocity-integrated n-body simulation over the view graph. Kinematic
//! state (position, velocity, pin) lives in its own arena indexed parallel to
//! the view's node list, never on the shared graph records, so a discarded
//! view takes its in-flight simulation with it.
//!
//! Each [`Simulation::step`] applies, in order: link springs toward a rest
//! distance, pairwise charge repulsion, centroid centering, and pairwise
//! collision resolution, then integrates velocities. The step function is
//! host-agnostic: the component calls it once per animation frame, tests call
//! it in a loop and assert on the result.

use std::f64::consts::PI;

use super::filter::ViewGraph;
use super::graph::NodeKind;

/// Cooling floor: the simulation parks once `alpha` decays below this while
/// no elevated target holds it awake.
const ALPHA_MIN: f64 = 0.001;
/// Velocity retained per tick after forces apply.
const VELOCITY_DECAY: f64 = 0.6;
/// Squared minimum separation used to clamp charge repulsion.
const DISTANCE_MIN2: f64 = 1.0;
/// Stand-in separation for exactly coincident nodes.
const EPSILON: f64 = 1e-6;

/// Force strengths and geometry. Defaults mirror the layout this replaces.
#[derive(Clone, Copy, Debug)]
pub struct ForceConfig {
	/// Rest length of every link spring.
	pub link_distance: f64,
	/// Pairwise repulsion strength; negative repels.
	pub charge_strength: f64,
	/// Fraction of the centroid offset removed per tick.
	pub center_strength: f64,
	/// Fraction of pairwise overlap resolved per tick.
	pub collide_strength: f64,
	/// Exclusion radius around team nodes.
	pub team_radius: f64,
	/// Exclusion radius around player nodes.
	pub player_radius: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			link_distance: 100.0,
			charge_strength: -300.0,
			center_strength: 1.0,
			collide_strength: 0.7,
			team_radius: 30.0,
			player_radius: 10.0,
		}
	}
}

/// Per-node kinematic state, owned by the simulation for one view's lifetime.
#[derive(Clone, Debug)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned position while a drag holds the node; `None` when free.
	pub pinned: Option<(f64, f64)>,
	collide_radius: f64,
}

impl SimNode {
	pub fn is_pinned(&self) -> bool {
		self.pinned.is_some()
	}
}

#[derive(Clone, Debug)]
struct Link {
	source: usize,
	target: usize,
	/// Share of the spring correction borne by the source endpoint.
	bias: f64,
	/// Spring strength, softened for high-degree endpoints.
	strength: f64,
}

/// The running layout simulation for one view graph.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<Link>,
	alpha: f64,
	alpha_target: f64,
	alpha_decay: f64,
	center: (f64, f64),
	config: ForceConfig,
}

impl Simulation {
	/// Seed a fresh simulation for `view`, nodes placed on a circle around
	/// the canvas center. Deterministic for a given view and canvas size.
	pub fn new(view: &ViewGraph, width: f64, height: f64, config: ForceConfig) -> Self {
		let center = (width / 2.0, height / 2.0);
		let count = view.nodes.len().max(1);
		let nodes = view
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = (i as f64) * 2.0 * PI / count as f64;
				SimNode {
					x: center.0 + 100.0 * angle.cos(),
					y: center.1 + 100.0 * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					pinned: None,
					collide_radius: match node.kind() {
						NodeKind::Team => config.team_radius,
						NodeKind::Player => config.player_radius,
					},
				}
			})
			.collect();

		let endpoints = view.edge_endpoints();
		let mut degrees = vec![0usize; view.nodes.len()];
		for &(s, t) in &endpoints {
			degrees[s] += 1;
			degrees[t] += 1;
		}
		let links = endpoints
			.iter()
			.map(|&(source, target)| Link {
				source,
				target,
				bias: degrees[source] as f64 / (degrees[source] + degrees[target]) as f64,
				strength: 1.0 / degrees[source].min(degrees[target]).max(1) as f64,
			})
			.collect();

		Self {
			nodes,
			links,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			center,
			config,
		}
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Kinetic target the cooling schedule decays toward. A value at or
	/// above the cooling floor keeps the simulation awake indefinitely;
	/// drags raise it and release restores it to zero.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Fix a node at the given position, excluding it from force-driven
	/// movement until unpinned.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.pinned = Some((x, y));
			node.x = x;
			node.y = y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	/// Return a pinned node to free simulation.
	pub fn unpin(&mut self, index: usize) {
		if let Some(node) = self.nodes.get_mut(index) {
			node.pinned = None;
		}
	}

	/// Re-center the layout, e.g. after a canvas resize.
	pub fn set_center(&mut self, width: f64, height: f64) {
		self.center = (width / 2.0, height / 2.0);
	}

	/// Advance one tick. Returns `false` without touching any state once the
	/// simulation has settled (alpha below the floor, no elevated target).
	pub fn step(&mut self) -> bool {
		if self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.apply_collide();

		for node in &mut self.nodes {
			match node.pinned {
				Some((x, y)) => {
					node.x = x;
					node.y = y;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				None => {
					node.vx *= VELOCITY_DECAY;
					node.vy *= VELOCITY_DECAY;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}
		true
	}

	/// Spring force per link toward the rest distance. Parallel edges each
	/// contribute a full spring, pulling multiply-traded pairs tighter.
	fn apply_links(&mut self) {
		for link in &self.links {
			let (s, t) = (link.source, link.target);
			let mut dx =
				(self.nodes[t].x + self.nodes[t].vx) - (self.nodes[s].x + self.nodes[s].vx);
			let mut dy =
				(self.nodes[t].y + self.nodes[t].vy) - (self.nodes[s].y + self.nodes[s].vy);
			if dx == 0.0 && dy == 0.0 {
				dx = EPSILON;
				dy = EPSILON;
			}
			let len = (dx * dx + dy * dy).sqrt();
			let l = (len - self.config.link_distance) / len * self.alpha * link.strength;
			let (fx, fy) = (dx * l, dy * l);
			self.nodes[t].vx -= fx * link.bias;
			self.nodes[t].vy -= fy * link.bias;
			self.nodes[s].vx += fx * (1.0 - link.bias);
			self.nodes[s].vy += fy * (1.0 - link.bias);
		}
	}

	/// Exact pairwise repulsion with inverse-square falloff. League-season
	/// graphs are a few hundred nodes, well inside O(n^2) territory.
	fn apply_charge(&mut self) {
		let w = self.config.charge_strength * self.alpha;
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = EPSILON;
					dy = EPSILON;
				}
				let mut l2 = dx * dx + dy * dy;
				if l2 < DISTANCE_MIN2 {
					l2 = (DISTANCE_MIN2 * l2).sqrt();
				}
				let f = w / l2;
				self.nodes[i].vx += dx * f;
				self.nodes[i].vy += dy * f;
				self.nodes[j].vx -= dx * f;
				self.nodes[j].vy -= dy * f;
			}
		}
	}

	/// Translate the system so its centroid approaches the canvas center.
	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let count = self.nodes.len() as f64;
		let sx = self.nodes.iter().map(|n| n.x).sum::<f64>() / count;
		let sy = self.nodes.iter().map(|n| n.y).sum::<f64>() / count;
		let dx = (sx - self.center.0) * self.config.center_strength;
		let dy = (sy - self.center.1) * self.config.center_strength;
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}

	/// Resolve pairwise overlap of exclusion radii; team nodes reserve a
	/// larger radius than player nodes.
	fn apply_collide(&mut self) {
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let r = self.nodes[i].collide_radius + self.nodes[j].collide_radius;
				let mut dx = (self.nodes[i].x + self.nodes[i].vx)
					- (self.nodes[j].x + self.nodes[j].vx);
				let mut dy = (self.nodes[i].y + self.nodes[i].vy)
					- (self.nodes[j].y + self.nodes[j].vy);
				let mut l2 = dx * dx + dy * dy;
				if l2 >= r * r {
					continue;
				}
				if l2 == 0.0 {
					dx = EPSILON;
					dy = EPSILON;
					l2 = dx * dx + dy * dy;
				}
				let len = l2.sqrt();
				let l = (r - len) / len * self.config.collide_strength;
				let (fx, fy) = (dx * l, dy * l);
				let ri = self.nodes[i].collide_radius;
				let rj = self.nodes[j].collide_radius;
				let share = (rj * rj) / (ri * ri + rj * rj);
				self.nodes[i].vx += fx * share;
				self.nodes[i].vy += fy * share;
				self.nodes[j].vx -= fx * (1.0 - share);
				self.nodes[j].vy -= fy * (1.0 - share);
			}
		}
	}
}
