use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::rc::Rc;

use crate::components::scale::{OrdinalScale, SqrtScale};
use crate::components::simulation::{Axis, Body, Bounded, Center, Link, ManyBody, Simulation};
use crate::config::Viewport;
use crate::data::{GraphError, NetworkGraph, TopicId};

const COLORS: &[&str] = &["#ffbc35", "#4690ff", "#ff805b", "#ffeac0", "#ffbc35"];

pub const MIN_RADIUS: f64 = 4.0;
pub const MAX_RADIUS: f64 = 20.0;
const LINK_DISTANCE: f64 = 80.0;
const CHARGE: f64 = -150.0;
/// Soft margin on every edge, as a fraction of the viewport.
const MARGIN: f64 = 0.125;
const BOUND_STRENGTH: f64 = 0.1;
const DRAG_ALPHA_TARGET: f64 = 0.3;
const HIT_SLOP: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub radius: f64,
	pub color: &'static str,
	/// No link touches this node.
	pub unconnected: bool,
}

/// A link with both endpoints resolved to node indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLink {
	pub source: usize,
	pub target: usize,
	pub value: f64,
}

impl ResolvedLink {
	pub fn stroke_width(&self) -> f64 {
		self.value.sqrt()
	}
}

/// Map each link's node ids to indices into `graph.nodes`.
pub fn resolve_links(graph: &NetworkGraph) -> Result<Vec<ResolvedLink>, GraphError> {
	let index: HashMap<&str, usize> = graph
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();
	graph
		.links
		.iter()
		.map(|link| {
			let lookup = |id: &str| {
				index.get(id).copied().ok_or_else(|| GraphError::UnknownEndpoint {
					source_id: link.source.clone(),
					target_id: link.target.clone(),
					missing: id.to_owned(),
				})
			};
			Ok(ResolvedLink {
				source: lookup(&link.source)?,
				target: lookup(&link.target)?,
				value: link.value,
			})
		})
		.collect()
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<usize>,
}

pub struct NetworkState {
	pub topic: TopicId,
	pub nodes: Vec<SceneNode>,
	pub links: Vec<ResolvedLink>,
	pub simulation: Simulation,
	pub drag: DragState,
	pub viewport: Viewport,
	dirty: Rc<Cell<bool>>,
}

impl NetworkState {
	/// Build the scene for `topic`. `Ok(None)` when no graph belongs to it.
	pub fn build(
		networks: &[NetworkGraph],
		topic: TopicId,
		viewport: Viewport,
		random: &mut impl FnMut() -> f64,
	) -> Result<Option<Self>, GraphError> {
		let Some(graph) = networks.iter().find(|n| n.topic == topic) else {
			return Ok(None);
		};
		let links = resolve_links(graph)?;

		let connected: HashSet<usize> = links.iter().flat_map(|l| [l.source, l.target]).collect();
		let radius = SqrtScale::from_extent(
			graph.nodes.iter().map(|n| n.size),
			(MIN_RADIUS, MAX_RADIUS),
		);
		let colors = OrdinalScale::new(graph.nodes.iter().map(|n| &n.group), COLORS);
		let nodes: Vec<SceneNode> = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| SceneNode {
				id: n.id.clone(),
				radius: radius.apply(n.size),
				color: colors.color(&n.group),
				unconnected: !connected.contains(&i),
			})
			.collect();

		let (cx, cy) = viewport.center();
		let rotation = random() * 2.0 * PI;
		let bodies = (0..nodes.len())
			.map(|i| {
				let (x, y) = phyllotaxis(i, rotation);
				Body::at(cx + x, cy + y)
			})
			.collect();

		let (mx, my) = (viewport.width * MARGIN, viewport.height * MARGIN);
		let springs = links.iter().map(|l| (l.source, l.target)).collect();
		let mut simulation = Simulation::new(bodies)
			.with_force("link", Link::new(springs, nodes.len(), LINK_DISTANCE))
			.with_force("charge", ManyBody::new(CHARGE))
			.with_force("center", Center::new(cx, cy))
			.with_force(
				"bounded-x",
				Bounded::new(Axis::X, mx, viewport.width - mx, BOUND_STRENGTH),
			)
			.with_force(
				"bounded-y",
				Bounded::new(Axis::Y, my, viewport.height - my, BOUND_STRENGTH),
			);

		let dirty = Rc::new(Cell::new(true));
		let on_step = dirty.clone();
		simulation.on_step(Box::new(move |_| on_step.set(true)));

		Ok(Some(Self {
			topic,
			nodes,
			links,
			simulation,
			drag: DragState::default(),
			viewport,
			dirty,
		}))
	}

	pub fn tick(&mut self) {
		self.simulation.step();
	}

	pub fn take_dirty(&self) -> bool {
		self.dirty.replace(false)
	}

	/// Topmost node under a canvas point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes
			.iter()
			.zip(self.simulation.bodies())
			.enumerate()
			.rev()
			.find(|(_, (node, body))| {
				let (dx, dy) = (body.x - x, body.y - y);
				(dx * dx + dy * dy).sqrt() < node.radius + HIT_SLOP
			})
			.map(|(i, _)| i)
	}

	/// Pin `index` where it is and wake the simulation. Only one node is held at
	/// a time; a start while another drag is active is ignored.
	pub fn drag_start(&mut self, index: usize) {
		if self.drag.node_idx.is_some() {
			return;
		}
		let Some(body) = self.simulation.bodies().get(index) else {
			return;
		};
		let (x, y) = (body.x, body.y);
		self.simulation.set_alpha_target(DRAG_ALPHA_TARGET);
		self.simulation.restart();
		self.simulation.pin(index, x, y);
		self.drag.node_idx = Some(index);
	}

	pub fn drag_move(&mut self, x: f64, y: f64) {
		if let Some(index) = self.drag.node_idx {
			self.simulation.pin(index, x, y);
		}
	}

	/// Release the dragged node and let the simulation cool again.
	pub fn drag_end(&mut self) {
		if let Some(index) = self.drag.node_idx.take() {
			self.simulation.set_alpha_target(0.0);
			self.simulation.unpin(index);
		}
	}
}

/// Sunflower spiral used for initial node placement.
fn phyllotaxis(i: usize, rotation: f64) -> (f64, f64) {
	let golden_angle = PI * (3.0 - 5f64.sqrt());
	let r = 10.0 * (0.5 + i as f64).sqrt();
	let angle = i as f64 * golden_angle + rotation;
	(r * angle.cos(), r * angle.sin())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::{Group, NetworkLink, NetworkNode};

	const VIEWPORT: Viewport = Viewport {
		width: 1000.0,
		height: 800.0,
	};

	fn node(id: &str, size: f64, group: f64) -> NetworkNode {
		NetworkNode {
			id: id.into(),
			size,
			group: Group::Number(group),
		}
	}

	fn link(source: &str, target: &str, value: f64) -> NetworkLink {
		NetworkLink {
			source: source.into(),
			target: target.into(),
			value,
		}
	}

	fn networks() -> Vec<NetworkGraph> {
		vec![
			NetworkGraph {
				topic: 7,
				nodes: vec![
					node("doc-1", 1.0, 0.0),
					node("ai", 9.0, 1.0),
					node("model", 4.0, 1.0),
					node("lonely", 2.0, 2.0),
				],
				links: vec![link("doc-1", "ai", 4.0), link("doc-1", "model", 1.0)],
			},
			NetworkGraph {
				topic: 8,
				nodes: vec![node("a", 1.0, 0.0)],
				links: vec![link("a", "ghost", 1.0)],
			},
		]
	}

	fn build(topic: TopicId) -> Result<Option<NetworkState>, GraphError> {
		let mut random = || 0.25;
		NetworkState::build(&networks(), topic, VIEWPORT, &mut random)
	}

	#[test]
	fn scene_matches_the_selected_graph() {
		let state = build(7).unwrap().unwrap();
		assert_eq!(state.topic, 7);
		assert_eq!(state.nodes.len(), 4);
		assert_eq!(state.links.len(), 2);
		assert_eq!(state.simulation.bodies().len(), 4);
		assert_eq!(state.links[0], ResolvedLink {
			source: 0,
			target: 1,
			value: 4.0
		});
		assert_eq!(state.links[0].stroke_width(), 2.0);
	}

	#[test]
	fn missing_topic_builds_nothing() {
		assert!(build(99).unwrap().is_none());
	}

	#[test]
	fn dangling_endpoint_is_rejected() {
		let err = build(8).err().unwrap();
		assert_eq!(err, GraphError::UnknownEndpoint {
			source_id: "a".into(),
			target_id: "ghost".into(),
			missing: "ghost".into(),
		});
	}

	#[test]
	fn unlinked_nodes_are_flagged() {
		let state = build(7).unwrap().unwrap();
		let flags: Vec<bool> = state.nodes.iter().map(|n| n.unconnected).collect();
		assert_eq!(flags, [false, false, false, true]);
	}

	#[test]
	fn radii_span_the_size_extent() {
		let state = build(7).unwrap().unwrap();
		assert_eq!(state.nodes[0].radius, MIN_RADIUS);
		assert_eq!(state.nodes[1].radius, MAX_RADIUS);
		assert_eq!(state.nodes[1].color, state.nodes[2].color);
	}

	#[test]
	fn each_build_starts_from_a_fresh_rotation() {
		let mut a = || 0.1;
		let mut b = || 0.6;
		let first = NetworkState::build(&networks(), 7, VIEWPORT, &mut a).unwrap().unwrap();
		let second = NetworkState::build(&networks(), 7, VIEWPORT, &mut b).unwrap().unwrap();
		assert_ne!(first.simulation.bodies()[1], second.simulation.bodies()[1]);
	}

	#[test]
	fn dragging_pins_then_releases() {
		let mut state = build(7).unwrap().unwrap();
		while state.simulation.is_running() {
			state.tick();
		}

		state.drag_start(1);
		assert!(state.simulation.is_running());
		assert!(state.simulation.bodies()[1].is_pinned());

		state.drag_move(300.0, 200.0);
		state.tick();
		let body = &state.simulation.bodies()[1];
		assert_eq!((body.x, body.y), (300.0, 200.0));
		assert_eq!(state.node_at(300.0, 200.0), Some(1));

		state.drag_end();
		assert!(state.drag.node_idx.is_none());
		assert!(!state.simulation.bodies()[1].is_pinned());
	}

	#[test]
	fn second_drag_start_does_not_leave_a_node_pinned() {
		let mut state = build(7).unwrap().unwrap();
		state.drag_start(0);
		state.drag_start(1);
		assert_eq!(state.drag.node_idx, Some(0));
		assert!(!state.simulation.bodies()[1].is_pinned());

		state.drag_end();
		for _ in 0..50 {
			state.tick();
		}
		assert!(state.simulation.bodies().iter().all(|b| !b.is_pinned()));
	}

	#[test]
	fn settled_graph_stays_near_the_canvas() {
		let mut state = build(7).unwrap().unwrap();
		while state.simulation.is_running() {
			state.tick();
		}
		for body in state.simulation.bodies() {
			assert!(body.x > 0.0 && body.x < VIEWPORT.width);
			assert!(body.y > 0.0 && body.y < VIEWPORT.height);
		}
	}
}
