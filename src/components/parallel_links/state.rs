use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{GraphData, GraphLink};
use crate::config::ParallelLinksConfig;
use crate::parallel::{CalcMethod, NodePairKey, ParallelLink, Point, Translation, group_links};

/// Per-node payload carried by the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Text drawn on the node.
	pub label: Option<String>,
}

/// Screen position of the graph origin.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Canvas x of the origin.
	pub x: f64,
	/// Canvas y of the origin.
	pub y: f64,
}

/// Node currently held by the mouse and where the grab started.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is being dragged.
	pub active: bool,
	/// The dragged node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Cursor x at grab time, canvas space.
	pub start_x: f64,
	/// Cursor y at grab time, canvas space.
	pub start_y: f64,
	/// Node x at grab time, graph space.
	pub node_start_x: f32,
	/// Node y at grab time, graph space.
	pub node_start_y: f32,
}

/// One link as it should be drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkSegment<'a> {
	/// Live position of the source node.
	pub start: Point,
	/// Live position of the target node.
	pub end: Point,
	/// Shift to apply when drawing.
	pub translation: Translation,
	/// Stroke color.
	pub color: &'a str,
	/// Offset the translation aims for.
	pub target_distance: f64,
}

/// Seeded source of the per-tick node shake.
#[derive(Clone, Debug)]
struct Jitter {
	rng: SmallRng,
}

impl Jitter {
	fn new(seed: u64) -> Self {
		Self {
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// -1, 0 or 1 pixel.
	fn step(&mut self) -> f32 {
		self.rng.random_range(-1..=1) as f32
	}
}

/// Simulation, grouped links and interaction state of the demo canvas.
///
/// The physics graph holds one spring per node pair; parallel links are
/// tracked in `links` with their endpoint node indices in `link_ends`.
pub struct ParallelLinksState {
	/// Physics collaborator owning node positions.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Input links with their group rank and offset.
	pub links: Vec<ParallelLink<GraphLink>>,
	/// Endpoint nodes of each link, `None` when an id is unknown.
	pub link_ends: Vec<Option<(DefaultNodeIdx, DefaultNodeIdx)>>,
	/// Settings the state was built with.
	pub config: ParallelLinksConfig,
	/// Where the graph origin sits on the canvas.
	pub transform: ViewTransform,
	/// Mouse drag in progress.
	pub drag: DragState,
	/// Side of the square view.
	pub size: f64,
	/// Drawn and hit-test radius of a node.
	pub node_radius: f64,
	/// Advance the simulation on each frame.
	pub running: bool,
	/// Translation method used by [`Self::link_segments`].
	pub method: CalcMethod,
	jitter: Option<Jitter>,
}

impl ParallelLinksState {
	/// Builds the simulation and groups the links of `data`.
	pub fn new(data: &GraphData, config: ParallelLinksConfig, size: f64, seed: u64) -> Self {
		let mut graph = ForceGraph::new(config.simulation_parameters());
		let mut id_to_idx = HashMap::new();
		let spread = config.link_distance(size) / 2.0;

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (spread * angle.cos()) as f32,
				y: (spread * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					label: node.label.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let links = group_links(&data.links, config.link_width);
		let mut springs = HashSet::new();
		let link_ends: Vec<_> = links
			.iter()
			.map(|link| {
				let ends = (
					id_to_idx.get(&link.link.source),
					id_to_idx.get(&link.link.target),
				);
				let (Some(&src), Some(&tgt)) = ends else {
					warn!(
						"skipping link {} -> {}: unknown node",
						link.link.source, link.link.target
					);
					return None;
				};
				// force_graph keeps a single edge per node pair
				if springs.insert(NodePairKey::new(&src, &tgt)) {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				Some((src, tgt))
			})
			.collect();
		info!(
			"grouped {} links into {} node pairs",
			links.len(),
			links.iter().filter(|l| l.multi_index == 1).count()
		);

		Self {
			graph,
			links,
			link_ends,
			transform: ViewTransform {
				x: size / 2.0,
				y: size / 2.0,
			},
			drag: DragState::default(),
			size,
			node_radius: config.node_radius(size),
			running: true,
			method: config.method,
			jitter: config.jitter.then(|| Jitter::new(seed)),
			config,
		}
	}

	/// Canvas coordinates to graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx - self.transform.x, sy - self.transform.y)
	}

	/// Node under the canvas position, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if dx.hypot(dy) < self.node_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Current position of a node.
	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<Point> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(Point::new(node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Grabs the node under the cursor, if any.
	pub fn begin_drag(&mut self, sx: f64, sy: f64) -> bool {
		let Some(idx) = self.node_at_position(sx, sy) else {
			return false;
		};
		let Some(start) = self.node_position(idx) else {
			return false;
		};
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: start.x as f32,
			node_start_y: start.y as f32,
		};
		true
	}

	/// Moves the dragged node with the cursor and pins it there.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) else {
			return;
		};
		let (nx, ny) = (
			self.drag.node_start_x + (sx - self.drag.start_x) as f32,
			self.drag.node_start_y + (sy - self.drag.start_y) as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Releases the dragged node back to the simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = false;
				}
			});
		}
		self.drag.active = false;
	}

	/// Selects the translation method for the following frames.
	pub fn set_method(&mut self, method: CalcMethod) {
		if self.method != method {
			debug!("link translation method: {}", method.label());
			self.method = method;
		}
	}

	/// Advances the simulation, shakes the nodes and re-centers them on the origin.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		if let Some(jitter) = self.jitter.as_mut() {
			self.graph.visit_nodes_mut(|node| {
				if !node.data.is_anchor {
					node.data.x += jitter.step();
					node.data.y += jitter.step();
				}
			});
		}

		if !self.drag.active {
			self.recenter();
		}
	}

	fn recenter(&mut self) {
		let (mut sx, mut sy, mut n) = (0.0_f64, 0.0_f64, 0usize);
		self.graph.visit_nodes(|node| {
			sx += node.x() as f64;
			sy += node.y() as f64;
			n += 1;
		});
		if n == 0 {
			return;
		}
		let (cx, cy) = ((sx / n as f64) as f32, (sy / n as f64) as f32);
		self.graph.visit_nodes_mut(|node| {
			node.data.x -= cx;
			node.data.y -= cy;
		});
	}

	/// Live endpoints and translation of every link, in graph space.
	pub fn link_segments(&self) -> Vec<LinkSegment<'_>> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), Point::new(node.x() as f64, node.y() as f64));
		});

		self.links
			.iter()
			.zip(&self.link_ends)
			.filter_map(|(link, ends)| {
				let (src, tgt) = (*ends)?;
				let (start, end) = (*positions.get(&src)?, *positions.get(&tgt)?);
				Some(LinkSegment {
					start,
					end,
					translation: self.method.translation(link.target_distance, start, end),
					color: &link.link.color,
					target_distance: link.target_distance,
				})
			})
			.collect()
	}

	/// Adapts the view to a new canvas side.
	pub fn resize(&mut self, size: f64) {
		self.size = size;
		self.transform = ViewTransform {
			x: size / 2.0,
			y: size / 2.0,
		};
		self.node_radius = self.config.node_radius(size);
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::config::demo_graph;
	use crate::parallel::perpendicular_distance;
	use approx::assert_abs_diff_eq;

	const SIZE: f64 = 600.0;

	fn demo_state() -> ParallelLinksState {
		ParallelLinksState::new(&demo_graph(), ParallelLinksConfig::default(), SIZE, 42)
	}

	fn centroid(state: &ParallelLinksState) -> (f64, f64) {
		let segments = state.link_segments();
		let first = &segments[0];
		(
			(first.start.x + first.end.x) / 2.0,
			(first.start.y + first.end.y) / 2.0,
		)
	}

	#[test]
	fn should_assign_alternating_offsets_to_demo_links() {
		let state = demo_state();
		let distances: Vec<f64> = state.links.iter().map(|l| l.target_distance).collect();
		assert_eq!(distances, vec![0.0, 4.0, -4.0, 8.0]);
	}

	#[test]
	fn should_get_one_segment_per_link() {
		let state = demo_state();
		let mut colors: Vec<&str> = state.link_segments().iter().map(|s| s.color).collect();
		colors.sort_unstable();
		assert_eq!(colors, vec!["blue", "green", "orange", "red"]);
	}

	#[test]
	fn should_offset_each_demo_link_by_its_own_distance() {
		let mut state = demo_state();
		state.tick(0.016);
		state.set_method(CalcMethod::Exact);
		let segments = state.link_segments();

		let distances: Vec<f64> = segments.iter().map(|s| s.target_distance).collect();
		assert_eq!(distances, vec![0.0, 4.0, -4.0, 8.0]);
		for segment in &segments {
			assert_abs_diff_eq!(
				perpendicular_distance(segment.start, segment.end, segment.translation),
				segment.target_distance.abs(),
				epsilon = 1e-6
			);
		}
	}

	#[test]
	fn should_add_one_spring_per_node_pair() {
		let state = demo_state();
		let mut springs = 0;
		state.graph.visit_edges(|_, _, _| springs += 1);
		assert_eq!(springs, 1);
		assert!(state.link_ends.iter().all(Option::is_some));
	}

	#[test]
	fn should_translate_segments_with_current_method() {
		let mut state = demo_state();
		state.tick(0.016);
		for method in [CalcMethod::Exact, CalcMethod::Approximate] {
			state.set_method(method);
			for segment in state.link_segments() {
				let link = state
					.links
					.iter()
					.find(|l| l.link.color == segment.color)
					.unwrap();
				assert_eq!(
					segment.translation,
					method.translation(link.target_distance, segment.start, segment.end)
				);
			}
		}
	}

	#[test]
	fn should_skip_links_to_unknown_nodes() {
		let mut data = demo_graph();
		data.links.push(GraphLink {
			source: "0".into(),
			target: "7".into(),
			color: "black".into(),
		});
		let state = ParallelLinksState::new(&data, ParallelLinksConfig::default(), SIZE, 1);
		assert_eq!(state.links.len(), 5);
		assert_eq!(state.link_segments().len(), 4);
	}

	#[test]
	fn should_keep_nodes_centered_on_origin_after_ticks() {
		let mut state = demo_state();
		for _ in 0..20 {
			state.tick(0.016);
		}
		let (cx, cy) = centroid(&state);
		assert_abs_diff_eq!(cx, 0.0, epsilon = 1e-3);
		assert_abs_diff_eq!(cy, 0.0, epsilon = 1e-3);
	}

	#[test]
	fn should_yield_unit_jitter_steps() {
		let mut jitter = Jitter::new(0);
		for _ in 0..1000 {
			let step = jitter.step();
			assert!(step == -1.0 || step == 0.0 || step == 1.0);
		}
	}

	#[test]
	fn should_find_node_under_cursor() {
		let state = demo_state();
		let sx = SIZE / 2.0 + state.config.link_distance(SIZE) / 2.0;
		assert!(state.node_at_position(sx, SIZE / 2.0).is_some());
		assert!(state.node_at_position(SIZE / 2.0, SIZE / 2.0).is_none());
	}

	#[test]
	fn should_move_dragged_node_and_release_it() {
		let mut state = demo_state();
		let (sx, sy) = (SIZE / 2.0 + state.config.link_distance(SIZE) / 2.0, SIZE / 2.0);
		assert!(state.begin_drag(sx, sy));
		let idx = state.drag.node_idx.unwrap();
		let before = state.node_position(idx).unwrap();

		state.drag_to(sx + 10.0, sy - 5.0);
		let after = state.node_position(idx).unwrap();
		assert_abs_diff_eq!(after.x - before.x, 10.0, epsilon = 1e-3);
		assert_abs_diff_eq!(after.y - before.y, -5.0, epsilon = 1e-3);

		state.end_drag();
		assert!(!state.drag.active);
		assert!(state.drag.node_idx.is_none());
	}

	#[test]
	fn should_not_drag_from_empty_space() {
		let mut state = demo_state();
		assert!(!state.begin_drag(0.0, 0.0));
		assert!(!state.drag.active);
	}

	#[test]
	fn should_move_origin_on_resize() {
		let mut state = demo_state();
		state.resize(300.0);
		assert_abs_diff_eq!(state.transform.x, 150.0);
		assert_abs_diff_eq!(state.node_radius, 10.0, epsilon = 1e-9);
	}
}
