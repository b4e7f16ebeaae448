//! Demo configuration and static graph data.

use force_graph::SimulationParameters;

use crate::components::parallel_links::{GraphData, GraphLink, GraphNode};
use crate::parallel::CalcMethod;

/// Settings for the parallel links demo.
#[derive(Clone, Debug)]
pub struct ParallelLinksConfig {
	/// Space kept free around the square canvas.
	pub margin: f64,
	/// Unit of the parallel link offsets, also used as stroke width.
	pub link_width: f64,
	/// Node radius as a fraction of the view width.
	pub node_radius_ratio: f64,
	/// Initial node separation as a fraction of the view width.
	pub link_distance_ratio: f64,
	/// Shake every node by up to one pixel per axis on each tick.
	pub jitter: bool,
	/// Initial link translation method.
	pub method: CalcMethod,
	/// Canvas fill color.
	pub background: &'static str,
	/// Node fill color.
	pub node_color: &'static str,
	/// Repulsion between nodes.
	pub force_charge: f32,
	/// Spring strength of a node pair.
	pub force_spring: f32,
	/// Upper bound of the force on a node.
	pub force_max: f32,
	/// Velocity scale of the simulation.
	pub node_speed: f32,
	/// Velocity kept per step.
	pub damping_factor: f32,
}

impl Default for ParallelLinksConfig {
	fn default() -> Self {
		Self {
			margin: 10.0,
			link_width: 2.0,
			node_radius_ratio: 1.0 / 30.0,
			link_distance_ratio: 1.0 / 3.5,
			jitter: true,
			method: CalcMethod::Exact,
			background: "#ffffff",
			node_color: "#4a4a4a",
			force_charge: 12000.0,
			force_spring: 0.3,
			force_max: 280.0,
			node_speed: 7000.0,
			damping_factor: 0.95,
		}
	}
}

impl ParallelLinksConfig {
	/// Parameters for the `force_graph` simulation.
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}

	/// Side of the square view that fits in a `width` x `height` container.
	pub fn view_size(&self, width: f64, height: f64) -> f64 {
		(width.min(height) - 2.0 * self.margin).max(0.0)
	}

	/// Node radius in a view of side `view_size`.
	pub fn node_radius(&self, view_size: f64) -> f64 {
		view_size * self.node_radius_ratio
	}

	/// Initial distance between linked nodes in a view of side `view_size`.
	pub fn link_distance(&self, view_size: f64) -> f64 {
		view_size * self.link_distance_ratio
	}
}

/// Two nodes joined by four links of different colors.
pub fn demo_graph() -> GraphData {
	let nodes = (0..2)
		.map(|i| GraphNode {
			id: i.to_string(),
			label: None,
		})
		.collect();
	let links = ["blue", "red", "green", "orange"]
		.into_iter()
		.map(|color| GraphLink {
			source: "0".into(),
			target: "1".into(),
			color: color.into(),
		})
		.collect();

	GraphData { nodes, links }
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_abs_diff_eq;

	#[test]
	fn should_fit_square_view_inside_margin() {
		let config = ParallelLinksConfig::default();
		assert_abs_diff_eq!(config.view_size(800.0, 600.0), 580.0);
		assert_abs_diff_eq!(config.view_size(10.0, 600.0), 0.0);
	}

	#[test]
	fn should_scale_node_radius_and_link_distance_with_view() {
		let config = ParallelLinksConfig::default();
		assert_abs_diff_eq!(config.node_radius(600.0), 20.0, epsilon = 1e-9);
		assert_abs_diff_eq!(config.link_distance(700.0), 200.0, epsilon = 1e-9);
	}

	#[test]
	fn should_get_four_parallel_links_in_demo_graph() {
		let data = demo_graph();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.links.len(), 4);
		assert!(data.links.iter().all(|l| l.source == "0" && l.target == "1"));
	}
}
