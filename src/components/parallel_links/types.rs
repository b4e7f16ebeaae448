use crate::parallel::Endpoints;

/// Input node.
#[derive(Clone, Debug)]
pub struct GraphNode {
	/// Id referenced by links.
	pub id: String,
	/// Text drawn on the node.
	pub label: Option<String>,
}

/// Input link between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Id of the start node.
	pub source: String,
	/// Id of the end node.
	pub target: String,
	/// CSS stroke color.
	pub color: String,
}

impl Endpoints for GraphLink {
	type Id = String;

	fn endpoints(&self) -> (&String, &String) {
		(&self.source, &self.target)
	}
}

/// Static graph handed to the canvas.
#[derive(Clone, Debug, Default)]
pub struct GraphData {
	/// Nodes, placed evenly on a circle at start.
	pub nodes: Vec<GraphNode>,
	/// Links, drawn in this order.
	pub links: Vec<GraphLink>,
}
