//! Canvas drawing parallel links between nodes of a force simulation.

mod component;
mod render;
mod state;
mod types;

pub use component::{CanvasError, ParallelLinksCanvas};
pub use state::{LinkSegment, ParallelLinksState};
pub use types::{GraphData, GraphLink, GraphNode};
