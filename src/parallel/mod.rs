//! Geometry for drawing several links between the same two nodes.
//!
//! [`group_links`] runs once over the static link set and gives every link a
//! signed target offset. Each frame, [`CalcMethod::translation`] turns that
//! offset and the live endpoint positions into a displacement for the link.

mod group;
mod translate;

pub use group::{Endpoints, NodePairKey, ParallelLink, group_links, pair_groups, target_distance};
pub use translate::{
	CalcMethod, Point, Translation, calc_translation_approximate, calc_translation_exact,
	perpendicular_distance,
};
