//! Index of links sharing the same pair of nodes.

use std::collections::HashMap;
use std::hash::Hash;

/// Access to the two endpoint ids of a link.
pub trait Endpoints {
	/// Node identifier.
	type Id: Ord + Hash + Clone;

	/// Source and target ids.
	fn endpoints(&self) -> (&Self::Id, &Self::Id);
}

impl<T: Ord + Hash + Clone> Endpoints for (T, T) {
	type Id = T;

	fn endpoints(&self) -> (&T, &T) {
		(&self.0, &self.1)
	}
}

/// Unordered pair of node ids, smaller id first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodePairKey<Id>(pub Id, pub Id);

impl<Id: Ord + Clone> NodePairKey<Id> {
	/// Key for the pair `a`, `b` in either order.
	pub fn new(a: &Id, b: &Id) -> Self {
		if a < b {
			Self(a.clone(), b.clone())
		} else {
			Self(b.clone(), a.clone())
		}
	}

	/// Key for a link's endpoints.
	pub fn of<L: Endpoints<Id = Id>>(link: &L) -> Self {
		let (source, target) = link.endpoints();
		Self::new(source, target)
	}
}

/// A link with its rank among parallel links and the offset derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelLink<L> {
	/// The input link.
	pub link: L,
	/// 1-based position within the link's node-pair group.
	pub multi_index: usize,
	/// Signed perpendicular offset for drawing the link.
	pub target_distance: f64,
}

/// Offset for the `multi_index`-th link of a group: 0, 2L, -2L, 4L, -4L, ...
pub fn target_distance(multi_index: usize, link_width: f64) -> f64 {
	let m = multi_index as f64;
	if multi_index % 2 == 0 {
		m * link_width
	} else {
		(1.0 - m) * link_width
	}
}

/// Positions of the links sharing each node pair, in input order.
pub fn pair_groups<L: Endpoints>(links: &[L]) -> HashMap<NodePairKey<L::Id>, Vec<usize>> {
	let mut groups: HashMap<_, Vec<usize>> = HashMap::new();
	for (idx, link) in links.iter().enumerate() {
		groups.entry(NodePairKey::of(link)).or_default().push(idx);
	}
	groups
}

/// Ranks every link within its node-pair group and attaches its target offset.
///
/// Output order matches input order.
pub fn group_links<L: Endpoints + Clone>(links: &[L], link_width: f64) -> Vec<ParallelLink<L>> {
	let mut groups: HashMap<NodePairKey<L::Id>, Vec<usize>> = HashMap::new();
	links
		.iter()
		.enumerate()
		.map(|(idx, link)| {
			let members = groups.entry(NodePairKey::of(link)).or_default();
			members.push(idx);
			let multi_index = members.len();
			ParallelLink {
				link: link.clone(),
				multi_index,
				target_distance: target_distance(multi_index, link_width),
			}
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;
	use approx::assert_abs_diff_eq;

	#[test]
	fn should_derive_alternating_target_distances() {
		let distances: Vec<f64> = (1..=5).map(|m| target_distance(m, 2.0)).collect();
		assert_eq!(distances, vec![0.0, 4.0, -4.0, 8.0, -8.0]);
	}

	#[test]
	fn should_get_same_key_for_both_directions() {
		assert_eq!(NodePairKey::new(&3, &7), NodePairKey::new(&7, &3));
		assert_eq!(NodePairKey::new(&7, &3), NodePairKey(3, 7));
	}

	#[test]
	fn should_group_links_regardless_of_direction() {
		let links = [(0, 1), (1, 0), (0, 1)];
		let grouped = group_links(&links, 2.0);

		let indices: Vec<usize> = grouped.iter().map(|l| l.multi_index).collect();
		assert_eq!(indices, vec![1, 2, 3]);
		let distances: Vec<f64> = grouped.iter().map(|l| l.target_distance).collect();
		assert_eq!(distances, vec![0.0, 4.0, -4.0]);
	}

	#[test]
	fn should_rank_each_group_independently() {
		let links = [(0, 1), (1, 2), (1, 0), (2, 1), (0, 2), (0, 1)];
		let grouped = group_links(&links, 1.0);

		let indices: Vec<usize> = grouped.iter().map(|l| l.multi_index).collect();
		assert_eq!(indices, vec![1, 1, 2, 2, 1, 3]);
		assert_abs_diff_eq!(grouped[5].target_distance, -2.0);
		assert_eq!(grouped[3].link, (2, 1));
	}

	#[test]
	fn should_list_group_members_in_input_order() {
		let links = [(0, 1), (1, 2), (1, 0), (0, 1)];
		let groups = pair_groups(&links);

		assert_eq!(groups.len(), 2);
		assert_eq!(groups[&NodePairKey(0, 1)], vec![0, 2, 3]);
		assert_eq!(groups[&NodePairKey(1, 2)], vec![1]);
	}

	#[test]
	fn should_treat_absent_ids_as_valid_key_components() {
		let links = [(None, Some(1)), (Some(1), None)];
		let grouped = group_links(&links, 2.0);
		assert_eq!(grouped[1].multi_index, 2);
	}

	#[test]
	fn should_get_empty_output_for_no_links() {
		let links: [(u32, u32); 0] = [];
		assert!(group_links(&links, 2.0).is_empty());
		assert!(pair_groups(&links).is_empty());
	}
}
