// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connectivity search over a laid-out flow graph.
//!
//! Hovering a node or a ribbon highlights everything it is connected to.
//! The traversal is an explicit breadth-first walk over the layout's
//! adjacency lists, so deep graphs cannot blow the stack.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::flow::FlowLayout;

/// Which way to walk from the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    /// Follow incoming links toward the sources.
    Upstream,
    /// Follow outgoing links toward the sinks.
    Downstream,
    /// Union of both walks.
    Both,
}

/// Where the walk starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSeed {
    /// A node index into [`FlowLayout::nodes`].
    Node(usize),
    /// A link index into [`FlowLayout::links`].
    Link(usize),
}

/// The connected subgraph found by [`connected`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowSelection {
    /// Node indices, ascending.
    pub nodes: Vec<usize>,
    /// Link indices, ascending.
    pub links: Vec<usize>,
}

/// Collects every node and link reachable from `seed` in `direction`.
///
/// The seed itself is always part of the selection. A seed index outside
/// the layout yields an empty selection.
pub fn connected(layout: &FlowLayout, seed: FlowSeed, direction: FlowDirection) -> FlowSelection {
    let mut nodes: HashSet<usize> = HashSet::new();
    let mut links: HashSet<usize> = HashSet::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    let upstream = matches!(direction, FlowDirection::Upstream | FlowDirection::Both);
    let downstream = matches!(direction, FlowDirection::Downstream | FlowDirection::Both);

    match seed {
        FlowSeed::Node(ni) => {
            if ni < layout.nodes.len() {
                nodes.insert(ni);
                queue.push_back(ni);
            }
        }
        FlowSeed::Link(li) => {
            let Some(link) = layout.links.get(li) else {
                return FlowSelection::default();
            };
            links.insert(li);
            nodes.insert(link.source);
            nodes.insert(link.target);
            if upstream {
                queue.push_back(link.source);
            }
            if downstream {
                queue.push_back(link.target);
            }
        }
    }

    while let Some(ni) = queue.pop_front() {
        let node = &layout.nodes[ni];
        if upstream {
            for &li in &node.incoming {
                if links.insert(li) {
                    let source = layout.links[li].source;
                    if nodes.insert(source) {
                        queue.push_back(source);
                    }
                }
            }
        }
        if downstream {
            for &li in &node.outgoing {
                if links.insert(li) {
                    let target = layout.links[li].target;
                    if nodes.insert(target) {
                        queue.push_back(target);
                    }
                }
            }
        }
    }

    let mut nodes: Vec<usize> = nodes.into_iter().collect();
    let mut links: Vec<usize> = links.into_iter().collect();
    nodes.sort_unstable();
    links.sort_unstable();
    FlowSelection { nodes, links }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Rect;

    use crate::flow::{FlowLink, FlowOptions, layout_flow};

    use super::*;

    // A -> B -> C plus a side branch D -> B.
    fn diamond() -> FlowLayout {
        let links = vec![
            FlowLink::new("A", "B", 2.0),
            FlowLink::new("D", "B", 1.0),
            FlowLink::new("B", "C", 3.0),
        ];
        layout_flow(&links, Rect::new(0.0, 0.0, 600.0, 400.0), &FlowOptions::default()).unwrap()
    }

    fn node_index(layout: &FlowLayout, name: &str) -> usize {
        layout.nodes.iter().position(|node| node.name == name).unwrap()
    }

    #[test]
    fn downstream_walk_reaches_the_sinks() {
        let layout = diamond();
        let a = node_index(&layout, "A");
        let sel = connected(&layout, FlowSeed::Node(a), FlowDirection::Downstream);
        let names: Vec<&str> = sel.nodes.iter().map(|&ni| layout.nodes[ni].name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(sel.links, vec![0, 2]);
    }

    #[test]
    fn upstream_walk_reaches_the_sources() {
        let layout = diamond();
        let c = node_index(&layout, "C");
        let sel = connected(&layout, FlowSeed::Node(c), FlowDirection::Upstream);
        assert_eq!(sel.nodes.len(), 4);
        assert_eq!(sel.links, vec![0, 1, 2]);
    }

    #[test]
    fn both_directions_union_the_walks() {
        let layout = diamond();
        let b = node_index(&layout, "B");
        let sel = connected(&layout, FlowSeed::Node(b), FlowDirection::Both);
        assert_eq!(sel.nodes.len(), 4);
        assert_eq!(sel.links.len(), 3);
    }

    #[test]
    fn link_seed_includes_its_endpoints() {
        let layout = diamond();
        // Seed on A -> B, downstream only: the walk continues from B.
        let sel = connected(&layout, FlowSeed::Link(0), FlowDirection::Downstream);
        let names: Vec<&str> = sel.nodes.iter().map(|&ni| layout.nodes[ni].name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(sel.links.contains(&0) && sel.links.contains(&2));
        // The sibling D -> B link is not part of the downstream selection.
        assert!(!sel.links.contains(&1));
    }

    #[test]
    fn out_of_range_seeds_select_nothing() {
        let layout = diamond();
        let sel = connected(&layout, FlowSeed::Link(99), FlowDirection::Both);
        assert_eq!(sel, FlowSelection::default());
        let sel = connected(&layout, FlowSeed::Node(99), FlowDirection::Both);
        assert_eq!(sel, FlowSelection::default());
    }
}
