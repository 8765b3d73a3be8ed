// Copyright 2025 the Vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flow-graph (Sankey) layout.
//!
//! The input is a weighted link list. The layout derives the node set from
//! the link endpoints, assigns each node to a depth column by longest path
//! from the sources, sizes nodes by their throughput and routes links as
//! horizontal cubic beziers whose thickness is proportional to weight.
//!
//! The layout is a pure function: same links, extent and options give the
//! same output. Node stacking within a column follows first-seen order;
//! there are no crossing-minimization sweeps.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{CubicBez, Point, Rect};
use smallvec::SmallVec;

/// A weighted edge of the input graph, endpoints named.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLink {
    /// Source node name.
    pub source: String,
    /// Target node name.
    pub target: String,
    /// Flow weight. Must be finite and non-negative.
    pub value: f64,
}

impl FlowLink {
    /// Creates a link.
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

/// Errors returned by [`layout_flow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The link list is empty.
    NoLinks,
    /// A link weight is negative, `NaN` or infinite.
    InvalidValue {
        /// Index of the offending link.
        link: usize,
    },
    /// The graph contains a cycle, so depths cannot be assigned.
    Cycle,
}

/// Horizontal alignment policy for depth columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowAlign {
    /// Nodes without outgoing links are pushed to the last column.
    #[default]
    Justify,
    /// Nodes sit at their longest-path-from-source depth.
    Left,
    /// Nodes sit as far right as their longest path to a sink allows.
    Right,
    /// Nodes without incoming links sit just before their first target.
    Center,
}

/// Tuning knobs for [`layout_flow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowOptions {
    /// Width of every node column, in pixels.
    pub node_width: f64,
    /// Requested vertical gap between stacked nodes. Scaled down when a
    /// column would overflow the extent.
    pub node_padding: f64,
    /// Column alignment policy.
    pub align: FlowAlign,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            node_width: 20.0,
            node_padding: 10.0,
            align: FlowAlign::Justify,
        }
    }
}

/// A laid-out node.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    /// Node name, as spelled in the links.
    pub name: String,
    /// Category, for coloring: the name prefix up to the first space, or
    /// the whole name.
    pub category: String,
    /// Depth column index.
    pub depth: usize,
    /// The node's rectangle in the extent's coordinate space.
    pub rect: Rect,
    /// Sum of incoming link weights.
    pub in_sum: f64,
    /// Sum of outgoing link weights.
    pub out_sum: f64,
    /// Incoming link indices, in counterpart vertical order.
    pub incoming: SmallVec<[usize; 4]>,
    /// Outgoing link indices, in counterpart vertical order.
    pub outgoing: SmallVec<[usize; 4]>,
}

impl FlowNode {
    /// The node's vertical extent, `max(in_sum, out_sum)` in data units.
    pub fn throughput(&self) -> f64 {
        self.in_sum.max(self.out_sum)
    }
}

/// A laid-out link.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLinkLayout {
    /// Index of the source node.
    pub source: usize,
    /// Index of the target node.
    pub target: usize,
    /// Flow weight.
    pub value: f64,
    /// Stroke thickness, in pixels.
    pub thickness: f64,
    /// Center-line path from the source's right edge to the target's left
    /// edge.
    pub path: CubicBez,
}

/// The laid-out graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    /// Nodes in first-seen endpoint order.
    pub nodes: Vec<FlowNode>,
    /// Links in input order.
    pub links: Vec<FlowLinkLayout>,
    /// Number of depth columns.
    pub columns: usize,
}

/// Lays out a flow graph inside `extent`.
pub fn layout_flow(
    links: &[FlowLink],
    extent: Rect,
    options: &FlowOptions,
) -> Result<FlowLayout, FlowError> {
    if links.is_empty() {
        return Err(FlowError::NoLinks);
    }
    for (li, link) in links.iter().enumerate() {
        if !link.value.is_finite() || link.value < 0.0 {
            return Err(FlowError::InvalidValue { link: li });
        }
    }

    // Node union in first-seen endpoint order.
    let mut names: Vec<&str> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for link in links {
        for name in [link.source.as_str(), link.target.as_str()] {
            index.entry(name).or_insert_with(|| {
                names.push(name);
                names.len() - 1
            });
        }
    }
    let n = names.len();
    let edges: Vec<(usize, usize)> = links
        .iter()
        .map(|l| (index[l.source.as_str()], index[l.target.as_str()]))
        .collect();

    let depth = longest_path_depths(n, &edges)?;
    let height = longest_path_depths(n, &reversed(&edges))?;
    let max_depth = depth.iter().copied().max().unwrap_or(0);

    let mut has_out = alloc::vec![false; n];
    let mut has_in = alloc::vec![false; n];
    for &(s, t) in &edges {
        has_out[s] = true;
        has_in[t] = true;
    }

    // Column assignment per alignment policy (d3-sankey's four aligns).
    let column: Vec<usize> = (0..n)
        .map(|ni| match options.align {
            FlowAlign::Left => depth[ni],
            FlowAlign::Right => max_depth - height[ni],
            FlowAlign::Justify => {
                if has_out[ni] {
                    depth[ni]
                } else {
                    max_depth
                }
            }
            FlowAlign::Center => {
                if has_in[ni] || !has_out[ni] {
                    depth[ni]
                } else {
                    // A pure source sits one column before its nearest
                    // target.
                    edges
                        .iter()
                        .filter(|&&(s, _)| s == ni)
                        .map(|&(_, t)| depth[t])
                        .min()
                        .unwrap_or(1)
                        .saturating_sub(1)
                }
            }
        })
        .collect();
    let columns = column.iter().copied().max().unwrap_or(0) + 1;

    // Throughput sums.
    let mut in_sum = alloc::vec![0.0_f64; n];
    let mut out_sum = alloc::vec![0.0_f64; n];
    for (li, &(s, t)) in edges.iter().enumerate() {
        out_sum[s] += links[li].value;
        in_sum[t] += links[li].value;
    }

    // Vertical sizing: cap the padding so the fullest column always fits,
    // then pick one value-to-pixel factor over all columns.
    let ext_h = extent.height();
    let mut col_members: Vec<Vec<usize>> = alloc::vec![Vec::new(); columns];
    for ni in 0..n {
        col_members[column[ni]].push(ni);
    }
    let max_count = col_members.iter().map(Vec::len).max().unwrap_or(1);
    let pad = if max_count > 1 {
        options
            .node_padding
            .min(ext_h / (2.0 * (max_count - 1) as f64))
    } else {
        options.node_padding
    };
    let mut ky = f64::INFINITY;
    for members in &col_members {
        if members.is_empty() {
            continue;
        }
        let total: f64 = members.iter().map(|&ni| in_sum[ni].max(out_sum[ni])).sum();
        if total > 0.0 {
            let avail = ext_h - (members.len() - 1) as f64 * pad;
            ky = ky.min(avail / total);
        }
    }
    if !ky.is_finite() {
        ky = 0.0;
    }

    // Column x positions: columns spread evenly across the extent.
    let kx = if columns > 1 {
        (extent.width() - options.node_width) / (columns - 1) as f64
    } else {
        0.0
    };

    let mut nodes: Vec<FlowNode> = Vec::with_capacity(n);
    for (ni, &name) in names.iter().enumerate() {
        let x0 = extent.x0 + column[ni] as f64 * kx;
        nodes.push(FlowNode {
            name: String::from(name),
            category: category_of(name),
            depth: column[ni],
            rect: Rect::new(x0, 0.0, x0 + options.node_width, 0.0),
            in_sum: in_sum[ni],
            out_sum: out_sum[ni],
            incoming: SmallVec::new(),
            outgoing: SmallVec::new(),
        });
    }
    // Stack nodes within each column, first-seen order.
    for members in &col_members {
        let mut y = extent.y0;
        for &ni in members {
            let h = nodes[ni].throughput() * ky;
            nodes[ni].rect.y0 = y;
            nodes[ni].rect.y1 = y + h;
            y += h + pad;
        }
    }

    // Per-node link lists ordered by counterpart vertical position, so
    // ribbons fan out without gratuitous crossings at the node edge.
    for (li, &(s, t)) in edges.iter().enumerate() {
        nodes[s].outgoing.push(li);
        nodes[t].incoming.push(li);
    }
    let centers: Vec<f64> = nodes.iter().map(|node| node.rect.center().y).collect();
    for node in &mut nodes {
        node.outgoing
            .sort_by(|&a, &b| centers[edges[a].1].total_cmp(&centers[edges[b].1]));
        node.incoming
            .sort_by(|&a, &b| centers[edges[a].0].total_cmp(&centers[edges[b].0]));
    }

    // Link offsets: stack ribbon slots down each node edge in the order
    // chosen above.
    let mut source_y = alloc::vec![0.0_f64; links.len()];
    let mut target_y = alloc::vec![0.0_f64; links.len()];
    for node in &nodes {
        let mut y = node.rect.y0;
        for &li in &node.outgoing {
            let thickness = links[li].value * ky;
            source_y[li] = y + thickness / 2.0;
            y += thickness;
        }
        let mut y = node.rect.y0;
        for &li in &node.incoming {
            let thickness = links[li].value * ky;
            target_y[li] = y + thickness / 2.0;
            y += thickness;
        }
    }

    let out_links: Vec<FlowLinkLayout> = edges
        .iter()
        .enumerate()
        .map(|(li, &(s, t))| {
            let p0 = Point::new(nodes[s].rect.x1, source_y[li]);
            let p3 = Point::new(nodes[t].rect.x0, target_y[li]);
            let mid = (p0.x + p3.x) / 2.0;
            FlowLinkLayout {
                source: s,
                target: t,
                value: links[li].value,
                thickness: links[li].value * ky,
                path: CubicBez::new(p0, Point::new(mid, p0.y), Point::new(mid, p3.y), p3),
            }
        })
        .collect();

    Ok(FlowLayout {
        nodes,
        links: out_links,
        columns,
    })
}

/// The category heuristic from the original charts: everything before the
/// first space, or the whole name.
fn category_of(name: &str) -> String {
    match name.split_once(' ') {
        Some((prefix, _)) => String::from(prefix),
        None => String::from(name),
    }
}

fn reversed(edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    edges.iter().map(|&(s, t)| (t, s)).collect()
}

/// Longest-path depth per node via Kahn's ordering. Fails with
/// [`FlowError::Cycle`] if some node never becomes ready.
fn longest_path_depths(n: usize, edges: &[(usize, usize)]) -> Result<Vec<usize>, FlowError> {
    let mut in_degree = alloc::vec![0_usize; n];
    for &(_, t) in edges {
        in_degree[t] += 1;
    }
    let mut depth = alloc::vec![0_usize; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&ni| in_degree[ni] == 0).collect();
    let mut visited = 0;
    while let Some(ni) = queue.pop_front() {
        visited += 1;
        for &(s, t) in edges {
            if s != ni {
                continue;
            }
            depth[t] = depth[t].max(depth[ni] + 1);
            in_degree[t] -= 1;
            if in_degree[t] == 0 {
                queue.push_back(t);
            }
        }
    }
    if visited < n {
        return Err(FlowError::Cycle);
    }
    Ok(depth)
}
