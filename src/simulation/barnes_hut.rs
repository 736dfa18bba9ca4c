//! # Barnes–Hut Quadtree (2D)
//!
//! This module implements a **2D Barnes–Hut quadtree** for approximating
//! gravitational acceleration in an `N`-body system. The goal is to replace the
//! naive `O(N²)` all-pairs force calculation with an approximate `O(N log N)`
//! method while keeping distant interactions accurate.
//!
//! ## Core Concepts
//!
//! - The root square (the snapshot's `[0, width)²`) is recursively split into
//!   4 quadrants, ordered NW, NE, SW, SE.
//! - A node exists only if its square holds at least one body.
//! - A node holding exactly one body is a leaf that refers back to the
//!   snapshot by body index.
//! - A node holding several bodies is internal: it stores the total mass and
//!   the center of mass (COM) of every body in its square, plus 4 child slots.
//! - Coincident bodies never separate under repeated quartering, so recursion
//!   stops at `max_depth` and the remaining bodies are collapsed into a single
//!   cluster node.
//!
//! The tree is stored as an arena (`Vec<Node>`) with children referenced by
//! index. It is built once per tick from an immutable snapshot, read during
//! force evaluation and then dropped.

use log::{debug, warn};

use crate::simulation::error::SimError;
use crate::simulation::forces::pairwise_field;
use crate::simulation::region::Region;
use crate::simulation::states::{center_of_mass, NVec2, System};

/// Default recursion cap for tree construction.
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// Largest accepted recursion cap. Below this many halvings an f64 square
/// can no longer separate distinct points.
pub const MAX_TREE_DEPTH: usize = 64;

/// Reject depth caps outside `1..=MAX_TREE_DEPTH`
pub fn validate_max_depth(max_depth: usize) -> Result<(), SimError> {
    if (1..=MAX_TREE_DEPTH).contains(&max_depth) {
        Ok(())
    } else {
        Err(SimError::InvalidMaxDepth(max_depth))
    }
}

/// What a quadtree node represents.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Exactly one body, referenced by its index in `System::bodies`
    Leaf { body: usize },

    /// Several bodies split over up to 4 non-empty children
    Internal {
        mass: f64,
        com: NVec2,
        children: [Option<usize>; 4], // indices into QuadTree::nodes, NW/NE/SW/SE
    },

    /// Several bodies that were still together at `max_depth`
    Cluster {
        mass: f64,
        com: NVec2,
        members: Vec<usize>,
    },
}

/// A single quadtree node: the square it covers, its depth below the root
/// and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub region: Region,
    pub depth: usize,
    pub kind: NodeKind,
}

/// A complete 2D Barnes–Hut quadtree built over one snapshot.
///
/// This structure owns:
/// - a vector of all nodes (`nodes`)
/// - the index of the root node, `None` only for a tree built over no bodies
/// - the depth cap used during construction
#[derive(Debug, Clone)]
pub struct QuadTree {
    pub nodes: Vec<Node>,
    pub root: Option<usize>,
    pub max_depth: usize,
}

impl QuadTree {
    /// Build a quadtree over every body of `sys`.
    ///
    /// This:
    /// 1. Validates the snapshot (non-empty, positive width, finite state,
    ///    non-negative masses, every body inside `sys.region()`).
    /// 2. Recursively partitions the body indices top-down, bucketing each
    ///    body with [`Region::child_index`].
    /// 3. Computes each internal node's total mass and COM over all bodies in
    ///    its square.
    ///
    /// # Errors
    /// - [`SimError::InvalidMaxDepth`] if `max_depth` is 0 or above [`MAX_TREE_DEPTH`]
    /// - any error from [`System::validate`]; no partial tree is ever built
    pub fn build(sys: &System, max_depth: usize) -> Result<Self, SimError> {
        validate_max_depth(max_depth)?;
        sys.validate()?;

        let mut tree = QuadTree {
            nodes: Vec::with_capacity(2 * sys.bodies.len()),
            root: None,
            max_depth,
        };

        let all: Vec<usize> = (0..sys.bodies.len()).collect();
        tree.root = tree.build_node(sys, sys.region(), all, 0);

        debug!(
            "built quadtree: {} bodies, {} nodes, depth {}",
            sys.bodies.len(),
            tree.nodes.len(),
            tree.depth()
        );

        Ok(tree)
    }

    /// Total mass and COM represented by node `idx`.
    ///
    /// Leaves report their body's own mass and position, internal and
    /// cluster nodes their stored aggregate.
    ///
    /// # Panics
    /// If `idx` is not a node of this tree, or `sys` is not the snapshot the
    /// tree was built from (a leaf's body index out of range).
    pub fn aggregate(&self, idx: usize, sys: &System) -> (f64, NVec2) {
        match &self.nodes[idx].kind {
            NodeKind::Leaf { body } => {
                let b = &sys.bodies[*body];
                (b.m, b.x)
            }
            NodeKind::Internal { mass, com, .. } | NodeKind::Cluster { mass, com, .. } => (*mass, *com),
        }
    }

    /// Aggregate of the whole tree, `(0, origin)` if there is no root
    pub fn root_aggregate(&self, sys: &System) -> (f64, NVec2) {
        match self.root {
            Some(root) => self.aggregate(root, sys),
            None => (0.0, NVec2::zeros()),
        }
    }

    /// Deepest node depth (root = 0)
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Number of bodies reachable from the root. Equals the body count of the
    /// snapshot the tree was built from.
    pub fn body_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| match &n.kind {
                NodeKind::Leaf { .. } => 1,
                NodeKind::Cluster { members, .. } => members.len(),
                NodeKind::Internal { .. } => 0,
            })
            .sum()
    }

    /// Gravitational field (force per unit mass) acting on body `target`.
    ///
    /// Traverses the tree from the root:
    /// - a leaf holding `target` itself contributes nothing
    /// - any other leaf contributes the exact pairwise field
    /// - an internal node with side `s` whose COM is at distance `d > 0` from
    ///   the target is treated as one point mass when `s / d <= theta`,
    ///   otherwise its children are visited
    /// - a cluster node is a point mass for outside targets; members receive
    ///   the direct sum over the other members
    ///
    /// `theta = 0` always opens internal nodes and reproduces the all-pairs sum.
    ///
    /// # Panics
    /// If `target` is not a body index of `sys`, or `sys` is not the snapshot
    /// the tree was built from.
    #[allow(non_snake_case)]
    pub fn field_on_body(&self, target: usize, sys: &System, G: f64, eps2: f64, theta: f64) -> NVec2 {
        let mut acc = NVec2::zeros();
        if let Some(root) = self.root {
            let pos = sys.bodies[target].x;
            self.traverse_node(root, target, pos, sys, G, eps2, theta, &mut acc);
        }
        acc
    }

    /// Net gravitational force on body `target`: its mass times
    /// [`QuadTree::field_on_body`]. Zero for a massless body.
    ///
    /// # Panics
    /// Same conditions as [`QuadTree::field_on_body`].
    #[allow(non_snake_case)]
    pub fn net_force(&self, target: usize, sys: &System, G: f64, eps2: f64, theta: f64) -> NVec2 {
        sys.bodies[target].m * self.field_on_body(target, sys, G, eps2, theta)
    }

    // helpers ==============================================================================

    /// Build the subtree covering `region` over the bodies in `ids` and
    /// return its node index, or `None` when `ids` is empty.
    ///
    /// Children are pushed before their parent, so the root ends up last.
    fn build_node(&mut self, sys: &System, region: Region, ids: Vec<usize>, depth: usize) -> Option<usize> {
        let kind = match ids.len() {
            0 => return None,
            1 => NodeKind::Leaf { body: ids[0] },
            n => {
                let mass: f64 = ids.iter().map(|&i| sys.bodies[i].m).sum();
                let com = center_of_mass(ids.iter().map(|&i| (sys.bodies[i].x, sys.bodies[i].m)));

                if depth >= self.max_depth {
                    warn!(
                        "{} bodies still share a node at depth {} near ({:.6e}, {:.6e}); collapsing into a cluster",
                        n, depth, com.x, com.y
                    );
                    NodeKind::Cluster { mass, com, members: ids }
                } else {
                    // Partition into NW, NE, SW, SE buckets with the same
                    // center test the sub-squares are built from
                    let mut buckets: [Vec<usize>; 4] = Default::default();
                    for &i in &ids {
                        buckets[region.child_index(&sys.bodies[i].x)].push(i);
                    }

                    let sub_regions = region.split();
                    let mut children = [None; 4];
                    for (q, bucket) in buckets.into_iter().enumerate() {
                        children[q] = self.build_node(sys, sub_regions[q], bucket, depth + 1);
                    }

                    NodeKind::Internal { mass, com, children }
                }
            }
        };

        self.nodes.push(Node { region, depth, kind });
        Some(self.nodes.len() - 1)
    }

    /// Recursively accumulate the field on `target` from the subtree at `node_idx`.
    #[allow(non_snake_case, clippy::too_many_arguments)]
    fn traverse_node(
        &self,
        node_idx: usize,
        target: usize,
        pos: NVec2,
        sys: &System,
        G: f64,
        eps2: f64,
        theta: f64,
        acc: &mut NVec2,
    ) {
        let node = &self.nodes[node_idx];

        match &node.kind {
            NodeKind::Leaf { body } => {
                if *body == target {
                    return; // no self force
                }
                let b = &sys.bodies[*body];
                *acc += pairwise_field(pos, b.x, b.m, G, eps2);
            }

            NodeKind::Internal { mass, com, children } => {
                let d = (*com - pos).norm();
                if d > 0.0 && node.region.side / d <= theta {
                    // Far enough away: the whole square acts as one mass at its COM
                    *acc += pairwise_field(pos, *com, *mass, G, eps2);
                } else {
                    for child in children.iter().flatten() {
                        self.traverse_node(*child, target, pos, sys, G, eps2, theta, acc);
                    }
                }
            }

            NodeKind::Cluster { mass, com, members } => {
                if members.contains(&target) {
                    for &j in members.iter().filter(|&&j| j != target) {
                        let b = &sys.bodies[j];
                        *acc += pairwise_field(pos, b.x, b.m, G, eps2);
                    }
                } else {
                    *acc += pairwise_field(pos, *com, *mass, G, eps2);
                }
            }
        }
    }
}
