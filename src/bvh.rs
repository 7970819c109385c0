//! Top-down BVH: binned-median build over primitive centroids, flattened to
//! a depth-first, left-child-first array for an iterative, stack-based
//! traversal. See `DESIGN.md` for why mesh faces are ordinary `Primitive`s
//! here rather than a nested per-mesh BVH: each `Triangle` already carries
//! its own `face_index` through `Shape::intersect`, so one flat tree over
//! every primitive (triangles included) covers the same ground without a
//! second tree type.

use arrayvec::ArrayVec;
use bumpalo::Bump;
use partition::partition;

use crate::geometry::bounds::Bounds3f;
use crate::geometry::Ray;
use crate::interaction::Interaction;
use crate::primitive::Primitive;
use crate::{Float, Point3f};

/// A leaf never holds more than this many primitives before the build
/// stops subdividing it further.
const MAX_PRIMS_IN_NODE: usize = 8;

#[derive(Copy, Clone)]
pub enum SplitMethod {
    Middle,
    EqualCounts,
}

pub struct Bvh<P: AsRef<dyn Primitive> = Box<dyn Primitive>> {
    prims: Vec<P>,
    bounds: Bounds3f,
    nodes: Vec<LinearBvhNode>,
}

impl<P: AsRef<dyn Primitive>> Bvh<P> {
    pub fn build(mut prims: Vec<P>) -> Self {
        if prims.is_empty() {
            return Bvh { prims, bounds: Bounds3f::empty(), nodes: Vec::new() };
        }

        let mut prim_info: Vec<PrimInfo> =
            prims.iter().enumerate().map(|(i, p)| PrimInfo::new(i, p.as_ref().bounds())).collect();

        let arena = Bump::new();
        let mut prim_ordering: Vec<isize> = Vec::with_capacity(prims.len());

        let root = Self::recursive_build(&arena, &mut prim_info, &mut prim_ordering, SplitMethod::Middle);
        let world_bound = root.bounds();

        apply_permutation(&mut prims, &mut prim_ordering);

        let mut flat_nodes = Vec::with_capacity(prims.len());
        let tree_len = Self::flatten_tree(&mut flat_nodes, root);
        assert_eq!(flat_nodes.len(), tree_len);

        Bvh { prims, bounds: world_bound, nodes: flat_nodes }
    }

    pub fn bounds(&self) -> Bounds3f {
        self.bounds
    }

    pub fn primitives(&self) -> &[P] {
        &self.prims
    }

    fn recursive_build<'a>(
        arena: &'a Bump,
        prim_info: &mut [PrimInfo],
        prim_ordering: &mut Vec<isize>,
        split_method: SplitMethod,
    ) -> &'a BuildNode<'a> {
        let (node_bounds, centroid_bounds) =
            prim_info.iter().fold((Bounds3f::empty(), Bounds3f::empty()), |(nb, cb), prim| {
                (nb.join(&prim.bounds), cb.join_point(&prim.centroid))
            });

        let n_prims = prim_info.len();

        if n_prims <= MAX_PRIMS_IN_NODE && (n_prims == 1 || centroid_bounds.is_point()) {
            return Self::make_leaf(arena, prim_info, prim_ordering, node_bounds);
        }
        if centroid_bounds.is_point() {
            // Can't split a degenerate range; fall back to one oversized leaf
            // rather than recursing forever.
            return Self::make_leaf(arena, prim_info, prim_ordering, node_bounds);
        }

        let ax = centroid_bounds.maximum_extent() as usize;

        let (part1, part2) = match split_method {
            SplitMethod::Middle => {
                let midpoint = (centroid_bounds.min[ax] + centroid_bounds.max[ax]) / 2.0;
                let (part1, part2) = partition(prim_info, |prim| prim.centroid[ax] < midpoint);
                if part1.is_empty() || part2.is_empty() {
                    Self::partition_equal_counts(prim_info, ax)
                } else {
                    (part1, part2)
                }
            }
            SplitMethod::EqualCounts => Self::partition_equal_counts(prim_info, ax),
        };

        if n_prims <= MAX_PRIMS_IN_NODE && (part1.is_empty() || part2.is_empty()) {
            return Self::make_leaf(arena, prim_info, prim_ordering, node_bounds);
        }

        let child1 = Self::recursive_build(arena, part1, prim_ordering, split_method);
        let child2 = Self::recursive_build(arena, part2, prim_ordering, split_method);

        arena.alloc(BuildNode::new_interior([child1, child2], ax as u8))
    }

    fn make_leaf<'a>(
        arena: &'a Bump,
        prim_info: &[PrimInfo],
        prim_ordering: &mut Vec<isize>,
        node_bounds: Bounds3f,
    ) -> &'a BuildNode<'a> {
        let first_prim_idx = prim_ordering.len();
        for prim in prim_info {
            prim_ordering.push(prim.prim_id as isize);
        }
        arena.alloc(BuildNode::new_leaf(first_prim_idx as u32, prim_info.len() as u16, node_bounds))
    }

    fn partition_equal_counts(prim_info: &mut [PrimInfo], ax: usize) -> (&mut [PrimInfo], &mut [PrimInfo]) {
        let mid = prim_info.len() / 2;
        prim_info.select_nth_unstable_by(mid, |a, b| a.centroid[ax].partial_cmp(&b.centroid[ax]).unwrap());
        prim_info.split_at_mut(mid)
    }

    fn flatten_tree(flat_nodes: &mut Vec<LinearBvhNode>, node: &BuildNode) -> usize {
        match *node {
            BuildNode::Leaf { bounds, first_prim_idx, n_prims } => {
                flat_nodes.push(LinearBvhNode::new_leaf(bounds, first_prim_idx, n_prims));
                1
            }
            BuildNode::Interior { bounds, children, split_axis } => {
                flat_nodes.push(LinearBvhNode::new_interior(bounds, 0, split_axis));
                let my_idx = flat_nodes.len() - 1;
                let first_len = Self::flatten_tree(flat_nodes, children[0]);
                let second_idx = my_idx + first_len + 1;
                if let LinearNodeKind::Interior { second_child_idx, .. } = &mut flat_nodes[my_idx].kind {
                    *second_child_idx = second_idx as u32;
                } else {
                    unreachable!()
                }
                let second_len = Self::flatten_tree(flat_nodes, children[1]);
                first_len + second_len + 1
            }
        }
    }

    /// Nearest hit on `[t_min, t_max]`, tightening the far bound after every
    /// successful leaf hit.
    pub fn intersect<'p>(&'p self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Interaction<'p>> {
        if self.nodes.is_empty() {
            return None;
        }

        let dir_is_neg = [ray.dir.x < 0.0, ray.dir.y < 0.0, ray.dir.z < 0.0];
        let mut nodes_to_visit = ArrayVec::<[usize; 64]>::new();
        let mut current = 0usize;
        let mut closest_t = t_max;
        let mut hit = None;

        loop {
            let node = &self.nodes[current];

            if node.bounds.intersect_test(ray, t_min, closest_t).is_some() {
                match node.kind {
                    LinearNodeKind::Leaf { first_prim_idx, n_prims } => {
                        for i in 0..n_prims as usize {
                            let prim = self.prims[first_prim_idx as usize + i].as_ref();
                            if let Some(isect) = prim.intersect(ray, t_min, closest_t) {
                                closest_t = isect.t;
                                hit = Some(isect);
                            }
                        }
                        match nodes_to_visit.pop() {
                            Some(next) => current = next,
                            None => break,
                        }
                    }
                    LinearNodeKind::Interior { second_child_idx, split_axis } => {
                        if dir_is_neg[split_axis as usize] {
                            nodes_to_visit.push(current + 1);
                            current = second_child_idx as usize;
                        } else {
                            nodes_to_visit.push(second_child_idx as usize);
                            current += 1;
                        }
                    }
                }
            } else {
                match nodes_to_visit.pop() {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }

        hit
    }

    /// Any-hit predicate on `[t_min, t_max]`; returns as soon as an
    /// occluder is found.
    pub fn occlude(&self, ray: &Ray, t_min: Float, t_max: Float) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let dir_is_neg = [ray.dir.x < 0.0, ray.dir.y < 0.0, ray.dir.z < 0.0];
        let mut nodes_to_visit = ArrayVec::<[usize; 64]>::new();
        let mut current = 0usize;

        loop {
            let node = &self.nodes[current];

            if node.bounds.intersect_test(ray, t_min, t_max).is_some() {
                match node.kind {
                    LinearNodeKind::Leaf { first_prim_idx, n_prims } => {
                        for i in 0..n_prims as usize {
                            let prim = self.prims[first_prim_idx as usize + i].as_ref();
                            if prim.occlude(ray, t_min, t_max).is_some() {
                                return true;
                            }
                        }
                        match nodes_to_visit.pop() {
                            Some(next) => current = next,
                            None => break,
                        }
                    }
                    LinearNodeKind::Interior { second_child_idx, split_axis } => {
                        if dir_is_neg[split_axis as usize] {
                            nodes_to_visit.push(current + 1);
                            current = second_child_idx as usize;
                        } else {
                            nodes_to_visit.push(second_child_idx as usize);
                            current += 1;
                        }
                    }
                }
            } else {
                match nodes_to_visit.pop() {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }

        false
    }
}

/// 32-byte linear node: a `Bounds3f` (24 bytes) plus a 4-byte tagged union
/// of leaf/interior payload.
#[derive(Copy, Clone, Debug, PartialEq)]
struct LinearBvhNode {
    bounds: Bounds3f,
    kind: LinearNodeKind,
}

impl LinearBvhNode {
    fn new_leaf(bounds: Bounds3f, first_prim_idx: u32, n_prims: u16) -> Self {
        Self { bounds, kind: LinearNodeKind::Leaf { first_prim_idx, n_prims } }
    }

    fn new_interior(bounds: Bounds3f, second_child_idx: u32, split_axis: u8) -> Self {
        Self { bounds, kind: LinearNodeKind::Interior { second_child_idx, split_axis } }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum LinearNodeKind {
    Leaf { first_prim_idx: u32, n_prims: u16 },
    Interior { second_child_idx: u32, split_axis: u8 },
}

struct PrimInfo {
    prim_id: usize,
    bounds: Bounds3f,
    centroid: Point3f,
}

impl PrimInfo {
    fn new(prim_id: usize, bounds: Bounds3f) -> Self {
        Self { prim_id, bounds, centroid: bounds.centroid() }
    }
}

enum BuildNode<'a> {
    Leaf { bounds: Bounds3f, first_prim_idx: u32, n_prims: u16 },
    Interior { bounds: Bounds3f, children: [&'a BuildNode<'a>; 2], split_axis: u8 },
}

impl<'a> BuildNode<'a> {
    fn new_leaf(first_prim_idx: u32, n_prims: u16, bounds: Bounds3f) -> Self {
        BuildNode::Leaf { first_prim_idx, n_prims, bounds }
    }

    fn new_interior(children: [&'a BuildNode<'a>; 2], split_axis: u8) -> Self {
        let bounds = children[0].bounds().join(&children[1].bounds());
        BuildNode::Interior { children, bounds, split_axis }
    }

    fn bounds(&self) -> Bounds3f {
        match self {
            BuildNode::Leaf { bounds, .. } => *bounds,
            BuildNode::Interior { bounds, .. } => *bounds,
        }
    }
}

/// Applies `indices[i] -> final position i` to `items` in place, following
/// cycles and marking visited slots by negating (`-1 - x`) so the loop
/// terminates even on indices that are their own cycle start.
fn apply_permutation<T>(items: &mut [T], indices: &mut [isize]) {
    assert_eq!(items.len(), indices.len());

    for i in 0..items.len() {
        if indices[i] < 0 {
            continue;
        }
        let mut pos = i;
        while indices[pos] != i as isize {
            let target = indices[pos] as usize;
            items.swap(pos, target);
            indices[pos] = -1 - indices[pos];
            pos = target;
        }
        indices[pos] = -1 - indices[pos];
    }
}
