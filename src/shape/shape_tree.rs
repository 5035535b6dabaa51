//! The geometry of a body: a tree of leaf primitives stored in an arena.

use crate::math::{Isometry, Real};
use crate::shape::{Shape, ShapeInstance, ShapeType};
use smallvec::SmallVec;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
enum NodeKind {
    Leaf { shape: Shape, leaf_index: u32 },
    Compound { children: Vec<u32> },
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
struct ShapeNode {
    parent: Option<u32>,
    // Relative to the parent node.
    local_transform: Isometry<Real>,
    kind: NodeKind,
}

/// A (possibly nested) compound of leaf primitives.
///
/// Nodes live in a flat arena and reference each other by index. The root is
/// always the node `0`. Every leaf gets a stable index, assigned in depth-first
/// order, which is what [`SubmersionTracker`](crate::submersion::SubmersionTracker)
/// uses to remember which leaves already contributed to the current pass.
///
/// One [`ShapeInstance`] is stored per root child (or a single one if the root is
/// itself a leaf).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeTree {
    nodes: Vec<ShapeNode>,
    instances: Vec<ShapeInstance>,
    num_leaves: usize,
}

/// A leaf primitive yielded by [`ShapeTree::leaves`].
#[derive(Copy, Clone, Debug)]
pub struct LeafShape<'a> {
    /// Depth-first index of this leaf inside its tree.
    pub leaf_index: usize,
    /// Index of the root child this leaf descends from.
    pub root_index: usize,
    /// The leaf primitive.
    pub shape: &'a Shape,
    /// The transform from the leaf's local-space to the body's local-space.
    pub relative_transform: Isometry<Real>,
    /// The narrow-phase type of the leaf.
    pub shape_type: ShapeType,
}

impl ShapeTree {
    /// A tree made of a single leaf primitive.
    pub fn leaf(shape: impl Into<Shape>) -> Self {
        Self {
            nodes: vec![ShapeNode {
                parent: None,
                local_transform: Isometry::identity(),
                kind: NodeKind::Leaf {
                    shape: shape.into(),
                    leaf_index: 0,
                },
            }],
            instances: vec![ShapeInstance::default()],
            num_leaves: 1,
        }
    }

    /// A compound of sub-trees, each placed at the given transform.
    ///
    /// The sub-trees may themselves be compounds. Their shape instances are
    /// discarded: the new tree gets one default instance per child.
    pub fn compound(children: impl IntoIterator<Item = (Isometry<Real>, ShapeTree)>) -> Self {
        let mut nodes = vec![ShapeNode {
            parent: None,
            local_transform: Isometry::identity(),
            kind: NodeKind::Compound {
                children: Vec::new(),
            },
        }];
        let mut root_children = Vec::new();

        for (pos, child) in children {
            let offset = nodes.len() as u32;
            root_children.push(offset);

            for (i, mut node) in child.nodes.into_iter().enumerate() {
                if i == 0 {
                    node.parent = Some(0);
                    node.local_transform = pos * node.local_transform;
                } else {
                    node.parent = node.parent.map(|p| p + offset);
                }

                if let NodeKind::Compound { children } = &mut node.kind {
                    children.iter_mut().for_each(|c| *c += offset);
                }

                nodes.push(node);
            }
        }

        let num_roots = root_children.len();
        nodes[0].kind = NodeKind::Compound {
            children: root_children,
        };

        let mut result = Self {
            nodes,
            instances: vec![ShapeInstance::default(); num_roots.max(1)],
            num_leaves: 0,
        };
        result.renumber_leaves();
        result
    }

    fn renumber_leaves(&mut self) {
        let mut next = 0u32;
        let mut stack = vec![0u32];

        while let Some(id) = stack.pop() {
            match &mut self.nodes[id as usize].kind {
                NodeKind::Leaf { leaf_index, .. } => {
                    *leaf_index = next;
                    next += 1;
                }
                NodeKind::Compound { children } => stack.extend(children.iter().rev()),
            }
        }

        self.num_leaves = next as usize;
    }

    /// Sets the shape instance of the `root_index`-th root child.
    ///
    /// Out-of-bounds indices are ignored.
    pub fn with_instance(mut self, root_index: usize, instance: ShapeInstance) -> Self {
        if let Some(slot) = self.instances.get_mut(root_index) {
            *slot = instance;
        }
        self
    }

    /// Sets the same shape instance on every root child.
    pub fn with_all_instances(mut self, instance: ShapeInstance) -> Self {
        self.instances.iter_mut().for_each(|slot| *slot = instance);
        self
    }

    /// The shape instances of this tree, one per root child.
    pub fn instances(&self) -> &[ShapeInstance] {
        &self.instances
    }

    /// The shape instance applicable to the given leaf.
    ///
    /// Falls back to the first instance if the leaf's root has none.
    pub fn instance_for(&self, leaf: &LeafShape) -> ShapeInstance {
        self.instances
            .get(leaf.root_index)
            .or_else(|| self.instances.first())
            .copied()
            .unwrap_or_default()
    }

    /// The number of leaf primitives in this tree.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Is this tree free of any leaf primitive?
    pub fn is_empty(&self) -> bool {
        self.num_leaves == 0
    }

    /// A depth-first iterator through all the leaves of this tree.
    pub fn leaves(&self) -> Leaves<'_> {
        let mut stack = SmallVec::new();
        stack.push((0, 0, Isometry::identity()));
        Leaves { tree: self, stack }
    }
}

/// Depth-first iterator through the leaves of a [`ShapeTree`].
pub struct Leaves<'a> {
    tree: &'a ShapeTree,
    // (node id, root index, transform of the parent node).
    stack: SmallVec<[(u32, usize, Isometry<Real>); 8]>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = LeafShape<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, root_index, parent_pos)) = self.stack.pop() {
            let node = &self.tree.nodes[id as usize];
            let pos = parent_pos * node.local_transform;

            match &node.kind {
                NodeKind::Leaf { shape, leaf_index } => {
                    return Some(LeafShape {
                        leaf_index: *leaf_index as usize,
                        root_index,
                        shape,
                        relative_transform: pos,
                        shape_type: shape.shape_type(),
                    });
                }
                NodeKind::Compound { children } => {
                    for (k, child) in children.iter().enumerate().rev() {
                        let child_root = if id == 0 { k } else { root_index };
                        self.stack.push((*child, child_root, pos));
                    }
                }
            }
        }

        None
    }
}
