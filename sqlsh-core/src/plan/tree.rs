//! Plan tree reconstruction.
//!
//! Nodes live in an arena addressed by [`NodeId`]. A plan index reached from
//! several parents (duplicated children under `Serialize Result`) resolves to
//! the same arena slot.

use std::collections::HashMap;

use super::types::PlanNode;
use crate::error::{CoreError, CoreResult};

/// Arena slot of a tree node
pub type NodeId = usize;

/// Edge from a tree node to one of its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub link_type: String,
    pub child: NodeId,
}

#[derive(Debug, Clone)]
pub struct TreeNode<'p> {
    pub plan_node: &'p PlanNode,
    pub children: Vec<Link>,
}

impl TreeNode<'_> {
    pub fn is_visible(&self) -> bool {
        self.plan_node.is_visible()
    }

    pub fn is_root(&self) -> bool {
        self.plan_node.is_root()
    }
}

/// Query plan tree borrowed from a plan node list
#[derive(Debug)]
pub struct PlanTree<'p> {
    by_index: HashMap<i32, &'p PlanNode>,
    arena: Vec<TreeNode<'p>>,
    slots: HashMap<i32, NodeId>,
}

impl<'p> PlanTree<'p> {
    /// Arena slot of the root node
    pub const ROOT: NodeId = 0;

    /// Build the tree rooted at plan node 0.
    ///
    /// An empty node list gives an empty tree. A missing root or a child link
    /// to an unknown index is an error.
    pub fn build(plan_nodes: &'p [PlanNode]) -> CoreResult<Self> {
        let mut tree = Self {
            by_index: plan_nodes.iter().map(|node| (node.index, node)).collect(),
            arena: Vec::with_capacity(plan_nodes.len()),
            slots: HashMap::new(),
        };

        if plan_nodes.is_empty() {
            return Ok(tree);
        }

        let root = tree.lookup(0).ok_or(CoreError::MissingRoot)?;
        tree.resolve(root)?;

        tracing::debug!(
            plan_nodes = plan_nodes.len(),
            tree_nodes = tree.arena.len(),
            "built query plan tree"
        );
        Ok(tree)
    }

    fn insert(&mut self, plan_node: &'p PlanNode) -> NodeId {
        let id = self.arena.len();
        self.arena.push(TreeNode {
            plan_node,
            children: Vec::new(),
        });
        self.slots.insert(plan_node.index, id);
        id
    }

    fn resolve(&mut self, root: &'p PlanNode) -> CoreResult<()> {
        let root_id = self.insert(root);
        let mut pending = vec![root_id];

        while let Some(id) = pending.pop() {
            let plan_node = self.arena[id].plan_node;
            let mut children = Vec::with_capacity(plan_node.child_links.len());

            for (i, child_link) in plan_node.child_links.iter().enumerate() {
                let child = self.lookup(child_link.child_index).ok_or(
                    CoreError::DanglingChildLink {
                        parent: plan_node.index,
                        child: child_link.child_index,
                    },
                )?;
                let child_id = match self.slots.get(&child.index) {
                    Some(&existing) => existing,
                    None => {
                        let inserted = self.insert(child);
                        pending.push(inserted);
                        inserted
                    }
                };

                // The input side of [Distributed] (Cross|Outer) Apply is often unlabeled
                let link_type = if child_link.link_type.is_empty()
                    && i == 0
                    && plan_node.display_name.ends_with("Apply")
                {
                    "Input".to_string()
                } else {
                    child_link.link_type.clone()
                };

                children.push(Link {
                    link_type,
                    child: child_id,
                });
            }

            self.arena[id].children = children;
        }

        Ok(())
    }

    /// Plan node by its plan index, whether or not it is reachable from the root
    pub fn lookup(&self, index: i32) -> Option<&'p PlanNode> {
        self.by_index.get(&index).copied()
    }

    pub fn root(&self) -> Option<&TreeNode<'p>> {
        self.arena.get(Self::ROOT)
    }

    pub fn node(&self, id: NodeId) -> &TreeNode<'p> {
        &self.arena[id]
    }

    /// Number of plan nodes reachable from the root
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}
