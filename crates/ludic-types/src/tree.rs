//! The event tree: the author-composed program.
//!
//! A tree is an ordered forest of [`EventNode`]s, each holding ordered
//! condition and action instances plus nested sub-events. The editor owns
//! creation and mutation; the code generator only reads. No node stores a
//! back-reference to its parent, so the structure is acyclic by
//! construction.

use serde::{Deserialize, Serialize};

use crate::instruction::{Expression, InstructionInstance};

// ══════════════════════════════════════════════════════════════════════════════
// Nodes
// ══════════════════════════════════════════════════════════════════════════════

/// How a node's children are emitted. One emission strategy per variant;
/// the set of emittable control constructs is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Children follow the actions inside the same condition guard, with
    /// no additional gating.
    Standard,
    /// Children are gated behind the node's own success; the else path is
    /// emitted only when present.
    Branch {
        else_events: Option<Vec<EventNode>>,
    },
    /// Children are wrapped in the target's loop construct. The count
    /// expression is hoisted and evaluated exactly once before the loop.
    Loop { count: Expression },
}

/// One event: conditions guarding actions, plus sub-events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventNode {
    pub kind: EventKind,
    pub conditions: Vec<InstructionInstance>,
    pub actions: Vec<InstructionInstance>,
    pub children: Vec<EventNode>,
}

impl EventNode {
    pub fn standard() -> Self {
        Self::with_kind(EventKind::Standard)
    }

    pub fn with_kind(kind: EventKind) -> Self {
        Self {
            kind,
            conditions: Vec::new(),
            actions: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: InstructionInstance) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_action(mut self, action: InstructionInstance) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_child(mut self, child: EventNode) -> Self {
        self.children.push(child);
        self
    }

    /// All nodes directly nested under this one, including the else path
    /// of a branch.
    pub fn nested(&self) -> impl Iterator<Item = &EventNode> {
        let else_events = match &self.kind {
            EventKind::Branch {
                else_events: Some(nodes),
            } => nodes.as_slice(),
            _ => &[],
        };
        self.children.iter().chain(else_events.iter())
    }

    fn detach_nested(&mut self, pending: &mut Vec<EventNode>) {
        pending.append(&mut self.children);
        if let EventKind::Branch {
            else_events: Some(nodes),
        } = &mut self.kind
        {
            pending.append(nodes);
        }
    }
}

/// Sub-events nest to arbitrary depth, so the derived recursive drop
/// could exhaust the stack on a hostile tree. Tear the subtree down
/// iteratively instead.
impl Drop for EventNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_nested(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_nested(&mut pending);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Tree
// ══════════════════════════════════════════════════════════════════════════════

/// An ordered forest of root events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTree {
    pub roots: Vec<EventNode>,
}

impl EventTree {
    pub fn new(roots: Vec<EventNode>) -> Self {
        Self { roots }
    }

    /// Depth-first pre-order walk yielding `(node, depth)`, roots at
    /// depth 0. Else-path nodes of a branch are visited after the
    /// branch's children, one level down.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<(&EventNode, usize)> = Vec::with_capacity(self.roots.len());
        for root in self.roots.iter().rev() {
            stack.push((root, 0));
        }
        Walk { stack }
    }

    /// Total number of nodes, else paths included.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Depth of the deepest node; 0 for an empty tree.
    pub fn max_depth(&self) -> usize {
        self.walk().map(|(_, depth)| depth + 1).max().unwrap_or(0)
    }
}

/// Iterator state for [`EventTree::walk`].
pub struct Walk<'a> {
    stack: Vec<(&'a EventNode, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a EventNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        // Reverse push so nested nodes pop in declaration order.
        let nested: Vec<&EventNode> = node.nested().collect();
        for child in nested.into_iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((node, depth))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Limits
// ══════════════════════════════════════════════════════════════════════════════

/// Safety bounds applied to a tree before generation.
///
/// Structural validity is the editor's job, but a malformed or hostile
/// project file must not drive the generator into unbounded recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeLimits {
    pub max_depth: usize,
    pub max_nodes: usize,
    /// Maximum nesting depth of a single parameter or loop-count
    /// expression tree.
    pub max_expression_depth: usize,
}

impl Default for TreeLimits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_nodes: 65_536,
            max_expression_depth: 128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Expression;

    fn leaf() -> EventNode {
        EventNode::standard()
    }

    #[test]
    fn test_walk_preorder_and_depth() {
        // root0 { a { b }, c }, root1
        let tree = EventTree::new(vec![
            EventNode::standard()
                .with_child(EventNode::standard().with_child(leaf()))
                .with_child(leaf()),
            leaf(),
        ]);
        let depths: Vec<usize> = tree.walk().map(|(_, d)| d).collect();
        assert_eq!(depths, vec![0, 1, 2, 1, 0]);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.max_depth(), 3);
    }

    #[test]
    fn test_walk_includes_else_path() {
        let branch = EventNode::with_kind(EventKind::Branch {
            else_events: Some(vec![leaf(), leaf()]),
        })
        .with_child(leaf());
        let tree = EventTree::new(vec![branch]);
        // branch, its child, then both else nodes
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn test_empty_tree() {
        let tree = EventTree::default();
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.max_depth(), 0);
        assert!(tree.walk().next().is_none());
    }

    #[test]
    fn test_deep_node_chain_drops_without_overflow() {
        let mut node = EventNode::standard();
        for _ in 0..200_000 {
            node = EventNode::standard().with_child(node);
        }
        drop(node);
    }

    #[test]
    fn test_loop_children_walked() {
        let node = EventNode::with_kind(EventKind::Loop {
            count: Expression::NumberLit(3.0),
        })
        .with_child(leaf());
        let tree = EventTree::new(vec![node]);
        assert_eq!(tree.node_count(), 2);
    }
}
