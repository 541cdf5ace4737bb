//! Tree store: the live node and edge sets with their mutation primitives.

use std::collections::HashSet;
use std::iter;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::{Edge, Identity, Node, Position, Snapshot};

/// Node and edge sets of one rooted tree.
///
/// Both sets keep insertion order, so `children_of` and snapshots are
/// deterministic. Primitives validate their own preconditions; commands that
/// need several primitives stage them on a clone and commit at the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Fixed once the parts are validated; a node detached later is not the root.
    root: Option<Identity>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from raw parts and verify it forms a single rooted tree.
    #[instrument(level = "debug", skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> DomainResult<Self> {
        let mut store = Self::new();
        for node in nodes {
            store.insert_node(node)?;
        }
        for edge in edges {
            store.insert_edge(edge)?;
        }
        store.check_invariants()?;
        store.root = store.root().map(|n| n.id.clone());
        Ok(store)
    }

    #[instrument(level = "trace", skip(self, node), fields(id = %node.id))]
    pub fn insert_node(&mut self, node: Node) -> DomainResult<()> {
        if self.contains_node(&node.id) {
            return Err(DomainError::DuplicateIdentity(node.id));
        }
        debug!("insert node {} '{}'", node.id, node.label);
        self.nodes.push(node);
        Ok(())
    }

    #[instrument(level = "trace", skip(self, edge), fields(id = %edge.id))]
    pub fn insert_edge(&mut self, edge: Edge) -> DomainResult<()> {
        if self.contains_edge(&edge.id) {
            return Err(DomainError::DuplicateIdentity(edge.id));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(DomainError::DanglingReference {
                    edge: edge.id.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        if self.parent_of(&edge.target).is_some()
            || self.is_ancestor_or_self(&edge.target, &edge.source)
        {
            return Err(DomainError::CycleViolation {
                source_id: edge.source,
                target: edge.target,
            });
        }
        debug!("insert edge {}: {} -> {}", edge.id, edge.source, edge.target);
        self.edges.push(edge);
        Ok(())
    }

    /// Remove a leaf node. Incident edges are left to `remove_edges_touching`.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_node(&mut self, id: &Identity) -> DomainResult<Node> {
        let pos = self
            .nodes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        if self.has_child(id) {
            return Err(DomainError::NodeHasChildren(id.clone()));
        }
        debug!("remove node {}", id);
        Ok(self.nodes.remove(pos))
    }

    /// Remove a leaf together with its incoming edge.
    ///
    /// Fails before touching anything when the node is missing, has
    /// children, or is the root.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_leaf(&mut self, id: &Identity) -> DomainResult<Node> {
        if !self.contains_node(id) {
            return Err(DomainError::NotFound(id.clone()));
        }
        if self.has_child(id) {
            return Err(DomainError::NodeHasChildren(id.clone()));
        }
        if self.is_root(id) {
            return Err(DomainError::RootNotRemovable(id.clone()));
        }
        let node = self.remove_node(id)?;
        self.remove_edges_touching(id);
        Ok(node)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn remove_edge(&mut self, id: &Identity) -> DomainResult<Edge> {
        let pos = self
            .edges
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        debug!("remove edge {}", id);
        Ok(self.edges.remove(pos))
    }

    /// Remove every edge that has `id` as source or target. Returns the count.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_edges_touching(&mut self, id: &Identity) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| &e.source != id && &e.target != id);
        before - self.edges.len()
    }

    /// Move a node without touching the edge set.
    pub fn set_position(&mut self, id: &Identity, position: Position) -> DomainResult<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        node.position = position;
        Ok(())
    }

    pub fn has_child(&self, id: &Identity) -> bool {
        self.edges.iter().any(|e| &e.source == id)
    }

    /// Targets of all edges leaving `id`, in edge insertion order.
    pub fn children_of(&self, id: &Identity) -> Vec<&Identity> {
        self.edges
            .iter()
            .filter(|e| &e.source == id)
            .map(|e| &e.target)
            .collect()
    }

    pub fn parent_of(&self, id: &Identity) -> Option<&Identity> {
        self.edges.iter().find(|e| &e.target == id).map(|e| &e.source)
    }

    pub fn node(&self, id: &Identity) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains_node(&self, id: &Identity) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, id: &Identity) -> bool {
        self.edges.iter().any(|e| &e.id == id)
    }

    /// The root recorded by `from_parts`, else the first node without an
    /// incoming edge.
    pub fn root(&self) -> Option<&Node> {
        match &self.root {
            Some(id) => self.node(id),
            None => self.nodes.iter().find(|n| self.parent_of(&n.id).is_none()),
        }
    }

    pub fn is_root(&self, id: &Identity) -> bool {
        self.root().is_some_and(|n| &n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Verify the tree invariant: one root, single parentage, every node reachable.
    pub fn check_invariants(&self) -> DomainResult<()> {
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.contains_node(endpoint) {
                    return Err(DomainError::DanglingReference {
                        edge: edge.id.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }

        let counts = self.edges.iter().counts_by(|e| &e.target);
        if let Some(extra) = self.edges.iter().find(|e| counts[&e.target] > 1) {
            return Err(DomainError::CycleViolation {
                source_id: extra.source.clone(),
                target: extra.target.clone(),
            });
        }

        let roots = self.nodes.iter().filter(|n| !counts.contains_key(&n.id)).count();
        if roots != 1 {
            return Err(DomainError::NotATree { roots });
        }

        let reachable = self.descendants_or_self(self.root().map(|n| &n.id));
        if let Some(stray) = self.edges.iter().find(|e| !reachable.contains(&e.target)) {
            return Err(DomainError::CycleViolation {
                source_id: stray.source.clone(),
                target: stray.target.clone(),
            });
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, candidate: &Identity, of: &Identity) -> bool {
        iter::successors(Some(of), |id| self.parent_of(id))
            .take(self.nodes.len() + 1)
            .any(|id| id == candidate)
    }

    fn descendants_or_self<'a>(&'a self, start: Option<&'a Identity>) -> HashSet<&'a Identity> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&Identity> = start.into_iter().collect();
        while let Some(current) = stack.pop() {
            if seen.insert(current) {
                stack.extend(self.children_of(current));
            }
        }
        seen
    }
}
