//! Subtree cloning with fresh identities.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::identity::IdentityGenerator;
use crate::domain::{Edge, Identity, Node, Subtree};

/// Deep-copy the subtree rooted at `root_id`.
///
/// Every cloned node and edge gets a fresh identity; edges are remapped onto
/// the cloned endpoints. Nodes come back root first, then descendants in the
/// order they are visited (depth first, children in edge order). The input
/// slices are not touched.
#[instrument(level = "debug", skip(nodes, edges, ids))]
pub fn clone_subtree(
    root_id: &Identity,
    nodes: &[Node],
    edges: &[Edge],
    ids: &mut dyn IdentityGenerator,
) -> DomainResult<Subtree> {
    let mut remap = HashMap::new();
    let subtree = clone_recursive(root_id, nodes, edges, ids, &mut remap)?;
    debug!(
        "cloned {} nodes and {} edges from {}",
        subtree.nodes.len(),
        subtree.edges.len(),
        root_id
    );
    Ok(subtree)
}

fn clone_recursive(
    node_id: &Identity,
    nodes: &[Node],
    edges: &[Edge],
    ids: &mut dyn IdentityGenerator,
    remap: &mut HashMap<Identity, Identity>,
) -> DomainResult<Subtree> {
    let original = nodes
        .iter()
        .find(|n| &n.id == node_id)
        .ok_or_else(|| DomainError::NotFound(node_id.clone()))?;

    let new_id = ids.next_id();
    remap.insert(node_id.clone(), new_id.clone());

    let mut cloned = Subtree {
        nodes: vec![Node {
            id: new_id.clone(),
            ..original.clone()
        }],
        edges: Vec::new(),
    };

    for edge in edges.iter().filter(|e| &e.source == node_id) {
        // a target already in the table was reached through another branch
        let mut child_edges = Vec::new();
        if !remap.contains_key(&edge.target) {
            let child = clone_recursive(&edge.target, nodes, edges, ids, remap)?;
            cloned.nodes.extend(child.nodes);
            child_edges = child.edges;
        }
        cloned.edges.push(Edge {
            id: ids.next_id(),
            source: new_id.clone(),
            target: remap[&edge.target].clone(),
        });
        cloned.edges.extend(child_edges);
    }

    Ok(cloned)
}
