//! Text outline of a tree for terminal display.

use termtree::Tree;

use crate::domain::{Identity, TreeStore};

pub trait ToOutline {
    fn to_outline(&self) -> Tree<String>;
}

impl ToOutline for TreeStore {
    fn to_outline(&self) -> Tree<String> {
        fn build(store: &TreeStore, id: &Identity) -> Tree<String> {
            let label = store
                .node(id)
                .map(|n| format!("{} [{}]", n.label, n.id))
                .unwrap_or_else(|| id.to_string());
            let leaves: Vec<_> = store
                .children_of(id)
                .into_iter()
                .map(|child| build(store, child))
                .collect();
            Tree::new(label).with_leaves(leaves)
        }

        match self.root() {
            Some(root) => build(self, &root.id),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::chart_of_accounts;

    #[test]
    fn given_seed_when_rendering_outline_then_lists_labels_in_child_order() {
        let rendered = chart_of_accounts().unwrap().to_outline().to_string();
        let first = rendered.lines().next().unwrap();
        assert_eq!(first, "Main accounts [root]");
        let assets = rendered.find("Current assets").unwrap();
        let expenses = rendered.find("Expenses").unwrap();
        assert!(assets < expenses);
        assert_eq!(rendered.lines().count(), 20);
    }

    #[test]
    fn given_empty_store_when_rendering_outline_then_says_empty() {
        assert_eq!(TreeStore::new().to_outline().to_string().trim(), "Empty tree");
    }
}
