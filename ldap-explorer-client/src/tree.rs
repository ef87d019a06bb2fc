//! Lazily populated directory tree
//!
//! A node owns its children outright and holds no link back to its parent,
//! so the tree cannot contain cycles. `children == None` means "not fetched
//! yet"; `Some(vec![])` means "fetched, no children". The loaded flag is
//! derived from that, so a node cannot claim to be loaded without a child
//! list.

use serde::Serialize;

use crate::dn;

/// One node of the directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Distinguished name.
    pub dn: String,
    /// Leading RDN relative to the parent.
    pub display_name: String,
    children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// A node for `dn`, named relative to `parent_dn`, not yet loaded.
    pub fn new(dn: impl Into<String>, parent_dn: &str) -> Self {
        let dn = dn.into();
        let display_name = dn::display_name(&dn, parent_dn);
        Self {
            dn,
            display_name,
            children: None,
        }
    }

    /// The root node for a base DN; it displays the full DN.
    pub fn root(base_dn: impl Into<String>) -> Self {
        let dn = base_dn.into();
        Self {
            display_name: dn.clone(),
            dn,
            children: None,
        }
    }

    /// Whether the children have been fetched.
    pub fn is_loaded(&self) -> bool {
        self.children.is_some()
    }

    /// Fetched children; `None` until loaded.
    pub fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref()
    }

    /// Replace the children and mark the node loaded.
    pub fn set_children(&mut self, children: Vec<TreeNode>) {
        self.children = Some(children);
    }

    /// Discard the children and mark the node unloaded.
    ///
    /// Children are not cached: expanding again fetches them anew.
    pub fn collapse(&mut self) {
        self.children = None;
    }

    /// Depth-first search for `dn` (case-insensitive).
    pub fn find(&self, dn: &str) -> Option<&TreeNode> {
        if self.dn.eq_ignore_ascii_case(dn) {
            return Some(self);
        }
        self.children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find_map(|child| child.find(dn))
    }

    /// Mutable variant of [`TreeNode::find`].
    pub fn find_mut(&mut self, dn: &str) -> Option<&mut TreeNode> {
        if self.dn.eq_ignore_ascii_case(dn) {
            return Some(self);
        }
        self.children
            .as_deref_mut()
            .unwrap_or_default()
            .iter_mut()
            .find_map(|child| child.find_mut(dn))
    }

    /// Number of nodes in this subtree that are currently materialised.
    pub fn loaded_len(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(TreeNode::loaded_len)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        let mut root = TreeNode::root("dc=example,dc=com");
        let mut people = TreeNode::new("ou=people,dc=example,dc=com", "dc=example,dc=com");
        people.set_children(vec![TreeNode::new(
            "cn=alice,ou=people,dc=example,dc=com",
            "ou=people,dc=example,dc=com",
        )]);
        root.set_children(vec![
            people,
            TreeNode::new("ou=groups,dc=example,dc=com", "dc=example,dc=com"),
        ]);
        root
    }

    #[test]
    fn new_node_is_unloaded() {
        let node = TreeNode::new("ou=people,dc=example,dc=com", "dc=example,dc=com");
        assert!(!node.is_loaded());
        assert!(node.children().is_none());
        assert_eq!(node.display_name, "ou=people");
    }

    #[test]
    fn loaded_with_no_children_is_empty_not_none() {
        let mut node = TreeNode::root("dc=example,dc=com");
        node.set_children(Vec::new());
        assert!(node.is_loaded());
        assert_eq!(node.children().map(<[TreeNode]>::len), Some(0));
    }

    #[test]
    fn collapse_discards_children() {
        let mut root = sample();
        root.collapse();
        assert!(!root.is_loaded());
        assert!(root.find("ou=people,dc=example,dc=com").is_none());
    }

    #[test]
    fn find_is_case_insensitive_and_recursive() {
        let mut root = sample();
        assert!(root.find("CN=alice,OU=people,dc=example,dc=com").is_some());
        let groups = root.find_mut("ou=groups,dc=example,dc=com");
        assert!(groups.is_some_and(|n| !n.is_loaded()));
        assert_eq!(root.loaded_len(), 4);
    }
}
