//! Arena tree data structure used by the search.
//!
//! Nodes live in a contiguous `Vec` and refer to each other by [`NodeId`].
//! A parent owns its children through the arena; the parent link is a plain
//! index used for backpropagation and navigation only.

/// Index of a node inside its [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId{
    /// Position of the node in the arena. The root is always `0`.
    #[inline]
    pub fn index(self) -> usize{
        self.0
    }
}

/// A node in the tree structure
///
/// # Type Parameters
/// - `T`: The data type stored in the node
#[derive(Clone, Debug)]
pub struct Node<T>{
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: T
}

impl<T> Node<T>{
    /// Checks if this node is the root (has no parent)
    #[inline]
    pub fn is_root(&self) -> bool{
        self.parent.is_none()
    }

    /// Gets the parent node if it exists
    #[inline]
    pub fn get_parent(&self) -> Option<NodeId>{
        self.parent
    }

    /// Gets the `i`-th child, in insertion order
    #[inline]
    pub fn get_child(&self, i: usize) -> Option<NodeId>{
        self.children.get(i).copied()
    }

    /// Children in insertion order
    #[inline]
    pub fn children(&self) -> &[NodeId]{
        &self.children
    }

    /// Gets a reference to the node's data
    #[inline]
    pub fn get(&self) -> &T{
        &self.data
    }

    /// Gets a mutable reference to the node's data
    #[inline]
    pub fn get_mut(&mut self) -> &mut T{
        &mut self.data
    }
}

/// Arena holding every node of one tree.
#[derive(Clone, Debug)]
pub struct Tree<T>{
    nodes: Vec<Node<T>>
}

impl<T> Tree<T>{
    /// Creates a tree made of a single root node
    ///
    /// # Parameters
    /// - `data`: The data to store in the root node
    pub fn new_root(data: T) -> Self{
        Tree { nodes: vec![Node { parent: None, children: Vec::new(), data }] }
    }

    /// Identifier of the root node
    #[inline]
    pub fn root(&self) -> NodeId{
        NodeId(0)
    }

    /// Number of nodes in the tree (never zero)
    #[inline]
    pub fn len(&self) -> usize{
        self.nodes.len()
    }

    /// Always `false`: a tree has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool{
        self.nodes.is_empty()
    }

    /// Gets a node by identifier
    ///
    /// # Panics
    /// If `id` was not produced by this tree.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<T>{
        &self.nodes[id.0]
    }

    /// Gets a mutable node by identifier
    ///
    /// # Panics
    /// If `id` was not produced by this tree.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<T>{
        &mut self.nodes[id.0]
    }

    /// Adds a new child node after the existing children of `parent`
    ///
    /// # Parameters
    /// - `parent`: The parent node
    /// - `data`: The data for the new child
    ///
    /// # Returns
    /// Identifier of the newly created child node
    pub fn add_child(&mut self, parent: NodeId, data: T) -> NodeId{
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: Some(parent), children: Vec::new(), data });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Identifiers of every node, in creation order (root first)
    pub fn ids(&self) -> impl Iterator<Item = NodeId>{
        (0..self.nodes.len()).map(NodeId)
    }

    /// Walks from `id` up to the root, `id` included
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_{
        std::iter::successors(Some(id), move |current| self.get(*current).parent)
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize{
        self.ancestors(id).count() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_1() {
        let tree = Tree::new_root(5u32);
        let node = tree.get(tree.root());

        assert_eq!(*node.get(), 5);

        assert!(node.get_parent().is_none());
        assert!(node.is_root());
        assert!(node.get_child(0).is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_add_node_1() {
        let mut tree = Tree::new_root(6u32);
        let root = tree.root();

        let a = tree.add_child(root, 1);
        let b = tree.add_child(root, 2);
        let c = tree.add_child(root, 8);

        let root_node = tree.get(root);
        assert_eq!(root_node.children(), &[a, b, c]);
        assert_eq!(root_node.get_child(1), Some(b));
        assert!(root_node.get_child(3).is_none());

        assert_eq!(*tree.get(a).get(), 1);
        assert_eq!(*tree.get(b).get(), 2);
        assert_eq!(*tree.get(c).get(), 8);
        assert_eq!(tree.get(c).get_parent(), Some(root));
        assert!(!tree.get(c).is_root());
    }

    #[test]
    fn test_ancestors_1() {
        let mut tree = Tree::new_root(0u32);
        let a = tree.add_child(tree.root(), 1);
        let b = tree.add_child(a, 2);
        let _ = tree.add_child(a, 3);

        let path: Vec<NodeId> = tree.ancestors(b).collect();
        assert_eq!(path, vec![b, a, tree.root()]);
        assert_eq!(tree.depth(b), 2);
        assert_eq!(tree.depth(tree.root()), 0);

        let ids: Vec<usize> = tree.ids().map(NodeId::index).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_get_mut_1() {
        let mut tree = Tree::new_root(0u32);
        let a = tree.add_child(tree.root(), 1);

        *tree.get_mut(a).get_mut() += 10;

        assert_eq!(*tree.get(a).get(), 11);
    }
}
