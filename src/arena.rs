//! A BST backed by a slot vector. Nodes live side by side in a `Vec`
//! and point at each other by index, so a link is plain data instead of
//! an owning pointer and rewiring during removal is a matter of writing
//! new indices. Slots vacated by removals go on a free list and are
//! handed back out by later inserts.
//!
//! # Examples
//!
//! ```
//! use ordtree::arena::Tree;
//!
//! let mut tree = Tree::with_root(50);
//!
//! tree.insert(30);
//! tree.insert(70);
//! tree.insert(70);
//!
//! // Duplicates count separately.
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![30, 50, 70, 70]);
//!
//! // One occurrence goes per remove.
//! assert!(tree.remove(70));
//! assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![30, 50, 70]);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// Index of a slot in the backing vector.
type NodeId = usize;

#[derive(Clone, Debug)]
struct Node {
    key: i64,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// One cell of the backing vector: either a live node or a free-list
/// entry pointing at the next vacant slot.
#[derive(Clone, Debug)]
enum Slot {
    Occupied(Node),
    Vacant { next_free: Option<NodeId> },
}

/// Which child link of a parent is being followed or rewritten.
#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// A mutable binary search tree storing `i64` keys in a slot vector.
///
/// The ordering contract matches [`owned::Tree`](crate::owned::Tree):
/// left subtrees hold strictly smaller keys, right subtrees hold greater
/// or equal ones, and equal keys always descend right. The same
/// operation sequence applied to both trees produces the same shape.
///
/// Storage is flat, so dropping or cloning the tree is a single `Vec`
/// operation no matter how deep the tree grew.
#[derive(Clone)]
pub struct Tree {
    slots: Vec<Slot>,
    root: Option<NodeId>,
    free_head: Option<NodeId>,
    len: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tree {
    // Keys in order; slot indices are addressing, not content.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Tree {
            slots: Vec::new(),
            root: None,
            free_head: None,
            len: 0,
        }
    }

    /// Generates a `Tree` whose root node holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::arena::Tree;
    ///
    /// let tree = Tree::with_root(50);
    /// assert_eq!(tree.len(), 1);
    /// assert!(tree.contains(50));
    /// ```
    pub fn with_root(key: i64) -> Self {
        let mut tree = Self::new();
        tree.insert(key);
        tree
    }

    /// The number of live nodes, counting duplicates separately.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no nodes are live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node and empties the free list. The backing vector
    /// keeps its capacity for the next round of inserts.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.root = None;
        self.free_head = None;
        self.len = 0;
    }

    /// Whether at least one node holds `key`.
    pub fn contains(&self, key: i64) -> bool {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.node(id);
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left,
                Ordering::Equal => return true,
                Ordering::Greater => cur = node.right,
            }
        }
        false
    }

    /// The smallest stored key, or `None` for an empty tree.
    pub fn min(&self) -> Option<i64> {
        let mut node = self.node(self.root?);
        while let Some(left) = node.left {
            node = self.node(left);
        }
        Some(node.key)
    }

    /// Inserts `key` by walking index links from the root, going left on
    /// smaller and right otherwise, and pointing the first empty link it
    /// meets at a freshly allocated slot. Every insert adds a node, so
    /// repeated keys accumulate in the right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(7);
    /// tree.insert(7);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![7, 7]);
    /// ```
    pub fn insert(&mut self, key: i64) {
        let Some(mut cur) = self.root else {
            let id = self.alloc(key);
            self.root = Some(id);
            self.len += 1;
            return;
        };

        // Descend to the node whose empty link will take the new slot.
        let (parent, side) = loop {
            let node = self.node(cur);
            let (next, side) = match key.cmp(&node.key) {
                Ordering::Less => (node.left, Side::Left),
                // Ties descend right.
                Ordering::Equal | Ordering::Greater => (node.right, Side::Right),
            };
            match next {
                Some(next) => cur = next,
                None => break (cur, side),
            }
        };

        let id = self.alloc(key);
        self.set_child(parent, side, Some(id));
        self.len += 1;
    }

    /// Removes one occurrence of `key` and reports whether anything was
    /// removed. Removing an absent key is a no-op by contract: no link
    /// or slot is touched and `false` comes back. With duplicates, the
    /// occurrence nearest the root goes first.
    ///
    /// Unlinking takes one of four shapes, decided after both child
    /// links are read and before any link is rewritten:
    ///
    /// 1. a leaf empties the link that led to it;
    /// 2. a node with one child promotes that child;
    /// 3. a node whose right child has no left child promotes that
    ///    right child, handing it the left subtree;
    /// 4. otherwise the smallest node of the right subtree is unlinked
    ///    and rebuilt in place of the removed node.
    ///
    /// Case 4 promotes the in-order successor, so the surviving keys
    /// keep their relative order. The root is rewired through the same
    /// paths, with the tree's root link standing in for a parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::arena::Tree;
    ///
    /// let mut tree = Tree::with_root(50);
    /// tree.insert(30);
    ///
    /// assert!(tree.remove(50));
    /// assert!(!tree.remove(50)); // already gone: no-op
    /// assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![30]);
    /// ```
    pub fn remove(&mut self, key: i64) -> bool {
        // Find the first node holding `key`, remembering the link that
        // leads to it. `None` stands for the root link.
        let mut parent: Option<(NodeId, Side)> = None;
        let mut cur = self.root;
        let target = loop {
            let Some(id) = cur else {
                // Search exhausted without a hit.
                return false;
            };
            let node = self.node(id);
            match key.cmp(&node.key) {
                Ordering::Less => {
                    parent = Some((id, Side::Left));
                    cur = node.left;
                }
                Ordering::Greater => {
                    parent = Some((id, Side::Right));
                    cur = node.right;
                }
                Ordering::Equal => break id,
            }
        };

        // Read both links up front so each case starts from a settled
        // picture of the neighborhood.
        let node = self.node(target);
        let (left, right) = (node.left, node.right);

        let replacement = match (left, right) {
            // Leaf: the inbound link empties.
            (None, None) => None,
            // Only child: it moves up into the vacated link.
            (Some(child), None) | (None, Some(child)) => Some(child),
            // The right child has no left child, so it is the in-order
            // successor itself. Its left link is empty by that same
            // check and takes the left subtree.
            (Some(left), Some(right)) if self.node(right).left.is_none() => {
                self.node_mut(right).left = Some(left);
                Some(right)
            }
            // Deeper successor: unlink the smallest node of the right
            // subtree, then give it both subtrees of the removed node.
            (Some(left), Some(right)) => {
                let succ = self.detach_min(right);
                let succ_node = self.node_mut(succ);
                succ_node.left = Some(left);
                succ_node.right = Some(right);
                Some(succ)
            }
        };

        self.set_link(parent, replacement);
        self.release(target);
        self.len -= 1;
        true
    }

    /// Unlinks and returns the smallest node strictly below `subtree`,
    /// pointing the vacated link at that node's right subtree.
    ///
    /// ## Panics
    ///
    /// When `subtree` has no left child. `remove` rules that out before
    /// calling, so the panic marks a caller bug rather than leaving
    /// links half rewritten.
    fn detach_min(&mut self, subtree: NodeId) -> NodeId {
        let mut parent = subtree;
        let mut min = self
            .node(subtree)
            .left
            .expect("detach_min requires a left child");
        while let Some(next) = self.node(min).left {
            parent = min;
            min = next;
        }
        let orphan = self.node_mut(min).right.take();
        self.set_child(parent, Side::Left, orphan);
        min
    }

    /// Iterates keys in non-decreasing order without touching the tree.
    /// A fresh call restarts from the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [50, 30, 70] {
    ///     tree.insert(key);
    /// }
    ///
    /// assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![30, 50, 70]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_> {
        let mut iter = InOrder {
            tree: self,
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Iterates keys in pre-order: each node before either subtree,
    /// left subtree before right. Two trees with equal pre-order and
    /// equal in-order sequences have the same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::arena::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [50, 30, 70] {
    ///     tree.insert(key);
    /// }
    ///
    /// assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![50, 30, 70]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: self.root.into_iter().collect(),
            remaining: self.len,
        }
    }

    /// Places `key` in a vacant slot, reusing the free list before
    /// growing the vector. Linking the slot into the tree is the
    /// caller's job.
    fn alloc(&mut self, key: i64) -> NodeId {
        let node = Node {
            key,
            left: None,
            right: None,
        };
        if let Some(id) = self.free_head {
            match self.slots[id] {
                Slot::Vacant { next_free } => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
            }
            self.slots[id] = Slot::Occupied(node);
            id
        } else {
            self.slots.push(Slot::Occupied(node));
            self.slots.len() - 1
        }
    }

    /// Returns an unlinked node's slot to the free list.
    fn release(&mut self, id: NodeId) {
        self.slots[id] = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = Some(id);
    }

    fn node(&self, id: NodeId) -> &Node {
        match &self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("live link into a vacant slot"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("live link into a vacant slot"),
        }
    }

    fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(parent);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Rewrites the link leading into a node: a parent's child link, or
    /// the root link when `parent` is `None`.
    fn set_link(&mut self, parent: Option<(NodeId, Side)>, child: Option<NodeId>) {
        match parent {
            Some((parent, side)) => self.set_child(parent, side, child),
            None => self.root = child,
        }
    }
}

/// Lazy in-order pass over a [`Tree`], yielding keys in non-decreasing
/// order. Created by [`Tree::in_order`].
pub struct InOrder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl InOrder<'_> {
    fn push_left_spine(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.tree.node(id).left;
        }
    }
}

impl Iterator for InOrder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        let (key, right) = (node.key, node.right);
        self.push_left_spine(right);
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InOrder<'_> {}

/// Lazy pre-order pass over a [`Tree`]. Created by [`Tree::pre_order`].
pub struct PreOrder<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl Iterator for PreOrder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        let (key, left, right) = (node.key, node.left, node.right);
        // Right goes under left so the left subtree pops first.
        self.stack.extend(right);
        self.stack.extend(left);
        self.remaining -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PreOrder<'_> {}

#[cfg(test)]
impl Tree {
    /// Walks the tree asserting the search-order invariant, then audits
    /// the slot accounting: every slot is either linked into the tree or
    /// on the free list, never both, and `len` matches the live count.
    fn check_invariants(&self) {
        fn walk(
            tree: &Tree,
            id: NodeId,
            lower: Option<i64>,
            upper: Option<i64>,
            seen: &mut [bool],
        ) {
            assert!(!seen[id], "slot {} linked twice", id);
            seen[id] = true;
            let node = tree.node(id);
            if let Some(lower) = lower {
                assert!(node.key >= lower, "key {} below bound {}", node.key, lower);
            }
            if let Some(upper) = upper {
                assert!(node.key < upper, "key {} at or above bound {}", node.key, upper);
            }
            if let Some(left) = node.left {
                walk(tree, left, lower, Some(node.key), seen);
            }
            if let Some(right) = node.right {
                walk(tree, right, Some(node.key), upper, seen);
            }
        }

        let mut seen = vec![false; self.slots.len()];
        if let Some(root) = self.root {
            walk(self, root, None, None, &mut seen);
        }
        let live = seen.iter().filter(|&&s| s).count();
        assert_eq!(live, self.len, "len out of sync with reachable nodes");

        let mut free = 0;
        let mut cur = self.free_head;
        while let Some(id) = cur {
            // A revisit here means the free list cycles or overlaps the
            // tree.
            assert!(!seen[id], "slot {} linked and free at once", id);
            seen[id] = true;
            free += 1;
            cur = match self.slots[id] {
                Slot::Vacant { next_free } => next_free,
                Slot::Occupied(_) => panic!("free list points at an occupied slot"),
            };
        }
        assert_eq!(self.len + free, self.slots.len(), "slots leaked");
    }
}
