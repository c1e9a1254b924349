//! A mutable BST built on exclusive ownership. Every node owns its
//! children outright and the tree owns the root, so removal is a matter
//! of transferring subtrees through the splice rather than juggling
//! parent pointers.
//!
//! # Examples
//!
//! ```
//! use ordtree::owned::Tree;
//!
//! let mut tree = Tree::new();
//!
//! tree.insert(50);
//! tree.insert(30);
//! tree.insert(70);
//!
//! assert!(tree.contains(30));
//!
//! // Removing a key splices its node out.
//! assert!(tree.remove(30));
//!
//! // Removing a key that is not there is a no-op by contract.
//! assert!(!tree.remove(30));
//!
//! assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![50, 70]);
//! ```

use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Debug)]
struct Node {
    key: i64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn boxed(key: i64) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
        })
    }
}

/// A mutable binary search tree storing `i64` keys.
///
/// For every node, keys in its left subtree are strictly less than the
/// node's key and keys in its right subtree are greater than or equal to
/// it. Equal keys always descend right, so the tree is an ordered
/// multiset: inserting a key twice stores it twice.
#[derive(Clone)]
pub struct Tree {
    root: Option<Box<Node>>,
    len: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        // Detach children before each node drops so a degenerate chain
        // cannot recurse through every `Box` at once.
        let mut pending = Vec::new();
        pending.extend(self.root.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Tree { root: None, len: 0 }
    }

    /// Generates a `Tree` with a single root node holding `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
    ///
    /// let tree = Tree::with_root(50);
    /// assert_eq!(tree.len(), 1);
    /// assert!(tree.contains(50));
    /// ```
    pub fn with_root(key: i64) -> Self {
        Tree {
            root: Some(Node::boxed(key)),
            len: 1,
        }
    }

    /// The number of stored keys, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when the tree stores no keys.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every key. The tree stays usable afterwards.
    pub fn clear(&mut self) {
        // Going through `Tree::drop` keeps the unlink iterative even for
        // deep chains.
        drop(std::mem::take(self));
    }

    /// Returns `true` if `key` is present at least once.
    pub fn contains(&self, key: i64) -> bool {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => cur = node.right.as_deref(),
            }
        }
        false
    }

    /// Returns the smallest key, or `None` for an empty tree.
    pub fn min(&self) -> Option<i64> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(node.key)
    }

    /// Inserts `key`, descending left on smaller and right otherwise and
    /// attaching a new node at the first absent slot. Every call adds a
    /// node: equal keys go to the right subtree, never overwrite.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(7);
    /// tree.insert(7);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![7, 7]);
    /// ```
    pub fn insert(&mut self, key: i64) {
        let mut cur = &mut self.root;
        while let Some(node) = cur {
            cur = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                // Ties descend right: equal keys live in the right subtree.
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
        *cur = Some(Node::boxed(key));
        self.len += 1;
    }

    /// Removes one occurrence of `key` and reports whether anything was
    /// removed. Removing an absent key is a no-op by contract, not an
    /// error: the tree is left untouched and `false` comes back.
    ///
    /// With duplicates present, the occurrence removed is the first one
    /// met on the descent from the root. A node with two children is
    /// replaced by its in-order successor, the smallest key of its right
    /// subtree, so the remaining keys keep their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(50);
    /// tree.insert(30);
    ///
    /// assert!(tree.remove(30));
    /// assert!(!tree.remove(30)); // already gone: no-op
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove(&mut self, key: i64) -> bool {
        let (root, removed) = Self::remove_from(self.root.take(), key);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Descends to the first node holding `key`, splices it out, and
    /// returns the rebuilt link plus whether a node was removed.
    fn remove_from(link: Option<Box<Node>>, key: i64) -> (Option<Box<Node>>, bool) {
        let Some(mut node) = link else {
            // Search exhausted: the key was never here.
            return (None, false);
        };
        match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, removed) = Self::remove_from(node.left.take(), key);
                node.left = left;
                (Some(node), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_from(node.right.take(), key);
                node.right = right;
                (Some(node), removed)
            }
            Ordering::Equal => (Self::splice(node), true),
        }
    }

    /// Detaches `node` and returns the subtree that takes its place. One
    /// of four shapes applies: leaf, single child, successor adjacent
    /// (the right child has no left child), successor deeper.
    fn splice(mut node: Box<Node>) -> Option<Box<Node>> {
        match (node.left.take(), node.right.take()) {
            // A leaf leaves an empty link behind.
            (None, None) => None,
            // An only child promotes into the vacated position.
            (Some(child), None) | (None, Some(child)) => Some(child),
            // The right child has no left subtree, so it is itself the
            // in-order successor. Its left slot is vacant by that same
            // check and takes the left subtree.
            (Some(left), Some(mut right)) if right.left.is_none() => {
                right.left = Some(left);
                Some(right)
            }
            // The successor sits deeper: unlink the smallest node of the
            // right subtree and rebuild it in the vacated position with
            // both original subtrees attached.
            (Some(left), Some(mut right)) => {
                let mut succ = Self::detach_min(&mut right);
                succ.left = Some(left);
                succ.right = Some(right);
                Some(succ)
            }
        }
    }

    /// Unlinks and returns the smallest node strictly below `node`,
    /// attaching that node's right subtree into the gap it leaves.
    ///
    /// ## Panics
    ///
    /// When `node` has no left child. Callers check that before any link
    /// is rewritten, so reaching the panic means a caller bug, not a
    /// half-updated tree.
    fn detach_min(node: &mut Box<Node>) -> Box<Node> {
        let left = node
            .left
            .as_mut()
            .expect("detach_min requires a left child");
        if left.left.is_some() {
            Self::detach_min(left)
        } else {
            let mut min = node.left.take().expect("checked left above");
            node.left = min.right.take();
            min
        }
    }

    /// Iterates keys in non-decreasing order: left subtree, node, right
    /// subtree. The pass borrows the tree and allocates only its working
    /// stack. Calling this again restarts from the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
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
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Iterates keys in pre-order: node, left subtree, right subtree.
    /// Pre-order exposes the exact shape of the tree, which sorted
    /// in-order output deliberately hides.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::owned::Tree;
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
            stack: self.root.as_deref().into_iter().collect(),
            remaining: self.len,
        }
    }
}

/// Lazy in-order pass over a [`Tree`], yielding keys in non-decreasing
/// order. Created by [`Tree::in_order`].
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> InOrder<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl Iterator for InOrder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InOrder<'_> {}

/// Lazy pre-order pass over a [`Tree`]. Created by [`Tree::pre_order`].
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl Iterator for PreOrder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let node = self.stack.pop()?;
        // Right goes under left so the left subtree pops first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.remaining -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PreOrder<'_> {}

#[cfg(test)]
impl Tree {
    /// Walks the whole structure asserting the search-order invariant
    /// and that `len` matches the reachable node count.
    fn check_invariants(&self) {
        fn walk(node: &Node, lower: Option<i64>, upper: Option<i64>, count: &mut usize) {
            *count += 1;
            if let Some(lower) = lower {
                assert!(node.key >= lower, "key {} below bound {}", node.key, lower);
            }
            if let Some(upper) = upper {
                assert!(node.key < upper, "key {} at or above bound {}", node.key, upper);
            }
            if let Some(left) = node.left.as_deref() {
                walk(left, lower, Some(node.key), count);
            }
            if let Some(right) = node.right.as_deref() {
                walk(right, Some(node.key), upper, count);
            }
        }

        let mut count = 0;
        if let Some(root) = self.root.as_deref() {
            walk(root, None, None, &mut count);
        }
        assert_eq!(count, self.len, "len out of sync with reachable nodes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [i64; 11] = [50, 30, 70, 20, 40, 60, 80, 38, 35, 32, 33];

    fn tree_of(keys: &[i64]) -> Tree {
        let mut tree = Tree::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn new_tree_is_empty() {
        let tree = Tree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.in_order().count(), 0);
        assert_eq!(tree.min(), None);
    }

    #[test]
    fn default_tree_is_empty() {
        assert!(Tree::default().is_empty());
    }

    #[test]
    fn with_root_holds_single_key() {
        let tree = Tree::with_root(50);
        assert_eq!(tree.len(), 1);
        assert!(tree.contains(50));
        assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![50]);
    }

    #[test]
    fn in_order_is_sorted_after_inserts() {
        let tree = tree_of(&SAMPLE);
        assert_eq!(
            tree.in_order().collect::<Vec<_>>(),
            vec![20, 30, 32, 33, 35, 38, 40, 50, 60, 70, 80]
        );
        tree.check_invariants();
    }

    #[test]
    fn pre_order_tracks_insertion_shape() {
        let tree = tree_of(&SAMPLE);
        assert_eq!(
            tree.pre_order().collect::<Vec<_>>(),
            vec![50, 30, 20, 40, 38, 35, 32, 33, 70, 60, 80]
        );
    }

    #[test]
    fn contains_distinguishes_present_and_absent() {
        let tree = tree_of(&SAMPLE);
        for key in SAMPLE {
            assert!(tree.contains(key));
        }
        assert!(!tree.contains(31));
        assert!(!tree.contains(999));
    }

    #[test]
    fn min_finds_leftmost_key() {
        let tree = tree_of(&SAMPLE);
        assert_eq!(tree.min(), Some(20));
    }

    #[test]
    fn remove_leaf_detaches_it() {
        let mut tree = tree_of(&[50, 30, 70]);
        assert!(tree.remove(30));
        assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![50, 70]);
        assert_eq!(tree.len(), 2);
        tree.check_invariants();
    }

    #[test]
    fn remove_node_with_only_left_child_promotes_it() {
        let mut tree = tree_of(&[50, 30, 20]);
        assert!(tree.remove(30));
        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![50, 20]);
        tree.check_invariants();
    }

    #[test]
    fn remove_node_with_only_right_child_promotes_it() {
        let mut tree = tree_of(&[50, 70, 80]);
        assert!(tree.remove(70));
        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![50, 80]);
        tree.check_invariants();
    }

    #[test]
    fn remove_with_adjacent_successor_promotes_right_child() {
        // 70 has no left child, so it is 50's in-order successor itself.
        let mut tree = tree_of(&[50, 30, 70, 80]);
        assert!(tree.remove(50));
        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![70, 30, 80]);
        assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![30, 70, 80]);
        tree.check_invariants();
    }

    #[test]
    fn remove_with_deeper_successor_relinks_its_subtree() {
        let mut tree = tree_of(&SAMPLE);
        // 30's successor is 32, buried at the end of the left spine under
        // 40; its right child 33 must land on 35's vacated left slot.
        assert!(tree.remove(30));
        assert_eq!(
            tree.in_order().collect::<Vec<_>>(),
            vec![20, 32, 33, 35, 38, 40, 50, 60, 70, 80]
        );
        assert_eq!(
            tree.pre_order().collect::<Vec<_>>(),
            vec![50, 32, 20, 40, 38, 35, 33, 70, 60, 80]
        );
        tree.check_invariants();
    }

    #[test]
    fn remove_root_with_two_children_updates_root_link() {
        let mut tree = tree_of(&[50, 30, 70, 60, 80]);
        assert!(tree.remove(50));
        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![60, 30, 70, 80]);
        tree.check_invariants();
    }

    #[test]
    fn remove_absent_key_is_a_noop() {
        let mut tree = tree_of(&SAMPLE);
        let before: Vec<i64> = tree.in_order().collect();

        assert!(!tree.remove(999));

        assert_eq!(tree.in_order().collect::<Vec<_>>(), before);
        assert_eq!(tree.len(), SAMPLE.len());
    }

    #[test]
    fn remove_on_empty_tree_is_a_noop() {
        let mut tree = Tree::new();
        assert!(!tree.remove(1));
        assert!(tree.is_empty());
    }

    #[test]
    fn removing_last_key_empties_the_tree() {
        let mut tree = Tree::with_root(50);
        assert!(tree.remove(50));
        assert!(tree.is_empty());
        assert_eq!(tree.in_order().count(), 0);

        // The next insert becomes the new root.
        tree.insert(7);
        assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn equal_keys_live_in_the_right_subtree() {
        let mut tree = tree_of(&[50, 50, 30]);
        assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![30, 50, 50]);
        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![50, 30, 50]);

        // Only one occurrence goes per remove: the topmost.
        assert!(tree.remove(50));
        assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![30, 50]);
        assert_eq!(tree.pre_order().collect::<Vec<_>>(), vec![50, 30]);
        assert!(tree.contains(50));
        tree.check_invariants();
    }

    #[test]
    fn size_is_conserved_across_mixed_operations() {
        let mut tree = tree_of(&SAMPLE);
        for key in [20, 40, 60] {
            assert!(tree.remove(key));
        }
        assert_eq!(tree.len(), SAMPLE.len() - 3);
        assert_eq!(tree.in_order().count(), SAMPLE.len() - 3);
        tree.check_invariants();
    }

    #[test]
    fn insert_then_remove_round_trips_the_key_set() {
        let mut tree = tree_of(&SAMPLE);
        let before: Vec<i64> = tree.in_order().collect();

        tree.insert(55);
        assert!(tree.remove(55));

        assert_eq!(tree.in_order().collect::<Vec<_>>(), before);
        tree.check_invariants();
    }

    #[test]
    fn remove_every_key_one_by_one() {
        let mut tree = tree_of(&SAMPLE);
        for key in SAMPLE {
            assert!(tree.remove(key));
            tree.check_invariants();
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn sorted_inserts_stay_ordered() {
        let mut tree = Tree::new();
        for key in 0..100 {
            tree.insert(key);
        }
        assert_eq!(
            tree.in_order().collect::<Vec<_>>(),
            (0..100).collect::<Vec<_>>()
        );
        tree.check_invariants();
    }

    #[test]
    fn traversals_are_restartable() {
        let tree = tree_of(&SAMPLE);

        let first: Vec<i64> = tree.in_order().collect();
        let second: Vec<i64> = tree.in_order().collect();
        assert_eq!(first, second);

        // A partially consumed pass leaves later passes untouched.
        let mut partial = tree.pre_order();
        partial.next();
        partial.next();
        drop(partial);
        assert_eq!(tree.pre_order().count(), tree.len());
    }

    #[test]
    fn iterators_report_exact_lengths() {
        let tree = tree_of(&SAMPLE);

        let mut in_order = tree.in_order();
        assert_eq!(in_order.len(), 11);
        in_order.next();
        assert_eq!(in_order.len(), 10);

        assert_eq!(tree.pre_order().len(), 11);
    }

    #[test]
    fn clear_empties_the_tree() {
        let mut tree = tree_of(&SAMPLE);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.in_order().count(), 0);

        tree.insert(1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn clone_is_independent() {
        let mut tree = tree_of(&[50, 30, 70]);
        let snapshot = tree.clone();

        tree.remove(30);

        assert!(!tree.contains(30));
        assert!(snapshot.contains(30));
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    #[should_panic(expected = "detach_min requires a left child")]
    fn detach_min_rejects_subtree_without_left_child() {
        let mut node = Node::boxed(50);
        Tree::detach_min(&mut node);
    }
}
