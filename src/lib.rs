//! Mutable Binary Search Trees (BSTs) over `i64` keys, in two memory
//! layouts sharing one API.
//!
//! ## Binary Search Tree
//!
//! A BST stores keys so that, for every `Node`, all keys in its left
//! subtree are strictly less than its own key and all keys in its right
//! subtree are greater than or equal to it. Equal keys are deliberately
//! routed right: inserting a key twice stores it twice, and the tree
//! behaves as an ordered multiset.
//!
//! The payoff of the invariant is `O(height)` lookup, insertion, and
//! removal, plus sorted iteration for free by visiting the left subtree,
//! then the node, then the right subtree. Nothing here rebalances, so the
//! height depends entirely on the insertion order (sorted input degrades
//! to a linked list).
//!
//! ## Representations
//!
//! * [`owned::Tree`] wires nodes together through owned children. The
//!   tree owns the root, every node owns its subtrees, and removal
//!   transfers ownership through the splice.
//! * [`arena::Tree`] keeps nodes in one slot vector linked by indices,
//!   with a free list recycling removed slots. Splicing rewrites indices
//!   instead of moving nodes, which suits deletion-heavy workloads.
//!
//! The two produce identical shapes for identical operation sequences.
//!
//! Reads (`contains`, `min`, the traversals) take `&self` and writes take
//! `&mut self`, so the exclusive-writer/shared-reader contract is enforced
//! by the borrow checker rather than by documentation.
//!
//! # Examples
//!
//! ```
//! use ordtree::owned::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [50, 30, 70, 20, 40] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.in_order().collect::<Vec<_>>(), vec![20, 30, 40, 50, 70]);
//!
//! tree.remove(30);
//! assert!(!tree.contains(30));
//! ```

#![deny(missing_docs)]

pub mod arena;
pub mod owned;

#[cfg(test)]
mod test;
