use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op {
    /// Insert the key into the tree.
    Insert(i64),
    /// Remove one occurrence of the key from the tree.
    Remove(i64),
    /// Walk the tree in order.
    InOrder,
}

impl Arbitrary for Op {
    /// Tells quickcheck how to randomly choose an operation.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(small_key(g)),
            1 => Op::Remove(small_key(g)),
            2 => Op::InOrder,
            _ => unreachable!(),
        }
    }
}

/// Keys come from a narrow band so removes collide with live keys and
/// duplicate inserts actually happen.
fn small_key(g: &mut Gen) -> i64 {
    i64::from(i8::arbitrary(g))
}
