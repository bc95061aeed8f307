use std::fmt::Debug;
use std::hash::Hash;

/// An event emitted by an [`crate::Aggregate`].
///
/// Every event belongs to a kind, which is the key handlers subscribe on.
pub trait Event: Debug {
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}
