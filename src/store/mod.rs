use crate::{Aggregate, AggregateState};

pub use codec::{FORMAT_HEADER_LEN, MAX_SNAPSHOT_BYTES};
pub use file::FileStore;
pub use schema::Schema;

mod codec;
mod file;
mod schema;

/// A SnapshotStore is responsible for persisting the whole state of an aggregate instance, and
/// loading it back.
///
/// Only the state is persisted: event handlers are transient and never part of a snapshot.
pub trait SnapshotStore {
    type Aggregate: Aggregate;
    type Error: std::error::Error;

    /// Persists every field of the given aggregate state, overwriting any previous snapshot.
    fn save(&self, aggregate_state: &AggregateState<<Self::Aggregate as Aggregate>::State>) -> Result<(), Self::Error>;

    /// Loads the last persisted aggregate state.
    ///
    /// Domain invariants are checked again by the caller, so a store may return any state its
    /// format can express.
    fn load(&self) -> Result<AggregateState<<Self::Aggregate as Aggregate>::State>, Self::Error>;
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The snapshot could not be created, written, found or read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The bytes do not match the expected snapshot encoding.
    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("Snapshot too short: {0} bytes")]
    Truncated(usize),
    #[error("Unknown snapshot magic {found:?}, expected {expected:?}")]
    Magic { expected: [u8; 4], found: [u8; 4] },
    #[error("Unsupported snapshot version {found}, expected {expected}")]
    Version { expected: u16, found: u16 },
    #[error(transparent)]
    Codec(#[from] bincode::Error),
    #[error("Invalid date: {0} days from the common era")]
    InvalidDate(i32),
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
