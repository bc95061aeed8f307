use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::FormatError;
use crate::AggregateState;

/// To decouple the persisted layout from the aggregate state type, every [`super::SnapshotStore`]
/// writes a schema record instead of the state itself.
///
/// When a state is saved it is first converted into the schema type, then encoded. When a snapshot
/// is loaded it is first decoded into the schema type and then converted back, checking every
/// invariant the state must hold.
///
/// The following must hold for every valid `state`:
///
/// ```ignore
/// assert_eq!(Schema::from_state(&state).to_state().unwrap(), state);
/// ```
pub trait Schema<S>: Serialize + DeserializeOwned {
    /// Tag written at the very beginning of the snapshot.
    const MAGIC: [u8; 4];

    /// Version of the layout. Snapshots with a different version are rejected.
    const VERSION: u16;

    /// Converts the aggregate state into the schema type.
    fn from_state(aggregate_state: &AggregateState<S>) -> Self;

    /// Converts the schema into the aggregate state, validating it.
    fn to_state(self) -> Result<AggregateState<S>, FormatError>;
}
