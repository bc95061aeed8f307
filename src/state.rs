use thiserror::Error;
use uuid::Uuid;

use crate::types::SequenceNumber;

/// Returned when applying events would push the sequence number past [`SequenceNumber::MAX`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Sequence number {current} has no room for {events} more events")]
pub struct SequenceNumberOverflow {
    pub current: SequenceNumber,
    pub events: usize,
}

/// The internal state for an Aggregate.
/// It contains:
/// - an id uniquely representing the aggregate,
/// - an incremental sequence number, counting the events applied so far,
/// - a state defined by the user of this library.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateState<S> {
    id: Uuid,
    sequence_number: SequenceNumber,
    inner: S,
}

impl<S> AggregateState<S> {
    /// Creates a new instance of an [`AggregateState`] with a fresh random id.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self::with_id(Uuid::new_v4(), inner)
    }

    /// Creates a new instance of an [`AggregateState`] with the given aggregate id.
    #[must_use]
    pub fn with_id(id: impl Into<Uuid>, inner: S) -> Self {
        Self {
            id: id.into(),
            sequence_number: 0,
            inner,
        }
    }

    /// Rebuilds an [`AggregateState`] from its persisted parts.
    ///
    /// Used by [`crate::store::Schema`] implementations when decoding a snapshot.
    #[must_use]
    pub fn restore(id: Uuid, sequence_number: SequenceNumber, inner: S) -> Self {
        Self {
            id,
            sequence_number,
            inner,
        }
    }

    /// Returns an Uuid representing the aggregate id
    pub const fn id(&self) -> &Uuid {
        &self.id
    }

    /// Returns the internal sequence number incremented by 1, or `None` once it is exhausted.
    pub const fn next_sequence_number(&self) -> Option<SequenceNumber> {
        self.sequence_number.checked_add(1)
    }

    /// Returns the current sequence number.
    pub const fn sequence_number(&self) -> &SequenceNumber {
        &self.sequence_number
    }

    /// Returns the internal state.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Consumes the aggregate state and generates an internal state.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Fails unless the sequence number can be bumped once for each of `events`.
    pub(crate) fn ensure_room_for(&self, events: usize) -> Result<(), SequenceNumberOverflow> {
        SequenceNumber::try_from(events)
            .ok()
            .and_then(|events| self.sequence_number.checked_add(events))
            .map(|_| ())
            .ok_or(SequenceNumberOverflow {
                current: self.sequence_number,
                events,
            })
    }

    /// Applies one event onto the inner state, bumping the sequence number.
    ///
    /// Callers check [`AggregateState::ensure_room_for`] first.
    pub(crate) fn apply<E>(&mut self, event: &E, apply_event: impl Fn(&mut S, &E)) {
        apply_event(&mut self.inner, event);
        self.sequence_number = self.sequence_number.saturating_add(1);
    }
}
