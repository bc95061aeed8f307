use crate::event::Event;
use crate::state::SequenceNumberOverflow;

/// The Aggregate trait is responsible for validating commands, mapping commands to events, and
/// applying events onto the state.
///
/// It holds no data itself: the state lives in an [`crate::AggregateState`] owned by an
/// [`crate::AggregateManager`].
pub trait Aggregate {
    /// The name of the aggregate, used in tracing spans.
    const NAME: &'static str;

    type State;
    type Command;
    type Event: Event;
    /// Also carries the [`SequenceNumberOverflow`] raised by the manager when the aggregate has
    /// applied as many events as its sequence number can count.
    type Error: std::error::Error + From<SequenceNumberOverflow>;

    /// Validates the command against the current state and produces the events it results in.
    ///
    /// Returning an empty vector is valid: the command was accepted but nothing happened. If an
    /// error is returned no event is applied and no handler is notified.
    fn handle_command(state: &Self::State, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Updates the aggregate state using the new event.
    ///
    /// This must never fail: every event reaching this function has already been validated by
    /// [`Aggregate::handle_command`].
    fn apply_event(state: &mut Self::State, payload: &Self::Event);
}
