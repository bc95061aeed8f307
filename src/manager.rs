use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use crate::event::Event;
use crate::handler::EventHandler;
use crate::{Aggregate, AggregateState};

type Kind<A> = <<A as Aggregate>::Event as Event>::Kind;

/// The AggregateManager is responsible for coupling the Aggregate with its state and its event
/// handlers, so that the events are applied when a command is handled and every interested
/// handler is notified.
///
/// The basic APIs are:
/// 1. subscribe
/// 2. handle_command
pub struct AggregateManager<A>
where
    A: Aggregate,
{
    aggregate_state: AggregateState<A::State>,
    event_handlers: HashMap<Kind<A>, Vec<Box<dyn EventHandler<A>>>>,
}

impl<A> AggregateManager<A>
where
    A: Aggregate,
{
    /// Creates a new instance of an [`AggregateManager`] with no event handlers.
    pub fn new(aggregate_state: AggregateState<A::State>) -> Self {
        Self {
            aggregate_state,
            event_handlers: HashMap::new(),
        }
    }

    /// Appends an event handler to the ones notified for the given event kind.
    pub fn subscribe(&mut self, kind: Kind<A>, event_handler: impl EventHandler<A> + 'static) {
        self.event_handlers
            .entry(kind)
            .or_default()
            .push(Box::new(event_handler));
    }

    /// Returns how many event handlers are subscribed to the given event kind.
    pub fn handler_count(&self, kind: Kind<A>) -> usize {
        self.event_handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Validates and handles the command onto the current state, applies the resulting events and
    /// then notifies the event handlers subscribed to each event kind.
    ///
    /// If the command is rejected, or the sequence number cannot count every resulting event, the
    /// state is left untouched and no handler runs.
    pub fn handle_command(&mut self, command: A::Command) -> Result<Vec<A::Event>, A::Error> {
        let events: Vec<A::Event> = A::handle_command(self.aggregate_state.inner(), command)?;
        self.aggregate_state.ensure_room_for(events.len())?;

        for event in &events {
            self.aggregate_state.apply(event, A::apply_event);
            tracing::debug!({
                aggregate = A::NAME,
                aggregate_id = %self.aggregate_state.id(),
                sequence_number = *self.aggregate_state.sequence_number(),
                kind = ?event.kind(),
            }, "event applied");
        }

        for event in &events {
            self.notify(event);
        }

        Ok(events)
    }

    fn notify(&self, event: &A::Event) {
        let kind: Kind<A> = event.kind();
        let Some(event_handlers) = self.event_handlers.get(&kind) else {
            return;
        };

        for event_handler in event_handlers {
            let span = tracing::debug_span!(
                "card_events.event_handler",
                aggregate = A::NAME,
                aggregate_id = %self.aggregate_state.id(),
                kind = ?kind,
                event_handler = event_handler.name()
            );
            let _e = span.enter();

            event_handler.handle(event);
        }
    }

    /// Returns the current aggregate state.
    pub fn state(&self) -> &AggregateState<A::State> {
        &self.aggregate_state
    }

    /// Consumes the manager, dropping every event handler, and returns the aggregate state.
    pub fn into_state(self) -> AggregateState<A::State> {
        self.aggregate_state
    }
}

impl<A> Debug for AggregateManager<A>
where
    A: Aggregate,
    A::State: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let handlers: usize = self.event_handlers.values().map(Vec::len).sum();
        f.debug_struct("AggregateManager")
            .field("aggregate_state", &self.aggregate_state)
            .field("event_handlers", &handlers)
            .finish()
    }
}
