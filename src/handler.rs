use crate::Aggregate;

/// This trait is used to implement an `EventHandler`. An event handler is an observer notified,
/// synchronously and on the caller's thread, every time the aggregate emits an event of the kind
/// it subscribed to.
///
/// Every `Fn(&A::Event)` closure is an event handler.
pub trait EventHandler<A>
where
    A: Aggregate,
{
    /// Handle an event and perform an action. Handlers have no way to reject an event: by the
    /// time they run the state has already been updated.
    fn handle(&self, event: &A::Event);

    /// The name of the event handler. By default, this is the type name of the event handler,
    /// but it can be overridden to provide a custom name. This name is used as
    /// part of tracing spans, to identify the event handler being run.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<A, F> EventHandler<A> for F
where
    A: Aggregate,
    F: Fn(&A::Event),
{
    fn handle(&self, event: &A::Event) {
        self(event)
    }
}
