use chrono::NaiveDate;
use uuid::Uuid;

use crate::credit_card::{CardCommand, CardError, CardEvent, CardEventKind, CardState, CreditCardAggregate, Pin};
use crate::store::SnapshotStore;
use crate::types::SequenceNumber;
use crate::{AggregateManager, AggregateState, EventHandler};

/// What happened to a [`CreditCard::spend`] call that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendOutcome {
    Spent,
    /// The amount exceeded the balance: nothing changed and no handler ran.
    InsufficientFunds,
}

/// A credit card account.
///
/// Every operation updates the state first and then notifies, in registration order, the
/// handlers subscribed to the emitted event kind. Handlers are never persisted: a card built by
/// [`CreditCard::load`] starts with none.
#[derive(Debug)]
pub struct CreditCard {
    manager: AggregateManager<CreditCardAggregate>,
}

impl CreditCard {
    /// Opens a card with a fresh id.
    pub fn new(state: CardState) -> Result<Self, CardError> {
        Self::from_aggregate_state(AggregateState::new(state))
    }

    pub fn from_aggregate_state(aggregate_state: AggregateState<CardState>) -> Result<Self, CardError> {
        aggregate_state.inner().validate()?;
        Ok(Self {
            manager: AggregateManager::new(aggregate_state),
        })
    }

    /// Adds `amount` to the balance and emits [`CardEvent::Replenished`].
    pub fn deposit(&mut self, amount: f64) -> Result<(), CardError> {
        self.manager.handle_command(CardCommand::Deposit { amount })?;
        Ok(())
    }

    /// Subtracts `amount` from the balance and emits [`CardEvent::Spent`].
    ///
    /// Spending more than the balance is not an error: it is reported as
    /// [`SpendOutcome::InsufficientFunds`] and leaves the card untouched.
    pub fn spend(&mut self, amount: f64) -> Result<SpendOutcome, CardError> {
        match self.manager.handle_command(CardCommand::Spend { amount }) {
            Ok(_) => Ok(SpendOutcome::Spent),
            Err(CardError::InsufficientFunds { requested, available }) => {
                tracing::warn!({
                    aggregate_id = %self.id(),
                    requested = requested,
                    available = available,
                }, "insufficient funds");
                Ok(SpendOutcome::InsufficientFunds)
            }
            Err(error) => Err(error),
        }
    }

    /// Emits [`CardEvent::CreditStarted`]. Only the sequence number changes.
    pub fn start_credit(&mut self) -> Result<(), CardError> {
        self.manager.handle_command(CardCommand::StartCredit)?;
        Ok(())
    }

    pub fn change_pin(&mut self, pin: Pin) -> Result<(), CardError> {
        self.manager.handle_command(CardCommand::ChangePin { pin })?;
        tracing::info!(aggregate_id = %self.id(), "pin changed");
        Ok(())
    }

    /// Emits [`CardEvent::LimitReached`] if the balance reached the credit limit. Returns whether
    /// it did.
    pub fn check_limit(&mut self) -> Result<bool, CardError> {
        let events: Vec<CardEvent> = self.manager.handle_command(CardCommand::CheckLimit)?;
        Ok(!events.is_empty())
    }

    /// Subscribes an event handler to the given event kind.
    pub fn subscribe(&mut self, kind: CardEventKind, event_handler: impl EventHandler<CreditCardAggregate> + 'static) {
        self.manager.subscribe(kind, event_handler);
    }

    pub fn on_replenished(&mut self, handler: impl Fn(f64) + 'static) {
        self.subscribe(CardEventKind::Replenished, move |event: &CardEvent| {
            if let CardEvent::Replenished { amount } = event {
                handler(*amount)
            }
        });
    }

    pub fn on_spent(&mut self, handler: impl Fn(f64) + 'static) {
        self.subscribe(CardEventKind::Spent, move |event: &CardEvent| {
            if let CardEvent::Spent { amount } = event {
                handler(*amount)
            }
        });
    }

    pub fn on_credit_started(&mut self, handler: impl Fn() + 'static) {
        self.subscribe(CardEventKind::CreditStarted, move |_: &CardEvent| handler());
    }

    /// The handler receives the balance at the time of the check.
    pub fn on_limit_reached(&mut self, handler: impl Fn(f64) + 'static) {
        self.subscribe(CardEventKind::LimitReached, move |event: &CardEvent| {
            if let CardEvent::LimitReached { balance } = event {
                handler(*balance)
            }
        });
    }

    pub fn on_pin_changed(&mut self, handler: impl Fn() + 'static) {
        self.subscribe(CardEventKind::PinChanged, move |_: &CardEvent| handler());
    }

    pub fn handler_count(&self, kind: CardEventKind) -> usize {
        self.manager.handler_count(kind)
    }

    /// Writes a snapshot of the card to the store. Handlers are not part of it.
    pub fn save<S>(&self, store: &S) -> Result<(), S::Error>
    where
        S: SnapshotStore<Aggregate = CreditCardAggregate>,
    {
        store.save(self.aggregate_state())
    }

    /// Reads a card back from the store. The returned card has no handlers.
    ///
    /// The loaded state is validated like the one given to [`CreditCard::new`].
    pub fn load<S>(store: &S) -> Result<Self, S::Error>
    where
        S: SnapshotStore<Aggregate = CreditCardAggregate>,
        S::Error: From<CardError>,
    {
        Ok(Self::from_aggregate_state(store.load()?)?)
    }

    pub fn aggregate_state(&self) -> &AggregateState<CardState> {
        self.manager.state()
    }

    pub fn state(&self) -> &CardState {
        self.aggregate_state().inner()
    }

    pub fn id(&self) -> &Uuid {
        self.aggregate_state().id()
    }

    pub fn sequence_number(&self) -> SequenceNumber {
        *self.aggregate_state().sequence_number()
    }

    pub fn card_number(&self) -> &str {
        &self.state().card_number
    }

    pub fn owner_name(&self) -> &str {
        &self.state().owner_name
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.state().expiry_date
    }

    pub fn pin(&self) -> Pin {
        self.state().pin
    }

    pub fn credit_limit(&self) -> f64 {
        self.state().credit_limit
    }

    pub fn balance(&self) -> f64 {
        self.state().balance
    }
}
