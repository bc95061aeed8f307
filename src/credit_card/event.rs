use crate::credit_card::Pin;
use crate::event::Event;

#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    Replenished { amount: f64 },
    Spent { amount: f64 },
    CreditStarted,
    LimitReached { balance: f64 },
    /// The new pin travels with the event so it can be applied; its `Debug` output is redacted.
    PinChanged { pin: Pin },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardEventKind {
    Replenished,
    Spent,
    CreditStarted,
    LimitReached,
    PinChanged,
}

impl Event for CardEvent {
    type Kind = CardEventKind;

    fn kind(&self) -> CardEventKind {
        match self {
            CardEvent::Replenished { .. } => CardEventKind::Replenished,
            CardEvent::Spent { .. } => CardEventKind::Spent,
            CardEvent::CreditStarted => CardEventKind::CreditStarted,
            CardEvent::LimitReached { .. } => CardEventKind::LimitReached,
            CardEvent::PinChanged { .. } => CardEventKind::PinChanged,
        }
    }
}
