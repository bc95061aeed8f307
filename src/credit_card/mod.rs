pub use aggregate::CreditCardAggregate;
pub use card::{CreditCard, SpendOutcome};
pub use command::CardCommand;
pub use error::CardError;
pub use event::{CardEvent, CardEventKind};
pub use schema::CardSnapshot;
pub use state::{CardState, Pin, MAX_TEXT_BYTES};

mod aggregate;
mod card;
mod command;
mod error;
mod event;
mod schema;
mod state;

/// File store persisting [`CreditCard`] snapshots.
pub type CardFileStore = crate::store::FileStore<CreditCardAggregate, CardSnapshot>;
