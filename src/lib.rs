//! A single credit-card account modelled as an aggregate.
//!
//! Commands are validated by the [`Aggregate`], turned into events, applied onto the
//! [`AggregateState`] and then handed, synchronously and in registration order, to the
//! [`EventHandler`]s subscribed to the event kind. The state can be saved to and loaded back
//! from a [`store::SnapshotStore`].

pub use crate::aggregate::Aggregate;
pub use crate::event::Event;
pub use crate::handler::EventHandler;
pub use crate::manager::AggregateManager;
pub use crate::state::{AggregateState, SequenceNumberOverflow};

mod aggregate;
pub mod credit_card;
mod event;
mod handler;
mod manager;
mod state;
pub mod store;

pub mod types {
    pub type SequenceNumber = i32;
}
