use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credit_card::{CardState, Pin};
use crate::store::{FormatError, Schema};
use crate::types::SequenceNumber;
use crate::AggregateState;

/// Persisted layout of a credit card. Fields are encoded in declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CardSnapshot {
    pub id: [u8; 16],
    pub sequence_number: SequenceNumber,
    pub card_number: String,
    pub owner_name: String,
    /// Days since 0001-01-01 of the proleptic Gregorian calendar, that day being 1.
    pub expiry_date: i32,
    pub pin: u32,
    pub credit_limit: f64,
    pub balance: f64,
}

impl Schema<CardState> for CardSnapshot {
    const MAGIC: [u8; 4] = *b"CCRD";
    const VERSION: u16 = 1;

    fn from_state(aggregate_state: &AggregateState<CardState>) -> Self {
        let state: &CardState = aggregate_state.inner();
        Self {
            id: *aggregate_state.id().as_bytes(),
            sequence_number: *aggregate_state.sequence_number(),
            card_number: state.card_number.clone(),
            owner_name: state.owner_name.clone(),
            expiry_date: state.expiry_date.num_days_from_ce(),
            pin: state.pin.value(),
            credit_limit: state.credit_limit,
            balance: state.balance,
        }
    }

    fn to_state(self) -> Result<AggregateState<CardState>, FormatError> {
        let expiry_date: NaiveDate =
            NaiveDate::from_num_days_from_ce_opt(self.expiry_date).ok_or(FormatError::InvalidDate(self.expiry_date))?;

        if self.sequence_number < 0 {
            return Err(FormatError::InvalidState(format!(
                "negative sequence number {}",
                self.sequence_number
            )));
        }

        let state: CardState = CardState {
            card_number: self.card_number,
            owner_name: self.owner_name,
            expiry_date,
            pin: Pin::new(self.pin),
            credit_limit: self.credit_limit,
            balance: self.balance,
        };
        state
            .validate()
            .map_err(|error| FormatError::InvalidState(error.to_string()))?;

        Ok(AggregateState::restore(
            Uuid::from_bytes(self.id),
            self.sequence_number,
            state,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::CardSnapshot;
    use crate::credit_card::{CardState, Pin};
    use crate::store::{FormatError, Schema};
    use crate::AggregateState;

    fn aggregate_state() -> AggregateState<CardState> {
        AggregateState::new(CardState {
            card_number: "1234567890123456".to_string(),
            owner_name: "John Doe".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            pin: Pin::new(4321),
            credit_limit: 1000.0,
            balance: 0.0,
        })
    }

    #[test]
    fn snapshot_mirrors_state() {
        let state: AggregateState<CardState> = aggregate_state();
        let snapshot: CardSnapshot = CardSnapshot::from_state(&state);

        assert_eq!(&snapshot.id, state.id().as_bytes());
        assert_eq!(snapshot.pin, 4321);
        assert_eq!(snapshot.to_state().unwrap(), state);
    }

    #[test]
    fn to_state_rejects_out_of_range_dates() {
        let snapshot: CardSnapshot = CardSnapshot {
            expiry_date: i32::MAX,
            ..CardSnapshot::from_state(&aggregate_state())
        };

        assert!(matches!(snapshot.to_state(), Err(FormatError::InvalidDate(i32::MAX))));
    }

    #[test]
    fn to_state_rejects_invalid_money() {
        let snapshot: CardSnapshot = CardSnapshot {
            balance: -5.0,
            ..CardSnapshot::from_state(&aggregate_state())
        };
        assert!(matches!(snapshot.to_state(), Err(FormatError::InvalidState(_))));

        let snapshot: CardSnapshot = CardSnapshot {
            credit_limit: f64::NAN,
            ..CardSnapshot::from_state(&aggregate_state())
        };
        assert!(matches!(snapshot.to_state(), Err(FormatError::InvalidState(_))));
    }

    #[test]
    fn to_state_rejects_negative_sequence_number() {
        let snapshot: CardSnapshot = CardSnapshot {
            sequence_number: -1,
            ..CardSnapshot::from_state(&aggregate_state())
        };

        assert!(matches!(snapshot.to_state(), Err(FormatError::InvalidState(_))));
    }

    #[test]
    fn to_state_keeps_exhausted_sequence_number() {
        let snapshot: CardSnapshot = CardSnapshot {
            sequence_number: i32::MAX,
            ..CardSnapshot::from_state(&aggregate_state())
        };

        assert_eq!(*snapshot.to_state().unwrap().sequence_number(), i32::MAX);
    }
}
