use crate::credit_card::state::is_valid_money;
use crate::credit_card::{CardCommand, CardError, CardEvent, CardState};
use crate::Aggregate;

pub struct CreditCardAggregate;

impl Aggregate for CreditCardAggregate {
    const NAME: &'static str = "credit_card";
    type State = CardState;
    type Command = CardCommand;
    type Event = CardEvent;
    type Error = CardError;

    fn handle_command(state: &Self::State, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CardCommand::Deposit { amount } => {
                ensure_valid_amount(amount)?;
                if (state.balance + amount).is_finite() {
                    Ok(vec![CardEvent::Replenished { amount }])
                } else {
                    Err(CardError::BalanceOverflow {
                        balance: state.balance,
                        amount,
                    })
                }
            }
            CardCommand::Spend { amount } => {
                ensure_valid_amount(amount)?;
                if amount > state.balance {
                    Err(CardError::InsufficientFunds {
                        requested: amount,
                        available: state.balance,
                    })
                } else {
                    Ok(vec![CardEvent::Spent { amount }])
                }
            }
            CardCommand::StartCredit => Ok(vec![CardEvent::CreditStarted]),
            CardCommand::ChangePin { pin } => Ok(vec![CardEvent::PinChanged { pin }]),
            CardCommand::CheckLimit if state.is_limit_reached() => Ok(vec![CardEvent::LimitReached {
                balance: state.balance,
            }]),
            CardCommand::CheckLimit => Ok(vec![]),
        }
    }

    fn apply_event(state: &mut Self::State, payload: &Self::Event) {
        match payload {
            CardEvent::Replenished { amount } => state.add_amount(*amount),
            CardEvent::Spent { amount } => state.sub_amount(*amount),
            CardEvent::PinChanged { pin } => state.pin = *pin,
            CardEvent::CreditStarted | CardEvent::LimitReached { .. } => {}
        }
    }
}

fn ensure_valid_amount(amount: f64) -> Result<(), CardError> {
    if is_valid_money(amount) {
        Ok(())
    } else {
        Err(CardError::InvalidAmount(amount))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::CreditCardAggregate;
    use crate::credit_card::{CardCommand, CardError, CardEvent, CardState, Pin};
    use crate::Aggregate;

    fn card_state(balance: f64) -> CardState {
        CardState {
            card_number: "1234567890123456".to_string(),
            owner_name: "John Doe".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            pin: Pin::new(1234),
            credit_limit: 1000.0,
            balance,
        }
    }

    #[test]
    fn deposit_emits_replenished() {
        let events = CreditCardAggregate::handle_command(&card_state(500.0), CardCommand::Deposit { amount: 200.0 });
        assert_eq!(events, Ok(vec![CardEvent::Replenished { amount: 200.0 }]));
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        let state: CardState = card_state(500.0);

        assert_eq!(
            CreditCardAggregate::handle_command(&state, CardCommand::Deposit { amount: -10.0 }),
            Err(CardError::InvalidAmount(-10.0))
        );
        assert_eq!(
            CreditCardAggregate::handle_command(&state, CardCommand::Spend { amount: -10.0 }),
            Err(CardError::InvalidAmount(-10.0))
        );
        assert!(matches!(
            CreditCardAggregate::handle_command(&state, CardCommand::Deposit { amount: f64::NAN }),
            Err(CardError::InvalidAmount(_))
        ));
        assert_eq!(
            CreditCardAggregate::handle_command(&state, CardCommand::Spend { amount: f64::INFINITY }),
            Err(CardError::InvalidAmount(f64::INFINITY))
        );
    }

    #[test]
    fn deposit_never_overflows_the_balance() {
        assert_eq!(
            CreditCardAggregate::handle_command(&card_state(f64::MAX), CardCommand::Deposit { amount: f64::MAX }),
            Err(CardError::BalanceOverflow {
                balance: f64::MAX,
                amount: f64::MAX,
            })
        );
        assert_eq!(
            CreditCardAggregate::handle_command(&card_state(f64::MAX / 2.0), CardCommand::Deposit { amount: f64::MAX / 2.0 }),
            Ok(vec![CardEvent::Replenished { amount: f64::MAX / 2.0 }])
        );
    }

    #[test]
    fn spend_checks_the_balance() {
        let state: CardState = card_state(700.0);

        assert_eq!(
            CreditCardAggregate::handle_command(&state, CardCommand::Spend { amount: 700.0 }),
            Ok(vec![CardEvent::Spent { amount: 700.0 }])
        );
        assert_eq!(
            CreditCardAggregate::handle_command(&state, CardCommand::Spend { amount: 700.01 }),
            Err(CardError::InsufficientFunds {
                requested: 700.01,
                available: 700.0,
            })
        );
    }

    #[test]
    fn check_limit_emits_only_when_reached() {
        assert_eq!(
            CreditCardAggregate::handle_command(&card_state(999.0), CardCommand::CheckLimit),
            Ok(vec![])
        );
        assert_eq!(
            CreditCardAggregate::handle_command(&card_state(1000.0), CardCommand::CheckLimit),
            Ok(vec![CardEvent::LimitReached { balance: 1000.0 }])
        );
    }

    #[test]
    fn apply_event_updates_state() {
        let mut state: CardState = card_state(500.0);

        CreditCardAggregate::apply_event(&mut state, &CardEvent::Replenished { amount: 200.0 });
        assert_eq!(state.balance, 700.0);

        CreditCardAggregate::apply_event(&mut state, &CardEvent::Spent { amount: 700.0 });
        assert_eq!(state.balance, 0.0);

        CreditCardAggregate::apply_event(&mut state, &CardEvent::PinChanged { pin: Pin::new(4321) });
        assert_eq!(state.pin, Pin::new(4321));

        let before: CardState = state.clone();
        CreditCardAggregate::apply_event(&mut state, &CardEvent::CreditStarted);
        CreditCardAggregate::apply_event(&mut state, &CardEvent::LimitReached { balance: 0.0 });
        assert_eq!(state, before);
    }
}
