use crate::credit_card::Pin;

pub enum CardCommand {
    Deposit { amount: f64 },
    Spend { amount: f64 },
    StartCredit,
    ChangePin { pin: Pin },
    CheckLimit,
}
