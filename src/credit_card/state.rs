use std::fmt::{Debug, Formatter};

use chrono::NaiveDate;

use crate::credit_card::CardError;

/// Longest card number or owner name, in bytes. Keeps every valid card well under
/// [`crate::store::MAX_SNAPSHOT_BYTES`] once encoded.
pub const MAX_TEXT_BYTES: usize = 64 * 1024;

/// A card PIN. Its `Debug` output never shows the digits.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Pin(u32);

impl Pin {
    pub const fn new(pin: u32) -> Self {
        Self(pin)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Pin {
    fn from(pin: u32) -> Self {
        Self(pin)
    }
}

impl Debug for Pin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pin(****)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub card_number: String,
    pub owner_name: String,
    pub expiry_date: NaiveDate,
    pub pin: Pin,
    pub credit_limit: f64,
    pub balance: f64,
}

impl CardState {
    /// Checks the invariants every card state must hold: a finite, non negative credit limit and
    /// balance, and text fields no longer than [`MAX_TEXT_BYTES`].
    pub fn validate(&self) -> Result<(), CardError> {
        ensure_text_fits("card_number", &self.card_number)?;
        ensure_text_fits("owner_name", &self.owner_name)?;

        if !is_valid_money(self.credit_limit) {
            return Err(CardError::InvalidCreditLimit(self.credit_limit));
        }

        if !is_valid_money(self.balance) {
            return Err(CardError::InvalidBalance(self.balance));
        }

        Ok(())
    }

    pub fn add_amount(&mut self, amount: f64) {
        self.balance += amount;
    }

    pub fn sub_amount(&mut self, amount: f64) {
        self.balance -= amount;
    }

    pub fn is_limit_reached(&self) -> bool {
        self.balance >= self.credit_limit
    }
}

pub(crate) fn is_valid_money(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

fn ensure_text_fits(field: &'static str, text: &str) -> Result<(), CardError> {
    if text.len() > MAX_TEXT_BYTES {
        return Err(CardError::FieldTooLong {
            field,
            len: text.len(),
            max: MAX_TEXT_BYTES,
        });
    }
    Ok(())
}
