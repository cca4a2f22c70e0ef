//! Membership pricing.
//!
//! The original price is copied from the plan at creation and never changes
//! afterwards; the discount is bounded by it so a final price can never go
//! negative (the legacy deployment did not clamp this and could issue
//! negative dues).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ValidationError};

/// Validated price breakdown for a membership.
///
/// # Invariants
///
/// - `0 <= discount_amount <= original_price`
/// - `final_price() == original_price - discount_amount`, always
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Plan price at the moment of creation.
    pub original_price: Money,

    /// Discount granted by the admin at creation.
    pub discount_amount: Money,
}

impl PriceQuote {
    /// Builds a quote, rejecting discounts outside `[0, original_price]`.
    pub fn new(original_price: Money, discount_amount: Money) -> Result<Self, ValidationError> {
        if discount_amount.is_negative() {
            return Err(ValidationError::invalid_format(
                "discount_amount",
                "discount cannot be negative",
            ));
        }
        if discount_amount > original_price {
            return Err(ValidationError::out_of_range(
                "discount_amount",
                0,
                original_price.as_paise(),
                discount_amount.as_paise(),
            ));
        }
        Ok(Self {
            original_price,
            discount_amount,
        })
    }

    /// Price actually owed for the membership.
    pub fn final_price(&self) -> Money {
        self.original_price - self.discount_amount
    }
}
