//! Parse-then-check validation of invoice form submissions.
//!
//! Every field is checked on every call, so a submission with several bad
//! fields reports all of them at once.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::invoice::InvoiceStatus;

pub const CUSTOMER_REQUIRED: &str = "Please select a customer.";
pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Raw invoice submission. A field missing from the payload is `None`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    /// Major currency units as typed, e.g. "42.50"
    pub amount: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInvoice {
    pub customer_id: String,
    pub amount: BigDecimal,
    pub status: InvoiceStatus,
}

impl ValidatedInvoice {
    /// Amount in cents, rounded half-up. `None` if it does not fit in an `i64`.
    pub fn amount_in_cents(&self) -> Option<i64> {
        whole_cents(&self.amount).to_i64()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CustomerId,
    Amount,
    Status,
}

/// Violation messages grouped per field, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
}

impl FieldErrors {
    pub fn push(&mut self, field: Field, message: impl Into<String>) {
        let slot = match field {
            Field::CustomerId => &mut self.customer_id,
            Field::Amount => &mut self.amount,
            Field::Status => &mut self.status,
        };
        slot.get_or_insert_with(Vec::new).push(message.into());
    }

    pub fn get(&self, field: Field) -> &[String] {
        let slot = match field {
            Field::CustomerId => &self.customer_id,
            Field::Amount => &self.amount,
            Field::Status => &self.status,
        };
        slot.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.customer_id.is_none() && self.amount.is_none() && self.status.is_none()
    }
}

/// Rules for a new invoice. `id` and `date` are assigned server-side.
pub fn validate_create(form: &InvoiceForm) -> Result<ValidatedInvoice, FieldErrors> {
    validate_fields(form)
}

/// Rules for editing an invoice. `id` comes from the route and `date` is immutable.
pub fn validate_update(form: &InvoiceForm) -> Result<ValidatedInvoice, FieldErrors> {
    validate_fields(form)
}

fn validate_fields(form: &InvoiceForm) -> Result<ValidatedInvoice, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = match form.customer_id.as_deref() {
        Some(id) if !id.is_empty() => Some(id.to_string()),
        _ => {
            errors.push(Field::CustomerId, CUSTOMER_REQUIRED);
            None
        }
    };

    let amount = coerce_amount(form.amount.as_deref());
    // Sub-cent amounts that round to nothing are not positive either.
    if whole_cents(&amount) <= BigDecimal::zero() {
        errors.push(Field::Amount, AMOUNT_NOT_POSITIVE);
    }

    let status = match form.status.as_deref().map(InvoiceStatus::from_str) {
        Some(Ok(status)) => Some(status),
        _ => {
            errors.push(Field::Status, STATUS_REQUIRED);
            None
        }
    };

    match (customer_id, status) {
        (Some(customer_id), Some(status)) if errors.is_empty() => Ok(ValidatedInvoice {
            customer_id,
            amount,
            status,
        }),
        _ => Err(errors),
    }
}

fn whole_cents(amount: &BigDecimal) -> BigDecimal {
    (amount * BigDecimal::from(100)).with_scale_round(0, RoundingMode::HalfUp)
}

/// Missing, blank and unparsable input all coerce to zero.
fn coerce_amount(raw: Option<&str>) -> BigDecimal {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| BigDecimal::from_str(s).ok())
        .unwrap_or_else(BigDecimal::zero)
}
