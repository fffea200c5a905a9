use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::DomainError;

/// Route whose cached rendering goes stale after any invoice mutation.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Listing page size used by the dashboard table.
pub const ITEMS_PER_PAGE: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(DomainError::InvalidInput(format!(
                "unknown invoice status '{other}'"
            ))),
        }
    }
}

/// Row to insert. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// The mutable subset of an invoice. `id` and `date` never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceView {
    pub id: String,
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Listing row, joined with the owning customer.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub image_url: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<InvoiceSummary>,
    pub total: i64,
}

impl ListResult {
    pub fn total_pages(&self) -> i64 {
        (self.total + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
}
