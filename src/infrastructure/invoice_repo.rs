use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::invoice::{
    InvoiceChanges, InvoiceSummary, InvoiceView, ListResult, NewInvoice,
};
use crate::domain::ports::InvoiceRepository;
use crate::schema::{customers, invoices};

use super::models::{InvoiceChangesRow, InvoiceRow, NewInvoiceRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Identifiers are opaque to callers but UUIDs in storage.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|e| DomainError::InvalidInput(format!("invalid id '{raw}': {e}")))
}

fn amount_column(amount_in_cents: i64) -> Result<i32, DomainError> {
    i32::try_from(amount_in_cents)
        .map_err(|_| DomainError::InvalidInput(format!("amount {amount_in_cents} overflows")))
}

/// Rows to skip for a 1-based page. Saturates for absurd page numbers.
pub(crate) fn page_offset(page: i64, limit: i64) -> i64 {
    page.max(1).saturating_sub(1).saturating_mul(limit)
}

type SummaryRow = (Uuid, String, String, String, i32, String, NaiveDate);

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl InvoiceRepository for DieselInvoiceRepository {
    fn create(&self, invoice: NewInvoice) -> Result<String, DomainError> {
        let row = NewInvoiceRow {
            customer_id: parse_id(&invoice.customer_id)?,
            amount: amount_column(invoice.amount_in_cents)?,
            status: invoice.status.to_string(),
            date: invoice.date,
        };
        let mut conn = self.pool.get()?;

        let id: Uuid = diesel::insert_into(invoices::table)
            .values(&row)
            .returning(invoices::id)
            .get_result(&mut conn)?;

        Ok(id.to_string())
    }

    fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), DomainError> {
        let id = parse_id(id)?;
        let row = InvoiceChangesRow {
            customer_id: parse_id(&changes.customer_id)?,
            amount: amount_column(changes.amount_in_cents)?,
            status: changes.status.to_string(),
        };
        let mut conn = self.pool.get()?;

        diesel::update(invoices::table.find(id))
            .set(&row)
            .execute(&mut conn)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), DomainError> {
        let id = parse_id(id)?;
        let mut conn = self.pool.get()?;

        diesel::delete(invoices::table.find(id)).execute(&mut conn)?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<InvoiceView>, DomainError> {
        let id = parse_id(id)?;
        let mut conn = self.pool.get()?;

        let row = invoices::table
            .find(id)
            .select(InvoiceRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(InvoiceView {
            id: row.id.to_string(),
            customer_id: row.customer_id.to_string(),
            amount_in_cents: i64::from(row.amount),
            status: row.status.parse()?,
            date: row.date,
        }))
    }

    fn list(&self, query: &str, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let pattern = format!("%{}%", query);
        let offset = page_offset(page, limit);
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = invoices::table
                .inner_join(customers::table)
                .filter(
                    customers::name
                        .ilike(pattern.as_str())
                        .or(customers::email.ilike(pattern.as_str()))
                        .or(invoices::status.ilike(pattern.as_str())),
                )
                .count()
                .get_result(conn)?;

            let rows: Vec<SummaryRow> = invoices::table
                .inner_join(customers::table)
                .filter(
                    customers::name
                        .ilike(pattern.as_str())
                        .or(customers::email.ilike(pattern.as_str()))
                        .or(invoices::status.ilike(pattern.as_str())),
                )
                .select((
                    invoices::id,
                    customers::name,
                    customers::email,
                    customers::image_url,
                    invoices::amount,
                    invoices::status,
                    invoices::date,
                ))
                .order((invoices::date.desc(), invoices::id.asc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            let items = rows
                .into_iter()
                .map(|(id, customer_name, customer_email, image_url, amount, status, date)| {
                    Ok(InvoiceSummary {
                        id: id.to_string(),
                        customer_name,
                        customer_email,
                        image_url,
                        amount_in_cents: i64::from(amount),
                        status: status.parse()?,
                        date,
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?;

            Ok(ListResult { items, total })
        })
    }
}
