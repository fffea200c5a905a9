use chrono::Utc;

use crate::domain::errors::DomainError;
use crate::domain::invoice::{
    InvoiceChanges, InvoiceView, ListResult, NewInvoice, INVOICES_PATH, ITEMS_PER_PAGE,
};
use crate::domain::ports::InvoiceRepository;
use crate::domain::validation::{validate_create, validate_update, InvoiceForm, ValidatedInvoice};

use super::outcome::{ActionOutcome, FormState, Redirect, Revalidate};

const CREATE_INVALID: &str = "Missing Fields. Failed to Create Invoice.";
const CREATE_FAILED: &str = "Database Error: Failed to Create Invoice.";
const UPDATE_INVALID: &str = "Missing Fields. Failed to Update Invoice.";
const UPDATE_FAILED: &str = "Database Error: Failed to Update Invoice.";
const DELETE_FAILED: &str = "Database Error: Failed to Delete Invoice.";

pub struct InvoiceService<R> {
    repo: R,
}

impl<R: InvoiceRepository> InvoiceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_invoice(&self, form: &InvoiceForm) -> ActionOutcome {
        let data = match validate_create(form) {
            Ok(data) => data,
            Err(errors) => return ActionOutcome::Rejected(FormState::invalid(errors, CREATE_INVALID)),
        };

        let written = amount_in_cents(&data).and_then(|amount_in_cents| {
            self.repo
                .create(NewInvoice {
                    customer_id: data.customer_id,
                    amount_in_cents,
                    status: data.status,
                    date: Utc::now().date_naive(),
                })
                .map(|id| log::info!("Created invoice {}", id))
        });
        if let Err(e) = written {
            log::error!("Failed to create invoice: {}", e);
            return ActionOutcome::Rejected(FormState::message(CREATE_FAILED));
        }

        navigate_to_invoices()
    }

    pub fn update_invoice(&self, id: &str, form: &InvoiceForm) -> ActionOutcome {
        let data = match validate_update(form) {
            Ok(data) => data,
            Err(errors) => return ActionOutcome::Rejected(FormState::invalid(errors, UPDATE_INVALID)),
        };

        let written = amount_in_cents(&data).and_then(|amount_in_cents| {
            self.repo.update(
                id,
                InvoiceChanges {
                    customer_id: data.customer_id,
                    amount_in_cents,
                    status: data.status,
                },
            )
        });
        if let Err(e) = written {
            log::error!("Failed to update invoice {}: {}", id, e);
            return ActionOutcome::Rejected(FormState::message(UPDATE_FAILED));
        }

        navigate_to_invoices()
    }

    /// Deletes without navigating: the caller stays on the listing it deleted from.
    pub fn delete_invoice(&self, id: &str) -> ActionOutcome {
        if let Err(e) = self.repo.delete(id) {
            log::error!("Failed to delete invoice {}: {}", id, e);
            return ActionOutcome::Rejected(FormState::message(DELETE_FAILED));
        }

        ActionOutcome::Completed {
            revalidate: Revalidate(INVOICES_PATH),
            redirect: None,
        }
    }

    pub fn get_invoice(&self, id: &str) -> Result<InvoiceView, DomainError> {
        self.repo.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    pub fn list_invoices(&self, query: &str, page: i64) -> Result<ListResult, DomainError> {
        self.repo.list(query, page.max(1), ITEMS_PER_PAGE)
    }
}

fn amount_in_cents(data: &ValidatedInvoice) -> Result<i64, DomainError> {
    data.amount_in_cents()
        .ok_or_else(|| DomainError::InvalidInput(format!("amount {} is out of range", data.amount)))
}

fn navigate_to_invoices() -> ActionOutcome {
    ActionOutcome::Completed {
        revalidate: Revalidate(INVOICES_PATH),
        redirect: Some(Redirect(INVOICES_PATH.to_string())),
    }
}
