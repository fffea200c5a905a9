pub mod auth_service;
pub mod invoice_service;
pub mod outcome;

use crate::domain::ports::InvoiceRepository;

/// Invoice service over whichever repository the server was built with.
pub type DynInvoiceService = invoice_service::InvoiceService<Box<dyn InvoiceRepository>>;
