//! In-memory port implementations for HTTP tests that run without a database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use chrono::NaiveDate;
use uuid::Uuid;

use invoice_dashboard::application::invoice_service::InvoiceService;
use invoice_dashboard::domain::auth::{
    AuthErrorKind, LoginForm, Session, SessionUser, SignInError,
};
use invoice_dashboard::domain::errors::DomainError;
use invoice_dashboard::domain::invoice::{
    CustomerView, InvoiceChanges, InvoiceStatus, InvoiceSummary, InvoiceView, ListResult,
    NewInvoice,
};
use invoice_dashboard::domain::ports::{
    CustomerRepository, IdentityProvider, InvoiceRepository, SessionStore,
};
use invoice_dashboard::infrastructure::view_cache::ViewCache;
use invoice_dashboard::AppComponents;

pub const EMAIL: &str = "user@nextmail.com";
pub const PASSWORD: &str = "123456";

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

// ── Invoices ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryInvoices {
    pub rows: Mutex<Vec<InvoiceView>>,
    pub list_calls: AtomicUsize,
    pub failing: AtomicBool,
}

impl MemoryInvoices {
    pub fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Internal("connection refused".to_string()));
        }
        Ok(())
    }

    pub fn stored(&self) -> Vec<InvoiceView> {
        self.rows.lock().unwrap().clone()
    }
}

impl InvoiceRepository for MemoryInvoices {
    fn create(&self, invoice: NewInvoice) -> Result<String, DomainError> {
        self.check()?;
        let id = Uuid::new_v4().to_string();
        self.rows.lock().unwrap().push(InvoiceView {
            id: id.clone(),
            customer_id: invoice.customer_id,
            amount_in_cents: invoice.amount_in_cents,
            status: invoice.status,
            date: invoice.date,
        });
        Ok(id)
    }

    fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), DomainError> {
        self.check()?;
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|r| r.id == id) {
            row.customer_id = changes.customer_id;
            row.amount_in_cents = changes.amount_in_cents;
            row.status = changes.status;
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.check()?;
        self.rows.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<InvoiceView>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    fn list(&self, query: &str, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let needle = query.to_lowercase();
        let matching: Vec<InvoiceSummary> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status.as_str().contains(&needle))
            .map(|r| InvoiceSummary {
                id: r.id.clone(),
                customer_name: "Lee Robinson".to_string(),
                customer_email: "lee@robinson.com".to_string(),
                image_url: "/customers/lee-robinson.png".to_string(),
                amount_in_cents: r.amount_in_cents,
                status: r.status,
                date: r.date,
            })
            .collect();
        let total = matching.len() as i64;
        let skip = page.saturating_sub(1).saturating_mul(limit);
        let items = matching
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(limit as usize)
            .collect();
        Ok(ListResult { items, total })
    }
}

/// Lets the service own a handle while the test keeps inspecting the rows.
pub struct SharedInvoices(pub Arc<MemoryInvoices>);

impl InvoiceRepository for SharedInvoices {
    fn create(&self, invoice: NewInvoice) -> Result<String, DomainError> {
        self.0.create(invoice)
    }

    fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), DomainError> {
        self.0.update(id, changes)
    }

    fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.0.delete(id)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<InvoiceView>, DomainError> {
        self.0.find_by_id(id)
    }

    fn list(&self, query: &str, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        self.0.list(query, page, limit)
    }
}

// ── Customers ────────────────────────────────────────────────────────────────

pub struct MemoryCustomers(pub Vec<CustomerView>);

impl CustomerRepository for MemoryCustomers {
    fn list(&self) -> Result<Vec<CustomerView>, DomainError> {
        Ok(self.0.clone())
    }
}

// ── Sessions and sign-in ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemorySessions {
    pub live: Mutex<HashMap<Uuid, Session>>,
}

impl MemorySessions {
    /// Opens a session directly, as a completed sign-in would.
    pub fn open(&self) -> Session {
        self.create(Uuid::new_v4()).expect("memory store never fails")
    }
}

impl SessionStore for MemorySessions {
    fn create(&self, user_id: Uuid) -> Result<Session, DomainError> {
        let session = Session {
            id: Uuid::new_v4(),
            user: SessionUser {
                id: user_id,
                name: "User".to_string(),
                email: EMAIL.to_string(),
            },
        };
        self.live
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(session)
    }

    fn find(&self, id: Uuid) -> Result<Option<Session>, DomainError> {
        Ok(self.live.lock().unwrap().get(&id).cloned())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.live.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// Accepts exactly one email/password pair.
pub struct FixedIdentity {
    pub sessions: Arc<MemorySessions>,
    pub broken: bool,
}

impl IdentityProvider for FixedIdentity {
    fn sign_in(&self, _provider: &str, form: &LoginForm) -> Result<Session, SignInError> {
        if self.broken {
            return Err(SignInError::Unexpected(DomainError::Internal(
                "sessions table missing".to_string(),
            )));
        }
        if form.email.as_deref() == Some(EMAIL) && form.password.as_deref() == Some(PASSWORD) {
            Ok(self.sessions.create(Uuid::new_v4())?)
        } else {
            Err(AuthErrorKind::CredentialsSignin.into())
        }
    }
}

// ── Wiring ───────────────────────────────────────────────────────────────────

pub struct TestApp {
    pub components: AppComponents,
    pub invoices: Arc<MemoryInvoices>,
    pub sessions: Arc<MemorySessions>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_identity(false)
    }

    /// The identity provider fails with an unclassified error.
    pub fn with_broken_identity() -> Self {
        Self::with_identity(true)
    }

    fn with_identity(broken: bool) -> Self {
        let invoices = Arc::new(MemoryInvoices::default());
        let sessions = Arc::new(MemorySessions::default());
        let customers: Arc<dyn CustomerRepository> = Arc::new(MemoryCustomers(vec![
            CustomerView {
                id: Uuid::new_v4().to_string(),
                name: "Delba de Oliveira".to_string(),
            },
            CustomerView {
                id: Uuid::new_v4().to_string(),
                name: "Lee Robinson".to_string(),
            },
        ]));
        let identity: Arc<dyn IdentityProvider> = Arc::new(FixedIdentity {
            sessions: sessions.clone(),
            broken,
        });
        let session_store: Arc<dyn SessionStore> = sessions.clone();
        let repo: Box<dyn InvoiceRepository> = Box::new(SharedInvoices(invoices.clone()));

        let components = AppComponents {
            invoices: web::Data::new(InvoiceService::new(repo)),
            customers: web::Data::from(customers),
            sessions: web::Data::from(session_store),
            identity: web::Data::from(identity),
            views: web::Data::new(ViewCache::new()),
        };

        Self {
            components,
            invoices,
            sessions,
        }
    }

    /// Stores an invoice without going through the HTTP layer.
    pub fn seed_invoice(&self, cents: i64, status: InvoiceStatus) -> String {
        self.invoices
            .create(NewInvoice {
                customer_id: Uuid::new_v4().to_string(),
                amount_in_cents: cents,
                status,
                date: day(),
            })
            .expect("memory store accepts writes")
    }
}
