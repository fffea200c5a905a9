use uuid::Uuid;

use super::auth::{LoginForm, Session, SignInError, UserRecord};
use super::errors::DomainError;
use super::invoice::{CustomerView, InvoiceChanges, InvoiceView, ListResult, NewInvoice};

pub trait InvoiceRepository: Send + Sync + 'static {
    fn create(&self, invoice: NewInvoice) -> Result<String, DomainError>;
    fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), DomainError>;
    fn delete(&self, id: &str) -> Result<(), DomainError>;
    fn find_by_id(&self, id: &str) -> Result<Option<InvoiceView>, DomainError>;
    fn list(&self, query: &str, page: i64, limit: i64) -> Result<ListResult, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn list(&self) -> Result<Vec<CustomerView>, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;
    /// Inserts the user unless one with the same email exists.
    fn ensure(&self, name: &str, email: &str, password_hash: &str) -> Result<(), DomainError>;
}

pub trait SessionStore: Send + Sync + 'static {
    fn create(&self, user_id: Uuid) -> Result<Session, DomainError>;
    fn find(&self, id: Uuid) -> Result<Option<Session>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// External credential check. Returns a live session on success.
pub trait IdentityProvider: Send + Sync + 'static {
    fn sign_in(&self, provider: &str, form: &LoginForm) -> Result<Session, SignInError>;
}

impl<T: InvoiceRepository + ?Sized> InvoiceRepository for Box<T> {
    fn create(&self, invoice: NewInvoice) -> Result<String, DomainError> {
        (**self).create(invoice)
    }

    fn update(&self, id: &str, changes: InvoiceChanges) -> Result<(), DomainError> {
        (**self).update(id, changes)
    }

    fn delete(&self, id: &str) -> Result<(), DomainError> {
        (**self).delete(id)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<InvoiceView>, DomainError> {
        (**self).find_by_id(id)
    }

    fn list(&self, query: &str, page: i64, limit: i64) -> Result<ListResult, DomainError> {
        (**self).list(query, page, limit)
    }
}
