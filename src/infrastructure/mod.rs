pub mod credentials_provider;
pub mod customer_repo;
pub mod invoice_repo;
pub mod models;
pub mod password;
pub mod session_repo;
pub mod user_repo;
pub mod view_cache;

#[cfg(test)]
pub(crate) mod test_support;
