pub mod auth;
pub mod authorization;
pub mod errors;
pub mod invoice;
pub mod ports;
pub mod validation;
