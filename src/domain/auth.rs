use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::errors::DomainError;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session";

/// The only provider the login form signs in with.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A stored session. Its existence implies an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user: SessionUser,
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
}

/// Login form payload, passed to the identity provider untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[validate(required, email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(required, length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    /// Where to land after a successful sign-in. Defaults to `/dashboard`.
    pub redirect_to: Option<String>,
}

/// Failure categories the login action knows how to explain to a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthErrorKind {
    #[error("CredentialsSignin")]
    CredentialsSignin,
    #[error("CallbackRouteError")]
    CallbackRouteError,
    #[error("InvalidProvider")]
    InvalidProvider,
}

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("authentication failed: {0}")]
    Auth(AuthErrorKind),
    #[error(transparent)]
    Unexpected(#[from] DomainError),
}

impl From<AuthErrorKind> for SignInError {
    fn from(kind: AuthErrorKind) -> Self {
        SignInError::Auth(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: Option<&str>, password: Option<&str>) -> LoginForm {
        LoginForm {
            email: email.map(String::from),
            password: password.map(String::from),
            redirect_to: None,
        }
    }

    #[test]
    fn login_form_requires_an_email_and_a_six_character_password() {
        assert!(login(Some("user@nextmail.com"), Some("123456")).validate().is_ok());

        for form in [
            login(None, Some("123456")),
            login(Some("user@nextmail.com"), None),
            login(Some("not-an-email"), Some("123456")),
            login(Some("user@@nextmail.com"), Some("123456")),
            login(Some("user@nextmail.com"), Some("12345")),
        ] {
            assert!(form.validate().is_err(), "{form:?}");
        }
    }
}
