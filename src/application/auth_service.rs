use crate::domain::auth::{AuthErrorKind, LoginForm, Session, SignInError, CREDENTIALS_PROVIDER};
use crate::domain::authorization::DASHBOARD_PATH;
use crate::domain::errors::DomainError;
use crate::domain::ports::IdentityProvider;

use super::outcome::Redirect;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

#[derive(Debug)]
pub enum SignInOutcome {
    SignedIn { session: Session, redirect: Redirect },
    /// Shown on the login form.
    Rejected(&'static str),
}

/// Signs in through the credentials provider.
///
/// Classified failures come back as a message for the form. Anything the
/// provider could not classify is returned as an error for the caller's own
/// error handling.
pub fn authenticate<P>(provider: &P, form: &LoginForm) -> Result<SignInOutcome, DomainError>
where
    P: IdentityProvider + ?Sized,
{
    match provider.sign_in(CREDENTIALS_PROVIDER, form) {
        Ok(session) => Ok(SignInOutcome::SignedIn {
            session,
            redirect: Redirect(landing_path(form.redirect_to.as_deref())),
        }),
        Err(SignInError::Auth(AuthErrorKind::CredentialsSignin)) => {
            Ok(SignInOutcome::Rejected(INVALID_CREDENTIALS))
        }
        Err(SignInError::Auth(kind)) => {
            log::warn!("Sign-in failed: {}", kind);
            Ok(SignInOutcome::Rejected(SOMETHING_WENT_WRONG))
        }
        Err(SignInError::Unexpected(e)) => Err(e),
    }
}

/// Only same-origin absolute paths are honoured.
fn landing_path(requested: Option<&str>) -> String {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path.to_string(),
        _ => DASHBOARD_PATH.to_string(),
    }
}
