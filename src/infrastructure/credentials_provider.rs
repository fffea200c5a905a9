use std::sync::Arc;

use validator::Validate;

use crate::domain::auth::{AuthErrorKind, LoginForm, Session, SignInError, CREDENTIALS_PROVIDER};
use crate::domain::ports::{IdentityProvider, SessionStore, UserRepository};

use super::password::verify_password;

/// Email + password sign-in against the `users` table.
pub struct CredentialsProvider {
    users: Box<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl CredentialsProvider {
    pub fn new(users: Box<dyn UserRepository>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }
}

impl IdentityProvider for CredentialsProvider {
    fn sign_in(&self, provider: &str, form: &LoginForm) -> Result<Session, SignInError> {
        if provider != CREDENTIALS_PROVIDER {
            return Err(AuthErrorKind::InvalidProvider.into());
        }

        let Some((email, password)) = parse_credentials(form) else {
            log::info!("Invalid credentials");
            return Err(AuthErrorKind::CredentialsSignin.into());
        };

        let user = self.users.find_by_email(email).map_err(|e| {
            log::error!("Failed to fetch user: {}", e);
            AuthErrorKind::CallbackRouteError
        })?;
        let Some(user) = user else {
            log::info!("Invalid credentials");
            return Err(AuthErrorKind::CredentialsSignin.into());
        };

        let matches = verify_password(password, &user.password_hash).map_err(|e| {
            log::error!("Cannot check password for user {}: {}", user.id, e);
            AuthErrorKind::CallbackRouteError
        })?;
        if !matches {
            log::info!("Invalid credentials");
            return Err(AuthErrorKind::CredentialsSignin.into());
        }

        Ok(self.sessions.create(user.id)?)
    }
}

fn parse_credentials(form: &LoginForm) -> Option<(&str, &str)> {
    form.validate().ok()?;
    Some((form.email.as_deref()?, form.password.as_deref()?))
}
