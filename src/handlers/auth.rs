use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::auth_service::{authenticate, SignInOutcome};
use crate::domain::auth::{LoginForm, Session, SESSION_COOKIE};
use crate::domain::authorization::LOGIN_PATH;
use crate::domain::ports::{IdentityProvider, SessionStore};
use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginErrorResponse {
    pub message: String,
}

/// POST /login
///
/// On success sets the session cookie and redirects to `redirectTo`
/// (default `/dashboard`).
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in"),
        (status = 401, description = "Sign-in rejected", body = LoginErrorResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "auth"
)]
pub async fn login(
    identity: web::Data<dyn IdentityProvider>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let outcome = web::block(move || authenticate(&**identity, &form)).await??;

    match outcome {
        SignInOutcome::SignedIn { session, redirect } => {
            log::info!("User {} signed in", session.user.id);
            let cookie = Cookie::build(SESSION_COOKIE, session.id.to_string())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish();
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, redirect.0))
                .cookie(cookie)
                .finish())
        }
        SignInOutcome::Rejected(message) => {
            Ok(HttpResponse::Unauthorized().json(LoginErrorResponse {
                message: message.to_string(),
            }))
        }
    }
}

/// POST /dashboard/logout
#[utoipa::path(
    post,
    path = "/dashboard/logout",
    responses(
        (status = 303, description = "Signed out; redirects to the login page"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "auth"
)]
pub async fn logout(
    sessions: web::Data<dyn SessionStore>,
    session: web::ReqData<Session>,
) -> Result<HttpResponse, AppError> {
    let id = session.id;

    web::block(move || sessions.delete(id)).await??;

    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .cookie(cookie)
        .finish())
}
