use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use uuid::Uuid;

use crate::domain::auth::{Session, SESSION_COOKIE};
use crate::domain::authorization::{authorize, Decision};
use crate::domain::ports::SessionStore;
use crate::errors::AppError;

/// Runs the authorization decision before any route handler.
///
/// Allowed requests carry the resolved [`Session`] in their extensions;
/// everything else is answered with `303 See Other`.
pub async fn authorization_gate<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let session = current_session(&req).await?;

    match authorize(session.as_ref(), req.path()) {
        Decision::Allow => {
            if let Some(session) = session {
                req.extensions_mut().insert(session);
            }
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        Decision::Redirect(location) => {
            log::debug!("Redirecting {} to {}", req.path(), location);
            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, location))
                .finish();
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}

/// A missing, malformed or expired session cookie counts as signed out.
async fn current_session(req: &ServiceRequest) -> Result<Option<Session>, AppError> {
    let Some(id) = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    else {
        return Ok(None);
    };

    let store = req
        .app_data::<web::Data<dyn SessionStore>>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session store is not configured".to_string()))?;

    Ok(web::block(move || store.find(id)).await??)
}
