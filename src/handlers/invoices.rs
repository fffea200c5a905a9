use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::outcome::{ActionOutcome, FormState, Redirect};
use crate::application::DynInvoiceService;
use crate::domain::invoice::{InvoiceStatus, InvoiceSummary, InvoiceView, INVOICES_PATH};
use crate::domain::validation::InvoiceForm;
use crate::errors::AppError;
use crate::infrastructure::view_cache::ViewCache;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: String,
    pub customer_id: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    /// YYYY-MM-DD
    pub date: String,
}

impl From<InvoiceView> for InvoiceResponse {
    fn from(v: InvoiceView) -> Self {
        Self {
            id: v.id,
            customer_id: v.customer_id,
            amount: v.amount_in_cents,
            status: v.status,
            date: v.date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceSummaryResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
}

impl From<InvoiceSummary> for InvoiceSummaryResponse {
    fn from(s: InvoiceSummary) -> Self {
        Self {
            id: s.id,
            name: s.customer_name,
            email: s.customer_email,
            image_url: s.image_url,
            amount: s.amount_in_cents,
            status: s.status,
            date: s.date.format("%Y-%m-%d").to_string(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListInvoicesParams {
    /// Case-insensitive match on customer name, email or status.
    #[serde(default)]
    pub query: String,
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListInvoicesResponse {
    pub items: Vec<InvoiceSummaryResponse>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// Performs the side effects an action asked for and renders its result.
fn respond(outcome: ActionOutcome, views: &ViewCache) -> HttpResponse {
    match outcome {
        ActionOutcome::Rejected(state @ FormState { errors: Some(_), .. }) => {
            HttpResponse::UnprocessableEntity().json(state)
        }
        ActionOutcome::Rejected(state) => HttpResponse::InternalServerError().json(state),
        ActionOutcome::Completed {
            revalidate,
            redirect,
        } => {
            views.revalidate(revalidate.0);
            match redirect {
                Some(Redirect(location)) => HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, location))
                    .finish(),
                None => HttpResponse::NoContent().finish(),
            }
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /dashboard/invoices
///
/// Validates the submitted form and inserts a new invoice dated today.
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the invoice list"),
        (status = 422, description = "Invalid fields", body = FormState),
        (status = 500, description = "Database error", body = FormState),
    ),
    tag = "invoices"
)]
pub async fn create_invoice(
    service: web::Data<DynInvoiceService>,
    views: web::Data<ViewCache>,
    form: web::Form<InvoiceForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let outcome = web::block(move || service.create_invoice(&form)).await?;

    Ok(respond(outcome, &views))
}

/// POST /dashboard/invoices/{id}
///
/// Replaces customer, amount and status. The id and date never change.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}",
    params(
        ("id" = String, Path, description = "Invoice id"),
    ),
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the invoice list"),
        (status = 422, description = "Invalid fields", body = FormState),
        (status = 500, description = "Database error", body = FormState),
    ),
    tag = "invoices"
)]
pub async fn update_invoice(
    service: web::Data<DynInvoiceService>,
    views: web::Data<ViewCache>,
    path: web::Path<String>,
    form: web::Form<InvoiceForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let form = form.into_inner();

    let outcome = web::block(move || service.update_invoice(&id, &form)).await?;

    Ok(respond(outcome, &views))
}

/// DELETE /dashboard/invoices/{id}
#[utoipa::path(
    delete,
    path = "/dashboard/invoices/{id}",
    params(
        ("id" = String, Path, description = "Invoice id"),
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 500, description = "Database error", body = FormState),
    ),
    tag = "invoices"
)]
pub async fn delete_invoice(
    service: web::Data<DynInvoiceService>,
    views: web::Data<ViewCache>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let outcome = web::block(move || service.delete_invoice(&id)).await?;

    Ok(respond(outcome, &views))
}

/// GET /dashboard/invoices/{id}
#[utoipa::path(
    get,
    path = "/dashboard/invoices/{id}",
    params(
        ("id" = String, Path, description = "Invoice id"),
    ),
    responses(
        (status = 200, description = "Invoice found", body = InvoiceResponse),
        (status = 404, description = "Invoice not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "invoices"
)]
pub async fn get_invoice(
    service: web::Data<DynInvoiceService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let invoice = web::block(move || service.get_invoice(&id)).await??;

    Ok(HttpResponse::Ok().json(InvoiceResponse::from(invoice)))
}

/// GET /dashboard/invoices
///
/// Served from the view cache until an invoice mutation revalidates it.
#[utoipa::path(
    get,
    path = "/dashboard/invoices",
    params(
        ("query" = Option<String>, Query, description = "Search text"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
    ),
    responses(
        (status = 200, description = "One page of invoices", body = ListInvoicesResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "invoices"
)]
pub async fn list_invoices(
    service: web::Data<DynInvoiceService>,
    views: web::Data<ViewCache>,
    query: web::Query<ListInvoicesParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let page = params.page.max(1);
    let variant = format!("query={}&page={}", params.query, page);

    if let Some(cached) = views.get(INVOICES_PATH, &variant) {
        return Ok(HttpResponse::Ok().json(cached));
    }
    let generation = views.generation(INVOICES_PATH);

    let search = params.query;
    let result = web::block(move || service.list_invoices(&search, page)).await??;

    let body = ListInvoicesResponse {
        total_pages: result.total_pages(),
        total: result.total,
        page,
        items: result.items.into_iter().map(Into::into).collect(),
    };
    let view = serde_json::to_value(&body).map_err(|e| AppError::Internal(e.to_string()))?;
    views.put(INVOICES_PATH, &variant, generation, view.clone());

    Ok(HttpResponse::Ok().json(view))
}
