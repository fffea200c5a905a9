use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::CustomerRepository;
use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
}

/// GET /dashboard/customers
///
/// Options for the customer dropdown of the invoice forms.
#[utoipa::path(
    get,
    path = "/dashboard/customers",
    responses(
        (status = 200, description = "All customers, by name", body = [CustomerResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn list_customers(
    customers: web::Data<dyn CustomerRepository>,
) -> Result<HttpResponse, AppError> {
    let rows = web::block(move || customers.list()).await??;

    let body: Vec<CustomerResponse> = rows
        .into_iter()
        .map(|c| CustomerResponse {
            id: c.id,
            name: c.name,
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}
