use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::checkout_service::CheckoutService;
use crate::domain::checkout::{CheckoutLine, CheckoutLineRequest, CheckoutSummary};
use crate::domain::ports::{Catalog, Clock, DiscountResolver};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutProductRequest {
    pub id: i32,
    /// Must be at least 1.
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub products: Vec<CheckoutProductRequest>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CheckoutProductResponse {
    pub id: i32,
    pub quantity: i32,
    pub unit_amount: i64,
    pub total_amount: i64,
    pub discount: i64,
    pub is_gift: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CheckoutResponse {
    pub total_amount: i64,
    pub total_amount_with_discount: i64,
    pub total_discount: i64,
    pub products: Vec<CheckoutProductResponse>,
}

impl From<&CheckoutLine> for CheckoutProductResponse {
    fn from(line: &CheckoutLine) -> Self {
        Self {
            id: line.product_id(),
            quantity: line.quantity(),
            unit_amount: line.unit_amount(),
            total_amount: line.total_amount(),
            discount: line.discount(),
            is_gift: line.is_gift(),
        }
    }
}

impl From<&CheckoutSummary> for CheckoutResponse {
    fn from(summary: &CheckoutSummary) -> Self {
        Self {
            total_amount: summary.total_amount(),
            total_amount_with_discount: summary.total_amount_with_discount(),
            total_discount: summary.total_discount(),
            products: summary.lines().iter().map(Into::into).collect(),
        }
    }
}

impl CheckoutRequest {
    fn validate(&self) -> Result<Vec<CheckoutLineRequest>, AppError> {
        if self.products.is_empty() {
            return Err(AppError::BadRequest(
                "Request must have at least one product".to_string(),
            ));
        }
        if let Some(p) = self.products.iter().find(|p| p.quantity < 1) {
            return Err(AppError::BadRequest(format!(
                "Product with id={} has quantity={}, quantity must be at least 1",
                p.id, p.quantity
            )));
        }

        Ok(self
            .products
            .iter()
            .map(|p| CheckoutLineRequest {
                product_id: p.id,
                quantity: p.quantity,
            })
            .collect())
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /checkout
///
/// Prices the requested products. Unknown and gift products are left out of
/// the response; on the promotional date a free gift line is appended.
#[utoipa::path(
    post,
    path = "/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout priced", body = CheckoutResponse),
        (status = 400, description = "Malformed request"),
        (status = 405, description = "Method other than POST"),
    ),
    tag = "checkout"
)]
pub async fn checkout<C: Catalog, D: DiscountResolver>(
    service: web::Data<CheckoutService<C, D>>,
    clock: web::Data<dyn Clock>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let lines = body.into_inner().validate()?;

    let summary = service.process_request(&lines, clock.today()).await;

    Ok(HttpResponse::Ok().json(CheckoutResponse::from(&summary)))
}

/// Fallback for any method other than POST on `/checkout`.
pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed("POST"))
}
