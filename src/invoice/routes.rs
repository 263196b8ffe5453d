//! Stateless invoice endpoints: compute a summary or render a PDF from one request.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::render::{InvoiceDocument, RenderError};
use crate::{AppState, ErrorResponse};

use super::calculator::compute_row_totals;
use super::model::{CustomerInfo, ItemRow, RowInput};
use super::money::DiscountPercent;
use super::summary::{summarize, InvoiceSummary};
use super::validation::ValidationError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TotalsRequest {
    #[serde(default)]
    pub items: Vec<RowInput>,
    #[serde(default)]
    #[schema(value_type = String, example = "10")]
    pub discount_percent: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceRequest {
    pub customer: CustomerInfo,
    #[serde(default)]
    pub items: Vec<RowInput>,
    #[serde(default)]
    #[schema(value_type = String, example = "10")]
    pub discount_percent: Decimal,
}

/// Validate a discount at the boundary, producing the 400 response on failure.
pub(crate) fn parse_discount(value: Decimal) -> Result<DiscountPercent, HttpResponse> {
    DiscountPercent::new(value).map_err(|e| {
        let error = ValidationError::discount_out_of_range("discount_percent", &e);
        HttpResponse::BadRequest().json(ErrorResponse::bad_request(&error.to_string()))
    })
}

/// Stateless requests get the same row limit as a session's item list.
fn check_row_limit(rows: usize, max_rows: usize) -> Result<(), HttpResponse> {
    if rows > max_rows {
        let message = format!("item list has {} rows, the maximum is {}", rows, max_rows);
        log::debug!("Rejected invoice request: {}", message);
        return Err(HttpResponse::Conflict().json(ErrorResponse::new("Conflict", &message)));
    }
    Ok(())
}

/// Render the document on the blocking pool and stream it back as an attachment.
pub(crate) async fn pdf_response(state: &AppState, document: InvoiceDocument) -> HttpResponse {
    let renderer = state.renderer.clone();
    let item_count = document.items.len();

    let rendered = web::block(move || renderer.render(&document))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))
        .and_then(|result| result);

    match rendered {
        Ok(generated) => {
            log::info!(
                "Generated invoice {} ({} items, {} bytes)",
                generated.filename,
                item_count,
                generated.pdf.len()
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(generated.filename)],
                })
                .body(generated.pdf)
        }
        Err(e) => {
            log::error!("Failed to render invoice: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to render invoice"))
        }
    }
}

fn to_rows(items: Vec<RowInput>) -> Vec<ItemRow> {
    items.into_iter().map(ItemRow::new).collect()
}

#[utoipa::path(
    post,
    path = "/api/invoices/totals",
    tag = "Invoice",
    request_body = TotalsRequest,
    responses(
        (status = 200, description = "Totals over the valid rows", body = InvoiceSummary),
        (status = 400, description = "Discount outside 0..=100", body = ErrorResponse),
        (status = 409, description = "Too many item rows", body = ErrorResponse)
    )
)]
pub async fn compute_invoice_totals(
    state: web::Data<AppState>,
    body: web::Json<TotalsRequest>,
) -> impl Responder {
    let request = body.into_inner();
    if let Err(response) = check_row_limit(request.items.len(), state.config.max_item_rows) {
        return response;
    }
    let discount = match parse_discount(request.discount_percent) {
        Ok(discount) => discount,
        Err(response) => return response,
    };

    let summary = summarize(&to_rows(request.items), discount);
    HttpResponse::Ok().json(summary)
}

#[utoipa::path(
    post,
    path = "/api/invoices/pdf",
    tag = "Invoice",
    request_body = InvoiceRequest,
    responses(
        (status = 200, description = "Invoice PDF download", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Discount outside 0..=100", body = ErrorResponse),
        (status = 409, description = "Too many item rows", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_invoice_pdf(
    state: web::Data<AppState>,
    body: web::Json<InvoiceRequest>,
) -> impl Responder {
    let request = body.into_inner();
    if let Err(response) = check_row_limit(request.items.len(), state.config.max_item_rows) {
        return response;
    }
    let discount = match parse_discount(request.discount_percent) {
        Ok(discount) => discount,
        Err(response) => return response,
    };

    let row_totals = compute_row_totals(&to_rows(request.items), discount);
    if !row_totals.skipped.is_empty() {
        log::debug!("Skipping {} invalid rows", row_totals.skipped.len());
    }

    pdf_response(&state, InvoiceDocument::new(request.customer, row_totals)).await
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/invoices/totals").route(web::post().to(compute_invoice_totals)))
        .service(web::resource("/invoices/pdf").route(web::post().to(generate_invoice_pdf)));
}
