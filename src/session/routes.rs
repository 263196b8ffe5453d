use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::invoice::routes::{parse_discount, pdf_response};
use crate::invoice::{compute_row_totals, summarize, CustomerInfo, InvoiceSummary, ItemRow, RowInput};
use crate::render::InvoiceDocument;
use crate::{AppState, ErrorResponse};

use super::model::{AddRowResponse, DiscountSetting, InvoiceSession, UpdateDiscountRequest};
use super::SessionError;

fn session_error_response(error: &SessionError) -> HttpResponse {
    let message = error.to_string();
    match error {
        SessionError::NotFound(_) | SessionError::RowOutOfRange { .. } => {
            HttpResponse::NotFound().json(ErrorResponse::not_found(&message))
        }
        SessionError::RowLimitReached(_) => {
            HttpResponse::Conflict().json(ErrorResponse::new("Conflict", &message))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "Invoice Session",
    responses(
        (status = 201, description = "Session created", body = InvoiceSession)
    )
)]
pub async fn create_session(state: web::Data<AppState>) -> impl Responder {
    let session = state.sessions.create().await;
    HttpResponse::Created().json(session)
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Current form state", body = InvoiceSession),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn get_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.sessions.snapshot(&path.into_inner()).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => session_error_response(&e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session removed"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn delete_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    if state.sessions.remove(&id).await {
        HttpResponse::NoContent().finish()
    } else {
        session_error_response(&SessionError::NotFound(id))
    }
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/customer",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = CustomerInfo,
    responses(
        (status = 200, description = "Customer updated", body = CustomerInfo),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn update_customer(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CustomerInfo>,
) -> impl Responder {
    let customer = body.into_inner();
    let result = state
        .sessions
        .with_session(&path.into_inner(), |session| {
            session.customer = customer;
            session.customer.clone()
        })
        .await;

    match result {
        Ok(customer) => HttpResponse::Ok().json(customer),
        Err(e) => session_error_response(&e),
    }
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/items",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Row appended, or not when the last row is blank", body = AddRowResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "Row limit reached", body = ErrorResponse)
    )
)]
pub async fn add_item_row(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let max_rows = state.config.max_item_rows;
    let result = state
        .sessions
        .with_session(&id, |session| {
            session.add_row(max_rows).map(|appended| AddRowResponse {
                appended,
                rows: session.rows.clone(),
            })
        })
        .await
        .and_then(|inner| inner);

    match result {
        Ok(response) => {
            if response.appended {
                log::debug!("Session {} now has {} rows", id, response.rows.len());
            }
            HttpResponse::Ok().json(response)
        }
        Err(e) => session_error_response(&e),
    }
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/items/{index}",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID"),
        ("index" = usize, Path, description = "0-based row index")
    ),
    request_body = RowInput,
    responses(
        (status = 200, description = "Row updated; status carries any validation hint", body = ItemRow),
        (status = 404, description = "Session or row not found", body = ErrorResponse)
    )
)]
pub async fn update_item_row(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, usize)>,
    body: web::Json<RowInput>,
) -> impl Responder {
    let (id, index) = path.into_inner();
    let input = body.into_inner();
    let result = state
        .sessions
        .with_session(&id, |session| session.update_row(index, input).cloned())
        .await
        .and_then(|inner| inner);

    match result {
        Ok(row) => HttpResponse::Ok().json(row),
        Err(e) => session_error_response(&e),
    }
}

#[utoipa::path(
    put,
    path = "/api/sessions/{id}/discount",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = UpdateDiscountRequest,
    responses(
        (status = 200, description = "Discount updated", body = DiscountSetting),
        (status = 400, description = "Percentage outside 0..=100", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn update_discount(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDiscountRequest>,
) -> impl Responder {
    let percent = match parse_discount(body.percent) {
        Ok(percent) => percent,
        Err(response) => return response,
    };
    let setting = DiscountSetting {
        enabled: body.enabled,
        percent,
    };

    let result = state
        .sessions
        .with_session(&path.into_inner(), |session| {
            session.discount = setting;
            session.discount
        })
        .await;

    match result {
        Ok(discount) => HttpResponse::Ok().json(discount),
        Err(e) => session_error_response(&e),
    }
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}/summary",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Listed items, skipped rows and totals", body = InvoiceSummary),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn get_summary(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let result = state
        .sessions
        .with_session(&path.into_inner(), |session| {
            summarize(&session.rows, session.discount.effective())
        })
        .await;

    match result {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => session_error_response(&e),
    }
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/finish",
    tag = "Invoice Session",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Invoice PDF download", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn finish_invoice(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();
    let document = state
        .sessions
        .with_session(&id, |session| {
            let row_totals = compute_row_totals(&session.rows, session.discount.effective());
            InvoiceDocument::new(session.customer.clone(), row_totals)
        })
        .await;

    match document {
        Ok(document) => {
            log::info!("Finishing invoice for session {}", id);
            pdf_response(&state, document).await
        }
        Err(e) => session_error_response(&e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/sessions").route(web::post().to(create_session)))
        .service(
            web::resource("/sessions/{id}")
                .route(web::get().to(get_session))
                .route(web::delete().to(delete_session)),
        )
        .service(web::resource("/sessions/{id}/customer").route(web::put().to(update_customer)))
        .service(web::resource("/sessions/{id}/items").route(web::post().to(add_item_row)))
        .service(
            web::resource("/sessions/{id}/items/{index}").route(web::put().to(update_item_row)),
        )
        .service(web::resource("/sessions/{id}/discount").route(web::put().to(update_discount)))
        .service(web::resource("/sessions/{id}/summary").route(web::get().to(get_summary)))
        .service(web::resource("/sessions/{id}/finish").route(web::post().to(finish_invoice)));
}
