use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{error, http::header, web, App, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod invoice;
pub mod render;
pub mod session;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new("BadRequest", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::session::routes::create_session,
        crate::session::routes::get_session,
        crate::session::routes::delete_session,
        crate::session::routes::update_customer,
        crate::session::routes::add_item_row,
        crate::session::routes::update_item_row,
        crate::session::routes::update_discount,
        crate::session::routes::get_summary,
        crate::session::routes::finish_invoice,
        crate::invoice::routes::compute_invoice_totals,
        crate::invoice::routes::generate_invoice_pdf
    ),
    components(
        schemas(
            session::InvoiceSession,
            session::DiscountSetting,
            session::UpdateDiscountRequest,
            session::AddRowResponse,
            invoice::CustomerInfo,
            invoice::RowInput,
            invoice::ItemRow,
            invoice::RowStatus,
            invoice::LineItem,
            invoice::Money,
            invoice::Quantity,
            invoice::DiscountPercent,
            invoice::InvoiceTotals,
            invoice::InvoiceSummary,
            invoice::SkippedRow,
            invoice::ValidationError,
            invoice::routes::TotalsRequest,
            invoice::routes::InvoiceRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Invoice Session", description = "Interactive invoice form: customer, item rows, discount, download."),
        (name = "Invoice", description = "Stateless totals and PDF rendering.")
    )
)]
pub struct ApiDoc;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Malformed JSON bodies get the same error envelope as everything else.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::debug!("Rejected request body: {}", message);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message)),
        )
        .into()
    })
}

/// Path segments that do not parse (a bad session id or row index) name
/// nothing that exists, so they answer 404 in the usual envelope.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        let message = err.to_string();
        log::debug!("Rejected path {}: {}", req.path(), message);
        error::InternalError::from_response(
            err,
            HttpResponse::NotFound().json(ErrorResponse::not_found(&message)),
        )
        .into()
    })
}

/// Register every route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/health", web::get().to(health))
        .service(
            web::scope("/api")
                .configure(session::routes::config)
                .configure(invoice::routes::config),
        );
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let app_state = web::Data::new(AppState::new(config.clone()));

    let prometheus = PrometheusMetricsBuilder::new("electronic_bill_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {}", e))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let origins = config.cors_allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(build_cors(&origins))
            .app_data(app_state.clone())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("server terminated with an error")
}
