#![allow(dead_code)]

use actix_web::web;
use electronic_bill_server::render::{
    DocumentRenderer, GeneratedDocument, InvoiceDocument, RenderError,
};
use electronic_bill_server::{AppConfig, AppState};
use std::sync::Arc;

/// App state with default configuration and the real PDF renderer.
pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(AppConfig::default()))
}

/// App state with a custom configuration.
pub fn test_state_with(config: AppConfig) -> web::Data<AppState> {
    web::Data::new(AppState::new(config))
}

/// Renderer that always fails, for exercising the 500 path.
pub struct FailingRenderer;

impl DocumentRenderer for FailingRenderer {
    fn render(&self, _document: &InvoiceDocument) -> Result<GeneratedDocument, RenderError> {
        Err(RenderError::Serialize("disk full".to_string()))
    }
}

pub fn failing_state() -> web::Data<AppState> {
    web::Data::new(AppState::new_with_renderer(
        AppConfig::default(),
        Arc::new(FailingRenderer),
    ))
}
