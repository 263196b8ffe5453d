//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::render::{DocumentRenderer, PdfInvoiceRenderer};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub sessions: SessionStore,
    pub renderer: Arc<dyn DocumentRenderer + Send + Sync>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let renderer = Arc::new(PdfInvoiceRenderer::new(
            config.invoice_title.clone(),
            config.invoice_filename.clone(),
        ));
        Self::new_with_renderer(config, renderer)
    }

    pub fn new_with_renderer(
        config: AppConfig,
        renderer: Arc<dyn DocumentRenderer + Send + Sync>,
    ) -> Self {
        let sessions = SessionStore::new(config.session_ttl, config.session_capacity);
        Self {
            config,
            sessions,
            renderer,
        }
    }
}
