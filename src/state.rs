//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;

/// Cloneable handle to the services used by HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }
}
