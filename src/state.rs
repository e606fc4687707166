//! Shared application state for all routes.

use crate::service::Gateway;
use crate::uploads::ImageStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(gateway: Gateway, images: Arc<dyn ImageStore>) -> Self {
        AppState { gateway, images }
    }
}
