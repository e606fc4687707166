//! Router assembly.

pub mod common;
pub mod openapi;
pub mod pets;
pub mod store;
pub mod users;

pub use common::common_routes;
pub use openapi::{openapi_routes, ApiDoc};
pub use pets::pet_routes;
pub use store::store_routes;
pub use users::user_routes;

use crate::settings::Settings;
use crate::state::AppState;
use crate::uploads::IMAGE_URL_PREFIX;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

/// The full application: API routes, stored images under `/uploaded_images`, body limit and tracing.
pub fn app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(pet_routes(state.clone()))
        .merge(store_routes(state.clone()))
        .merge(user_routes(state))
        .merge(openapi_routes())
        .nest_service(IMAGE_URL_PREFIX, ServeDir::new(&settings.upload_dir))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(settings.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}
