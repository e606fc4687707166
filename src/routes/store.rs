//! Store routes.

use crate::handlers::store::{delete_order, get_order, inventory, place_order};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn store_routes(state: AppState) -> Router {
    Router::new()
        .route("/store/inventory", get(inventory))
        .route("/store/order", post(place_order))
        .route("/store/order/:order_id", get(get_order).delete(delete_order))
        .with_state(state)
}
