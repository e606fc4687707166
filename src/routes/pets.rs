//! Pet routes.

use crate::handlers::pets::{
    add_pet, delete_pet, find_by_status, get_pet, list_pets, update_pet, update_pet_name_status, upload_image,
};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn pet_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_pets))
        .route("/pets/:pet_id", get(get_pet))
        .route("/pet", post(add_pet).put(update_pet))
        .route("/pet/findByStatus", get(find_by_status))
        .route("/pet/:pet_id", put(update_pet_name_status).delete(delete_pet))
        .route("/pet/:pet_id/uploadImage", post(upload_image))
        .with_state(state)
}
