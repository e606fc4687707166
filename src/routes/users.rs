//! User routes. `/user/createWithList` is matched before `/user/:username`.

use crate::handlers::users::{create_user, create_users_with_list, delete_user, get_user, update_user};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/createWithList", post(create_users_with_list))
        .route("/user/:username", get(get_user).put(update_user).delete(delete_user))
        .with_state(state)
}
