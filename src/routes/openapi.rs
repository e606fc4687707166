//! Generated OpenAPI document, served at `GET /openapi.json`.

use crate::handlers::{pets, store, users};
use crate::model::{
    Category, CategoryRef, Order, OrderInput, OrderStatus, Pet, PetInput, PetPatch, PetStatus, Tag, TagInput, User,
    UserInput,
};
use crate::response::{ImageUploaded, MessageBody, PetUpdated};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "petstore-api", description = "Pets, store orders and users"),
    paths(
        pets::list_pets,
        pets::get_pet,
        pets::find_by_status,
        pets::upload_image,
        pets::add_pet,
        pets::update_pet,
        pets::update_pet_name_status,
        pets::delete_pet,
        store::inventory,
        store::get_order,
        store::place_order,
        store::delete_order,
        users::get_user,
        users::create_user,
        users::create_users_with_list,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(
        Category,
        CategoryRef,
        Tag,
        TagInput,
        Pet,
        PetInput,
        PetPatch,
        PetStatus,
        Order,
        OrderInput,
        OrderStatus,
        User,
        UserInput,
        MessageBody,
        PetUpdated,
        ImageUploaded,
        pets::ImageUploadForm,
    )),
    tags(
        (name = "pet", description = "Pets, their tags and photos"),
        (name = "store", description = "Orders placed for pets"),
        (name = "user", description = "User accounts"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route("/openapi.json", get(openapi_json))
}
