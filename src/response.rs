//! Response bodies that are not domain entities.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdated {
    pub message: String,
    pub pet_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImageUploaded {
    pub message: String,
    pub image_url: String,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn message(text: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody { message: text.into() })
}

pub fn pet_updated(pet_id: i64) -> (StatusCode, Json<PetUpdated>) {
    ok(PetUpdated {
        message: "Pet updated successfully".into(),
        pet_id,
    })
}

pub fn image_uploaded(pet_id: i64, image_url: String) -> (StatusCode, Json<ImageUploaded>) {
    ok(ImageUploaded {
        message: format!("Image for pet {} uploaded successfully!", pet_id),
        image_url,
    })
}
