//! Pet handlers: listing, lookup, create, full and partial update, delete, image upload.

use crate::error::AppError;
use crate::model::{Pet, PetInput, PetPatch, PetStatus};
use crate::response::{self, ImageUploaded, MessageBody, PetUpdated};
use crate::service::{PetService, RequestValidator};
use crate::state::AppState;
use crate::uploads::{image_url, stored_image_name};
use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Multipart form accepted by the image upload route.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "All pets", body = [Pet])),
    tag = "pet",
)]
pub async fn list_pets(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let pets = PetService::list(&state.gateway).await?;
    Ok(response::ok(pets))
}

#[utoipa::path(
    get,
    path = "/pets/{petId}",
    params(("petId" = i64, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet found", body = Pet),
        (status = 404, description = "Pet not found"),
        (status = 422, description = "Pet id is not an integer"),
    ),
    tag = "pet",
)]
pub async fn get_pet(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let pet_id = RequestValidator::parse_id(&raw_id, "petId")?;
    let pet = PetService::find_by_id(&state.gateway, pet_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("pet {}", pet_id)))?;
    Ok(response::ok(pet))
}

#[utoipa::path(
    get,
    path = "/pet/findByStatus",
    params(("status" = PetStatus, Query, description = "Status to match")),
    responses(
        (status = 200, description = "Last pet with the status", body = Pet),
        (status = 404, description = "No pet has the status"),
        (status = 422, description = "Missing or unknown status"),
    ),
    tag = "pet",
)]
pub async fn find_by_status(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let status: PetStatus = RequestValidator::parse_required(query.get("status"), "status")?;
    let pet = PetService::find_by_status(&state.gateway, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no pet with status {}", status)))?;
    Ok(response::ok(pet))
}

#[utoipa::path(
    post,
    path = "/pet/{petId}/uploadImage",
    params(("petId" = i64, Path, description = "Pet id")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored and appended to photoUrls", body = ImageUploaded),
        (status = 400, description = "Missing file field or file name"),
        (status = 404, description = "Pet not found"),
        (status = 500, description = "Not an image, or the file could not be stored"),
    ),
    tag = "pet",
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let pet_id = RequestValidator::parse_id(&raw_id, "petId")?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        RequestValidator::validate_image_content_type(field.content_type())?;
        let filename = RequestValidator::sanitize_filename(field.file_name())?;
        if !PetService::exists(&state.gateway, pet_id).await? {
            return Err(AppError::NotFound(format!("pet {}", pet_id)));
        }
        let bytes = field.bytes().await.map_err(|e| AppError::BadRequest(e.body_text()))?;
        let stored = stored_image_name(pet_id, &filename);
        state.images.save(&stored, &bytes).await?;
        let url = image_url(&stored);
        PetService::append_photo_url(&state.gateway, pet_id, &url).await?;
        tracing::info!(pet_id, url = %url, size = bytes.len(), "pet image uploaded");
        return Ok(response::image_uploaded(pet_id, url));
    }
    Err(AppError::BadRequest("missing 'file' field in multipart body".into()))
}

#[utoipa::path(
    post,
    path = "/pet",
    request_body = PetInput,
    responses(
        (status = 200, description = "Stored pet", body = Pet),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Invalid pet"),
    ),
    tag = "pet",
)]
pub async fn add_pet(
    State(state): State<AppState>,
    payload: Result<Json<PetInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    RequestValidator::validate_pet(&input)?;
    let pet = PetService::create(&state.gateway, &input).await?;
    Ok(response::ok(pet))
}

#[utoipa::path(
    put,
    path = "/pet",
    request_body = PetInput,
    responses(
        (status = 200, description = "Stored pet after the update", body = Pet),
        (status = 404, description = "Pet or category not found"),
        (status = 422, description = "Missing id or invalid pet"),
    ),
    tag = "pet",
)]
pub async fn update_pet(
    State(state): State<AppState>,
    payload: Result<Json<PetInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let pet_id = RequestValidator::require_pet_id(&input)?;
    RequestValidator::validate_pet(&input)?;
    let pet = PetService::update(&state.gateway, pet_id, &input).await?;
    Ok(response::ok(pet))
}

#[utoipa::path(
    put,
    path = "/pet/{petId}",
    params(("petId" = i64, Path, description = "Pet id")),
    request_body = PetPatch,
    responses(
        (status = 200, description = "Name and status updated", body = PetUpdated),
        (status = 404, description = "Pet not found"),
    ),
    tag = "pet",
)]
pub async fn update_pet_name_status(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<PetPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(patch) = payload?;
    let pet_id = RequestValidator::parse_id(&raw_id, "petId")?;
    PetService::update_name_status(&state.gateway, pet_id, &patch).await?;
    Ok(response::pet_updated(pet_id))
}

#[utoipa::path(
    delete,
    path = "/pet/{petId}",
    params(("petId" = i64, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet, its orders and tag links deleted", body = MessageBody),
        (status = 404, description = "Pet not found"),
    ),
    tag = "pet",
)]
pub async fn delete_pet(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let pet_id = RequestValidator::parse_id(&raw_id, "petId")?;
    PetService::delete(&state.gateway, pet_id).await?;
    Ok(response::message(format!(
        "Pet with ID {} and its associated orders have been deleted successfully.",
        pet_id
    )))
}
