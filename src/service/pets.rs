//! Pet operations. Every multi-statement write runs in one transaction and returns the pet as re-read
//! from storage.

use crate::error::AppError;
use crate::model::{Pet, PetInput, PetPatch, PetStatus};
use crate::service::assembler::{self, encode_photo_urls, last_match};
use crate::service::gateway::{self, Gateway};
use crate::service::rows::{CategoryRow, IdRow, PhotoUrlsRow};
use crate::sql::queries;
use sqlx::PgConnection;

pub struct PetService;

impl PetService {
    pub async fn list(gw: &Gateway) -> Result<Vec<Pet>, AppError> {
        assembler::load_all_pets(gw).await
    }

    /// First pet with `id`, found by scanning the freshly loaded collection.
    pub async fn find_by_id(gw: &Gateway, id: i64) -> Result<Option<Pet>, AppError> {
        Ok(Self::list(gw).await?.into_iter().find(|p| p.id == id))
    }

    /// Last pet with `status` in storage order (ascending id).
    pub async fn find_by_status(gw: &Gateway, status: PetStatus) -> Result<Option<Pet>, AppError> {
        Ok(last_match(Self::list(gw).await?, |p| p.status == status))
    }

    /// Insert the pet and its tag associations, then return the stored representation.
    pub async fn create(gw: &Gateway, input: &PetInput) -> Result<Pet, AppError> {
        let mut tx = gw.begin().await?;
        Self::require_category(&mut tx, input.category.id).await?;
        let photo_urls = encode_photo_urls(&input.photo_urls)?;
        let pet_id = gateway::insert(
            &mut tx,
            queries::INSERT_PET,
            &[
                input.category.id.into(),
                input.name.as_str().into(),
                photo_urls.into(),
                input.status.as_str().into(),
            ],
        )
        .await?
        .inserted_id
        .ok_or_else(|| AppError::Internal("pet insert returned no id".into()))?;
        assembler::attach_tags(&mut tx, pet_id, &input.tags).await?;
        let pet = Self::reload(&mut tx, pet_id).await?;
        tx.commit().await?;
        tracing::info!(pet_id, tags = pet.tags.len(), "pet created");
        Ok(pet)
    }

    /// Full update by body id. Photo URLs change only when a non-empty list is supplied; the tag
    /// set is always replaced (an empty list clears it).
    pub async fn update(gw: &Gateway, pet_id: i64, input: &PetInput) -> Result<Pet, AppError> {
        let mut tx = gw.begin().await?;
        Self::require_category(&mut tx, input.category.id).await?;
        let updated = gateway::execute(
            &mut tx,
            queries::UPDATE_PET_CORE,
            &[
                input.category.id.into(),
                input.name.as_str().into(),
                input.status.as_str().into(),
                pet_id.into(),
            ],
        )
        .await?;
        if updated.rows_affected == 0 {
            return Err(AppError::NotFound(format!("pet {}", pet_id)));
        }
        if !input.photo_urls.is_empty() {
            let photo_urls = encode_photo_urls(&input.photo_urls)?;
            gateway::execute(&mut tx, queries::UPDATE_PET_PHOTOS, &[photo_urls.into(), pet_id.into()]).await?;
        }
        gateway::execute(&mut tx, queries::DELETE_PET_TAGS_FOR_PET, &[pet_id.into()]).await?;
        assembler::attach_tags(&mut tx, pet_id, &input.tags).await?;
        let pet = Self::reload(&mut tx, pet_id).await?;
        tx.commit().await?;
        tracing::info!(pet_id, "pet updated");
        Ok(pet)
    }

    /// Update only name and status.
    pub async fn update_name_status(gw: &Gateway, pet_id: i64, patch: &PetPatch) -> Result<(), AppError> {
        let mut tx = gw.begin().await?;
        Self::lock_pet(&mut tx, pet_id).await?;
        gateway::execute(
            &mut tx,
            queries::UPDATE_PET_NAME_STATUS,
            &[patch.name.as_str().into(), patch.status.as_str().into(), pet_id.into()],
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Delete orders referencing the pet, then its tag associations, then the pet.
    pub async fn delete(gw: &Gateway, pet_id: i64) -> Result<(), AppError> {
        let mut tx = gw.begin().await?;
        Self::lock_pet(&mut tx, pet_id).await?;
        let orders = gateway::execute(&mut tx, queries::DELETE_ORDERS_FOR_PET, &[pet_id.into()]).await?;
        let tags = gateway::execute(&mut tx, queries::DELETE_PET_TAGS_FOR_PET, &[pet_id.into()]).await?;
        gateway::execute(&mut tx, queries::DELETE_PET, &[pet_id.into()]).await?;
        tx.commit().await?;
        tracing::info!(
            pet_id,
            orders = orders.rows_affected,
            tags = tags.rows_affected,
            "pet deleted"
        );
        Ok(())
    }

    pub async fn exists(gw: &Gateway, pet_id: i64) -> Result<bool, AppError> {
        let mut conn = gw.acquire().await?;
        let row: Option<IdRow> = gateway::fetch_optional(&mut *conn, queries::SELECT_PET_EXISTS, &[pet_id.into()]).await?;
        Ok(row.is_some())
    }

    /// Append `url` to the stored photo-URL list (read-modify-write under a row lock).
    pub async fn append_photo_url(gw: &Gateway, pet_id: i64, url: &str) -> Result<Vec<String>, AppError> {
        let mut tx = gw.begin().await?;
        let row: PhotoUrlsRow = gateway::fetch_optional(&mut tx, queries::SELECT_PET_PHOTOS_FOR_UPDATE, &[pet_id.into()])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("pet {}", pet_id)))?;
        let mut urls = assembler::decode_photo_urls(&row.photo_urls)?;
        urls.push(url.to_string());
        gateway::execute(
            &mut tx,
            queries::UPDATE_PET_PHOTOS,
            &[encode_photo_urls(&urls)?.into(), pet_id.into()],
        )
        .await?;
        tx.commit().await?;
        Ok(urls)
    }

    async fn require_category(conn: &mut PgConnection, category_id: i64) -> Result<(), AppError> {
        let row: Option<CategoryRow> =
            gateway::fetch_optional(conn, queries::SELECT_CATEGORY_BY_ID, &[category_id.into()]).await?;
        row.map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("category {}", category_id)))
    }

    async fn lock_pet(conn: &mut PgConnection, pet_id: i64) -> Result<(), AppError> {
        let row: Option<IdRow> = gateway::fetch_optional(conn, queries::SELECT_PET_ID_FOR_UPDATE, &[pet_id.into()]).await?;
        row.map(|_| ()).ok_or_else(|| AppError::NotFound(format!("pet {}", pet_id)))
    }

    async fn reload(conn: &mut PgConnection, pet_id: i64) -> Result<Pet, AppError> {
        assembler::load_pet(conn, pet_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("pet {}", pet_id)))
    }
}
