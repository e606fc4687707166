//! Pets, their categories and tags.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Pet lifecycle status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    pub const ALL: [PetStatus; 3] = [PetStatus::Available, PetStatus::Pending, PetStatus::Sold];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PetStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "invalid pet status: {} (expected available, pending or sold)",
                    s
                ))
            })
    }
}

/// Reference data; rows are created out-of-band.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Fully composed pet: category embedded, tags resolved through `pet_tags`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub category: Category,
    pub name: String,
    pub photo_urls: Vec<String>,
    pub tags: Vec<Tag>,
    pub status: PetStatus,
}

/// Category as submitted by a client. Only the id is used; the stored name wins.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CategoryRef {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Tag as submitted by a client. Tags are matched by name (find-or-create).
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct TagInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Body of `POST /pet` and `PUT /pet`. `id` is ignored on create and required on full update.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub category: CategoryRef,
    pub name: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<TagInput>,
    pub status: PetStatus,
}

/// Body of `PUT /pet/{petId}`: only name and status are applied. Other fields are accepted and ignored.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct PetPatch {
    pub name: String,
    pub status: PetStatus,
}
