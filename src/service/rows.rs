//! Raw rows as stored. Column names are the storage names; the assembler maps them to domain fields.

use chrono::{DateTime, Utc};

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct TagRow {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct PetRow {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    /// JSON array of strings.
    pub photo_urls: String,
    pub status: String,
}

#[derive(Clone, Copy, Debug, sqlx::FromRow)]
pub struct PetTagRow {
    pub pet_id: i64,
    pub tag_id: i64,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub pet_id: i64,
    pub quantity: i32,
    pub ship_date: DateTime<Utc>,
    pub status: String,
    pub complete: bool,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub user_status: i32,
}

#[derive(Clone, Copy, Debug, sqlx::FromRow)]
pub struct IdRow {
    pub id: i64,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct PhotoUrlsRow {
    pub photo_urls: String,
}
