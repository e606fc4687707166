//! Entity assembly: turn raw rows into composed domain objects.
//!
//! Pets are built from four row sets (pets, categories, tags, pet_tags). The tag lookup and the
//! pet-id -> tags mapping are each built in a single pass, so composing N pets is linear in the
//! number of rows rather than pets x tags.
//!
//! Photo URLs are stored as a JSON array of strings and decoded with `serde_json` only. The stored
//! text originates from client input; anything that is not a JSON array of strings is a decode
//! error, never evaluated.

use crate::error::AppError;
use crate::model::{Category, Order, Pet, Tag, TagInput, User};
use crate::service::gateway::{self, Gateway};
use crate::service::rows::{CategoryRow, IdRow, OrderRow, PetRow, PetTagRow, TagRow, UserRow};
use crate::sql::queries;
use sqlx::PgConnection;
use std::collections::HashMap;

/// Decode the stored photo-URL column. Empty text is treated as an empty list.
pub fn decode_photo_urls(raw: &str) -> Result<Vec<String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<String>>(raw)
        .map_err(|e| AppError::Decode(format!("photo urls are not a JSON array of strings: {}", e)))
}

pub fn encode_photo_urls(urls: &[String]) -> Result<String, AppError> {
    serde_json::to_string(urls).map_err(|e| AppError::Decode(format!("photo urls: {}", e)))
}

pub fn category_index(rows: Vec<CategoryRow>) -> HashMap<i64, Category> {
    rows.into_iter()
        .map(|r| (r.id, Category { id: r.id, name: r.name }))
        .collect()
}

pub fn tag_index(rows: Vec<TagRow>) -> HashMap<i64, Tag> {
    rows.into_iter().map(|r| (r.id, Tag { id: r.id, name: r.name })).collect()
}

/// Group association rows by pet id, resolving each tag id through `tags`.
/// An association pointing at a missing tag is an integrity error.
pub fn tags_by_pet(assocs: &[PetTagRow], tags: &HashMap<i64, Tag>) -> Result<HashMap<i64, Vec<Tag>>, AppError> {
    let mut out: HashMap<i64, Vec<Tag>> = HashMap::new();
    for a in assocs {
        let tag = tags.get(&a.tag_id).ok_or_else(|| {
            AppError::Decode(format!("pet {} references missing tag {}", a.pet_id, a.tag_id))
        })?;
        out.entry(a.pet_id).or_default().push(tag.clone());
    }
    Ok(out)
}

/// Compose one pet from its row, its category and its tags.
pub fn compose_pet(row: PetRow, category: Category, tags: Vec<Tag>) -> Result<Pet, AppError> {
    let status = row
        .status
        .parse()
        .map_err(|_| AppError::Decode(format!("pet {} has unknown status '{}'", row.id, row.status)))?;
    Ok(Pet {
        id: row.id,
        category,
        name: row.name,
        photo_urls: decode_photo_urls(&row.photo_urls)?,
        tags,
        status,
    })
}

/// Compose every pet row. A missing category fails the whole assembly; a pet without
/// associations gets an empty tag list.
pub fn assemble_pets(
    pets: Vec<PetRow>,
    categories: &HashMap<i64, Category>,
    tags: &HashMap<i64, Tag>,
    assocs: &[PetTagRow],
) -> Result<Vec<Pet>, AppError> {
    let mut by_pet = tags_by_pet(assocs, tags)?;
    pets.into_iter()
        .map(|row| {
            let category = categories.get(&row.category_id).cloned().ok_or_else(|| {
                AppError::Decode(format!("pet {} references missing category {}", row.id, row.category_id))
            })?;
            let pet_tags = by_pet.remove(&row.id).unwrap_or_default();
            compose_pet(row, category, pet_tags)
        })
        .collect()
}

pub fn order_from_row(row: OrderRow) -> Result<Order, AppError> {
    let status = row
        .status
        .parse()
        .map_err(|_| AppError::Decode(format!("order {} has unknown status '{}'", row.id, row.status)))?;
    Ok(Order {
        id: row.id,
        pet_id: row.pet_id,
        quantity: row.quantity,
        ship_date: row.ship_date,
        status,
        complete: row.complete,
    })
}

pub fn user_from_row(row: UserRow) -> User {
    User {
        id: row.id,
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        user_status: row.user_status,
    }
}

/// Return the last item matching `pred` in iteration order.
pub fn last_match<T, F>(items: Vec<T>, mut pred: F) -> Option<T>
where
    F: FnMut(&T) -> bool,
{
    items.into_iter().filter(|item| pred(item)).last()
}

/// Load every pet with its category and tags using one pooled connection.
pub async fn load_all_pets(gw: &Gateway) -> Result<Vec<Pet>, AppError> {
    let mut conn = gw.acquire().await?;
    let pets: Vec<PetRow> = gateway::fetch_all(&mut *conn, queries::SELECT_PETS, &[]).await?;
    let categories: Vec<CategoryRow> = gateway::fetch_all(&mut *conn, queries::SELECT_CATEGORIES, &[]).await?;
    let tags: Vec<TagRow> = gateway::fetch_all(&mut *conn, queries::SELECT_TAGS, &[]).await?;
    let assocs: Vec<PetTagRow> = gateway::fetch_all(&mut *conn, queries::SELECT_PET_TAGS, &[]).await?;
    assemble_pets(pets, &category_index(categories), &tag_index(tags), &assocs)
}

/// Re-read one pet as stored (canonical representation). Runs on the caller's connection so it
/// sees the caller's uncommitted writes.
pub async fn load_pet(conn: &mut PgConnection, pet_id: i64) -> Result<Option<Pet>, AppError> {
    let Some(row) = gateway::fetch_optional::<PetRow>(conn, queries::SELECT_PET_BY_ID, &[pet_id.into()]).await? else {
        return Ok(None);
    };
    let category: CategoryRow =
        gateway::fetch_optional(conn, queries::SELECT_CATEGORY_BY_ID, &[row.category_id.into()])
            .await?
            .ok_or_else(|| {
                AppError::Decode(format!("pet {} references missing category {}", row.id, row.category_id))
            })?;
    let tags: Vec<TagRow> = gateway::fetch_all(conn, queries::SELECT_TAGS_FOR_PET, &[pet_id.into()]).await?;
    let tags = tags.into_iter().map(|t| Tag { id: t.id, name: t.name }).collect();
    compose_pet(row, Category { id: category.id, name: category.name }, tags).map(Some)
}

/// Find a tag by name, creating it when absent. Tag names are unique, so concurrent callers
/// racing on the same new name converge on one row.
pub async fn find_or_create_tag(conn: &mut PgConnection, name: &str) -> Result<i64, AppError> {
    if let Some(row) = gateway::fetch_optional::<IdRow>(conn, queries::SELECT_TAG_ID_BY_NAME, &[name.into()]).await? {
        return Ok(row.id);
    }
    if let Some(id) = gateway::insert(conn, queries::INSERT_TAG, &[name.into()]).await?.inserted_id {
        tracing::debug!(tag = name, id, "created tag");
        return Ok(id);
    }
    gateway::fetch_optional::<IdRow>(conn, queries::SELECT_TAG_ID_BY_NAME, &[name.into()])
        .await?
        .map(|r| r.id)
        .ok_or_else(|| AppError::NotFound(format!("tag '{}'", name)))
}

/// Resolve each submitted tag by name and associate it with `pet_id`. Repeated names collapse
/// into one association.
pub async fn attach_tags(conn: &mut PgConnection, pet_id: i64, tags: &[TagInput]) -> Result<Vec<i64>, AppError> {
    let mut tag_ids = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag_id = find_or_create_tag(conn, &tag.name).await?;
        gateway::execute(conn, queries::INSERT_PET_TAG, &[pet_id.into(), tag_id.into()]).await?;
        tag_ids.push(tag_id);
    }
    Ok(tag_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderStatus, PetStatus};
    use chrono::{TimeZone, Utc};

    fn pet_row(id: i64, category_id: i64, photo_urls: &str, status: &str) -> PetRow {
        PetRow {
            id,
            category_id,
            name: format!("pet-{}", id),
            photo_urls: photo_urls.to_string(),
            status: status.to_string(),
        }
    }

    fn categories() -> HashMap<i64, Category> {
        category_index(vec![
            CategoryRow { id: 1, name: "Dogs".into() },
            CategoryRow { id: 2, name: "Cats".into() },
        ])
    }

    fn tags() -> HashMap<i64, Tag> {
        tag_index(vec![
            TagRow { id: 10, name: "friendly".into() },
            TagRow { id: 11, name: "small".into() },
        ])
    }

    #[test]
    fn assembles_pets_with_categories_and_tags() {
        let pets = vec![
            pet_row(1, 1, r#"["/a.png","/b.png"]"#, "available"),
            pet_row(2, 2, "[]", "sold"),
        ];
        let assocs = vec![
            PetTagRow { pet_id: 1, tag_id: 10 },
            PetTagRow { pet_id: 1, tag_id: 11 },
        ];
        let out = assemble_pets(pets, &categories(), &tags(), &assocs).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].category.name, "Dogs");
        assert_eq!(out[0].photo_urls, vec!["/a.png", "/b.png"]);
        let names: Vec<_> = out[0].tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["friendly", "small"]);
        assert_eq!(out[0].status, PetStatus::Available);
        assert!(out[1].tags.is_empty());
        assert_eq!(out[1].category.name, "Cats");
    }

    #[test]
    fn missing_category_fails_loudly() {
        let pets = vec![pet_row(3, 99, "[]", "pending")];
        let err = assemble_pets(pets, &categories(), &tags(), &[]).unwrap_err();
        assert!(matches!(err, AppError::Decode(ref m) if m.contains("category 99")));
    }

    #[test]
    fn association_to_missing_tag_fails() {
        let assocs = vec![PetTagRow { pet_id: 1, tag_id: 404 }];
        assert!(tags_by_pet(&assocs, &tags()).is_err());
    }

    #[test]
    fn unknown_stored_status_is_a_decode_error() {
        let err = compose_pet(
            pet_row(4, 1, "[]", "lost"),
            Category { id: 1, name: "Dogs".into() },
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn photo_urls_decode_as_literal_strings() {
        let crafted = r#"["__import__('os').system('rm -rf /')"]"#;
        assert_eq!(
            decode_photo_urls(crafted).unwrap(),
            vec!["__import__('os').system('rm -rf /')".to_string()]
        );
    }

    #[test]
    fn photo_urls_reject_anything_but_a_string_array() {
        for raw in [
            "__import__('os').system('id')",
            "['single', 'quoted']",
            r#"{"a": 1}"#,
            "[1, 2]",
            r#"["ok", null]"#,
        ] {
            assert!(
                matches!(decode_photo_urls(raw), Err(AppError::Decode(_))),
                "accepted {}",
                raw
            );
        }
    }

    #[test]
    fn empty_photo_column_is_an_empty_list() {
        assert!(decode_photo_urls("").unwrap().is_empty());
        assert!(decode_photo_urls("  ").unwrap().is_empty());
    }

    #[test]
    fn encoded_photo_urls_decode_back() {
        let urls = vec!["/uploaded_images/7_a.png".to_string(), "with \"quotes\"".to_string()];
        let raw = encode_photo_urls(&urls).unwrap();
        assert_eq!(decode_photo_urls(&raw).unwrap(), urls);
    }

    #[test]
    fn order_rows_map_storage_names_to_domain_fields() {
        let ship = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let order = order_from_row(OrderRow {
            id: 5,
            pet_id: 7,
            quantity: 3,
            ship_date: ship,
            status: "delivered".into(),
            complete: true,
        })
        .unwrap();
        assert_eq!(order.pet_id, 7);
        assert_eq!(order.ship_date, ship);
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.complete);
    }

    #[test]
    fn user_rows_map_storage_names_to_domain_fields() {
        let user = user_from_row(UserRow {
            id: 1,
            username: "jdoe".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "j@example.com".into(),
            phone: "555".into(),
            user_status: 2,
        });
        assert_eq!(user.first_name, "John");
        assert_eq!(user.user_status, 2);
    }

    #[test]
    fn last_match_returns_the_final_hit() {
        let items = vec![(1, "sold"), (2, "available"), (3, "sold"), (4, "pending")];
        assert_eq!(last_match(items.clone(), |i| i.1 == "sold"), Some((3, "sold")));
        assert_eq!(last_match(items, |i| i.1 == "lost"), None);
    }
}
