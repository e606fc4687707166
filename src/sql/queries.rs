//! Statement text for every table. Lists are ordered by id so "iteration order" is stable.

pub const SELECT_CATEGORIES: &str = "SELECT id, name FROM categories ORDER BY id";
pub const SELECT_CATEGORY_BY_ID: &str = "SELECT id, name FROM categories WHERE id = $1";

pub const SELECT_TAGS: &str = "SELECT id, name FROM tags ORDER BY id";
pub const SELECT_TAG_ID_BY_NAME: &str = "SELECT id FROM tags WHERE name = $1 ORDER BY id LIMIT 1";
pub const INSERT_TAG: &str = "INSERT INTO tags (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING id";
pub const SELECT_TAGS_FOR_PET: &str = r#"
    SELECT t.id, t.name FROM tags t
    JOIN pet_tags pt ON pt.tag_id = t.id
    WHERE pt.pet_id = $1
    ORDER BY t.id
"#;

pub const SELECT_PETS: &str = "SELECT id, category_id, name, photo_urls, status FROM pets ORDER BY id";
pub const SELECT_PET_BY_ID: &str = "SELECT id, category_id, name, photo_urls, status FROM pets WHERE id = $1";
pub const SELECT_PET_ID_FOR_UPDATE: &str = "SELECT id FROM pets WHERE id = $1 FOR UPDATE";
pub const SELECT_PET_PHOTOS_FOR_UPDATE: &str = "SELECT photo_urls FROM pets WHERE id = $1 FOR UPDATE";
pub const SELECT_PET_EXISTS: &str = "SELECT id FROM pets WHERE id = $1";
pub const INSERT_PET: &str = r#"
    INSERT INTO pets (category_id, name, photo_urls, status)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;
pub const UPDATE_PET_CORE: &str = "UPDATE pets SET category_id = $1, name = $2, status = $3 WHERE id = $4";
pub const UPDATE_PET_PHOTOS: &str = "UPDATE pets SET photo_urls = $1 WHERE id = $2";
pub const UPDATE_PET_NAME_STATUS: &str = "UPDATE pets SET name = $1, status = $2 WHERE id = $3";
pub const DELETE_PET: &str = "DELETE FROM pets WHERE id = $1";

pub const SELECT_PET_TAGS: &str = "SELECT pet_id, tag_id FROM pet_tags ORDER BY pet_id, tag_id";
pub const INSERT_PET_TAG: &str = "INSERT INTO pet_tags (pet_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING";
pub const DELETE_PET_TAGS_FOR_PET: &str = "DELETE FROM pet_tags WHERE pet_id = $1";

pub const SELECT_ORDERS: &str = "SELECT id, pet_id, quantity, ship_date, status, complete FROM orders ORDER BY id";
pub const SELECT_ORDER_BY_ID: &str = "SELECT id, pet_id, quantity, ship_date, status, complete FROM orders WHERE id = $1";
pub const INSERT_ORDER: &str = r#"
    INSERT INTO orders (pet_id, quantity, ship_date, status, complete)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;
pub const DELETE_ORDER: &str = "DELETE FROM orders WHERE id = $1";
pub const DELETE_ORDERS_FOR_PET: &str = "DELETE FROM orders WHERE pet_id = $1";

const USER_COLUMNS: &str = "id, username, first_name, last_name, email, phone, user_status";

pub fn select_users() -> String {
    format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS)
}

pub fn select_user_by_id() -> String {
    format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS)
}

pub fn select_user_by_username() -> String {
    format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS)
}

pub fn select_users_by_usernames() -> String {
    format!("SELECT {} FROM users WHERE username = ANY($1) ORDER BY id", USER_COLUMNS)
}

pub const INSERT_USER: &str = r#"
    INSERT INTO users (username, first_name, last_name, email, password_hash, phone, user_status)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id
"#;
pub const UPDATE_USER: &str = r#"
    UPDATE users
    SET first_name = $1, last_name = $2, email = $3, password_hash = $4, phone = $5, user_status = $6
    WHERE username = $7
"#;
pub const DELETE_USER: &str = "DELETE FROM users WHERE username = $1";
