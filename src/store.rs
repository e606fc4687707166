//! Database bootstrap: create the database if needed, open the pool, and create the pet store tables.

use crate::error::{AppError, ConfigError};
use crate::settings::Settings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgConnection, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// Table DDL in dependency order. Foreign keys carry no cascade: pet deletion removes
/// orders and tag associations explicitly inside one transaction.
const TABLES: &[(&str, &str)] = &[
    (
        "categories",
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    ),
    (
        "tags",
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    ),
    (
        "pets",
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            id BIGSERIAL PRIMARY KEY,
            category_id BIGINT NOT NULL REFERENCES categories (id),
            name TEXT NOT NULL,
            photo_urls TEXT NOT NULL DEFAULT '[]',
            status TEXT NOT NULL CHECK (status IN ('available', 'pending', 'sold'))
        )
        "#,
    ),
    (
        "pet_tags",
        r#"
        CREATE TABLE IF NOT EXISTS pet_tags (
            pet_id BIGINT NOT NULL REFERENCES pets (id),
            tag_id BIGINT NOT NULL REFERENCES tags (id),
            PRIMARY KEY (pet_id, tag_id)
        )
        "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id BIGSERIAL PRIMARY KEY,
            pet_id BIGINT NOT NULL REFERENCES pets (id),
            quantity INTEGER NOT NULL,
            ship_date TIMESTAMPTZ NOT NULL,
            status TEXT NOT NULL CHECK (status IN ('placed', 'approved', 'delivered')),
            complete BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            phone TEXT NOT NULL,
            user_status INTEGER NOT NULL
        )
        "#,
    ),
];

/// Open the connection pool described by `settings`.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

/// Create every table that does not exist yet. Safe to run on each start.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for &(name, ddl) in TABLES {
        tracing::debug!(table = name, "ensure table");
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_target(database_url)? else {
        return Ok(());
    };
    let mut conn: PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connection options for the `postgres` maintenance database plus the target database name.
/// `None` when the URL names no database or names `postgres` itself.
fn admin_target(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| {
        AppError::Config(ConfigError::Invalid {
            key: "DATABASE_URL",
            value: e.to_string(),
        })
    })?;
    let db_name = match opts.get_database().map(str::trim) {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_target_handles_slashes_in_query() {
        let url = "postgres://u:p@db:5432/petstore?sslmode=verify-full&sslrootcert=/etc/ssl/ca.pem";
        let (admin, db) = admin_target(url).unwrap().unwrap();
        assert_eq!(db, "petstore");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "db");
        assert_eq!(admin.get_port(), 5432);
        assert_eq!(admin.get_username(), "u");
    }

    #[test]
    fn url_without_database_needs_no_creation() {
        assert!(admin_target("postgres://u:p@db:5432").unwrap().is_none());
        assert!(admin_target("postgres://u:p@db:5432/").unwrap().is_none());
        assert!(admin_target("postgres://u:p@db:5432/postgres").unwrap().is_none());
    }

    #[test]
    fn malformed_url_is_a_config_error() {
        assert!(matches!(
            admin_target("not a url"),
            Err(AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. }))
        ));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("pet\"store"), "\"pet\"\"store\"");
    }

    #[test]
    fn tables_are_created_parents_first() {
        let names: Vec<&str> = TABLES.iter().map(|(name, _)| *name).collect();
        let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();
        assert!(pos("categories") < pos("pets"));
        assert!(pos("pets") < pos("pet_tags"));
        assert!(pos("tags") < pos("pet_tags"));
        assert!(pos("pets") < pos("orders"));
    }
}
