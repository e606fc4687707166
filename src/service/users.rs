//! User accounts. Passwords are hashed with argon2 before they reach storage.

use crate::error::AppError;
use crate::model::{User, UserInput};
use crate::service::assembler::user_from_row;
use crate::service::gateway::{self, Gateway};
use crate::service::password::hash_password_blocking;
use crate::service::rows::UserRow;
use crate::sql::{queries, SqlParam};
use sqlx::PgConnection;

pub struct UserService;

impl UserService {
    pub async fn list(gw: &Gateway) -> Result<Vec<User>, AppError> {
        let mut conn = gw.acquire().await?;
        let rows: Vec<UserRow> = gateway::fetch_all(&mut *conn, &queries::select_users(), &[]).await?;
        Ok(rows.into_iter().map(user_from_row).collect())
    }

    /// First user named `username` in the full user list.
    pub async fn find_by_username(gw: &Gateway, username: &str) -> Result<Option<User>, AppError> {
        Ok(Self::list(gw).await?.into_iter().find(|u| u.username == username))
    }

    pub async fn create(gw: &Gateway, input: &UserInput) -> Result<User, AppError> {
        let hash = hash_password_blocking(input.password.clone()).await?;
        let mut conn = gw.acquire().await?;
        let id = Self::insert_one(&mut conn, input, hash).await?;
        let row: UserRow = gateway::fetch_optional(&mut *conn, &queries::select_user_by_id(), &[id.into()])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
        tracing::info!(user_id = id, username = %input.username, "user created");
        Ok(user_from_row(row))
    }

    /// Create every user or none. Returns the stored users in id order.
    pub async fn create_many(gw: &Gateway, inputs: &[UserInput]) -> Result<Vec<User>, AppError> {
        let mut hashes = Vec::with_capacity(inputs.len());
        for input in inputs {
            hashes.push(hash_password_blocking(input.password.clone()).await?);
        }
        let mut tx = gw.begin().await?;
        for (input, hash) in inputs.iter().zip(hashes) {
            Self::insert_one(&mut tx, input, hash).await?;
        }
        let usernames: Vec<String> = inputs.iter().map(|u| u.username.clone()).collect();
        let rows: Vec<UserRow> = gateway::fetch_all(
            &mut tx,
            &queries::select_users_by_usernames(),
            &[SqlParam::TextList(usernames)],
        )
        .await?;
        tx.commit().await?;
        tracing::info!(count = rows.len(), "users created");
        Ok(rows.into_iter().map(user_from_row).collect())
    }

    /// Replace every field except the username, which identifies the user.
    pub async fn update(gw: &Gateway, username: &str, input: &UserInput) -> Result<User, AppError> {
        let hash = hash_password_blocking(input.password.clone()).await?;
        let mut tx = gw.begin().await?;
        let outcome = gateway::execute(
            &mut tx,
            queries::UPDATE_USER,
            &[
                input.first_name.as_str().into(),
                input.last_name.as_str().into(),
                input.email.as_str().into(),
                hash.into(),
                input.phone.as_str().into(),
                input.user_status.into(),
                username.into(),
            ],
        )
        .await?;
        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!("user '{}'", username)));
        }
        let row: UserRow = gateway::fetch_optional(&mut tx, &queries::select_user_by_username(), &[username.into()])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{}'", username)))?;
        tx.commit().await?;
        Ok(user_from_row(row))
    }

    pub async fn delete(gw: &Gateway, username: &str) -> Result<(), AppError> {
        let mut conn = gw.acquire().await?;
        let outcome = gateway::execute(&mut *conn, queries::DELETE_USER, &[username.into()]).await?;
        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!("user '{}'", username)));
        }
        tracing::info!(username, "user deleted");
        Ok(())
    }

    async fn insert_one(conn: &mut PgConnection, input: &UserInput, password_hash: String) -> Result<i64, AppError> {
        let params: Vec<SqlParam> = vec![
            input.username.as_str().into(),
            input.first_name.as_str().into(),
            input.last_name.as_str().into(),
            input.email.as_str().into(),
            password_hash.into(),
            input.phone.as_str().into(),
            input.user_status.into(),
        ];
        tracing::debug!(sql = %queries::INSERT_USER, username = %input.username, "insert");
        let mut query = sqlx::query_scalar::<_, i64>(queries::INSERT_USER);
        for p in params {
            query = query.bind(p);
        }
        query
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| AppError::from_db_unique(e, format!("username '{}' already exists", input.username)))
    }
}
