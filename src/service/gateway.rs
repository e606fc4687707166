//! Storage gateway: pooled connections, transactions, and parameterized statements.
//!
//! Every statement goes through [`fetch_all`], [`fetch_optional`], [`execute`] or [`insert`],
//! which bind [`SqlParam`]s positionally and log the SQL at debug level. Callers pass either a
//! pooled connection (`&mut *conn`) or an open transaction (`&mut *tx`); connections return to
//! the pool when dropped, and an uncommitted transaction rolls back on drop.

use crate::error::AppError;
use crate::sql::SqlParam;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

/// Result of a write statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    /// Id produced by `INSERT ... RETURNING id`, when a row was inserted.
    pub inserted_id: Option<i64>,
}

#[derive(Clone)]
pub struct Gateway {
    pool: PgPool,
}

impl Gateway {
    pub fn new(pool: PgPool) -> Self {
        Gateway { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check out one connection for a read-only operation.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, AppError> {
        Ok(self.pool.acquire().await?)
    }

    /// Start a transaction. Commit explicitly with `tx.commit()`.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, AppError> {
        Ok(self.pool.begin().await?)
    }
}

pub async fn fetch_all<T>(conn: &mut PgConnection, sql: &str, params: &[SqlParam]) -> Result<Vec<T>, AppError>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %sql, params = ?params, "query");
    let mut query = sqlx::query_as::<_, T>(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_all(&mut *conn).await?)
}

pub async fn fetch_optional<T>(conn: &mut PgConnection, sql: &str, params: &[SqlParam]) -> Result<Option<T>, AppError>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    tracing::debug!(sql = %sql, params = ?params, "query");
    let mut query = sqlx::query_as::<_, T>(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    Ok(query.fetch_optional(&mut *conn).await?)
}

pub async fn execute(conn: &mut PgConnection, sql: &str, params: &[SqlParam]) -> Result<ExecOutcome, AppError> {
    tracing::debug!(sql = %sql, params = ?params, "execute");
    let mut query = sqlx::query(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    let result = query.execute(&mut *conn).await?;
    Ok(ExecOutcome {
        rows_affected: result.rows_affected(),
        inserted_id: None,
    })
}

/// Run an `INSERT ... RETURNING id`. A statement that inserts nothing (e.g. `ON CONFLICT DO NOTHING`)
/// yields `rows_affected == 0` and no id.
pub async fn insert(conn: &mut PgConnection, sql: &str, params: &[SqlParam]) -> Result<ExecOutcome, AppError> {
    tracing::debug!(sql = %sql, params = ?params, "insert");
    let mut query = sqlx::query_scalar::<_, i64>(sql);
    for p in params {
        query = query.bind(p.clone());
    }
    let id = query.fetch_optional(&mut *conn).await?;
    Ok(ExecOutcome {
        rows_affected: u64::from(id.is_some()),
        inserted_id: id,
    })
}
