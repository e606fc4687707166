//! Positional parameter values that sqlx can bind.

use chrono::{DateTime, Utc};
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value bound to a `$n` placeholder. Each variant reports its own PostgreSQL type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Bool(bool),
    I32(i32),
    I64(i64),
    Text(String),
    TextList(Vec<String>),
    Timestamp(DateTime<Utc>),
}

impl From<bool> for SqlParam {
    fn from(v: bool) -> Self {
        SqlParam::Bool(v)
    }
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::I32(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::I64(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<Vec<String>> for SqlParam {
    fn from(v: Vec<String>) -> Self {
        SqlParam::TextList(v)
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(v)
    }
}

impl<'q> Encode<'q, Postgres> for SqlParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqlParam::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
            SqlParam::I32(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlParam::I64(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlParam::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
            SqlParam::TextList(v) => <Vec<String> as Encode<Postgres>>::encode_by_ref(v, buf),
            SqlParam::Timestamp(t) => <DateTime<Utc> as Encode<Postgres>>::encode_by_ref(t, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlParam::Bool(_) => <bool as Type<Postgres>>::type_info(),
            SqlParam::I32(_) => <i32 as Type<Postgres>>::type_info(),
            SqlParam::I64(_) => <i64 as Type<Postgres>>::type_info(),
            SqlParam::Text(_) => <String as Type<Postgres>>::type_info(),
            SqlParam::TextList(_) => <Vec<String> as Type<Postgres>>::type_info(),
            SqlParam::Timestamp(_) => <DateTime<Utc> as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for SqlParam {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(_ty: &PgTypeInfo) -> bool {
        true
    }
}
