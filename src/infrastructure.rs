pub mod customer;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::{domain::DataAccessError, Database};

pub use self::customer::*;

impl From<sqlx::Error> for DataAccessError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionError(Box::new(value)),
            sqlx::Error::Database(_) | sqlx::Error::Protocol(_) => {
                Self::QueryError(Box::new(value))
            }
            sqlx::Error::RowNotFound
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => Self::ReadError(Box::new(value)),
            _ => Self::ClientSideError(Box::new(value)),
        }
    }
}

/// データベースへ接続する
pub async fn connect(config: &Database) -> Result<PgPool, DataAccessError> {
    let pool = PgPoolOptions::new().connect(&config.url).await?;
    info!("データベースに接続しました");
    Ok(pool)
}
