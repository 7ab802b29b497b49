//! Storage backends for the repository traits of [`crate::domain::core`].

pub mod memory;
pub mod mysql;

use std::{sync::Arc, time::Duration};

use sqlx::{
    error::ErrorKind,
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};
use tracing::info;

use crate::{application::BackOffice, domain::DataAccessError, Database};

use self::mysql::{
    MySqlClientRepository, MySqlEmployeeRepository, MySqlReservationRepository,
    MySqlRoomRepository,
};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

impl From<sqlx::Error> for DataAccessError {
    fn from(value: sqlx::Error) -> Self {
        match value {
            sqlx::Error::Database(e) => match e.kind() {
                ErrorKind::UniqueViolation => {
                    Self::UniqueViolation(Box::new(sqlx::Error::Database(e)))
                }
                ErrorKind::ForeignKeyViolation => {
                    Self::ForeignKeyViolation(Box::new(sqlx::Error::Database(e)))
                }
                _ => Self::QueryError(Box::new(sqlx::Error::Database(e))),
            },
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionError(Box::new(value)),
            sqlx::Error::RowNotFound
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => Self::ReadError(Box::new(value)),
            _ => Self::QueryError(Box::new(value)),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DataAccessError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::QueryError(Box::new(value))
    }
}

/// Opens a connection pool and checks the database answers.
pub async fn connect(database: &Database) -> Result<MySqlPool, DataAccessError> {
    let options = MySqlConnectOptions::new()
        .host(&database.host)
        .port(database.port)
        .username(&database.user)
        .password(&database.password)
        .database(&database.database)
        .charset(&database.charset);
    let pool = MySqlPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;
    info!(
        "connected to mysql://{}@{}:{}/{}",
        database.user, database.host, database.port, database.database
    );
    Ok(pool)
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &MySqlPool) -> Result<(), DataAccessError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

impl BackOffice {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self::new(
            Arc::new(MySqlRoomRepository::new(pool.clone())),
            Arc::new(MySqlClientRepository::new(pool.clone())),
            Arc::new(MySqlEmployeeRepository::new(pool.clone())),
            Arc::new(MySqlReservationRepository::new(pool)),
        )
    }
}
