pub mod core;
pub mod validation;

use std::{
    error::Error,
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use self::validation::ValidationErrors;

pub trait Id:
    Copy
    + Eq
    + Deref<Target = Self::Inner>
    + From<Self::Inner>
    + Display
    + Debug
    + Serialize
    + for<'de> Deserialize<'de>
{
    type Inner: FromStr;
}

pub trait Entity: Debug + Clone {
    type Id: Id;

    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;
}

pub type BoxedError = Box<dyn Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Database connection error: {0}")]
    ConnectionError(BoxedError),
    #[error("Database query error: {0}")]
    QueryError(BoxedError),
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(BoxedError),
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(BoxedError),
    #[error("Data read error: {0}")]
    ReadError(BoxedError),
}
