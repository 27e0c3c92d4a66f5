//! Database integration - translation of SeaORM errors into repository errors.

mod error;

pub use error::map_db_err;
