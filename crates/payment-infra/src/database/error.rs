//! Classification of SeaORM errors.

use sea_orm::{DbErr, SqlErr};

use payment_core::error::{ConstraintKind, RepoError};

/// Turn a SeaORM error into a [`RepoError`].
///
/// Constraint violations the driver can identify keep their kind. Other
/// execution errors that mention a constraint become `ConstraintKind::Unknown`
/// and leave the classification to whoever renders them.
pub fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            return RepoError::Constraint {
                kind: ConstraintKind::Unique,
                message,
            };
        }
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
            return RepoError::Constraint {
                kind: ConstraintKind::ForeignKey,
                message,
            };
        }
        _ => {}
    }

    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            tracing::error!("Database connection error: {}", err);
            RepoError::Connection(err.to_string())
        }
        DbErr::Exec(_) | DbErr::Query(_) => {
            let message = err.to_string();
            if message.to_ascii_lowercase().contains("constraint") {
                RepoError::Constraint {
                    kind: ConstraintKind::Unknown,
                    message,
                }
            } else {
                RepoError::Query(message)
            }
        }
        other => RepoError::Query(other.to_string()),
    }
}
