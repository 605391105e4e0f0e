use thiserror::Error;
use uuid::Uuid;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unique constraint '{constraint}' violated")]
    UniqueViolation { constraint: String },

    #[error("Parking spot '{0}' does not exist")]
    Missing(Uuid),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl RepositoryError {
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return Self::unique_violation(db_err.constraint().unwrap_or_default());
            }
        }
        Self::Database(err)
    }
}
