use crate::models::entity::EntityKind;

/// Errors surfaced by the Metecho data layer and its maintenance routines.
#[derive(Debug, thiserror::Error)]
pub enum MetechoError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Rows could not be removed because other rows still reference them.
    #[error("Foreign key violation deleting from {table}: {constraint}")]
    ConstraintViolation { table: String, constraint: String },

    #[error("{operation} is not supported for {entity}")]
    UnsupportedOperation {
        operation: &'static str,
        entity: EntityKind,
    },

    #[error("Dependency cycle between entities: {0:?}")]
    DependencyCycle(Vec<EntityKind>),
}

/// SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

impl From<sqlx::Error> for MetechoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                return MetechoError::ConstraintViolation {
                    table: db_err.table().unwrap_or("unknown").to_string(),
                    constraint: db_err
                        .constraint()
                        .map(str::to_string)
                        .unwrap_or_else(|| db_err.message().to_string()),
                };
            }
        }
        MetechoError::DatabaseError(err.to_string())
    }
}

impl From<config::ConfigError> for MetechoError {
    fn from(err: config::ConfigError) -> Self {
        MetechoError::ConfigurationError(err.to_string())
    }
}

impl MetechoError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, MetechoError::ConstraintViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, MetechoError>;
