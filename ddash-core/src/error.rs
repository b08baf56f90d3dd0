use ddash_types::data::Entity;

use diesel::result::DatabaseErrorKind;

#[derive(Debug, derive_more::Display)]
pub enum Error {
    #[display("A {_0} with the same identifying fields already exists")]
    UniquenessViolation(Entity),
    #[display("A {_0} references a row that does not exist")]
    ForeignKeyViolation(Entity),
    #[display("The {_0} {_1} was not found")]
    NotFound(Entity, i32),
    #[display("A {_0} value is outside its allowed range")]
    CheckViolation(Entity),
    #[display("Invalid {field}: {value:?}")]
    EnumValidationError { field: String, value: String },
    #[display("Test run {previous} does not precede test run {current}")]
    InvalidRegression { previous: i32, current: i32 },
    #[display("Log storage error: {_0}")]
    Storage(std::io::Error),
    #[display("Unexpected database error: {_0}")]
    UnexpectedDatabaseError(diesel::result::Error),
    #[display("Unexpected time error: {_0}")]
    UnexpectedTimeError(time::error::ComponentRange),
    #[display("Connection pool error: {_0}")]
    PoolError(diesel::r2d2::PoolError),
    #[display("Failed to run migrations: {_0}")]
    MigrationError(String),
    #[display("Missing setting {_0}")]
    MissingSetting(&'static str),
    #[display("Invalid setting {name}: {value:?}")]
    InvalidSetting { name: &'static str, value: String },
}

impl std::error::Error for Error {}

impl Error {
    pub fn is_internal(&self) -> bool {
        use Error::*;
        match self {
            Storage(_)
            | UnexpectedDatabaseError(_)
            | UnexpectedTimeError(_)
            | PoolError(_)
            | MigrationError(_) => true,
            _ => false,
        }
    }

    /** Reads a vocabulary value back from its stored text. */
    pub fn parse_choice<T: ddash_types::Vocabulary>(value: &str) -> Result<T, Error> {
        value.parse().map_err(|_| Error::EnumValidationError {
            field: T::FIELD.to_string(),
            value: value.to_string(),
        })
    }
}

/** Attributes a constraint failure raised while writing rows of
 * `entity` to that entity. Other failures are left unexpected. A CHECK
 * failure does not say which column or value was rejected, so only the
 * entity is kept. */
pub(crate) fn on_write(entity: Entity) -> impl FnOnce(diesel::result::Error) -> Error {
    move |e| match e {
        diesel::result::Error::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => Error::UniquenessViolation(entity),
            DatabaseErrorKind::ForeignKeyViolation => Error::ForeignKeyViolation(entity),
            DatabaseErrorKind::CheckViolation => {
                tracing::debug!("check constraint failed on {}: {}", entity, info.message());
                Error::CheckViolation(entity)
            }
            _ => Error::UnexpectedDatabaseError(diesel::result::Error::DatabaseError(kind, info)),
        },
        e => Error::UnexpectedDatabaseError(e),
    }
}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Error {
        Error::UnexpectedDatabaseError(e)
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(e: time::error::ComponentRange) -> Error {
        Error::UnexpectedTimeError(e)
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(e: diesel::r2d2::PoolError) -> Error {
        Error::PoolError(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddash_types::{Language, TestResultStatus};

    #[test]
    fn stored_choices_parse_back() {
        assert_eq!(
            Error::parse_choice::<TestResultStatus>("HUNG").unwrap(),
            TestResultStatus::Hung
        );
        assert_eq!(Error::parse_choice::<Language>("C++").unwrap(), Language::Cxx);
    }

    #[test]
    fn unknown_choice_is_an_enum_validation_error() {
        match Error::parse_choice::<Language>("Rust") {
            Err(Error::EnumValidationError { field, value }) => {
                assert_eq!(field, "language");
                assert_eq!(value, "Rust");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn constraint_errors_are_typed() {
        struct Info;
        impl diesel::result::DatabaseErrorInformation for Info {
            fn message(&self) -> &str {
                "UNIQUE constraint failed"
            }
            fn details(&self) -> Option<&str> {
                None
            }
            fn hint(&self) -> Option<&str> {
                None
            }
            fn table_name(&self) -> Option<&str> {
                None
            }
            fn column_name(&self) -> Option<&str> {
                None
            }
            fn constraint_name(&self) -> Option<&str> {
                None
            }
            fn statement_position(&self) -> Option<i32> {
                None
            }
        }
        let e = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(Info),
        );
        assert!(matches!(
            on_write(Entity::Compiler)(e),
            Error::UniquenessViolation(Entity::Compiler)
        ));
        let e = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new(Info),
        );
        assert!(matches!(
            on_write(Entity::BuildResult)(e),
            Error::CheckViolation(Entity::BuildResult)
        ));
        assert!(!Error::NotFound(Entity::TestRun, 1).is_internal());
        assert!(!Error::CheckViolation(Entity::TestResult).is_internal());
        assert!(Error::MigrationError("boom".into()).is_internal());
    }
}
