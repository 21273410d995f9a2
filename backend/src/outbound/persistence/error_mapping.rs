//! Shared Diesel error mapping for the repository adapters.
//!
//! Every repository port declares `Connection` and `Query` variants; some add
//! `Duplicate`. These helpers take the port's constructors as closures so the
//! mapping rules live in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Messages handed to the constructors are fixed strings; the database text
/// only reaches the debug log.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: &DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether `error` is a unique constraint violation.
pub(crate) const fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Convert one row into a domain value, mapping a failure through `query`.
pub(crate) fn convert_row<R, T, E>(row: R, query: impl FnOnce(String) -> E) -> Result<T, E>
where
    T: TryFrom<R, Error = String>,
{
    T::try_from(row).map_err(|message| {
        debug!(%message, "stored row failed validation");
        query(message)
    })
}

/// Convert rows into domain values, mapping the first failure through `query`.
pub(crate) fn convert_rows<R, T, E>(
    rows: Vec<R>,
    query: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| {
            debug!(%message, "stored row failed validation");
            query(message)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(DieselError::RollbackTransaction, Mapped::Query("database error"))]
    fn diesel_errors_map_to_fixed_messages(#[case] error: DieselError, #[case] expected: Mapped) {
        let mapped = map_basic_diesel_error(&error, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, expected);
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), |message| message);
        assert_eq!(mapped, "timed out");
    }

    #[rstest]
    fn not_found_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
