use shortly_core::StorageError;

/// Translates a sqlx error into the storage taxonomy.
///
/// This is the only place that knows how SQLite reports a unique
/// constraint violation (`SQLITE_CONSTRAINT_UNIQUE`) or an empty result.
pub(crate) fn translate(op: &'static str, err: sqlx::Error) -> StorageError {
    if is_unique_violation(&err) {
        return StorageError::AlreadyExists;
    }

    match err {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        other => StorageError::internal(op, other.to_string()),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = translate("storage.sqlite.get_url", sqlx::Error::RowNotFound);
        assert_eq!(err, StorageError::NotFound);
    }

    #[test]
    fn other_errors_keep_operation_context() {
        let err = translate("storage.sqlite.save_url", sqlx::Error::PoolTimedOut);
        match err {
            StorageError::Internal { op, message } => {
                assert_eq!(op, "storage.sqlite.save_url");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
