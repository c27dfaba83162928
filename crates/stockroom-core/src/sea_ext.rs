use sea_orm::{DbErr, SqlErr};

/// Store failures that callers map to something other than an internal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreFailure {
    /// No connection could be acquired or the connection dropped.
    Unavailable,
    UniqueViolation(String),
    ForeignKeyViolation(String),
    Other,
}

/// Sort a `DbErr` into the cases services distinguish.
pub fn classify(err: &DbErr) -> StoreFailure {
    if matches!(err, DbErr::ConnectionAcquire(_) | DbErr::Conn(_)) {
        return StoreFailure::Unavailable;
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StoreFailure::UniqueViolation(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            StoreFailure::ForeignKeyViolation(detail)
        }
        _ => StoreFailure::Other,
    }
}

/// Walk an `anyhow` chain and classify the first `DbErr` found.
pub fn classify_chain<'a>(
    chain: impl IntoIterator<Item = &'a (dyn std::error::Error + 'static)>,
) -> StoreFailure {
    chain
        .into_iter()
        .find_map(|e| e.downcast_ref::<DbErr>())
        .map(classify)
        .unwrap_or(StoreFailure::Other)
}
