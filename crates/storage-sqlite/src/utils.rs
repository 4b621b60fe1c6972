//! Helpers shared by the SQLite repositories.

use std::str::FromStr;

use chrono::NaiveDateTime;
use gridbudget_core::errors::{DatabaseError, Error, Result};
use rust_decimal::Decimal;

/// Maximum number of parameters for SQLite `IN (...)` queries.
///
/// SQLite caps bound parameters per statement (historically 999), so id
/// lists are split into chunks of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Chunk a slice into pieces small enough for one `IN (...)` clause.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a decimal stored as TEXT.
pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| {
        log::error!("Stored {} '{}' is not a decimal: {}", field, value, e);
        Error::Database(DatabaseError::Internal(format!(
            "Invalid decimal in column {}: '{}'",
            field, value
        )))
    })
}

/// Parses a SCREAMING_SNAKE_CASE enum stored as TEXT.
pub fn parse_enum<T>(value: &str, field: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    T::from_str(value).map_err(|_| {
        log::error!("Stored {} '{}' is not a known value", field, value);
        Error::Database(DatabaseError::Internal(format!(
            "Invalid value in column {}: '{}'",
            field, value
        )))
    })
}

pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

pub fn new_id(id: Option<String>) -> String {
    id.filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridbudget_core::TensionLevel;

    #[test]
    fn test_chunk_for_sqlite_over_limit() {
        let items: Vec<i32> = (0..1200).collect();
        let chunks: Vec<_> = chunk_for_sqlite(&items).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(chunks[2].len(), 200);
    }

    #[test]
    fn test_chunk_for_sqlite_empty() {
        let items: Vec<i32> = vec![];
        assert_eq!(chunk_for_sqlite(&items).count(), 0);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12.50", "unit_price").unwrap().to_string(), "12.50");
        assert!(parse_decimal("abc", "unit_price").is_err());
    }

    #[test]
    fn test_parse_enum() {
        let level: TensionLevel = parse_enum("MEDIUM", "tension_level").unwrap();
        assert_eq!(level, TensionLevel::Medium);
        assert!(parse_enum::<TensionLevel>("HIGH", "tension_level").is_err());
    }

    #[test]
    fn test_new_id_keeps_caller_id() {
        assert_eq!(new_id(Some("fixed".to_string())), "fixed");
        assert_eq!(new_id(Some(" ".to_string())).len(), 36);
        assert_eq!(new_id(None).len(), 36);
    }
}
