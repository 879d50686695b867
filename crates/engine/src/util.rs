//! Internal helpers for input normalization.
//!
//! These utilities are **not** part of the public API. They centralize the
//! trimming rules so every write path stores text the same way.

use sea_orm::{DbErr, SqlErr};

use crate::{EngineError, ResultEngine};

/// Trim a required value, rejecting blanks with a labeled error.
pub(crate) fn normalize_required(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} required")));
    }
    Ok(trimmed.to_string())
}

/// Optional text columns are stored as NULL when blank.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Keep at most `width` characters, never splitting a code point.
pub(crate) fn truncate_chars(value: &str, width: usize) -> String {
    match value.char_indices().nth(width) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Map a unique-index violation on the account name to `AccountExists`.
pub(crate) fn account_write_error(err: DbErr, name: &str) -> EngineError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => EngineError::AccountExists(name.to_string()),
        _ => EngineError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_values_are_trimmed() {
        assert_eq!(normalize_required("  Acme ", "account name").unwrap(), "Acme");
        assert_eq!(
            normalize_required("   ", "account name").unwrap_err(),
            EngineError::InvalidInput("account name required".to_string())
        );
    }

    #[test]
    fn blank_optional_text_is_none() {
        assert_eq!(optional_text(""), None);
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" 555 "), Some("555".to_string()));
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 80), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
