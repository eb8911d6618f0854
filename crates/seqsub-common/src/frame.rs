//! Polars helpers for all-text specimen frames.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use seqsub_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// True for a missing cell, an empty string, or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Builds a `String` column from optional values.
pub fn string_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Reads a column as owned optional strings.
///
/// Non-string columns are rendered through [`any_to_string`], with nulls kept
/// as `None`.
pub fn column_strings(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    if let Ok(ca) = column.str() {
        return Ok(ca
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect());
    }
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = column.get(idx)?;
        if matches!(value, AnyValue::Null) {
            values.push(None);
        } else {
            values.push(Some(any_to_string(value)));
        }
    }
    Ok(values)
}

/// Builds a frame from `(name, values)` pairs in order.
pub fn frame_from_columns(columns: Vec<(String, Vec<Option<String>>)>) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| string_column(&name, values))
        .collect();
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_integers() {
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t ")));
        assert!(!is_blank(Some(" x ")));
    }

    #[test]
    fn test_column_strings_keeps_nulls() {
        let df = frame_from_columns(vec![(
            "a".to_string(),
            vec![Some("x".to_string()), None, Some(" ".to_string())],
        )])
        .unwrap();
        let values = column_strings(&df, "a").unwrap();
        assert_eq!(values, vec![Some("x".to_string()), None, Some(" ".to_string())]);
    }

    #[test]
    fn test_column_strings_missing_column() {
        let df = frame_from_columns(vec![("a".to_string(), vec![None])]).unwrap();
        assert!(column_strings(&df, "b").is_err());
    }
}
