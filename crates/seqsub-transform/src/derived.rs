//! Derived composite fields.
//!
//! A derived field joins several source columns with `/`:
//!
//! - isolate/virus name: `<prefix>/<country>/<identifier>/<year>`
//! - location: `<continent>/<country>/<state>/<county>`
//!
//! The field is only written when every prerequisite column exists. Rows are
//! never dropped here: an unparseable date gives an empty year segment and a
//! missing component gives an empty segment.

use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;
use tracing::debug;

use seqsub_common::{column_strings, is_blank, string_column};

use crate::error::Result;

/// How a derived field is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedFormat {
    /// `<prefix>/<country>/<identifier>/<year of date>`
    IsolateName {
        prefix: String,
        country: String,
        identifier: String,
        date: String,
    },
    /// `<continent>/<country>/<state>/<county>`
    Location {
        continent: String,
        country: String,
        state: String,
        county: String,
    },
}

/// A composite column computed from other columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedField {
    pub target: String,
    pub format: DerivedFormat,
}

impl DerivedField {
    pub fn isolate_name(
        target: &str,
        prefix: &str,
        country: &str,
        identifier: &str,
        date: &str,
    ) -> Self {
        Self {
            target: target.to_string(),
            format: DerivedFormat::IsolateName {
                prefix: prefix.to_string(),
                country: country.to_string(),
                identifier: identifier.to_string(),
                date: date.to_string(),
            },
        }
    }

    pub fn location(target: &str, continent: &str, country: &str, state: &str, county: &str) -> Self {
        Self {
            target: target.to_string(),
            format: DerivedFormat::Location {
                continent: continent.to_string(),
                country: country.to_string(),
                state: state.to_string(),
                county: county.to_string(),
            },
        }
    }

    /// Source columns, in output segment order.
    pub fn prerequisites(&self) -> [&str; 4] {
        match &self.format {
            DerivedFormat::IsolateName {
                prefix,
                country,
                identifier,
                date,
            } => [prefix.as_str(), country.as_str(), identifier.as_str(), date.as_str()],
            DerivedFormat::Location {
                continent,
                country,
                state,
                county,
            } => [continent.as_str(), country.as_str(), state.as_str(), county.as_str()],
        }
    }

    fn render(&self, segments: [Option<&str>; 4]) -> String {
        let text = |value: Option<&str>| -> String {
            if is_blank(value) {
                String::new()
            } else {
                value.unwrap_or_default().to_string()
            }
        };
        let [first, second, third, fourth] = segments;
        let last = match self.format {
            DerivedFormat::IsolateName { .. } => collection_year(fourth)
                .map(|year| year.to_string())
                .unwrap_or_default(),
            DerivedFormat::Location { .. } => text(fourth),
        };
        format!("{}/{}/{}/{}", text(first), text(second), text(third), last)
    }
}

/// Year of an ISO `YYYY-MM-DD` date, or `None` when it does not parse.
pub fn collection_year(value: Option<&str>) -> Option<i32> {
    let value = value?.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.year())
}

/// Computes one derived field into a copy of the frame.
///
/// Returns the frame unchanged when any prerequisite column is absent.
pub fn apply_derived_field(df: &DataFrame, field: &DerivedField) -> Result<DataFrame> {
    let prerequisites = field.prerequisites();
    let missing: Vec<&str> = prerequisites
        .iter()
        .copied()
        .filter(|name| df.column(name).is_err())
        .collect();
    if !missing.is_empty() {
        debug!(
            target_column = %field.target,
            missing = ?missing,
            "skipping derived field; prerequisite columns absent"
        );
        return Ok(df.clone());
    }

    let sources = prerequisites
        .iter()
        .map(|name| column_strings(df, name))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let values: Vec<Option<String>> = (0..df.height())
        .map(|row| {
            let cell = |idx: usize| sources[idx][row].as_deref();
            Some(field.render([cell(0), cell(1), cell(2), cell(3)]))
        })
        .collect();

    let mut out = df.clone();
    out.with_column(string_column(&field.target, values))?;
    debug!(target_column = %field.target, rows = out.height(), "computed derived field");
    Ok(out)
}

/// Applies derived fields in order; later fields see earlier results.
pub fn apply_derived_fields(df: &DataFrame, fields: &[DerivedField]) -> Result<DataFrame> {
    let mut out = df.clone();
    for field in fields {
        out = apply_derived_field(&out, field)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_year() {
        assert_eq!(collection_year(Some("2021-03-04")), Some(2021));
        assert_eq!(collection_year(Some(" 2020-12-31 ")), Some(2020));
        assert_eq!(collection_year(Some("not-a-date")), None);
        assert_eq!(collection_year(Some("2021-13-01")), None);
        assert_eq!(collection_year(Some("2021")), None);
        assert_eq!(collection_year(None), None);
    }

    #[test]
    fn test_render_isolate_name() {
        let field = DerivedField::isolate_name("isolate", "p", "c", "i", "d");
        let rendered = field.render([
            Some("SARS-CoV-2/human"),
            Some("USA"),
            Some("CA-123"),
            Some("2021-06-01"),
        ]);
        assert_eq!(rendered, "SARS-CoV-2/human/USA/CA-123/2021");
    }

    #[test]
    fn test_render_missing_segments_are_empty() {
        let field = DerivedField::location("covv_location", "a", "b", "c", "d");
        let rendered = field.render([Some("North America"), None, Some("  "), Some("Kings")]);
        assert_eq!(rendered, "North America///Kings");
    }
}
