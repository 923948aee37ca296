use crate::models::{NormalizedFacetEntry, RawFacetEntry};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Separator between the qualifier and the label of a compound facet value.
pub const COMPOUND_SEPARATOR: &str = "::";

/// Everything except ASCII alphanumerics and `-_.` is encoded; spaces are
/// then written as `+`, form style.
const URL_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// How a raw facet value is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetValue<'a> {
    /// `qualifier::label`, split at the first separator.
    Compound {
        raw: &'a str,
        qualifier: &'a str,
        label: &'a str,
    },
    Plain(&'a str),
}

impl<'a> FacetValue<'a> {
    pub fn classify(raw: &'a str) -> Self {
        match raw.split_once(COMPOUND_SEPARATOR) {
            Some((qualifier, label)) => FacetValue::Compound {
                raw,
                qualifier,
                label,
            },
            None => FacetValue::Plain(raw),
        }
    }

    /// Human-readable label. A compound value with nothing after the
    /// separator falls back to the whole raw value.
    pub fn display_label(&self) -> &'a str {
        match *self {
            FacetValue::Compound { raw, label, .. } => {
                if label.is_empty() {
                    raw
                } else {
                    label
                }
            }
            FacetValue::Plain(raw) => raw,
        }
    }

    /// Value to append to the browse path.
    ///
    /// Compound values are percent-encoded whole so the separator survives
    /// the query string; plain values pass through. Quotes are escaped in
    /// both cases since the value also lands inside an attribute.
    pub fn url_value(&self) -> String {
        let value = match *self {
            FacetValue::Compound { raw, .. } => utf8_percent_encode(raw, URL_VALUE)
                .to_string()
                .replace("%20", "+"),
            FacetValue::Plain(raw) => raw.to_string(),
        };
        value.replace('"', "%22")
    }
}

pub fn normalize_entry(entry: &RawFacetEntry) -> NormalizedFacetEntry {
    let value = FacetValue::classify(&entry.value);
    NormalizedFacetEntry {
        display_label: value.display_label().to_string(),
        url_value: value.url_value(),
        count: entry.count,
    }
}

/// Normalize the backend's facet list for one field, keeping its order.
/// A field with no facet data yields nothing.
pub fn normalize_entries(raw: Option<&[RawFacetEntry]>) -> Vec<NormalizedFacetEntry> {
    raw.unwrap_or_default().iter().map(normalize_entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_value_uses_second_part() {
        let entry = normalize_entry(&RawFacetEntry::new("enso::Quartet", 5));

        assert_eq!(entry.display_label, "Quartet");
        assert_eq!(entry.url_value, "enso%3A%3AQuartet");
        assert_eq!(entry.count, 5);
    }

    #[test]
    fn test_compound_with_empty_label_falls_back_to_raw() {
        let entry = normalize_entry(&RawFacetEntry::new("solo::", 1));

        assert_eq!(entry.display_label, "solo::");
        assert_eq!(entry.url_value, "solo%3A%3A");
    }

    #[test]
    fn test_compound_splits_at_first_separator() {
        let value = FacetValue::classify("a::b::c");
        assert_eq!(
            value,
            FacetValue::Compound {
                raw: "a::b::c",
                qualifier: "a",
                label: "b::c",
            }
        );
        assert_eq!(value.display_label(), "b::c");
    }

    #[test]
    fn test_plain_value_is_untouched() {
        let entry = normalize_entry(&RawFacetEntry::new("Orchestra", 3));

        assert_eq!(entry.display_label, "Orchestra");
        assert_eq!(entry.url_value, "Orchestra");
    }

    #[test]
    fn test_plain_value_is_not_percent_encoded() {
        let entry = normalize_entry(&RawFacetEntry::new("String Quartet & Piano", 2));
        assert_eq!(entry.url_value, "String Quartet & Piano");
    }

    #[test]
    fn test_quotes_escaped_in_plain_branch() {
        let entry = normalize_entry(&RawFacetEntry::new(r#"he said "hi""#, 1));

        assert_eq!(entry.url_value, "he said %22hi%22");
        assert!(!entry.url_value.contains('"'));
        assert_eq!(entry.display_label, r#"he said "hi""#);
    }

    #[test]
    fn test_quotes_escaped_in_compound_branch() {
        let entry = normalize_entry(&RawFacetEntry::new(r#"q::"Quoted" Label"#, 1));

        assert!(!entry.url_value.contains('"'));
        assert_eq!(entry.url_value, "q%3A%3A%22Quoted%22+Label");
        assert_eq!(entry.display_label, r#""Quoted" Label"#);
    }

    #[test]
    fn test_compound_spaces_become_plus() {
        let entry = normalize_entry(&RawFacetEntry::new("enso::String Quartet", 2));
        assert_eq!(entry.url_value, "enso%3A%3AString+Quartet");
        assert_eq!(entry.display_label, "String Quartet");

        let entry = normalize_entry(&RawFacetEntry::new("enso::String Quartet~", 1));
        assert_eq!(entry.url_value, "enso%3A%3AString+Quartet%7E");
    }

    #[test]
    fn test_compound_encoding_covers_non_ascii() {
        let entry = normalize_entry(&RawFacetEntry::new("lang::Français", 4));
        assert_eq!(entry.url_value, "lang%3A%3AFran%C3%A7ais");
    }

    #[test]
    fn test_order_is_preserved_and_nothing_dropped() {
        let raw = vec![
            RawFacetEntry::new("Zither", 1),
            RawFacetEntry::new("a::Alto", 9),
            RawFacetEntry::new("Bass", 4),
        ];
        let entries = normalize_entries(Some(&raw));

        let labels: Vec<_> = entries.iter().map(|e| e.display_label.as_str()).collect();
        assert_eq!(labels, vec!["Zither", "Alto", "Bass"]);
    }

    #[test]
    fn test_absent_or_empty_facets_yield_nothing() {
        assert!(normalize_entries(None).is_empty());
        assert!(normalize_entries(Some(&[])).is_empty());
    }
}
