//! Case-insensitive substring search over already-fetched lists.

/// Records that expose text fields for list searches
pub trait Searchable {
    /// The fields a search term is matched against; `None` never matches
    fn search_fields(&self) -> Vec<Option<&str>>;

    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Keep the records where any searchable field contains `term`, ignoring case.
///
/// A missing, empty or whitespace-only term keeps every record.
pub fn filter_by_term<T: Searchable>(records: Vec<T>, term: Option<&str>) -> Vec<T> {
    let needle = match term.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return records,
    };

    records
        .into_iter()
        .filter(|record| record.matches(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        note: Option<&'static str>,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![Some(self.name), self.note]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Wireless Headphones",
                note: None,
            },
            Row {
                name: "Yoga Mat",
                note: Some("Non-slip, with STRAP"),
            },
        ]
    }

    #[test]
    fn test_match_ignores_case() {
        let found = filter_by_term(rows(), Some("HEADPHONES"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Wireless Headphones");
    }

    #[test]
    fn test_optional_fields_are_searched() {
        let found = filter_by_term(rows(), Some("strap"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Yoga Mat");
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        assert_eq!(filter_by_term(rows(), None).len(), 2);
        assert_eq!(filter_by_term(rows(), Some("")).len(), 2);
        assert_eq!(filter_by_term(rows(), Some("   ")).len(), 2);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_by_term(rows(), Some("keyboard")).is_empty());
    }
}
