//! Category filtering.
//!
//! Matching is exact string equality: no case folding, no trimming.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::quote::Quote;

/// Value persisted for the "show everything" choice.
pub const ALL: &str = "all";

/// The active category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a persisted or user-typed value. `"all"` selects everything,
    /// any other value is taken verbatim as a category.
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    /// Value written to the filter slot.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Category(category) => category,
        }
    }

    /// Human-readable label for selectors and headers.
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All Categories",
            Self::Category(category) => category,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => quote.category == *category,
        }
    }

    /// Narrow `quotes` to the matching records, preserving order.
    pub fn apply<'a>(&self, quotes: &'a [Quote]) -> Vec<&'a Quote> {
        quotes.iter().filter(|quote| self.matches(quote)).collect()
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct categories in first-seen order.
pub fn categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen = HashSet::new();
    quotes
        .iter()
        .filter(|quote| seen.insert(quote.category.as_str()))
        .map(|quote| quote.category.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Quote> {
        vec![
            Quote::new("a", "Life"),
            Quote::new("b", "Tech"),
            Quote::new("c", "Life"),
            Quote::new("d", "life"),
        ]
    }

    #[test]
    fn parse_recognises_all() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("All"),
            CategoryFilter::Category("All".to_string())
        );
    }

    #[test]
    fn all_keeps_everything_in_order() {
        let quotes = sample();
        let view = CategoryFilter::All.apply(&quotes);
        let texts: Vec<&str> = view.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }

    #[test]
    fn category_match_is_case_sensitive() {
        let quotes = sample();
        let view = CategoryFilter::parse("Life").apply(&quotes);
        let texts: Vec<&str> = view.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn unknown_category_yields_empty_view() {
        assert!(CategoryFilter::parse("Nope").apply(&sample()).is_empty());
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        assert_eq!(categories(&sample()), ["Life", "Tech", "life"]);
    }
}
