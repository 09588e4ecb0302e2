use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::filter::{categories, CategoryFilter};
use crate::sync::merge::{merge, ConflictPolicy, MergeOutcome};

use super::{seed_quotes, Quote, ValidationError};

/// The in-memory quote collection.
///
/// Every mutation goes through this type; persistence and rendering are
/// layered on top by [`crate::session::QuoteSession`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
}

impl QuoteBook {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn seeded() -> Self {
        Self::new(seed_quotes())
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.quotes)
    }

    pub fn view(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        filter.apply(&self.quotes)
    }

    /// Validate and append a quote stamped with the current time.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote, ValidationError> {
        self.add_at(text, category, Utc::now())
    }

    pub fn add_at(
        &mut self,
        text: &str,
        category: &str,
        at: DateTime<Utc>,
    ) -> Result<Quote, ValidationError> {
        let quote = Quote::from_input(text, category, at)?;
        self.quotes.push(quote.clone());
        Ok(quote)
    }

    /// Append records verbatim, without validation.
    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        self.quotes.extend(quotes);
    }

    /// Merge a remote batch into the collection, replacing its contents with
    /// the merged sequence.
    pub fn merge_remote(&mut self, remote: Vec<Quote>, policy: ConflictPolicy) -> MergeOutcome {
        let local = std::mem::take(&mut self.quotes);
        let (merged, outcome) = merge(local, remote, policy);
        self.quotes = merged;
        outcome
    }

    /// Uniformly random quote from the filtered view.
    pub fn random<R: Rng + ?Sized>(&self, filter: &CategoryFilter, rng: &mut R) -> Option<&Quote> {
        let view = self.view(filter);
        view.choose(rng).copied()
    }
}
