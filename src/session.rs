//! The quote collection bound to its persisted state.
//!
//! Every mutating operation follows the same path: change a copy of the
//! book, persist the copy, adopt it, and leave the caller to re-render from
//! [`QuoteSession::visible`].

use thiserror::Error;
use tracing::{debug, info};

use crate::filter::CategoryFilter;
use crate::quote::{Quote, QuoteBook, ValidationError};
use crate::render::{category_options, CategoryOption, Renderer};
use crate::repository::QuoteRepository;
use crate::storage::StorageError;
use crate::sync::{ConflictPolicy, MergeOutcome};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct QuoteSession {
    repository: QuoteRepository,
    book: QuoteBook,
    filter: CategoryFilter,
}

impl QuoteSession {
    /// Load quotes and the last filter from `repository`.
    pub fn open(repository: QuoteRepository) -> Result<Self, StorageError> {
        let book = QuoteBook::new(repository.load_quotes()?);
        let filter = repository.load_filter()?;
        debug!(quotes = book.len(), filter = %filter, "Session opened");
        Ok(Self {
            repository,
            book,
            filter,
        })
    }

    pub fn book(&self) -> &QuoteBook {
        &self.book
    }

    pub fn quotes(&self) -> &[Quote] {
        self.book.quotes()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn categories(&self) -> Vec<String> {
        self.book.categories()
    }

    /// Selector entries for the current collection, with the active filter
    /// marked.
    pub fn category_options(&self) -> Vec<CategoryOption> {
        category_options(&self.book.categories(), &self.filter)
    }

    /// Quotes matching the active filter.
    pub fn visible(&self) -> Vec<&Quote> {
        self.book.view(&self.filter)
    }

    /// Make `filter` the active filter and persist it as the new default.
    pub fn apply_filter(&mut self, filter: CategoryFilter) -> Result<Vec<&Quote>, StorageError> {
        self.repository.save_filter(&filter)?;
        self.filter = filter;
        Ok(self.visible())
    }

    /// Persist `candidate` and only then make it the live collection, so a
    /// failed save leaves memory matching disk.
    fn commit(&mut self, candidate: QuoteBook) -> Result<(), StorageError> {
        self.repository.save_quotes(candidate.quotes())?;
        self.book = candidate;
        Ok(())
    }

    /// Validate, append, and persist a new quote.
    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote, SessionError> {
        let mut candidate = self.book.clone();
        let quote = candidate.add(text, category)?;
        self.commit(candidate)?;
        info!(text = %quote.text, category = %quote.category, "Quote added");
        Ok(quote)
    }

    /// Append imported records verbatim and persist. Returns how many were
    /// appended.
    pub fn import(&mut self, quotes: Vec<Quote>) -> Result<usize, StorageError> {
        let count = quotes.len();
        let mut candidate = self.book.clone();
        candidate.extend(quotes);
        self.commit(candidate)?;
        info!(count, total = self.book.len(), "Quotes imported");
        Ok(count)
    }

    /// Merge a fetched remote batch and persist the result.
    pub fn apply_remote(&mut self, batch: Vec<Quote>, policy: ConflictPolicy) -> Result<MergeOutcome, StorageError> {
        let mut candidate = self.book.clone();
        let outcome = candidate.merge_remote(batch, policy);
        self.commit(candidate)?;
        debug!(?outcome, "Remote batch merged");
        Ok(outcome)
    }

    /// Pick a random quote from the active filter and remember it for the
    /// rest of the session.
    pub fn random_quote(&mut self) -> Result<Option<Quote>, StorageError> {
        let picked = self
            .book
            .random(&self.filter, &mut rand::thread_rng())
            .cloned();
        if let Some(quote) = &picked {
            self.repository.save_last_viewed(quote)?;
        }
        Ok(picked)
    }

    pub fn last_viewed(&self) -> Result<Option<Quote>, StorageError> {
        self.repository.last_viewed()
    }

    /// Render the selector and the filtered list.
    pub fn render_to<W: Renderer + ?Sized>(&self, renderer: &mut W) -> std::io::Result<()> {
        renderer.render_categories(&self.category_options())?;
        renderer.render(&self.visible())
    }
}
