//! Quote records and the collection that owns them.

mod book;
mod model;
mod seed;

pub use book::QuoteBook;
pub use model::{Quote, ValidationError};
pub use seed::seed_quotes;
