//! Turning quotes into display lines.
//!
//! The line format and placeholders are shared by the plain-text renderer
//! and the terminal UI.

use std::io::{self, Write};

use crate::filter::{CategoryFilter, ALL};
use crate::quote::Quote;

/// Shown in place of the list when the filtered view is empty.
pub const EMPTY_LIST: &str = "No quotes found for this category.";
/// Shown in place of a single quote when there is nothing to pick from.
pub const NO_QUOTE: &str = "No quotes available.";

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// "All Categories" followed by each category, with `active` marked.
pub fn category_options(categories: &[String], active: &CategoryFilter) -> Vec<CategoryOption> {
    let all = CategoryOption {
        value: ALL.to_string(),
        label: CategoryFilter::All.label().to_string(),
        selected: *active == CategoryFilter::All,
    };
    std::iter::once(all)
        .chain(categories.iter().map(|category| CategoryOption {
            value: category.clone(),
            label: category.clone(),
            selected: active.as_str() == category && *active != CategoryFilter::All,
        }))
        .collect()
}

/// Display lines for a list view; a single placeholder line when empty.
pub fn list_lines(quotes: &[&Quote]) -> Vec<String> {
    if quotes.is_empty() {
        return vec![EMPTY_LIST.to_string()];
    }
    quotes.iter().map(|quote| quote.to_string()).collect()
}

/// Display line for a single highlighted quote.
pub fn single_line(quote: Option<&Quote>) -> String {
    quote.map_or_else(|| NO_QUOTE.to_string(), Quote::to_string)
}

/// A display surface for quotes.
///
/// Each call replaces whatever the previous call of the same kind produced.
pub trait Renderer {
    fn render(&mut self, quotes: &[&Quote]) -> io::Result<()>;

    fn render_single(&mut self, quote: Option<&Quote>) -> io::Result<()>;

    fn render_categories(&mut self, options: &[CategoryOption]) -> io::Result<()>;
}

/// Line-oriented renderer for the command line.
pub struct TextRenderer<W: Write> {
    out: W,
    show_categories: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_categories: false,
        }
    }

    /// Also print the category selector before the list.
    pub fn with_categories(mut self) -> Self {
        self.show_categories = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, quotes: &[&Quote]) -> io::Result<()> {
        for line in list_lines(quotes) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn render_single(&mut self, quote: Option<&Quote>) -> io::Result<()> {
        writeln!(self.out, "{}", single_line(quote))?;
        self.out.flush()
    }

    fn render_categories(&mut self, options: &[CategoryOption]) -> io::Result<()> {
        if !self.show_categories {
            return Ok(());
        }
        for option in options {
            let marker = if option.selected { '*' } else { ' ' };
            writeln!(self.out, "{marker} {}", option.label)?;
        }
        writeln!(self.out)
    }
}
