use super::Quote;

/// Quotes a fresh installation starts with.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The best way to predict the future is to invent it.",
            "Technology",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        Quote::new("Do or do not. There is no try.", "Motivation"),
    ]
}
