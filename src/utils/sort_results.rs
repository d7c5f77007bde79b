use crate::types::{FrequencyTable, Token, TokenFrequency};

/// Sorts a frequency table by count.
///
/// ### Sorting Order:
/// - **Primary:** Sorts by frequency in descending order (higher frequency first).
/// - **Secondary:** If two tokens have the same frequency, sorts by token in ascending
///   lexicographical order for deterministic ordering.
///
/// ### Example:
/// ```rust
/// use tweet_token_counts::{sort_frequency_table, FrequencyTable};
///
/// let mut table = FrequencyTable::new();
/// table.insert("protest".to_string(), 10);
/// table.insert("march".to_string(), 15);
/// table.insert("crowd".to_string(), 10);
///
/// let sorted = sort_frequency_table(&table);
/// assert_eq!(sorted, vec![
///     ("march".to_string(), 15),
///     ("crowd".to_string(), 10),
///     ("protest".to_string(), 10)
/// ]);
/// ```
pub fn sort_frequency_table(table: &FrequencyTable) -> Vec<(Token, TokenFrequency)> {
    let mut sorted_results: Vec<(Token, TokenFrequency)> = table
        .iter()
        .map(|(token, frequency)| (token.to_owned(), *frequency))
        .collect();

    sorted_results.sort_by(|a, b| {
        b.1.cmp(&a.1) // Sort by frequency (descending)
            .then_with(|| a.0.cmp(&b.0)) // Secondary sort by token (ascending)
    });

    sorted_results
}

/// The `k` most frequent tokens, using the ordering of `sort_frequency_table`.
pub fn top_k_tokens(table: &FrequencyTable, k: usize) -> Vec<Token> {
    sort_frequency_table(table)
        .into_iter()
        .take(k)
        .map(|(token, _)| token)
        .collect()
}
