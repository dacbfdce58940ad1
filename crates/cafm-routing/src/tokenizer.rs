//! Ticket text tokenization.
//!
//! Text is lower-cased (Unicode, locale-invariant), every character that is
//! not alphanumeric or whitespace becomes a space, and the result is split on
//! whitespace. Tokens of [`defaults::MAX_DISCARDED_TOKEN_LEN`] characters or
//! fewer are dropped.

use std::collections::HashSet;

use cafm_core::defaults;

/// Tokenize one piece of text, keeping duplicates and order.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > defaults::MAX_DISCARDED_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// Distinct tokens of a ticket's title and description.
///
/// Classification and extraction are presence tests, so repeated tokens
/// collapse into one entry.
pub fn ticket_tokens(title: &str, description: &str) -> HashSet<String> {
    tokenize(&format!("{} {}", title, description))
        .into_iter()
        .collect()
}
