use crate::request::{CacheChain, CacheOutcome};

/// Splits the text after the request line into the cache chain and HTTP status.
///
/// Best effort: a missing or non-numeric status yields `None` and never
/// discards the chain. Tokens are separated by commas and/or whitespace.
pub fn parse_tail(tail: &str) -> (CacheChain, Option<u16>) {
    let mut tokens: Vec<&str> = tail
        .split([',', ' ', '\t'])
        .filter(|token| !token.is_empty())
        .collect();

    let status = match tokens.last() {
        Some(last) if last.bytes().all(|b| b.is_ascii_digit()) => {
            let status = last.parse::<u16>().ok();
            tokens.pop();
            status
        }
        _ => None,
    };

    let chain = tokens.into_iter().map(CacheOutcome::from_token).collect();

    (chain, status)
}
