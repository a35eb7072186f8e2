use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::PRIMARY_CHAIN;
use crate::results::TokenSignal;
use crate::snapshot::PageSnapshot;

lazy_static! {
    // `$` followed by 2-10 uppercase letters, ending on a word boundary
    static ref TICKER_MENTION: Regex = Regex::new(r"\$([A-Z]{2,10})\b").unwrap();
}

/// Scans page text for `$TICKER` mentions.
///
/// The first mention of each symbol wins and order of first appearance is kept.
/// Addresses are left unresolved.
pub fn extract(page: &dyn PageSnapshot) -> Vec<TokenSignal> {
    extract_from_text(page.text())
}

pub fn extract_from_text(text: &str) -> Vec<TokenSignal> {
    let mut seen = HashSet::new();
    let signals = TICKER_MENTION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|symbol| symbol.as_str())
        .filter(|symbol| seen.insert(*symbol))
        .map(|symbol| TokenSignal::unresolved(PRIMARY_CHAIN, symbol))
        .collect::<Vec<_>>();

    ::log::debug!("Mention scan found {} symbols", signals.len());
    signals
}
