use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::{MAX_PAIR_SIGNALS, PRIMARY_CHAIN};
use crate::results::TokenSignal;
use crate::snapshot::PageSnapshot;

lazy_static! {
    static ref TRADING_PAIR: Regex = Regex::new(r"\b([A-Z]{2,10})/([A-Z]{2,10})\b").unwrap();
}

/// Scans page text for `BASE/QUOTE` trading pairs.
///
/// Pairs are deduplicated on the full `BASE/QUOTE` text, only the base symbol is kept,
/// and at most [`MAX_PAIR_SIGNALS`] are returned.
pub fn extract(page: &dyn PageSnapshot) -> Vec<TokenSignal> {
    extract_from_text(page.text())
}

pub fn extract_from_text(text: &str) -> Vec<TokenSignal> {
    let mut seen = HashSet::new();
    let signals = TRADING_PAIR
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(0)?.as_str(), caps.get(1)?.as_str())))
        .filter(|(pair, _)| seen.insert(*pair))
        .map(|(_, base)| TokenSignal::unresolved(PRIMARY_CHAIN, base))
        .take(MAX_PAIR_SIGNALS)
        .collect::<Vec<_>>();

    ::log::debug!("Pair scan found {} pairs", signals.len());
    signals
}
