use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::MAX_ADDRESS_SIGNALS;
use crate::results::{Chain, TokenSignal};
use crate::snapshot::PageSnapshot;

/// Candidates with this many distinct characters or fewer are treated as noise
const MIN_DISTINCT_EXCLUSIVE: usize = 10;

lazy_static! {
    static ref EVM_ADDRESS: Regex = Regex::new(r"0x[a-fA-F0-9]{40}").unwrap();

    // Base58 alphabet: no 0, O, I or l. Longer runs match their first 44 chars.
    static ref BASE58_ADDRESS: Regex =
        Regex::new(r"[1-9A-HJ-NP-Za-km-z]{32,44}").unwrap();
}

/// Scans page text for contract addresses.
///
/// EVM-shaped matches are emitted once per occurrence. Base58-shaped matches are
/// deduplicated and filtered for repeated-character noise. EVM matches come first and
/// the combined list is cut to [`MAX_ADDRESS_SIGNALS`].
pub fn extract(page: &dyn PageSnapshot) -> Vec<TokenSignal> {
    extract_from_text(page.text())
}

pub fn extract_from_text(text: &str) -> Vec<TokenSignal> {
    let evm = EVM_ADDRESS
        .find_iter(text)
        .map(|m| TokenSignal::at_address(Chain::Ethereum, m.as_str()));

    let mut seen = HashSet::new();
    let base58 = BASE58_ADDRESS
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| looks_like_address(candidate))
        .filter(|candidate| seen.insert(*candidate))
        .map(|candidate| TokenSignal::at_address(Chain::Solana, candidate));

    let signals = evm
        .chain(base58)
        .take(MAX_ADDRESS_SIGNALS)
        .collect::<Vec<_>>();

    ::log::debug!("Address scan found {} addresses", signals.len());
    signals
}

/// Rejects candidates made of too few distinct characters (e.g. `AAAA...`)
pub fn looks_like_address(candidate: &str) -> bool {
    let distinct = candidate.chars().collect::<HashSet<_>>().len();
    if distinct <= MIN_DISTINCT_EXCLUSIVE {
        ::log::trace!(
            "Rejecting address candidate {} ({} distinct chars)",
            candidate,
            distinct
        );
        return false;
    }
    true
}
