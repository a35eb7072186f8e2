//! Stateless extractors, one per signal type.
//!
//! Each extractor only reads its snapshot and may return nothing. Deduplication is
//! per extractor and per pass; signals found by two different extractors are kept twice.

pub mod addresses;
pub mod mentions;
pub mod pairs;
pub mod panel;


use crate::results::Chain;

/// Chain assigned to signals that carry no chain information of their own
pub const PRIMARY_CHAIN: Chain = Chain::Solana;

/// Maximum number of address signals kept from one pass
pub const MAX_ADDRESS_SIGNALS: usize = 5;

/// Maximum number of trading-pair signals kept from one pass
pub const MAX_PAIR_SIGNALS: usize = 3;

/// Extractors an assembler can run over a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Structured price panel scraper
    Panel,
    /// `$TICKER` mentions
    Mentions,
    /// Contract addresses
    Addresses,
    /// `BASE/QUOTE` trading pairs
    Pairs,
}
