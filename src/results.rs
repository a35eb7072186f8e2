use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::PageCategory;

/// Chain tag attached to a signal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Chain {
    Solana,
    Ethereum,
    /// Any chain slug taken verbatim from a page URL (e.g. "bsc", "base")
    Other(String),
}

impl Chain {
    pub fn as_str(&self) -> &str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
            Chain::Other(slug) => slug,
        }
    }
}

impl From<String> for Chain {
    fn from(value: String) -> Self {
        match value.as_str() {
            "solana" => Chain::Solana,
            "ethereum" => Chain::Ethereum,
            _ => Chain::Other(value),
        }
    }
}

impl From<&str> for Chain {
    fn from(value: &str) -> Self {
        Chain::from(value.to_string())
    }
}

impl From<Chain> for String {
    fn from(value: Chain) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted candidate token reference with optional market fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSignal {
    /// Chain the token lives on
    pub chain: Chain,

    /// Contract or pair address; empty when not yet resolved
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<String>,
}

impl TokenSignal {
    /// A signal known only by its ticker; the address is left for an external resolver
    pub fn unresolved(chain: Chain, symbol: &str) -> Self {
        Self {
            chain,
            address: String::new(),
            symbol: Some(symbol.to_string()),
            price: None,
            volume: None,
            liquidity: None,
        }
    }

    /// A signal known only by its address
    pub fn at_address(chain: Chain, address: &str) -> Self {
        Self {
            chain,
            address: address.to_string(),
            symbol: None,
            price: None,
            volume: None,
            liquidity: None,
        }
    }
}

/// Snapshot of everything extracted from one page in a single pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// URL of the page
    pub source_url: String,

    /// Document title (empty if the page has none)
    pub title: String,

    pub category: PageCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_signal: Option<TokenSignal>,

    #[serde(default)]
    pub all_signals: Vec<TokenSignal>,
}

impl PageContext {
    /// True when the pass found no page-specific data at all
    pub fn is_empty(&self) -> bool {
        self.primary_signal.is_none() && self.all_signals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_round_trips_through_tag() {
        assert_eq!(Chain::from("solana"), Chain::Solana);
        assert_eq!(Chain::from("ethereum"), Chain::Ethereum);
        assert_eq!(Chain::from("bsc"), Chain::Other("bsc".to_string()));
        assert_eq!(String::from(Chain::Other("base".to_string())), "base");
    }

    #[test]
    fn test_signal_serializes_without_absent_fields() {
        let signal = TokenSignal::unresolved(Chain::Solana, "BONK");
        let json = serde_json::to_value(&signal).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "chain": "solana", "address": "", "symbol": "BONK" })
        );
    }

    #[test]
    fn test_context_uses_camel_case_keys() {
        let context = PageContext {
            source_url: "https://example.com".to_string(),
            title: "Example".to_string(),
            category: PageCategory::Generic,
            primary_signal: None,
            all_signals: vec![],
        };
        let json = serde_json::to_value(&context).unwrap();

        assert_eq!(json["sourceUrl"], "https://example.com");
        assert_eq!(json["category"], "generic");
        assert!(json.get("primarySignal").is_none());
        assert_eq!(json["allSignals"], serde_json::json!([]));
        assert!(context.is_empty());
    }
}
