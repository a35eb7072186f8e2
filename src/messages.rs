use serde::{Deserialize, Serialize};

use crate::results::PageContext;

/// Messages pushed from the extractor to its host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    /// A full snapshot of the current page's context
    PageContextUpdate(PageContext),
}

/// Messages the host sends to the extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboundMessage {
    /// Re-extract and emit immediately
    GetPageContext,
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl InboundMessage {
    /// Parses one host message, returning `None` for anything unrecognised
    pub fn parse(line: &str) -> Option<Self> {
        match serde_json::from_str(line.trim()) {
            Ok(message) => Some(message),
            Err(e) => {
                ::log::debug!("Ignoring host message {:?}: {}", line, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PageCategory;
    use crate::results::{Chain, TokenSignal};

    #[test]
    fn test_context_update_wire_format() {
        let signal = TokenSignal::unresolved(Chain::Solana, "BONK");
        let message = OutboundMessage::PageContextUpdate(PageContext {
            source_url: "https://x.com/home".to_string(),
            title: "Home".to_string(),
            category: PageCategory::SocialFeed,
            primary_signal: Some(signal.clone()),
            all_signals: vec![signal],
        });

        let json: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "PAGE_CONTEXT_UPDATE",
                "data": {
                    "sourceUrl": "https://x.com/home",
                    "title": "Home",
                    "category": "social-feed",
                    "primarySignal": { "chain": "solana", "address": "", "symbol": "BONK" },
                    "allSignals": [{ "chain": "solana", "address": "", "symbol": "BONK" }]
                }
            })
        );
    }

    #[test]
    fn test_parse_inbound() {
        assert_eq!(
            InboundMessage::parse(r#"{"type":"GET_PAGE_CONTEXT"}"#),
            Some(InboundMessage::GetPageContext)
        );
        assert_eq!(
            InboundMessage::parse("  {\"type\": \"GET_PAGE_CONTEXT\"}\n"),
            Some(InboundMessage::GetPageContext)
        );
        assert_eq!(InboundMessage::parse(r#"{"type":"TOKEN_DETECTED"}"#), None);
        assert_eq!(InboundMessage::parse("not json"), None);
    }
}
