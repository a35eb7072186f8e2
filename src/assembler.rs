use crate::classify::PageCategory;
use crate::extractors::{self, ExtractorKind};
use crate::results::{PageContext, TokenSignal};
use crate::snapshot::PageSnapshot;

/// Extractors run for each page category, in concatenation order
pub fn extractors_for(category: PageCategory) -> &'static [ExtractorKind] {
    match category {
        PageCategory::StructuredMarket => &[ExtractorKind::Panel],
        PageCategory::SocialFeed => &[
            ExtractorKind::Mentions,
            ExtractorKind::Addresses,
            ExtractorKind::Pairs,
        ],
        PageCategory::Generic => &[ExtractorKind::Addresses, ExtractorKind::Pairs],
    }
}

/// Runs one extraction pass and builds a fresh context.
///
/// On structured-market pages the panel signal becomes the primary signal and the
/// signal list stays empty. Everywhere else the extractor outputs are concatenated
/// without cross-extractor deduplication and the first one becomes primary.
pub fn assemble(url: &str, title: &str, page: &dyn PageSnapshot) -> PageContext {
    let category = PageCategory::from_url(url);

    let mut primary_signal = None;
    let mut all_signals: Vec<TokenSignal> = Vec::new();

    for kind in extractors_for(category) {
        match kind {
            ExtractorKind::Panel => primary_signal = extractors::panel::extract(url, page),
            ExtractorKind::Mentions => all_signals.extend(extractors::mentions::extract(page)),
            ExtractorKind::Addresses => all_signals.extend(extractors::addresses::extract(page)),
            ExtractorKind::Pairs => all_signals.extend(extractors::pairs::extract(page)),
        }
    }

    if primary_signal.is_none() {
        primary_signal = all_signals.first().cloned();
    }

    ::log::debug!(
        "Assembled {:?} context for {}: primary {:?}, {} signals",
        category,
        url,
        primary_signal.as_ref().and_then(|s| s.symbol.as_deref()),
        all_signals.len()
    );

    PageContext {
        source_url: url.to_string(),
        title: title.to_string(),
        category,
        primary_signal,
        all_signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Chain;
    use crate::snapshot::{HtmlSnapshot, TextSnapshot};

    const EVM: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    #[test]
    fn test_social_feed_concatenates_in_order() {
        let text = format!("$BONK looking strong, {EVM} BONK/SOL");
        let page = TextSnapshot::new(text);
        let context = assemble("https://x.com/someone/status/1", "Post", &page);

        assert_eq!(context.category, PageCategory::SocialFeed);
        assert_eq!(context.all_signals.len(), 3);

        let mention = &context.all_signals[0];
        assert_eq!(mention.symbol.as_deref(), Some("BONK"));
        assert_eq!(mention.address, "");

        assert_eq!(context.all_signals[1].address, EVM);
        assert_eq!(context.all_signals[1].chain, Chain::Ethereum);

        assert_eq!(context.all_signals[2].symbol.as_deref(), Some("BONK"));
        assert_eq!(context.primary_signal.as_ref(), Some(mention));
    }

    #[test]
    fn test_cross_extractor_duplicates_are_kept() {
        let page = TextSnapshot::new("$BONK BONK/SOL");
        let context = assemble("https://twitter.com/home", "", &page);

        // Same symbol from the mention and the pair scanner
        assert_eq!(context.all_signals.len(), 2);
        assert_eq!(context.all_signals[0], context.all_signals[1]);
    }

    #[test]
    fn test_generic_page_skips_mentions() {
        let page = TextSnapshot::new(format!("$BONK {EVM} PEPE/USDT"));
        let context = assemble("https://example.com/news", "News", &page);

        assert_eq!(context.category, PageCategory::Generic);
        assert_eq!(context.all_signals.len(), 2);
        assert_eq!(context.all_signals[0].address, EVM);
        assert_eq!(context.all_signals[1].symbol.as_deref(), Some("PEPE"));
        assert_eq!(context.primary_signal.as_ref(), context.all_signals.first());
    }

    #[test]
    fn test_structured_page_fills_primary_only() {
        let page = HtmlSnapshot::parse(
            r#"<body><span class="token-symbol">BONK</span> $WIF BONK/SOL</body>"#,
        );
        let context = assemble("https://dexscreener.com/solana/pairaddr", "BONK", &page);

        assert_eq!(context.category, PageCategory::StructuredMarket);
        assert!(context.all_signals.is_empty());

        let primary = context.primary_signal.unwrap();
        assert_eq!(primary.address, "pairaddr");
        assert_eq!(primary.symbol.as_deref(), Some("BONK"));
    }

    #[test]
    fn test_nothing_found() {
        let page = TextSnapshot::new("just some words");
        let context = assemble("https://example.com", "Example", &page);
        assert!(context.is_empty());
        assert_eq!(context.title, "Example");
        assert_eq!(context.source_url, "https://example.com");

        let context = assemble("https://dexscreener.com/", "", &page);
        assert!(context.is_empty());
    }
}
