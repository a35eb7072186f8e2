use serde::{Deserialize, Serialize};

/// Domain marker for pages with a dedicated price/volume/liquidity panel
pub const STRUCTURED_MARKET_MARKER: &str = "dexscreener.com";

/// Domain markers for social feeds, checked in order
pub const SOCIAL_FEED_MARKERS: [&str; 2] = ["twitter.com", "x.com"];

/// Page categories, derived purely from the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageCategory {
    /// A page with a structured token panel for a single trading pair
    StructuredMarket,
    /// A social feed with inline ticker mentions
    SocialFeed,
    /// Anything else
    Generic,
}

impl PageCategory {
    /// Classifies a URL by case-sensitive substring match.
    ///
    /// The structured-market marker wins over the social-feed markers when both occur.
    pub fn from_url(url: &str) -> Self {
        if url.contains(STRUCTURED_MARKET_MARKER) {
            ::log::debug!("Classifying as StructuredMarket: {}", url);
            PageCategory::StructuredMarket
        } else if SOCIAL_FEED_MARKERS.iter().any(|marker| url.contains(marker)) {
            ::log::debug!("Classifying as SocialFeed: {}", url);
            PageCategory::SocialFeed
        } else {
            ::log::debug!("Classifying as Generic: {}", url);
            PageCategory::Generic
        }
    }
}

/// Free-function form of [`PageCategory::from_url`]
pub fn classify(url: &str) -> PageCategory {
    PageCategory::from_url(url)
}
