use lazy_static::lazy_static;
use regex::Regex;

use crate::results::{Chain, TokenSignal};
use crate::snapshot::{PageSnapshot, SelectorChain};

lazy_static! {
    // Chain slug and pair address, e.g. dexscreener.com/solana/8sLb...
    static ref PAIR_PATH: Regex = Regex::new(r"dexscreener\.com/([^/]+)/([^/?]+)").unwrap();
}

pub const SYMBOL: SelectorChain = SelectorChain(&[r#"[data-test="token-symbol"]"#, ".token-symbol"]);
pub const PRICE: SelectorChain = SelectorChain(&[r#"[data-test="token-price"]"#, ".token-price"]);
pub const VOLUME_24H: SelectorChain = SelectorChain(&[r#"[data-test="volume-24h"]"#, ".volume-24h"]);
pub const LIQUIDITY: SelectorChain = SelectorChain(&[r#"[data-test="liquidity"]"#, ".liquidity"]);

/// Reads the structured token panel of a pair page.
///
/// Returns `None` when the URL carries no `<chain>/<pairAddress>` path. Individual
/// fields the page does not expose are left unset.
pub fn extract(url: &str, page: &dyn PageSnapshot) -> Option<TokenSignal> {
    let caps = PAIR_PATH.captures(url)?;
    let chain = Chain::from(caps.get(1)?.as_str());
    let address = caps.get(2)?.as_str().to_string();

    ::log::debug!("Reading token panel for {} pair {}", chain, address);

    Some(TokenSignal {
        chain,
        address,
        symbol: SYMBOL.first_text(page),
        price: PRICE.first_text(page),
        volume: VOLUME_24H.first_text(page),
        liquidity: LIQUIDITY.first_text(page),
    })
}
