//! Symbol catalog — maps a selector to its symbol universe.
//!
//! The catalog is a static table; selectors are plain kebab-case keys. An
//! explicit symbol list on the request bypasses the catalog entirely.

/// Resolve a selector to its symbols. `None` for unknown selectors.
pub fn resolve(selector: &str) -> Option<&'static [&'static str]> {
    let symbols: &[&str] = match selector {
        "bonds" => &["SHY", "IEF", "TLT"],
        "crypto" => &["BTC-USD", "ETH-USD", "LTC-USD", "ADA-USD", "XLM-USD"],
        "agriculture" => &["DBA", "CORN", "WEAT", "SOYB"],
        "energy" => &["USO", "UNG", "XLE", "XOP"],
        "metals" => &["GLD", "SLV", "CPER", "PPLT"],
        "us-etfs" => &[
            "SPY", "QQQ", "DIA", "IWM", "EEM", "GDX", "XLF", "XLK", "XLV", "VNQ",
        ],
        "forex" => &["EURUSD=X", "GBPUSD=X", "USDJPY=X", "AUDUSD=X", "USDCHF=X"],
        _ => return None,
    };
    Some(symbols)
}

/// All known selectors, for listings and error messages.
pub fn selectors() -> &'static [&'static str] {
    &[
        "bonds",
        "crypto",
        "agriculture",
        "energy",
        "metals",
        "us-etfs",
        "forex",
    ]
}
