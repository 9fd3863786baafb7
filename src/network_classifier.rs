use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const UNKNOWN_NETWORK: &str = "Unknown";

/// Longest fixed prefix tried first.
const MAX_PREFIX_LEN: usize = 6;

/// Exact-match issuer prefixes.
pub static FIXED_PREFIXES: &[(&str, &str)] = &[
    ("34", "American Express"),
    ("37", "American Express"),
    ("5610", "Bankcard"),
    ("560221", "Bankcard"),
    ("560222", "Bankcard"),
    ("560223", "Bankcard"),
    ("560224", "Bankcard"),
    ("560225", "Bankcard"),
    ("31", "China T-Union"),
    ("62", "China UnionPay"),
    ("30", "Diners Club International"),
    ("36", "Diners Club International"),
    ("38", "Diners Club International"),
    ("39", "Diners Club International"),
    ("55", "Diners Club United States & Canada"),
    ("6011", "Discover Card"),
    ("644", "Discover Card"),
    ("645", "Discover Card"),
    ("646", "Discover Card"),
    ("647", "Discover Card"),
    ("648", "Discover Card"),
    ("649", "Discover Card"),
    ("65", "Discover Card"),
    ("2200", "Mir"),
    ("2201", "Mir"),
    ("2202", "Mir"),
    ("2203", "Mir"),
    ("2204", "Mir"),
    ("2205", "BORICA"),
    ("5019", "Dankort"),
    ("4571", "Dankort (Visa co-branded)"),
    ("9792", "Troy"),
    ("4", "Visa"),
    ("4026", "Visa Electron"),
    ("417500", "Visa Electron"),
    ("4508", "Visa Electron"),
    ("4844", "Visa Electron"),
    ("4913", "Visa Electron"),
    ("4917", "Visa Electron"),
    ("1", "UATP"),
    ("506099", "Verve"),
    ("506198", "Verve"),
    ("650002", "Verve"),
    ("650027", "Verve"),
    ("507865", "Verve"),
    ("507964", "Verve"),
    ("357111", "LankaPay"),
    ("8600", "UzCard"),
    ("5614", "UzCard"),
    ("9860", "Humo"),
    ("1946", "GPN"),
];

/// Inclusive prefix range. A card matches when its leading `start.len()`
/// bytes sort between `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange {
    pub start: &'static str,
    pub end: &'static str,
    pub network: &'static str,
}

impl PrefixRange {
    const fn new(start: &'static str, end: &'static str, network: &'static str) -> Self {
        PrefixRange { start, end, network }
    }

    pub fn matches(&self, card: &[u8]) -> bool {
        match card.get(..self.start.len()) {
            Some(prefix) => prefix >= self.start.as_bytes() && prefix <= self.end.as_bytes(),
            None => false,
        }
    }
}

/// Tested in order, first match wins.
pub static PREFIX_RANGES: &[PrefixRange] = &[
    PrefixRange::new("622126", "622925", "Discover Card"),
    PrefixRange::new("2221", "2720", "Mastercard"),
    PrefixRange::new("3528", "3589", "JCB"),
    PrefixRange::new("6334", "6767", "Solo"),
    PrefixRange::new("633110", "6333", "Switch"),
];

pub trait NetworkClassifier {
    /// Network name for `card`, or [`UNKNOWN_NETWORK`]. Never fails.
    fn classify(&self, card: &str) -> &str;
}

/// Two-phase prefix matcher: fixed prefixes longest first, then ranges in
/// declaration order.
pub struct PrefixNetworkClassifier {
    fixed: HashMap<&'static [u8], &'static str>,
    ranges: &'static [PrefixRange],
}

impl PrefixNetworkClassifier {
    pub fn new() -> Self {
        PrefixNetworkClassifier::with_tables(FIXED_PREFIXES, PREFIX_RANGES)
    }

    pub fn with_tables(fixed: &[(&'static str, &'static str)], ranges: &'static [PrefixRange]) -> Self {
        let fixed = fixed
            .iter()
            .map(|&(prefix, network)| (prefix.as_bytes(), network))
            .collect();
        PrefixNetworkClassifier { fixed, ranges }
    }

    fn fixed_match(&self, card: &[u8]) -> Option<&'static str> {
        (1..=MAX_PREFIX_LEN)
            .rev()
            .filter_map(|len| card.get(..len))
            .find_map(|prefix| self.fixed.get(prefix).copied())
    }

    fn range_match(&self, card: &[u8]) -> Option<&'static str> {
        self.ranges
            .iter()
            .find(|range| range.matches(card))
            .map(|range| range.network)
    }
}

impl Default for PrefixNetworkClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkClassifier for PrefixNetworkClassifier {
    fn classify(&self, card: &str) -> &str {
        let bytes = card.as_bytes();
        self.fixed_match(bytes)
            .or_else(|| self.range_match(bytes))
            .unwrap_or(UNKNOWN_NETWORK)
    }
}

static CLASSIFIER: Lazy<PrefixNetworkClassifier> = Lazy::new(PrefixNetworkClassifier::new);

/// Classifies `card` against the built-in prefix tables.
pub fn classify(card: &str) -> &'static str {
    let classifier: &'static PrefixNetworkClassifier = &CLASSIFIER;
    classifier.classify(card)
}
