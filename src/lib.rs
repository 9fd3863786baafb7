use serde::{Deserialize, Serialize};

pub mod config;
pub mod digit_normalizer;
pub mod error;
pub mod luhn_checker;
pub mod network_classifier;
pub mod routes;

pub use luhn_checker::validate;
pub use network_classifier::{classify, UNKNOWN_NETWORK};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    #[serde(rename = "company")]
    pub network: String,
}

/// Runs the Luhn check and the network lookup. The two are independent:
/// an invalid number still gets a best-effort network.
pub fn check_card(card: &str) -> ValidationResult {
    ValidationResult {
        is_valid: validate(card),
        network: classify(card).to_string(),
    }
}
