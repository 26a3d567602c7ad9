//! Local offer-code catalog used by the debug menu.

use crate::model::debug::OfferCode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static OFFER_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{4,20}$").expect("valid offer code regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferCodeError {
    InvalidFormat(String),
    Duplicate(String),
    NotFound(String),
    Expired(String),
    AlreadyRedeemed(String),
}

impl Display for OfferCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(code) => write!(
                f,
                "offer code `{code}` is invalid (expected 4-20 uppercase letters or digits)"
            ),
            Self::Duplicate(code) => write!(f, "offer code already registered: {code}"),
            Self::NotFound(code) => write!(f, "offer code not found: {code}"),
            Self::Expired(code) => write!(f, "offer code expired: {code}"),
            Self::AlreadyRedeemed(code) => write!(f, "offer code already redeemed: {code}"),
        }
    }
}

impl Error for OfferCodeError {}

/// Returns whether `code` (already normalized) has the accepted shape.
pub fn is_valid_offer_code(code: &str) -> bool {
    OFFER_CODE_RE.is_match(code)
}

/// Users type codes in any case and with stray whitespace.
fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// In-memory catalog keyed by normalized code.
#[derive(Debug, Default)]
pub struct OfferCodeCatalog {
    codes: BTreeMap<String, OfferCode>,
}

impl OfferCodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a code after normalizing and validating it.
    pub fn add(&mut self, mut offer: OfferCode) -> Result<(), OfferCodeError> {
        offer.code = normalize_code(&offer.code);
        if !is_valid_offer_code(&offer.code) {
            return Err(OfferCodeError::InvalidFormat(offer.code));
        }
        if self.codes.contains_key(&offer.code) {
            return Err(OfferCodeError::Duplicate(offer.code));
        }
        self.codes.insert(offer.code.clone(), offer);
        Ok(())
    }

    /// Redeems a code once; expired and already-redeemed codes are rejected.
    pub fn redeem(&mut self, code: &str, now_ms: i64) -> Result<OfferCode, OfferCodeError> {
        let normalized = normalize_code(code);
        let offer = self
            .codes
            .get_mut(&normalized)
            .ok_or_else(|| OfferCodeError::NotFound(normalized.clone()))?;
        if offer.is_redeemed {
            return Err(OfferCodeError::AlreadyRedeemed(normalized));
        }
        if offer.is_expired_at(now_ms) {
            return Err(OfferCodeError::Expired(normalized));
        }
        offer.is_redeemed = true;
        Ok(offer.clone())
    }

    /// Sorted by code.
    pub fn list(&self) -> Vec<&OfferCode> {
        self.codes.values().collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
