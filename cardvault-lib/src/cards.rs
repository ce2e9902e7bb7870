//! Card detail values and brand detection.
//!
//! This module holds the transient representation of entered card data before
//! tokenization. The security code never leaves this value and is never
//! persisted; only the brand and the last four digits survive into a stored
//! payment method.

use crate::{Result, VaultError};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card brand derived from the number prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    /// Visa (prefix 4).
    Visa,
    /// Mastercard (prefixes 51-55 and 2221-2720).
    Mastercard,
    /// American Express (prefixes 34 and 37).
    Amex,
    /// Discover (prefixes 6011, 644-649 and 65).
    Discover,
    /// Diners Club (prefixes 300-305, 36 and 38).
    DinersClub,
    /// JCB (prefixes 3528-3589).
    Jcb,
    /// UnionPay (prefix 62).
    UnionPay,
}

impl CardBrand {
    /// Detects the brand from a card number.
    ///
    /// Returns `None` when no known prefix matches. Detection only looks at
    /// the leading digits; full number validation lives in
    /// [`CardDetails::validate`].
    pub fn detect(number: &str) -> Option<Self> {
        let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }

        let prefix = |len: usize| -> Option<u32> {
            if digits.len() < len {
                return None;
            }
            digits[..len].parse().ok()
        };

        if digits.starts_with('4') {
            return Some(Self::Visa);
        }
        if let Some(p2) = prefix(2) {
            if (51..=55).contains(&p2) {
                return Some(Self::Mastercard);
            }
            if p2 == 34 || p2 == 37 {
                return Some(Self::Amex);
            }
            if p2 == 65 {
                return Some(Self::Discover);
            }
            if p2 == 36 || p2 == 38 {
                return Some(Self::DinersClub);
            }
            if p2 == 62 {
                return Some(Self::UnionPay);
            }
        }
        if let Some(p4) = prefix(4) {
            if (2221..=2720).contains(&p4) {
                return Some(Self::Mastercard);
            }
            if p4 == 6011 {
                return Some(Self::Discover);
            }
            if (3528..=3589).contains(&p4) {
                return Some(Self::Jcb);
            }
        }
        if let Some(p3) = prefix(3) {
            if (644..=649).contains(&p3) {
                return Some(Self::Discover);
            }
            if (300..=305).contains(&p3) {
                return Some(Self::DinersClub);
            }
        }

        None
    }

    /// Machine identifier for the brand (e.g. "visa").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::DinersClub => "dinersclub",
            Self::Jcb => "jcb",
            Self::UnionPay => "unionpay",
        }
    }

    /// Human-readable brand name (e.g. "Visa").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::UnionPay => "UnionPay",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Structured billing address collected alongside card details.
///
/// Address validation rules are intentionally not applied here; they belong to
/// the collecting form layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    /// ISO country code (e.g. "AF").
    pub country_code: String,
    /// Given name.
    pub given_name: String,
    /// Family name.
    pub family_name: String,
    /// First address line.
    pub address_line1: String,
    /// Optional second address line.
    pub address_line2: Option<String>,
    /// City/locality.
    pub locality: String,
    /// Optional postal code.
    pub postal_code: Option<String>,
}

/// Immutable card details entered by the user, pre-persistence.
///
/// # Example
///
/// ```
/// use cardvault_lib::cards::{BillingAddress, CardBrand, CardDetails};
///
/// let details = CardDetails::new(
///     "4111111111111111",
///     1,
///     2030,
///     "111",
///     BillingAddress::default(),
/// );
/// assert!(details.validate().is_ok());
/// assert_eq!(details.brand(), Some(CardBrand::Visa));
/// assert_eq!(details.last4(), "1111");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// The full card number (digits only).
    pub number: String,
    /// Expiration month (1-12).
    pub exp_month: u32,
    /// Expiration year (four digits).
    pub exp_year: i32,
    /// Security code. Transient; never persisted.
    pub security_code: String,
    /// Billing address.
    pub billing_address: BillingAddress,
}

impl CardDetails {
    /// Create new card details.
    pub fn new(
        number: impl Into<String>,
        exp_month: u32,
        exp_year: i32,
        security_code: impl Into<String>,
        billing_address: BillingAddress,
    ) -> Self {
        Self {
            number: number.into(),
            exp_month,
            exp_year,
            security_code: security_code.into(),
            billing_address,
        }
    }

    /// Validates the card details.
    ///
    /// Checks performed, in order: number is digits-only and 12-19 characters,
    /// the expiration month is 1-12, the expiration date is not in the past,
    /// and the security code is 3-4 digits. All checks run before any gateway
    /// call is made.
    pub fn validate(&self) -> Result<()> {
        let number = self.number.trim();
        if number.is_empty() {
            return Err(VaultError::validation("number", "must not be empty"));
        }
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(VaultError::validation("number", "must contain only digits"));
        }
        if number.len() < 12 || number.len() > 19 {
            return Err(VaultError::validation(
                "number",
                format!("invalid length: {} (expected 12-19)", number.len()),
            ));
        }

        if self.exp_month < 1 || self.exp_month > 12 {
            return Err(VaultError::validation(
                "expiration month",
                format!("{} is out of range (expected 1-12)", self.exp_month),
            ));
        }
        let now = Utc::now();
        let expired = self.exp_year < now.year()
            || (self.exp_year == now.year() && self.exp_month < now.month());
        if expired {
            return Err(VaultError::validation(
                "expiration date",
                format!("{}/{} is in the past", self.exp_month, self.exp_year),
            ));
        }

        let code = self.security_code.trim();
        if code.len() < 3
            || code.len() > 4
            || !code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(VaultError::validation(
                "security code",
                "must be 3-4 digits",
            ));
        }

        Ok(())
    }

    /// Detects the card brand from the number.
    pub fn brand(&self) -> Option<CardBrand> {
        CardBrand::detect(&self.number)
    }

    /// Returns the last four digits of the card number.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self
            .number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits
            .iter()
            .skip(digits.len().saturating_sub(4))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(number: &str) -> CardDetails {
        CardDetails::new(number, 1, Utc::now().year() + 1, "111", BillingAddress::default())
    }

    #[test]
    fn test_detect_brands() {
        assert_eq!(CardBrand::detect("4111111111111111"), Some(CardBrand::Visa));
        assert_eq!(
            CardBrand::detect("5555555555554444"),
            Some(CardBrand::Mastercard)
        );
        assert_eq!(
            CardBrand::detect("2221000000000009"),
            Some(CardBrand::Mastercard)
        );
        assert_eq!(CardBrand::detect("378282246310005"), Some(CardBrand::Amex));
        assert_eq!(
            CardBrand::detect("6011111111111117"),
            Some(CardBrand::Discover)
        );
        assert_eq!(
            CardBrand::detect("30569309025904"),
            Some(CardBrand::DinersClub)
        );
        assert_eq!(
            CardBrand::detect("3530111333300000"),
            Some(CardBrand::Jcb)
        );
        assert_eq!(
            CardBrand::detect("6200000000000005"),
            Some(CardBrand::UnionPay)
        );
        assert_eq!(CardBrand::detect("9999999999999999"), None);
        assert_eq!(CardBrand::detect(""), None);
    }

    #[test]
    fn test_brand_display() {
        assert_eq!(CardBrand::Visa.as_str(), "visa");
        assert_eq!(format!("{}", CardBrand::Visa), "Visa");
    }

    #[test]
    fn test_valid_details() {
        assert!(details("4111111111111111").validate().is_ok());
    }

    #[test]
    fn test_number_validation() {
        let mut d = details("4111 1111 1111 1111");
        assert!(d.validate().is_err()); // spaces are not digits

        d.number = "41111".to_string();
        assert!(d.validate().is_err()); // too short

        d.number = "".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_expiration_validation() {
        let mut d = details("4111111111111111");
        d.exp_month = 13;
        assert!(d.validate().is_err());

        d.exp_month = 1;
        d.exp_year = 2000;
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("in the past"));
    }

    #[test]
    fn test_current_month_is_not_expired() {
        let now = Utc::now();
        let mut d = details("4111111111111111");
        d.exp_month = now.month();
        d.exp_year = now.year();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_security_code_validation() {
        let mut d = details("4111111111111111");
        d.security_code = "11".to_string();
        assert!(d.validate().is_err());

        d.security_code = "11111".to_string();
        assert!(d.validate().is_err());

        d.security_code = "abc".to_string();
        assert!(d.validate().is_err());

        d.security_code = "1234".to_string();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_last4() {
        assert_eq!(details("4111111111111111").last4(), "1111");
        assert_eq!(details("4242424242424242").last4(), "4242");
    }
}
