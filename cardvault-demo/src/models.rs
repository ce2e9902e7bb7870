//! Raw form values as a storefront collects them.

use anyhow::{Context, Result};
use cardvault_lib::cards::{BillingAddress, CardDetails};
use serde::{Deserialize, Serialize};

/// Raw payment method form values, all strings, as submitted by a browser.
///
/// Mirrors the add-payment-method form: card fields plus billing information.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardForm {
    /// Card number field.
    pub number: String,
    /// Expiration month, e.g. "01".
    pub exp_month: String,
    /// Expiration year, e.g. "2030".
    pub exp_year: String,
    /// Security code field.
    pub security_code: String,
    /// Billing country code.
    pub country_code: String,
    /// Billing given name.
    pub given_name: String,
    /// Billing family name.
    pub family_name: String,
    /// Billing address line 1.
    pub address_line1: String,
    /// Optional billing address line 2.
    pub address_line2: Option<String>,
    /// Billing locality.
    pub locality: String,
    /// Optional billing postal code.
    pub postal_code: Option<String>,
}

impl CardForm {
    /// Parse the raw values into validated-ready card details.
    ///
    /// Only field *parsing* happens here ("01" -> 1); semantic validation is
    /// the core library's job.
    pub fn into_details(self) -> Result<CardDetails> {
        let exp_month: u32 = self
            .exp_month
            .trim()
            .parse()
            .with_context(|| format!("invalid expiration month: {:?}", self.exp_month))?;
        let exp_year: i32 = self
            .exp_year
            .trim()
            .parse()
            .with_context(|| format!("invalid expiration year: {:?}", self.exp_year))?;

        Ok(CardDetails::new(
            self.number.trim(),
            exp_month,
            exp_year,
            self.security_code.trim(),
            BillingAddress {
                country_code: self.country_code,
                given_name: self.given_name,
                family_name: self.family_name,
                address_line1: self.address_line1,
                address_line2: self.address_line2,
                locality: self.locality,
                postal_code: self.postal_code,
            },
        ))
    }
}
