//! Payee records and the scanned-payload parser.
//!
//! A payment QR code carries a URI such as
//! `upi://pay?pa=localstore@okaxis&pn=Local%20Store`. Only `pa` (payee
//! address) is required; `pn` (payee name) falls back to
//! [`UNKNOWN_MERCHANT`].

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

use crate::Rejection;

/// Literal scheme-and-path prefix every payment payload starts with.
pub const PAYMENT_URI_PREFIX: &str = "upi://pay?";

/// Display name used when a payload has no `pn` parameter.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Resolved recipient identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayeeRecord {
    pub name: String,
    pub upi_handle: String,
}

impl PayeeRecord {
    pub fn new(name: impl Into<String>, upi_handle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            upi_handle: upi_handle.into(),
        }
    }

    /// First character of the name, used as avatar.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Parses a scanned payload into a payee.
///
/// Never panics: anything that does not literally start with `upi://pay?` and
/// carry a non-empty `pa` parameter is a [`Rejection`]. Surrounding whitespace
/// is not stripped here; decoders hand over trimmed payloads.
pub fn parse_payment_uri(raw: &str) -> Result<PayeeRecord, Rejection> {
    // `Url::parse` silently strips surrounding whitespace, so check it first.
    if !raw.starts_with(PAYMENT_URI_PREFIX) || raw.ends_with(char::is_whitespace) {
        return Err(Rejection::NotPaymentUri);
    }

    let url = Url::parse(raw).map_err(|_| Rejection::NotPaymentUri)?;

    let mut payee_address: Option<String> = None;
    let mut payee_name: Option<String> = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "pa" if payee_address.is_none() => payee_address = Some(value.into_owned()),
            "pn" if payee_name.is_none() => payee_name = Some(value.into_owned()),
            _ => {}
        }
    }

    let upi_handle = payee_address
        .filter(|pa| !pa.is_empty())
        .ok_or(Rejection::MissingPayeeAddress)?;
    let name = payee_name
        .filter(|pn| !pn.is_empty())
        .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());

    Ok(PayeeRecord { name, upi_handle })
}

/// Builds the payload a payer would scan to pay `payee`.
pub fn payment_uri(payee: &PayeeRecord) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("pa", &payee.upi_handle)
        .append_pair("pn", &payee.name)
        .finish();
    format!("{PAYMENT_URI_PREFIX}{query}")
}
