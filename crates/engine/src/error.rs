//! The module contains the errors the engine can produce.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] produced when user text is not a valid amount.
//! - [`Rejection`] produced when a scanned payload is not a usable payment URI.
//! - [`ScanFailure`] every way a scan attempt can fail, recovered on the Scan
//!   screen with a notice.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Why a scanned payload was not accepted as a payee.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("not a payment URI")]
    NotPaymentUri,
    #[error("missing payee address")]
    MissingPayeeAddress,
}

/// Failures reported by the scan path (parser, camera, image decoder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanFailure {
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] Rejection),
    #[error("camera unavailable: {0}")]
    CaptureUnavailable(String),
    #[error("decode failure: {0}")]
    DecodeFailure(String),
}

impl ScanFailure {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MalformedPayload(_) => {
                "Invalid QR code. Please scan a valid UPI payment QR code."
            }
            Self::CaptureUnavailable(_) => "Failed to access camera. Please upload a QR image instead.",
            Self::DecodeFailure(_) => "Failed to scan QR code. Please try again.",
        }
    }
}
