//! Demo data used to seed a fresh session.
//!
//! Everything here is a process-wide constant. Callers receive owned copies,
//! so seeding never aliases the constants.

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::{Amount, Direction, PayeeRecord, SenderIdentity, TransactionRecord};

/// Quick-pay merchant directory as `(name, upi handle)`.
pub const DEMO_MERCHANTS: [(&str, &str); 3] = [
    ("Starbucks Coffee", "starbucks@paytm"),
    ("Local Store", "localstore@okaxis"),
    ("Restaurant XYZ", "restaurant@ybl"),
];

/// Quick-amount shortcuts on the amount screen, in rupees.
pub const AMOUNT_PRESETS: [i64; 6] = [100, 200, 500, 1000, 2000, 5000];

pub const DEFAULT_SENDER_NAME: &str = "Ashim Raj";
pub const DEFAULT_SENDER_UPI: &str = "ashimraj@indusind";
pub const DEFAULT_BANK: &str = "IndusInd Bank";
pub const DEFAULT_BALANCE_RUPEES: i64 = 10_000;

/// `(name, amount in rupees, date, upi handle)`, most recent first.
const SEED_HISTORY: [(&str, i64, (i32, u32, u32), &str); 3] = [
    ("John Doe", 500, (2024, 1, 15), "johndoe@paytm"),
    ("Coffee Shop", 250, (2024, 1, 14), "coffee@paytm"),
    ("Grocery Store", 1200, (2024, 1, 13), "grocery@okaxis"),
];

pub fn merchants() -> Vec<PayeeRecord> {
    DEMO_MERCHANTS
        .iter()
        .map(|(name, upi)| PayeeRecord::new(*name, *upi))
        .collect()
}

pub fn default_sender() -> SenderIdentity {
    SenderIdentity {
        name: DEFAULT_SENDER_NAME.to_string(),
        upi_handle: DEFAULT_SENDER_UPI.to_string(),
        bank: DEFAULT_BANK.to_string(),
    }
}

pub fn default_balance() -> Amount {
    Amount::from_major(DEFAULT_BALANCE_RUPEES)
}

/// Initial history, most recent first.
pub fn seed_history() -> Vec<TransactionRecord> {
    SEED_HISTORY
        .iter()
        .filter_map(|(name, rupees, (y, m, d), upi)| {
            let date = NaiveDate::from_ymd_opt(*y, *m, *d)?.and_hms_opt(12, 0, 0)?;
            Some(TransactionRecord {
                id: Uuid::new_v4(),
                counterparty_name: (*name).to_string(),
                counterparty_upi: (*upi).to_string(),
                amount: Amount::from_major(*rupees),
                direction: Direction::Sent,
                timestamp: Utc.from_utc_datetime(&date),
                transaction_ref: None,
                sender: None,
            })
        })
        .collect()
}
