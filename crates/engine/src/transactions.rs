//! Transaction records and the bounded recent-transactions log.
//!
//! A `TransactionRecord` is immutable once created. The log keeps the most
//! recent record first and never holds more than [`TransactionLog::CAPACITY`]
//! entries.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Amount, PayeeRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

/// Identity of the account paying from this device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderIdentity {
    pub name: String,
    pub upi_handle: String,
    pub bank: String,
}

impl SenderIdentity {
    /// The sender seen as a payee, used to build the receive payload.
    pub fn as_payee(&self) -> PayeeRecord {
        PayeeRecord::new(self.name.clone(), self.upi_handle.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub counterparty_name: String,
    pub counterparty_upi: String,
    pub amount: Amount,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    /// Present on payments settled in this session.
    pub transaction_ref: Option<String>,
    /// Present on payments settled in this session.
    pub sender: Option<SenderIdentity>,
}

impl TransactionRecord {
    /// Amount with the sign implied by the direction.
    pub fn signed_amount(&self) -> Amount {
        match self.direction {
            Direction::Sent => Amount::new(-self.amount.minor()),
            Direction::Received => self.amount,
        }
    }

    pub fn initial(&self) -> char {
        self.counterparty_name.chars().next().unwrap_or('?')
    }
}

/// Recent transactions, most recent first.
#[derive(Clone, Debug, Default)]
pub struct TransactionLog {
    items: VecDeque<TransactionRecord>,
}

impl TransactionLog {
    pub const CAPACITY: usize = 10;

    /// Builds a log from records already ordered most-recent-first.
    ///
    /// Records past the capacity are dropped.
    pub fn from_recent_first(records: impl IntoIterator<Item = TransactionRecord>) -> Self {
        Self {
            items: records.into_iter().take(Self::CAPACITY).collect(),
        }
    }

    /// Prepends `record`, evicting the oldest entry when full.
    ///
    /// Returns the evicted record, if any.
    pub fn push(&mut self, record: TransactionRecord) -> Option<TransactionRecord> {
        self.items.push_front(record);
        if self.items.len() > Self::CAPACITY {
            self.items.pop_back()
        } else {
            None
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&TransactionRecord> {
        self.items.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn latest(&self) -> Option<&TransactionRecord> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Human label for how long ago `at` happened, e.g. `2 hours ago`.
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed.num_minutes() < 1 {
        return "Just now".to_string();
    }
    if elapsed.num_hours() < 1 {
        return plural(elapsed.num_minutes(), "minute");
    }
    if elapsed.num_days() < 1 {
        return plural(elapsed.num_hours(), "hour");
    }
    match elapsed.num_days() {
        1 => "Yesterday".to_string(),
        days @ 2..=6 => format!("{days} days ago"),
        _ => at.format("%Y-%m-%d").to_string(),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn record(name: &str) -> TransactionRecord {
        TransactionRecord {
            id: Uuid::new_v4(),
            counterparty_name: name.to_string(),
            counterparty_upi: format!("{}@upi", name.to_lowercase()),
            amount: Amount::from_major(10),
            direction: Direction::Sent,
            timestamp: Utc::now(),
            transaction_ref: None,
            sender: None,
        }
    }

    #[test]
    fn push_prepends_and_evicts_oldest() {
        let mut log = TransactionLog::default();
        for i in 0..TransactionLog::CAPACITY {
            assert!(log.push(record(&format!("N{i}"))).is_none());
        }
        assert_eq!(log.len(), TransactionLog::CAPACITY);

        let evicted = log.push(record("Newest")).unwrap();
        assert_eq!(evicted.counterparty_name, "N0");
        assert_eq!(log.len(), TransactionLog::CAPACITY);
        assert_eq!(log.latest().unwrap().counterparty_name, "Newest");
        let names: Vec<_> = log.iter().map(|r| r.counterparty_name.as_str()).collect();
        assert_eq!(names[1], "N9");
        assert_eq!(names[9], "N1");
    }

    #[test]
    fn from_recent_first_truncates() {
        let log = TransactionLog::from_recent_first((0..15).map(|i| record(&format!("N{i}"))));
        assert_eq!(log.len(), TransactionLog::CAPACITY);
        assert_eq!(log.latest().unwrap().counterparty_name, "N0");
    }

    #[test]
    fn lookup_by_id() {
        let mut log = TransactionLog::default();
        let r = record("Shop");
        let id = r.id;
        log.push(r);
        assert!(log.contains(id));
        assert!(!log.contains(Uuid::new_v4()));
    }

    #[test]
    fn signed_amount_follows_direction() {
        let mut r = record("Shop");
        assert_eq!(r.signed_amount(), Amount::from_major(-10));
        r.direction = Direction::Received;
        assert_eq!(r.signed_amount(), Amount::from_major(10));
    }

    #[test]
    fn record_serializes_amount_in_paise() {
        let mut r = record("Shop");
        r.amount = Amount::new(1050);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["amount"], 1050);
        assert_eq!(json["direction"], "sent");
        assert!(json["transaction_ref"].is_null());

        let back: TransactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn relative_labels() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(relative_label(now - Duration::seconds(30), now), "Just now");
        assert_eq!(relative_label(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_label(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(relative_label(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(relative_label(now - Duration::hours(30), now), "Yesterday");
        assert_eq!(relative_label(now - Duration::days(3), now), "3 days ago");
        assert_eq!(relative_label(now - Duration::days(40), now), "2023-12-06");
        assert_eq!(relative_label(now + Duration::minutes(5), now), "Just now");
    }
}
